use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::settings::{AppConfig, LogFormat};

/// Installs the global subscriber. JSON output in production or when configured.
pub fn init_tracing(config: &AppConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,portfolio_cms=debug"));

    let json_logs = config.log_format == LogFormat::Json || config.is_production();

    if json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!(
        service = %config.name,
        env = %config.env,
        json_logs,
        "Tracing initialized"
    );
}
