use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use anyhow::Context;
use portfolio_cms::{
    background_task::start_limiter_eviction_task,
    graceful_shutdown::shutdown_signal,
    middlewares::auth::AdminGate,
    routes::configure_routes,
    settings::AppConfig,
    telemetry::init_tracing,
    web::cors::build_cors,
    AppState,
};
use tracing_actix_web::TracingLogger;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::new().context("Configuration error")?;

    init_tracing(&config);
    tracing::info!("Loaded configuration: {:?}", config);

    let app_state = web::Data::new(AppState::new(&config));
    let limiter = app_state.contact_limiter.clone();

    let server_addr = config.server_addr();
    tracing::info!(
        "🚀 Starting {} v{} on {}",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let app_config = config.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .configure(|cfg| configure_routes(cfg, &app_config))
            .wrap(AdminGate)
            .wrap(NormalizePath::trim())
            .wrap(build_cors(&app_config))
            .wrap(TracingLogger::default())
    })
    .workers(config.worker_count.max(1))
    .disable_signals()
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind {}", server_addr))?
    .run();

    let handle = server.handle();
    tokio::spawn(start_limiter_eviction_task(limiter));

    tokio::select! {
        res = server => res.context("Server error")?,
        _ = shutdown_signal() => {
            handle.stop(true).await;
            tracing::info!("Server stopped");
        }
    }

    Ok(())
}
