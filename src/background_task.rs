use tokio::time::{interval, Duration};

use crate::limiter::rate_limiter::ClientRateLimiter;

const EVICTION_PERIOD: Duration = Duration::from_secs(10 * 60);

/// Drops rate-limit windows of clients that have gone quiet.
pub async fn start_limiter_eviction_task(limiter: ClientRateLimiter) {
    let mut interval = interval(EVICTION_PERIOD);

    loop {
        interval.tick().await;

        let evicted = limiter.evict_idle();
        if evicted > 0 {
            tracing::info!("Evicted {} idle rate-limit windows", evicted);
        }
    }
}
