use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use dashmap::DashMap;
use parking_lot::Mutex;

/// Sliding window
#[derive(Debug)]
pub struct SlidingWindow {
    window_size: Duration,
    limit: u64,
    current_window_start: Instant,
    current_count: u64,
    prev_count: u64,
    last_seen: Instant,
}

impl SlidingWindow {
    fn new(window_size: Duration, limit: u64, now: Instant) -> Self {
        Self {
            window_size,
            limit,
            current_window_start: now,
            current_count: 0,
            prev_count: 0,
            last_seen: now,
        }
    }

    /// Moves the window forward so that `now` lies inside the current one.
    fn roll(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.current_window_start);
        if elapsed >= self.window_size * 2 {
            self.prev_count = 0;
            self.current_count = 0;
            self.current_window_start = now;
        } else if elapsed >= self.window_size {
            self.prev_count = self.current_count;
            self.current_count = 0;
            self.current_window_start += self.window_size;
        }
    }

    fn effective(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.current_window_start);
        let weight = (elapsed.as_secs_f64() / self.window_size.as_secs_f64()).min(1.0);
        (self.prev_count as f64) * (1.0 - weight) + (self.current_count as f64)
    }

    /// Returns `Ok(remaining)` when allowed, `Err(retry_after_secs)` otherwise.
    fn try_acquire(&mut self, now: Instant) -> Result<u64, u64> {
        self.last_seen = now;
        self.roll(now);

        let effective = self.effective(now);
        if effective + 1.0 <= self.limit as f64 + 1e-9 {
            self.current_count += 1;
            let remaining = (self.limit as f64 - effective - 1.0).max(0.0).floor() as u64;
            return Ok(remaining);
        }

        Err(self.retry_after(now))
    }

    /// Seconds until the weighted count drops enough to admit one more request.
    fn retry_after(&self, now: Instant) -> u64 {
        let window = self.window_size.as_secs_f64();
        let elapsed = now.saturating_duration_since(self.current_window_start).as_secs_f64();
        let limit = self.limit as f64;
        let current = self.current_count as f64;

        let wait = if current + 1.0 > limit || self.prev_count == 0 {
            // Only the next window start helps.
            window - elapsed
        } else {
            // prev * (1 - t/window) + current + 1 <= limit
            let prev = self.prev_count as f64;
            let target = window * (1.0 - (limit - current - 1.0) / prev);
            target - elapsed
        };

        (wait.ceil() as u64).max(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed { remaining: u64 },
    Limited { retry_after_secs: u64 },
}

type Key = String;

/// Per-client request budget over a sliding window.
#[derive(Clone)]
pub struct ClientRateLimiter {
    map: Arc<DashMap<Key, Arc<Mutex<SlidingWindow>>>>,
    window_size: Duration,
    limit: u64,
}

impl ClientRateLimiter {
    pub fn new(limit: u64, window_size: Duration) -> Self {
        Self {
            map: Arc::new(DashMap::new()),
            window_size,
            limit: limit.max(1),
        }
    }

    fn get_window(&self, key: &str, now: Instant) -> Arc<Mutex<SlidingWindow>> {
        if let Some(existing) = self.map.get(key) {
            return existing.clone();
        }
        self.map
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(SlidingWindow::new(self.window_size, self.limit, now))))
            .clone()
    }

    pub fn check(&self, key: &str) -> RateDecision {
        self.check_at(key, Instant::now())
    }

    pub fn check_at(&self, key: &str, now: Instant) -> RateDecision {
        let window = self.get_window(key, now);
        let mut w = window.lock();
        match w.try_acquire(now) {
            Ok(remaining) => RateDecision::Allowed { remaining },
            Err(retry_after_secs) => RateDecision::Limited { retry_after_secs },
        }
    }

    /// Drops windows untouched for two full window lengths. Returns how many were removed.
    pub fn evict_idle(&self) -> usize {
        self.evict_idle_at(Instant::now())
    }

    pub fn evict_idle_at(&self, now: Instant) -> usize {
        let ttl = self.window_size * 2;
        let before = self.map.len();
        self.map.retain(|_, window| now.saturating_duration_since(window.lock().last_seen) <= ttl);
        before - self.map.len()
    }

    pub fn tracked_clients(&self) -> usize {
        self.map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: Duration = Duration::from_secs(3600);

    #[test]
    fn rejects_request_over_the_limit() {
        let limiter = ClientRateLimiter::new(5, HOUR);
        let start = Instant::now();

        for i in 0..5 {
            let decision = limiter.check_at("1.2.3.4", start + Duration::from_secs(i));
            assert!(matches!(decision, RateDecision::Allowed { .. }), "request {i}");
        }

        match limiter.check_at("1.2.3.4", start + Duration::from_secs(10)) {
            RateDecision::Limited { retry_after_secs } => {
                assert!(retry_after_secs > 0 && retry_after_secs <= 3600);
            }
            other => panic!("expected limit, got {other:?}"),
        }

        assert!(matches!(
            limiter.check_at("5.6.7.8", start + Duration::from_secs(10)),
            RateDecision::Allowed { remaining: 4 }
        ));
    }

    #[test]
    fn budget_recovers_as_window_slides() {
        let limiter = ClientRateLimiter::new(2, HOUR);
        let start = Instant::now();

        limiter.check_at("k", start);
        limiter.check_at("k", start);
        assert!(matches!(limiter.check_at("k", start), RateDecision::Limited { .. }));

        // Half-way into the next window the previous two weigh as one.
        let later = start + HOUR + HOUR / 2;
        assert!(matches!(limiter.check_at("k", later), RateDecision::Allowed { .. }));
        assert!(matches!(limiter.check_at("k", later), RateDecision::Limited { .. }));

        let much_later = start + HOUR * 5;
        assert!(matches!(limiter.check_at("k", much_later), RateDecision::Allowed { remaining: 1 }));
    }

    #[test]
    fn idle_windows_are_evicted() {
        let limiter = ClientRateLimiter::new(1, Duration::from_secs(10));
        let start = Instant::now();
        limiter.check_at("a", start);
        limiter.check_at("b", start + Duration::from_secs(15));

        assert_eq!(limiter.evict_idle_at(start + Duration::from_secs(25)), 1);
        assert_eq!(limiter.tracked_clients(), 1);
    }
}
