use std::sync::Arc;

use dashmap::DashMap;

use crate::{
    entities::views::{ViewCount, ViewEvent},
    errors::{require_field, require_param, AppError},
    utils::slug::is_valid_slug,
};

/// Process-local view counts keyed by post slug. Counts reset on restart.
#[derive(Clone, Default)]
pub struct ViewCounter {
    counts: Arc<DashMap<String, u64>>,
}

impl ViewCounter {
    pub fn new() -> Self {
        ViewCounter::default()
    }

    /// Extracts and checks the slug a view event refers to.
    pub fn event_slug(event: ViewEvent) -> Result<String, AppError> {
        checked_slug(require_field("slug", event.slug)?)
    }

    /// Counts one view of `slug`. Callers decide whether the slug names a real post.
    pub fn increment(&self, slug: String) -> ViewCount {
        let views = {
            let mut entry = self.counts.entry(slug.clone()).or_insert(0);
            *entry = entry.saturating_add(1);
            *entry
        };

        tracing::debug!("View recorded for '{}' ({} total)", slug, views);
        ViewCount::new(slug, views).with_message("View count incremented")
    }

    /// Zero for a slug that was never counted.
    pub fn get(&self, slug: Option<&str>) -> Result<ViewCount, AppError> {
        let slug = checked_slug(require_param("slug", slug)?)?;
        let views = self.counts.get(&slug).map(|v| *v).unwrap_or(0);
        Ok(ViewCount::new(slug, views))
    }

    /// The `n` highest counts, ties ordered by slug.
    pub fn top(&self, n: usize) -> Vec<ViewCount> {
        let mut counts: Vec<ViewCount> = self
            .counts
            .iter()
            .map(|entry| ViewCount::new(entry.key().clone(), *entry.value()))
            .collect();
        counts.sort_by(|a, b| b.views.cmp(&a.views).then_with(|| a.slug.cmp(&b.slug)));
        counts.truncate(n);
        counts
    }
}

fn checked_slug(slug: String) -> Result<String, AppError> {
    let slug = slug.trim().to_string();
    if is_valid_slug(&slug) {
        Ok(slug)
    } else {
        Err(AppError::InvalidInput("slug must contain only lowercase letters, digits, or hyphens".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(slug: &str) -> ViewEvent {
        ViewEvent { slug: Some(slug.into()) }
    }

    fn count(counter: &ViewCounter, slug: &str) -> u64 {
        counter.increment(ViewCounter::event_slug(event(slug)).unwrap()).views
    }

    #[test]
    fn increments_per_slug() {
        let counter = ViewCounter::new();
        assert_eq!(count(&counter, "hello"), 1);
        assert_eq!(count(&counter, "hello"), 2);
        assert_eq!(count(&counter, " other "), 1);

        assert_eq!(counter.get(Some("hello")).unwrap().views, 2);
        assert_eq!(counter.get(Some("never-seen")).unwrap().views, 0);
    }

    #[test]
    fn missing_and_malformed_slugs_are_rejected() {
        let counter = ViewCounter::new();
        assert!(matches!(ViewCounter::event_slug(ViewEvent::default()), Err(AppError::MissingField(_))));
        assert!(matches!(counter.get(None), Err(AppError::MissingParameter(_))));
        assert!(matches!(ViewCounter::event_slug(event("../etc")), Err(AppError::InvalidInput(_))));
        assert!(counter.top(10).is_empty());
    }

    #[test]
    fn top_orders_by_count() {
        let counter = ViewCounter::new();
        for _ in 0..3 {
            count(&counter, "b");
        }
        count(&counter, "a");
        count(&counter, "c");

        let top: Vec<_> = counter.top(2).into_iter().map(|c| c.slug).collect();
        assert_eq!(top, vec!["b", "a"]);
    }

    #[actix_rt::test]
    async fn concurrent_increments_are_not_lost() {
        let counter = ViewCounter::new();
        let mut tasks = Vec::new();
        for _ in 0..8 {
            let counter = counter.clone();
            tasks.push(tokio::spawn(async move {
                for _ in 0..50 {
                    counter.increment("busy".to_string());
                }
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }
        assert_eq!(counter.get(Some("busy")).unwrap().views, 400);
    }
}
