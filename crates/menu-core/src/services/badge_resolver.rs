// ============================================================================
// Menu Core - Badge Resolver
// File: crates/menu-core/src/services/badge_resolver.rs
// Description: Per-viewer badge computation for navigation entries
// ============================================================================

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::warn;

use super::navigation::Navigation;
use crate::domain::{BadgeCountSource, MenuItem, Viewer};
use crate::error::DomainError;
use crate::repositories::CustomerStats;
use crate::sanitize::escape_html;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeKind {
    /// Live per-viewer aggregate.
    Count,
    /// Operator-provided text.
    Static,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    /// Unescaped.
    pub text: String,
    pub kind: BadgeKind,
}

impl Badge {
    pub fn to_html(&self) -> String {
        let class = match self.kind {
            BadgeKind::Count => "menu-badge menu-badge-count",
            BadgeKind::Static => "menu-badge",
        };
        format!("<span class=\"{}\">{}</span>", class, escape_html(&self.text))
    }
}

pub struct BadgeResolver {
    stats: Arc<dyn CustomerStats>,
}

impl BadgeResolver {
    pub fn new(stats: Arc<dyn CustomerStats>) -> Self {
        Self { stats }
    }

    /// A requested count takes priority over static text. It is only
    /// computed for logged-in viewers; anonymous viewers see the static text.
    /// A zero count shows nothing.
    pub async fn resolve(&self, item: &MenuItem, viewer: &Viewer) -> Option<Badge> {
        let customer_id = viewer.customer_id.as_deref().filter(|_| item.badge_count.is_set());
        if let Some(customer_id) = customer_id {
            return match self.count(item.badge_count, customer_id).await {
                Ok(0) => None,
                Ok(count) => Some(Badge {
                    text: count.to_string(),
                    kind: BadgeKind::Count,
                }),
                Err(e) => {
                    warn!("Badge count for item {} unavailable: {}", item.id, e);
                    None
                }
            };
        }

        (!item.badge_text.is_empty()).then(|| Badge {
            text: item.badge_text.clone(),
            kind: BadgeKind::Static,
        })
    }

    /// Escaped badge text, or empty when no badge applies.
    pub async fn resolve_text(&self, item: &MenuItem, viewer: &Viewer) -> String {
        self.resolve(item, viewer)
            .await
            .map(|badge| escape_html(&badge.text))
            .unwrap_or_default()
    }

    /// Badge markup for every projected entry that has one.
    pub async fn resolve_all(&self, navigation: &Navigation, viewer: &Viewer) -> IndexMap<String, String> {
        let mut badges = IndexMap::new();
        for (key, entry) in navigation.iter() {
            if let Some(badge) = self.resolve(&entry.item, viewer).await {
                badges.insert(key.to_string(), badge.to_html());
            }
        }
        badges
    }

    async fn count(&self, source: BadgeCountSource, customer_id: &str) -> Result<u64, DomainError> {
        match source {
            BadgeCountSource::OrdersCount => self.stats.order_count(customer_id).await,
            BadgeCountSource::DownloadsCount => self.stats.download_count(customer_id).await,
            BadgeCountSource::None => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockCustomerStats;
    use crate::services::NavigationProjector;
    use std::collections::BTreeSet;

    fn item_with(count: BadgeCountSource, text: &str) -> MenuItem {
        MenuItem {
            badge_count: count,
            badge_text: text.to_string(),
            ..MenuItem::built_in("orders", "Orders", "")
        }
    }

    fn resolver_with_orders(count: u64) -> BadgeResolver {
        let mut stats = MockCustomerStats::new();
        stats
            .expect_order_count()
            .returning(move |_| Ok(count));
        BadgeResolver::new(Arc::new(stats))
    }

    fn customer() -> Viewer {
        Viewer::customer("42", ["customer"])
    }

    #[tokio::test]
    async fn test_zero_count_shows_nothing() {
        let resolver = resolver_with_orders(0);
        let item = item_with(BadgeCountSource::OrdersCount, "");
        assert_eq!(resolver.resolve(&item, &customer()).await, None);
        assert_eq!(resolver.resolve_text(&item, &customer()).await, "");
    }

    #[tokio::test]
    async fn test_positive_count_is_decimal_text() {
        let resolver = resolver_with_orders(3);
        let item = item_with(BadgeCountSource::OrdersCount, "");
        assert_eq!(resolver.resolve_text(&item, &customer()).await, "3");
        assert_eq!(
            resolver.resolve(&item, &customer()).await.map(|b| b.to_html()),
            Some("<span class=\"menu-badge menu-badge-count\">3</span>".to_string())
        );
    }

    #[tokio::test]
    async fn test_count_takes_priority_over_static_text() {
        let resolver = resolver_with_orders(0);
        let item = item_with(BadgeCountSource::OrdersCount, "Hot");
        assert_eq!(resolver.resolve(&item, &customer()).await, None);
    }

    #[tokio::test]
    async fn test_downloads_count() {
        let mut stats = MockCustomerStats::new();
        stats
            .expect_download_count()
            .withf(|id| id == "42")
            .times(1)
            .returning(|_| Ok(7));
        let resolver = BadgeResolver::new(Arc::new(stats));
        let item = item_with(BadgeCountSource::DownloadsCount, "");
        assert_eq!(resolver.resolve_text(&item, &customer()).await, "7");
    }

    #[tokio::test]
    async fn test_anonymous_viewer_gets_static_text() {
        let mut stats = MockCustomerStats::new();
        stats.expect_order_count().never();
        let resolver = BadgeResolver::new(Arc::new(stats));
        let item = item_with(BadgeCountSource::OrdersCount, "<New>");

        let badge = resolver.resolve(&item, &Viewer::anonymous()).await;
        assert_eq!(
            badge.map(|b| b.to_html()),
            Some("<span class=\"menu-badge\">&lt;New&gt;</span>".to_string())
        );
        assert_eq!(resolver.resolve_text(&item, &Viewer::anonymous()).await, "&lt;New&gt;");
    }

    #[tokio::test]
    async fn test_collaborator_failure_degrades_to_no_badge() {
        let mut stats = MockCustomerStats::new();
        stats
            .expect_order_count()
            .returning(|_| Err(DomainError::CollaboratorError("timeout".into())));
        let resolver = BadgeResolver::new(Arc::new(stats));
        let item = item_with(BadgeCountSource::OrdersCount, "Static");
        assert_eq!(resolver.resolve(&item, &customer()).await, None);
    }

    #[tokio::test]
    async fn test_resolve_all_keys_by_navigation_key() {
        let resolver = resolver_with_orders(2);
        let items = vec![
            item_with(BadgeCountSource::OrdersCount, ""),
            MenuItem::built_in("downloads", "Downloads", ""),
        ];
        let nav = NavigationProjector::project(&items, &BTreeSet::new());

        let badges = resolver.resolve_all(&nav, &customer()).await;
        assert_eq!(badges.len(), 1);
        assert_eq!(badges["orders"], "<span class=\"menu-badge menu-badge-count\">2</span>");
    }
}
