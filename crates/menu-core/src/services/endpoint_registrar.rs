// ============================================================================
// Menu Core - Endpoint Registrar
// File: crates/menu-core/src/services/endpoint_registrar.rs
// Description: Custom account routes and deferred route-cache invalidation
// ============================================================================

use std::collections::BTreeSet;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;
use tracing::{debug, info};

use super::menu_store::MenuItemStore;
use super::navigation::DEFAULT_TITLE;
use crate::domain::{is_reserved_slug, MenuItem, MenuItemKind};
use crate::error::DomainError;
use crate::repositories::HostRouter;
use crate::sanitize::escape_html;

/// Outcome of one lifecycle tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitReport {
    pub registered: usize,
    pub flushed: bool,
}

pub struct EndpointRegistrar {
    store: Arc<MenuItemStore>,
    /// Route generation this instance last compiled into its router.
    compiled: Mutex<Option<String>>,
}

impl EndpointRegistrar {
    pub fn new(store: Arc<MenuItemStore>) -> Self {
        Self {
            store,
            compiled: Mutex::new(None),
        }
    }

    /// Enabled endpoint items with a non-reserved slug, keyed by slug. A
    /// later item with the same slug replaces the earlier one.
    pub fn custom_endpoints(items: &[MenuItem]) -> IndexMap<String, &MenuItem> {
        let mut endpoints = IndexMap::new();
        for item in items.iter().filter(|i| i.enabled) {
            let MenuItemKind::Endpoint { slug, .. } = &item.kind else {
                continue;
            };
            if slug.is_empty() || is_reserved_slug(slug) {
                continue;
            }
            endpoints.insert(slug.clone(), item);
        }
        endpoints
    }

    pub fn custom_routes(items: &[MenuItem]) -> BTreeSet<String> {
        Self::custom_endpoints(items).into_keys().collect()
    }

    /// The custom endpoint served at `slug`, if any.
    pub fn find_endpoint<'a>(items: &'a [MenuItem], slug: &str) -> Option<&'a MenuItem> {
        Self::custom_endpoints(items).get(slug).copied()
    }

    /// One host initialisation cycle: register every custom route from the
    /// stored list, then invalidate the route cache once if the stored route
    /// generation differs from the one this instance last compiled.
    ///
    /// The generation is only recorded after a successful invalidation, so a
    /// failed one is retried on the next cycle.
    pub async fn on_init(&self, router: &dyn HostRouter) -> Result<InitReport, DomainError> {
        let items = self.store.load().await?;
        let routes = Self::custom_routes(&items);
        router.register_routes(&routes)?;

        let pending = self.store.routes_generation().await?;
        let up_to_date = pending.is_none() || *self.compiled.lock() == pending;
        if up_to_date {
            debug!("{} custom routes registered", routes.len());
            return Ok(InitReport {
                registered: routes.len(),
                flushed: false,
            });
        }

        router.flush_route_cache()?;
        *self.compiled.lock() = pending;
        info!("Route cache flushed, {} custom routes registered", routes.len());

        Ok(InitReport {
            registered: routes.len(),
            flushed: true,
        })
    }

    /// Called when the integration is switched on.
    pub async fn on_activate(&self) -> Result<(), DomainError> {
        self.store.mark_routes_dirty().await
    }

    /// Called when the integration is switched off: withdraw every custom
    /// route and rebuild the cache right away.
    pub fn on_deactivate(&self, router: &dyn HostRouter) -> Result<(), DomainError> {
        router.register_routes(&BTreeSet::new())?;
        router.flush_route_cache()?;
        *self.compiled.lock() = None;
        Ok(())
    }

    /// Body of a custom endpoint page. `expand` resolves the host's macro
    /// placeholders.
    pub fn render_content<F>(&self, item: &MenuItem, expand: F) -> String
    where
        F: FnOnce(&str) -> String,
    {
        let body = if item.content().is_empty() {
            let title = if item.title.is_empty() { DEFAULT_TITLE } else { &item.title };
            format!("<p>Welcome to {}.</p>", escape_html(title))
        } else {
            expand(&self.store.validator().sanitizer().markup(item.content()))
        };
        format!("<div class=\"menu-endpoint-content\">{}</div>", body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoleTable;
    use crate::repositories::MockHostRouter;
    use crate::services::{PartialMenuItem, Validator};
    use crate::test_support::InMemoryOptions;
    use serde_json::json;

    fn endpoint(id: &str, slug: &str) -> MenuItem {
        MenuItem {
            kind: MenuItemKind::Endpoint {
                slug: slug.into(),
                content: String::new(),
            },
            is_default: false,
            ..MenuItem::built_in(id, "Page", "")
        }
    }

    fn registrar() -> EndpointRegistrar {
        let validator = Arc::new(Validator::new(RoleTable::default()).unwrap());
        let store = MenuItemStore::new(Arc::new(InMemoryOptions::default()), validator, "menu_");
        EndpointRegistrar::new(Arc::new(store))
    }

    #[test]
    fn test_custom_route_for_enabled_endpoint() {
        let routes = EndpointRegistrar::custom_routes(&[endpoint("w", "wishlist")]);
        assert_eq!(routes, BTreeSet::from(["wishlist".to_string()]));
    }

    #[test]
    fn test_reserved_slug_is_never_a_custom_route() {
        let items = [endpoint("o", "orders")];
        assert!(EndpointRegistrar::custom_routes(&items).is_empty());
    }

    #[test]
    fn test_disabled_and_non_endpoint_items_are_skipped() {
        let mut disabled = endpoint("d", "hidden");
        disabled.enabled = false;
        let link = MenuItem {
            kind: MenuItemKind::Link { url: "https://example.com/".into() },
            ..endpoint("l", "")
        };
        let empty_slug = endpoint("e", "");
        assert!(EndpointRegistrar::custom_routes(&[disabled, link, empty_slug]).is_empty());
    }

    #[test]
    fn test_duplicate_slug_later_item_is_served() {
        let items = [endpoint("first", "gifts"), endpoint("second", "gifts")];
        let found = EndpointRegistrar::find_endpoint(&items, "gifts");
        assert_eq!(found.map(|i| i.id.as_str()), Some("second"));
        assert!(EndpointRegistrar::find_endpoint(&items, "orders").is_none());
    }

    async fn save_wishlist(store: &MenuItemStore) {
        store
            .save(&PartialMenuItem::list_from_value(json!([
                {"id": "w", "endpoint": "wishlist"},
                {"id": "o", "endpoint": "orders"},
            ]))
            .unwrap())
            .await
            .unwrap();
    }

    fn wishlist_only(slugs: &BTreeSet<String>) -> bool {
        slugs == &BTreeSet::from(["wishlist".to_string()])
    }

    #[tokio::test]
    async fn test_on_init_registers_and_flushes_once_after_save() {
        let registrar = registrar();
        save_wishlist(&registrar.store).await;

        let mut router = MockHostRouter::new();
        router
            .expect_register_routes()
            .withf(wishlist_only)
            .times(2)
            .returning(|_| Ok(()));
        router
            .expect_flush_route_cache()
            .times(1)
            .returning(|| Ok(()));

        let first = registrar.on_init(&router).await.unwrap();
        assert_eq!(first, InitReport { registered: 1, flushed: true });

        let second = registrar.on_init(&router).await.unwrap();
        assert_eq!(second, InitReport { registered: 1, flushed: false });
    }

    #[tokio::test]
    async fn test_activation_schedules_a_flush() {
        let registrar = registrar();
        registrar.on_activate().await.unwrap();

        let mut router = MockHostRouter::new();
        router
            .expect_register_routes()
            .withf(|slugs| slugs.is_empty())
            .times(1)
            .returning(|_| Ok(()));
        router.expect_flush_route_cache().times(1).returning(|| Ok(()));

        let report = registrar.on_init(&router).await.unwrap();
        assert!(report.flushed);
        assert_eq!(report.registered, 0);
    }

    #[tokio::test]
    async fn test_failed_flush_is_retried_next_cycle() {
        let registrar = registrar();
        save_wishlist(&registrar.store).await;

        let mut failing = MockHostRouter::new();
        failing.expect_register_routes().returning(|_| Ok(()));
        failing
            .expect_flush_route_cache()
            .times(1)
            .returning(|| Err(DomainError::CollaboratorError("rewrite store locked".into())));
        assert!(registrar.on_init(&failing).await.is_err());

        let mut router = MockHostRouter::new();
        router.expect_register_routes().returning(|_| Ok(()));
        router.expect_flush_route_cache().times(1).returning(|| Ok(()));

        let retried = registrar.on_init(&router).await.unwrap();
        assert_eq!(retried, InitReport { registered: 1, flushed: true });
        let settled = registrar.on_init(&router).await.unwrap();
        assert!(!settled.flushed);
    }

    #[tokio::test]
    async fn test_every_instance_flushes_once_per_change() {
        let first = registrar();
        let second = EndpointRegistrar::new(first.store.clone());
        save_wishlist(&first.store).await;

        for instance in [&first, &second] {
            let mut router = MockHostRouter::new();
            router.expect_register_routes().returning(|_| Ok(()));
            router.expect_flush_route_cache().times(1).returning(|| Ok(()));
            assert!(instance.on_init(&router).await.unwrap().flushed);
            assert!(!instance.on_init(&router).await.unwrap().flushed);
        }
    }

    #[tokio::test]
    async fn test_nothing_stored_means_no_flush() {
        let mut router = MockHostRouter::new();
        router.expect_register_routes().returning(|_| Ok(()));
        router.expect_flush_route_cache().never();
        assert!(!registrar().on_init(&router).await.unwrap().flushed);
    }

    #[test]
    fn test_deactivation_withdraws_routes_immediately() {
        let mut router = MockHostRouter::new();
        router
            .expect_register_routes()
            .withf(|slugs| slugs.is_empty())
            .times(1)
            .returning(|_| Ok(()));
        router.expect_flush_route_cache().times(1).returning(|| Ok(()));
        registrar().on_deactivate(&router).unwrap();
    }

    #[test]
    fn test_render_content_wraps_and_expands() {
        let mut item = endpoint("w", "wishlist");
        item.kind = MenuItemKind::Endpoint {
            slug: "wishlist".into(),
            content: "<p>[wishlist_table]</p>".into(),
        };
        let html = registrar().render_content(&item, |c| c.replace("[wishlist_table]", "<table></table>"));
        assert_eq!(
            html,
            "<div class=\"menu-endpoint-content\"><p><table></table></p></div>"
        );
    }

    #[test]
    fn test_render_empty_content_welcomes() {
        let mut item = endpoint("g", "gifts");
        item.title = "Gifts & <Cards>".into();
        let html = registrar().render_content(&item, |c| c.to_string());
        assert_eq!(
            html,
            "<div class=\"menu-endpoint-content\"><p>Welcome to Gifts &amp; &lt;Cards&gt;.</p></div>"
        );

        item.title.clear();
        let html = registrar().render_content(&item, |c| c.to_string());
        assert!(html.contains("Welcome to Untitled."));
    }
}
