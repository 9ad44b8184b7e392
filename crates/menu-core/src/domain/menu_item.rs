// ============================================================================
// Menu Core - Menu Item Entity
// File: crates/menu-core/src/domain/menu_item.rs
// Description: One entry of the account navigation menu
// ============================================================================

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Entry type as written in the persisted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Endpoint,
    Link,
    Separator,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Endpoint => "endpoint",
            ItemType::Link => "link",
            ItemType::Separator => "separator",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "endpoint" => Some(ItemType::Endpoint),
            "link" => Some(ItemType::Link),
            "separator" => Some(ItemType::Separator),
            _ => None,
        }
    }
}

impl Default for ItemType {
    fn default() -> Self {
        ItemType::Endpoint
    }
}

/// Browsing context a navigation entry opens in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkTarget {
    #[serde(rename = "_self")]
    SameContext,
    #[serde(rename = "_blank")]
    NewContext,
}

impl LinkTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkTarget::SameContext => "_self",
            LinkTarget::NewContext => "_blank",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "_self" => Some(LinkTarget::SameContext),
            "_blank" => Some(LinkTarget::NewContext),
            _ => None,
        }
    }
}

impl Default for LinkTarget {
    fn default() -> Self {
        LinkTarget::SameContext
    }
}

/// Per-viewer aggregate shown as a dynamic badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BadgeCountSource {
    #[default]
    None,
    OrdersCount,
    DownloadsCount,
}

impl BadgeCountSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeCountSource::None => "",
            BadgeCountSource::OrdersCount => "orders",
            BadgeCountSource::DownloadsCount => "downloads",
        }
    }

    /// Anything outside the fixed set collapses to `None`.
    pub fn parse(s: &str) -> Self {
        match s {
            "orders" => BadgeCountSource::OrdersCount,
            "downloads" => BadgeCountSource::DownloadsCount,
            _ => BadgeCountSource::None,
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, BadgeCountSource::None)
    }
}

/// Type-specific part of an item. Only the fields meaningful for the variant
/// exist on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItemKind {
    /// Custom content page at a routable account sub-path.
    Endpoint { slug: String, content: String },
    /// Navigates to an arbitrary URL.
    Link { url: String },
    /// Non-interactive divider.
    Separator,
}

impl MenuItemKind {
    pub fn item_type(&self) -> ItemType {
        match self {
            MenuItemKind::Endpoint { .. } => ItemType::Endpoint,
            MenuItemKind::Link { .. } => ItemType::Link,
            MenuItemKind::Separator => ItemType::Separator,
        }
    }
}

/// Menu item entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredMenuItem", into = "StoredMenuItem")]
pub struct MenuItem {
    pub id: String,
    pub title: String,
    pub kind: MenuItemKind,
    pub icon: String,
    /// Empty means visible to every viewer.
    pub roles: BTreeSet<String>,
    pub target: LinkTarget,
    pub enabled: bool,
    /// Seeded by the system rather than created by an operator.
    pub is_default: bool,
    pub css_class: String,
    pub badge_text: String,
    pub badge_count: BadgeCountSource,
    pub description: String,
}

impl MenuItem {
    /// Seed entry mirroring one of the platform's built-in account pages.
    pub fn built_in(id: &str, title: &str, icon: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            kind: MenuItemKind::Endpoint {
                slug: id.to_string(),
                content: String::new(),
            },
            icon: icon.to_string(),
            roles: BTreeSet::new(),
            target: LinkTarget::SameContext,
            enabled: true,
            is_default: true,
            css_class: String::new(),
            badge_text: String::new(),
            badge_count: BadgeCountSource::None,
            description: String::new(),
        }
    }

    pub fn item_type(&self) -> ItemType {
        self.kind.item_type()
    }

    /// Endpoint slug, empty for other variants.
    pub fn slug(&self) -> &str {
        match &self.kind {
            MenuItemKind::Endpoint { slug, .. } => slug,
            _ => "",
        }
    }

    pub fn url(&self) -> &str {
        match &self.kind {
            MenuItemKind::Link { url } => url,
            _ => "",
        }
    }

    pub fn content(&self) -> &str {
        match &self.kind {
            MenuItemKind::Endpoint { content, .. } => content,
            _ => "",
        }
    }

    pub fn is_separator(&self) -> bool {
        matches!(self.kind, MenuItemKind::Separator)
    }

    pub fn is_visible_to(&self, viewer_roles: &BTreeSet<String>) -> bool {
        self.roles.is_empty() || !self.roles.is_disjoint(viewer_roles)
    }
}

/// Built-in account pages the menu is seeded with.
pub fn default_items() -> Vec<MenuItem> {
    vec![
        MenuItem::built_in("dashboard", "Dashboard", "dashicons dashicons-dashboard"),
        MenuItem::built_in("orders", "Orders", "dashicons dashicons-cart"),
        MenuItem::built_in("downloads", "Downloads", "dashicons dashicons-download"),
        MenuItem::built_in("edit-address", "Addresses", "dashicons dashicons-location"),
        MenuItem::built_in("edit-account", "Account Details", "dashicons dashicons-admin-users"),
        MenuItem::built_in("customer-logout", "Logout", "dashicons dashicons-exit"),
    ]
}

/// Flat persisted record. Every field is present on write; missing fields on
/// read take the template defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredMenuItem {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub endpoint: String,
    pub url: String,
    pub content: String,
    pub icon: String,
    pub roles: Vec<String>,
    pub target: String,
    pub enabled: bool,
    pub is_default: bool,
    pub css_class: String,
    pub badge: String,
    pub badge_count: String,
    pub description: String,
}

impl Default for StoredMenuItem {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            item_type: ItemType::Endpoint.as_str().to_string(),
            endpoint: String::new(),
            url: String::new(),
            content: String::new(),
            icon: String::new(),
            roles: Vec::new(),
            target: LinkTarget::SameContext.as_str().to_string(),
            enabled: true,
            is_default: false,
            css_class: String::new(),
            badge: String::new(),
            badge_count: String::new(),
            description: String::new(),
        }
    }
}

impl From<StoredMenuItem> for MenuItem {
    fn from(row: StoredMenuItem) -> Self {
        let kind = match ItemType::from_str(&row.item_type).unwrap_or_default() {
            ItemType::Endpoint => MenuItemKind::Endpoint {
                slug: row.endpoint,
                content: row.content,
            },
            ItemType::Link => MenuItemKind::Link { url: row.url },
            ItemType::Separator => MenuItemKind::Separator,
        };

        MenuItem {
            id: row.id,
            title: row.title,
            kind,
            icon: row.icon,
            roles: row.roles.into_iter().collect(),
            target: LinkTarget::from_str(&row.target).unwrap_or_default(),
            enabled: row.enabled,
            is_default: row.is_default,
            css_class: row.css_class,
            badge_text: row.badge,
            badge_count: BadgeCountSource::parse(&row.badge_count),
            description: row.description,
        }
    }
}

impl From<MenuItem> for StoredMenuItem {
    fn from(item: MenuItem) -> Self {
        let item_type = item.item_type().as_str().to_string();
        let (endpoint, content, url) = match item.kind {
            MenuItemKind::Endpoint { slug, content } => (slug, content, String::new()),
            MenuItemKind::Link { url } => (String::new(), String::new(), url),
            MenuItemKind::Separator => (String::new(), String::new(), String::new()),
        };

        StoredMenuItem {
            id: item.id,
            title: item.title,
            item_type,
            endpoint,
            url,
            content,
            icon: item.icon,
            roles: item.roles.into_iter().collect(),
            target: item.target.as_str().to_string(),
            enabled: item.enabled,
            is_default: item.is_default,
            css_class: item.css_class,
            badge: item.badge_text,
            badge_count: item.badge_count.as_str().to_string(),
            description: item.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_items_are_enabled_built_ins() {
        let items = default_items();
        assert_eq!(items.len(), 6);
        assert!(items.iter().all(|i| i.enabled && i.is_default));
        assert_eq!(items[1].slug(), "orders");
    }

    #[test]
    fn test_serializes_to_flat_record() {
        let mut item = MenuItem::built_in("wishlist", "Wishlist", "");
        item.is_default = false;
        item.roles.insert("customer".into());
        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(value["type"], "endpoint");
        assert_eq!(value["endpoint"], "wishlist");
        assert_eq!(value["url"], "");
        assert_eq!(value["target"], "_self");
        assert_eq!(value["badge_count"], "");
        assert_eq!(value["roles"], json!(["customer"]));
    }

    #[test]
    fn test_missing_fields_take_template_defaults() {
        let item: MenuItem = serde_json::from_value(json!({
            "id": "support",
            "title": "Support",
            "type": "link",
            "url": "https://example.com/help"
        }))
        .unwrap();

        assert_eq!(item.url(), "https://example.com/help");
        assert!(item.enabled);
        assert!(!item.is_default);
        assert_eq!(item.target, LinkTarget::SameContext);
        assert_eq!(item.badge_count, BadgeCountSource::None);
    }

    #[test]
    fn test_unknown_type_reads_as_endpoint() {
        let item: MenuItem =
            serde_json::from_value(json!({"id": "x", "type": "widget", "endpoint": "x"})).unwrap();
        assert_eq!(item.item_type(), ItemType::Endpoint);
        assert_eq!(item.slug(), "x");
    }

    #[test]
    fn test_role_visibility() {
        let mut item = MenuItem::built_in("vip", "VIP", "");
        let customer: BTreeSet<String> = ["customer".to_string()].into();
        assert!(item.is_visible_to(&customer));
        assert!(item.is_visible_to(&BTreeSet::new()));

        item.roles.insert("shop_manager".into());
        assert!(!item.is_visible_to(&customer));
        assert!(!item.is_visible_to(&BTreeSet::new()));
    }
}
