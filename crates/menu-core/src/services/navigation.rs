// ============================================================================
// Menu Core - Navigation Projector
// File: crates/menu-core/src/services/navigation.rs
// Description: Per-viewer projection of the menu into the host navigation
// ============================================================================
//! The projection keeps list order. When two items derive the same key the
//! later one replaces the earlier one's value but the entry keeps the earlier
//! position.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::Serialize;

use super::key_mapper::KeyMapper;
use crate::domain::{ItemType, LinkTarget, MenuItem, MenuItemKind};
use crate::sanitize::sanitize_html_class;

/// Shown for non-separator items whose title sanitized to nothing.
pub const DEFAULT_TITLE: &str = "Untitled";

/// Class prefix the host puts on each navigation list element.
pub const NAV_LINK_CLASS_PREFIX: &str = "account-navigation-link--";

/// Where a navigation key leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Destination {
    /// An account sub-path served by the host router.
    Route { slug: String },
    External { url: String, target: LinkTarget },
    /// Not navigable.
    Inert,
}

impl Destination {
    fn for_item(item: &MenuItem, key: &str) -> Self {
        match &item.kind {
            MenuItemKind::Endpoint { .. } => Destination::Route {
                slug: key.to_string(),
            },
            MenuItemKind::Link { url } => Destination::External {
                url: url.clone(),
                target: item.target,
            },
            MenuItemKind::Separator => Destination::Inert,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub item: MenuItem,
    pub destination: Destination,
}

impl NavEntry {
    pub fn title(&self) -> &str {
        if self.item.title.is_empty() && !self.item.is_separator() {
            DEFAULT_TITLE
        } else {
            &self.item.title
        }
    }
}

/// Per-key settings handed to the client script that decorates the rendered
/// navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrontendItem {
    pub target: LinkTarget,
    pub icon: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub css_class: String,
    pub badge: String,
    pub description: String,
}

/// Ordered projection of the menu for one viewer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigation {
    entries: IndexMap<String, NavEntry>,
}

impl Navigation {
    /// Nothing to show: the host keeps its own menu.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, key: &str) -> Option<&NavEntry> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NavEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Key to display title, in display order.
    pub fn titles(&self) -> IndexMap<String, String> {
        self.entries
            .iter()
            .map(|(key, entry)| (key.clone(), entry.title().to_string()))
            .collect()
    }

    /// URL the host should use for `key`. Links resolve to their own URL and
    /// separators to `#`; anything else keeps the host's URL.
    pub fn resolve_url(&self, key: &str, fallback: &str) -> String {
        match self.entries.get(key).map(|e| &e.destination) {
            Some(Destination::External { url, .. }) if !url.is_empty() => url.clone(),
            Some(Destination::Inert) => "#".to_string(),
            _ => fallback.to_string(),
        }
    }

    /// Layout-only rules that turn separator entries into a thin divider.
    pub fn separator_css(&self) -> String {
        let mut css = String::new();
        for (key, entry) in &self.entries {
            if !entry.item.is_separator() {
                continue;
            }
            let class = format!("{}{}", NAV_LINK_CLASS_PREFIX, sanitize_html_class(key));
            css.push_str(&format!(
                ".{class}{{pointer-events:none;border-bottom:1px solid #e5e7eb;margin:4px 0;padding:0 !important;height:1px;overflow:hidden;}}"
            ));
            css.push_str(&format!(".{class} a{{display:none !important;}}"));
        }
        css
    }

    /// `badges` maps keys to already rendered badge markup.
    pub fn frontend_config(&self, badges: &IndexMap<String, String>) -> IndexMap<String, FrontendItem> {
        self.entries
            .iter()
            .map(|(key, entry)| {
                let item = &entry.item;
                let config = FrontendItem {
                    target: item.target,
                    icon: item.icon.clone(),
                    item_type: item.item_type(),
                    css_class: item.css_class.clone(),
                    badge: badges.get(key).cloned().unwrap_or_default(),
                    description: item.description.clone(),
                };
                (key.clone(), config)
            })
            .collect()
    }
}

pub struct NavigationProjector;

impl NavigationProjector {
    pub fn project(items: &[MenuItem], viewer_roles: &BTreeSet<String>) -> Navigation {
        let mut entries = IndexMap::new();
        for item in items {
            if !item.enabled || !item.is_visible_to(viewer_roles) {
                continue;
            }
            let key = KeyMapper::derive_key(item);
            let destination = Destination::for_item(item, &key);
            entries.insert(
                key,
                NavEntry {
                    item: item.clone(),
                    destination,
                },
            );
        }
        Navigation { entries }
    }
}
