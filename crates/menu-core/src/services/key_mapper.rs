//! Integration keys for host-facing, key-indexed structures

use crate::domain::{MenuItem, MenuItemKind};

/// Namespace for link keys. Slugs and ids never contain `--`, so a prefixed
/// key can never equal a route slug.
pub const LINK_KEY_PREFIX: &str = "link--";
pub const SEPARATOR_KEY_PREFIX: &str = "sep--";

pub struct KeyMapper;

impl KeyMapper {
    /// Key an enabled, visible item is addressed by.
    pub fn derive_key(item: &MenuItem) -> String {
        match &item.kind {
            MenuItemKind::Endpoint { slug, .. } if !slug.is_empty() => slug.clone(),
            MenuItemKind::Endpoint { .. } => item.id.clone(),
            MenuItemKind::Link { .. } => format!("{}{}", LINK_KEY_PREFIX, item.id),
            MenuItemKind::Separator => format!("{}{}", SEPARATOR_KEY_PREFIX, item.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, kind: MenuItemKind) -> MenuItem {
        MenuItem {
            kind,
            is_default: false,
            ..MenuItem::built_in(id, "Support", "")
        }
    }

    #[test]
    fn test_endpoint_key_is_slug_or_id() {
        let with_slug = item(
            "e1",
            MenuItemKind::Endpoint { slug: "wishlist".into(), content: String::new() },
        );
        let without_slug = item(
            "e2",
            MenuItemKind::Endpoint { slug: String::new(), content: String::new() },
        );
        assert_eq!(KeyMapper::derive_key(&with_slug), "wishlist");
        assert_eq!(KeyMapper::derive_key(&without_slug), "e2");
    }

    #[test]
    fn test_links_with_same_title_get_distinct_keys() {
        let a = item("a", MenuItemKind::Link { url: "https://example.com/".into() });
        let b = item("b", MenuItemKind::Link { url: "https://example.com/".into() });
        assert_eq!(KeyMapper::derive_key(&a), "link--a");
        assert_eq!(KeyMapper::derive_key(&b), "link--b");
    }

    #[test]
    fn test_separator_key() {
        let sep = item("s1", MenuItemKind::Separator);
        assert_eq!(KeyMapper::derive_key(&sep), "sep--s1");
    }
}
