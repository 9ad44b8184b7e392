// ============================================================================
// Menu Core - Validator
// File: crates/menu-core/src/services/validator.rs
// Description: Fail-soft normalisation of raw menu items and settings
// ============================================================================
//! Every field is corrected independently or replaced by its default, so a
//! partially broken submission still yields a usable item. Sanitizing an
//! already sanitized item returns it unchanged.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{
    BadgeCountSource, ItemType, LinkTarget, MenuItem, MenuItemKind, RoleTable, WhiteLabelSettings,
};
use crate::error::DomainError;
use crate::sanitize::{sanitize_key, sanitize_slug, sanitize_url, Sanitizer};

/// Raw item as submitted by the builder UI or an import file. Any field may
/// be missing or carry the wrong JSON type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartialMenuItem(Map<String, Value>);

impl PartialMenuItem {
    /// Accepts only JSON objects.
    pub fn from_value(value: Value) -> Result<Self, DomainError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(DomainError::MalformedPayload(format!(
                "menu item must be an object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Accepts only a JSON array whose entries are all objects.
    pub fn list_from_value(value: Value) -> Result<Vec<Self>, DomainError> {
        match value {
            Value::Array(entries) => entries.into_iter().map(Self::from_value).collect(),
            other => Err(DomainError::MalformedPayload(format!(
                "items must be an array, got {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn set(&mut self, field: &str, value: Value) {
        self.0.insert(field.to_string(), value);
    }

    /// `null` counts as absent.
    fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name).filter(|v| !v.is_null())
    }
}

impl From<&MenuItem> for PartialMenuItem {
    fn from(item: &MenuItem) -> Self {
        match serde_json::to_value(item) {
            Ok(Value::Object(map)) => Self(map),
            _ => Self::default(),
        }
    }
}

/// Normalises raw records against the deployment's role table.
#[derive(Debug, Clone)]
pub struct Validator {
    sanitizer: Sanitizer,
    roles: RoleTable,
}

impl Validator {
    pub fn new(roles: RoleTable) -> Result<Self, DomainError> {
        Ok(Self {
            sanitizer: Sanitizer::new()?,
            roles,
        })
    }

    pub fn sanitizer(&self) -> &Sanitizer {
        &self.sanitizer
    }

    pub fn roles(&self) -> &RoleTable {
        &self.roles
    }

    /// Sanitize one item. Never fails.
    pub fn sanitize(&self, raw: &PartialMenuItem) -> MenuItem {
        let id = match raw.field("id").map(coerce_text).map(|id| sanitize_key(&id)) {
            Some(id) if !id.is_empty() => id,
            _ => Uuid::new_v4().to_string(),
        };

        let requested_type = raw.field("type").map(coerce_text).unwrap_or_default();
        let item_type = ItemType::from_str(&requested_type).unwrap_or_else(|| {
            if !requested_type.is_empty() {
                debug!("Item {}: unknown type {:?}, using endpoint", id, requested_type);
            }
            ItemType::Endpoint
        });

        let kind = match item_type {
            ItemType::Endpoint => MenuItemKind::Endpoint {
                slug: sanitize_slug(&self.text_field(raw, "endpoint")),
                content: self.sanitizer.markup(&raw_text(raw, "content")),
            },
            ItemType::Link => {
                let requested = raw_text(raw, "url");
                let url = sanitize_url(&requested);
                if url.is_empty() && !requested.trim().is_empty() {
                    debug!("Item {}: dropped unsafe url", id);
                }
                MenuItemKind::Link { url }
            }
            ItemType::Separator => MenuItemKind::Separator,
        };

        MenuItem {
            title: self.text_field(raw, "title"),
            kind,
            icon: self.text_field(raw, "icon"),
            roles: self.known_roles(&id, raw.field("roles")),
            target: LinkTarget::from_str(&raw_text(raw, "target")).unwrap_or_default(),
            enabled: raw.field("enabled").map_or(true, coerce_bool),
            is_default: raw.field("is_default").map_or(false, coerce_bool),
            css_class: self.text_field(raw, "css_class"),
            badge_text: self.text_field(raw, "badge"),
            badge_count: BadgeCountSource::parse(&raw_text(raw, "badge_count")),
            description: self.text_field(raw, "description"),
            id,
        }
    }

    /// Sanitize a whole list. A repeated id gets a fresh one so ids stay
    /// unique within the list.
    pub fn sanitize_all(&self, raw: &[PartialMenuItem]) -> Vec<MenuItem> {
        let mut seen = HashSet::new();
        raw.iter()
            .map(|entry| {
                let mut item = self.sanitize(entry);
                if !seen.insert(item.id.clone()) {
                    let fresh = Uuid::new_v4().to_string();
                    debug!("Duplicate item id {}, reassigned to {}", item.id, fresh);
                    item.id = fresh.clone();
                    seen.insert(fresh);
                }
                item
            })
            .collect()
    }

    /// Sanitize white-label settings. Missing fields take their defaults.
    pub fn sanitize_settings(&self, raw: &Map<String, Value>) -> WhiteLabelSettings {
        let defaults = WhiteLabelSettings::default();
        let get = |name: &str| raw.get(name).filter(|v| !v.is_null());
        let text = |name: &str, fallback: String| {
            get(name).map_or(fallback, |v| self.sanitizer.text(&coerce_text(v)))
        };

        WhiteLabelSettings {
            enabled: get("enabled").map_or(defaults.enabled, coerce_bool),
            plugin_name: text("plugin_name", defaults.plugin_name),
            author_name: text("author_name", defaults.author_name),
            author_url: get("author_url").map_or(defaults.author_url, |v| sanitize_url(&coerce_text(v))),
            menu_title: text("menu_title", defaults.menu_title),
            hide_plugin: get("hide_plugin").map_or(defaults.hide_plugin, coerce_bool),
        }
    }

    fn text_field(&self, raw: &PartialMenuItem, name: &str) -> String {
        self.sanitizer.text(&raw_text(raw, name))
    }

    fn known_roles(&self, id: &str, raw: Option<&Value>) -> BTreeSet<String> {
        let requested: Vec<String> = match raw {
            Some(Value::Array(values)) => values.iter().map(coerce_text).collect(),
            Some(Value::Object(_)) | None => Vec::new(),
            Some(single) => vec![coerce_text(single)],
        };

        let mut roles = BTreeSet::new();
        for role in requested.iter().map(|r| sanitize_key(r)) {
            if self.roles.contains(&role) {
                roles.insert(role);
            } else if !role.is_empty() {
                debug!("Item {}: dropped unknown role {:?}", id, role);
            }
        }
        roles
    }
}

fn raw_text(raw: &PartialMenuItem, name: &str) -> String {
    raw.field(name).map(coerce_text).unwrap_or_default()
}

/// Scalars become their text form; containers become empty.
fn coerce_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !matches!(s.trim(), "" | "0" | "false"),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Null => false,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validator() -> Validator {
        Validator::new(RoleTable::new([
            ("customer", "Customer"),
            ("shop_manager", "Shop manager"),
        ]))
        .unwrap()
    }

    fn partial(value: Value) -> PartialMenuItem {
        PartialMenuItem::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_record_takes_every_default() {
        let item = validator().sanitize(&partial(json!({})));

        assert!(Uuid::parse_str(&item.id).is_ok());
        assert_eq!(item.title, "");
        assert_eq!(item.item_type(), ItemType::Endpoint);
        assert_eq!(item.slug(), "");
        assert_eq!(item.content(), "");
        assert!(item.roles.is_empty());
        assert_eq!(item.target, LinkTarget::SameContext);
        assert!(item.enabled);
        assert!(!item.is_default);
        assert_eq!(item.badge_count, BadgeCountSource::None);
    }

    #[test]
    fn test_fields_are_normalised() {
        let item = validator().sanitize(&partial(json!({
            "id": "My Item!",
            "title": "  <b>Gift</b>   Cards ",
            "type": "endpoint",
            "endpoint": "Gift_Cards.Page",
            "content": "<p onclick=\"x()\">Hi [gift_cards]</p><script>bad()</script>",
            "icon": "dashicons dashicons-tickets",
            "roles": ["Customer", "ghost"],
            "target": "_blank",
            "badge_count": "orders",
        })));

        assert_eq!(item.id, "myitem");
        assert_eq!(item.title, "Gift Cards");
        assert_eq!(item.slug(), "gift-cards-page");
        assert_eq!(item.content(), "<p>Hi [gift_cards]</p>");
        assert_eq!(item.roles, BTreeSet::from(["customer".to_string()]));
        assert_eq!(item.target, LinkTarget::NewContext);
        assert_eq!(item.badge_count, BadgeCountSource::OrdersCount);
    }

    #[test]
    fn test_unknown_enums_fall_back() {
        let item = validator().sanitize(&partial(json!({
            "type": "widget",
            "target": "_parent",
            "badge_count": "reviews",
        })));
        assert_eq!(item.item_type(), ItemType::Endpoint);
        assert_eq!(item.target, LinkTarget::SameContext);
        assert_eq!(item.badge_count, BadgeCountSource::None);
    }

    #[test]
    fn test_link_with_unsafe_url_keeps_empty_url() {
        let item = validator().sanitize(&partial(json!({
            "id": "x", "type": "link", "url": "javascript:alert(1)", "endpoint": "ignored"
        })));
        assert_eq!(item.kind, MenuItemKind::Link { url: String::new() });
    }

    #[test]
    fn test_fields_of_other_variants_are_dropped() {
        let item = validator().sanitize(&partial(json!({
            "id": "sep", "type": "separator", "url": "https://example.com", "content": "<p>x</p>"
        })));
        assert_eq!(item.kind, MenuItemKind::Separator);
        let stored = serde_json::to_value(&item).unwrap();
        assert_eq!(stored["url"], "");
        assert_eq!(stored["content"], "");
    }

    #[test]
    fn test_bool_coercion() {
        let v = validator();
        let enabled = |value: Value| v.sanitize(&partial(json!({ "enabled": value }))).enabled;

        assert!(enabled(json!(true)));
        assert!(enabled(json!(1)));
        assert!(enabled(json!("yes")));
        assert!(enabled(Value::Null));
        assert!(!enabled(json!(false)));
        assert!(!enabled(json!(0)));
        assert!(!enabled(json!("0")));
        assert!(!enabled(json!("false")));
        assert!(!enabled(json!("")));
        assert!(!enabled(json!([])));
    }

    #[test]
    fn test_single_role_string_is_accepted() {
        let item = validator().sanitize(&partial(json!({ "roles": "shop_manager" })));
        assert_eq!(item.roles, BTreeSet::from(["shop_manager".to_string()]));
    }

    #[test]
    fn test_scalar_titles_are_stringified() {
        let item = validator().sanitize(&partial(json!({ "title": 42, "icon": ["x"] })));
        assert_eq!(item.title, "42");
        assert_eq!(item.icon, "");
    }

    #[test]
    fn test_non_object_entries_are_rejected() {
        assert!(matches!(
            PartialMenuItem::list_from_value(json!([{}, "oops"])),
            Err(DomainError::MalformedPayload(_))
        ));
        assert!(matches!(
            PartialMenuItem::list_from_value(json!({"items": []})),
            Err(DomainError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_duplicate_ids_are_reassigned() {
        let items = validator().sanitize_all(&[
            partial(json!({"id": "a", "title": "First"})),
            partial(json!({"id": "a", "title": "Second"})),
        ]);
        assert_eq!(items[0].id, "a");
        assert_ne!(items[1].id, "a");
        assert_eq!(items[1].title, "Second");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let v = validator();
        let samples = [
            json!({}),
            json!({"id": "--Weird  ID--", "title": "<i>x</i>\n\ty", "type": "link",
                   "url": "example.com/a b", "roles": ["CUSTOMER", 3, null]}),
            json!({"type": "endpoint", "endpoint": "..Wish List..", "title": "A < B",
                   "content": "<scr<script></script>ipt>x</script><a href='javascript:x'>y</a>"}),
            json!({"type": "separator", "enabled": "0", "is_default": 1, "css_class": "sep <b>x</b>",
                   "badge": "New!", "badge_count": "downloads"}),
            json!({"id": "Ünïcode", "description": "\u{0000}tab\u{0009}", "target": "_blank"}),
        ];

        for raw in samples {
            let once = v.sanitize(&partial(raw.clone()));
            let twice = v.sanitize(&PartialMenuItem::from(&once));
            assert_eq!(twice, once, "input: {}", raw);
        }
    }

    #[test]
    fn test_settings_sanitized_and_merged() {
        let raw = json!({
            "enabled": "1",
            "plugin_name": "<b>Acme</b> Menus",
            "author_url": "javascript:alert(1)",
            "hide_plugin": true,
        });
        let settings = validator().sanitize_settings(raw.as_object().unwrap());

        assert!(settings.enabled);
        assert_eq!(settings.plugin_name, "Acme Menus");
        assert_eq!(settings.author_url, "");
        assert_eq!(settings.menu_title, WhiteLabelSettings::default().menu_title);
        assert!(settings.hides_plugin());
    }
}
