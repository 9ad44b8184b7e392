// ============================================================================
// Menu Core - Menu Item Store
// File: crates/menu-core/src/services/menu_store.rs
// Description: Persistence boundary for the menu, settings and route flag
// ============================================================================
//! Single source of truth for the ordered item list and the white-label
//! settings. Every write path runs through the validator and replaces the
//! list wholesale in one atomic store write.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{error, info, warn};
use uuid::Uuid;

use menu_shared::constants::{PLUGIN_ID, PLUGIN_VERSION};

use super::validator::{PartialMenuItem, Validator};
use crate::domain::{default_items, MenuItem, RoleInfo, WhiteLabelSettings};
use crate::error::DomainError;
use crate::repositories::OptionStore;

/// Fully qualified option keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionKeys {
    pub items: String,
    pub white_label: String,
    pub flush_routes: String,
}

impl OptionKeys {
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            items: format!("{}items", prefix),
            white_label: format!("{}white_label", prefix),
            flush_routes: format!("{}flush_routes", prefix),
        }
    }
}

/// Validated shape of an import request.
#[derive(Debug, Clone)]
pub struct ImportPayload {
    pub items: Vec<PartialMenuItem>,
    pub settings: Option<Map<String, Value>>,
}

impl ImportPayload {
    /// The payload must be an object holding an `items` array of objects.
    /// A `settings` value that is not an object is ignored.
    pub fn from_value(value: Value) -> Result<Self, DomainError> {
        let Value::Object(mut root) = value else {
            return Err(DomainError::MalformedPayload("import payload must be an object".into()));
        };
        let items = root
            .remove("items")
            .ok_or_else(|| DomainError::MalformedPayload("import payload has no items".into()))?;

        Ok(Self {
            items: PartialMenuItem::list_from_value(items)?,
            settings: match root.remove("settings") {
                Some(Value::Object(settings)) => Some(settings),
                _ => None,
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportResult {
    pub items: Vec<MenuItem>,
    pub settings: WhiteLabelSettings,
}

/// Export file contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportPayload {
    pub plugin: String,
    pub version: String,
    pub exported: DateTime<Utc>,
    pub items: Vec<MenuItem>,
    pub settings: WhiteLabelSettings,
}

/// Data the builder UI is initialised with.
#[derive(Debug, Clone, Serialize)]
pub struct BuilderBootstrap {
    pub items: Vec<MenuItem>,
    pub settings: WhiteLabelSettings,
    pub roles: Vec<RoleInfo>,
    pub default_items: Vec<MenuItem>,
}

pub struct MenuItemStore {
    store: Arc<dyn OptionStore>,
    validator: Arc<Validator>,
    keys: OptionKeys,
}

impl MenuItemStore {
    pub fn new(store: Arc<dyn OptionStore>, validator: Arc<Validator>, key_prefix: &str) -> Self {
        Self {
            store,
            validator,
            keys: OptionKeys::with_prefix(key_prefix),
        }
    }

    pub fn keys(&self) -> &OptionKeys {
        &self.keys
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// The stored list, or the default seed when nothing was saved yet.
    /// Defaults are not written back.
    pub async fn load(&self) -> Result<Vec<MenuItem>, DomainError> {
        let Some(raw) = self.store.get(&self.keys.items).await? else {
            return Ok(default_items());
        };

        let entries = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(entries)) => entries,
            Ok(_) | Err(_) => {
                warn!("Stored menu items are not a list, serving defaults");
                return Ok(default_items());
            }
        };

        let mut items = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<MenuItem>(entry) {
                Ok(item) => items.push(item),
                Err(e) => warn!("Skipping unreadable stored menu item #{}: {}", index, e),
            }
        }
        Ok(items)
    }

    pub async fn load_settings(&self) -> Result<WhiteLabelSettings, DomainError> {
        let Some(raw) = self.store.get(&self.keys.white_label).await? else {
            return Ok(WhiteLabelSettings::default());
        };

        Ok(serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Stored white-label settings unreadable, using defaults: {}", e);
            WhiteLabelSettings::default()
        }))
    }

    /// save-menu: sanitize and replace the whole list.
    pub async fn save(&self, raw: &[PartialMenuItem]) -> Result<Vec<MenuItem>, DomainError> {
        let items = self.validator.sanitize_all(raw);
        self.replace(&items, None).await?;
        info!("Menu saved: {} items", items.len());
        Ok(items)
    }

    /// Replace the list with the default seed.
    pub async fn reset(&self) -> Result<Vec<MenuItem>, DomainError> {
        let seed: Vec<PartialMenuItem> = default_items().iter().map(PartialMenuItem::from).collect();
        let items = self.validator.sanitize_all(&seed);
        self.replace(&items, None).await?;
        info!("Menu reset to {} default items", items.len());
        Ok(items)
    }

    /// import-menu: items and optional settings land in the same write.
    pub async fn import(&self, payload: ImportPayload) -> Result<ImportResult, DomainError> {
        let items = self.validator.sanitize_all(&payload.items);
        let settings = payload
            .settings
            .as_ref()
            .map(|raw| self.validator.sanitize_settings(raw));

        self.replace(&items, settings.as_ref()).await?;
        info!(
            "Menu imported: {} items, settings {}",
            items.len(),
            if settings.is_some() { "replaced" } else { "kept" }
        );

        let settings = match settings {
            Some(settings) => settings,
            None => self.load_settings().await?,
        };
        Ok(ImportResult { items, settings })
    }

    /// export-menu. Read only.
    pub async fn export(&self) -> Result<ExportPayload, DomainError> {
        Ok(ExportPayload {
            plugin: PLUGIN_ID.to_string(),
            version: PLUGIN_VERSION.to_string(),
            exported: Utc::now(),
            items: self.load().await?,
            settings: self.load_settings().await?,
        })
    }

    /// save-settings.
    pub async fn save_settings(&self, raw: &Map<String, Value>) -> Result<WhiteLabelSettings, DomainError> {
        let settings = self.validator.sanitize_settings(raw);
        let entry = (self.keys.white_label.clone(), to_json(&settings)?);
        self.store.put_many(vec![entry]).await.map_err(|e| {
            error!("Failed to store white-label settings: {}", e);
            e
        })?;
        info!("White-label settings saved");
        Ok(settings)
    }

    pub async fn builder_bootstrap(&self) -> Result<BuilderBootstrap, DomainError> {
        Ok(BuilderBootstrap {
            items: self.load().await?,
            settings: self.load_settings().await?,
            roles: self.validator.roles().to_list(),
            default_items: default_items(),
        })
    }

    /// Request a route-cache rebuild on every instance.
    pub async fn mark_routes_dirty(&self) -> Result<(), DomainError> {
        self.store.put_many(vec![route_generation_entry(&self.keys)]).await
    }

    /// Token of the latest route-affecting change, `None` before the first.
    /// It is never cleared; each instance remembers the last token it
    /// compiled.
    pub async fn routes_generation(&self) -> Result<Option<String>, DomainError> {
        self.store.get(&self.keys.flush_routes).await
    }

    async fn replace(
        &self,
        items: &[MenuItem],
        settings: Option<&WhiteLabelSettings>,
    ) -> Result<(), DomainError> {
        let mut entries = vec![(self.keys.items.clone(), to_json(&items)?)];
        if let Some(settings) = settings {
            entries.push((self.keys.white_label.clone(), to_json(settings)?));
        }
        entries.push(route_generation_entry(&self.keys));

        self.store.put_many(entries).await.map_err(|e| {
            error!("Failed to store menu items: {}", e);
            e
        })
    }
}

fn route_generation_entry(keys: &OptionKeys) -> (String, String) {
    (keys.flush_routes.clone(), Uuid::new_v4().to_string())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, DomainError> {
    serde_json::to_string(value).map_err(|e| DomainError::SerializationError(e.to_string()))
}
