//! White-label settings entity

use serde::{Deserialize, Serialize};

pub const DEFAULT_PLUGIN_NAME: &str = "My Account Menu Builder";
pub const DEFAULT_MENU_TITLE: &str = "My Account Menu";

/// Branding overrides for the admin surface. Unrelated to menu items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhiteLabelSettings {
    pub enabled: bool,
    pub plugin_name: String,
    pub author_name: String,
    pub author_url: String,
    pub menu_title: String,
    pub hide_plugin: bool,
}

impl Default for WhiteLabelSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            plugin_name: DEFAULT_PLUGIN_NAME.to_string(),
            author_name: String::new(),
            author_url: String::new(),
            menu_title: DEFAULT_MENU_TITLE.to_string(),
            hide_plugin: false,
        }
    }
}

impl WhiteLabelSettings {
    /// Label of the settings tab in the store admin.
    pub fn settings_tab_label(&self) -> &str {
        if self.enabled && !self.menu_title.is_empty() {
            &self.menu_title
        } else {
            DEFAULT_MENU_TITLE
        }
    }

    /// Whether the plugin should be hidden from the platform's plugin list.
    pub fn hides_plugin(&self) -> bool {
        self.enabled && self.hide_plugin
    }
}
