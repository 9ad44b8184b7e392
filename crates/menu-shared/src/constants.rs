//! Application-wide constants

/// Identifier written into every export payload.
pub const PLUGIN_ID: &str = "my-account-menu-builder";
pub const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Capability a caller must hold to change the menu or its settings.
pub const CAPABILITY_MANAGE_MENUS: &str = "manage_menus";

pub const NONCE_HEADER: &str = "x-menu-nonce";
pub const DEFAULT_NONCE_LIFETIME_SECS: i64 = 86_400;

pub const DEFAULT_KEY_PREFIX: &str = "menu_";
pub const DEFAULT_ROUTE_TICK_SECS: u64 = 30;
pub const DEFAULT_STATS_TIMEOUT_MS: u64 = 2_000;
