//! # Menu Core - Domain Module
//!
//! Domain entities for the account menu builder.

pub mod menu_item;
pub mod reserved;
pub mod role_table;
pub mod viewer;
pub mod white_label;

// Re-export all entities and enums
pub use menu_item::{
    default_items, BadgeCountSource, ItemType, LinkTarget, MenuItem, MenuItemKind, StoredMenuItem,
};
pub use reserved::{is_reserved_slug, RESERVED_SLUGS};
pub use role_table::{RoleInfo, RoleTable};
pub use viewer::Viewer;
pub use white_label::WhiteLabelSettings;
