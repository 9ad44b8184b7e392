//! Domain services

pub mod badge_resolver;
pub mod endpoint_registrar;
pub mod key_mapper;
pub mod menu_store;
pub mod navigation;
pub mod validator;

pub use badge_resolver::{Badge, BadgeKind, BadgeResolver};
pub use endpoint_registrar::{EndpointRegistrar, InitReport};
pub use key_mapper::{KeyMapper, LINK_KEY_PREFIX, SEPARATOR_KEY_PREFIX};
pub use menu_store::{
    BuilderBootstrap, ExportPayload, ImportPayload, ImportResult, MenuItemStore, OptionKeys,
};
pub use navigation::{
    Destination, FrontendItem, NavEntry, Navigation, NavigationProjector, DEFAULT_TITLE,
};
pub use validator::{PartialMenuItem, Validator};
