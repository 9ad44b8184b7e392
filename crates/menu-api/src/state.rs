use std::sync::Arc;

use menu_core::repositories::HostRouter;
use menu_core::services::{BadgeResolver, EndpointRegistrar, MenuItemStore};

use crate::auth::Authenticator;

/// Services wired once at startup and shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MenuItemStore>,
    pub registrar: Arc<EndpointRegistrar>,
    pub badges: Arc<BadgeResolver>,
    pub router: Arc<dyn HostRouter>,
    pub auth: Arc<Authenticator>,
}
