//! In-process route table
//!
//! Mirrors a platform router with a compiled route cache: registrations only
//! become live when the cache is flushed.

use std::collections::BTreeSet;

use parking_lot::RwLock;
use tracing::debug;

use menu_core::error::DomainError;
use menu_core::repositories::HostRouter;

#[derive(Default)]
struct Routes {
    declared: BTreeSet<String>,
    live: BTreeSet<String>,
    flushes: u64,
}

#[derive(Default)]
pub struct RouteTable {
    routes: RwLock<Routes>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_routes(&self) -> BTreeSet<String> {
        self.routes.read().live.clone()
    }

    pub fn flush_count(&self) -> u64 {
        self.routes.read().flushes
    }
}

impl HostRouter for RouteTable {
    fn register_routes(&self, slugs: &BTreeSet<String>) -> Result<(), DomainError> {
        self.routes.write().declared = slugs.clone();
        Ok(())
    }

    /// Compiles the routes declared by the latest cycle.
    fn flush_route_cache(&self) -> Result<(), DomainError> {
        let mut routes = self.routes.write();
        routes.live = routes.declared.clone();
        routes.flushes += 1;
        debug!("Route cache rebuilt with {} routes", routes.live.len());
        Ok(())
    }

    /// Only routes compiled by the last flush resolve.
    fn is_routable(&self, slug: &str) -> bool {
        self.routes.read().live.contains(slug)
    }
}
