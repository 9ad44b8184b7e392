//! Route registration hooks of the store platform

use std::collections::BTreeSet;

use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
pub trait HostRouter: Send + Sync {
    /// Declare this cycle's routable account sub-paths. Replaces whatever an
    /// earlier cycle declared.
    fn register_routes(&self, slugs: &BTreeSet<String>) -> Result<(), DomainError>;

    /// Rebuild the platform's cached route table from the declared routes.
    fn flush_route_cache(&self) -> Result<(), DomainError>;

    /// Whether requests to `slug` currently resolve.
    fn is_routable(&self, slug: &str) -> bool;
}
