//! Repository and collaborator traits (ports)

pub mod customer_stats;
pub mod host_router;
pub mod option_store;

pub use customer_stats::CustomerStats;
pub use host_router::HostRouter;
pub use option_store::OptionStore;

#[cfg(test)]
pub use customer_stats::MockCustomerStats;
#[cfg(test)]
pub use host_router::MockHostRouter;
#[cfg(test)]
pub use option_store::MockOptionStore;
