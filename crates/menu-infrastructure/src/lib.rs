//! # Menu Infrastructure
//!
//! Option store backends and the store-platform adapters (customer
//! statistics, route table).

pub mod host;
pub mod store;

pub use host::{HttpCustomerStats, NoCustomerStats, RouteTable};
pub use store::{MemoryOptionStore, RedisOptionStore};
