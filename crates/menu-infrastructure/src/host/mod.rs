//! Store-platform adapters

pub mod route_table;
pub mod stats_client;

pub use route_table::RouteTable;
pub use stats_client::{HttpCustomerStats, NoCustomerStats};
