//! # Menu API
//!
//! HTTP surface of the account menu builder: admin actions, the per-viewer
//! navigation feed and custom endpoint pages.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use response::ApiResponse;
pub use router::build_router;
pub use state::AppState;
