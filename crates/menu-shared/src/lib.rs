//! # Menu Shared
//!
//! Configuration, telemetry, constants and the startup error type shared by
//! every crate of the account menu builder.

pub mod config;
pub mod constants;
pub mod error;
pub mod telemetry;

pub use config::AppConfig;
pub use error::AppError;
