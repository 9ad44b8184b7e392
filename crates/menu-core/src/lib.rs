//! # Menu Core
//!
//! Menu-item model, sanitization, and the translation layer that projects a
//! stored menu into the store platform's navigation, routing and badge hooks.

pub mod domain;
pub mod error;
pub mod repositories;
pub mod sanitize;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
