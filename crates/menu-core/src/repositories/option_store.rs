//! Option store trait (port)
//!
//! A flat key-value store holding serialized option records. Keys arrive
//! already prefixed.

use async_trait::async_trait;

use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OptionStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Writes every pair or none of them.
    async fn put_many(&self, entries: Vec<(String, String)>) -> Result<(), DomainError>;
}
