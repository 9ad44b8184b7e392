//! Per-customer aggregate counters provided by the store platform

use async_trait::async_trait;

use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerStats: Send + Sync {
    async fn order_count(&self, customer_id: &str) -> Result<u64, DomainError>;
    async fn download_count(&self, customer_id: &str) -> Result<u64, DomainError>;
}
