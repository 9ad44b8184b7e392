//! Customer statistics from the store platform's HTTP API

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use menu_core::error::DomainError;
use menu_core::repositories::CustomerStats;

#[derive(Debug, Deserialize)]
struct CountResponse {
    count: u64,
}

#[derive(Clone)]
pub struct HttpCustomerStats {
    client: Client,
    base_url: String,
}

impl HttpCustomerStats {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build customer stats HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `GET {base}/customers/{id}/{resource}/count` answering `{"count": n}`.
    async fn fetch_count(&self, customer_id: &str, resource: &str) -> Result<u64> {
        let url = format!("{}/customers/{}/{}/count", self.base_url, customer_id, resource);
        debug!("Fetching {} count for customer {}", resource, customer_id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to connect to customer stats API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Customer stats API error ({}): {}", status, body);
        }

        let parsed: CountResponse = response
            .json()
            .await
            .context("Failed to parse customer stats response")?;
        Ok(parsed.count)
    }
}

#[async_trait]
impl CustomerStats for HttpCustomerStats {
    async fn order_count(&self, customer_id: &str) -> Result<u64, DomainError> {
        self.fetch_count(customer_id, "orders")
            .await
            .map_err(|e| DomainError::CollaboratorError(format!("{:#}", e)))
    }

    async fn download_count(&self, customer_id: &str) -> Result<u64, DomainError> {
        self.fetch_count(customer_id, "downloads")
            .await
            .map_err(|e| DomainError::CollaboratorError(format!("{:#}", e)))
    }
}

/// Used when no statistics API is configured. Every count is zero, so only
/// static badges show.
pub struct NoCustomerStats;

#[async_trait]
impl CustomerStats for NoCustomerStats {
    async fn order_count(&self, _customer_id: &str) -> Result<u64, DomainError> {
        Ok(0)
    }

    async fn download_count(&self, _customer_id: &str) -> Result<u64, DomainError> {
        Ok(0)
    }
}
