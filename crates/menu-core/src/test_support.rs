//! In-memory collaborators shared by the service tests

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::DomainError;
use crate::repositories::OptionStore;

#[derive(Default)]
pub struct InMemoryOptions {
    values: RwLock<HashMap<String, String>>,
}

impl InMemoryOptions {
    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    pub fn set_raw(&self, key: &str, value: &str) {
        self.values.write().insert(key.to_string(), value.to_string());
    }
}

#[async_trait]
impl OptionStore for InMemoryOptions {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.raw(key))
    }

    async fn put_many(&self, entries: Vec<(String, String)>) -> Result<(), DomainError> {
        self.values.write().extend(entries);
        Ok(())
    }
}
