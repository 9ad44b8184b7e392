//! Process-local option store

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use menu_core::error::DomainError;
use menu_core::repositories::OptionStore;

/// Options kept in memory. Lost on restart; suited to a single instance and
/// to tests.
#[derive(Default)]
pub struct MemoryOptionStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryOptionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OptionStore for MemoryOptionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.values.read().get(key).cloned())
    }

    async fn put_many(&self, entries: Vec<(String, String)>) -> Result<(), DomainError> {
        self.values.write().extend(entries);
        Ok(())
    }
}
