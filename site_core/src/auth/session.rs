use std::sync::Arc;
use tracing::warn;

use crate::error::Result;
use crate::storage::KeyValueStorage;

const AUTHENTICATED_VALUE: &str = "true";

/// Admin flag held in session-scoped storage. Never cleared by the app.
#[derive(Clone)]
pub struct SessionAuth {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
}

impl SessionAuth {
    pub fn new(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        match self.storage.get(&self.key) {
            Ok(value) => value.as_deref() == Some(AUTHENTICATED_VALUE),
            Err(e) => {
                warn!("Failed to read session flag '{}': {}", self.key, e);
                false
            }
        }
    }

    pub fn mark_authenticated(&self) -> Result<()> {
        self.storage.set(&self.key, AUTHENTICATED_VALUE)
    }
}
