//! Persistent message collection on top of the storage port

use std::sync::Arc;
use tracing::{debug, warn};

use super::models::Message;
use crate::error::{AppError, Result};
use crate::storage::KeyValueStorage;

#[derive(Clone)]
pub struct MessageStore {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
}

impl MessageStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Saved collection, or empty when nothing usable is stored. Never fails.
    pub fn load(&self) -> Vec<Message> {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read '{}' from storage, using empty collection: {}", self.key, e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Message>>(&raw) {
            Ok(messages) => {
                debug!("Loaded {} messages from '{}'", messages.len(), self.key);
                messages
            }
            Err(e) => {
                warn!("Stored value under '{}' is not a message list, using empty collection: {}", self.key, e);
                Vec::new()
            }
        }
    }

    /// Replaces the stored collection with `messages`.
    pub fn save(&self, messages: &[Message]) -> Result<()> {
        let serialized = serde_json::to_string(messages)?;
        self.storage
            .set(&self.key, &serialized)
            .map_err(|e| AppError::Storage(format!("Failed to save messages: {}", e)))?;
        debug!("Saved {} messages to '{}'", messages.len(), self.key);
        Ok(())
    }
}
