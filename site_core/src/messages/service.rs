use chrono::{DateTime, Local};
use tracing::{debug, info};

use super::models::{Message, MessageStatus, DATE_FORMAT};
use super::store::MessageStore;
use crate::error::{AppError, Result};
use crate::validation::ContactSubmission;

pub type Clock = fn() -> DateTime<Local>;

/// In-memory message collection, newest first, persisted after every mutation.
#[derive(Clone)]
pub struct MessageService {
    store: MessageStore,
    messages: Vec<Message>,
    last_id: i64,
    clock: Clock,
}

impl MessageService {
    pub fn new(store: MessageStore) -> Self {
        Self::with_clock(store, Local::now)
    }

    pub fn with_clock(store: MessageStore, clock: Clock) -> Self {
        let messages = store.load();
        let last_id = messages
            .iter()
            .filter_map(|m| m.id.parse::<i64>().ok())
            .max()
            .unwrap_or(0);

        info!("Message service ready with {} stored messages", messages.len());

        Self {
            store,
            messages,
            last_id,
            clock,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn get(&self, id: &str) -> Result<&Message> {
        self.messages
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Message with id {} not found", id)))
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn unread_count(&self) -> usize {
        self.messages.iter().filter(|m| m.status == MessageStatus::New).count()
    }

    /// Validates, prepends a fresh `new` message and persists the collection.
    pub fn add(&mut self, submission: ContactSubmission) -> Result<Message> {
        let validation = submission.check();
        if !validation.is_valid {
            debug!("Rejected contact submission: {}", validation);
            return Err(AppError::Validation(validation));
        }

        let now = (self.clock)();
        let id = self.next_id(now.timestamp_millis());
        let message = Message::from_submission(id, now.format(DATE_FORMAT).to_string(), submission);

        self.messages.insert(0, message.clone());
        self.store.save(&self.messages)?;

        info!("Stored contact message {} from {}", message.id, message.email);
        Ok(message)
    }

    /// Removes the message if present. Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let before = self.messages.len();
        self.messages.retain(|m| m.id != id);
        let removed = self.messages.len() != before;

        self.store.save(&self.messages)?;

        if removed {
            info!("Deleted message {}", id);
        }
        Ok(removed)
    }

    /// Moves a `new` message to `read`. Returns whether the status changed.
    pub fn mark_read(&mut self, id: &str) -> Result<bool> {
        let changed = self
            .messages
            .iter_mut()
            .find(|m| m.id == id)
            .map(Message::mark_read)
            .unwrap_or(false);

        self.store.save(&self.messages)?;

        if changed {
            debug!("Marked message {} as read", id);
        }
        Ok(changed)
    }

    pub fn clear_all(&mut self) -> Result<usize> {
        let count = self.messages.len();
        self.messages.clear();
        self.store.save(&self.messages)?;
        info!("Cleared {} messages", count);
        Ok(count)
    }

    /// Millisecond timestamp, bumped past every id already issued.
    fn next_id(&mut self, timestamp_ms: i64) -> String {
        let mut candidate = timestamp_ms.max(self.last_id + 1);
        while self.messages.iter().any(|m| m.id == candidate.to_string()) {
            candidate += 1;
        }
        self.last_id = candidate;
        candidate.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KeyValueStorage, MemoryStorage};
    use chrono::TimeZone;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn fixed_clock() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()
    }

    fn service_with(storage: &MemoryStorage) -> MessageService {
        MessageService::with_clock(
            MessageStore::new(Arc::new(storage.clone()), "contact_messages"),
            fixed_clock,
        )
    }

    fn submission(name: &str) -> ContactSubmission {
        ContactSubmission::new(name, "0612345678", "a@b.com", "X", "hello")
    }

    #[test]
    fn test_add_prepends_and_persists() {
        let storage = MemoryStorage::new();
        let mut service = service_with(&storage);

        let first = service.add(submission("Ali")).unwrap();
        let second = service.add(submission("Sara")).unwrap();

        assert_eq!(service.messages()[0].id, second.id);
        assert_eq!(service.messages()[1].id, first.id);
        assert_eq!(first.status, MessageStatus::New);
        assert_eq!(first.date, "14/03/2025 09:26:53");

        let persisted = MessageStore::new(Arc::new(storage), "contact_messages").load();
        assert_eq!(persisted, service.messages());
    }

    #[test]
    fn test_ids_unique_under_frozen_clock() {
        let storage = MemoryStorage::new();
        let mut service = service_with(&storage);

        for i in 0..50 {
            service.add(submission(&format!("client {}", i))).unwrap();
        }

        let ids: HashSet<&str> = service.messages().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_ids_continue_after_reload() {
        let storage = MemoryStorage::new();
        let mut service = service_with(&storage);
        let first = service.add(submission("Ali")).unwrap();

        let mut reopened = service_with(&storage);
        let second = reopened.add(submission("Sara")).unwrap();
        assert_ne!(first.id, second.id);
        assert!(second.id.parse::<i64>().unwrap() > first.id.parse::<i64>().unwrap());
    }

    #[test]
    fn test_invalid_submission_leaves_state_untouched() {
        let storage = MemoryStorage::new();
        let mut service = service_with(&storage);

        let err = service
            .add(ContactSubmission::new("Ali", "061234567", "a@b.com", "X", "hello"))
            .unwrap_err();

        let validation = err.validation_result().expect("validation error");
        assert!(validation.has_error("phone"));
        assert!(service.is_empty());
        assert!(storage.get("contact_messages").unwrap().is_none());
    }

    #[test]
    fn test_delete_keeps_others_in_order() {
        let storage = MemoryStorage::new();
        let mut service = service_with(&storage);
        let a = service.add(submission("a")).unwrap();
        let b = service.add(submission("b")).unwrap();
        let c = service.add(submission("c")).unwrap();

        assert!(service.delete(&b.id).unwrap());
        let ids: Vec<&str> = service.messages().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec![c.id.as_str(), a.id.as_str()]);

        assert!(!service.delete("does-not-exist").unwrap());
        assert_eq!(service.len(), 2);
    }

    #[test]
    fn test_mark_read_idempotent_and_unread_count() {
        let storage = MemoryStorage::new();
        let mut service = service_with(&storage);
        let a = service.add(submission("a")).unwrap();
        service.add(submission("b")).unwrap();
        assert_eq!(service.unread_count(), 2);

        assert!(service.mark_read(&a.id).unwrap());
        let after_first = service.messages().to_vec();
        assert!(!service.mark_read(&a.id).unwrap());
        assert_eq!(service.messages(), after_first.as_slice());
        assert_eq!(service.unread_count(), 1);

        assert!(!service.mark_read("missing").unwrap());
        assert_eq!(service.get(&a.id).unwrap().status, MessageStatus::Read);
        assert!(service.get("missing").is_err());
    }

    #[test]
    fn test_clear_all() {
        let storage = MemoryStorage::new();
        let mut service = service_with(&storage);
        service.add(submission("a")).unwrap();
        service.add(submission("b")).unwrap();

        assert_eq!(service.clear_all().unwrap(), 2);
        assert!(service_with(&storage).is_empty());
    }
}
