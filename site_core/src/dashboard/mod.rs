//! Admin dashboard view model over the message collection

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::MAX_TOAST_DURATION_MS;
use crate::messages::{Message, MessageStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    New,
    Read,
}

impl StatusFilter {
    fn matches(self, status: MessageStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::New => status == MessageStatus::New,
            StatusFilter::Read => status == MessageStatus::Read,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total: usize,
    pub unread: usize,
    pub read: usize,
}

impl DashboardStats {
    pub fn from_messages(messages: &[Message]) -> Self {
        let unread = messages.iter().filter(|m| m.is_new()).count();
        Self {
            total: messages.len(),
            unread,
            read: messages.len() - unread,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub text: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub filter: StatusFilter,
    pub search: String,
    pub selected_id: Option<String>,
    toast: Option<Toast>,
    toast_duration: Duration,
}

impl Dashboard {
    /// Durations above [`MAX_TOAST_DURATION_MS`] are clamped to it.
    pub fn new(toast_duration_ms: u64) -> Self {
        let millis = i64::try_from(toast_duration_ms.min(MAX_TOAST_DURATION_MS)).unwrap_or(i64::MAX);
        Self {
            filter: StatusFilter::All,
            search: String::new(),
            selected_id: None,
            toast: None,
            toast_duration: Duration::milliseconds(millis),
        }
    }

    /// Messages passing the status filter and the case-insensitive search,
    /// in collection order.
    pub fn visible<'a>(&self, messages: &'a [Message]) -> Vec<&'a Message> {
        let needle = self.search.trim().to_lowercase();
        messages
            .iter()
            .filter(|m| self.filter.matches(m.status))
            .filter(|m| {
                needle.is_empty()
                    || [&m.name, &m.email, &m.subject, &m.message]
                        .iter()
                        .any(|field| field.to_lowercase().contains(&needle))
            })
            .collect()
    }

    pub fn selected<'a>(&self, messages: &'a [Message]) -> Option<&'a Message> {
        let id = self.selected_id.as_deref()?;
        messages.iter().find(|m| m.id == id)
    }

    pub fn show_toast(&mut self, text: impl Into<String>, now: DateTime<Utc>) {
        self.toast = Some(Toast {
            text: text.into(),
            expires_at: now
                .checked_add_signed(self.toast_duration)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        });
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    /// Dismisses the toast once its deadline has passed.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        if matches!(&self.toast, Some(toast) if now >= toast.expires_at) {
            self.toast = None;
        }
    }

    /// Drops pending timers when the dashboard closes.
    pub fn teardown(&mut self) {
        self.toast = None;
        self.selected_id = None;
    }
}
