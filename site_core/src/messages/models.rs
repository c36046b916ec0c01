use serde::{Deserialize, Serialize};
use std::fmt;

use crate::validation::ContactSubmission;

/// Display format of [`Message::date`], day first.
pub const DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    New,
    Read,
}

impl MessageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageStatus::New => "new",
            MessageStatus::Read => "read",
        }
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contact-form submission as kept in local storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub date: String,
    pub status: MessageStatus,
}

impl Message {
    pub(crate) fn from_submission(id: String, date: String, submission: ContactSubmission) -> Self {
        Self {
            id,
            name: submission.name,
            phone: submission.phone,
            email: submission.email,
            subject: submission.subject,
            message: submission.message,
            date,
            status: MessageStatus::New,
        }
    }

    pub fn is_new(&self) -> bool {
        self.status == MessageStatus::New
    }

    /// One-way `new -> read`. Returns whether the status changed.
    pub(crate) fn mark_read(&mut self) -> bool {
        if self.is_new() {
            self.status = MessageStatus::Read;
            true
        } else {
            false
        }
    }
}
