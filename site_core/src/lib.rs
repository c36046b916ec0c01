//! Core library for the company website: navigation and overlay state,
//! contact messages persisted through a storage port, the admin session gate,
//! the service catalog, CSV export and the chat assistant.

pub mod auth;
pub mod chat;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod i18n;
pub mod messages;
pub mod navigation;
pub mod state;
pub mod storage;
pub mod validation;

pub use auth::{AdminGate, LoginOutcome, SessionAuth};
pub use chat::{ChatBackend, ChatSession, GeminiClient};
pub use config::AppConfig;
pub use dashboard::{Dashboard, DashboardStats, StatusFilter};
pub use error::{AppError, Result};
pub use export::{default_export_file_name, export_file_name, messages_to_csv};
pub use i18n::{DocumentAttributes, Language, ServiceCatalog, ServiceId, TextDirection, Theme};
pub use messages::{Message, MessageService, MessageStatus, MessageStore};
pub use navigation::{Effect, NavEvent, NavigationState, Page};
pub use state::{Action, Outcome, SiteState, SiteStore};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use validation::{ContactSubmission, ValidationResult};
