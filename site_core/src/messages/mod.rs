pub mod models;
pub mod service;
pub mod store;

pub use models::{Message, MessageStatus};
pub use service::MessageService;
pub use store::MessageStore;
