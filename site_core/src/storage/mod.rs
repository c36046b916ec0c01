//! Key/value storage port standing in for browser local and session storage.

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::Result;

/// String-keyed storage holding string values, the shape of the Web Storage API.
///
/// Nothing the site stores is ever removed: messages are rewritten as a whole
/// and the admin flag lasts until the session ends.
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
