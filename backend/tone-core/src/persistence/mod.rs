//! Durable key/value storage for preferences.
//!
//! State holders never touch the filesystem directly; they go through a
//! [`PreferenceStore`] so production code writes to disk and tests use
//! [`MemoryStore`].

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::StoreError;

/// Key holding the completion credential.
pub const API_KEY_STORAGE_KEY: &str = "mistral_api_key";

/// Key holding the last selected tone identifier.
pub const LAST_TONE_STORAGE_KEY: &str = "last_selected_tone";

/// Narrow persistence port used by the state holders.
pub trait PreferenceStore: Send + Sync {
    /// Read a value. `Ok(None)` when the key was never written or was deleted.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one.
    fn save(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a value. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), StoreError>;
}
