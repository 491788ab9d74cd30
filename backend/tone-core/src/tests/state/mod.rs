mod credential;
mod text;
mod tone;

use crate::error::StoreError;
use crate::persistence::PreferenceStore;

use common::ErrorLocation;

/// Store whose every operation fails, for exercising the degraded paths.
pub(super) struct BrokenStore;

impl BrokenStore {
    fn failure() -> StoreError {
        StoreError::Poisoned {
            location: ErrorLocation::here(),
            reason: "store unavailable".to_string(),
        }
    }
}

impl PreferenceStore for BrokenStore {
    fn load(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(Self::failure())
    }

    fn save(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(Self::failure())
    }

    fn delete(&self, _key: &str) -> Result<(), StoreError> {
        Err(Self::failure())
    }
}
