use crate::error::StoreError;
use crate::persistence::{API_KEY_STORAGE_KEY, PreferenceStore};

use common::Credential;

use std::fmt;
use std::sync::Arc;

use log::{debug, info, warn};

/// Where the startup credential came from (safe to log).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// Deploy-time default (environment / `.env`).
    Configured,
    /// Previously saved in the preference store.
    Persisted,
    /// Set during this session.
    Entered,
    None,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::Configured => write!(f, "environment"),
            CredentialSource::Persisted => write!(f, "saved preferences"),
            CredentialSource::Entered => write!(f, "entered this session"),
            CredentialSource::None => write!(f, "none"),
        }
    }
}

/// Holds the completion credential and mirrors it into the preference store.
pub struct CredentialStore {
    current: Credential,
    source: CredentialSource,
    store: Arc<dyn PreferenceStore>,
}

impl CredentialStore {
    /// Initialize from, in order: the configured default, the persisted value.
    ///
    /// A store read failure is logged and treated as "nothing persisted" so a
    /// corrupt preference never blocks startup.
    pub fn load(store: Arc<dyn PreferenceStore>, configured_default: Option<&str>) -> Self {
        let configured = configured_default.map(Credential::new).filter(Credential::is_present);
        if let Some(current) = configured {
            info!("Using configured API key ({} chars)", current.len());
            return Self {
                current,
                source: CredentialSource::Configured,
                store,
            };
        }

        let persisted = match store.load(API_KEY_STORAGE_KEY) {
            Ok(value) => value.map(Credential::new).filter(Credential::is_present),
            Err(e) => {
                warn!("Failed to read persisted API key, ignoring: {}", e);
                None
            }
        };

        match persisted {
            Some(current) => {
                info!("Using persisted API key ({} chars)", current.len());
                Self {
                    current,
                    source: CredentialSource::Persisted,
                    store,
                }
            }
            None => {
                debug!("No API key configured or persisted");
                Self {
                    current: Credential::empty(),
                    source: CredentialSource::None,
                    store,
                }
            }
        }
    }

    pub fn get(&self) -> &Credential {
        &self.current
    }

    pub fn source(&self) -> CredentialSource {
        self.source
    }

    /// Replace the credential. Blank input clears it.
    pub fn set(&mut self, raw: &str) -> Result<(), StoreError> {
        let credential = Credential::new(raw);
        if credential.is_empty() {
            return self.clear();
        }

        self.store.save(API_KEY_STORAGE_KEY, credential.expose())?;
        info!("API key updated ({} chars)", credential.len());
        self.current = credential;
        self.source = CredentialSource::Entered;
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.current = Credential::empty();
        self.source = CredentialSource::None;
        self.store.delete(API_KEY_STORAGE_KEY)?;
        info!("API key cleared");
        Ok(())
    }

    pub fn has_credential(&self) -> bool {
        self.current.is_present()
    }
}
