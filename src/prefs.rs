//! Persisted preferences: the stored API credential.
//!
//! The credential lives in a JSON file under the user config directory, with
//! a best-effort keyring copy alongside it.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const SERVICE_NAME: &str = "producthunt-menu";
const PREFS_FILE: &str = "prefs.json";

/// On-disk preference shape
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Prefs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

/// Trait for credential persistence
///
/// This abstraction allows easy mocking of the preference store in tests.
#[async_trait]
pub trait PrefStore: Send + Sync {
    /// Loads the stored credential, if any
    async fn load_token(&self) -> Result<Option<String>>;

    /// Saves the credential
    async fn save_token(&self, token: &str) -> Result<()>;

    /// Removes the stored credential
    async fn clear_token(&self) -> Result<()>;
}

/// File-backed preference store with an optional keyring secondary copy
pub struct FilePrefStore {
    keyring_entry: Option<keyring::Entry>,
    path: PathBuf,
}

impl FilePrefStore {
    /// Creates a store under the user config directory
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(SERVICE_NAME);
        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;

        // Keyring availability varies by desktop; absence is fine.
        let keyring_entry = keyring::Entry::new(SERVICE_NAME, "api_token").ok();

        Ok(Self {
            keyring_entry,
            path: config_dir.join(PREFS_FILE),
        })
    }

    /// Creates a store with a custom path (for testing)
    #[cfg(test)]
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            keyring_entry: None,
            path,
        }
    }

    fn read_prefs(&self) -> Result<Prefs> {
        if !self.path.exists() {
            return Ok(Prefs::default());
        }
        let data = std::fs::read_to_string(&self.path).context("Failed to read prefs file")?;
        serde_json::from_str(&data).context("Failed to parse prefs file")
    }

    fn write_prefs(&self, prefs: &Prefs) -> Result<()> {
        let json = serde_json::to_string_pretty(prefs).context("Failed to serialize prefs")?;
        std::fs::write(&self.path, json).context("Failed to write prefs file")
    }
}

#[async_trait]
impl PrefStore for FilePrefStore {
    async fn load_token(&self) -> Result<Option<String>> {
        let prefs = self.read_prefs()?;
        if prefs.token.is_some() {
            return Ok(prefs.token);
        }

        // Fall back to the keyring copy
        if let Some(ref entry) = self.keyring_entry {
            if let Ok(token) = entry.get_password() {
                return Ok(Some(token));
            }
        }

        Ok(None)
    }

    async fn save_token(&self, token: &str) -> Result<()> {
        let mut prefs = self.read_prefs().unwrap_or_default();
        prefs.token = Some(token.to_string());
        self.write_prefs(&prefs)?;

        // Keyring is a secondary copy only
        if let Some(ref entry) = self.keyring_entry {
            let _ = entry.set_password(token);
        }

        Ok(())
    }

    async fn clear_token(&self) -> Result<()> {
        let mut prefs = self.read_prefs().unwrap_or_default();
        prefs.token = None;
        self.write_prefs(&prefs)?;

        if let Some(ref entry) = self.keyring_entry {
            let _ = entry.delete_credential();
        }

        Ok(())
    }
}
