//! Client-side token persistence.

use std::path::PathBuf;
use stockroom_core::{Error, Result};

/// Fixed name the access token is stored under.
const TOKEN_KEY: &str = "access_token";

/// Process-wide store for the access token, backed by a file in the
/// platform config directory.
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Store at the default platform location.
    pub fn open_default() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("dev", "stockroom", "stockroom")
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;
        Ok(Self::at(dirs.config_dir().join(TOKEN_KEY)))
    }

    /// Store at an explicit path (used by tests).
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> Option<String> {
        std::fs::read_to_string(&self.path)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    pub fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    /// Gates authenticated reads and the admin surface.
    pub fn is_logged_in(&self) -> bool {
        self.load().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> TokenStore {
        TokenStore::at(dir.path().join(TOKEN_KEY))
    }

    #[test]
    fn test_save_load_clear_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(!store.is_logged_in());
        store.save("tok_123").unwrap();
        assert_eq!(store.load().as_deref(), Some("tok_123"));
        assert!(store.is_logged_in());

        store.clear().unwrap();
        assert!(store.load().is_none());
        assert!(!store.is_logged_in());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.clear().unwrap();
        store.clear().unwrap();
    }

    #[test]
    fn test_blank_file_counts_as_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save("  \n").unwrap();
        assert!(!store.is_logged_in());
    }
}
