use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Token blob file name in the data directory
const AUTH_FILE: &str = "auth.json";

/// The token pair issued by `POST /api/authentication/token/`.
///
/// No expiry is modeled; the server remains the authority on token
/// freshness and the client never refreshes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub access: String,
    pub refresh: Option<String>,
}

/// Persisted storage for the credential blob.
///
/// A single JSON file under one fixed key: presence of a parseable blob
/// means "possibly authenticated", absence means "definitely anonymous".
/// Writes are last-write-wins; no cross-process synchronization.
pub struct TokenStore {
    data_dir: PathBuf,
}

impl TokenStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Serialize and write the credential, overwriting any prior value.
    /// No shape validation is performed.
    pub fn save(&self, credential: &Credential) -> Result<()> {
        let path = self.auth_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string(credential)?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write token file {}", path.display()))?;
        Ok(())
    }

    /// Remove the blob entirely.
    pub fn clear(&self) -> Result<()> {
        let path = self.auth_path();
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove token file {}", path.display()))?;
        }
        Ok(())
    }

    /// Read the stored credential, or `None` if never set or not parseable.
    /// Never returns an error to callers.
    pub fn read(&self) -> Option<Credential> {
        let path = self.auth_path();
        let contents = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&contents) {
            Ok(credential) => Some(credential),
            Err(e) => {
                warn!(error = %e, path = %path.display(), "Unparseable token blob, treating as anonymous");
                None
            }
        }
    }

    fn auth_path(&self) -> PathBuf {
        self.data_dir.join(AUTH_FILE)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_DIR_SEQ: AtomicU64 = AtomicU64::new(0);

    /// Fresh per-test store backed by a unique temp directory.
    pub(crate) fn temp_store() -> TokenStore {
        let seq = TEST_DIR_SEQ.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!(
            "bankly-tui-test-{}-{}",
            std::process::id(),
            seq
        ));
        let _ = std::fs::remove_dir_all(&dir);
        TokenStore::new(dir)
    }

    pub(crate) fn credential(access: &str, refresh: &str) -> Credential {
        Credential {
            access: access.to_string(),
            refresh: Some(refresh.to_string()),
        }
    }

    #[test]
    fn test_read_absent_returns_none() {
        let store = temp_store();
        assert!(store.read().is_none());
    }

    #[test]
    fn test_save_then_read_roundtrip() {
        let store = temp_store();
        store.save(&credential("A", "R")).unwrap();
        assert_eq!(store.read(), Some(credential("A", "R")));
    }

    #[test]
    fn test_save_overwrites_prior_value() {
        let store = temp_store();
        store.save(&credential("old", "r1")).unwrap();
        store.save(&credential("new", "r2")).unwrap();
        assert_eq!(store.read().unwrap().access, "new");
    }

    #[test]
    fn test_clear_removes_blob() {
        let store = temp_store();
        store.save(&credential("A", "R")).unwrap();
        store.clear().unwrap();
        assert!(store.read().is_none());
        // Clearing again is a no-op, not an error
        store.clear().unwrap();
    }

    #[test]
    fn test_read_malformed_blob_returns_none() {
        let store = temp_store();
        std::fs::create_dir_all(&store.data_dir).unwrap();
        std::fs::write(store.auth_path(), "not json at all").unwrap();
        assert!(store.read().is_none());
    }

    #[test]
    fn test_credential_without_refresh_parses() {
        let store = temp_store();
        std::fs::create_dir_all(&store.data_dir).unwrap();
        std::fs::write(store.auth_path(), r#"{"access": "A", "refresh": null}"#).unwrap();
        let read = store.read().unwrap();
        assert_eq!(read.access, "A");
        assert!(read.refresh.is_none());
    }
}
