//! Persisted auth token storage.
//!
//! The backend issues a single bearer token at login; it survives app
//! restarts via [`FileTokenStore`]. Write discipline is narrow: `login`
//! writes, `logout` and a failed startup validation delete, the HTTP
//! adapter only reads.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tokio::sync::RwLock;

/// File name of the persisted token inside the store directory.
const TOKEN_FILE: &str = "token";

/// Temp file name used for atomic replacement.
const TOKEN_TMP_FILE: &str = "token.tmp";

/// Errors that can occur when reading or writing the token store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("token store I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Storage for the persisted auth token.
///
/// Implementations must be safe to share across tasks. `delete` is
/// idempotent: deleting an absent token succeeds.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Read the stored token, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn get(&self) -> Result<Option<SecretString>, StorageError>;

    /// Store a token, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the token cannot be written.
    async fn set(&self, token: &SecretString) -> Result<(), StorageError>;

    /// Remove the stored token. Succeeds when no token is stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be modified.
    async fn delete(&self) -> Result<(), StorageError>;
}

// =============================================================================
// FileTokenStore
// =============================================================================

/// Durable token store backed by a single file.
///
/// Writes go to a temp file in the same directory followed by a rename,
/// so a crashed write never truncates the previous token. On Unix the
/// file is created with `0600` permissions.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    dir: PathBuf,
}

impl FileTokenStore {
    /// Create a store rooted at the given directory.
    ///
    /// The directory is created on first write, not here.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    fn tmp_path(&self) -> PathBuf {
        self.dir.join(TOKEN_TMP_FILE)
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn get(&self) -> Result<Option<SecretString>, StorageError> {
        let path = self.token_path();
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) if contents.is_empty() => Ok(None),
            Ok(contents) => Ok(Some(SecretString::from(contents))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(&path, e)),
        }
    }

    async fn set(&self, token: &SecretString) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StorageError::io(&self.dir, e))?;

        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, token.expose_secret())
            .await
            .map_err(|e| StorageError::io(&tmp, e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&tmp, std::fs::Permissions::from_mode(0o600))
                .await
                .map_err(|e| StorageError::io(&tmp, e))?;
        }

        let path = self.token_path();
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| StorageError::io(&path, e))
    }

    async fn delete(&self) -> Result<(), StorageError> {
        let path = self.token_path();
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(&path, e)),
        }
    }
}

// =============================================================================
// MemoryTokenStore
// =============================================================================

/// In-memory token store for tests and embedders that manage durability
/// themselves.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<SecretString>>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with a token.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(SecretString::from(token.into()))),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn get(&self) -> Result<Option<SecretString>, StorageError> {
        Ok(self.token.read().await.clone())
    }

    async fn set(&self, token: &SecretString) -> Result<(), StorageError> {
        *self.token.write().await = Some(token.clone());
        Ok(())
    }

    async fn delete(&self) -> Result<(), StorageError> {
        *self.token.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path());

        assert!(store.get().await.unwrap().is_none());

        store.set(&SecretString::from("tok-abc")).await.unwrap();
        let token = store.get().await.unwrap().unwrap();
        assert_eq!(token.expose_secret(), "tok-abc");

        store.delete().await.unwrap();
        assert!(store.get().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_store_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path());

        store.set(&SecretString::from("first")).await.unwrap();
        store.set(&SecretString::from("second")).await.unwrap();

        let token = store.get().await.unwrap().unwrap();
        assert_eq!(token.expose_secret(), "second");
    }

    #[tokio::test]
    async fn test_file_store_delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path());

        store.delete().await.unwrap();
        store.set(&SecretString::from("tok")).await.unwrap();
        store.delete().await.unwrap();
        store.delete().await.unwrap();
    }

    #[tokio::test]
    async fn test_file_store_creates_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileTokenStore::new(&nested);

        store.set(&SecretString::from("tok")).await.unwrap();
        assert!(nested.join("token").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_file_store_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path());
        store.set(&SecretString::from("tok")).await.unwrap();

        let mode = std::fs::metadata(dir.path().join("token"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryTokenStore::new();
        assert!(store.get().await.unwrap().is_none());

        store.set(&SecretString::from("tok")).await.unwrap();
        assert_eq!(store.get().await.unwrap().unwrap().expose_secret(), "tok");

        store.delete().await.unwrap();
        assert!(store.get().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_store_preseeded() {
        let store = MemoryTokenStore::with_token("seeded");
        assert_eq!(
            store.get().await.unwrap().unwrap().expose_secret(),
            "seeded"
        );
    }
}
