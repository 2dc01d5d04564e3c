//! Disk-backed receipt storage
//!
//! Stores uploaded expense receipts as flat files under the configured
//! uploads directory. Stored names are prefixed with a time-ordered UUID so
//! repeated uploads of the same file never collide, and the original name is
//! kept as a readable suffix. The directory is served read-only under
//! `/uploads` by the router.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use domain_ledger::{LedgerError, ReceiptStore};
use tracing::debug;
use uuid::Uuid;

/// Receipt store writing to a local directory
#[derive(Debug, Clone)]
pub struct DiskReceiptStore {
    root: PathBuf,
}

impl DiskReceiptStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory receipts are stored in
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the uploads directory if it does not exist yet
    pub async fn ensure_root(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }
}

/// Reduces a client-supplied file name to a safe flat name: the final path
/// component with anything outside `[A-Za-z0-9._-]` replaced.
fn sanitize_file_name(file_name: &str) -> String {
    let base = Path::new(file_name)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("receipt");

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches(['.', '_']).is_empty() {
        "receipt".to_string()
    } else {
        cleaned
    }
}

#[async_trait]
impl ReceiptStore for DiskReceiptStore {
    async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<String, LedgerError> {
        let stored_name = format!("{}-{}", Uuid::now_v7(), sanitize_file_name(file_name));

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(LedgerError::storage)?;
        tokio::fs::write(self.root.join(&stored_name), bytes)
            .await
            .map_err(LedgerError::storage)?;

        debug!(%stored_name, size = bytes.len(), "stored receipt file");
        Ok(stored_name)
    }

    async fn delete(&self, path: &str) -> Result<(), LedgerError> {
        // stored paths are flat names produced by `save`; anything else is
        // reduced to its file name before touching the filesystem
        let Some(name) = Path::new(path).file_name() else {
            return Ok(());
        };

        match tokio::fs::remove_file(self.root.join(name)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(%path, "receipt file already absent");
                Ok(())
            }
            Err(err) => Err(LedgerError::storage(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_store() -> DiskReceiptStore {
        let root = std::env::temp_dir().join(format!("aquabill-receipts-{}", Uuid::new_v4()));
        DiskReceiptStore::new(root)
    }

    #[test]
    fn test_sanitize_strips_directories() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("march receipt!.jpg"), "march_receipt_.jpg");
        assert_eq!(sanitize_file_name("...."), "receipt");
        assert_eq!(sanitize_file_name("scan.pdf"), "scan.pdf");
    }

    #[tokio::test]
    async fn test_save_then_delete_roundtrip() {
        let store = scratch_store();

        let stored = store.save("receipt.jpg", b"jpeg bytes").await.unwrap();
        assert!(stored.ends_with("-receipt.jpg"));

        let on_disk = tokio::fs::read(store.root().join(&stored)).await.unwrap();
        assert_eq!(on_disk, b"jpeg bytes");

        store.delete(&stored).await.unwrap();
        assert!(!store.root().join(&stored).exists());

        tokio::fs::remove_dir_all(store.root()).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_tolerates_missing_file() {
        let store = scratch_store();
        store.ensure_root().await.unwrap();

        store.delete("never-stored.jpg").await.unwrap();

        tokio::fs::remove_dir_all(store.root()).await.unwrap();
    }

    #[tokio::test]
    async fn test_repeated_uploads_never_collide() {
        let store = scratch_store();

        let first = store.save("receipt.jpg", b"first").await.unwrap();
        let second = store.save("receipt.jpg", b"second").await.unwrap();
        assert_ne!(first, second);

        assert_eq!(
            tokio::fs::read(store.root().join(&first)).await.unwrap(),
            b"first"
        );
        assert_eq!(
            tokio::fs::read(store.root().join(&second)).await.unwrap(),
            b"second"
        );

        tokio::fs::remove_dir_all(store.root()).await.unwrap();
    }
}
