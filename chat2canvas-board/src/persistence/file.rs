use super::KeyValueStore;
use crate::error::{BoardError, Result};
use async_trait::async_trait;
use fs2::FileExt;
use std::path::{Path, PathBuf};
use tokio::fs;

const LOCK_FILE: &str = ".lock";

/// Stores each key as `<root>/<key>.json`.
///
/// Writes go through a temp file and a rename, so a crash mid-write leaves
/// the previous value intact.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    root: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{}.json", name))
    }

    /// Take the exclusive process lock on this directory (non-blocking).
    ///
    /// Hold the guard for the lifetime of a session so two processes never
    /// interleave writes to the same snapshot.
    pub fn lock(&self) -> Result<StoreLock> {
        std::fs::create_dir_all(&self.root).map_err(|e| {
            BoardError::storage(format!("cannot create {}: {}", self.root.display(), e))
        })?;

        let path = self.root.join(LOCK_FILE);
        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)
            .map_err(|e| BoardError::storage(format!("cannot open {}: {}", path.display(), e)))?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(StoreLock { file }),
            Err(_) => Err(BoardError::storage(format!(
                "{} is locked by another process",
                self.root.display()
            ))),
        }
    }
}

/// RAII lock guard, released on drop
#[derive(Debug)]
pub struct StoreLock {
    file: std::fs::File,
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key);
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BoardError::storage(format!(
                "cannot read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let path = self.path_for(key);
        atomic_write(&path, &value)
            .await
            .map_err(|e| BoardError::storage(format!("cannot write {}: {}", path.display(), e)))
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BoardError::storage(format!(
                "cannot remove {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

/// Atomic write via temp file and rename
async fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    // Unique per write so overlapping writers never share a temp file
    let temp_path = path.with_extension(format!("{}.tmp", ulid::Ulid::new()));
    fs::write(&temp_path, content).await?;
    fs::rename(&temp_path, path).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_roundtrip_creates_directory() {
        let temp = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp.path().join("nested").join("data"));

        assert_eq!(store.get("board").await.unwrap(), None);
        store.set("board", b"{}".to_vec()).await.unwrap();
        assert_eq!(store.get("board").await.unwrap(), Some(b"{}".to_vec()));
        assert!(store.path_for("board").exists());
        assert_eq!(leftover_temp_files(store.root()), 0);
    }

    fn leftover_temp_files(dir: &Path) -> usize {
        std::fs::read_dir(dir)
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "tmp"))
            .count()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_overlapping_writes_use_separate_temp_files() {
        let temp = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp.path());

        let writers: Vec<_> = (0..16u8)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.set("board", vec![b'0' + i % 10; 4096]).await })
            })
            .collect();
        for writer in writers {
            writer.await.unwrap().unwrap();
        }

        let stored = store.get("board").await.unwrap().unwrap();
        assert_eq!(stored.len(), 4096);
        assert!(stored.iter().all(|b| *b == stored[0]));
        assert_eq!(leftover_temp_files(temp.path()), 0);
    }

    #[tokio::test]
    async fn test_overwrite_and_remove() {
        let temp = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp.path());

        store.set("k", b"one".to_vec()).await.unwrap();
        store.set("k", b"two".to_vec()).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(b"two".to_vec()));

        store.remove("k").await.unwrap();
        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[test]
    fn test_path_for_sanitizes_key() {
        let store = FileKeyValueStore::new("/data");
        assert_eq!(
            store.path_for("chat2canvas-projects"),
            PathBuf::from("/data/chat2canvas-projects.json")
        );
        assert_eq!(store.path_for("../etc/x"), PathBuf::from("/data/___etc_x.json"));
    }

    #[test]
    fn test_lock_is_exclusive() {
        let temp = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp.path());

        let first = store.lock().unwrap();
        let err = store.lock().unwrap_err();
        assert!(matches!(err, BoardError::StorageUnavailable { .. }));

        drop(first);
        let _second = store.lock().unwrap();
    }
}
