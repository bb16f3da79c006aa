use crate::core::warns::{WarnError, WarnStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tokio::sync::RwLock;

/// On-disk layout: { guild_id: { user_id: count } }, rewritten in full on
/// every mutation.
type WarnMap = HashMap<u64, HashMap<u64, u32>>;

/// JSON-file warn store. The whole mapping lives in memory behind one lock;
/// mutations hold the write lock for the full read-modify-write cycle, so
/// concurrent warns for the same user cannot under-count each other.
pub struct JsonWarnStore {
    path: PathBuf,
    cache: RwLock<WarnMap>,
}

impl JsonWarnStore {
    /// Load the store, creating an empty backing file if none exists yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cache: WarnMap = if path.exists() {
            let file = File::open(&path).expect("Failed to open warns file");
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).unwrap_or_default()
        } else {
            let empty = WarnMap::default();
            match File::create(&path) {
                Ok(file) => {
                    if let Err(source) = serde_json::to_writer_pretty(file, &empty) {
                        tracing::error!("Failed to write initial warns file: {}", source);
                    }
                }
                Err(source) => {
                    tracing::error!("Failed to create warns file at {:?}: {}", path, source);
                }
            }
            empty
        };

        Self {
            path,
            cache: RwLock::new(cache),
        }
    }

    async fn persist(&self) -> Result<(), WarnError> {
        let cache = self.cache.read().await;
        let file = File::create(&self.path).map_err(|e| WarnError::StorageError(e.to_string()))?;
        serde_json::to_writer_pretty(file, &*cache)
            .map_err(|e| WarnError::StorageError(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl WarnStore for JsonWarnStore {
    async fn get_warns(&self, guild_id: u64, user_id: u64) -> Result<u32, WarnError> {
        let cache = self.cache.read().await;
        Ok(cache
            .get(&guild_id)
            .and_then(|g| g.get(&user_id))
            .copied()
            .unwrap_or(0))
    }

    async fn add_warn(&self, guild_id: u64, user_id: u64) -> Result<u32, WarnError> {
        let mut cache = self.cache.write().await;
        let count = cache.entry(guild_id).or_default().entry(user_id).or_insert(0);
        *count += 1;
        let new_count = *count;
        drop(cache); // Release lock before persisting

        // Known correctness gap, kept deliberately: a failed write leaves the
        // in-memory count ahead of the file until the next successful persist.
        if let Err(source) = self.persist().await {
            tracing::error!("Failed to persist warns file: {}", source);
        }

        Ok(new_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_json_persistence_roundtrip() {
        let tmp = NamedTempFile::new().unwrap();
        let path = tmp.path().to_owned();
        drop(tmp);

        let store = JsonWarnStore::new(path.clone());
        assert_eq!(store.add_warn(7, 5).await.unwrap(), 1);
        assert_eq!(store.add_warn(7, 5).await.unwrap(), 2);

        // Reload from file: value read back equals value written.
        let store2 = JsonWarnStore::new(path);
        assert_eq!(store2.get_warns(7, 5).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_missing_file_initialized_empty_and_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("warns.json");
        assert!(!path.exists());

        let store = JsonWarnStore::new(path.clone());
        // Backing file is persisted immediately, even before any warn.
        assert!(path.exists());
        assert_eq!(store.get_warns(1, 2).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unknown_user_defaults_to_zero() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonWarnStore::new(dir.path().join("warns.json"));
        assert_eq!(store.get_warns(42, 43).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_corrupt_file_falls_back_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("warns.json");
        std::fs::write(&path, "not json at all").unwrap();

        let store = JsonWarnStore::new(path);
        assert_eq!(store.get_warns(1, 1).await.unwrap(), 0);
    }
}
