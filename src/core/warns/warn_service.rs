// Warn tracking - core business logic for per-user warning counts.
//
// Warns are keyed by (guild_id, user_id). Counts only ever go up: there is
// no decrement, reset, or delete operation. NO Discord dependencies here.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WarnError {
    #[error("Storage error: {0}")]
    StorageError(String),
}

/// Trait for persisting warning counts.
///
/// Implementations own durability; the service only sees counts.
#[async_trait]
pub trait WarnStore: Send + Sync {
    /// Get the warning count for a user in a guild. Absent means 0.
    async fn get_warns(&self, guild_id: u64, user_id: u64) -> Result<u32, WarnError>;

    /// Add one warning for a user. Returns the new total.
    async fn add_warn(&self, guild_id: u64, user_id: u64) -> Result<u32, WarnError>;
}

/// Warn service - the only shared mutable state in the bot.
///
/// Everything that records or reports warns (the profanity filter, the
/// `warn`/`warns` commands) goes through this service, so the storage
/// backend can be swapped without touching dispatch logic.
pub struct WarnService<S: WarnStore> {
    store: S,
}

impl<S: WarnStore> WarnService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Current warning count for a user. Never mutates.
    pub async fn count(&self, guild_id: u64, user_id: u64) -> Result<u32, WarnError> {
        self.store.get_warns(guild_id, user_id).await
    }

    /// Record one warning and return the new total.
    pub async fn warn(&self, guild_id: u64, user_id: u64) -> Result<u32, WarnError> {
        self.store.add_warn(guild_id, user_id).await
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use dashmap::DashMap;

    /// In-memory store for testing
    struct MockWarnStore {
        warns: DashMap<(u64, u64), u32>,
    }

    impl MockWarnStore {
        fn new() -> Self {
            Self {
                warns: DashMap::new(),
            }
        }
    }

    #[async_trait]
    impl WarnStore for MockWarnStore {
        async fn get_warns(&self, guild_id: u64, user_id: u64) -> Result<u32, WarnError> {
            Ok(self
                .warns
                .get(&(guild_id, user_id))
                .map(|v| *v)
                .unwrap_or(0))
        }

        async fn add_warn(&self, guild_id: u64, user_id: u64) -> Result<u32, WarnError> {
            let mut count = self.warns.entry((guild_id, user_id)).or_insert(0);
            *count += 1;
            Ok(*count)
        }
    }

    #[tokio::test]
    async fn test_count_defaults_to_zero() {
        let service = WarnService::new(MockWarnStore::new());
        assert_eq!(service.count(1, 2).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_warn_increments_monotonically() {
        let service = WarnService::new(MockWarnStore::new());

        for expected in 1..=5u32 {
            let total = service.warn(10, 20).await.unwrap();
            assert_eq!(total, expected);
        }
        assert_eq!(service.count(10, 20).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_count_does_not_mutate() {
        let service = WarnService::new(MockWarnStore::new());
        service.warn(10, 20).await.unwrap();

        for _ in 0..3 {
            assert_eq!(service.count(10, 20).await.unwrap(), 1);
        }
    }

    #[tokio::test]
    async fn test_warns_are_isolated_per_guild_and_user() {
        let service = WarnService::new(MockWarnStore::new());
        service.warn(10, 20).await.unwrap();
        service.warn(10, 20).await.unwrap();
        service.warn(11, 20).await.unwrap();

        assert_eq!(service.count(10, 20).await.unwrap(), 2);
        assert_eq!(service.count(11, 20).await.unwrap(), 1);
        assert_eq!(service.count(10, 21).await.unwrap(), 0);
    }
}
