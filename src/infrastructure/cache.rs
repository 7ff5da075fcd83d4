//! Time-expiring response cache.
//!
//! Entries are stored as JSON `{ "value": .., "timestamp": <epoch ms> }` and
//! are only checked for expiry when read. There is no size bound: entries that
//! are never read again stay in the store.

use super::store::KeyValueStore;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct CacheItem<T> {
    value: T,
    timestamp: i64,
}

pub struct ExpiringCache<S: KeyValueStore> {
    store: S,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<S: KeyValueStore> ExpiringCache<S> {
    pub fn new(store: S, ttl: Duration) -> Self {
        Self::with_clock(store, ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(store: S, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self { store, ttl, clock }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    /// Returns the value stored under `key` while it is younger than the TTL.
    /// Expired or unreadable entries are removed and reported as a miss.
    pub fn get<T: DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        let raw = self.store.get_item(key)?;
        let item = match serde_json::from_str::<CacheItem<T>>(&raw) {
            Ok(item) => item,
            Err(e) => {
                log::debug!("cache entry {key} unreadable, dropping: {e}");
                self.evict(key);
                return None;
            }
        };

        let age = self.clock.now_millis().saturating_sub(item.timestamp);
        if age >= self.ttl_millis() {
            log::debug!("cache entry {key} expired ({age} ms old)");
            self.evict(key);
            return None;
        }

        log::debug!("cache hit {key}");
        Some(item.value)
    }

    /// Stores `value` under `key`, replacing any previous entry.
    pub fn put<T: Serialize>(&mut self, key: &str, value: &T) {
        let item = CacheItem {
            value,
            timestamp: self.clock.now_millis(),
        };
        let raw = match serde_json::to_string(&item) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("cache entry {key} not serializable: {e}");
                return;
            }
        };
        if let Err(e) = self.store.set_item(key, raw) {
            log::warn!("failed to persist cache entry {key}: {e:#}");
        }
    }

    fn evict(&mut self, key: &str) {
        if let Err(e) = self.store.remove_item(key) {
            log::warn!("failed to evict cache entry {key}: {e:#}");
        }
    }

    fn ttl_millis(&self) -> i64 {
        i64::try_from(self.ttl.as_millis()).unwrap_or(i64::MAX)
    }
}
