//! In-process cache store

use super::{CacheLookup, CacheStore, SessionRecord};
use crate::error::AosResult;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Cache store kept in memory
///
/// Clones share the same entries, so a handle kept outside a session
/// observes what the session writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryCacheStore {
    // `None` marks a cleared entry
    entries: Arc<Mutex<HashMap<String, Option<SessionRecord>>>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record currently stored for `host`
    pub fn record(&self, host: &str) -> Option<SessionRecord> {
        self.entries().get(host).cloned().flatten()
    }

    /// True when `host` has been explicitly cleared
    pub fn is_cleared(&self, host: &str) -> bool {
        matches!(self.entries().get(host), Some(None))
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Option<SessionRecord>>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CacheStore for MemoryCacheStore {
    fn load(&self, host: &str) -> CacheLookup {
        match self.entries().get(host) {
            Some(Some(record)) => CacheLookup::Hit(record.clone()),
            _ => CacheLookup::Miss,
        }
    }

    fn save(&self, host: &str, record: &SessionRecord) -> AosResult<()> {
        self.entries().insert(host.to_string(), Some(record.clone()));
        Ok(())
    }

    fn clear(&self, host: &str) -> AosResult<()> {
        self.entries().insert(host.to_string(), None);
        Ok(())
    }
}
