//! Bounded, time-indexed result cache keyed by page URL. Entries older than
//! the freshness window are treated as misses; writes that push the store
//! past capacity evict oldest-timestamp entries first. Persistence is a JSON
//! snapshot; any failure degrades to in-memory-only operation.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::error::PageRiskResult;
use crate::types::AnalysisResult;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CacheEntry {
    pub result: AnalysisResult,
    /// Unix milliseconds at insertion.
    pub timestamp: i64,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

pub struct ResultCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    capacity: usize,
    freshness_ms: i64,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ResultCache {
    pub fn new(capacity: usize, freshness_secs: u64) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
            freshness_ms: freshness_secs as i64 * 1_000,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Cached result for `url` if present and still inside the freshness
    /// window; stale entries count as misses but are left for the next write
    /// to overwrite.
    pub fn get(&self, url: &str) -> Option<AnalysisResult> {
        let now = chrono::Utc::now().timestamp_millis();
        let entries = self.entries.read();
        if let Some(entry) = entries.get(url) {
            if now - entry.timestamp < self.freshness_ms {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Some(entry.result.clone());
            }
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    pub fn insert(&self, url: &str, result: AnalysisResult) {
        self.insert_at(url, result, chrono::Utc::now().timestamp_millis());
    }

    pub(crate) fn insert_at(&self, url: &str, result: AnalysisResult, timestamp: i64) {
        let mut entries = self.entries.write();
        entries.insert(url.to_string(), CacheEntry { result, timestamp });
        while entries.len() > self.capacity {
            // Oldest-by-timestamp goes first; key order breaks exact ties.
            let oldest = entries
                .iter()
                .min_by_key(|(k, e)| (e.timestamp, (*k).clone()))
                .map(|(k, _)| k.clone());
            match oldest {
                Some(key) => {
                    debug!(url = %key, "Evicting oldest cache entry");
                    entries.remove(&key);
                }
                None => break,
            }
        }
    }

    /// Drop the entry for `url`, forcing the next analysis to recompute.
    pub fn invalidate(&self, url: &str) {
        self.entries.write().remove(url);
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub(crate) fn peek(&self, url: &str) -> Option<CacheEntry> {
        self.entries.read().get(url).cloned()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.read().len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Write a JSON snapshot of the cache. Callers that treat persistence as
    /// best-effort can log the error and carry on in memory.
    pub fn save(&self, path: &Path) -> PageRiskResult<()> {
        let snapshot = self.entries.read().clone();
        let json = serde_json::to_vec_pretty(&snapshot)?;
        std::fs::write(path, json)?;
        debug!(path = %path.display(), entries = snapshot.len(), "Cache snapshot written");
        Ok(())
    }

    /// Restore entries from a JSON snapshot, respecting the capacity bound.
    /// A missing or corrupt snapshot leaves the cache as-is.
    pub fn load(&self, path: &Path) -> PageRiskResult<usize> {
        let bytes = std::fs::read(path)?;
        let snapshot: HashMap<String, CacheEntry> = serde_json::from_slice(&bytes)?;
        let count = snapshot.len();
        for (url, entry) in snapshot {
            self.insert_at(&url, entry.result, entry.timestamp);
        }
        debug!(path = %path.display(), entries = count, "Cache snapshot restored");
        Ok(count)
    }

    /// `load` with the degrade-to-memory-only policy applied: failures are
    /// logged, never propagated.
    pub fn load_or_warn(&self, path: &Path) -> usize {
        match self.load(path) {
            Ok(n) => n,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Cache restore failed, running in-memory only");
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AnalysisResult, RiskLevel};

    fn result(score: u8) -> AnalysisResult {
        AnalysisResult {
            risk_level: RiskLevel::Safe,
            score,
            findings: Vec::new(),
            timestamp: 0,
        }
    }

    #[test]
    fn fresh_entries_hit_stale_entries_miss() {
        let cache = ResultCache::new(10, 3600);
        let now = chrono::Utc::now().timestamp_millis();

        cache.insert_at("https://a.example/", result(1), now);
        assert!(cache.get("https://a.example/").is_some());

        cache.insert_at("https://b.example/", result(2), now - 3_700_000);
        assert!(cache.get("https://b.example/").is_none());
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn capacity_evicts_oldest_first() {
        let cache = ResultCache::new(3, 3600);
        for (i, url) in ["a", "b", "c", "d"].iter().enumerate() {
            cache.insert_at(url, result(i as u8), i as i64 + 1);
        }
        assert_eq!(cache.len(), 3);
        assert!(cache.peek("a").is_none(), "oldest entry should be evicted");
        assert!(cache.peek("d").is_some());
    }

    #[test]
    fn overwrite_does_not_grow_the_store() {
        let cache = ResultCache::new(3, 3600);
        cache.insert_at("a", result(1), 1);
        cache.insert_at("a", result(2), 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.peek("a").unwrap().result.score, 2);
    }

    #[test]
    fn invalidate_forces_recompute() {
        let cache = ResultCache::new(3, 3600);
        cache.insert("a", result(1));
        assert!(cache.get("a").is_some());
        cache.invalidate("a");
        assert!(cache.get("a").is_none());
    }

    #[test]
    fn snapshot_roundtrip_and_corrupt_restore() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("pagerisk-cache-{}.json", std::process::id()));

        let cache = ResultCache::new(10, 3600);
        cache.insert("https://a.example/", result(42));
        cache.save(&path).unwrap();

        let restored = ResultCache::new(10, 3600);
        assert_eq!(restored.load_or_warn(&path), 1);
        assert_eq!(restored.peek("https://a.example/").unwrap().result.score, 42);

        std::fs::write(&path, b"not json").unwrap();
        let broken = ResultCache::new(10, 3600);
        // degrade, not fail
        assert_eq!(broken.load_or_warn(&path), 0);

        let _ = std::fs::remove_file(&path);
    }
}
