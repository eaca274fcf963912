//! Known-bad domain database. The domain set is published as an immutable
//! snapshot behind an `Arc` and replaced wholesale on refresh — readers never
//! observe a partially-updated set. Refresh failures keep the previous
//! snapshot serving.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::error::PageRiskResult;

/// One immutable generation of the known-threat domain set.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ThreatSnapshot {
    pub domains: HashSet<String>,
    /// Unix seconds of the refresh that produced this snapshot; 0 = never.
    pub last_update: i64,
}

/// Source of threat domains. Implementations hand the engine already-resolved
/// data; any network or disk I/O happens on the implementor's side.
pub trait ThreatFeed: Send + Sync {
    fn name(&self) -> &str;
    fn fetch(&self) -> PageRiskResult<HashSet<String>>;
}

/// Placeholder feed backed by a fixed list. Stands in for a live reputation
/// feed; the engine treats it exactly like a remote source.
pub struct StaticThreatFeed {
    domains: HashSet<String>,
}

impl StaticThreatFeed {
    pub fn new(domains: impl IntoIterator<Item = String>) -> Self {
        Self { domains: domains.into_iter().map(|d| d.to_lowercase()).collect() }
    }
}

impl Default for StaticThreatFeed {
    fn default() -> Self {
        let builtin = [
            "malware-download.com",
            "evil-payload.net",
            "trojan-dropper.org",
            "login-verify-account.com",
            "secure-update-required.net",
            "account-suspended-verify.com",
            "free-bitcoin-generator.com",
            "eth-giveaway.net",
        ];
        Self::new(builtin.iter().map(|d| d.to_string()))
    }
}

impl ThreatFeed for StaticThreatFeed {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch(&self) -> PageRiskResult<HashSet<String>> {
        Ok(self.domains.clone())
    }
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ThreatDbReport {
    pub domain_count: usize,
    pub last_update: i64,
    pub refreshes: u64,
    pub refresh_failures: u64,
}

pub struct ThreatDatabase {
    snapshot: RwLock<Arc<ThreatSnapshot>>,
    staleness: Duration,
    running: Arc<AtomicBool>,
    refreshes: AtomicU64,
    refresh_failures: AtomicU64,
}

impl ThreatDatabase {
    pub fn new(staleness: Duration) -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(ThreatSnapshot::default())),
            staleness,
            running: Arc::new(AtomicBool::new(false)),
            refreshes: AtomicU64::new(0),
            refresh_failures: AtomicU64::new(0),
        }
    }

    /// Current snapshot. Cheap; the caller holds it for the whole analysis so
    /// a concurrent refresh can never change data mid-run.
    pub fn snapshot(&self) -> Arc<ThreatSnapshot> {
        self.snapshot.read().clone()
    }

    /// Replace the domain set wholesale. Visible to readers only once complete.
    pub fn replace(&self, domains: HashSet<String>) {
        let snapshot = Arc::new(ThreatSnapshot {
            domains,
            last_update: chrono::Utc::now().timestamp(),
        });
        *self.snapshot.write() = snapshot;
    }

    pub fn is_stale(&self) -> bool {
        let last = self.snapshot.read().last_update;
        chrono::Utc::now().timestamp() - last >= self.staleness.as_secs() as i64
    }

    /// Refresh once from `feed`. On failure the previous snapshot stays intact
    /// and the error is reported; the periodic task retries next tick.
    pub fn refresh_from(&self, feed: &dyn ThreatFeed) -> PageRiskResult<usize> {
        match feed.fetch() {
            Ok(domains) => {
                let count = domains.len();
                self.replace(domains);
                self.refreshes.fetch_add(1, Ordering::Relaxed);
                info!(feed = %feed.name(), domains = count, "Threat database refreshed");
                Ok(count)
            }
            Err(e) => {
                self.refresh_failures.fetch_add(1, Ordering::Relaxed);
                warn!(feed = %feed.name(), error = %e, "Threat feed refresh failed, keeping previous snapshot");
                Err(e)
            }
        }
    }

    /// Spawn the periodic refresh loop: every `poll` the snapshot age is
    /// checked and a refresh attempted only once it exceeds the staleness
    /// window. Stop with [`ThreatDatabase::stop`].
    pub fn start_periodic(self: &Arc<Self>, feed: Arc<dyn ThreatFeed>, poll: Duration) {
        self.running.store(true, Ordering::Relaxed);
        let db = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poll);
            while db.running.load(Ordering::Relaxed) {
                ticker.tick().await;
                if db.is_stale() {
                    let _ = db.refresh_from(feed.as_ref());
                }
            }
        });
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }

    pub fn report(&self) -> ThreatDbReport {
        let snapshot = self.snapshot.read();
        ThreatDbReport {
            domain_count: snapshot.domains.len(),
            last_update: snapshot.last_update,
            refreshes: self.refreshes.load(Ordering::Relaxed),
            refresh_failures: self.refresh_failures.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PageRiskError;

    struct FailingFeed;

    impl ThreatFeed for FailingFeed {
        fn name(&self) -> &str {
            "failing"
        }
        fn fetch(&self) -> PageRiskResult<HashSet<String>> {
            Err(PageRiskError::FeedUnavailable {
                feed: "failing".into(),
                reason: "unreachable".into(),
            })
        }
    }

    #[test]
    fn replace_publishes_a_complete_snapshot() {
        let db = ThreatDatabase::new(Duration::from_secs(3600));
        assert!(db.snapshot().domains.is_empty());
        db.replace(["bad.example".to_string()].into_iter().collect());
        let snap = db.snapshot();
        assert!(snap.domains.contains("bad.example"));
        assert!(snap.last_update > 0);
    }

    #[test]
    fn failed_refresh_keeps_previous_snapshot() {
        let db = ThreatDatabase::new(Duration::from_secs(3600));
        db.replace(["bad.example".to_string()].into_iter().collect());
        let before = db.snapshot();

        assert!(db.refresh_from(&FailingFeed).is_err());
        let after = db.snapshot();
        assert!(after.domains.contains("bad.example"));
        assert_eq!(before.last_update, after.last_update);
        assert_eq!(db.report().refresh_failures, 1);
    }

    #[test]
    fn static_feed_refresh_succeeds() {
        let db = ThreatDatabase::new(Duration::from_secs(3600));
        let n = db.refresh_from(&StaticThreatFeed::default()).unwrap();
        assert!(n > 0);
        assert!(!db.is_stale());
        assert!(db.snapshot().domains.contains("login-verify-account.com"));
    }

    #[test]
    fn readers_keep_their_generation_across_a_replace() {
        let db = ThreatDatabase::new(Duration::from_secs(3600));
        db.replace(["old.example".to_string()].into_iter().collect());
        let held = db.snapshot();
        db.replace(["new.example".to_string()].into_iter().collect());
        assert!(held.domains.contains("old.example"));
        assert!(db.snapshot().domains.contains("new.example"));
    }
}
