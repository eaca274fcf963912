//! Analysis coordinator: the entry point collaborators call. Owns the result
//! cache, the per-URL single-flight registry, the threat database, and the
//! notification fan-out. Also provides the debounced re-analysis trigger,
//! whose timer lifetime is bound to the session object that owns it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::aggregator::{self, CategorySet};
use crate::config::EngineConfig;
use crate::dispatch::ResultDispatcher;
use crate::result_cache::ResultCache;
use crate::threat_db::ThreatDatabase;
use crate::types::{AnalysisResult, PageSignals, RiskLevel};
use crate::{
    behavioral_analyzer, certificate_analyzer, content_analyzer, domain_analyzer,
    form_analyzer, url_analyzer,
};

type PendingResult = Option<AnalysisResult>;

enum FlightRole {
    Leader(watch::Sender<PendingResult>),
    Follower(watch::Receiver<PendingResult>),
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct EngineReport {
    pub total_requests: u64,
    pub aggregations_run: u64,
    pub cache_entries: usize,
    pub cache_hits: u64,
    pub threat_domains: usize,
}

pub struct AnalysisEngine {
    config: EngineConfig,
    cache: ResultCache,
    threats: Arc<ThreatDatabase>,
    dispatcher: ResultDispatcher,
    /// Per-key promise registry: the first caller for a URL stores a pending
    /// channel; concurrent callers attach to it instead of recomputing.
    pending: Mutex<HashMap<String, watch::Receiver<PendingResult>>>,
    total_requests: AtomicU64,
    aggregations_run: AtomicU64,
}

impl AnalysisEngine {
    pub fn new(config: EngineConfig) -> Self {
        let cache = ResultCache::new(config.cache.capacity, config.cache.freshness_secs);
        let threats = Arc::new(ThreatDatabase::new(Duration::from_secs(
            config.threat.staleness_secs,
        )));
        Self {
            config,
            cache,
            threats,
            dispatcher: ResultDispatcher::new(),
            pending: Mutex::new(HashMap::new()),
            total_requests: AtomicU64::new(0),
            aggregations_run: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    pub fn threat_database(&self) -> &Arc<ThreatDatabase> {
        &self.threats
    }

    pub fn dispatcher(&self) -> &ResultDispatcher {
        &self.dispatcher
    }

    /// Analyze a page. Served from cache when a fresh result exists for the
    /// URL; otherwise the aggregation runs exactly once per URL no matter how
    /// many callers arrive concurrently — followers await the leader's result.
    /// Requests for distinct URLs proceed independently.
    pub async fn analyze(&self, signals: &PageSignals) -> AnalysisResult {
        self.total_requests.fetch_add(1, Ordering::Relaxed);

        if let Some(hit) = self.cache.get(&signals.url) {
            debug!(url = %signals.url, "Serving cached analysis");
            return hit;
        }

        loop {
            let role = {
                let mut pending = self.pending.lock();
                if let Some(rx) = pending.get(&signals.url) {
                    FlightRole::Follower(rx.clone())
                } else {
                    let (tx, rx) = watch::channel(None);
                    pending.insert(signals.url.clone(), rx);
                    FlightRole::Leader(tx)
                }
            };

            match role {
                FlightRole::Leader(tx) => {
                    let result = self.run_aggregation(signals);
                    self.cache.insert(&signals.url, result.clone());
                    // Cache first, then release followers and late arrivals.
                    self.pending.lock().remove(&signals.url);
                    let _ = tx.send(Some(result.clone()));
                    self.dispatcher.publish(&signals.url, &result);
                    return result;
                }
                FlightRole::Follower(mut rx) => {
                    let existing = rx.borrow().clone();
                    if let Some(result) = existing {
                        return result;
                    }
                    if rx.changed().await.is_ok() {
                        if let Some(result) = rx.borrow().clone() {
                            return result;
                        }
                    }
                    // Leader vanished without publishing; take over next pass.
                }
            }
        }
    }

    /// Drop any cached result for the URL and analyze fresh. Used by the
    /// re-analysis path, where the page is known to have changed.
    pub async fn reanalyze(&self, signals: &PageSignals) -> AnalysisResult {
        self.cache.invalidate(&signals.url);
        self.analyze(signals).await
    }

    fn run_aggregation(&self, signals: &PageSignals) -> AnalysisResult {
        self.aggregations_run.fetch_add(1, Ordering::Relaxed);
        let snapshot = self.threats.snapshot();

        let categories = CategorySet {
            url: Some(url_analyzer::analyze(&signals.url)),
            content: Some(content_analyzer::analyze(signals.bounded_content())),
            domain: Some(domain_analyzer::analyze(&signals.domain, &snapshot)),
            behavioral: Some(behavioral_analyzer::analyze(&signals.behavioral)),
            form: Some(form_analyzer::analyze(&signals.forms, &signals.protocol)),
            certificate: signals.certificate.as_ref().map(certificate_analyzer::analyze),
        };

        let result = aggregator::aggregate(
            categories,
            &self.config.weights,
            chrono::Utc::now().timestamp(),
        );

        if result.risk_level >= RiskLevel::High {
            warn!(
                url = %signals.url,
                score = result.score,
                risk = ?result.risk_level,
                findings = result.findings.len(),
                "High-risk page detected"
            );
        } else {
            debug!(url = %signals.url, score = result.score, "Page analyzed");
        }

        result
    }

    pub fn aggregations_run(&self) -> u64 {
        self.aggregations_run.load(Ordering::Relaxed)
    }

    pub fn report(&self) -> EngineReport {
        let cache_stats = self.cache.stats();
        EngineReport {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            aggregations_run: self.aggregations_run.load(Ordering::Relaxed),
            cache_entries: cache_stats.entries,
            cache_hits: cache_stats.hits,
            threat_domains: self.threats.report().domain_count,
        }
    }
}

/// Debounced re-analysis trigger for one page session. External change
/// notifications (DOM mutation, redirect, popup) call [`poke`]; each call
/// restarts the coalescing window, so a storm of events produces a single
/// re-run once the page settles. Dropping the debouncer cancels any pending
/// run — the timer cannot outlive the session that owns it.
///
/// [`poke`]: ReanalysisDebouncer::poke
pub struct ReanalysisDebouncer {
    window: Duration,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl ReanalysisDebouncer {
    pub fn new(window: Duration) -> Self {
        Self { window, task: Mutex::new(None) }
    }

    /// Debouncer using the engine's configured window.
    pub fn for_engine(engine: &AnalysisEngine) -> Self {
        Self::new(Duration::from_millis(engine.config.debounce_ms))
    }

    /// Note a page change. Cancels the previously scheduled run, if any, and
    /// schedules a fresh one `window` from now with the latest signals.
    pub fn poke(&self, engine: Arc<AnalysisEngine>, signals: PageSignals) {
        let mut slot = self.task.lock();
        if let Some(previous) = slot.take() {
            previous.abort();
        }
        let window = self.window;
        *slot = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            let _ = engine.reanalyze(&signals).await;
        }));
    }

    /// Cancel any pending re-run without scheduling a new one.
    pub fn cancel(&self) {
        if let Some(task) = self.task.lock().take() {
            task.abort();
        }
    }
}

impl Drop for ReanalysisDebouncer {
    fn drop(&mut self) {
        if let Some(task) = self.task.get_mut().take() {
            task.abort();
        }
    }
}
