//! # pagerisk — heuristic scam/phishing risk engine for web pages
//!
//! Classifies a single page's risk from client-observable signals (URL shape,
//! visible text, form wiring, network-behavior counters, certificate state)
//! into a risk tier and a severity-ranked list of findings. Many independent
//! weak signals are normalized, weighted, and combined; no single signal is
//! authoritative.
//!
//! Features:
//! - Six independent, pure category analyzers (URL, content, domain
//!   reputation, behavioral, form security, certificate)
//! - Weighted aggregation with severity-density risk escalation
//! - Bounded result cache with per-URL single-flight request coalescing
//! - Snapshot-replace threat database with staleness-gated periodic refresh
//! - Debounced re-analysis bound to the page session
//! - Badge/warning broadcast channels for consumers
//!
//! Signal collection (DOM scraping, mutation observation) and presentation
//! (badge rendering, warning overlays) live outside this crate; the engine
//! accepts an already-collected [`PageSignals`] and returns an
//! [`AnalysisResult`].

pub mod aggregator;
pub mod behavioral_analyzer;
pub mod certificate_analyzer;
pub mod config;
pub mod content_analyzer;
pub mod coordinator;
pub mod dispatch;
pub mod domain_analyzer;
pub mod error;
pub mod form_analyzer;
pub mod lexical;
pub mod result_cache;
pub mod threat_db;
pub mod types;
pub mod url_analyzer;


pub use config::{CacheConfig, CategoryWeights, EngineConfig, ThreatConfig};
pub use coordinator::{AnalysisEngine, EngineReport, ReanalysisDebouncer};
pub use dispatch::{BadgeUpdate, PageWarning, ResultDispatcher};
pub use error::{PageRiskError, PageRiskResult};
pub use result_cache::{CacheStats, ResultCache};
pub use threat_db::{StaticThreatFeed, ThreatDatabase, ThreatFeed, ThreatSnapshot};
pub use types::{
    AnalysisResult, BehavioralSignals, CategoryResult, CertificateInfo, Finding,
    FindingKind, FormSignal, PageSignals, RiskLevel,
};
