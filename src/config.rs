use serde::{Deserialize, Serialize};

/// Engine configuration. Every tuning constant the classifier depends on is
/// surfaced here; the defaults reproduce the reference behavior exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Per-category aggregation weights
    pub weights: CategoryWeights,
    /// Result cache sizing and freshness
    pub cache: CacheConfig,
    /// Re-analysis coalescing window in milliseconds
    pub debounce_ms: u64,
    /// Threat database refresh cadence
    pub threat: ThreatConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: CategoryWeights::default(),
            cache: CacheConfig::default(),
            debounce_ms: 2_000,
            threat: ThreatConfig::default(),
        }
    }
}

/// Fixed category weights. Must sum to 1.0 when all six categories are
/// present; absent categories drop out of both numerator and denominator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CategoryWeights {
    pub url: f64,
    pub content: f64,
    pub domain: f64,
    pub behavioral: f64,
    pub form: f64,
    pub certificate: f64,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            url: 0.20,
            content: 0.25,
            domain: 0.25,
            behavioral: 0.15,
            form: 0.10,
            certificate: 0.05,
        }
    }
}

impl CategoryWeights {
    pub fn sum(&self) -> f64 {
        self.url + self.content + self.domain + self.behavioral + self.form + self.certificate
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached results; oldest entries are evicted first
    pub capacity: usize,
    /// Maximum age (seconds) before a cached result is recomputed
    pub freshness_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { capacity: 100, freshness_secs: 3_600 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreatConfig {
    /// How long a threat snapshot is trusted before a refresh is attempted
    pub staleness_secs: u64,
    /// Polling interval for the refresh task; shorter than the staleness window
    pub poll_secs: u64,
}

impl Default for ThreatConfig {
    fn default() -> Self {
        Self { staleness_secs: 21_600, poll_secs: 3_600 }
    }
}
