//! Shared types for the page risk engine.

use serde::{Deserialize, Serialize};

/// Maximum number of characters of visible page text that is analyzed.
/// Longer content is truncated up front — a cost bound, not a defect.
pub const MAX_CONTENT_CHARS: usize = 10_000;

/// Final risk classification for a page.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Safe,
    Low,
    Medium,
    High,
    Critical,
}

/// Tag identifying which rule produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    MalformedUrl,
    IpAddressHost,
    ExcessiveSubdomains,
    HomoglyphCharacters,
    BrandImpersonation,
    SuspiciousUrlToken,
    LongPath,
    RedirectParameter,
    UrgencyLanguage,
    FinancialKeywords,
    SpellingAnomalies,
    RewardBait,
    KnownThreatDomain,
    NewDomainPattern,
    HighRiskTld,
    AutoRedirects,
    ExcessivePopups,
    ClipboardAccess,
    HiddenIframes,
    InsecureSensitiveForm,
    InsecureFormAction,
    CrossOriginFormAction,
    InvalidCertificate,
    SelfSignedCertificate,
    CertificateMismatch,
}

/// A single detected suspicious indicator. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub kind: FindingKind,
    /// 1 (informational) through 10 (damning). Assigned per rule, never computed.
    pub severity: u8,
    pub description: String,
}

impl Finding {
    pub fn new(kind: FindingKind, severity: u8, description: impl Into<String>) -> Self {
        Self { kind, severity, description: description.into() }
    }
}

/// Output of one category analyzer: a normalized suspicion value plus the
/// findings that contributed to it. An absent category is `None` at the
/// aggregation seam, never a zeroed `CategoryResult`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryResult {
    /// Normalized suspicion in [0, 1].
    pub value: f64,
    pub findings: Vec<Finding>,
}

impl CategoryResult {
    pub fn clean() -> Self {
        Self { value: 0.0, findings: Vec::new() }
    }

    /// Cap accumulated rule points at 100 and normalize to [0, 1].
    pub fn from_points(points: u32, findings: Vec<Finding>) -> Self {
        Self { value: (points as f64 / 100.0).min(1.0), findings }
    }
}

/// Wiring of a single form observed on the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSignal {
    /// Submission target as written in the DOM.
    pub action: String,
    pub method: String,
    /// The form asks for password/payment/identity-class input.
    pub requests_sensitive_data: bool,
    /// Scheme of the submission target.
    pub protocol: String,
    /// Target resolves to an origin other than the page's.
    pub external_action: bool,
}

impl FormSignal {
    /// The submission target uses an explicitly insecure scheme.
    pub fn insecure_action(&self) -> bool {
        scheme(&self.protocol) == "http" || self.action.starts_with("http://")
    }
}

/// Network-behavior counters owned by the collector; the engine only reads
/// them. Counts are monotonically increasing over the page session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehavioralSignals {
    pub auto_redirects: u32,
    pub popups: u32,
    pub clipboard_access: bool,
    pub hidden_iframes: u32,
}

/// Best-effort certificate summary supplied by the caller. Not verified here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateInfo {
    pub valid: bool,
    pub self_signed: bool,
    pub mismatch: bool,
}

/// Everything the engine knows about a page. Immutable per analysis call;
/// collected by an external observer (DOM/browser layer).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageSignals {
    /// Absolute URL of the page. Doubles as the cache identity.
    pub url: String,
    /// Hostname, lower-cased before reputation lookup.
    pub domain: String,
    /// Page scheme ("https" or "https:" — collector layers differ).
    pub protocol: String,
    /// Extracted visible text, truncated to [`MAX_CONTENT_CHARS`].
    pub content: String,
    pub forms: Vec<FormSignal>,
    pub behavioral: BehavioralSignals,
    pub certificate: Option<CertificateInfo>,
}

impl PageSignals {
    /// Whether the page itself was served over a secure scheme.
    pub fn is_secure(&self) -> bool {
        scheme(&self.protocol) == "https"
    }

    /// Content clamped to the analysis bound, on a char boundary.
    pub fn bounded_content(&self) -> &str {
        match self.content.char_indices().nth(MAX_CONTENT_CHARS) {
            Some((idx, _)) => &self.content[..idx],
            None => &self.content,
        }
    }
}

/// The complete, immutable outcome of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub risk_level: RiskLevel,
    /// 0–100, `round(normalized_score × 100)`.
    pub score: u8,
    /// All category findings merged, sorted by severity descending. Consumers
    /// display only a prefix and rely on the most severe issues being first.
    pub findings: Vec<Finding>,
    /// Unix seconds at completion of the run.
    pub timestamp: i64,
}

pub(crate) fn scheme(protocol: &str) -> &str {
    protocol.trim_end_matches(':')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_content_respects_char_boundaries() {
        let mut signals = PageSignals::default();
        signals.content = "é".repeat(MAX_CONTENT_CHARS + 50);
        let bounded = signals.bounded_content();
        assert_eq!(bounded.chars().count(), MAX_CONTENT_CHARS);
    }

    #[test]
    fn scheme_accepts_both_collector_spellings() {
        let mut signals = PageSignals::default();
        signals.protocol = "https:".into();
        assert!(signals.is_secure());
        signals.protocol = "https".into();
        assert!(signals.is_secure());
        signals.protocol = "http:".into();
        assert!(!signals.is_secure());
    }

    #[test]
    fn category_result_caps_at_one() {
        let r = CategoryResult::from_points(250, Vec::new());
        assert_eq!(r.value, 1.0);
        let r = CategoryResult::from_points(40, Vec::new());
        assert_eq!(r.value, 0.40);
    }
}
