//! Weighted aggregation of category results and risk-tier classification.

use crate::config::CategoryWeights;
use crate::types::{AnalysisResult, CategoryResult, Finding, RiskLevel};

/// Findings at or above this severity count as critical for tier escalation.
const CRITICAL_SEVERITY: u8 = 9;
/// Findings at or above this severity count as high for tier escalation.
const HIGH_SEVERITY: u8 = 7;

/// Per-category analyzer outputs in fixed evaluation order. `None` means the
/// category was skipped; it contributes neither value nor weight.
#[derive(Debug, Default)]
pub struct CategorySet {
    pub url: Option<CategoryResult>,
    pub content: Option<CategoryResult>,
    pub domain: Option<CategoryResult>,
    pub behavioral: Option<CategoryResult>,
    pub form: Option<CategoryResult>,
    pub certificate: Option<CategoryResult>,
}

/// Fold the category results into one `AnalysisResult`.
///
/// `normalized = Σ(value·weight) / Σ(weight present)` — absent categories
/// shrink the denominator rather than dragging the average toward zero.
pub fn aggregate(
    categories: CategorySet,
    weights: &CategoryWeights,
    timestamp: i64,
) -> AnalysisResult {
    let pairs = [
        (categories.url, weights.url),
        (categories.content, weights.content),
        (categories.domain, weights.domain),
        (categories.behavioral, weights.behavioral),
        (categories.form, weights.form),
        (categories.certificate, weights.certificate),
    ];

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    let mut findings = Vec::new();

    for (category, weight) in pairs {
        if let Some(c) = category {
            numerator += c.value * weight;
            denominator += weight;
            findings.extend(c.findings);
        }
    }

    let normalized = if denominator > 0.0 { numerator / denominator } else { 0.0 };

    // Stable sort: ties keep category evaluation order. Display contract.
    findings.sort_by(|a, b| b.severity.cmp(&a.severity));

    let risk_level = classify(normalized, &findings);
    AnalysisResult {
        risk_level,
        score: (normalized * 100.0).round() as u8,
        findings,
        timestamp,
    }
}

/// Risk tier from the normalized score plus finding severity density, so one
/// overwhelming but narrow signal is not diluted by five quiet categories.
fn classify(normalized: f64, findings: &[Finding]) -> RiskLevel {
    let critical = findings.iter().filter(|f| f.severity >= CRITICAL_SEVERITY).count();
    let high = findings.iter().filter(|f| f.severity >= HIGH_SEVERITY).count();

    if critical >= 2 || normalized >= 0.80 {
        RiskLevel::Critical
    } else if critical >= 1 || high >= 2 || normalized >= 0.60 {
        RiskLevel::High
    } else if high >= 1 || normalized >= 0.40 {
        RiskLevel::Medium
    } else if normalized >= 0.20 {
        RiskLevel::Low
    } else {
        RiskLevel::Safe
    }
}
