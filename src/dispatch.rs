//! Consumer notification fan-out. Two logically distinct channels: a badge
//! update (risk tier only) on every result, and a warning payload (full
//! result) when the tier reaches High. Subscribers that lag or disappear
//! never block or fail an analysis.

use tokio::sync::broadcast;

use crate::types::{AnalysisResult, RiskLevel};

const CHANNEL_DEPTH: usize = 256;

/// Tier-only status payload for badge/icon consumers.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BadgeUpdate {
    pub url: String,
    pub risk_level: RiskLevel,
    pub score: u8,
    pub timestamp: i64,
}

/// Full-result payload for user-facing warning surfaces.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PageWarning {
    pub url: String,
    pub result: AnalysisResult,
}

pub struct ResultDispatcher {
    badge_tx: broadcast::Sender<BadgeUpdate>,
    warning_tx: broadcast::Sender<PageWarning>,
}

impl ResultDispatcher {
    pub fn new() -> Self {
        let (badge_tx, _) = broadcast::channel(CHANNEL_DEPTH);
        let (warning_tx, _) = broadcast::channel(CHANNEL_DEPTH);
        Self { badge_tx, warning_tx }
    }

    pub fn subscribe_badges(&self) -> broadcast::Receiver<BadgeUpdate> {
        self.badge_tx.subscribe()
    }

    pub fn subscribe_warnings(&self) -> broadcast::Receiver<PageWarning> {
        self.warning_tx.subscribe()
    }

    pub(crate) fn publish(&self, url: &str, result: &AnalysisResult) {
        let _ = self.badge_tx.send(BadgeUpdate {
            url: url.to_string(),
            risk_level: result.risk_level,
            score: result.score,
            timestamp: result.timestamp,
        });

        if result.risk_level >= RiskLevel::High {
            let _ = self.warning_tx.send(PageWarning {
                url: url.to_string(),
                result: result.clone(),
            });
        }
    }
}

impl Default for ResultDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
