//! Domain-reputation analyzer. Reads an already-resolved threat snapshot;
//! never performs network I/O of its own. The "age" check is a textual proxy
//! (see `lexical::looks_newly_registered`), not a registration lookup.

use crate::lexical;
use crate::threat_db::ThreatSnapshot;
use crate::types::{CategoryResult, Finding, FindingKind};

/// Apparent age assigned to domains matching the new-domain patterns.
const APPARENT_AGE_DAYS: u32 = 15;
const NEW_DOMAIN_AGE_DAYS: u32 = 30;

pub fn analyze(domain: &str, snapshot: &ThreatSnapshot) -> CategoryResult {
    let domain = domain.to_lowercase();
    let mut points = 0u32;
    let mut findings = Vec::new();

    if snapshot.domains.contains(&domain) {
        points += 90;
        findings.push(Finding::new(
            FindingKind::KnownThreatDomain,
            10,
            format!("{domain} is on the known-threat list"),
        ));
    }

    if lexical::looks_newly_registered(&domain) && APPARENT_AGE_DAYS < NEW_DOMAIN_AGE_DAYS {
        points += 40;
        findings.push(Finding::new(
            FindingKind::NewDomainPattern,
            7,
            format!("{domain} matches newly-registered domain patterns"),
        ));
    }

    if let Some(tld) = domain.rsplit('.').next() {
        if lexical::HIGH_RISK_TLDS.contains(&tld) {
            points += 20;
            findings.push(Finding::new(
                FindingKind::HighRiskTld,
                5,
                format!("High-risk TLD .{tld}"),
            ));
        }
    }

    CategoryResult::from_points(points, findings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn snapshot_with(domains: &[&str]) -> ThreatSnapshot {
        ThreatSnapshot {
            domains: domains.iter().map(|d| d.to_string()).collect(),
            last_update: 0,
        }
    }

    #[test]
    fn threat_list_membership_dominates() {
        let snap = snapshot_with(&["evil.example"]);
        let r = analyze("evil.example", &snap);
        assert_eq!(r.value, 0.90);
        assert_eq!(r.findings[0].severity, 10);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let snap = snapshot_with(&["evil.example"]);
        let r = analyze("EVIL.example", &snap);
        assert_eq!(r.value, 0.90);
    }

    #[test]
    fn checks_accumulate() {
        // digit run + risky TLD, not on the threat list
        let snap = snapshot_with(&[]);
        let r = analyze("promo2024.xyz", &snap);
        assert_eq!(r.value, 0.60);
        assert_eq!(r.findings.len(), 2);
    }

    #[test]
    fn plain_domain_is_clean() {
        let snap = snapshot_with(&[]);
        let r = analyze("example.org", &snap);
        assert_eq!(r.value, 0.0);
        assert!(r.findings.is_empty());
    }
}
