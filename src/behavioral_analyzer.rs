//! Behavioral analyzer over collector-owned counters.

use crate::types::{BehavioralSignals, CategoryResult, Finding, FindingKind};

pub fn analyze(behavioral: &BehavioralSignals) -> CategoryResult {
    let mut points = 0u32;
    let mut findings = Vec::new();

    if behavioral.auto_redirects > 0 {
        points += 30;
        findings.push(Finding::new(
            FindingKind::AutoRedirects,
            7,
            format!("{} automatic redirect(s) observed", behavioral.auto_redirects),
        ));
    }

    if behavioral.popups > 2 {
        points += 25;
        findings.push(Finding::new(
            FindingKind::ExcessivePopups,
            6,
            format!("{} popups opened", behavioral.popups),
        ));
    }

    if behavioral.clipboard_access {
        points += 35;
        findings.push(Finding::new(
            FindingKind::ClipboardAccess,
            8,
            "Page accessed the clipboard",
        ));
    }

    if behavioral.hidden_iframes > 0 {
        points += 40;
        findings.push(Finding::new(
            FindingKind::HiddenIframes,
            8,
            format!("{} hidden iframe(s) present", behavioral.hidden_iframes),
        ));
    }

    CategoryResult::from_points(points, findings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_page_is_clean() {
        let r = analyze(&BehavioralSignals::default());
        assert_eq!(r.value, 0.0);
        assert!(r.findings.is_empty());
    }

    #[test]
    fn popups_need_more_than_two() {
        let mut b = BehavioralSignals::default();
        b.popups = 2;
        assert!(analyze(&b).findings.is_empty());
        b.popups = 3;
        let r = analyze(&b);
        assert_eq!(r.findings[0].kind, FindingKind::ExcessivePopups);
        assert!(r.findings[0].description.contains('3'));
    }

    #[test]
    fn all_signals_cap_at_one() {
        let b = BehavioralSignals {
            auto_redirects: 2,
            popups: 5,
            clipboard_access: true,
            hidden_iframes: 1,
        };
        // 30 + 25 + 35 + 40 = 130, capped
        let r = analyze(&b);
        assert_eq!(r.value, 1.0);
        assert_eq!(r.findings.len(), 4);
    }
}
