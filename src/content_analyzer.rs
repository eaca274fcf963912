//! Content-pattern analyzer over the extracted visible text.

use crate::lexical;
use crate::types::{CategoryResult, Finding, FindingKind};

pub fn analyze(content: &str) -> CategoryResult {
    if content.is_empty() {
        return CategoryResult::clean();
    }

    let lower = content.to_lowercase();
    let mut points = 0u32;
    let mut findings = Vec::new();

    // Occurrences across the whole phrase list; the two tiers are mutually
    // exclusive, not additive.
    let urgency: usize = lexical::URGENCY_PHRASES
        .iter()
        .map(|p| lower.matches(p).count())
        .sum();
    if urgency >= 3 {
        points += 40;
        findings.push(Finding::new(
            FindingKind::UrgencyLanguage,
            7,
            format!("Urgency language appears {urgency} times"),
        ));
    } else if urgency >= 1 {
        points += 15;
        findings.push(Finding::new(
            FindingKind::UrgencyLanguage,
            4,
            format!("Urgency language appears {urgency} time(s)"),
        ));
    }

    let distinct = lexical::FINANCIAL_KEYWORDS
        .iter()
        .filter(|k| lower.contains(*k))
        .count();
    if distinct >= 3 {
        points += 30;
        findings.push(Finding::new(
            FindingKind::FinancialKeywords,
            8,
            format!("Page asks about {distinct} distinct financial/sensitive items"),
        ));
    }

    let anomalies = lexical::spelling_anomaly_count(&lower);
    if anomalies > 5 {
        points += 25;
        findings.push(Finding::new(
            FindingKind::SpellingAnomalies,
            5,
            format!("{anomalies} leetspeak-style spellings of security words"),
        ));
    }

    if let Some(phrase) = lexical::REWARD_PHRASES.iter().find(|p| lower.contains(*p)) {
        points += 20;
        findings.push(Finding::new(
            FindingKind::RewardBait,
            6,
            format!("Reward-bait phrase present: \"{phrase}\""),
        ));
    }

    CategoryResult::from_points(points, findings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_content_is_clean() {
        let r = analyze("");
        assert_eq!(r.value, 0.0);
        assert!(r.findings.is_empty());
    }

    #[test]
    fn urgency_tiers_are_exclusive() {
        let low = analyze("Please respond urgent.");
        assert_eq!(low.value, 0.15);
        assert_eq!(low.findings[0].severity, 4);

        let high = analyze("urgent! urgent! act now before your account suspended");
        // urgent ×2 + act now + account suspended = 4 occurrences
        assert_eq!(high.value, 0.40);
        assert_eq!(high.findings[0].severity, 7);
        assert_eq!(high.findings.len(), 1);
    }

    #[test]
    fn three_distinct_financial_keywords() {
        let r = analyze("Enter your credit card, social security and bank account details");
        assert_eq!(r.value, 0.30);
        assert_eq!(r.findings[0].kind, FindingKind::FinancialKeywords);
    }

    #[test]
    fn reward_bait_short_circuits() {
        let r = analyze("Congratulations! You have won a cash prize");
        let bait: Vec<_> = r
            .findings
            .iter()
            .filter(|f| f.kind == FindingKind::RewardBait)
            .collect();
        assert_eq!(bait.len(), 1);
        assert_eq!(bait[0].severity, 6);
    }

    #[test]
    fn spelling_anomalies_need_more_than_five() {
        let five = "acc0unt acc0unt acc0unt acc0unt acc0unt";
        assert!(analyze(five).findings.iter().all(|f| f.kind != FindingKind::SpellingAnomalies));

        let six = "acc0unt acc0unt acc0unt v3rify v3rify passw0rd";
        let r = analyze(six);
        assert!(r.findings.iter().any(|f| f.kind == FindingKind::SpellingAnomalies));
    }
}
