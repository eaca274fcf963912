//! URL-structure analyzer. Pure function of the raw URL string; a URL that
//! fails to parse is itself a signal, never a fatal error.

use url::Url;

use crate::lexical;
use crate::types::{CategoryResult, Finding, FindingKind};

const MALFORMED_POINTS: u32 = 30;

pub fn analyze(raw_url: &str) -> CategoryResult {
    let parsed = match Url::parse(raw_url) {
        Ok(u) => u,
        Err(_) => {
            return CategoryResult::from_points(
                MALFORMED_POINTS,
                vec![Finding::new(
                    FindingKind::MalformedUrl,
                    6,
                    "URL could not be parsed",
                )],
            );
        }
    };

    let mut points = 0u32;
    let mut findings = Vec::new();
    let host = parsed.host_str().unwrap_or("").to_lowercase();

    if matches!(parsed.host(), Some(url::Host::Ipv4(_))) {
        points += 40;
        findings.push(Finding::new(
            FindingKind::IpAddressHost,
            7,
            format!("Hostname is a bare IP address ({host})"),
        ));
    }

    let labels = host.split('.').filter(|l| !l.is_empty()).count();
    if labels > 4 {
        points += 20;
        findings.push(Finding::new(
            FindingKind::ExcessiveSubdomains,
            5,
            format!("Hostname has {labels} dot-separated labels"),
        ));
    }

    let confusables = lexical::confusables_in(&host);
    if !confusables.is_empty() {
        points += 50;
        let listed: String = confusables.iter().collect();
        findings.push(Finding::new(
            FindingKind::HomoglyphCharacters,
            9,
            format!("Hostname contains look-alike characters: {listed}"),
        ));
    }

    // Only the first matching brand counts.
    for brand in lexical::BRANDS {
        if host.contains(brand.token) {
            let legitimate = brand
                .legitimate
                .iter()
                .any(|d| host == *d || host.ends_with(&format!(".{d}")));
            if !legitimate {
                points += 35;
                findings.push(Finding::new(
                    FindingKind::BrandImpersonation,
                    8,
                    format!("Hostname references '{}' but is not an official domain", brand.token),
                ));
            }
            break;
        }
    }

    // One finding per matching token, not short-circuited.
    for token in lexical::SUSPICIOUS_TOKENS {
        if host.contains(token) {
            points += 15;
            findings.push(Finding::new(
                FindingKind::SuspiciousUrlToken,
                4,
                format!("Hostname contains suspicious fragment '{token}'"),
            ));
        }
    }

    if parsed.path().len() > 100 {
        points += 10;
        findings.push(Finding::new(
            FindingKind::LongPath,
            3,
            format!("Unusually long path ({} chars)", parsed.path().len()),
        ));
    }

    if parsed
        .query_pairs()
        .any(|(k, _)| matches!(k.as_ref(), "redirect" | "url" | "next"))
    {
        points += 15;
        findings.push(Finding::new(
            FindingKind::RedirectParameter,
            5,
            "Query string carries a redirect parameter",
        ));
    }

    CategoryResult::from_points(points, findings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_url_is_a_finding_not_an_error() {
        let r = analyze("not a url at all");
        assert_eq!(r.value, 0.30);
        assert_eq!(r.findings.len(), 1);
        assert_eq!(r.findings[0].kind, FindingKind::MalformedUrl);
        assert_eq!(r.findings[0].severity, 6);
    }

    #[test]
    fn ip_literal_scores_forty() {
        let r = analyze("http://203.0.113.7/login");
        assert_eq!(r.value, 0.40);
        assert!(r.findings.iter().any(|f| f.kind == FindingKind::IpAddressHost));
    }

    #[test]
    fn brand_token_outside_official_domain() {
        let r = analyze("https://paypal-support.example.com/");
        assert!(r.findings.iter().any(|f| f.kind == FindingKind::BrandImpersonation));

        let legit = analyze("https://www.paypal.com/signin");
        assert!(!legit.findings.iter().any(|f| f.kind == FindingKind::BrandImpersonation));
    }

    #[test]
    fn suspicious_tokens_yield_one_finding_each() {
        let r = analyze("https://secure-verify-login.example.net/");
        let hits = r
            .findings
            .iter()
            .filter(|f| f.kind == FindingKind::SuspiciousUrlToken)
            .count();
        assert!(hits >= 2, "expected one finding per matching token, got {hits}");
    }

    #[test]
    fn homoglyph_hostname_is_severe() {
        // Cyrillic а in "gооgle" stand-in
        let r = analyze("https://gоogle-accounts.example/");
        let f = r
            .findings
            .iter()
            .find(|f| f.kind == FindingKind::HomoglyphCharacters)
            .expect("homoglyph finding");
        assert_eq!(f.severity, 9);
        assert!(f.description.contains('о'));
    }

    #[test]
    fn redirect_parameter_detected() {
        let r = analyze("https://example.com/go?next=https://evil.example");
        assert!(r.findings.iter().any(|f| f.kind == FindingKind::RedirectParameter));
    }

    #[test]
    fn check_points_are_additive() {
        // IP host + long path + redirect param = 40 + 10 + 15
        let url = format!("http://203.0.113.7/{}?url=x", "a".repeat(120));
        let r = analyze(&url);
        assert_eq!(r.value, 0.65);
    }
}
