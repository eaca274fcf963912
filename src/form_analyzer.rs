//! Form-security analyzer. Each form is judged independently and findings can
//! repeat per form; totals accumulate across all forms before the cap, so
//! pages with many risky forms saturate the category quickly. Intended.

use crate::types::{scheme, CategoryResult, Finding, FindingKind, FormSignal};

pub fn analyze(forms: &[FormSignal], page_protocol: &str) -> CategoryResult {
    if forms.is_empty() {
        return CategoryResult::clean();
    }

    let page_secure = scheme(page_protocol) == "https";
    let mut points = 0u32;
    let mut findings = Vec::new();

    for (idx, form) in forms.iter().enumerate() {
        if form.requests_sensitive_data && !page_secure {
            points += 60;
            findings.push(Finding::new(
                FindingKind::InsecureSensitiveForm,
                10,
                format!("Form #{} collects sensitive data on an insecure page", idx + 1),
            ));
        }

        if form.insecure_action() {
            points += 30;
            findings.push(Finding::new(
                FindingKind::InsecureFormAction,
                7,
                format!("Form #{} submits over plain HTTP", idx + 1),
            ));
        }

        if form.external_action {
            points += 20;
            findings.push(Finding::new(
                FindingKind::CrossOriginFormAction,
                6,
                format!("Form #{} submits to a different origin", idx + 1),
            ));
        }
    }

    CategoryResult::from_points(points, findings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sensitive_form() -> FormSignal {
        FormSignal {
            action: "https://example.com/submit".into(),
            method: "post".into(),
            requests_sensitive_data: true,
            protocol: "https".into(),
            external_action: false,
        }
    }

    #[test]
    fn no_forms_is_clean() {
        let r = analyze(&[], "https");
        assert_eq!(r.value, 0.0);
        assert!(r.findings.is_empty());
    }

    #[test]
    fn sensitive_form_on_insecure_page() {
        let r = analyze(&[sensitive_form()], "http:");
        assert_eq!(r.value, 0.60);
        assert_eq!(r.findings[0].severity, 10);
    }

    #[test]
    fn sensitive_form_on_secure_page_is_fine() {
        let r = analyze(&[sensitive_form()], "https:");
        assert_eq!(r.value, 0.0);
    }

    #[test]
    fn findings_repeat_per_form() {
        let forms = vec![sensitive_form(), sensitive_form()];
        let r = analyze(&forms, "http");
        // 60 + 60 = 120, capped
        assert_eq!(r.value, 1.0);
        assert_eq!(r.findings.len(), 2);
    }

    #[test]
    fn insecure_and_cross_origin_actions() {
        let form = FormSignal {
            action: "http://collector.example/steal".into(),
            method: "post".into(),
            requests_sensitive_data: false,
            protocol: "http".into(),
            external_action: true,
        };
        let r = analyze(&[form], "https");
        assert_eq!(r.value, 0.50);
        assert_eq!(r.findings.len(), 2);
    }
}
