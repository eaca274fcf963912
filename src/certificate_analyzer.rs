//! Certificate analyzer over the caller-supplied summary. No cryptographic
//! validation happens here; the flags are taken at face value. A page with no
//! certificate info skips the category entirely (the caller passes `None` to
//! the aggregator, never a zeroed result).

use crate::types::{CategoryResult, CertificateInfo, Finding, FindingKind};

pub fn analyze(cert: &CertificateInfo) -> CategoryResult {
    let mut points = 0u32;
    let mut findings = Vec::new();

    if !cert.valid {
        points += 70;
        findings.push(Finding::new(
            FindingKind::InvalidCertificate,
            9,
            "Certificate is not valid",
        ));
    }

    if cert.self_signed {
        points += 50;
        findings.push(Finding::new(
            FindingKind::SelfSignedCertificate,
            8,
            "Certificate is self-signed",
        ));
    }

    if cert.mismatch {
        points += 60;
        findings.push(Finding::new(
            FindingKind::CertificateMismatch,
            9,
            "Certificate does not match the domain",
        ));
    }

    CategoryResult::from_points(points, findings)
}
