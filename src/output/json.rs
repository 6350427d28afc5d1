// JSON Output Module

use crate::Result;
use crate::certificates::Certificate;
use crate::verification::{CheckerResults, VerificationResults};
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

const UNKNOWN: &str = "Unknown";

/// Checker labels in configured order, followed by `overall`
struct VerificationSummary<'a>(&'a CheckerResults);

impl Serialize for VerificationSummary<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len() + 1))?;
        for (checker, status) in self.0.iter() {
            map.serialize_entry(checker, status.label())?;
        }
        map.serialize_entry("overall", self.0.overall().label())?;
        map.end()
    }
}

#[derive(Serialize)]
struct CertificateRecord<'a> {
    organization: &'a str,
    issuer: &'a str,
    domain: &'a str,
    valid_from: String,
    valid_to: String,
    signature_algorithm: &'a str,
    fingerprint: &'a str,
    domains: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    verification: Option<VerificationSummary<'a>>,
}

impl<'a> CertificateRecord<'a> {
    fn new(cert: &'a Certificate, results: Option<&'a VerificationResults>) -> Self {
        let or_unknown = |value: &'a str| if value.is_empty() { UNKNOWN } else { value };

        Self {
            organization: or_unknown(&cert.organization),
            issuer: or_unknown(&cert.issuer),
            domain: &cert.domain,
            valid_from: cert.valid_from.format("%Y-%m-%d").to_string(),
            valid_to: cert.valid_to.format("%Y-%m-%d").to_string(),
            signature_algorithm: &cert.signature_algorithm,
            fingerprint: &cert.fingerprint,
            domains: &cert.domains,
            verification: results
                .and_then(|r| r.get(&cert.fingerprint))
                .map(VerificationSummary),
        }
    }
}

/// Generate a JSON array describing `certificates`
///
/// Certificates with an entry in `results` carry a `verification` object.
pub fn generate_json(
    certificates: &[Certificate],
    results: Option<&VerificationResults>,
    pretty: bool,
) -> Result<String> {
    let records: Vec<CertificateRecord<'_>> = certificates
        .iter()
        .map(|cert| CertificateRecord::new(cert, results))
        .collect();

    if pretty {
        Ok(serde_json::to_string_pretty(&records)?)
    } else {
        Ok(serde_json::to_string(&records)?)
    }
}
