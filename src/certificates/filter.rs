// Certificate Filter - Keyword, signature-algorithm and expiry filters

use super::parser::Certificate;
use chrono::{DateTime, Utc};

/// Filters applied before verification
///
/// All active conditions must match (AND logic). With no keyword, no signature
/// and `show_expired` set, every certificate passes.
#[derive(Debug, Clone, Default)]
pub struct CertificateFilter {
    pub keyword: Option<String>,
    pub signature: Option<String>,
    pub show_expired: bool,
}

impl CertificateFilter {
    pub fn new(keyword: Option<String>, signature: Option<String>, show_expired: bool) -> Self {
        Self {
            keyword: keyword.filter(|k| !k.is_empty()),
            signature: signature.filter(|s| !s.is_empty()),
            show_expired,
        }
    }

    /// Keep the certificates that pass every filter, preserving order
    pub fn apply(&self, certificates: Vec<Certificate>) -> Vec<Certificate> {
        let now = Utc::now();
        certificates
            .into_iter()
            .filter(|cert| self.matches_at(cert, now))
            .collect()
    }

    pub fn matches(&self, cert: &Certificate) -> bool {
        self.matches_at(cert, Utc::now())
    }

    fn matches_at(&self, cert: &Certificate, now: DateTime<Utc>) -> bool {
        if !self.show_expired && cert.is_expired_at(now) {
            return false;
        }

        if let Some(keyword) = &self.keyword
            && !Self::matches_keyword(cert, keyword)
        {
            return false;
        }

        if let Some(signature) = &self.signature
            && !Self::matches_signature(cert, signature)
        {
            return false;
        }

        true
    }

    /// Case-insensitive match against issuer, organization and domains
    fn matches_keyword(cert: &Certificate, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();

        cert.issuer.to_lowercase().contains(&keyword)
            || cert.organization.to_lowercase().contains(&keyword)
            || cert
                .domains
                .iter()
                .any(|d| d.to_lowercase().contains(&keyword))
    }

    fn matches_signature(cert: &Certificate, signature: &str) -> bool {
        if cert.signature_algorithm.is_empty() {
            return false;
        }

        cert.signature_algorithm
            .to_lowercase()
            .contains(&signature.to_lowercase())
    }
}
