// Trusted Root List checker - Mozilla/CCADB root fingerprint membership
//
// The CCADB publishes the roots included in the Mozilla trust store as CSV. The
// list is downloaded once per checker, reduced to a set of normalized SHA-256
// fingerprints, and reused for every certificate the checker sees.

use super::checker::Checker;
use super::http::{HttpClient, elapsed_ms};
use super::status::VerificationStatus;
use crate::certificates::Certificate;
use crate::error::TrustError;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::OnceCell;
use tracing::{debug, error, info, warn};

/// CCADB report of the roots included in the Mozilla trust store
pub const MOZILLA_ROOTS_CSV_ENDPOINT: &str =
    "https://ccadb.my.salesforce-sites.com/mozilla/IncludedCACertificateReportPEMCSV";

/// Lower-cased header substring identifying the fingerprint column
const FINGERPRINT_COLUMN: &str = "sha-256 fingerprint";

/// Lower-case a fingerprint and strip `:` separators and spaces
pub fn normalize_fingerprint(fingerprint: &str) -> String {
    fingerprint
        .trim()
        .chars()
        .filter(|c| *c != ':' && *c != ' ')
        .collect::<String>()
        .to_lowercase()
}

/// Extract the normalized fingerprint set from the CSV report
///
/// The first record is the header; the fingerprint column is the first one whose
/// title contains "SHA-256 Fingerprint" (case-insensitive). Short rows, blank
/// values and unreadable rows are skipped. An empty result is an error.
pub fn parse_fingerprint_csv(content: &str) -> Result<HashSet<String>, TrustError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .escape(Some(b'\\'))
        .from_reader(content.as_bytes());
    let mut records = reader.records();

    let header = match records.next() {
        Some(record) => record?,
        None => return Err(TrustError::parse("Root list is empty")),
    };

    let column = header
        .iter()
        .position(|title| title.to_lowercase().contains(FINGERPRINT_COLUMN))
        .ok_or_else(|| TrustError::parse("No 'SHA-256 Fingerprint' column in root list header"))?;

    let mut fingerprints = HashSet::new();
    for (row, record) in records.enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                debug!(row = row + 1, error = %e, "Skipping unreadable root list row");
                continue;
            }
        };

        let Some(value) = record.get(column) else {
            continue;
        };

        let fingerprint = normalize_fingerprint(value);
        if !fingerprint.is_empty() {
            fingerprints.insert(fingerprint);
        }
    }

    if fingerprints.is_empty() {
        return Err(TrustError::parse("Root list contains no fingerprints"));
    }

    Ok(fingerprints)
}

/// Trusted root list checker
///
/// The fingerprint set is populated lazily on first use. Concurrent first uses
/// share a single download. A failed download is not remembered, so the next
/// verification tries again.
pub struct TrustedRootListChecker {
    client: Arc<dyn HttpClient>,
    endpoint: String,
    fingerprints: OnceCell<HashSet<String>>,
}

impl TrustedRootListChecker {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self::with_endpoint(client, MOZILLA_ROOTS_CSV_ENDPOINT)
    }

    pub fn with_endpoint(client: Arc<dyn HttpClient>, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            fingerprints: OnceCell::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The cached fingerprint set, if a download has succeeded
    pub fn cached_fingerprints(&self) -> Option<&HashSet<String>> {
        self.fingerprints.get()
    }

    /// Return the fingerprint set, downloading it on first use
    pub async fn root_fingerprints(&self) -> Result<&HashSet<String>, TrustError> {
        self.fingerprints
            .get_or_try_init(|| self.load_fingerprints())
            .await
    }

    async fn lookup(&self, certificate: &Certificate) -> Result<VerificationStatus, TrustError> {
        let fingerprint = normalize_fingerprint(&certificate.fingerprint_sha256);
        if fingerprint.is_empty() {
            return Err(TrustError::invalid_input(
                "Certificate SHA-256 fingerprint is empty",
            ));
        }

        let roots = self.root_fingerprints().await?;

        let found = roots.contains(&fingerprint);
        let status = if found {
            VerificationStatus::Passed
        } else {
            VerificationStatus::Failed
        };

        info!(
            fingerprint = %fingerprint,
            status = status.label(),
            found,
            total_root_certs = roots.len(),
            "Root list verification completed"
        );

        Ok(status)
    }

    async fn load_fingerprints(&self) -> Result<HashSet<String>, TrustError> {
        let started = Instant::now();

        info!(method = "GET", url = %self.endpoint, "Root list HTTP request started");

        let response = self.client.get(&self.endpoint, &[]).await?;
        let elapsed_ms = elapsed_ms(started);

        info!(
            status_code = response.status,
            elapsed_ms,
            "Root list HTTP response received"
        );

        if !response.is_ok() {
            return Err(TrustError::HttpStatus {
                status: response.status,
                url: self.endpoint.clone(),
            });
        }

        let fingerprints = parse_fingerprint_csv(&response.body)?;

        info!(
            elapsed_ms,
            content_size = response.body.len(),
            fingerprints_loaded = fingerprints.len(),
            "Root list loaded"
        );

        Ok(fingerprints)
    }
}

#[async_trait]
impl Checker for TrustedRootListChecker {
    fn name(&self) -> &str {
        "Mozilla"
    }

    async fn verify(&self, certificate: &Certificate) -> VerificationStatus {
        match self.lookup(certificate).await {
            Ok(status) => status,
            Err(e @ TrustError::InvalidInput { .. }) => {
                info!(
                    domain = %certificate.domain,
                    issuer = %certificate.issuer,
                    error = %e,
                    "Skipping root list lookup"
                );
                VerificationStatus::Uncertain
            }
            Err(e) if e.is_network() => {
                warn!(url = %self.endpoint, error = %e, "Failed to download root list");
                VerificationStatus::Uncertain
            }
            Err(e) => {
                error!(url = %self.endpoint, error = %e, "Failed to parse root list");
                VerificationStatus::Uncertain
            }
        }
    }
}
