// Certificate Transparency checker - crt.sh fingerprint lookup
//
// crt.sh indexes the public CT logs. A certificate whose fingerprint returns a
// result page (recognised by the "crt.sh ID" column) has been logged.

use super::checker::Checker;
use super::http::{HttpClient, elapsed_ms};
use super::status::VerificationStatus;
use crate::certificates::Certificate;
use crate::error::TrustError;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

/// Public crt.sh search endpoint
pub const CRTSH_ENDPOINT: &str = "https://crt.sh/";

/// Substring present on result pages only
const FOUND_MARKER: &str = "crt.sh ID";

/// Certificate Transparency checker backed by crt.sh
pub struct CertificateTransparencyChecker {
    client: Arc<dyn HttpClient>,
    endpoint: String,
}

impl CertificateTransparencyChecker {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self::with_endpoint(client, CRTSH_ENDPOINT)
    }

    pub fn with_endpoint(client: Arc<dyn HttpClient>, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn lookup(&self, fingerprint: &str) -> Result<VerificationStatus, TrustError> {
        let fingerprint = fingerprint.trim();
        if fingerprint.is_empty() {
            return Err(TrustError::invalid_input("Certificate fingerprint is empty"));
        }

        let started = Instant::now();

        info!(
            method = "GET",
            url = %self.endpoint,
            fingerprint,
            "crt.sh HTTP request started"
        );

        let response = self.client.get(&self.endpoint, &[("q", fingerprint)]).await?;
        let elapsed_ms = elapsed_ms(started);

        info!(
            status_code = response.status,
            elapsed_ms,
            fingerprint,
            "crt.sh HTTP response received"
        );

        if !response.is_ok() {
            return Err(TrustError::HttpStatus {
                status: response.status,
                url: self.endpoint.clone(),
            });
        }

        let found = response.body.contains(FOUND_MARKER);
        let status = if found {
            VerificationStatus::Passed
        } else {
            VerificationStatus::Failed
        };

        info!(
            fingerprint,
            status = status.label(),
            found,
            elapsed_ms,
            response_size = response.body.len(),
            "crt.sh verification completed"
        );

        Ok(status)
    }
}

#[async_trait]
impl Checker for CertificateTransparencyChecker {
    fn name(&self) -> &str {
        "crt.sh"
    }

    async fn verify(&self, certificate: &Certificate) -> VerificationStatus {
        let fingerprint = certificate.fingerprint.as_str();

        match self.lookup(fingerprint).await {
            Ok(status) => status,
            Err(e @ TrustError::InvalidInput { .. }) => {
                info!(
                    domain = %certificate.domain,
                    issuer = %certificate.issuer,
                    error = %e,
                    "Skipping crt.sh lookup"
                );
                VerificationStatus::Uncertain
            }
            Err(e @ TrustError::HttpStatus { .. }) => {
                warn!(fingerprint, error = %e, "crt.sh returned a non-200 status code");
                VerificationStatus::Uncertain
            }
            Err(e) => {
                error!(fingerprint, error = %e, "crt.sh request failed");
                VerificationStatus::Uncertain
            }
        }
    }
}
