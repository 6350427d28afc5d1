// Certificate Verifier - Runs every checker against a batch of certificates
//
// Certificates are processed in batch order and checkers in configured order.
// Each (certificate, checker) pair emits a "started" and a "finished" progress
// message, so a sink sees a strictly ordered stream for the whole run.

use super::checker::Checker;
use super::status::VerificationStatus;
use crate::certificates::Certificate;
use crate::error::TrustError;
use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Receiver for line-overwrite progress text
pub trait ProgressSink: Send + Sync {
    /// Replace the current progress line with `message`
    fn overwrite(&self, message: &str);

    /// Leave the final message visible and stop updating
    fn finish(&self, message: &str) {
        self.overwrite(message);
    }

    /// Run `f` while the progress line is hidden, so it can write to the terminal
    fn suspend(&self, f: &mut dyn FnMut()) {
        f();
    }
}

/// Sink that drops every update
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgress;

impl ProgressSink for SilentProgress {
    fn overwrite(&self, _message: &str) {}
}

/// Per-certificate callback fired once all checkers have run on it
pub trait VerificationObserver: Send {
    fn on_certificate_verified(
        &mut self,
        index: usize,
        certificate: &Certificate,
        results: &CheckerResults,
    );
}

/// Statuses for one certificate, in configured checker order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckerResults {
    entries: Vec<(String, VerificationStatus)>,
}

impl CheckerResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a checker's verdict; returns false if that checker was already recorded
    pub fn record(&mut self, checker: impl Into<String>, status: VerificationStatus) -> bool {
        let checker = checker.into();
        if self.entries.iter().any(|(name, _)| *name == checker) {
            return false;
        }
        self.entries.push((checker, status));
        true
    }

    pub fn get(&self, checker: &str) -> Option<VerificationStatus> {
        self.entries
            .iter()
            .find(|(name, _)| name == checker)
            .map(|(_, status)| *status)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, VerificationStatus)> {
        self.entries
            .iter()
            .map(|(name, status)| (name.as_str(), *status))
    }

    pub fn overall(&self) -> VerificationStatus {
        VerificationStatus::overall(self.entries.iter().map(|(_, status)| *status))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Certificate fingerprint (SHA-1, lower-case hex) to per-checker results
pub type VerificationResults = HashMap<String, CheckerResults>;

/// Runs a fixed, ordered set of checkers over certificate batches
pub struct CertificateVerifier {
    checkers: Vec<Arc<dyn Checker>>,
}

impl CertificateVerifier {
    pub fn new(checkers: Vec<Arc<dyn Checker>>) -> Result<Self, TrustError> {
        if checkers.is_empty() {
            return Err(TrustError::NoCheckers);
        }

        let mut seen = HashSet::new();
        for checker in &checkers {
            if !seen.insert(checker.name().to_string()) {
                return Err(TrustError::config(format!(
                    "Checker '{}' is configured more than once",
                    checker.name()
                )));
            }
        }

        Ok(Self { checkers })
    }

    pub fn checker_names(&self) -> Vec<String> {
        self.checkers.iter().map(|c| c.name().to_string()).collect()
    }

    /// Verify a batch without progress output
    pub async fn verify(&self, certificates: &[Certificate]) -> VerificationResults {
        self.verify_with_progress(certificates, &SilentProgress, None)
            .await
    }

    /// Verify a batch, reporting progress and finished rows as they happen
    ///
    /// A fingerprint appearing twice in the batch keeps the results of its first
    /// occurrence; later occurrences are still verified and reported.
    pub async fn verify_with_progress(
        &self,
        certificates: &[Certificate],
        progress: &dyn ProgressSink,
        mut observer: Option<&mut dyn VerificationObserver>,
    ) -> VerificationResults {
        let total = certificates.len();
        let mut results = VerificationResults::with_capacity(total);

        info!(
            certificates = total,
            checkers = self.checkers.len(),
            "Starting verification run"
        );

        for (index, certificate) in certificates.iter().enumerate() {
            let cert_results = self.verify_certificate(certificate, index, total, progress).await;

            progress.overwrite(&format!(
                "Verified [{}/{}] {} - {}",
                index + 1,
                total,
                certificate.display_name(),
                cert_results.overall()
            ));

            if let Some(observer) = observer.as_deref_mut() {
                progress.suspend(&mut || {
                    observer.on_certificate_verified(index, certificate, &cert_results)
                });
            }

            if results.contains_key(&certificate.fingerprint) {
                debug!(
                    fingerprint = %certificate.fingerprint,
                    "Duplicate certificate in batch, keeping first result"
                );
            } else {
                results.insert(certificate.fingerprint.clone(), cert_results);
            }
        }

        progress.finish("Verification complete!");

        info!(certificates = results.len(), "Verification run finished");

        results
    }

    async fn verify_certificate(
        &self,
        certificate: &Certificate,
        index: usize,
        total: usize,
        progress: &dyn ProgressSink,
    ) -> CheckerResults {
        let name = certificate.display_name();
        let mut cert_results = CheckerResults::new();

        for checker in &self.checkers {
            let checker_name = checker.name();

            progress.overwrite(&format!(
                "Verifying [{}/{}] {} - using {} checker",
                index + 1,
                total,
                name,
                checker_name
            ));

            let status = checker.verify(certificate).await;
            cert_results.record(checker_name, status);

            progress.overwrite(&format!(
                "Verifying [{}/{}] {} - {}: {}",
                index + 1,
                total,
                name,
                checker_name,
                status
            ));
        }

        cert_results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FixedChecker {
        name: &'static str,
        status: VerificationStatus,
    }

    #[async_trait]
    impl Checker for FixedChecker {
        fn name(&self) -> &str {
            self.name
        }

        async fn verify(&self, _certificate: &Certificate) -> VerificationStatus {
            self.status
        }
    }

    fn fixed(name: &'static str, status: VerificationStatus) -> Arc<dyn Checker> {
        Arc::new(FixedChecker { name, status })
    }

    #[derive(Default)]
    struct RecordingProgress {
        messages: Mutex<Vec<String>>,
    }

    impl ProgressSink for RecordingProgress {
        fn overwrite(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    #[derive(Default)]
    struct RecordingObserver {
        rows: Vec<(usize, String, VerificationStatus)>,
    }

    impl VerificationObserver for RecordingObserver {
        fn on_certificate_verified(
            &mut self,
            index: usize,
            certificate: &Certificate,
            results: &CheckerResults,
        ) {
            self.rows
                .push((index, certificate.domain.clone(), results.overall()));
        }
    }

    fn certificate(domain: &str, fingerprint: &str) -> Certificate {
        Certificate {
            domain: domain.to_string(),
            fingerprint: fingerprint.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_checkers_is_an_error() {
        assert!(matches!(
            CertificateVerifier::new(Vec::new()),
            Err(TrustError::NoCheckers)
        ));
    }

    #[test]
    fn test_duplicate_checker_names_rejected() {
        let result = CertificateVerifier::new(vec![
            fixed("crt.sh", VerificationStatus::Passed),
            fixed("crt.sh", VerificationStatus::Failed),
        ]);
        assert!(matches!(result, Err(TrustError::Config { .. })));
    }

    #[test]
    fn test_checker_results_record_once() {
        let mut results = CheckerResults::new();
        assert!(results.record("a", VerificationStatus::Failed));
        assert!(!results.record("a", VerificationStatus::Passed));
        assert_eq!(results.get("a"), Some(VerificationStatus::Failed));
        assert_eq!(results.get("b"), None);
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_progress_messages_are_ordered() {
        let verifier = CertificateVerifier::new(vec![
            fixed("crt.sh", VerificationStatus::Failed),
            fixed("Mozilla", VerificationStatus::Passed),
        ])
        .unwrap();
        let progress = RecordingProgress::default();
        let certs = vec![certificate("a.test", "01"), certificate("b.test", "02")];

        verifier.verify_with_progress(&certs, &progress, None).await;

        let messages = progress.messages.lock().unwrap();
        assert_eq!(
            *messages,
            vec![
                "Verifying [1/2] a.test - using crt.sh checker",
                "Verifying [1/2] a.test - crt.sh: Failed",
                "Verifying [1/2] a.test - using Mozilla checker",
                "Verifying [1/2] a.test - Mozilla: Passed",
                "Verified [1/2] a.test - Passed",
                "Verifying [2/2] b.test - using crt.sh checker",
                "Verifying [2/2] b.test - crt.sh: Failed",
                "Verifying [2/2] b.test - using Mozilla checker",
                "Verifying [2/2] b.test - Mozilla: Passed",
                "Verified [2/2] b.test - Passed",
                "Verification complete!",
            ]
        );
    }

    #[tokio::test]
    async fn test_results_keyed_by_fingerprint_in_checker_order() {
        let verifier = CertificateVerifier::new(vec![
            fixed("crt.sh", VerificationStatus::Uncertain),
            fixed("Mozilla", VerificationStatus::Failed),
        ])
        .unwrap();
        let certs = vec![certificate("a.test", "01")];

        let results = verifier.verify(&certs).await;

        let cert_results = &results["01"];
        let order: Vec<&str> = cert_results.iter().map(|(name, _)| name).collect();
        assert_eq!(order, vec!["crt.sh", "Mozilla"]);
        assert_eq!(cert_results.overall(), VerificationStatus::Uncertain);
        assert_eq!(verifier.checker_names(), vec!["crt.sh", "Mozilla"]);
    }

    #[tokio::test]
    async fn test_observer_sees_every_certificate() {
        let verifier =
            CertificateVerifier::new(vec![fixed("only", VerificationStatus::Failed)]).unwrap();
        let certs = vec![
            certificate("a.test", "01"),
            certificate("b.test", "02"),
            certificate("a-again.test", "01"),
        ];
        let mut observer = RecordingObserver::default();

        let results = verifier
            .verify_with_progress(&certs, &SilentProgress, Some(&mut observer))
            .await;

        assert_eq!(observer.rows.len(), 3);
        assert_eq!(observer.rows[2], (2, "a-again.test".to_string(), VerificationStatus::Failed));
        // Duplicate fingerprint keeps a single entry
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn test_repeated_runs_are_identical() {
        let verifier = CertificateVerifier::new(vec![
            fixed("crt.sh", VerificationStatus::Passed),
            fixed("Mozilla", VerificationStatus::Failed),
        ])
        .unwrap();
        let certs = vec![certificate("a.test", "01"), certificate("b.test", "02")];

        let first = verifier.verify(&certs).await;
        let second = verifier.verify(&certs).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_empty_batch_still_completes() {
        let verifier =
            CertificateVerifier::new(vec![fixed("only", VerificationStatus::Passed)]).unwrap();
        let progress = RecordingProgress::default();

        let results = verifier.verify_with_progress(&[], &progress, None).await;

        assert!(results.is_empty());
        assert_eq!(
            *progress.messages.lock().unwrap(),
            vec!["Verification complete!"]
        );
    }
}
