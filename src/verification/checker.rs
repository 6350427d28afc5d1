// Checker trait - Interface shared by every trust source

use super::status::VerificationStatus;
use crate::certificates::Certificate;
use async_trait::async_trait;

/// A pluggable trust source
///
/// Implementations must be total: network errors, parse errors and missing
/// certificate data all resolve to [`VerificationStatus::Uncertain`] inside
/// `verify`. Callers never see an error from a checker.
#[async_trait]
pub trait Checker: Send + Sync {
    /// Stable identifier, used as the result key and the table column title
    fn name(&self) -> &str;

    /// Decide whether this trust source vouches for `certificate`
    async fn verify(&self, certificate: &Certificate) -> VerificationStatus;
}
