// Verification Status - Tri-state verdict and its aggregation rule

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Verdict returned by a checker
///
/// Ordered for aggregation: `Passed > Uncertain > Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    /// The trust source vouches for the certificate
    Passed,
    /// The trust source answered and does not know the certificate
    Failed,
    /// The trust source could not be consulted
    Uncertain,
}

impl VerificationStatus {
    pub fn all() -> [VerificationStatus; 3] {
        [
            VerificationStatus::Passed,
            VerificationStatus::Failed,
            VerificationStatus::Uncertain,
        ]
    }

    /// Stable machine-readable label, identical to the serde representation
    pub fn label(&self) -> &'static str {
        match self {
            VerificationStatus::Passed => "passed",
            VerificationStatus::Failed => "failed",
            VerificationStatus::Uncertain => "uncertain",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            VerificationStatus::Failed => 0,
            VerificationStatus::Uncertain => 1,
            VerificationStatus::Passed => 2,
        }
    }

    /// Combine two verdicts, keeping the stronger one
    pub fn combine(self, other: VerificationStatus) -> VerificationStatus {
        self.max(other)
    }

    /// Overall verdict for one certificate
    ///
    /// `Passed` if any checker passed, else `Uncertain` if any checker was
    /// uncertain, else `Failed`. An empty input has no evidence either way and
    /// yields `Uncertain`.
    pub fn overall<I>(statuses: I) -> VerificationStatus
    where
        I: IntoIterator<Item = VerificationStatus>,
    {
        statuses
            .into_iter()
            .reduce(VerificationStatus::combine)
            .unwrap_or(VerificationStatus::Uncertain)
    }
}

impl Ord for VerificationStatus {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for VerificationStatus {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            VerificationStatus::Passed => "Passed",
            VerificationStatus::Failed => "Failed",
            VerificationStatus::Uncertain => "Uncertain",
        };
        f.write_str(label)
    }
}

impl FromStr for VerificationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "passed" => Ok(VerificationStatus::Passed),
            "failed" => Ok(VerificationStatus::Failed),
            "uncertain" => Ok(VerificationStatus::Uncertain),
            other => Err(format!("Unknown verification status: {}", other)),
        }
    }
}
