// Certificate filter arguments

use crate::certificates::CertificateFilter;
use clap::Args;

/// Certificate selection options
///
/// Filters combine with AND. Expired certificates are hidden unless
/// `--show-expired` is given.
#[derive(Args, Debug, Clone, Default)]
pub struct CertificateFilterArgs {
    /// Keep certificates whose issuer, organization or domains contain KEYWORD
    #[arg(short = 'k', long = "keyword", value_name = "KEYWORD")]
    pub keyword: Option<String>,

    /// Keep certificates whose signature algorithm contains ALGORITHM (e.g. sha256)
    #[arg(short = 's', long = "signature", value_name = "ALGORITHM")]
    pub signature: Option<String>,

    /// Include expired certificates
    #[arg(long = "show-expired")]
    pub show_expired: bool,
}

impl CertificateFilterArgs {
    pub fn to_filter(&self) -> CertificateFilter {
        CertificateFilter::new(
            self.keyword.clone(),
            self.signature.clone(),
            self.show_expired,
        )
    }

    /// Check if any narrowing filter is active
    pub fn has_filters(&self) -> bool {
        self.keyword.as_deref().is_some_and(|k| !k.is_empty())
            || self.signature.as_deref().is_some_and(|s| !s.is_empty())
    }
}
