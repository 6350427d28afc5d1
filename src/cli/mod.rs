// CLI module - Command line interface and argument parsing
// Copyright (C) 2025 CertTrust Team
// Licensed under GPL-3.0

use clap::Parser;
use std::path::PathBuf;

mod certificate_filter_args;
mod output_args;
mod verification_args;

pub use certificate_filter_args::CertificateFilterArgs;
pub use output_args::OutputArgs;
pub use verification_args::VerificationArgs;

/// CertTrust - List system root certificates and check them against public trust sources
///
/// The Args struct composes the domain-specific argument groups with
/// `#[command(flatten)]`:
/// - Certificate selection (CertificateFilterArgs)
/// - Output format and logging (OutputArgs)
/// - Trust verification and configuration (VerificationArgs)
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, long_about = None)]
#[command(name = "certtrust")]
#[command(about = "List system root certificates and verify them against CT logs and trusted root lists")]
pub struct Args {
    /// PEM bundle to read (default: the system CA bundle, or $SSL_CERT_FILE)
    #[arg(long = "bundle", value_name = "FILE")]
    pub bundle: Option<PathBuf>,

    #[command(flatten)]
    pub filter: CertificateFilterArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub verification: VerificationArgs,
}

impl Args {
    /// Validate CLI arguments for logical consistency
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.verification.timeout == Some(0) {
            anyhow::bail!("--timeout must be at least 1 second");
        }

        if !self.verification.verify
            && (!self.verification.checkers.is_empty() || self.verification.timeout.is_some())
        {
            anyhow::bail!("--checker and --timeout only apply together with --verify");
        }

        Ok(())
    }
}
