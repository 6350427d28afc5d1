// CertTrust - List system root certificates and verify them against public trust sources
// Copyright (C) 2025 CertTrust Team
// Licensed under GPL-3.0

//! CertTrust reads a PEM bundle of root certificates, filters it, and checks
//! each certificate against independent trust sources: the crt.sh Certificate
//! Transparency search and the Mozilla/CCADB list of included roots. Per-source
//! verdicts are reduced to one overall verdict per certificate.

pub mod certificates;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod verification;

// Re-export commonly used types
pub use crate::certificates::{Certificate, CertificateFilter};
pub use crate::cli::Args;
pub use crate::config::TrustConfig;
pub use crate::error::TrustError;
pub use crate::output::OutputFormat;
pub use crate::verification::{CertificateVerifier, Checker, VerificationStatus};

/// Result type for CertTrust operations
pub type Result<T> = anyhow::Result<T>;

/// Error type for CertTrust operations
pub use anyhow::Error;
