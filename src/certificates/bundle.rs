// CA Bundle Loader - Locate the system CA bundle and split it into certificates

use super::parser::Certificate;
use crate::Result;
use crate::error::TrustError;
use lazy_static::lazy_static;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::debug;

lazy_static! {
    static ref PEM_BLOCK: Regex =
        Regex::new(r"-----BEGIN CERTIFICATE-----[\s\S]*?-----END CERTIFICATE-----")
            .expect("PEM block pattern is valid");
}

/// Well-known CA bundle locations, most common first
const SYSTEM_BUNDLE_PATHS: &[&str] = &[
    "/etc/ssl/certs/ca-certificates.crt", // Debian, Ubuntu, Arch, Gentoo
    "/etc/pki/tls/certs/ca-bundle.crt",   // Fedora, RHEL 6
    "/etc/pki/ca-trust/extracted/pem/tls-ca-bundle.pem", // RHEL 7+
    "/etc/ssl/ca-bundle.pem",             // openSUSE
    "/etc/pki/tls/cacert.pem",            // OpenELEC
    "/etc/ssl/cert.pem",                  // macOS, Alpine, FreeBSD
    "/usr/local/share/certs/ca-root-nss.crt", // FreeBSD ports
    "/usr/local/etc/openssl/cert.pem",    // Homebrew
];

/// Resolve the system CA bundle path
///
/// `SSL_CERT_FILE` wins when it points at an existing file, otherwise the
/// first existing well-known location is used.
pub fn system_bundle_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("SSL_CERT_FILE")
        && !path.is_empty()
        && Path::new(&path).is_file()
    {
        return Some(PathBuf::from(path));
    }

    SYSTEM_BUNDLE_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
}

/// Split a PEM bundle into its `CERTIFICATE` blocks, in file order
pub fn split_pem_bundle(contents: &str) -> Vec<String> {
    PEM_BLOCK
        .find_iter(contents)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Parse every block, skipping the ones that are not valid certificates
pub fn parse_certificates(blocks: &[String]) -> Vec<Certificate> {
    blocks
        .iter()
        .enumerate()
        .filter_map(|(idx, block)| match Certificate::from_pem(block) {
            Ok(cert) => Some(cert),
            Err(e) => {
                debug!(index = idx, error = %e, "Skipping unparseable certificate block");
                None
            }
        })
        .collect()
}

/// Read a bundle file and return its PEM blocks
pub fn load_bundle(path: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path).map_err(|source| TrustError::FileSystem {
        path: path.display().to_string(),
        source,
    })?;

    Ok(split_pem_bundle(&contents))
}
