// Verification Configuration

use crate::error::TrustError;
use crate::verification::crtsh::{CRTSH_ENDPOINT, CertificateTransparencyChecker};
use crate::verification::http::{DEFAULT_USER_AGENT, HttpClient, ReqwestHttpClient};
use crate::verification::root_list::{MOZILLA_ROOTS_CSV_ENDPOINT, TrustedRootListChecker};
use crate::verification::Checker;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Checker name accepted in `checkers` for the crt.sh lookup
pub const CRTSH_CHECKER: &str = "crt.sh";

/// Checker name accepted in `checkers` for the Mozilla root list
pub const MOZILLA_CHECKER: &str = "mozilla";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrustConfig {
    /// crt.sh search endpoint
    pub crtsh_endpoint: String,

    /// CSV report of trusted root certificates
    pub root_list_endpoint: String,

    /// HTTP request timeout in seconds
    pub timeout_seconds: u64,

    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Checkers to run, in order
    pub checkers: Vec<String>,
}

impl Default for TrustConfig {
    fn default() -> Self {
        Self {
            crtsh_endpoint: CRTSH_ENDPOINT.to_string(),
            root_list_endpoint: MOZILLA_ROOTS_CSV_ENDPOINT.to_string(),
            timeout_seconds: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            checkers: vec![CRTSH_CHECKER.to_string(), MOZILLA_CHECKER.to_string()],
        }
    }
}

impl TrustConfig {
    /// Create config from file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: TrustConfig = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Create example config file
    pub fn create_example(path: &Path) -> anyhow::Result<()> {
        let config = Self::default();
        let toml = toml::to_string_pretty(&config)?;
        std::fs::write(path, toml)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn validate(&self) -> Result<(), TrustError> {
        if self.timeout_seconds == 0 {
            return Err(TrustError::config("timeout_seconds must be greater than zero"));
        }
        if self.checkers.is_empty() {
            return Err(TrustError::NoCheckers);
        }
        for name in &self.checkers {
            Self::canonical_checker(name)?;
        }
        Ok(())
    }

    fn canonical_checker(name: &str) -> Result<&'static str, TrustError> {
        match name.trim().to_lowercase().as_str() {
            "crt.sh" | "crtsh" | "ct" => Ok(CRTSH_CHECKER),
            "mozilla" | "ccadb" => Ok(MOZILLA_CHECKER),
            other => Err(TrustError::config(format!(
                "Unknown checker '{}' (expected one of: {}, {})",
                other, CRTSH_CHECKER, MOZILLA_CHECKER
            ))),
        }
    }

    /// HTTP client honouring the configured timeout and user agent
    pub fn http_client(&self) -> Result<Arc<dyn HttpClient>, TrustError> {
        let client = ReqwestHttpClient::new(self.timeout(), &self.user_agent)?;
        Ok(Arc::new(client))
    }

    /// Instantiate the configured checkers in order, sharing `client`
    pub fn build_checkers(&self, client: Arc<dyn HttpClient>) -> Result<Vec<Arc<dyn Checker>>, TrustError> {
        self.validate()?;

        let mut checkers: Vec<Arc<dyn Checker>> = Vec::with_capacity(self.checkers.len());
        for name in &self.checkers {
            let checker: Arc<dyn Checker> = match Self::canonical_checker(name)? {
                CRTSH_CHECKER => Arc::new(CertificateTransparencyChecker::with_endpoint(
                    Arc::clone(&client),
                    &self.crtsh_endpoint,
                )),
                _ => Arc::new(TrustedRootListChecker::with_endpoint(
                    Arc::clone(&client),
                    &self.root_list_endpoint,
                )),
            };
            checkers.push(checker);
        }

        Ok(checkers)
    }
}
