// Verification arguments

use crate::config::TrustConfig;
use clap::Args;
use std::path::PathBuf;

/// Trust verification options
#[derive(Args, Debug, Clone, Default)]
pub struct VerificationArgs {
    /// Check every certificate against the configured trust sources
    #[arg(short = 'c', long = "verify")]
    pub verify: bool,

    /// TOML configuration file
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write an example configuration file and exit
    #[arg(long = "config-example", value_name = "FILE")]
    pub config_example: Option<PathBuf>,

    /// HTTP request timeout in seconds
    #[arg(long = "timeout", value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Checker to run (repeatable, in order): crt.sh, mozilla
    #[arg(long = "checker", value_name = "NAME")]
    pub checkers: Vec<String>,
}

impl VerificationArgs {
    /// Load the configuration file (or defaults) and apply command line overrides
    pub fn load_config(&self) -> anyhow::Result<TrustConfig> {
        let mut config = match &self.config {
            Some(path) => TrustConfig::from_file(path)?,
            None => TrustConfig::default(),
        };
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut TrustConfig) {
        if let Some(timeout) = self.timeout {
            config.timeout_seconds = timeout;
        }
        if !self.checkers.is_empty() {
            config.checkers = self.checkers.clone();
        }
    }
}
