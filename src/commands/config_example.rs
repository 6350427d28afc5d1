// ConfigExampleCommand - Writes an example TOML configuration
// Copyright (C) 2025 CertTrust Team
// Licensed under GPL-3.0

use super::Command;
use crate::Result;
use crate::config::TrustConfig;
use async_trait::async_trait;
use std::path::PathBuf;

pub struct ConfigExampleCommand {
    path: PathBuf,
}

impl ConfigExampleCommand {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl Command for ConfigExampleCommand {
    async fn execute(&self) -> Result<()> {
        TrustConfig::create_example(&self.path)?;
        println!(
            "✓ Example configuration saved to: {}",
            self.path.display()
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "ConfigExampleCommand"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_writes_loadable_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("example.toml");

        ConfigExampleCommand::new(path.clone()).execute().await.unwrap();

        let config = TrustConfig::from_file(&path).unwrap();
        assert_eq!(config, TrustConfig::default());
    }
}
