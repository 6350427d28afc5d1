// Command trait - Defines the interface for all command implementations
// Copyright (C) 2025 CertTrust Team
// Licensed under GPL-3.0

use crate::Result;
use async_trait::async_trait;

/// Command trait - Defines the interface for all command implementations
///
/// Each operational mode of the binary is a command object. `main` builds
/// one through the router and executes it.
#[async_trait]
pub trait Command: Send + Sync {
    /// Execute the command asynchronously
    ///
    /// # Errors
    /// Unreadable input files and invalid configuration are returned as
    /// errors. Unreachable trust sources are not: they show up as
    /// `Uncertain` results.
    async fn execute(&self) -> Result<()>;

    /// Get a human-readable name for this command (for logging/debugging)
    fn name(&self) -> &'static str;
}
