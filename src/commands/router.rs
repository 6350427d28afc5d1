// CommandRouter - Routes CLI arguments to appropriate Command
// Copyright (C) 2025 CertTrust Team
// Licensed under GPL-3.0

use super::{Command, ConfigExampleCommand, ListCertsCommand};
use crate::{Args, Result};

/// CommandRouter determines which Command to execute based on CLI arguments
///
/// Routing priority:
/// 1. Example configuration (--config-example)
/// 2. Certificate listing (default)
pub struct CommandRouter;

impl CommandRouter {
    pub fn route(args: Args) -> Result<Box<dyn Command>> {
        if let Some(path) = &args.verification.config_example {
            return Ok(Box::new(ConfigExampleCommand::new(path.clone())));
        }

        args.validate()?;
        Ok(Box::new(ListCertsCommand::new(args)))
    }
}
