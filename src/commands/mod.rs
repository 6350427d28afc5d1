// Commands module - Command Pattern implementation
// Copyright (C) 2025 CertTrust Team
// Licensed under GPL-3.0

mod command;
mod router;

mod config_example;
mod list_certs;

pub use command::Command;
pub use router::CommandRouter;

pub use config_example::ConfigExampleCommand;
pub use list_certs::ListCertsCommand;
