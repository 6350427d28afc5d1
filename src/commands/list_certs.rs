// ListCertsCommand - List, filter and optionally verify system root certificates
// Copyright (C) 2025 CertTrust Team
// Licensed under GPL-3.0

use super::Command;
use crate::certificates::{Certificate, bundle};
use crate::output::json::generate_json;
use crate::output::{OutputFormat, SpinnerProgress, StreamingTable, TableFormatter};
use crate::verification::{CertificateVerifier, HttpClient, ProgressSink, SilentProgress};
use crate::{Args, Result};
use async_trait::async_trait;
use colored::*;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// ListCertsCommand handles the certificate listing workflow
///
/// This command is responsible for:
/// - Locating and reading the PEM bundle
/// - Parsing and filtering certificates
/// - Running the configured checkers when `--verify` is given
/// - Rendering the result as a table or JSON
pub struct ListCertsCommand {
    args: Args,
    http_client: Option<Arc<dyn HttpClient>>,
    interactive: bool,
}

impl ListCertsCommand {
    /// Create a new ListCertsCommand with the given arguments
    pub fn new(args: Args) -> Self {
        Self {
            args,
            http_client: None,
            interactive: io::stderr().is_terminal(),
        }
    }

    /// Use `client` instead of building one from the configuration
    pub fn with_http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Never draw a progress spinner
    pub fn non_interactive(mut self) -> Self {
        self.interactive = false;
        self
    }

    fn is_json(&self) -> bool {
        self.args.output.format == OutputFormat::Json
    }

    fn bundle_path(&self) -> Result<PathBuf> {
        self.args
            .bundle
            .clone()
            .or_else(bundle::system_bundle_path)
            .ok_or_else(|| {
                anyhow::anyhow!("Unable to locate the system root certificate bundle (use --bundle)")
            })
    }

    /// Status lines go to the output in table mode and to the log in JSON mode
    fn status<W: Write>(&self, out: &mut W, message: &str) -> Result<()> {
        if self.is_json() {
            info!("{}", message);
        } else {
            writeln!(out, "{}", message)?;
        }
        Ok(())
    }

    fn load_certificates<W: Write>(&self, out: &mut W) -> Result<Vec<Certificate>> {
        let path = self.bundle_path()?;
        let blocks = bundle::load_bundle(&path)?;

        if !self.is_json() {
            writeln!(out, "{}", "System Root Certificates".cyan().bold())?;
        }
        self.status(out, &format!("Certificate store: {}", path.display()))?;
        self.status(out, &format!("Found {} certificates", blocks.len()))?;

        let certificates = bundle::parse_certificates(&blocks);
        let filtered = self.args.filter.to_filter().apply(certificates);

        self.status(out, &format!("{} certificates after filtering", filtered.len()))?;

        Ok(filtered)
    }

    fn verifier(&self) -> Result<CertificateVerifier> {
        let config = self.args.verification.load_config()?;
        let client = match &self.http_client {
            Some(client) => Arc::clone(client),
            None => config.http_client()?,
        };
        let checkers = config.build_checkers(client)?;
        Ok(CertificateVerifier::new(checkers)?)
    }

    fn progress_sink(&self) -> Box<dyn ProgressSink> {
        if self.interactive {
            Box::new(SpinnerProgress::new())
        } else {
            Box::new(SilentProgress)
        }
    }

    /// Run the whole workflow, writing the listing to `out`
    pub async fn run<W: Write + Send>(&self, out: &mut W) -> Result<()> {
        let certificates = self.load_certificates(out)?;

        if certificates.is_empty() {
            if self.is_json() {
                writeln!(out, "[]")?;
            } else {
                writeln!(out, "{}", "No matching certificates found".yellow())?;
            }
            return Ok(());
        }

        if !self.args.verification.verify {
            if self.is_json() {
                let json = generate_json(&certificates, None, self.args.output.pretty_json())?;
                writeln!(out, "{}", json)?;
            } else {
                let table = TableFormatter::new(&certificates);
                writeln!(out, "{}", table.render(&certificates, None))?;
            }
            return Ok(());
        }

        let verifier = self.verifier()?;

        if self.is_json() {
            let progress = self.progress_sink();
            let results = verifier
                .verify_with_progress(&certificates, progress.as_ref(), None)
                .await;
            let json = generate_json(&certificates, Some(&results), self.args.output.pretty_json())?;
            writeln!(out, "{}", json)?;
        } else {
            let formatter = TableFormatter::with_checkers(&certificates, verifier.checker_names());
            let mut table = StreamingTable::begin(formatter, &mut *out)?;
            let progress = self.progress_sink();
            verifier
                .verify_with_progress(&certificates, progress.as_ref(), Some(&mut table))
                .await;
            table.finish()?;
        }

        Ok(())
    }
}

#[async_trait]
impl Command for ListCertsCommand {
    async fn execute(&self) -> Result<()> {
        let mut stdout = io::stdout();
        self.run(&mut stdout).await
    }

    fn name(&self) -> &'static str {
        "ListCertsCommand"
    }
}
