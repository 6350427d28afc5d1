// Table Output Module - Fixed-width certificate table with verification columns
//
// Column widths are computed from the whole batch before the first line is
// printed, so rows can be emitted one at a time while verification runs and
// still line up with the header.

use crate::certificates::Certificate;
use crate::verification::{CheckerResults, VerificationObserver, VerificationResults, VerificationStatus};
use colored::*;
use std::io::{self, Write};

const UNKNOWN: &str = "Unknown";
const DATE_FORMAT: &str = "%Y-%m-%d";

const BASE_HEADERS: [&str; 8] = [
    "#",
    "Organization",
    "Issuer",
    "Domain",
    "Fingerprint",
    "Valid From",
    "Valid To",
    "Signature Algorithm",
];

fn or_unknown(value: &str) -> &str {
    if value.is_empty() { UNKNOWN } else { value }
}

fn colorize_status(status: VerificationStatus, padded: String) -> String {
    match status {
        VerificationStatus::Passed => padded.green().to_string(),
        VerificationStatus::Failed => padded.red().to_string(),
        VerificationStatus::Uncertain => padded.yellow().to_string(),
    }
}

fn pad(value: &str, width: usize) -> String {
    let len = value.chars().count();
    format!("{}{}", value, " ".repeat(width.saturating_sub(len)))
}

/// Renders certificates as a bordered text table
#[derive(Debug, Clone)]
pub struct TableFormatter {
    checker_names: Vec<String>,
    with_verification: bool,
    widths: Vec<usize>,
}

impl TableFormatter {
    /// Table without verification columns
    pub fn new(certificates: &[Certificate]) -> Self {
        Self::build(certificates, Vec::new(), false)
    }

    /// Table with one column per checker plus the overall verdict
    pub fn with_checkers(certificates: &[Certificate], checker_names: Vec<String>) -> Self {
        Self::build(certificates, checker_names, true)
    }

    fn build(certificates: &[Certificate], checker_names: Vec<String>, with_verification: bool) -> Self {
        let mut formatter = Self {
            checker_names,
            with_verification,
            widths: Vec::new(),
        };

        let mut widths: Vec<usize> = formatter.headers().iter().map(|h| h.chars().count()).collect();

        for (index, cert) in certificates.iter().enumerate() {
            for (column, cell) in Self::base_cells(index, cert).iter().enumerate() {
                widths[column] = widths[column].max(cell.chars().count());
            }
        }

        if with_verification {
            let status_width = VerificationStatus::all()
                .iter()
                .map(|s| s.to_string().len())
                .max()
                .unwrap_or(0);
            for width in widths.iter_mut().skip(BASE_HEADERS.len()) {
                *width = (*width).max(status_width);
            }
        }

        formatter.widths = widths;
        formatter
    }

    pub fn headers(&self) -> Vec<String> {
        let mut headers: Vec<String> = BASE_HEADERS.iter().map(|h| h.to_string()).collect();
        if self.with_verification {
            for name in &self.checker_names {
                headers.push(format!("{} Verification", name));
            }
            headers.push("Overall".to_string());
        }
        headers
    }

    fn base_cells(index: usize, cert: &Certificate) -> Vec<String> {
        vec![
            (index + 1).to_string(),
            or_unknown(&cert.organization).to_string(),
            or_unknown(&cert.issuer).to_string(),
            cert.domain.clone(),
            cert.fingerprint.clone(),
            cert.valid_from.format(DATE_FORMAT).to_string(),
            cert.valid_to.format(DATE_FORMAT).to_string(),
            cert.signature_algorithm.clone(),
        ]
    }

    fn border(&self) -> String {
        let mut line = String::from("+");
        for width in &self.widths {
            line.push_str(&"-".repeat(width + 2));
            line.push('+');
        }
        line
    }

    fn line(&self, cells: &[String]) -> String {
        let mut line = String::from("|");
        for cell in cells {
            line.push(' ');
            line.push_str(cell);
            line.push_str(" |");
        }
        line
    }

    /// Top border, column titles and the separator below them
    pub fn header(&self) -> String {
        let cells: Vec<String> = self
            .headers()
            .iter()
            .zip(&self.widths)
            .map(|(h, w)| pad(h, *w).bold().to_string())
            .collect();

        format!("{}\n{}\n{}", self.border(), self.line(&cells), self.border())
    }

    pub fn footer(&self) -> String {
        self.border()
    }

    /// One table row; verification cells stay blank when `results` is `None`
    pub fn row(&self, index: usize, cert: &Certificate, results: Option<&CheckerResults>) -> String {
        let mut cells: Vec<String> = Self::base_cells(index, cert)
            .iter()
            .zip(&self.widths)
            .map(|(cell, width)| pad(cell, *width))
            .collect();

        if self.with_verification {
            let widths = &self.widths[BASE_HEADERS.len()..];
            let mut statuses: Vec<Option<VerificationStatus>> = self
                .checker_names
                .iter()
                .map(|name| results.map(|r| r.get(name).unwrap_or(VerificationStatus::Uncertain)))
                .collect();
            statuses.push(results.map(|r| r.overall()));

            for (status, width) in statuses.into_iter().zip(widths) {
                cells.push(match status {
                    Some(status) => colorize_status(status, pad(&status.to_string(), *width)),
                    None => pad("", *width),
                });
            }
        }

        self.line(&cells)
    }

    /// Render the full table for an already verified (or unverified) batch
    pub fn render(&self, certificates: &[Certificate], results: Option<&VerificationResults>) -> String {
        let mut out = self.header();
        for (index, cert) in certificates.iter().enumerate() {
            out.push('\n');
            let cert_results = results.and_then(|r| r.get(&cert.fingerprint));
            out.push_str(&self.row(index, cert, cert_results));
        }
        out.push('\n');
        out.push_str(&self.footer());

        if let Some(results) = results {
            let verified = certificates
                .iter()
                .filter(|c| results.contains_key(&c.fingerprint))
                .count();
            if verified < certificates.len() {
                out.push('\n');
                out.push_str(
                    &format!("Verification progress: {}/{}", verified, certificates.len())
                        .green()
                        .to_string(),
                );
            }
        }

        out
    }
}

/// Prints table rows as each certificate finishes verification
pub struct StreamingTable<W: Write + Send> {
    formatter: TableFormatter,
    writer: W,
    error: Option<io::Error>,
}

impl<W: Write + Send> StreamingTable<W> {
    /// Write the header immediately
    pub fn begin(formatter: TableFormatter, mut writer: W) -> io::Result<Self> {
        writeln!(writer, "{}", formatter.header())?;
        writer.flush()?;
        Ok(Self {
            formatter,
            writer,
            error: None,
        })
    }

    /// Write the closing border and report the first write error, if any
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        writeln!(self.writer, "{}", self.formatter.footer())?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write + Send> VerificationObserver for StreamingTable<W> {
    fn on_certificate_verified(&mut self, index: usize, certificate: &Certificate, results: &CheckerResults) {
        if self.error.is_some() {
            return;
        }
        let row = self.formatter.row(index, certificate, Some(results));
        let written = writeln!(self.writer, "{}", row).and_then(|_| self.writer.flush());
        if let Err(e) = written {
            self.error = Some(e);
        }
    }
}
