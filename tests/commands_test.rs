//! Commands Module Integration Tests
//!
//! Runs the certificate listing workflow end to end on the fixture bundle:
//! - Command routing and naming
//! - Filtering and the printed counts
//! - Table and JSON rendering, with and without verification
//!
//! Verification uses an in-process HTTP stub instead of the real trust sources.

use async_trait::async_trait;
use certtrust::Args;
use certtrust::TrustError;
use certtrust::commands::{Command, CommandRouter, ListCertsCommand};
use certtrust::verification::crtsh::CRTSH_ENDPOINT;
use certtrust::verification::root_list::MOZILLA_ROOTS_CSV_ENDPOINT;
use certtrust::verification::{HttpClient, HttpResponse};
use clap::Parser;
use serde_json::Value;
use std::sync::Arc;

const ROOT_SHA1: &str = "72ea5763029a766b9b734a7362eda74d0d04f630";
const ROOT_SHA256: &str =
    "67:DE:38:FA:A5:CF:D5:F8:73:97:60:A7:39:92:58:17:1F:00:E2:B6:54:24:FA:84:E1:24:E3:1F:4F:9E:2F:4C";

/// crt.sh knows only the root; the root list contains only the root
struct RootOnlySources;

#[async_trait]
impl HttpClient for RootOnlySources {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<HttpResponse, TrustError> {
        if url == CRTSH_ENDPOINT {
            let logged = query.iter().any(|(k, v)| *k == "q" && *v == ROOT_SHA1);
            let body = if logged { "crt.sh ID" } else { "Certificate not found" };
            return Ok(HttpResponse::new(200, body));
        }
        if url == MOZILLA_ROOTS_CSV_ENDPOINT {
            return Ok(HttpResponse::new(
                200,
                format!("Common Name,SHA-256 Fingerprint\nExample Root CA,{}\n", ROOT_SHA256),
            ));
        }
        Ok(HttpResponse::new(404, ""))
    }
}

fn bundle_path() -> String {
    format!("{}/tests/fixtures/bundle.pem", env!("CARGO_MANIFEST_DIR"))
}

fn args(extra: &[&str]) -> Args {
    let bundle = bundle_path();
    let mut argv = vec!["certtrust", "--bundle", bundle.as_str()];
    argv.extend_from_slice(extra);
    Args::parse_from(argv)
}

async fn run(extra: &[&str]) -> anyhow::Result<String> {
    let command = ListCertsCommand::new(args(extra))
        .with_http_client(Arc::new(RootOnlySources))
        .non_interactive();
    let mut out = Vec::new();
    command.run(&mut out).await?;
    Ok(String::from_utf8(out)?)
}

// ============================================================================
// Routing
// ============================================================================

#[test]
fn test_list_command_name() {
    let cmd = ListCertsCommand::new(Args::default());
    assert_eq!(cmd.name(), "ListCertsCommand");
}

#[test]
fn test_router_defaults_to_listing() {
    let cmd = CommandRouter::route(args(&["--verify"])).unwrap();
    assert_eq!(cmd.name(), "ListCertsCommand");
}

// ============================================================================
// Listing and filtering
// ============================================================================

#[tokio::test]
async fn test_table_listing_hides_expired() {
    let output = run(&[]).await.unwrap();

    assert!(output.contains("Found 4 certificates"));
    assert!(output.contains("2 certificates after filtering"));
    assert!(output.contains("Example Root CA"));
    assert!(output.contains("www.acme.test"));
    assert!(!output.contains("Legacy Root"));
    assert!(!output.contains("Verification"));
}

#[tokio::test]
async fn test_show_expired() {
    let output = run(&["--show-expired"]).await.unwrap();

    assert!(output.contains("3 certificates after filtering"));
    assert!(output.contains("Legacy Root"));
    assert!(output.contains("sha1WithRSAEncryption"));
}

#[tokio::test]
async fn test_keyword_and_signature_filters() {
    let output = run(&["-k", "ACME"]).await.unwrap();
    assert!(output.contains("1 certificates after filtering"));
    assert!(output.contains("www.acme.test"));

    let output = run(&["-s", "ecdsa"]).await.unwrap();
    assert!(output.contains("1 certificates after filtering"));
    assert!(output.contains("ecdsa-with-SHA384"));

    // Both filters must match
    let output = run(&["-k", "Example Trust", "-s", "ecdsa"]).await.unwrap();
    assert!(output.contains("No matching certificates found"));
}

#[tokio::test]
async fn test_json_listing_is_pure_json() {
    let output = run(&["-f", "json"]).await.unwrap();

    let value: Value = serde_json::from_str(&output).unwrap();
    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["fingerprint"], ROOT_SHA1);
    assert_eq!(entries[0]["organization"], "Example Trust Services");
    assert_eq!(entries[1]["domains"][1], "api.acme.test");
    assert!(entries[0].get("verification").is_none());
}

#[tokio::test]
async fn test_json_with_no_match_is_empty_array() {
    let output = run(&["-f", "json", "-k", "nothing-matches-this"]).await.unwrap();
    assert_eq!(output.trim(), "[]");
}

#[tokio::test]
async fn test_missing_bundle_is_an_error() {
    let args = Args::parse_from(["certtrust", "--bundle", "/nonexistent/ca-bundle.crt"]);
    let command = ListCertsCommand::new(args).non_interactive();
    let mut out = Vec::new();
    assert!(command.run(&mut out).await.is_err());
}

// ============================================================================
// Verification
// ============================================================================

#[tokio::test]
async fn test_table_verification_columns() {
    let output = run(&["--verify"]).await.unwrap();

    assert!(output.contains("crt.sh Verification"));
    assert!(output.contains("Mozilla Verification"));
    assert!(output.contains("Overall"));
    assert!(output.contains("Passed"));
    assert!(output.contains("Failed"));

    let root_line = output.lines().find(|l| l.contains(ROOT_SHA1)).unwrap();
    assert!(root_line.contains("Passed"));
    assert!(!root_line.contains("Failed"));
}

#[tokio::test]
async fn test_json_verification_results() {
    let output = run(&["-f", "json", "--verify", "--compact"]).await.unwrap();
    assert_eq!(output.lines().count(), 1);

    let value: Value = serde_json::from_str(&output).unwrap();
    let root = &value[0]["verification"];
    assert_eq!(root["crt.sh"], "passed");
    assert_eq!(root["Mozilla"], "passed");
    assert_eq!(root["overall"], "passed");

    let leaf = &value[1]["verification"];
    assert_eq!(leaf["crt.sh"], "failed");
    assert_eq!(leaf["Mozilla"], "failed");
    assert_eq!(leaf["overall"], "failed");
}

#[tokio::test]
async fn test_checker_selection_from_cli() {
    let output = run(&["-f", "json", "--verify", "--checker", "mozilla"]).await.unwrap();

    let value: Value = serde_json::from_str(&output).unwrap();
    let verification = value[0]["verification"].as_object().unwrap();
    let keys: Vec<&str> = verification.keys().map(String::as_str).collect();
    assert!(keys.contains(&"Mozilla"));
    assert!(!keys.contains(&"crt.sh"));
}

#[tokio::test]
async fn test_unknown_checker_is_an_error() {
    assert!(run(&["--verify", "--checker", "ocsp"]).await.is_err());
}

#[tokio::test]
async fn test_config_file_is_honoured() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("certtrust.toml");
    std::fs::write(&path, "checkers = [\"crt.sh\"]\n").unwrap();

    let output = run(&["-f", "json", "--verify", "--config", path.to_str().unwrap()])
        .await
        .unwrap();

    let value: Value = serde_json::from_str(&output).unwrap();
    let verification = value[0]["verification"].as_object().unwrap();
    assert_eq!(verification.len(), 2); // crt.sh + overall
    assert_eq!(verification["crt.sh"], "passed");
}
