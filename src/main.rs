// src/main.rs
// =============================================================================
// Entry point of the link-health CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr, so JSON on stdout stays clean)
// 3. Dispatch to the subcommand handler
// 4. Exit with a code CI can act on:
//      0 = nothing wrong, 1 = broken links / lint issues, 2 = error
// =============================================================================

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use link_health::config::{DEFAULT_PAGE_TIMEOUT, DEFAULT_USER_AGENT};
use link_health::lint::{lint_source, LintReport};
use link_health::{github, Bucket, ProbeStatus, ScanReport, Scanner};
use serde_json::json;
use tracing_subscriber::EnvFilter;

const EXIT_OK: i32 = 0;
const EXIT_FINDINGS: i32 = 1;
const EXIT_ERROR: i32 = 2;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // An unexpected error (bad input, client setup, GitHub fetch)
            eprintln!("Error: {:#}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}

// RUST_LOG wins when set; otherwise --verbose shows progress at info level
fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    let scan_config = cli.command.scan_config();

    match cli.command {
        Commands::Scan { url, json, .. } => {
            let config = scan_config.unwrap_or_default();
            handle_scan(&url, json, Scanner::new(config)?).await
        }
        Commands::Lint { source, json } => handle_lint(&source, json).await,
    }
}

// Handles the 'scan' subcommand
//
// A page that can't be fetched is reported as a single error, never as a
// partial report.
async fn handle_scan(url: &str, json: bool, scanner: Scanner) -> Result<i32> {
    let report = match scanner.scan(url).await {
        Ok(report) => report,
        Err(e) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&json!({ "error": e.to_string() }))?);
            } else {
                eprintln!("Error: {}", e);
            }
            return Ok(EXIT_ERROR);
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_table(&report);
    }

    Ok(if report.has_broken() { EXIT_FINDINGS } else { EXIT_OK })
}

// Handles the 'lint' subcommand
//
// An http(s) argument is treated as a GitHub file URL and downloaded first;
// anything else is linted as-is.
async fn handle_lint(source: &str, json: bool) -> Result<i32> {
    let code = if source.trim_start().starts_with("http") {
        let client = reqwest::Client::new();
        github::fetch_blob(&client, source, DEFAULT_USER_AGENT, DEFAULT_PAGE_TIMEOUT).await?
    } else {
        source.to_string()
    };

    let report = lint_source(&code);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_lint(&report);
    }

    Ok(if report.is_clean() { EXIT_OK } else { EXIT_FINDINGS })
}

// Prints the scan report as a human-readable table
fn print_table(report: &ScanReport) {
    if report.is_empty() {
        println!("No links found to check");
        return;
    }

    println!("{:<60} {:<8} {:<8} {:<10} {}", "URL", "BUCKET", "STATUS", "TIME", "DETAIL");
    println!("{}", "=".repeat(100));

    for (bucket, result) in report.iter() {
        // Truncate URL if too long for display
        let url_display = if result.url.chars().count() > 57 {
            format!("{}...", result.url.chars().take(57).collect::<String>())
        } else {
            result.url.clone()
        };
        let time = result
            .time_ms
            .map(|ms| format!("{} ms", ms))
            .unwrap_or_else(|| "-".to_string());
        let detail = result.error.as_deref().unwrap_or(&result.text);

        println!(
            "{:<60} {:<8} {:<8} {:<10} {}",
            url_display,
            format_bucket(bucket),
            format_status(&result.status),
            time,
            detail
        );
    }

    println!();
    println!("Summary:");
    println!("   OK:     {}", report.ok.len());
    println!("   Slow:   {}", report.slow.len());
    println!("   Broken: {}", report.broken.len());
    println!("   Total:  {}", report.len());
}

fn format_bucket(bucket: Bucket) -> &'static str {
    match bucket {
        Bucket::Ok => "OK",
        Bucket::Slow => "SLOW",
        Bucket::Broken => "BROKEN",
    }
}

fn format_status(status: &ProbeStatus) -> String {
    match status {
        ProbeStatus::Code(code) => code.to_string(),
        ProbeStatus::Error => "ERROR".to_string(),
    }
}

fn print_lint(report: &LintReport) {
    if report.is_clean() {
        println!("No obvious issues found in your {} code.", report.kind);
        return;
    }

    println!("Found potential issues in your {} code:", report.kind);
    for issue in &report.issues {
        println!("- {}", issue);
    }
}
