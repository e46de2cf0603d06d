//! SEO Audit main entry point
//!
//! This is the command-line interface for the batch SEO audit.

use anyhow::Context;
use clap::Parser;
use seo_audit::audit::{run_audit, ConsoleProgressSink, ProgressSink, SilentProgressSink};
use seo_audit::config::{load_config_or_default, Config};
use seo_audit::input::{looks_fetchable, read_url_list};
use seo_audit::output::{print_statistics, report_path_for};
use seo_audit::AuditError;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// SEO Audit: traffic-light SEO checks for a list of URLs
///
/// Reads one URL per line, fetches every page once, checks its status,
/// robots meta directive, title and meta tags, and writes a spreadsheet
/// with a red/yellow/green verdict per URL next to the input file.
#[derive(Parser, Debug)]
#[command(name = "seo-audit")]
#[command(version)]
#[command(about = "Batch SEO audit with a traffic-light verdict per URL", long_about = None)]
struct Cli {
    /// Text file with one URL per line
    #[arg(value_name = "URLS_FILE")]
    urls_file: PathBuf,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress progress and non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the URLs that would be audited and where the report would go, without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load_config_or_default(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Failed to build default configuration".to_string(),
    })?;

    // Same check the file picker enforced: an existing, regular file
    if !cli.urls_file.is_file() {
        let err = AuditError::InvalidInputPath {
            path: cli.urls_file.clone(),
        };
        tracing::error!("{}", err);
        return Err(err.into());
    }

    if cli.dry_run {
        handle_dry_run(&cli.urls_file, &config)?;
    } else {
        handle_audit(&cli.urls_file, &config, cli.quiet).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("seo_audit=info,warn"),
            1 => EnvFilter::new("seo_audit=debug,info"),
            2 => EnvFilter::new("seo_audit=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: reads the list and shows what would be audited
fn handle_dry_run(urls_file: &Path, config: &Config) -> anyhow::Result<()> {
    let urls = read_url_list(urls_file)?;

    println!("=== SEO Audit Dry Run ===\n");

    println!("Fetcher:");
    println!("  Timeout: {}s", config.fetcher.timeout_secs);
    println!("  User agent: {}", config.user_agent.header_value());

    println!("\nURLs ({}):", urls.len());
    let mut unfetchable = 0;
    for (i, url) in urls.iter().enumerate() {
        if looks_fetchable(url) {
            println!("  {:>4}. {}", i + 1, url);
        } else {
            unfetchable += 1;
            println!("  {:>4}. {}  (not an http(s) URL, will be reported as Error)", i + 1, url);
        }
    }

    println!(
        "\nReport: {}",
        report_path_for(urls_file, &config.output.file_name).display()
    );

    println!("\n✓ URL list is readable");
    if unfetchable > 0 {
        println!("! {} entries will not be fetchable", unfetchable);
    }

    Ok(())
}

/// Handles the main audit operation
async fn handle_audit(urls_file: &Path, config: &Config, quiet: bool) -> anyhow::Result<()> {
    let cancel = CancellationToken::new();
    spawn_interrupt_handler(cancel.clone());

    let progress: &dyn ProgressSink = if quiet {
        &SilentProgressSink
    } else {
        &ConsoleProgressSink
    };

    match run_audit(urls_file, config, progress, cancel).await {
        Ok(outcome) => {
            tracing::info!(
                "Audit completed: {} URLs in {:.1}s",
                outcome.results.len(),
                outcome.duration_seconds()
            );

            if !quiet {
                println!();
                print_statistics(&outcome.statistics);
                println!("✓ Report written to: {}", outcome.report_path.display());
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Audit failed: {}", e);
            Err(e.into())
        }
    }
}

/// Cancels the audit on Ctrl-C; the runner stops before the next URL
fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping after the current URL");
            cancel.cancel();
        }
    });
}
