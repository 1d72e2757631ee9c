//! Sitemap-Sweep main entry point
//!
//! This is the command-line interface for the Sitemap-Sweep URL reference
//! finder.

use anyhow::Context;
use clap::Parser;
use sitemap_sweep::config::{load_config, load_inputs, Config, ConfigOverrides};
use sitemap_sweep::crawler::{run_crawl, run_single_page, ShutdownSignal};
use sitemap_sweep::output::print_summary;
use sitemap_sweep::SweepError;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Exit status after an operator interrupt
const EXIT_INTERRUPTED: u8 = 130;

/// Sitemap-Sweep: find every page on a site that references your URLs
///
/// Sitemap-Sweep walks each domain's sitemap tree, fetches every page it
/// lists while respecting robots.txt and a politeness delay, and reports
/// which of the input URLs (in any common textual form) each page mentions.
#[derive(Parser, Debug)]
#[command(name = "sitemap-sweep")]
#[command(version = "1.0.0")]
#[command(about = "Find where target URLs are referenced across a site", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Newline-delimited file of target URLs
    #[arg(long, value_name = "FILE")]
    input: Option<String>,

    /// Results CSV path
    #[arg(long, value_name = "FILE")]
    output: Option<String>,

    /// Scan only hyperlink targets, not the raw page markup
    #[arg(long)]
    no_body: bool,

    /// Maximum number of pages to collect and scan
    #[arg(long)]
    max_pages: Option<usize>,

    /// Number of concurrent page fetches
    #[arg(long)]
    concurrency: Option<usize>,

    /// In-scope domains (replaces the configured list)
    #[arg(long, num_args = 1..)]
    domains: Option<Vec<String>>,

    /// Scan this single page instead of crawling
    #[arg(long, value_name = "URL")]
    test_url: Option<String>,

    /// Disable progress bars
    #[arg(long)]
    no_progress: bool,

    /// Validate config and inputs, print the effective settings, and exit
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if matches!(e.downcast_ref::<SweepError>(), Some(SweepError::Interrupted)) => {
            tracing::warn!("Interrupted, no results written");
            ExitCode::from(EXIT_INTERRUPTED)
        }
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let base = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?
        }
        None => Config::default(),
    };

    let quiet = cli.quiet;
    let overrides = ConfigOverrides {
        input: cli.input,
        output: cli.output,
        no_body: cli.no_body,
        max_pages: cli.max_pages,
        concurrency: cli.concurrency,
        domains: cli.domains,
        no_progress: cli.no_progress || cli.quiet,
    };
    let config = overrides.apply(base).context("Invalid configuration")?;

    let inputs = load_inputs(Path::new(&config.input.path))
        .with_context(|| format!("Failed to read input file {}", config.input.path))?;
    tracing::info!("Loaded {} target input(s)", inputs.len());

    if cli.dry_run {
        print_dry_run(&config, inputs.len(), cli.test_url.as_deref());
        return Ok(());
    }

    if let Some(test_url) = cli.test_url {
        return handle_single_page(config, &test_url, &inputs).await;
    }

    handle_crawl(config, &inputs, !quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitemap_sweep=info,warn"),
            1 => EnvFilter::new("sitemap_sweep=debug,info"),
            2 => EnvFilter::new("sitemap_sweep=trace,debug"),
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

/// Handles --dry-run: shows what would be swept without touching the network
fn print_dry_run(config: &Config, input_count: usize, test_url: Option<&str>) {
    println!("=== Sitemap-Sweep Dry Run ===\n");

    println!("Domains ({}):", config.domains.len());
    for domain in &config.domains {
        println!("  - {}", domain);
    }

    println!("\nScanner:");
    println!("  Schemes: {}", config.scanner.schemes.join(", "));
    println!("  Max pages: {}", config.scanner.max_pages);
    println!("  Sitemap cap: {}", config.scanner.sitemap_cap);
    println!("  Concurrency: {}", config.scanner.concurrency);
    println!("  Request timeout: {}s", config.scanner.request_timeout_secs);
    println!("  Politeness delay: {}ms", config.scanner.politeness_delay_ms);
    println!(
        "  Max match pages per query: {}",
        config.scanner.max_match_pages_per_query
    );
    println!("  Scan body: {}", config.scanner.scan_body);
    println!("  Matcher: {:?}", config.scanner.matcher);

    println!("\nUser Agent: {}", config.user_agent.header_value());

    println!("\nInput: {} ({} targets)", config.input.path, input_count);
    println!("Output:");
    println!("  Results: {}", config.output.results_path);
    println!("  Test results: {}", config.output.test_results_path);
    println!("  Diagnostics: {}", config.output.diagnostics_dir);

    println!("\n✓ Configuration is valid");
    match test_url {
        Some(url) => println!("✓ Would scan the single page {}", url),
        None => println!(
            "✓ Would sweep {} domain(s) for {} target(s)",
            config.domains.len(),
            input_count
        ),
    }
}

/// Handles the main crawl operation
async fn handle_crawl(
    config: Config,
    inputs: &[String],
    show_summary: bool,
) -> anyhow::Result<()> {
    let shutdown = ShutdownSignal::new();
    let handler_signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, finishing in-flight requests");
            handler_signal.trigger();
        }
    });

    let results_path = config.output.results_path.clone();
    let report = run_crawl(config, inputs, shutdown).await?;

    tracing::info!("Results written to {}", results_path);
    if show_summary {
        print_summary(&report.summary);
    }
    Ok(())
}

/// Handles --test-url mode
async fn handle_single_page(
    config: Config,
    test_url: &str,
    inputs: &[String],
) -> anyhow::Result<()> {
    let results_path = config.output.test_results_path.clone();
    match run_single_page(config, test_url, inputs).await? {
        Some(_) => tracing::info!("Test results written to {}", results_path),
        None => tracing::warn!("No test results written"),
    }
    Ok(())
}
