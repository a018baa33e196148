//! Marketlens - campaign analytics aggregator
//!
//! A CLI tool that fetches marketing campaign data from a JSON endpoint
//! and reports derived breakdowns by gender, age group, device, region,
//! and week.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (fetch, config, or output failure)

mod analysis;
mod cli;
mod config;
mod models;
mod report;
mod source;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, Breakdown, OutputFormat};
use config::Config;
use models::{Dashboard, MarketingDocument, ReportMetadata};
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("Marketlens v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run_report(args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Report failed: {}", e);
            eprintln!("\nError: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .marketlens.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".marketlens.toml");

    if path.exists() {
        eprintln!(".marketlens.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .marketlens.toml")?;

    println!("Created .marketlens.toml with default settings.");
    println!("Edit it to customize the data source and report options.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete report workflow.
async fn run_report(args: Args) -> Result<()> {
    let start_time = Instant::now();

    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    // Step 1: Acquire the marketing-data document
    let (document, source_label) = acquire_document(&args, &config).await?;

    if document.campaigns.is_empty() {
        warn!("Document contains no campaigns; the report will be empty");
    }

    // Step 2: Compute the requested breakdowns
    let breakdowns = args.effective_breakdowns();
    debug!("Computing breakdowns: {:?}", breakdowns);

    let dashboard = build_dashboard(
        &document,
        &breakdowns,
        source_label,
        start_time.elapsed().as_secs_f64(),
    );

    // Step 3: Generate and save the report
    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&dashboard)?,
        OutputFormat::Markdown => report::generate_markdown_report(&dashboard, &config.report),
    };

    std::fs::write(&args.output, &output)
        .with_context(|| format!("Failed to write report to {}", args.output.display()))?;

    // Print summary
    print_summary(&dashboard);
    println!(
        "\nReport complete! Saved to: {}",
        args.output.display()
    );

    Ok(())
}

/// Fetch or read the document depending on CLI arguments.
async fn acquire_document(
    args: &Args,
    config: &Config,
) -> Result<(MarketingDocument, String)> {
    if let Some(ref input) = args.input {
        let document = source::load_document(input)
            .with_context(|| format!("Failed to load {}", input.display()))?;
        return Ok((document, input.display().to_string()));
    }

    let options = source::FetchOptions {
        timeout_seconds: config.source.timeout_seconds,
        retries: config.source.retries,
        show_progress: !args.quiet,
    };

    let url = config.source.url.clone();
    let document = source::fetch_document(&url, &options)
        .await
        .context("Failed to fetch marketing data")?;

    Ok((document, url))
}

/// Compute the selected breakdowns over the document.
fn build_dashboard(
    document: &MarketingDocument,
    breakdowns: &[Breakdown],
    source: String,
    duration_seconds: f64,
) -> Dashboard {
    let wants = |b: Breakdown| breakdowns.contains(&b);

    Dashboard {
        metadata: ReportMetadata {
            source,
            generated_at: Utc::now(),
            campaign_count: document.campaigns.len(),
            duration_seconds,
        },
        gender: wants(Breakdown::Gender).then(|| analysis::compute_gender_metrics(document)),
        age_groups: wants(Breakdown::Age).then(|| analysis::compute_age_group_metrics(document)),
        gender_age_groups: wants(Breakdown::GenderAge)
            .then(|| analysis::compute_gender_age_group_metrics(document)),
        devices: wants(Breakdown::Device).then(|| analysis::compute_device_metrics(document)),
        regions: wants(Breakdown::Region).then(|| analysis::compute_region_metrics(document)),
        weekly: wants(Breakdown::Weekly).then(|| analysis::compute_weekly_metrics(document)),
    }
}

/// Print a console summary of what was computed.
fn print_summary(dashboard: &Dashboard) {
    println!("\nReport Summary:");
    println!("   Campaigns: {}", dashboard.metadata.campaign_count);

    if let Some(ref gender) = dashboard.gender {
        println!(
            "   Gender: male {} clicks / female {} clicks",
            gender.male.clicks, gender.female.clicks
        );
    }
    if let Some(ref age_groups) = dashboard.age_groups {
        println!("   Age groups: {}", age_groups.len());
    }
    if let Some(ref split) = dashboard.gender_age_groups {
        println!(
            "   Gender x age buckets: {} male / {} female",
            split.male.len(),
            split.female.len()
        );
    }
    if let Some(ref devices) = dashboard.devices {
        println!("   Devices: {}", devices.len());
    }
    if let Some(ref regions) = dashboard.regions {
        println!(
            "   Regions: {} ({} on map)",
            regions.regions.len(),
            regions.map_points.len()
        );
    }
    if let Some(ref weekly) = dashboard.weekly {
        println!("   Weeks: {}", weekly.len());
    }
    println!("   Duration: {:.1}s", dashboard.metadata.duration_seconds);
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .marketlens.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Campaign;

    #[test]
    fn test_build_dashboard_respects_breakdown_selection() {
        let document = MarketingDocument {
            campaigns: vec![Campaign {
                spend: 10.0,
                impressions: 100,
                ..Default::default()
            }],
        };

        let dashboard = build_dashboard(
            &document,
            &[Breakdown::Device, Breakdown::Weekly],
            "test".to_string(),
            0.1,
        );

        assert!(dashboard.gender.is_none());
        assert!(dashboard.age_groups.is_none());
        assert!(dashboard.devices.is_some());
        assert!(dashboard.weekly.is_some());
        assert_eq!(dashboard.metadata.campaign_count, 1);
    }

    #[test]
    fn test_build_dashboard_all_breakdowns() {
        let document = MarketingDocument::default();
        let dashboard =
            build_dashboard(&document, &Breakdown::ALL, "test".to_string(), 0.0);

        assert!(dashboard.gender.is_some());
        assert!(dashboard.age_groups.is_some());
        assert!(dashboard.gender_age_groups.is_some());
        assert!(dashboard.devices.is_some());
        assert!(dashboard.regions.is_some());
        assert!(dashboard.weekly.is_some());
    }
}
