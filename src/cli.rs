//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// Default public endpoint serving the marketing-data document.
pub const DEFAULT_DATA_URL: &str =
    "https://www.amanabootcamp.org/api/fs-classwork-data/amana-marketing";

/// Marketlens - campaign analytics aggregator
///
/// Fetch campaign performance data from a JSON endpoint and report derived
/// breakdowns by gender, age group, device, region, and week.
///
/// Examples:
///   marketlens
///   marketlens --breakdown gender,device --format json
///   marketlens --input ./fixtures/sample_marketing.json
///   marketlens --url https://example.com/marketing.json --output report.md
///   marketlens --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// URL of the marketing-data JSON endpoint
    ///
    /// Can also be set via MARKETLENS_URL env var or .marketlens.toml config.
    #[arg(short, long, default_value = DEFAULT_DATA_URL, env = "MARKETLENS_URL")]
    pub url: String,

    /// Local JSON file to read instead of fetching the endpoint
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output file path for the report
    #[arg(
        short,
        long,
        default_value = "marketlens_report.md",
        value_name = "FILE"
    )]
    pub output: PathBuf,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Breakdowns to compute (comma-separated)
    ///
    /// Example: --breakdown gender,device,weekly. Defaults to all of
    /// gender, age, gender-age, device, region, weekly.
    #[arg(short, long, value_name = "NAMES", value_delimiter = ',')]
    pub breakdown: Option<Vec<Breakdown>>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Number of fetch attempts before giving up
    #[arg(long, value_name = "COUNT")]
    pub retries: Option<usize>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .marketlens.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .marketlens.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

/// One grouping dimension of the campaign data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Breakdown {
    /// Engagement and allocated spend/revenue per gender
    Gender,
    /// Allocated spend/revenue per age group
    Age,
    /// Engagement rates per gender x age group
    GenderAge,
    /// Campaign totals per primary device
    Device,
    /// Revenue/spend per region, with map coordinates
    Region,
    /// Revenue/spend per week
    Weekly,
}

impl Breakdown {
    /// All breakdowns, in report order.
    pub const ALL: [Breakdown; 6] = [
        Breakdown::Gender,
        Breakdown::Age,
        Breakdown::GenderAge,
        Breakdown::Device,
        Breakdown::Region,
        Breakdown::Weekly,
    ];
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Validate the endpoint URL unless reading from a local file
        if self.input.is_none()
            && !self.url.starts_with("http://")
            && !self.url.starts_with("https://")
        {
            return Err("Data URL must start with 'http://' or 'https://'".to_string());
        }

        if let Some(ref input) = self.input {
            if !input.exists() {
                return Err(format!("Input file does not exist: {}", input.display()));
            }
            if !input.is_file() {
                return Err(format!("Input path is not a file: {}", input.display()));
            }
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        if let Some(retries) = self.retries {
            if retries == 0 {
                return Err("Retries must be at least 1".to_string());
            }
        }

        if let Some(ref breakdowns) = self.breakdown {
            if breakdowns.is_empty() {
                return Err("At least one breakdown must be selected".to_string());
            }
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Returns the breakdowns to compute, defaulting to all of them.
    pub fn effective_breakdowns(&self) -> Vec<Breakdown> {
        self.breakdown
            .clone()
            .unwrap_or_else(|| Breakdown::ALL.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            url: DEFAULT_DATA_URL.to_string(),
            input: None,
            output: PathBuf::from("report.md"),
            format: OutputFormat::Markdown,
            breakdown: None,
            timeout: None,
            retries: None,
            config: None,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_default_breakdowns_cover_all_dimensions() {
        let args = make_args();
        let breakdowns = args.effective_breakdowns();
        assert_eq!(breakdowns.len(), 6);
        assert!(breakdowns.contains(&Breakdown::Gender));
        assert!(breakdowns.contains(&Breakdown::Weekly));
    }

    #[test]
    fn test_validation_invalid_url() {
        let mut args = make_args();
        args.url = "ftp://example.com/data".to_string();
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_skips_url_check_with_local_input() {
        let mut args = make_args();
        args.url = "whatever".to_string();
        let file = tempfile::NamedTempFile::new().unwrap();
        args.input = Some(file.path().to_path_buf());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_missing_input_file() {
        let mut args = make_args();
        args.input = Some(PathBuf::from("/no/such/file.json"));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let mut args = make_args();
        args.timeout = Some(0);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
