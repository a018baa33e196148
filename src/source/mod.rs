//! Marketing-data acquisition.
//!
//! This module fetches the marketing-data document from its HTTP endpoint
//! (with bounded retries and a spinner) or reads it from a local JSON file.
//! Parsing is lenient: once we have valid JSON, whatever shape it has is
//! folded into a [`MarketingDocument`], defaulting anything missing.

use crate::models::MarketingDocument;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors from acquiring the marketing-data document.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Cannot connect to {url}")]
    Connect { url: String },

    #[error("Endpoint returned HTTP {status}")]
    Status { status: u16 },

    #[error("Failed to send request: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Options for fetching the document over HTTP.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
    /// Number of attempts before giving up.
    pub retries: usize,
    /// Whether to show a spinner while fetching.
    pub show_progress: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            retries: 3,
            show_progress: true,
        }
    }
}

/// Fetch the marketing-data document from a URL.
///
/// Retries transient failures up to `options.retries` attempts; a non-success
/// HTTP status or invalid JSON fails immediately since retrying will not
/// change the answer.
pub async fn fetch_document(
    url: &str,
    options: &FetchOptions,
) -> Result<MarketingDocument, SourceError> {
    info!("Fetching marketing data from: {}", url);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(options.timeout_seconds))
        .build()?;

    let spinner = if options.show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("Fetching {}", url));
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let attempts = options.retries.max(1);
    let mut last_error = None;

    for attempt in 1..=attempts {
        debug!("Fetch attempt {}/{}", attempt, attempts);

        match try_fetch(&client, url, options).await {
            Ok(document) => {
                if let Some(pb) = &spinner {
                    pb.finish_with_message("Fetch complete");
                }
                info!("Fetched {} campaigns", document.campaigns.len());
                return Ok(document);
            }
            Err(e @ (SourceError::Status { .. } | SourceError::Json(_))) => {
                if let Some(pb) = &spinner {
                    pb.finish_and_clear();
                }
                return Err(e);
            }
            Err(e) => {
                warn!("Fetch attempt {} failed: {}", attempt, e);
                last_error = Some(e);
            }
        }
    }

    if let Some(pb) = &spinner {
        pb.finish_and_clear();
    }

    Err(last_error.unwrap_or_else(|| SourceError::Connect {
        url: url.to_string(),
    }))
}

async fn try_fetch(
    client: &reqwest::Client,
    url: &str,
    options: &FetchOptions,
) -> Result<MarketingDocument, SourceError> {
    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            SourceError::Timeout {
                seconds: options.timeout_seconds,
            }
        } else if e.is_connect() {
            SourceError::Connect {
                url: url.to_string(),
            }
        } else {
            SourceError::Http(e)
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            status: status.as_u16(),
        });
    }

    let value: serde_json::Value = response.json().await.map_err(SourceError::Http)?;
    Ok(MarketingDocument::from_value(value))
}

/// Read the marketing-data document from a local JSON file.
pub fn load_document(path: &Path) -> Result<MarketingDocument, SourceError> {
    info!("Reading marketing data from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| SourceError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    let value: serde_json::Value = serde_json::from_str(&content)?;
    let document = MarketingDocument::from_value(value);
    info!("Loaded {} campaigns", document.campaigns.len());

    Ok(document)
}
