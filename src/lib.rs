//! Sitemap-Sweep: find where target URLs are referenced across a site
//!
//! This crate discovers every page of a set of domains through their sitemap
//! trees, then scans each page for textual variants of a list of target URLs,
//! respecting robots.txt, a bounded concurrency pool and a politeness delay.

pub mod config;
pub mod crawler;
pub mod matcher;
pub mod output;
pub mod robots;
pub mod sitemap;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Sitemap-Sweep operations
///
/// Only configuration, input and output problems surface here. Failures of a
/// single page or sitemap document are absorbed at that unit's boundary.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Run interrupted before completion")]
    Interrupted,
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid domain pattern: {0}")]
    InvalidPattern(String),

    #[error("Input file {0} contains no target strings")]
    EmptyInput(String),
}

/// Result type alias for Sitemap-Sweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_crawl, run_single_page, Coordinator};
pub use matcher::{build_matcher, MatcherKind, PatternMatcher};
pub use state::{InputResult, MatchSet};
pub use crate::url::{in_scope, normalize_variants, VariantMap};
