//! Configuration module for Sitemap-Sweep
//!
//! This module handles defaults, optional TOML configuration files, command-line
//! overrides and validation. The result is a single immutable [`Config`].
//!
//! # Example
//!
//! ```no_run
//! use sitemap_sweep::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sweep.toml")).unwrap();
//! println!("Scanning up to {} pages", config.scanner.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, InputConfig, MatcherPreference, OutputConfig, ScannerConfig, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{load_config, load_inputs, parse_inputs, ConfigOverrides};
pub use validation::validate;
