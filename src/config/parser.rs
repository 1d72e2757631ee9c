use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use sitemap_sweep::config::load_config;
///
/// let config = load_config(Path::new("sweep.toml")).unwrap();
/// println!("Concurrency: {}", config.scanner.concurrency);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    // Parse TOML
    let mut config: Config = toml::from_str(&content)?;
    normalize_domains(&mut config.domains);

    // Validate the configuration
    validate(&config)?;

    Ok(config)
}

/// Trims and lowercases domain entries
///
/// Scope checks compare against lowercased URL authorities, so entries are
/// brought into that form wherever they come from.
fn normalize_domains(domains: &mut [String]) {
    for domain in domains.iter_mut() {
        *domain = domain.trim().to_lowercase();
    }
}

/// Command-line values that take precedence over file and default settings
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub input: Option<String>,
    pub output: Option<String>,
    pub no_body: bool,
    pub max_pages: Option<usize>,
    pub concurrency: Option<usize>,
    pub domains: Option<Vec<String>>,
    pub no_progress: bool,
}

impl ConfigOverrides {
    /// Applies the overrides to `config` and validates the result
    pub fn apply(self, mut config: Config) -> Result<Config, ConfigError> {
        if let Some(input) = self.input {
            config.input.path = input;
        }
        if let Some(output) = self.output {
            config.output.results_path = output;
        }
        if self.no_body {
            config.scanner.scan_body = false;
        }
        if let Some(max_pages) = self.max_pages {
            config.scanner.max_pages = max_pages;
        }
        if let Some(concurrency) = self.concurrency {
            config.scanner.concurrency = concurrency;
        }
        if let Some(domains) = self.domains {
            config.domains = domains;
            normalize_domains(&mut config.domains);
        }
        if self.no_progress {
            config.scanner.show_progress = false;
        }

        validate(&config)?;
        Ok(config)
    }
}

/// Reads the newline-delimited list of target strings
///
/// Lines are trimmed and blank lines dropped. Order and duplicates are kept so
/// the report has one row per input line.
pub fn load_inputs(path: &Path) -> Result<Vec<String>, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let inputs = parse_inputs(&content);

    if inputs.is_empty() {
        return Err(ConfigError::EmptyInput(path.display().to_string()));
    }

    Ok(inputs)
}

/// Splits input text into target strings
pub fn parse_inputs(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
