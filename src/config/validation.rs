use crate::config::types::{Config, OutputConfig, ScannerConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scanner_config(&config.scanner)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    validate_domains(&config.domains)?;

    if config.input.path.is_empty() {
        return Err(ConfigError::Validation(
            "input path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates scanner configuration
fn validate_scanner_config(config: &ScannerConfig) -> Result<(), ConfigError> {
    if config.concurrency < 1 || config.concurrency > 100 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and 100, got {}",
            config.concurrency
        )));
    }

    let minimums = [
        ("max-pages", config.max_pages as u64),
        ("sitemap-cap", config.sitemap_cap as u64),
        ("max-match-pages-per-query", config.max_match_pages_per_query as u64),
        ("request-timeout-secs", config.request_timeout_secs),
    ];
    if let Some((key, _)) = minimums.iter().find(|(_, value)| *value < 1) {
        return Err(ConfigError::Validation(format!("{} must be >= 1", key)));
    }

    if config.schemes.is_empty() {
        return Err(ConfigError::Validation(
            "at least one scheme is required".to_string(),
        ));
    }

    for scheme in &config.schemes {
        if scheme != "https" && scheme != "http" {
            return Err(ConfigError::Validation(format!(
                "scheme must be 'https' or 'http', got '{}'",
                scheme
            )));
        }
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact-url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.results_path.is_empty() {
        return Err(ConfigError::Validation(
            "results-path cannot be empty".to_string(),
        ));
    }

    if config.test_results_path.is_empty() {
        return Err(ConfigError::Validation(
            "test-results-path cannot be empty".to_string(),
        ));
    }

    if config.diagnostics_dir.is_empty() {
        return Err(ConfigError::Validation(
            "diagnostics-dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the in-scope domain list
fn validate_domains(domains: &[String]) -> Result<(), ConfigError> {
    if domains.is_empty() {
        return Err(ConfigError::Validation(
            "at least one domain is required".to_string(),
        ));
    }

    for domain in domains {
        validate_domain_entry(domain)?;
    }

    Ok(())
}

/// Validates a domain entry, which may carry an explicit port
fn validate_domain_entry(entry: &str) -> Result<(), ConfigError> {
    let host = match entry.rsplit_once(':') {
        Some((host, port)) => {
            if port.parse::<u16>().is_err() {
                return Err(ConfigError::InvalidPattern(format!(
                    "Domain '{}' has an invalid port",
                    entry
                )));
            }
            host
        }
        None => entry,
    };

    validate_domain_string(host)
}

/// Checks a bare host name or IPv4 address
///
/// Labels are alphanumeric with inner hyphens; at least two labels are
/// required so a bare word such as `localhost` is rejected.
fn validate_domain_string(domain: &str) -> Result<(), ConfigError> {
    let labels: Vec<&str> = domain.split('.').collect();
    let label_ok = |label: &&str| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    };

    if labels.len() < 2 || !labels.iter().all(label_ok) {
        return Err(ConfigError::InvalidPattern(format!(
            "'{}' is not a valid domain (expected e.g. 'example.com' or 'example.com:8080')",
            domain
        )));
    }

    Ok(())
}

/// Checks the `local@domain.tld` shape of the contact address
fn validate_email(email: &str) -> Result<(), ConfigError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .map_or(false, |(name, tld)| !name.is_empty() && !tld.is_empty())
        }
        None => false,
    };

    if !valid {
        return Err(ConfigError::Validation(format!(
            "contact-email '{}' is not an address of the form local@domain.tld",
            email
        )));
    }

    Ok(())
}
