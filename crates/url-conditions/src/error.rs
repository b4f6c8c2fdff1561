//! Error types for URL parsing and condition configuration.

/// Errors produced while taking a URL apart for matching.
///
/// `UrlConditions::matches` never returns these; it converts them to a
/// non-match. They are public so collaborators can parse URLs the same way.
#[derive(Debug, thiserror::Error)]
pub enum UrlConditionsError {
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Errors produced while compiling declarative conditions.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid regex in {field} condition: {source}")]
    InvalidRegex {
        field: &'static str,
        #[source]
        source: regex::Error,
    },
    #[error("Invalid port range {from}..={to}: start is greater than end")]
    InvalidPortRange { from: u16, to: u16 },
    #[error("Failed to parse YAML conditions: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Failed to parse JSON conditions: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to read conditions file: {0}")]
    Io(#[from] std::io::Error),
}
