use thiserror::Error;

/// Errors that can occur while loading runtime configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config RON: {0}")]
    Parse(String),

    #[error("Invalid config value for `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
