use crate::config::ConfigError;
use thiserror::Error;

/// Fatal application errors, reported on stderr with a non-zero exit status
#[derive(Error, Debug)]
pub enum WikiStatsError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Failure of a single statistics fetch.
///
/// A fetch error is never fatal: it is rendered as the error line of the
/// report and the process still exits successfully.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Data parsing error: {0}")]
    Parse(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Classification of a [`FetchError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Network,
    Parse,
    Unexpected,
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Network(_) => FetchErrorKind::Network,
            FetchError::Parse(_) => FetchErrorKind::Parse,
            FetchError::Unexpected(_) => FetchErrorKind::Unexpected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wikistats_error_display() {
        let config_error = ConfigError::MissingRequired("wikipedia.api_url".to_string());
        let error = WikiStatsError::Config(config_error);
        assert!(error.to_string().contains("Configuration error"));
        assert!(error.to_string().contains("wikipedia.api_url"));

        let error = WikiStatsError::InvalidData("Invalid log level: loud".to_string());
        assert_eq!(error.to_string(), "Invalid data: Invalid log level: loud");
    }

    #[test]
    fn test_fetch_error_display_carries_classification() {
        let error = FetchError::Network("connection refused".to_string());
        assert_eq!(error.to_string(), "Network error: connection refused");

        let error = FetchError::Parse("missing field `query`".to_string());
        assert_eq!(error.to_string(), "Data parsing error: missing field `query`");

        let error = FetchError::Unexpected("client unavailable".to_string());
        assert_eq!(error.to_string(), "Unexpected error: client unavailable");
    }

    #[test]
    fn test_fetch_error_kind() {
        let error = FetchError::Parse("statistics".to_string());
        assert_eq!(error.kind(), FetchErrorKind::Parse);

        assert_eq!(
            FetchError::Network(String::new()).kind(),
            FetchErrorKind::Network
        );
        assert_eq!(
            FetchError::Unexpected(String::new()).kind(),
            FetchErrorKind::Unexpected
        );
    }
}
