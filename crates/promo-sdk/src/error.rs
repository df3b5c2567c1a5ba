//! SDK error types

use promo_core::UserId;
use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Config file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParseError(#[from] serde_yaml::Error),

    /// Runtime error
    #[error("Runtime error: {0}")]
    RuntimeError(#[from] promo_runtime::RuntimeError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Training user without a label
    #[error("Missing label for user {0}")]
    MissingLabel(UserId),

    /// More than one label row for a user
    #[error("Duplicate label for user {0}")]
    DuplicateLabel(UserId),

    /// Nothing to train on
    #[error("Empty training set")]
    EmptyTrainingSet,

    /// predict called before fit
    #[error("Estimator not fitted")]
    NotFitted,
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let error = SdkError::ConfigError("regularization must be positive".to_string());
        assert!(error.to_string().contains("Configuration error"));
        assert!(error.to_string().contains("regularization must be positive"));
    }

    #[test]
    fn test_not_fitted_error() {
        let error = SdkError::NotFitted;
        assert_eq!(error.to_string(), "Estimator not fitted");
    }

    #[test]
    fn test_missing_label_error() {
        let error = SdkError::MissingLabel(42);
        assert_eq!(error.to_string(), "Missing label for user 42");
    }

    #[test]
    fn test_runtime_error_conversion() {
        let runtime = promo_runtime::RuntimeError::EmptyInput("no rows".to_string());
        let error: SdkError = runtime.into();
        assert!(error.to_string().contains("Runtime error"));
        assert!(error.to_string().contains("no rows"));
    }

    #[test]
    fn test_missing_config_file_is_io_error() {
        let io_error = std::fs::read_to_string("/nonexistent/estimator.yaml").unwrap_err();
        let error: SdkError = io_error.into();

        assert!(matches!(
            &error,
            SdkError::IoError(e) if e.kind() == std::io::ErrorKind::NotFound
        ));
        assert!(error.to_string().starts_with("I/O error"));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_error = serde_yaml::from_str::<Vec<f64>>("[1.0, oops").unwrap_err();
        let error: SdkError = yaml_error.into();
        assert!(matches!(error, SdkError::ConfigParseError(_)));
        assert!(error.to_string().starts_with("Config parse error"));
    }

    #[test]
    fn test_label_errors_name_the_user() {
        assert_eq!(
            SdkError::DuplicateLabel(7).to_string(),
            "Duplicate label for user 7"
        );
        assert_eq!(SdkError::EmptyTrainingSet.to_string(), "Empty training set");
    }
}
