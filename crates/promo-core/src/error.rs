//! Error types for Promo Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Text that names no part-of-day category
    #[error("Unknown part of day: {0}")]
    UnknownPartOfDay(String),

    /// Field value outside its allowed domain
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_part_of_day_message() {
        let error = CoreError::UnknownPartOfDay("Dusk".to_string());
        assert_eq!(error.to_string(), "Unknown part of day: Dusk");
    }

    #[test]
    fn test_invalid_value_message() {
        let error = CoreError::InvalidValue("clicked = 7".to_string());
        assert!(error.to_string().contains("Invalid value"));
        assert!(error.to_string().contains("clicked = 7"));
    }
}
