//! Error type shared by the generator, the acceptance tests and the CLI.

use thiserror::Error;

/// Everything that can go wrong in pseudolab.
///
/// A generator whose state collapses to zero is *not* an error: it simply
/// returns a shorter sequence (see [`crate::GenerationResult::terminated_early`]).
#[derive(Debug, Error)]
pub enum Error {
    /// A parameter is outside the domain the algorithms are defined on:
    /// confidence outside (0, 1), fewer than two intervals, a negative seed,
    /// or a configuration file that cannot be understood.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A test was handed fewer samples than it needs.
    #[error("insufficient data for {test}: need at least {needed} samples, got {got}")]
    InsufficientData {
        test: &'static str,
        needed: usize,
        got: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A result could not be encoded as JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_message() {
        let err = Error::configuration("confidence must lie in (0, 1), got 1.5");
        assert_eq!(
            err.to_string(),
            "configuration error: confidence must lie in (0, 1), got 1.5"
        );
    }

    #[test]
    fn test_insufficient_data_message() {
        let err = Error::InsufficientData {
            test: "variance test",
            needed: 2,
            got: 1,
        };
        assert_eq!(
            err.to_string(),
            "insufficient data for variance test: need at least 2 samples, got 1"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_serialization_conversion() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Serialization(_)));
        assert!(err.to_string().starts_with("serialization error: "));
    }
}
