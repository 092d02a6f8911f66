//! Error taxonomy for randimg.

use thiserror::Error;

/// Malformed or unrecognized configuration input.
///
/// Every variant carries the raw token that caused the rejection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The `format` value is not one of the supported MIME types.
    #[error("Invalid format: {value} (in '{token}'). Valid: image/jpeg, image/png")]
    InvalidFormat {
        /// The offending raw token.
        token: String,
        /// The lower-cased format value.
        value: String,
    },

    /// A key that requires a value was given without one.
    #[error("Missing value for '{token}'")]
    MissingValue {
        /// The offending raw token.
        token: String,
    },

    /// A token matched no recognized key and is not a bare image count.
    #[error("Unknown arguments provided: {token}")]
    UnknownArgument {
        /// The offending raw token.
        token: String,
    },
}

impl ValidationError {
    /// The raw input token that was rejected.
    #[must_use]
    pub fn token(&self) -> &str {
        match self {
            Self::InvalidFormat { token, .. }
            | Self::MissingValue { token }
            | Self::UnknownArgument { token } => token,
        }
    }
}

/// Orchestration precondition failures, raised before any image is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The configuration asks for help; nothing may be generated.
    #[error("Help was requested; generation skipped")]
    HelpRequested,

    /// The effective generator set is empty.
    #[error("No generators available: the catalog is empty and none were selected")]
    NoGeneratorsAvailable,

    /// A selected generator name is not in the catalog.
    #[error("Unknown generator '{0}'")]
    UnknownGeneratorName(String),
}

/// Top-level errors surfaced by the front ends.
#[derive(Debug, Error)]
pub enum ImageError {
    /// Configuration input was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Generation could not start.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file or control state could not be loaded.
    #[error("Config error: {0}")]
    Config(String),

    /// A surface could not be encoded to the requested format.
    #[error("Image encoding error: {0}")]
    Encode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_exposed_for_every_variant() {
        let invalid = ValidationError::InvalidFormat {
            token: "format:image/gif".into(),
            value: "image/gif".into(),
        };
        assert_eq!(invalid.token(), "format:image/gif");
        assert_eq!(ValidationError::MissingValue { token: "target".into() }.token(), "target");
        assert_eq!(ValidationError::UnknownArgument { token: "bogus:1".into() }.token(), "bogus:1");
    }

    #[test]
    fn unknown_argument_message_names_token() {
        let err = ValidationError::UnknownArgument { token: "5idth:50".into() };
        assert_eq!(err.to_string(), "Unknown arguments provided: 5idth:50");
    }

    #[test]
    fn image_error_is_transparent_over_validation() {
        let err: ImageError = ValidationError::UnknownArgument { token: "x".into() }.into();
        assert_eq!(err.to_string(), "Unknown arguments provided: x");
    }
}
