//! Error types for the form engine.
//!
//! This module defines the centralized error type [`FormError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented using the
//! `thiserror` crate for automatic `Error` trait implementation.
//!
//! Validation output is not an error: a validator reports field problems as
//! data (an [`Errors`](crate::domain::Errors) map). [`FormError::Validator`] is
//! reserved for the validator itself failing to produce a result.

use thiserror::Error;

/// The main error type for form engine operations.
///
/// Errors raised by caller-supplied validators or submit callbacks pass through
/// the engine unchanged; the engine never recovers from them locally.
///
/// # Examples
///
/// ```
/// use formstate::FormError;
///
/// fn lookup_username() -> Result<(), FormError> {
///     Err(FormError::Validator("username service unavailable".to_string()))
/// }
///
/// assert!(lookup_username().is_err());
/// ```
#[derive(Debug, Error)]
pub enum FormError {
    /// The validator failed to produce a result.
    ///
    /// Raised by the caller's validator; the validation run that produced it
    /// dispatches nothing further.
    #[error("Validator error: {0}")]
    Validator(String),

    /// The submit callback failed.
    ///
    /// The form is left with `is_submitting` set, exactly as it was when the
    /// callback started.
    #[error("Submit error: {0}")]
    Submit(String),

    /// Configuration is invalid.
    ///
    /// Occurs when a configuration value cannot be interpreted, such as an
    /// unknown validation ordering name.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors raised while reading a configuration file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A TOML configuration document could not be parsed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// A specialized `Result` type for form engine operations.
///
/// # Examples
///
/// ```
/// use formstate::Result;
///
/// fn noop() -> Result<()> {
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_category() {
        let err = FormError::Validator("timeout".to_string());
        assert_eq!(err.to_string(), "Validator error: timeout");

        let err = FormError::Submit("rejected".to_string());
        assert_eq!(err.to_string(), "Submit error: rejected");
    }

    #[test]
    fn test_io_error_converts() {
        fn read() -> Result<()> {
            let io: std::io::Result<()> =
                Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
            io?;
            Ok(())
        }

        assert!(matches!(read(), Err(FormError::Io(_))));
    }
}
