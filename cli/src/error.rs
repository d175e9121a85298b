#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use derive_more::{Display, From};
use oas2gql_core::AppError;

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// IO Error wrapper.
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// Loading or converting the document failed.
    #[display("{}", _0)]
    App(AppError),

    /// Remote document could not be fetched.
    #[from(ignore)]
    #[display("Fetch Error: {}", _0)]
    Fetch(String),

    /// General failure message.
    #[display("Operation failed: {}", _0)]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for CliError {}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_is_shown_verbatim() {
        let err: CliError = AppError::Parse("bad".into()).into();
        assert_eq!(err.to_string(), "Parse Error: bad");
    }
}
