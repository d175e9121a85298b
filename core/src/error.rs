//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// Every conversion failure is scoped to a single schema node or operation;
/// callers decide whether to skip that node and continue.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The document could not be read as OpenAPI JSON/YAML.
    #[from(ignore)]
    #[display("Parse Error: {_0}")]
    Parse(String),

    /// A `$ref` pointer is malformed or its target is missing.
    #[from(ignore)]
    #[display("Reference Error: {_0}")]
    Reference(String),

    /// A primitive tag or composition construct has no GraphQL counterpart.
    #[from(ignore)]
    #[display("Unsupported Schema Kind: {_0}")]
    UnsupportedSchemaKind(String),

    /// An operation has no usable request/response representation.
    #[from(ignore)]
    #[display("Ambiguous Content: {_0}")]
    AmbiguousContent(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
