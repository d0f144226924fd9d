//! Error types for the sg-generate crate.

use sg_core::{ConfigError, CoreError};

/// Errors that can occur while setting up or running generation.
///
/// # Error Recovery Strategy
///
/// - **Missing collaborators** ([`GenerationError::MissingCollaborator`]):
///   a builder was finished without a required part; fatal, fix the caller
/// - **Contract violations** ([`GenerationError::InvalidArgument`]): fatal
///   for the type being generated
/// - **Configuration errors** ([`GenerationError::Config`]): fatal for the
///   whole run
///
/// # Examples
///
/// ```
/// use sg_generate::{GenerationError, TestGenerator};
///
/// let result = TestGenerator::builder().build();
/// assert!(matches!(result, Err(GenerationError::MissingCollaborator("config"))));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// A required collaborator was never supplied.
    #[error("invalid argument: missing required collaborator '{0}'")]
    MissingCollaborator(&'static str),

    /// A model contract was violated.
    #[error(transparent)]
    InvalidArgument(#[from] CoreError),

    /// The configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
