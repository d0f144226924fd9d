//! Error types for the sg-core crate.
//!
//! This module provides two error types:
//!
//! - [`CoreError`] for programming-contract violations detected while
//!   building or mutating a [`TypeModel`](crate::TypeModel)
//! - [`ConfigError`] for configuration parsing and validation failures

/// A programming-contract violation.
///
/// These errors represent unconditionally broken invariants in the calling
/// code or in the input model (a member id that does not exist, a required
/// reference that was never supplied). They are returned at the call that
/// detects them and are not meant to be recovered from locally.
///
/// # Examples
///
/// ```
/// use sg_core::CoreError;
///
/// let error = CoreError::invalid_argument("default_constructor", "no constructor with id 3");
/// assert!(error.to_string().contains("default_constructor"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// An argument violated the contract of the operation it was passed to.
    #[error("invalid argument '{argument}': {reason}")]
    InvalidArgument {
        /// The name of the offending argument.
        argument: &'static str,
        /// Explanation of the violated contract.
        reason: String,
    },
}

impl CoreError {
    /// Creates a new [`CoreError::InvalidArgument`] error.
    #[inline]
    pub fn invalid_argument(argument: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument,
            reason: reason.into(),
        }
    }
}

/// Errors that can occur during configuration loading and validation.
///
/// # Examples
///
/// ```
/// use sg_core::ConfigError;
///
/// let error = ConfigError::InvalidPattern {
///     option: "dependency_field".to_owned(),
///     pattern: "_{nope}".to_owned(),
///     reason: "unknown token 'nope'".to_owned(),
/// };
/// assert!(error.to_string().contains("dependency_field"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A naming pattern could not be parsed.
    #[error("invalid naming pattern for '{option}' ({pattern}): {reason}")]
    InvalidPattern {
        /// The name of the option holding the pattern.
        option: String,
        /// The offending pattern text.
        pattern: String,
        /// Explanation of why the pattern is invalid.
        reason: String,
    },

    /// A configuration option has an invalid value.
    #[error("invalid configuration option '{option}': {reason}")]
    InvalidOption {
        /// The name of the invalid option.
        option: String,
        /// Explanation of why the option is invalid.
        reason: String,
    },

    /// Failed to parse the configuration document.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let error = CoreError::invalid_argument("selector", "method 7 does not exist");
        let msg = error.to_string();
        assert!(msg.contains("selector"));
        assert!(msg.contains("method 7 does not exist"));
    }

    #[test]
    fn test_invalid_pattern_display() {
        let error = ConfigError::InvalidPattern {
            option: "mock_field".to_owned(),
            pattern: "_{parameterName".to_owned(),
            reason: "unclosed '{'".to_owned(),
        };
        let msg = error.to_string();
        assert!(msg.contains("mock_field"));
        assert!(msg.contains("unclosed"));
    }

    #[test]
    fn test_invalid_option_display() {
        let error = ConfigError::InvalidOption {
            option: "target_field".to_owned(),
            reason: "must not be empty".to_owned(),
        };
        let msg = error.to_string();
        assert!(msg.contains("target_field"));
        assert!(msg.contains("must not be empty"));
    }
}
