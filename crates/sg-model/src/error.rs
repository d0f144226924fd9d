//! Error types for the sg-model crate.

use sg_core::CoreError;

/// Errors that can occur while building a structural model.
///
/// # Error Recovery Strategy
///
/// - **Construction errors** ([`ModelError::Construction`]): fatal for the
///   type being built; other types can still be processed
/// - **Contract violations** ([`ModelError::Contract`]): the declaration
///   itself is malformed (for example a default constructor index out of
///   range); fatal for the type
/// - **Parse errors** ([`ModelError::Parse`]): the source document could not
///   be read at all; fatal for the whole run
///
/// Interface lookups that fail inside the provider are not errors; see
/// [`ImplementationLookup::Anomaly`](crate::ImplementationLookup::Anomaly).
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The provider could not resolve a declared symbol for the declaration.
    #[error("cannot build model for '{declaration}': {reason}")]
    Construction {
        /// The declaration identity that was requested.
        declaration: String,
        /// Explanation of the failure.
        reason: String,
    },

    /// The declaration violates a model contract.
    #[error("malformed declaration: {0}")]
    Contract(#[from] CoreError),

    /// The source document could not be parsed.
    #[error("failed to parse source model: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ModelError {
    /// Creates a [`ModelError::Construction`] error.
    #[inline]
    pub fn construction(declaration: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Construction {
            declaration: declaration.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if only the requested type is affected.
    #[inline]
    #[must_use]
    pub const fn is_per_type(&self) -> bool {
        matches!(self, Self::Construction { .. } | Self::Contract(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_display() {
        let err = ModelError::construction("Foo", "declared symbol not found");
        assert!(err.is_per_type());
        assert_eq!(
            err.to_string(),
            "cannot build model for 'Foo': declared symbol not found"
        );
    }

    #[test]
    fn test_contract_from_core_error() {
        let err: ModelError = CoreError::invalid_argument("class_name", "empty").into();
        assert!(err.is_per_type());
        assert!(err.to_string().contains("class_name"));
    }

    #[test]
    fn test_parse_is_not_per_type() {
        let err: ModelError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(!err.is_per_type());
    }
}
