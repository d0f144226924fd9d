//! Name resolution for generated fields and test methods.
//!
//! - [`NamingPolicy`] holds the configured patterns, parsed once
//! - [`resolve_field_name`] names the field backing a constructor parameter
//! - [`unique_method_name`], [`unique_operator_name`] and [`indexer_name`]
//!   disambiguate overloaded members
//!
//! Every function here is pure: equal inputs always give equal names.

mod field;
mod unique;

pub use field::{property_field_name, resolve_field_name};
pub use unique::{indexer_name, unique_method_name, unique_operator_name};

use sg_core::{ConfigError, NamingContext, NamingOptions, NamingPattern};

/// The configured naming patterns, parsed and validated.
///
/// # Examples
///
/// ```
/// use sg_core::{NamingContext, NamingOptions};
/// use sg_generate::naming::NamingPolicy;
///
/// let policy = NamingPolicy::from_options(&NamingOptions::default()).unwrap();
/// let context = NamingContext::new("Foo").with_member_name("Run");
/// assert_eq!(policy.can_call_method.render(&context), "CanCallRun");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingPolicy {
    /// Field holding a plain constructor dependency.
    pub dependency_field: NamingPattern,
    /// Field holding a mocked constructor dependency.
    pub mock_field: NamingPattern,
    /// Shared auto-generated-value field.
    pub auto_fixture_field: NamingPattern,
    /// Field holding the system under test.
    pub target_field: NamingPattern,
    /// Construction test.
    pub can_construct: NamingPattern,
    /// Invalid string argument test.
    pub cannot_construct_with_invalid: NamingPattern,
    /// Null constructor argument test.
    pub cannot_construct_with_null: NamingPattern,
    /// Constructor-initialized property test.
    pub is_initialized_correctly: NamingPattern,
    /// Read/write property test.
    pub can_set_and_get_property: NamingPattern,
    /// Read-only property test.
    pub can_get_property: NamingPattern,
    /// Method call test.
    pub can_call_method: NamingPattern,
    /// Null method argument test.
    pub cannot_call_method_with_null: NamingPattern,
    /// Operator test.
    pub can_call_operator: NamingPattern,
    /// Indexer read test.
    pub can_get_indexer: NamingPattern,
    /// Indexer write-then-read test.
    pub can_set_and_get_indexer: NamingPattern,
    /// Repeated dispose test.
    pub can_call_dispose_multiple_times: NamingPattern,
}

impl NamingPolicy {
    /// Parses every pattern in `options`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any pattern is invalid.
    pub fn from_options(options: &NamingOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        let parse = NamingOptions::parse;
        Ok(Self {
            dependency_field: parse("dependency_field", &options.dependency_field)?,
            mock_field: parse("mock_field", &options.mock_field)?,
            auto_fixture_field: parse("auto_fixture_field", &options.auto_fixture_field)?,
            target_field: parse("target_field", &options.target_field)?,
            can_construct: parse("can_construct", &options.can_construct)?,
            cannot_construct_with_invalid: parse(
                "cannot_construct_with_invalid",
                &options.cannot_construct_with_invalid,
            )?,
            cannot_construct_with_null: parse(
                "cannot_construct_with_null",
                &options.cannot_construct_with_null,
            )?,
            is_initialized_correctly: parse(
                "is_initialized_correctly",
                &options.is_initialized_correctly,
            )?,
            can_set_and_get_property: parse(
                "can_set_and_get_property",
                &options.can_set_and_get_property,
            )?,
            can_get_property: parse("can_get_property", &options.can_get_property)?,
            can_call_method: parse("can_call_method", &options.can_call_method)?,
            cannot_call_method_with_null: parse(
                "cannot_call_method_with_null",
                &options.cannot_call_method_with_null,
            )?,
            can_call_operator: parse("can_call_operator", &options.can_call_operator)?,
            can_get_indexer: parse("can_get_indexer", &options.can_get_indexer)?,
            can_set_and_get_indexer: parse(
                "can_set_and_get_indexer",
                &options.can_set_and_get_indexer,
            )?,
            can_call_dispose_multiple_times: parse(
                "can_call_dispose_multiple_times",
                &options.can_call_dispose_multiple_times,
            )?,
        })
    }

    /// Name of the field holding the system under test for `context`.
    #[must_use]
    pub fn target_field_name(&self, context: &NamingContext) -> String {
        self.target_field.render(context)
    }

    /// Name of the shared auto-generated-value field for `context`.
    #[must_use]
    pub fn auto_fixture_field_name(&self, context: &NamingContext) -> String {
        self.auto_fixture_field.render(context)
    }
}
