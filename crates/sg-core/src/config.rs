//! Configuration structures for sutgen.
//!
//! - [`GenerationOptions`] - Mock substitution and framework selection
//! - [`NamingOptions`] - Naming patterns for fields and test methods
//! - [`StrategyOptions`] - Per-strategy enable switches
//! - [`Config`] - Root configuration combining all settings
//!
//! All configuration types implement [`Default`] and deserialize with
//! `#[serde(default)]`, so a configuration document only needs to name the
//! options it changes.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{NamingPattern, PatternToken, TypeRef};

/// Mocking framework used for generated tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MockingFrameworkKind {
    /// `Moq` (`new Mock<T>()`, `.Object`).
    #[default]
    Moq,
    /// `NSubstitute` (`Substitute.For<T>()`).
    NSubstitute,
}

/// Test framework whose assertions generated tests use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestFrameworkKind {
    /// xUnit (`Assert.Throws<T>`, `Assert.Equal`).
    #[default]
    XUnit,
    /// NUnit (`Assert.Throws<T>`, `Assert.That`).
    NUnit,
}

/// Options controlling how dependencies are wired into generated tests.
///
/// # Examples
///
/// ```
/// use sg_core::{GenerationOptions, TypeRef};
///
/// let options = GenerationOptions::default();
/// assert!(options.is_mock_substituted(&TypeRef::interface("ILogger")));
/// assert!(!options.is_mock_substituted(&TypeRef::string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    /// Prefer a shared auto-generated-value field (`_fixture`) for values.
    pub use_auto_fixture_field: bool,

    /// Substitute every interface-typed dependency with a mock.
    pub mock_interfaces: bool,

    /// Additional type names to substitute with mocks.
    pub mocked_types: Vec<String>,

    /// Generate tests for types that are not publicly visible.
    pub emit_tests_for_internals: bool,

    /// Use the property tester asset for read/write property tests.
    pub use_property_tester: bool,

    /// Mocking framework.
    pub mocking_framework: MockingFrameworkKind,

    /// Test framework.
    pub test_framework: TestFrameworkKind,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            use_auto_fixture_field: false,
            mock_interfaces: true,
            mocked_types: Vec::new(),
            emit_tests_for_internals: true,
            use_property_tester: false,
            mocking_framework: MockingFrameworkKind::Moq,
            test_framework: TestFrameworkKind::XUnit,
        }
    }
}

impl GenerationOptions {
    /// Returns `true` if values of `type_ref` are supplied through a mock.
    #[must_use]
    pub fn is_mock_substituted(&self, type_ref: &TypeRef) -> bool {
        (self.mock_interfaces && type_ref.is_interface())
            || self.mocked_types.iter().any(|name| *name == type_ref.name)
    }
}

/// Naming patterns for generated fields and test methods.
///
/// See [`NamingPattern`] for the pattern syntax.
///
/// # Examples
///
/// ```
/// use sg_core::NamingOptions;
///
/// let naming = NamingOptions::default();
/// assert_eq!(naming.dependency_field, "_{parameterName:camel}");
/// assert_eq!(naming.target_field, "_testClass");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingOptions {
    /// Field holding a plain (non-mocked) constructor dependency.
    pub dependency_field: String,
    /// Field holding a mocked constructor dependency.
    pub mock_field: String,
    /// Shared auto-generated-value field.
    pub auto_fixture_field: String,
    /// Field holding the system under test.
    pub target_field: String,
    /// Test constructing the type through each constructor.
    pub can_construct: String,
    /// Test rejecting an invalid string constructor argument.
    pub cannot_construct_with_invalid: String,
    /// Test rejecting a null constructor argument.
    pub cannot_construct_with_null: String,
    /// Test checking a property initialized from a constructor argument.
    pub is_initialized_correctly: String,
    /// Test round-tripping a read/write property.
    pub can_set_and_get_property: String,
    /// Test reading a read-only property.
    pub can_get_property: String,
    /// Test calling a method.
    pub can_call_method: String,
    /// Test rejecting a null method argument.
    pub cannot_call_method_with_null: String,
    /// Test calling an operator.
    pub can_call_operator: String,
    /// Test reading through an indexer.
    pub can_get_indexer: String,
    /// Test round-tripping through an indexer.
    pub can_set_and_get_indexer: String,
    /// Test disposing more than once.
    pub can_call_dispose_multiple_times: String,
}

impl Default for NamingOptions {
    fn default() -> Self {
        Self {
            dependency_field: "_{parameterName:camel}".to_owned(),
            mock_field: "_{parameterName:camel}".to_owned(),
            auto_fixture_field: "_fixture".to_owned(),
            target_field: "_testClass".to_owned(),
            can_construct: "CanConstruct".to_owned(),
            cannot_construct_with_invalid: "CannotConstructWith{invalidValue}{parameterName:pascal}"
                .to_owned(),
            cannot_construct_with_null: "CannotConstructWithNull{parameterName:pascal}".to_owned(),
            is_initialized_correctly: "{memberName}IsInitializedCorrectly".to_owned(),
            can_set_and_get_property: "CanSetAndGet{memberName}".to_owned(),
            can_get_property: "CanGet{memberName}".to_owned(),
            can_call_method: "CanCall{memberName}".to_owned(),
            cannot_call_method_with_null: "CannotCall{memberName}WithNull{parameterName:pascal}"
                .to_owned(),
            can_call_operator: "CanCall{memberName}Operator".to_owned(),
            can_get_indexer: "CanGet{memberName}".to_owned(),
            can_set_and_get_indexer: "CanSetAndGet{memberName}".to_owned(),
            can_call_dispose_multiple_times: "CanCallDisposeMultipleTimes".to_owned(),
        }
    }
}

impl NamingOptions {
    /// Every pattern paired with its option name.
    #[must_use]
    pub fn patterns(&self) -> [(&'static str, &str); 16] {
        [
            ("dependency_field", self.dependency_field.as_str()),
            ("mock_field", self.mock_field.as_str()),
            ("auto_fixture_field", self.auto_fixture_field.as_str()),
            ("target_field", self.target_field.as_str()),
            ("can_construct", self.can_construct.as_str()),
            ("cannot_construct_with_invalid", self.cannot_construct_with_invalid.as_str()),
            ("cannot_construct_with_null", self.cannot_construct_with_null.as_str()),
            ("is_initialized_correctly", self.is_initialized_correctly.as_str()),
            ("can_set_and_get_property", self.can_set_and_get_property.as_str()),
            ("can_get_property", self.can_get_property.as_str()),
            ("can_call_method", self.can_call_method.as_str()),
            ("cannot_call_method_with_null", self.cannot_call_method_with_null.as_str()),
            ("can_call_operator", self.can_call_operator.as_str()),
            ("can_get_indexer", self.can_get_indexer.as_str()),
            ("can_set_and_get_indexer", self.can_set_and_get_indexer.as_str()),
            ("can_call_dispose_multiple_times", self.can_call_dispose_multiple_times.as_str()),
        ]
    }

    /// Parses the pattern stored under `option`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] if the pattern does not parse.
    pub fn parse(option: &str, pattern: &str) -> Result<NamingPattern, ConfigError> {
        NamingPattern::parse(pattern).map_err(|e| ConfigError::InvalidPattern {
            option: option.to_owned(),
            pattern: pattern.to_owned(),
            reason: e.to_string(),
        })
    }

    /// Validates every pattern.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] for a pattern that does not
    /// parse, and [`ConfigError::InvalidOption`] for an empty pattern or a
    /// field pattern that does not vary with the parameter name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (option, pattern) in self.patterns() {
            if pattern.trim().is_empty() {
                return Err(ConfigError::InvalidOption {
                    option: option.to_owned(),
                    reason: "must not be empty".to_owned(),
                });
            }
            let parsed = Self::parse(option, pattern)?;
            let per_parameter = matches!(option, "dependency_field" | "mock_field");
            if per_parameter && !parsed.uses(PatternToken::ParameterName) {
                return Err(ConfigError::InvalidOption {
                    option: option.to_owned(),
                    reason: "must reference {parameterName}".to_owned(),
                });
            }
        }
        Ok(())
    }
}

/// Identifies the switch in [`StrategyOptions`] that enables a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyToggle {
    /// [`StrategyOptions::can_construct`]
    CanConstruct,
    /// [`StrategyOptions::string_parameter_checks`]
    StringParameterChecks,
    /// [`StrategyOptions::null_parameter_checks`]
    NullParameterChecks,
    /// [`StrategyOptions::initialized_properties`]
    InitializedProperties,
    /// [`StrategyOptions::property_tests`]
    PropertyTests,
    /// [`StrategyOptions::method_tests`]
    MethodTests,
    /// [`StrategyOptions::method_null_checks`]
    MethodNullChecks,
    /// [`StrategyOptions::operator_tests`]
    OperatorTests,
    /// [`StrategyOptions::indexer_tests`]
    IndexerTests,
    /// [`StrategyOptions::disposable_tests`]
    DisposableTests,
}

/// Per-strategy enable switches. Everything is enabled by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct StrategyOptions {
    /// Construct the type through each accessible constructor.
    pub can_construct: bool,
    /// Reject null, empty and whitespace string constructor arguments.
    pub string_parameter_checks: bool,
    /// Reject null reference constructor arguments.
    pub null_parameter_checks: bool,
    /// Check properties initialized from constructor arguments.
    pub initialized_properties: bool,
    /// Read/write and read-only property tests.
    pub property_tests: bool,
    /// Method call tests.
    pub method_tests: bool,
    /// Reject null reference method arguments.
    pub method_null_checks: bool,
    /// Operator call tests.
    pub operator_tests: bool,
    /// Indexer tests.
    pub indexer_tests: bool,
    /// Repeated-dispose tests for disposable types.
    pub disposable_tests: bool,
}

impl Default for StrategyOptions {
    fn default() -> Self {
        Self {
            can_construct: true,
            string_parameter_checks: true,
            null_parameter_checks: true,
            initialized_properties: true,
            property_tests: true,
            method_tests: true,
            method_null_checks: true,
            operator_tests: true,
            indexer_tests: true,
            disposable_tests: true,
        }
    }
}

impl StrategyOptions {
    /// Returns the switch for `toggle`.
    #[must_use]
    pub const fn is_enabled(&self, toggle: StrategyToggle) -> bool {
        match toggle {
            StrategyToggle::CanConstruct => self.can_construct,
            StrategyToggle::StringParameterChecks => self.string_parameter_checks,
            StrategyToggle::NullParameterChecks => self.null_parameter_checks,
            StrategyToggle::InitializedProperties => self.initialized_properties,
            StrategyToggle::PropertyTests => self.property_tests,
            StrategyToggle::MethodTests => self.method_tests,
            StrategyToggle::MethodNullChecks => self.method_null_checks,
            StrategyToggle::OperatorTests => self.operator_tests,
            StrategyToggle::IndexerTests => self.indexer_tests,
            StrategyToggle::DisposableTests => self.disposable_tests,
        }
    }
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use sg_core::Config;
///
/// let config = Config::from_json_str(r#"{"generation": {"use_auto_fixture_field": true}}"#).unwrap();
/// assert!(config.generation.use_auto_fixture_field);
/// assert_eq!(config.naming.target_field, "_testClass");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dependency wiring and framework selection.
    pub generation: GenerationOptions,

    /// Naming patterns.
    pub naming: NamingOptions,

    /// Strategy switches.
    pub strategies: StrategyOptions,
}

impl Config {
    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and the errors of
    /// [`Config::validate`] otherwise.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// See [`NamingOptions::validate`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.naming.validate()
    }
}
