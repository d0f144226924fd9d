//! Recovery of constructor-parameter to field assignments.
//!
//! [`DependencyExtractor`] walks the top-level statements of every
//! constructor body and records an association whenever a member is assigned
//! from one of that constructor's parameters. The assigned value may be
//! wrapped in a cast or be the left side of a null-coalescing expression:
//!
//! ```text
//! _name = name;
//! this._logger = logger ?? throw new ArgumentNullException(nameof(logger));
//! _count = (int)count;
//! ```
//!
//! Nested blocks, chained constructor calls and assignments through other
//! locals are not followed.

use sg_core::DependencyMap;
use tracing::trace;

use crate::declaration::{ConstructorDeclaration, ConstructorStatement, ValueExpression};

const THIS_PREFIX: &str = "this.";

/// Extracts parameter-to-field associations from constructor bodies.
///
/// # Examples
///
/// ```
/// use sg_model::{
///     ConstructorDeclaration, ConstructorStatement, DependencyExtractor, ParameterDeclaration,
///     ValueExpression,
/// };
/// use sg_core::TypeRef;
///
/// let constructor = ConstructorDeclaration {
///     parameters: vec![ParameterDeclaration {
///         name: "name".into(),
///         type_ref: TypeRef::string(),
///         has_null_default: false,
///     }],
///     body: vec![ConstructorStatement::assign("this._name", ValueExpression::identifier("name"))],
///     ..ConstructorDeclaration::default()
/// };
///
/// let map = DependencyExtractor::new().extract(&[constructor]);
/// assert_eq!(map.fields_for_parameter("name"), ["_name".to_owned()]);
/// ```
#[derive(Debug, Default)]
pub struct DependencyExtractor {
    _private: (),
}

impl DependencyExtractor {
    /// Creates a new extractor.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a dependency map holding the parameter-to-field associations
    /// of every constructor.
    #[must_use]
    pub fn extract(&self, constructors: &[ConstructorDeclaration]) -> DependencyMap {
        let mut map = DependencyMap::new();
        self.extract_into(constructors, &mut map);
        map
    }

    /// Adds the parameter-to-field associations of every constructor to `map`.
    pub fn extract_into(&self, constructors: &[ConstructorDeclaration], map: &mut DependencyMap) {
        for constructor in constructors {
            for statement in &constructor.body {
                let ConstructorStatement::Assign { target, value } = statement else {
                    continue;
                };
                let Some(parameter) = assigned_parameter(value, constructor) else {
                    continue;
                };
                let field = target.strip_prefix(THIS_PREFIX).unwrap_or(target);
                trace!(parameter, field, "Recorded constructor assignment");
                map.record_parameter_field(parameter, field);
            }
        }
    }
}

/// Returns the constructor parameter whose value `value` carries, if any.
fn assigned_parameter<'a>(
    value: &ValueExpression,
    constructor: &'a ConstructorDeclaration,
) -> Option<&'a str> {
    match value {
        ValueExpression::Identifier(name) => constructor
            .parameters
            .iter()
            .find(|p| p.name == *name)
            .map(|p| p.name.as_str()),
        ValueExpression::Coalesce(inner, _) | ValueExpression::Cast(inner) => {
            assigned_parameter(inner, constructor)
        }
        ValueExpression::Throw | ValueExpression::Other => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::ParameterDeclaration;
    use sg_core::TypeRef;

    fn parameter(name: &str) -> ParameterDeclaration {
        ParameterDeclaration {
            name: name.to_owned(),
            type_ref: TypeRef::string(),
            has_null_default: false,
        }
    }

    fn constructor(params: &[&str], body: Vec<ConstructorStatement>) -> ConstructorDeclaration {
        ConstructorDeclaration {
            parameters: params.iter().copied().map(parameter).collect(),
            body,
            ..ConstructorDeclaration::default()
        }
    }

    #[test]
    fn test_direct_assignment() {
        let ctor = constructor(
            &["name"],
            vec![ConstructorStatement::assign("_name", ValueExpression::identifier("name"))],
        );
        let map = DependencyExtractor::new().extract(&[ctor]);
        assert_eq!(map.fields_for_parameter("name"), ["_name".to_owned()]);
        assert_eq!(map.parameter_for_member("_name"), Some("name"));
    }

    #[test]
    fn test_coalesce_and_cast_are_unwrapped() {
        let ctor = constructor(
            &["logger", "count"],
            vec![
                ConstructorStatement::assign(
                    "this._logger",
                    ValueExpression::coalesce(
                        ValueExpression::identifier("logger"),
                        ValueExpression::Throw,
                    ),
                ),
                ConstructorStatement::assign(
                    "Count",
                    ValueExpression::cast(ValueExpression::identifier("count")),
                ),
            ],
        );
        let map = DependencyExtractor::new().extract(&[ctor]);
        assert_eq!(map.fields_for_parameter("logger"), ["_logger".to_owned()]);
        assert_eq!(map.fields_for_parameter("count"), ["Count".to_owned()]);
    }

    #[test]
    fn test_non_parameter_values_are_ignored() {
        let ctor = constructor(
            &["name"],
            vec![
                ConstructorStatement::assign("_other", ValueExpression::identifier("local")),
                ConstructorStatement::assign("_value", ValueExpression::Other),
                ConstructorStatement::Other,
            ],
        );
        let map = DependencyExtractor::new().extract(&[ctor]);
        assert_eq!(map.parameter_count(), 0);
    }

    #[test]
    fn test_identifier_must_belong_to_the_same_constructor() {
        let first = constructor(&["a"], vec![]);
        let second = constructor(
            &["b"],
            vec![ConstructorStatement::assign("_a", ValueExpression::identifier("a"))],
        );
        let map = DependencyExtractor::new().extract(&[first, second]);
        assert!(map.fields_for_parameter("a").is_empty());
    }

    #[test]
    fn test_one_parameter_many_fields_across_constructors() {
        let first = constructor(
            &["name"],
            vec![ConstructorStatement::assign("_name", ValueExpression::identifier("name"))],
        );
        let second = constructor(
            &["name"],
            vec![
                ConstructorStatement::assign("_name", ValueExpression::identifier("name")),
                ConstructorStatement::assign("Title", ValueExpression::identifier("name")),
            ],
        );
        let map = DependencyExtractor::new().extract(&[first, second]);
        assert_eq!(
            map.fields_for_parameter("name"),
            ["_name".to_owned(), "Title".to_owned()]
        );
    }
}
