//! Field names for constructor dependencies.

use sg_core::{GenerationOptions, NamingContext, ParameterModel, PropertyModel, TypeModel, TypeRef};

use super::NamingPolicy;

/// Suffix added to a parameter name that collides with the shared fixture field.
const FIXTURE_COLLISION_SUFFIX: &str = "Param";

/// Resolves the name of the test-class field that supplies `parameter`.
///
/// 1. The base name comes from the mock-field pattern when the parameter
///    type is mock-substituted, and from the dependency-field pattern
///    otherwise.
/// 2. When the shared fixture field is in use and the base name equals its
///    name, the base name is recomputed from `{parameter}Param`.
/// 3. When constructors of `model` declare the parameter name (ignoring
///    case) with two or more distinct types, the formatted type name is
///    appended.
///
/// # Examples
///
/// ```
/// use sg_core::{ConstructorModel, GenerationOptions, NamingContext, NamingOptions};
/// use sg_core::{ParameterModel, TypeModelBuilder, TypeRef};
/// use sg_generate::naming::{NamingPolicy, resolve_field_name};
///
/// let text = ParameterModel::new("a", TypeRef::string());
/// let number = ParameterModel::new("a", TypeRef::value("Int32"));
/// let model = TypeModelBuilder::new("C")
///     .constructor(ConstructorModel::new([text.clone()]))
///     .constructor(ConstructorModel::new([number.clone()]))
///     .build()
///     .unwrap();
///
/// let policy = NamingPolicy::from_options(&NamingOptions::default()).unwrap();
/// let options = GenerationOptions::default();
/// let context = NamingContext::new("C");
/// assert_eq!(resolve_field_name(&text, &model, &context, &policy, &options), "_aString");
/// assert_eq!(resolve_field_name(&number, &model, &context, &policy, &options), "_aInt32");
/// ```
#[must_use]
pub fn resolve_field_name(
    parameter: &ParameterModel,
    model: &TypeModel,
    context: &NamingContext,
    policy: &NamingPolicy,
    options: &GenerationOptions,
) -> String {
    let mut name = base_name(&parameter.name, &parameter.type_ref, context, policy, options);
    if parameter_types_differ(parameter, model) {
        name.push_str(&parameter.type_ref.formatted_name());
    }
    name
}

/// Resolves the name of the field that feeds `property` in an object
/// initializer.
#[must_use]
pub fn property_field_name(
    property: &PropertyModel,
    context: &NamingContext,
    policy: &NamingPolicy,
    options: &GenerationOptions,
) -> String {
    base_name(&property.name, &property.type_ref, context, policy, options)
}

fn base_name(
    name: &str,
    type_ref: &TypeRef,
    context: &NamingContext,
    policy: &NamingPolicy,
    options: &GenerationOptions,
) -> String {
    let pattern = if options.is_mock_substituted(type_ref) {
        &policy.mock_field
    } else {
        &policy.dependency_field
    };
    let base = pattern.render(&context.with_parameter_name(name));
    if options.use_auto_fixture_field && base == policy.auto_fixture_field_name(context) {
        pattern.render(&context.with_parameter_name(format!("{name}{FIXTURE_COLLISION_SUFFIX}")))
    } else {
        base
    }
}

/// Returns `true` if constructors declare `parameter`'s name, ignoring case,
/// with more than one type.
fn parameter_types_differ(parameter: &ParameterModel, model: &TypeModel) -> bool {
    let mut types = model
        .constructors()
        .iter()
        .flat_map(|c| &c.parameters)
        .filter(|p| p.name.eq_ignore_ascii_case(&parameter.name))
        .map(|p| &p.type_ref);
    let Some(first) = types.next() else {
        return false;
    };
    types.any(|t| !t.is_same_type(first))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sg_core::{ConstructorModel, NamingOptions, TypeModelBuilder};

    fn policy() -> NamingPolicy {
        NamingPolicy::from_options(&NamingOptions::default()).unwrap()
    }

    fn model(constructors: Vec<Vec<ParameterModel>>) -> TypeModel {
        constructors
            .into_iter()
            .fold(TypeModelBuilder::new("C"), |builder, params| {
                builder.constructor(ConstructorModel::new(params))
            })
            .build()
            .unwrap()
    }

    #[test]
    fn test_same_name_same_type_shares_field() {
        let a = ParameterModel::new("a", TypeRef::string());
        let b = ParameterModel::new("b", TypeRef::value("Int32"));
        let model = model(vec![vec![a.clone()], vec![a.clone(), b]]);
        let context = NamingContext::new("C");
        let options = GenerationOptions::default();

        let first = resolve_field_name(&a, &model, &context, &policy(), &options);
        let second = resolve_field_name(&model.constructors()[1].parameters[0], &model, &context, &policy(), &options);
        assert_eq!(first, "_a");
        assert_eq!(first, second);
    }

    #[test]
    fn test_nullable_annotation_is_not_a_distinct_type() {
        let a = ParameterModel::new("a", TypeRef::string());
        let nullable = ParameterModel::new("a", TypeRef::string().nullable());
        let model = model(vec![vec![a.clone()], vec![nullable]]);
        let name = resolve_field_name(&a, &model, &NamingContext::new("C"), &policy(), &GenerationOptions::default());
        assert_eq!(name, "_a");
    }

    #[test]
    fn test_generic_type_suffix() {
        let list = ParameterModel::new(
            "items",
            TypeRef::class("List").with_arguments([TypeRef::string()]),
        );
        let array = ParameterModel::new("items", TypeRef::class("Array"));
        let model = model(vec![vec![list.clone()], vec![array]]);
        let name = resolve_field_name(&list, &model, &NamingContext::new("C"), &policy(), &GenerationOptions::default());
        assert_eq!(name, "_itemsListString");
    }

    #[test]
    fn test_mocked_parameters_use_mock_pattern() {
        let options = GenerationOptions::default();
        let naming = NamingOptions {
            mock_field: "_mock{parameterName:pascal}".to_owned(),
            ..NamingOptions::default()
        };
        let policy = NamingPolicy::from_options(&naming).unwrap();
        let logger = ParameterModel::new("logger", TypeRef::interface("ILogger"));
        let model = model(vec![vec![logger.clone()]]);
        let name = resolve_field_name(&logger, &model, &NamingContext::new("C"), &policy, &options);
        assert_eq!(name, "_mockLogger");
    }

    #[test]
    fn test_fixture_collision_appends_param() {
        let options = GenerationOptions {
            use_auto_fixture_field: true,
            ..GenerationOptions::default()
        };
        let fixture = ParameterModel::new("fixture", TypeRef::class("Fixture"));
        let model = model(vec![vec![fixture.clone()]]);
        let name = resolve_field_name(&fixture, &model, &NamingContext::new("C"), &policy(), &options);
        assert_eq!(name, "_fixtureParam");

        let without = resolve_field_name(
            &fixture,
            &model,
            &NamingContext::new("C"),
            &policy(),
            &GenerationOptions::default(),
        );
        assert_eq!(without, "_fixture");
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let a = ParameterModel::new("a", TypeRef::string());
        let b = ParameterModel::new("a", TypeRef::value("Int32"));
        let model = model(vec![vec![a.clone()], vec![b]]);
        let context = NamingContext::new("C");
        let options = GenerationOptions::default();
        assert_eq!(
            resolve_field_name(&a, &model, &context, &policy(), &options),
            resolve_field_name(&a, &model, &context, &policy(), &options)
        );
    }

    #[test]
    fn test_names_differing_in_case_get_type_suffixes() {
        let a = ParameterModel::new("a", TypeRef::string());
        let upper = ParameterModel::new("A", TypeRef::value("Int32"));
        let b = ParameterModel::new("b", TypeRef::value("Int32"));
        let model = model(vec![vec![a.clone()], vec![upper.clone(), b]]);
        let context = NamingContext::new("C");
        let options = GenerationOptions::default();
        assert_eq!(resolve_field_name(&a, &model, &context, &policy(), &options), "_aString");
        assert_eq!(resolve_field_name(&upper, &model, &context, &policy(), &options), "_aInt32");
    }

    #[test]
    fn test_property_field_name() {
        let property = PropertyModel::new("DisplayName", TypeRef::string()).with_setter();
        let name = property_field_name(&property, &NamingContext::new("C"), &policy(), &GenerationOptions::default());
        assert_eq!(name, "_displayName");
    }
}
