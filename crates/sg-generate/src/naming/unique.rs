//! Disambiguated names for overloaded methods, operators and indexers.

use sg_core::{IndexerModel, MethodModel, OperatorModel, ParameterModel, pascal_case};

const WITH: &str = "With";
const AND: &str = "And";
const NO_PARAMETERS: &str = "WithNoParameters";
const INDEXER: &str = "Indexer";
const INDEXER_FOR: &str = "IndexerFor";

fn join_tokens(base: String, tokens: &[String]) -> String {
    if tokens.is_empty() {
        return base + NO_PARAMETERS;
    }
    let mut name = base;
    name.push_str(WITH);
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            name.push_str(AND);
        }
        name.push_str(&pascal_case(token));
    }
    name
}

fn type_tokens(parameters: &[ParameterModel]) -> Vec<String> {
    parameters
        .iter()
        .map(|p| p.type_ref.formatted_name())
        .collect()
}

fn same_names(left: &[ParameterModel], right: &[ParameterModel]) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .all(|(l, r)| l.name.eq_ignore_ascii_case(&r.name))
}

fn same_types(left: &[ParameterModel], right: &[ParameterModel]) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .all(|(l, r)| l.type_ref.is_same_type(&r.type_ref))
}

/// Returns a name for `method` that is unique among `all_methods`.
///
/// A method whose name no other method shares keeps its name. Otherwise
/// the name is extended with one token per parameter. Parameter names are
/// used unless they cannot tell the overloads apart: when an overload with
/// the same parameter count has the same parameter names (ignoring case),
/// each position where a name matches contributes its formatted type name
/// instead. Generic methods
/// that share their parameter types with an overload lead with their type
/// parameter names. Explicit interface implementations insert
/// `For{Interface}` after the method name.
///
/// # Examples
///
/// ```
/// use sg_core::{MethodModel, MemberId, ParameterModel, TypeRef};
/// use sg_generate::naming::unique_method_name;
///
/// let mut by_type = vec![
///     MethodModel::new("Do", [ParameterModel::new("x", TypeRef::value("Int32"))]),
///     MethodModel::new("Do", [ParameterModel::new("x", TypeRef::string())]),
/// ];
/// by_type[1].id = MemberId::new(1);
/// assert_eq!(unique_method_name(&by_type[0], &by_type), "DoWithInt32");
/// assert_eq!(unique_method_name(&by_type[1], &by_type), "DoWithString");
///
/// let mut by_name = vec![
///     MethodModel::new("Do", [ParameterModel::new("x", TypeRef::value("Int32"))]),
///     MethodModel::new("Do", [ParameterModel::new("y", TypeRef::value("Int32"))]),
/// ];
/// by_name[1].id = MemberId::new(1);
/// assert_eq!(unique_method_name(&by_name[0], &by_name), "DoWithX");
/// assert_eq!(unique_method_name(&by_name[1], &by_name), "DoWithY");
/// ```
#[must_use]
pub fn unique_method_name(method: &MethodModel, all_methods: &[MethodModel]) -> String {
    let siblings: Vec<&MethodModel> = all_methods
        .iter()
        .filter(|m| m.id != method.id && m.name == method.name)
        .collect();
    if siblings.is_empty() {
        return method.name.clone();
    }

    let arity = method.parameters.len();
    let same_arity: Vec<&MethodModel> = siblings
        .into_iter()
        .filter(|m| m.parameters.len() == arity)
        .collect();
    let has_equally_named_overload = same_arity
        .iter()
        .any(|m| same_names(&m.parameters, &method.parameters));
    let has_equally_typed_overload = same_arity
        .iter()
        .any(|m| same_types(&m.parameters, &method.parameters));

    let mut tokens: Vec<String> = Vec::with_capacity(arity + method.type_parameters.len());
    if has_equally_typed_overload && method.is_generic() {
        tokens.extend(method.type_parameters.iter().cloned());
    }
    for (position, parameter) in method.parameters.iter().enumerate() {
        let has_equally_named_parameter = same_arity
            .iter()
            .any(|m| m.parameters[position].name.eq_ignore_ascii_case(&parameter.name));
        if has_equally_named_overload && has_equally_named_parameter {
            tokens.push(parameter.type_ref.formatted_name());
        } else {
            tokens.push(parameter.name.clone());
        }
    }

    let mut base = method.name.clone();
    if let Some(interface) = &method.explicit_interface {
        base.push_str("For");
        base.push_str(&interface.formatted_name());
    }
    join_tokens(base, &tokens)
}

/// Returns a name for `operator` that is unique among `all_operators`.
///
/// Overloaded operators are always told apart by their operand types.
#[must_use]
pub fn unique_operator_name(operator: &OperatorModel, all_operators: &[OperatorModel]) -> String {
    let overloaded = all_operators
        .iter()
        .any(|o| o.id != operator.id && o.name == operator.name);
    if overloaded {
        join_tokens(operator.name.clone(), &type_tokens(&operator.parameters))
    } else {
        operator.name.clone()
    }
}

/// Returns a name for `indexer` that is unique among `all_indexers`.
///
/// A lone indexer is called `Indexer`; otherwise each is named
/// `IndexerFor` followed by its parameter types joined with `And`. Only the
/// last segment of each type name is used, without generic arguments.
///
/// ```
/// use sg_core::{IndexerModel, MemberId, ParameterModel, TypeRef};
/// use sg_generate::naming::indexer_name;
///
/// let mut indexers = vec![
///     IndexerModel::new([ParameterModel::new("i", TypeRef::value("Int32"))], TypeRef::string()),
///     IndexerModel::new([ParameterModel::new("key", TypeRef::string())], TypeRef::string()),
/// ];
/// indexers[1].id = MemberId::new(1);
/// assert_eq!(indexer_name(&indexers[0], &indexers[..1]), "Indexer");
/// assert_eq!(indexer_name(&indexers[0], &indexers), "IndexerForInt32");
/// assert_eq!(indexer_name(&indexers[1], &indexers), "IndexerForString");
/// ```
#[must_use]
pub fn indexer_name(indexer: &IndexerModel, all_indexers: &[IndexerModel]) -> String {
    if all_indexers.len() < 2 {
        return INDEXER.to_owned();
    }
    let mut name = INDEXER_FOR.to_owned();
    for (i, parameter) in indexer.parameters.iter().enumerate() {
        if i > 0 {
            name.push_str(AND);
        }
        let type_name = parameter.type_ref.name.as_str();
        let last_part = type_name.rsplit('.').next().unwrap_or(type_name);
        name.push_str(&pascal_case(last_part));
    }
    name
}
