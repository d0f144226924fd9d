//! Declaration data handed out by a source model provider.
//!
//! Declarations are plain, serializable descriptions of a type as the
//! provider sees it. They carry enough of each constructor body for the
//! [`DependencyExtractor`](crate::DependencyExtractor) to recover which
//! fields every constructor parameter is stored into.

use serde::{Deserialize, Serialize};
use sg_core::{
    ConstructorModel, IndexerModel, MethodModel, OperatorModel, ParameterModel, PropertyModel,
    SymbolId, TypeFlags, TypeKind, TypeRef,
};

use crate::provider::ImplementationLookup;

const fn yes() -> bool {
    true
}

/// A declared type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    /// Declared name, without generic arguments.
    pub name: String,

    /// Class or struct.
    #[serde(default)]
    pub kind: TypeKind,

    /// Generic type parameters of the declaration.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<String>,

    /// The type is static.
    #[serde(default)]
    pub is_static: bool,

    /// The type is publicly visible.
    #[serde(default = "yes")]
    pub is_public: bool,

    /// The type is abstract.
    #[serde(default)]
    pub is_abstract: bool,

    /// The type is a record.
    #[serde(default)]
    pub is_record: bool,

    /// Declared instance constructors.
    #[serde(default)]
    pub constructors: Vec<ConstructorDeclaration>,

    /// Declared properties.
    #[serde(default)]
    pub properties: Vec<PropertyDeclaration>,

    /// Declared methods.
    #[serde(default)]
    pub methods: Vec<MethodDeclaration>,

    /// Declared user-defined operators.
    #[serde(default)]
    pub operators: Vec<OperatorDeclaration>,

    /// Declared indexers.
    #[serde(default)]
    pub indexers: Vec<IndexerDeclaration>,

    /// Implemented interfaces and their members.
    #[serde(default)]
    pub interfaces: Vec<InterfaceDeclaration>,

    /// Index of the constructor the synthesizer should prefer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_constructor: Option<usize>,
}

impl TypeDeclaration {
    /// Creates an empty public class declaration.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Class,
            type_parameters: Vec::new(),
            is_static: false,
            is_public: true,
            is_abstract: false,
            is_record: false,
            constructors: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
            operators: Vec::new(),
            indexers: Vec::new(),
            interfaces: Vec::new(),
            default_constructor: None,
        }
    }

    /// Declaration flags of the type.
    #[must_use]
    pub const fn flags(&self) -> TypeFlags {
        TypeFlags {
            is_static: self.is_static,
            is_public: self.is_public,
            is_abstract: self.is_abstract,
            is_record: self.is_record,
        }
    }

    /// A reference to the declared type, with its generic parameters as arguments.
    #[must_use]
    pub fn type_ref(&self) -> TypeRef {
        TypeRef::of_kind(self.name.clone(), self.kind).with_arguments(
            self.type_parameters
                .iter()
                .map(|p| TypeRef::of_kind(p.clone(), TypeKind::TypeParameter)),
        )
    }
}

/// A declared parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDeclaration {
    /// Parameter name.
    pub name: String,

    /// Parameter type.
    #[serde(rename = "type")]
    pub type_ref: TypeRef,

    /// The parameter defaults to `null`.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub has_null_default: bool,
}

impl From<&ParameterDeclaration> for ParameterModel {
    fn from(decl: &ParameterDeclaration) -> Self {
        let parameter = Self::new(decl.name.clone(), decl.type_ref.clone());
        if decl.has_null_default {
            parameter.with_null_default()
        } else {
            parameter
        }
    }
}

fn parameters(decls: &[ParameterDeclaration]) -> impl Iterator<Item = ParameterModel> + '_ {
    decls.iter().map(ParameterModel::from)
}

/// A declared constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorDeclaration {
    /// Ordered parameters.
    #[serde(default)]
    pub parameters: Vec<ParameterDeclaration>,

    /// Test code can call the constructor.
    #[serde(default = "yes")]
    pub accessible: bool,

    /// Top-level statements of the constructor body.
    #[serde(default)]
    pub body: Vec<ConstructorStatement>,
}

impl Default for ConstructorDeclaration {
    fn default() -> Self {
        Self {
            parameters: Vec::new(),
            accessible: true,
            body: Vec::new(),
        }
    }
}

impl From<&ConstructorDeclaration> for ConstructorModel {
    fn from(decl: &ConstructorDeclaration) -> Self {
        let constructor = Self::new(parameters(&decl.parameters));
        if decl.accessible {
            constructor
        } else {
            constructor.inaccessible()
        }
    }
}

/// A top-level statement inside a constructor body.
///
/// ```
/// use sg_model::{ConstructorStatement, ValueExpression};
///
/// let json = r#"{ "assign": { "target": "this._name", "value": { "identifier": "name" } } }"#;
/// let statement: ConstructorStatement = serde_json::from_str(json).unwrap();
/// assert_eq!(
///     statement,
///     ConstructorStatement::assign("this._name", ValueExpression::identifier("name")),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructorStatement {
    /// `target = value;`
    Assign {
        /// Assigned member, optionally qualified with `this.`.
        target: String,
        /// Assigned value.
        value: ValueExpression,
    },

    /// Any other statement.
    Other,
}

impl ConstructorStatement {
    /// Creates an assignment statement.
    #[must_use]
    pub fn assign(target: impl Into<String>, value: ValueExpression) -> Self {
        Self::Assign {
            target: target.into(),
            value,
        }
    }
}

/// The right-hand side of a constructor assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueExpression {
    /// A bare identifier.
    Identifier(String),

    /// `value ?? fallback`
    Coalesce(Box<ValueExpression>, Box<ValueExpression>),

    /// `(T)value`
    Cast(Box<ValueExpression>),

    /// A `throw` expression.
    Throw,

    /// Any other expression.
    Other,
}

impl ValueExpression {
    /// Creates an identifier expression.
    #[must_use]
    pub fn identifier(name: impl Into<String>) -> Self {
        Self::Identifier(name.into())
    }

    /// Creates a null-coalescing expression.
    #[must_use]
    pub fn coalesce(value: Self, fallback: Self) -> Self {
        Self::Coalesce(Box::new(value), Box::new(fallback))
    }

    /// Creates a cast expression.
    #[must_use]
    pub fn cast(value: Self) -> Self {
        Self::Cast(Box::new(value))
    }
}

/// A declared property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDeclaration {
    /// Declared name.
    pub name: String,

    /// Property type.
    #[serde(rename = "type")]
    pub type_ref: TypeRef,

    /// Symbol identity; defaults to the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<SymbolId>,

    /// Has an accessible getter.
    #[serde(default = "yes")]
    pub has_getter: bool,

    /// Has an accessible setter.
    #[serde(default)]
    pub has_setter: bool,

    /// Has an init-only accessor.
    #[serde(default)]
    pub has_init: bool,

    /// Is static.
    #[serde(default)]
    pub is_static: bool,

    /// Field returned by the getter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backing_field: Option<String>,
}

impl From<&PropertyDeclaration> for PropertyModel {
    fn from(decl: &PropertyDeclaration) -> Self {
        let mut property = Self::new(decl.name.clone(), decl.type_ref.clone());
        if let Some(symbol) = &decl.symbol {
            property.symbol = symbol.clone();
        }
        property.has_getter = decl.has_getter;
        property.has_setter = decl.has_setter;
        property.has_init = decl.has_init;
        property.is_static = decl.is_static;
        property.backing_field.clone_from(&decl.backing_field);
        property
    }
}

/// A declared method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDeclaration {
    /// Declared name.
    pub name: String,

    /// Symbol identity; defaults to the name and parameter types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<SymbolId>,

    /// Ordered parameters.
    #[serde(default)]
    pub parameters: Vec<ParameterDeclaration>,

    /// Return type, absent for `void`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<TypeRef>,

    /// Generic type parameter names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<String>,

    /// Interface qualifier of an explicit implementation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explicit_interface: Option<TypeRef>,

    /// Is static.
    #[serde(default)]
    pub is_static: bool,
}

impl From<&MethodDeclaration> for MethodModel {
    fn from(decl: &MethodDeclaration) -> Self {
        let mut method = Self::new(decl.name.clone(), parameters(&decl.parameters))
            .with_type_parameters(decl.type_parameters.iter().cloned());
        if let Some(symbol) = &decl.symbol {
            method = method.with_symbol(symbol.clone());
        }
        if let Some(return_type) = &decl.return_type {
            method = method.returning(return_type.clone());
        }
        if let Some(interface) = &decl.explicit_interface {
            method = method.explicit_for(interface.clone());
        }
        if decl.is_static {
            method = method.as_static();
        }
        method
    }
}

/// A declared user-defined operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorDeclaration {
    /// Operator name (`Addition`, `Equality`, ...).
    pub name: String,

    /// Source token (`+`, `==`, ...).
    pub token: String,

    /// Operands.
    pub parameters: Vec<ParameterDeclaration>,

    /// Result type.
    pub return_type: TypeRef,
}

impl From<&OperatorDeclaration> for OperatorModel {
    fn from(decl: &OperatorDeclaration) -> Self {
        Self::new(
            decl.name.clone(),
            decl.token.clone(),
            parameters(&decl.parameters),
            decl.return_type.clone(),
        )
    }
}

/// A declared indexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexerDeclaration {
    /// Index parameters.
    pub parameters: Vec<ParameterDeclaration>,

    /// Element type.
    #[serde(rename = "type")]
    pub type_ref: TypeRef,

    /// Has an accessible getter.
    #[serde(default = "yes")]
    pub has_getter: bool,

    /// Has an accessible setter.
    #[serde(default)]
    pub has_setter: bool,
}

impl From<&IndexerDeclaration> for IndexerModel {
    fn from(decl: &IndexerDeclaration) -> Self {
        let mut indexer = Self::new(parameters(&decl.parameters), decl.type_ref.clone());
        indexer.has_getter = decl.has_getter;
        indexer.has_setter = decl.has_setter;
        indexer
    }
}

/// An implemented interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceDeclaration {
    /// The interface type.
    #[serde(rename = "type")]
    pub type_ref: TypeRef,

    /// Members declared by the interface.
    #[serde(default)]
    pub members: Vec<InterfaceMemberDeclaration>,
}

/// A member declared by an implemented interface, with the result of looking
/// up its implementation on the declaring type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceMemberDeclaration {
    /// Member name.
    pub name: String,

    /// What the implementation lookup yields.
    #[serde(default)]
    pub implementation: ImplementationLookup,
}
