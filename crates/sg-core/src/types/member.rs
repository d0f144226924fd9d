//! Member models: constructors, properties, methods, operators, indexers.
//!
//! Members are owned by their [`TypeModel`](crate::TypeModel) and identified
//! by a [`MemberId`], which is the member's index within the list of its kind.
//! Members never hold references back to their owning type.

use smallvec::SmallVec;

use super::dependency::SymbolId;
use super::type_ref::TypeRef;

/// Index of a member within the ordered list of members of the same kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberId(usize);

impl MemberId {
    /// Creates a member id from a list index.
    #[inline]
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the list index of the member.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Parameter list storage. Most members take four parameters or fewer.
pub type Parameters = SmallVec<[ParameterModel; 4]>;

/// A declared parameter of a constructor, method, operator or indexer.
///
/// # Examples
///
/// ```
/// use sg_core::{ParameterModel, TypeRef};
///
/// let name = ParameterModel::new("name", TypeRef::string());
/// assert!(name.is_string());
/// assert!(!name.is_nullable());
///
/// let optional = ParameterModel::new("name", TypeRef::string()).with_null_default();
/// assert!(optional.is_nullable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterModel {
    /// Declared parameter name.
    pub name: String,

    /// Declared parameter type.
    pub type_ref: TypeRef,

    /// Whether the parameter declares `null` as its default value.
    pub has_null_default: bool,
}

impl ParameterModel {
    /// Creates a parameter without a default value.
    #[must_use]
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
            has_null_default: false,
        }
    }

    /// Marks the parameter as defaulting to `null`.
    #[must_use]
    pub fn with_null_default(mut self) -> Self {
        self.has_null_default = true;
        self
    }

    /// Returns `true` if the parameter is of the well-known string type.
    #[inline]
    #[must_use]
    pub fn is_string(&self) -> bool {
        self.type_ref.is_string()
    }

    /// Returns `true` if the parameter admits `null` by declaration, either
    /// through a nullable annotation or a `null` default value.
    #[inline]
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.type_ref.nullable || self.has_null_default
    }
}

/// Common read access over every member kind.
pub trait MemberModel {
    /// Position of the member among members of the same kind.
    fn id(&self) -> MemberId;

    /// Original declared name.
    fn name(&self) -> &str;

    /// Ordered parameter list (empty for properties).
    fn parameters(&self) -> &[ParameterModel];

    /// Whether output should be produced for this member.
    fn should_generate(&self) -> bool;
}

/// A declared instance constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorModel {
    /// Position among the type's constructors.
    pub id: MemberId,

    /// Declared name (the owning type's name).
    pub name: String,

    /// Ordered parameters.
    pub parameters: Parameters,

    /// Whether test code can call this constructor (public or internal).
    pub is_accessible: bool,

    /// Whether output should be produced for this constructor.
    pub should_generate: bool,
}

impl ConstructorModel {
    /// Creates an accessible constructor with the given parameters.
    ///
    /// The name and id are assigned when the constructor is added to a
    /// [`TypeModelBuilder`](crate::TypeModelBuilder).
    #[must_use]
    pub fn new(parameters: impl IntoIterator<Item = ParameterModel>) -> Self {
        Self {
            id: MemberId::default(),
            name: String::new(),
            parameters: parameters.into_iter().collect(),
            is_accessible: true,
            should_generate: true,
        }
    }

    /// Marks the constructor as inaccessible to test code.
    #[must_use]
    pub fn inaccessible(mut self) -> Self {
        self.is_accessible = false;
        self
    }

    /// Finds a parameter by name, ignoring ASCII case.
    #[must_use]
    pub fn parameter_named(&self, name: &str) -> Option<&ParameterModel> {
        self.parameters
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

impl MemberModel for ConstructorModel {
    fn id(&self) -> MemberId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> &[ParameterModel] {
        &self.parameters
    }

    fn should_generate(&self) -> bool {
        self.should_generate
    }
}

/// A declared property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyModel {
    /// Position among the type's properties.
    pub id: MemberId,

    /// Declared name.
    pub name: String,

    /// Symbol identity used by the dependency map.
    pub symbol: SymbolId,

    /// Property type.
    pub type_ref: TypeRef,

    /// Whether test code can read the property.
    pub has_getter: bool,

    /// Whether test code can assign the property after construction.
    pub has_setter: bool,

    /// Whether the property can be assigned in an object initializer only.
    pub has_init: bool,

    /// Whether the property is static.
    pub is_static: bool,

    /// Field returned by the getter, when the provider could determine it.
    pub backing_field: Option<String>,

    /// Whether output should be produced for this property.
    pub should_generate: bool,
}

impl PropertyModel {
    /// Creates a readable, non-assignable instance property.
    #[must_use]
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        let name = name.into();
        Self {
            id: MemberId::default(),
            symbol: SymbolId::new(name.clone()),
            name,
            type_ref,
            has_getter: true,
            has_setter: false,
            has_init: false,
            is_static: false,
            backing_field: None,
            should_generate: true,
        }
    }

    /// Adds a setter.
    #[must_use]
    pub fn with_setter(mut self) -> Self {
        self.has_setter = true;
        self
    }

    /// Adds an init-only accessor.
    #[must_use]
    pub fn with_init(mut self) -> Self {
        self.has_init = true;
        self
    }

    /// Removes the getter.
    #[must_use]
    pub fn write_only(mut self) -> Self {
        self.has_getter = false;
        self
    }

    /// Marks the property as static.
    #[must_use]
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Records the field the getter returns.
    #[must_use]
    pub fn with_backing_field(mut self, field: impl Into<String>) -> Self {
        self.backing_field = Some(field.into());
        self
    }

    /// Returns `true` if the property can be assigned inside an object initializer.
    #[inline]
    #[must_use]
    pub const fn supports_initializer(&self) -> bool {
        !self.is_static && (self.has_setter || self.has_init)
    }
}

impl MemberModel for PropertyModel {
    fn id(&self) -> MemberId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> &[ParameterModel] {
        &[]
    }

    fn should_generate(&self) -> bool {
        self.should_generate
    }
}

/// A declared method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodModel {
    /// Position among the type's methods.
    pub id: MemberId,

    /// Declared name.
    pub name: String,

    /// Symbol identity used by the dependency map.
    pub symbol: SymbolId,

    /// Ordered parameters.
    pub parameters: Parameters,

    /// Return type, `None` for `void`.
    pub return_type: Option<TypeRef>,

    /// Generic type parameter names, in declaration order.
    pub type_parameters: SmallVec<[String; 2]>,

    /// Interface qualifier for explicit interface implementations.
    pub explicit_interface: Option<TypeRef>,

    /// Whether the method is static.
    pub is_static: bool,

    /// Whether output should be produced for this method.
    pub should_generate: bool,
}

impl MethodModel {
    /// Creates a `void` instance method.
    #[must_use]
    pub fn new(name: impl Into<String>, parameters: impl IntoIterator<Item = ParameterModel>) -> Self {
        let name = name.into();
        let parameters: Parameters = parameters.into_iter().collect();
        Self {
            id: MemberId::default(),
            symbol: SymbolId::for_member(&name, &parameters),
            name,
            parameters,
            return_type: None,
            type_parameters: SmallVec::new(),
            explicit_interface: None,
            is_static: false,
            should_generate: true,
        }
    }

    /// Sets the return type.
    #[must_use]
    pub fn returning(mut self, return_type: TypeRef) -> Self {
        self.return_type = Some(return_type);
        self
    }

    /// Sets the generic type parameter names.
    #[must_use]
    pub fn with_type_parameters<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.type_parameters = names.into_iter().map(Into::into).collect();
        self
    }

    /// Marks the method as an explicit implementation of `interface`.
    #[must_use]
    pub fn explicit_for(mut self, interface: TypeRef) -> Self {
        self.explicit_interface = Some(interface);
        self
    }

    /// Marks the method as static.
    #[must_use]
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Overrides the symbol identity.
    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<SymbolId>) -> Self {
        self.symbol = symbol.into();
        self
    }

    /// Returns `true` if the method declares generic type parameters.
    #[inline]
    #[must_use]
    pub fn is_generic(&self) -> bool {
        !self.type_parameters.is_empty()
    }
}

impl MemberModel for MethodModel {
    fn id(&self) -> MemberId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> &[ParameterModel] {
        &self.parameters
    }

    fn should_generate(&self) -> bool {
        self.should_generate
    }
}

/// A user-defined operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorModel {
    /// Position among the type's operators.
    pub id: MemberId,

    /// Declared operator name (`Addition`, `Equality`, ...).
    pub name: String,

    /// Source token of the operator (`+`, `==`, ...).
    pub token: String,

    /// Operands, one for unary and two for binary operators.
    pub parameters: Parameters,

    /// Result type.
    pub return_type: TypeRef,

    /// Whether output should be produced for this operator.
    pub should_generate: bool,
}

impl OperatorModel {
    /// Creates an operator.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        token: impl Into<String>,
        parameters: impl IntoIterator<Item = ParameterModel>,
        return_type: TypeRef,
    ) -> Self {
        Self {
            id: MemberId::default(),
            name: name.into(),
            token: token.into(),
            parameters: parameters.into_iter().collect(),
            return_type,
            should_generate: true,
        }
    }
}

impl MemberModel for OperatorModel {
    fn id(&self) -> MemberId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> &[ParameterModel] {
        &self.parameters
    }

    fn should_generate(&self) -> bool {
        self.should_generate
    }
}

/// A declared indexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexerModel {
    /// Position among the type's indexers.
    pub id: MemberId,

    /// Index parameters.
    pub parameters: Parameters,

    /// Element type.
    pub type_ref: TypeRef,

    /// Whether test code can read through the indexer.
    pub has_getter: bool,

    /// Whether test code can write through the indexer.
    pub has_setter: bool,

    /// Whether output should be produced for this indexer.
    pub should_generate: bool,
}

impl IndexerModel {
    /// Creates a read-only indexer.
    #[must_use]
    pub fn new(parameters: impl IntoIterator<Item = ParameterModel>, type_ref: TypeRef) -> Self {
        Self {
            id: MemberId::default(),
            parameters: parameters.into_iter().collect(),
            type_ref,
            has_getter: true,
            has_setter: false,
            should_generate: true,
        }
    }

    /// Adds a setter.
    #[must_use]
    pub fn with_setter(mut self) -> Self {
        self.has_setter = true;
        self
    }
}

impl MemberModel for IndexerModel {
    fn id(&self) -> MemberId {
        self.id
    }

    fn name(&self) -> &str {
        "Indexer"
    }

    fn parameters(&self) -> &[ParameterModel] {
        &self.parameters
    }

    fn should_generate(&self) -> bool {
        self.should_generate
    }
}
