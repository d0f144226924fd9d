//! The structural model of one type under test.
//!
//! A [`TypeModel`] is assembled by a [`TypeModelBuilder`]. The builder is the
//! only place where the target-instance reference can be chosen; once
//! [`TypeModelBuilder::build`] returns, the reference is fixed. The only
//! mutation a built model allows is the single-item selection pass
//! ([`TypeModel::select_single_item`]), which flips `should_generate` flags.
//!
//! ```
//! use sg_core::{ConstructorModel, ParameterModel, TypeModelBuilder, TypeRef};
//!
//! let model = TypeModelBuilder::new("Greeter")
//!     .constructor(ConstructorModel::new([ParameterModel::new("name", TypeRef::string())]))
//!     .target_instance("_greeter")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(model.class_name(), "Greeter");
//! assert_eq!(model.target_instance().name(), "_greeter");
//! assert_eq!(model.constructors()[0].name, "Greeter");
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::dependency::{DependencyMap, InterfaceMemberRef};
use super::member::{
    ConstructorModel, IndexerModel, MemberId, MethodModel, OperatorModel, PropertyModel,
};
use super::type_ref::TypeRef;
use crate::error::CoreError;

/// Default name of the field holding the system under test.
pub const DEFAULT_TARGET_FIELD: &str = "_testClass";

/// Declaration-level flags of a type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeFlags {
    /// The type is static; members are reached through the type name.
    pub is_static: bool,

    /// The type is publicly visible.
    pub is_public: bool,

    /// The type is abstract and cannot be constructed directly.
    pub is_abstract: bool,

    /// The type is a record.
    pub is_record: bool,
}

/// How generated code refers to the system under test.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum TargetInstance {
    /// A field of the test class holding an instance.
    Field(String),

    /// The type name itself, for static types.
    Type(String),
}

impl TargetInstance {
    /// The name used to refer to the target.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Field(name) | Self::Type(name) => name,
        }
    }

    /// Returns `true` if the target is referred to through its type name.
    #[inline]
    #[must_use]
    pub const fn is_static(&self) -> bool {
        matches!(self, Self::Type(_))
    }
}

/// An external asset generated tests depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum RequiredAsset {
    /// A helper class that checks property set/get round-trips.
    PropertyTester,
}

/// Selects one item of a model for single-item generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemSelector {
    /// The type itself (type-level strategies only).
    Type,
    /// One constructor.
    Constructor(MemberId),
    /// One property.
    Property(MemberId),
    /// One method.
    Method(MemberId),
    /// One operator.
    Operator(MemberId),
    /// One indexer.
    Indexer(MemberId),
}

/// Structural and semantic description of one type under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeModel {
    class_name: String,
    type_ref: TypeRef,
    flags: TypeFlags,
    is_single_item: bool,
    should_generate: bool,
    constructors: Vec<ConstructorModel>,
    properties: Vec<PropertyModel>,
    methods: Vec<MethodModel>,
    operators: Vec<OperatorModel>,
    indexers: Vec<IndexerModel>,
    interfaces: Vec<TypeRef>,
    dependencies: DependencyMap,
    target_instance: TargetInstance,
    default_constructor: Option<MemberId>,
    required_assets: SmallVec<[RequiredAsset; 2]>,
}

impl TypeModel {
    /// The declared class name.
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// A reference to the type itself.
    #[must_use]
    pub const fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }

    /// Declaration-level flags.
    #[must_use]
    pub const fn flags(&self) -> TypeFlags {
        self.flags
    }

    /// Shorthand for `flags().is_static`.
    #[must_use]
    pub const fn is_static(&self) -> bool {
        self.flags.is_static
    }

    /// Returns `true` after [`select_single_item`](Self::select_single_item).
    #[must_use]
    pub const fn is_single_item(&self) -> bool {
        self.is_single_item
    }

    /// Type-level generation flag.
    #[must_use]
    pub const fn should_generate(&self) -> bool {
        self.should_generate
    }

    /// Returns `true` if the type or any member should produce output.
    #[must_use]
    pub fn should_generate_any(&self) -> bool {
        self.should_generate
            || self.constructors.iter().any(|c| c.should_generate)
            || self.properties.iter().any(|p| p.should_generate)
            || self.methods.iter().any(|m| m.should_generate)
            || self.operators.iter().any(|o| o.should_generate)
            || self.indexers.iter().any(|i| i.should_generate)
    }

    /// Returns `true` if type-level (constructor) tests should produce output.
    #[must_use]
    pub fn constructors_should_generate(&self) -> bool {
        self.should_generate || self.constructors.iter().any(|c| c.should_generate)
    }

    /// Declared constructors, in declaration order.
    #[must_use]
    pub fn constructors(&self) -> &[ConstructorModel] {
        &self.constructors
    }

    /// Declared properties, in declaration order.
    #[must_use]
    pub fn properties(&self) -> &[PropertyModel] {
        &self.properties
    }

    /// Declared methods, in declaration order.
    #[must_use]
    pub fn methods(&self) -> &[MethodModel] {
        &self.methods
    }

    /// Declared operators, in declaration order.
    #[must_use]
    pub fn operators(&self) -> &[OperatorModel] {
        &self.operators
    }

    /// Declared indexers, in declaration order.
    #[must_use]
    pub fn indexers(&self) -> &[IndexerModel] {
        &self.indexers
    }

    /// Implemented interfaces, in declaration order.
    #[must_use]
    pub fn interfaces(&self) -> &[TypeRef] {
        &self.interfaces
    }

    /// Returns `true` if the type implements an interface with the given name.
    #[must_use]
    pub fn implements(&self, interface_name: &str) -> bool {
        self.interfaces.iter().any(|i| i.name == interface_name)
    }

    /// The dependency map.
    #[must_use]
    pub const fn dependencies(&self) -> &DependencyMap {
        &self.dependencies
    }

    /// How generated code refers to the system under test.
    #[must_use]
    pub const fn target_instance(&self) -> &TargetInstance {
        &self.target_instance
    }

    /// The explicitly assigned default constructor, if any.
    #[must_use]
    pub fn default_constructor(&self) -> Option<&ConstructorModel> {
        self.default_constructor
            .and_then(|id| self.constructors.get(id.index()))
    }

    /// External assets recorded for this type.
    #[must_use]
    pub fn required_assets(&self) -> &[RequiredAsset] {
        &self.required_assets
    }

    /// Finds the method that implements `interface_member`, if it was resolved.
    #[must_use]
    pub fn method_implementing(&self, interface_member: &InterfaceMemberRef) -> Option<&MethodModel> {
        let symbol = self.dependencies.implementation_of(interface_member)?;
        self.methods.iter().find(|m| &m.symbol == symbol)
    }

    /// Restricts generation to a single item.
    ///
    /// Every `should_generate` flag is cleared, then the selected item's flag
    /// is set. Call this before handing the model to the generator.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidArgument`] if the selector names a member
    /// that does not exist. The model is left unchanged in that case.
    pub fn select_single_item(&mut self, selector: ItemSelector) -> Result<(), CoreError> {
        fn check<T>(items: &[T], id: MemberId, kind: &str) -> Result<(), CoreError> {
            if id.index() < items.len() {
                Ok(())
            } else {
                Err(CoreError::invalid_argument(
                    "selector",
                    format!("{kind} {} does not exist", id.index()),
                ))
            }
        }

        match selector {
            ItemSelector::Type => {}
            ItemSelector::Constructor(id) => check(&self.constructors, id, "constructor")?,
            ItemSelector::Property(id) => check(&self.properties, id, "property")?,
            ItemSelector::Method(id) => check(&self.methods, id, "method")?,
            ItemSelector::Operator(id) => check(&self.operators, id, "operator")?,
            ItemSelector::Indexer(id) => check(&self.indexers, id, "indexer")?,
        }

        self.is_single_item = true;
        self.should_generate = false;
        self.constructors.iter_mut().for_each(|c| c.should_generate = false);
        self.properties.iter_mut().for_each(|p| p.should_generate = false);
        self.methods.iter_mut().for_each(|m| m.should_generate = false);
        self.operators.iter_mut().for_each(|o| o.should_generate = false);
        self.indexers.iter_mut().for_each(|i| i.should_generate = false);

        match selector {
            ItemSelector::Type => self.should_generate = true,
            ItemSelector::Constructor(id) => self.constructors[id.index()].should_generate = true,
            ItemSelector::Property(id) => self.properties[id.index()].should_generate = true,
            ItemSelector::Method(id) => self.methods[id.index()].should_generate = true,
            ItemSelector::Operator(id) => self.operators[id.index()].should_generate = true,
            ItemSelector::Indexer(id) => self.indexers[id.index()].should_generate = true,
        }
        Ok(())
    }
}

/// Assembles a [`TypeModel`].
///
/// Members receive their [`MemberId`] in the order they are added.
#[derive(Debug, Clone)]
pub struct TypeModelBuilder {
    class_name: String,
    type_ref: TypeRef,
    flags: TypeFlags,
    should_generate: bool,
    constructors: Vec<ConstructorModel>,
    properties: Vec<PropertyModel>,
    methods: Vec<MethodModel>,
    operators: Vec<OperatorModel>,
    indexers: Vec<IndexerModel>,
    interfaces: Vec<TypeRef>,
    dependencies: DependencyMap,
    target_field: Option<String>,
    default_constructor: Option<MemberId>,
    required_assets: SmallVec<[RequiredAsset; 2]>,
}

impl TypeModelBuilder {
    /// Starts a model for a public, non-static class named `class_name`.
    #[must_use]
    pub fn new(class_name: impl Into<String>) -> Self {
        let class_name = class_name.into();
        Self {
            type_ref: TypeRef::class(class_name.clone()),
            class_name,
            flags: TypeFlags {
                is_public: true,
                ..TypeFlags::default()
            },
            should_generate: true,
            constructors: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
            operators: Vec::new(),
            indexers: Vec::new(),
            interfaces: Vec::new(),
            dependencies: DependencyMap::new(),
            target_field: None,
            default_constructor: None,
            required_assets: SmallVec::new(),
        }
    }

    /// Replaces the type reference (for generic types).
    #[must_use]
    pub fn type_ref(mut self, type_ref: TypeRef) -> Self {
        self.type_ref = type_ref;
        self
    }

    /// Sets the declaration flags.
    #[must_use]
    pub const fn flags(mut self, flags: TypeFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Adds a constructor.
    #[must_use]
    pub fn constructor(mut self, mut constructor: ConstructorModel) -> Self {
        constructor.id = MemberId::new(self.constructors.len());
        constructor.name.clone_from(&self.class_name);
        self.constructors.push(constructor);
        self
    }

    /// Adds a property.
    #[must_use]
    pub fn property(mut self, mut property: PropertyModel) -> Self {
        property.id = MemberId::new(self.properties.len());
        self.properties.push(property);
        self
    }

    /// Adds a method.
    #[must_use]
    pub fn method(mut self, mut method: MethodModel) -> Self {
        method.id = MemberId::new(self.methods.len());
        self.methods.push(method);
        self
    }

    /// Adds an operator.
    #[must_use]
    pub fn operator(mut self, mut operator: OperatorModel) -> Self {
        operator.id = MemberId::new(self.operators.len());
        self.operators.push(operator);
        self
    }

    /// Adds an indexer.
    #[must_use]
    pub fn indexer(mut self, mut indexer: IndexerModel) -> Self {
        indexer.id = MemberId::new(self.indexers.len());
        self.indexers.push(indexer);
        self
    }

    /// Adds an implemented interface.
    #[must_use]
    pub fn interface(mut self, interface: TypeRef) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Sets the dependency map.
    #[must_use]
    pub fn dependencies(mut self, dependencies: DependencyMap) -> Self {
        self.dependencies = dependencies;
        self
    }

    /// Chooses the field name used to refer to the system under test.
    ///
    /// Ignored for static types, which are always referred to by type name.
    #[must_use]
    pub fn target_instance(mut self, field: impl Into<String>) -> Self {
        self.target_field = Some(field.into());
        self
    }

    /// Assigns the constructor the object synthesizer should prefer.
    #[must_use]
    pub const fn default_constructor(mut self, id: MemberId) -> Self {
        self.default_constructor = Some(id);
        self
    }

    /// Records an external asset the generated tests depend on.
    #[must_use]
    pub fn require_asset(mut self, asset: RequiredAsset) -> Self {
        if !self.required_assets.contains(&asset) {
            self.required_assets.push(asset);
        }
        self
    }

    /// Sets the type-level generation flag.
    #[must_use]
    pub const fn should_generate(mut self, should_generate: bool) -> Self {
        self.should_generate = should_generate;
        self
    }

    /// Finishes the model and fixes the target-instance reference.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidArgument`] if the class name is empty or
    /// the default constructor id does not name a declared constructor.
    pub fn build(self) -> Result<TypeModel, CoreError> {
        if self.class_name.is_empty() {
            return Err(CoreError::invalid_argument(
                "class_name",
                "type name must not be empty",
            ));
        }
        if let Some(id) = self.default_constructor {
            if id.index() >= self.constructors.len() {
                return Err(CoreError::invalid_argument(
                    "default_constructor",
                    format!("no constructor with id {}", id.index()),
                ));
            }
        }

        let target_instance = if self.flags.is_static {
            TargetInstance::Type(self.class_name.clone())
        } else {
            TargetInstance::Field(
                self.target_field
                    .unwrap_or_else(|| DEFAULT_TARGET_FIELD.to_owned()),
            )
        };

        Ok(TypeModel {
            class_name: self.class_name,
            type_ref: self.type_ref,
            flags: self.flags,
            is_single_item: false,
            should_generate: self.should_generate,
            constructors: self.constructors,
            properties: self.properties,
            methods: self.methods,
            operators: self.operators,
            indexers: self.indexers,
            interfaces: self.interfaces,
            dependencies: self.dependencies,
            target_instance,
            default_constructor: self.default_constructor,
            required_assets: self.required_assets,
        })
    }
}
