//! Domain types for sutgen.
//!
//! # Module Organization
//!
//! - [`type_ref`] - References to types (`TypeRef`, `TypeKind`)
//! - [`member`] - Constructors, properties, methods, operators, indexers
//! - [`dependency`] - The dependency map and symbol identities
//! - [`model`] - The `TypeModel` and its builder
//! - [`naming`] - Naming contexts and patterns
//!
//! All public types are re-exported here and at the crate root:
//!
//! ```
//! use sg_core::{TypeModel, TypeModelBuilder, NamingContext, TypeRef};
//! ```

pub mod dependency;
pub mod member;
pub mod model;
pub mod naming;
pub mod type_ref;

pub use dependency::{DependencyMap, InterfaceMemberRef, SymbolId};
pub use member::{
    ConstructorModel, IndexerModel, MemberId, MemberModel, MethodModel, OperatorModel,
    ParameterModel, Parameters, PropertyModel,
};
pub use model::{
    DEFAULT_TARGET_FIELD, ItemSelector, RequiredAsset, TargetInstance, TypeFlags, TypeModel,
    TypeModelBuilder,
};
pub use naming::{
    CaseModifier, NamingContext, NamingPattern, PatternError, PatternToken, camel_case,
    pascal_case,
};
pub use type_ref::{STRING_TYPE_NAME, TypeKind, TypeRef};
