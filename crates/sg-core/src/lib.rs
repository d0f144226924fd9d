//! Core types, errors, and configuration for sutgen.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - The structural model of a type under test ([`TypeModel`] and its members)
//! - The [`DependencyMap`] linking constructor parameters and interface members
//! - Immutable naming values ([`NamingContext`], [`NamingPattern`])
//! - Configuration structures ([`Config`] and its sections)
//! - Error types for contract violations and configuration problems
//! - `FxHashMap`/`FxHashSet` aliases
//!
//! Nothing in this crate performs I/O.

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod hash;
pub mod types;

pub use config::{
    Config, GenerationOptions, MockingFrameworkKind, NamingOptions, StrategyOptions,
    StrategyToggle, TestFrameworkKind,
};
pub use error::{ConfigError, CoreError};
pub use hash::{FxHashMap, FxHashSet};
pub use types::{
    CaseModifier, ConstructorModel, DEFAULT_TARGET_FIELD, DependencyMap, IndexerModel,
    InterfaceMemberRef, ItemSelector, MemberId, MemberModel, MethodModel, NamingContext,
    NamingPattern, OperatorModel, ParameterModel, Parameters, PatternError, PatternToken,
    PropertyModel, RequiredAsset, STRING_TYPE_NAME, SymbolId, TargetInstance, TypeFlags, TypeKind,
    TypeModel, TypeModelBuilder, TypeRef, camel_case, pascal_case,
};
