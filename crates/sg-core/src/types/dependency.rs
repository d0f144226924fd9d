//! The dependency map of a type under test.
//!
//! Two associations are recorded while the model is built:
//!
//! - implementation symbol → interface members it satisfies
//! - constructor parameter name → fields or properties it is assigned to
//!
//! The map is read-only once handed to a [`TypeModelBuilder`](crate::TypeModelBuilder).

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::member::ParameterModel;
use super::type_ref::TypeRef;
use crate::FxHashMap;

/// Stable identity of a member symbol, as assigned by the source model provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(String);

impl SymbolId {
    /// Wraps a provider-assigned identity.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derives an identity from a member name and its parameter types,
    /// such as `Do(Int32, String)`.
    #[must_use]
    pub fn for_member(name: &str, parameters: &[ParameterModel]) -> Self {
        let types: Vec<String> = parameters.iter().map(|p| p.type_ref.to_string()).collect();
        Self(format!("{name}({})", types.join(", ")))
    }

    /// Returns the identity as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SymbolId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SymbolId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A member declared by an interface, such as `IDisposable.Dispose`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InterfaceMemberRef {
    /// The declaring interface.
    pub interface: TypeRef,

    /// The member name within the interface.
    pub member: String,
}

impl InterfaceMemberRef {
    /// Creates an interface member reference.
    #[must_use]
    pub fn new(interface: TypeRef, member: impl Into<String>) -> Self {
        Self {
            interface,
            member: member.into(),
        }
    }
}

impl fmt::Display for InterfaceMemberRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.interface, self.member)
    }
}

/// Associations between a type's members, its interfaces, and its constructor
/// parameters.
///
/// # Examples
///
/// ```
/// use sg_core::{DependencyMap, InterfaceMemberRef, SymbolId, TypeRef};
///
/// let mut map = DependencyMap::new();
/// let dispose = InterfaceMemberRef::new(TypeRef::interface("IDisposable"), "Dispose");
/// map.record_implementation(SymbolId::new("Dispose()"), dispose.clone());
/// map.record_parameter_field("logger", "_logger");
///
/// assert_eq!(map.implementation_of(&dispose).map(SymbolId::as_str), Some("Dispose()"));
/// assert_eq!(map.fields_for_parameter("logger"), ["_logger".to_owned()]);
/// assert_eq!(map.parameter_for_member("_logger"), Some("logger"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyMap {
    implementations: FxHashMap<SymbolId, SmallVec<[InterfaceMemberRef; 2]>>,
    parameter_fields: FxHashMap<String, SmallVec<[String; 2]>>,
}

impl DependencyMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `symbol` satisfies `interface_member`.
    pub fn record_implementation(&mut self, symbol: SymbolId, interface_member: InterfaceMemberRef) {
        let satisfied = self.implementations.entry(symbol).or_default();
        if !satisfied.contains(&interface_member) {
            satisfied.push(interface_member);
        }
    }

    /// Records that the constructor parameter `parameter` is assigned to `field`.
    pub fn record_parameter_field(&mut self, parameter: impl Into<String>, field: impl Into<String>) {
        let field = field.into();
        let fields = self.parameter_fields.entry(parameter.into()).or_default();
        if !fields.contains(&field) {
            fields.push(field);
        }
    }

    /// Returns the interface members satisfied by `symbol`.
    #[must_use]
    pub fn interface_members_of(&self, symbol: &SymbolId) -> &[InterfaceMemberRef] {
        self.implementations
            .get(symbol)
            .map(|m| m.as_slice())
            .unwrap_or_default()
    }

    /// Returns the symbol implementing `interface_member`, if one was resolved.
    ///
    /// When several symbols claim the same interface member the smallest
    /// identity wins, so the answer never depends on map iteration order.
    #[must_use]
    pub fn implementation_of(&self, interface_member: &InterfaceMemberRef) -> Option<&SymbolId> {
        self.implementations
            .iter()
            .filter(|(_, satisfied)| satisfied.contains(interface_member))
            .map(|(symbol, _)| symbol)
            .min()
    }

    /// Returns the fields a constructor parameter is assigned to.
    #[must_use]
    pub fn fields_for_parameter(&self, parameter: &str) -> &[String] {
        self.parameter_fields
            .get(parameter)
            .map(|f| f.as_slice())
            .unwrap_or_default()
    }

    /// Returns the constructor parameter assigned to `member`, if any.
    ///
    /// Ties resolve to the lexically smallest parameter name.
    #[must_use]
    pub fn parameter_for_member(&self, member: &str) -> Option<&str> {
        self.parameter_fields
            .iter()
            .filter(|(_, fields)| fields.iter().any(|f| f == member))
            .map(|(parameter, _)| parameter.as_str())
            .min()
    }

    /// Number of symbols with at least one recorded interface association.
    #[must_use]
    pub fn implementation_count(&self) -> usize {
        self.implementations.len()
    }

    /// Number of constructor parameters with at least one recorded field.
    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.parameter_fields.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispose() -> InterfaceMemberRef {
        InterfaceMemberRef::new(TypeRef::interface("IDisposable"), "Dispose")
    }

    #[test]
    fn test_record_implementation_deduplicates() {
        let mut map = DependencyMap::new();
        map.record_implementation(SymbolId::new("Dispose()"), dispose());
        map.record_implementation(SymbolId::new("Dispose()"), dispose());
        assert_eq!(map.interface_members_of(&SymbolId::new("Dispose()")).len(), 1);
        assert_eq!(map.implementation_count(), 1);
    }

    #[test]
    fn test_missing_lookups_are_empty() {
        let map = DependencyMap::new();
        assert!(map.interface_members_of(&SymbolId::new("Nope()")).is_empty());
        assert!(map.implementation_of(&dispose()).is_none());
        assert!(map.fields_for_parameter("x").is_empty());
        assert!(map.parameter_for_member("_x").is_none());
    }

    #[test]
    fn test_parameter_for_member_is_deterministic() {
        let mut map = DependencyMap::new();
        map.record_parameter_field("b", "_shared");
        map.record_parameter_field("a", "_shared");
        assert_eq!(map.parameter_for_member("_shared"), Some("a"));
        assert_eq!(map.parameter_count(), 2);
    }

    #[test]
    fn test_symbol_for_member() {
        let params = [ParameterModel::new("x", TypeRef::class("List").with_arguments([TypeRef::string()]))];
        assert_eq!(SymbolId::for_member("Add", &params).as_str(), "Add(List<String>)");
        assert_eq!(SymbolId::for_member("Run", &[]).as_str(), "Run()");
    }
}
