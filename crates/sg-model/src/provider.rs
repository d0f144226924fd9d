//! The source model provider interface and its JSON-backed implementation.
//!
//! A [`SourceModelProvider`] answers two questions about source code: what a
//! type declares, and which member implements a given interface member. The
//! second lookup is allowed to fail for individual members; such failures are
//! reported as [`ImplementationLookup::Anomaly`] and never abort extraction.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use sg_core::{InterfaceMemberRef, SymbolId};

use crate::declaration::TypeDeclaration;
use crate::error::ModelError;

/// Result of looking up the implementation of one interface member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImplementationLookup {
    /// The member is implemented by the symbol.
    Found(SymbolId),

    /// The type declares no implementation.
    #[default]
    NotImplemented,

    /// The lookup itself failed.
    Anomaly(String),
}

impl ImplementationLookup {
    /// Returns the implementing symbol, if one was found.
    #[inline]
    #[must_use]
    pub const fn symbol(&self) -> Option<&SymbolId> {
        match self {
            Self::Found(symbol) => Some(symbol),
            Self::NotImplemented | Self::Anomaly(_) => None,
        }
    }
}

/// Access to declarations in the source being tested.
///
/// Implementations must be `Sync` so that many types can be extracted in
/// parallel against the same provider.
pub trait SourceModelProvider: Sync {
    /// Returns the declaration with the given identity.
    fn declaration(&self, id: &str) -> Option<Cow<'_, TypeDeclaration>>;

    /// Looks up which member of the declaration `id` implements `member`.
    fn find_implementation(&self, id: &str, member: &InterfaceMemberRef) -> ImplementationLookup;

    /// Identities of every declaration the provider knows, in source order.
    fn declaration_ids(&self) -> Vec<String>;
}

/// A provider backed by a JSON document of declarations.
///
/// Declarations are identified by name. Interface member lookups read the
/// `implementation` recorded on each interface member.
///
/// # Examples
///
/// ```
/// use sg_model::{JsonSourceModel, SourceModelProvider};
///
/// let source = JsonSourceModel::from_json_str(r#"{
///     "types": [
///         { "name": "Greeter", "constructors": [{ "parameters": [] }] }
///     ]
/// }"#).unwrap();
///
/// assert_eq!(source.declaration_ids(), ["Greeter"]);
/// assert!(source.declaration("Greeter").is_some());
/// assert!(source.declaration("Missing").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonSourceModel {
    /// Declared types.
    #[serde(default)]
    pub types: Vec<TypeDeclaration>,
}

impl JsonSourceModel {
    /// Creates a provider over the given declarations.
    #[must_use]
    pub const fn new(types: Vec<TypeDeclaration>) -> Self {
        Self { types }
    }

    /// Parses a provider from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Parse`] if the document is not valid.
    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(json)?)
    }

    fn find(&self, id: &str) -> Option<&TypeDeclaration> {
        self.types.iter().find(|t| t.name == id)
    }
}

impl SourceModelProvider for JsonSourceModel {
    fn declaration(&self, id: &str) -> Option<Cow<'_, TypeDeclaration>> {
        self.find(id).map(Cow::Borrowed)
    }

    fn find_implementation(&self, id: &str, member: &InterfaceMemberRef) -> ImplementationLookup {
        let Some(declaration) = self.find(id) else {
            return ImplementationLookup::Anomaly(format!("declaration '{id}' is not known"));
        };
        declaration
            .interfaces
            .iter()
            .filter(|i| i.type_ref.is_same_type(&member.interface))
            .flat_map(|i| &i.members)
            .find(|m| m.name == member.member)
            .map_or(ImplementationLookup::NotImplemented, |m| {
                m.implementation.clone()
            })
    }

    fn declaration_ids(&self) -> Vec<String> {
        self.types.iter().map(|t| t.name.clone()).collect()
    }
}
