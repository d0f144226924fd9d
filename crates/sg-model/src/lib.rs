//! Source model access and structural model extraction for sutgen.
//!
//! This crate sits between the source being tested and the generator:
//!
//! - [`SourceModelProvider`] is the seam to whatever reads the source
//!   (a compiler front end, or the bundled [`JsonSourceModel`])
//! - [`DependencyExtractor`] recovers which fields each constructor
//!   parameter is stored into
//! - [`ModelExtractor`] turns declarations into [`TypeModel`](sg_core::TypeModel)s
//!
//! # Examples
//!
//! ```
//! use sg_model::{JsonSourceModel, ModelExtractor};
//!
//! let source = JsonSourceModel::from_json_str(r#"{ "types": [{ "name": "Clock" }] }"#).unwrap();
//! let results = ModelExtractor::new(&source).extract_all(|_| "_testClass".to_owned());
//! assert_eq!(results.len(), 1);
//! assert!(results[0].1.is_ok());
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod declaration;
mod dependencies;
mod error;
mod extract;
mod provider;

pub use declaration::{
    ConstructorDeclaration, ConstructorStatement, IndexerDeclaration, InterfaceDeclaration,
    InterfaceMemberDeclaration, MethodDeclaration, OperatorDeclaration, ParameterDeclaration,
    PropertyDeclaration, TypeDeclaration, ValueExpression,
};
pub use dependencies::DependencyExtractor;
pub use error::ModelError;
pub use extract::ModelExtractor;
pub use provider::{ImplementationLookup, JsonSourceModel, SourceModelProvider};
