//! Building [`TypeModel`]s from provider declarations.
//!
//! Extraction is strict about the declaration itself and lenient about
//! interface lookups: a declaration the provider cannot resolve fails the
//! type, while an interface member whose implementation lookup fails is
//! skipped and the remaining associations are still recorded.

use rayon::prelude::*;
use sg_core::{InterfaceMemberRef, MemberId, TypeModel, TypeModelBuilder};
use tracing::{debug, instrument, trace};

use crate::declaration::TypeDeclaration;
use crate::dependencies::DependencyExtractor;
use crate::error::ModelError;
use crate::provider::{ImplementationLookup, SourceModelProvider};

/// Builds structural models through a [`SourceModelProvider`].
///
/// # Examples
///
/// ```
/// use sg_model::{JsonSourceModel, ModelExtractor};
///
/// let source = JsonSourceModel::from_json_str(r#"{
///     "types": [{
///         "name": "Greeter",
///         "constructors": [{
///             "parameters": [{ "name": "name", "type": { "name": "String" } }],
///             "body": [{ "assign": { "target": "_name", "value": { "identifier": "name" } } }]
///         }]
///     }]
/// }"#).unwrap();
///
/// let model = ModelExtractor::new(&source).extract_model("Greeter", "_testClass").unwrap();
/// assert_eq!(model.constructors().len(), 1);
/// assert_eq!(model.dependencies().fields_for_parameter("name"), ["_name".to_owned()]);
/// ```
#[derive(Debug)]
pub struct ModelExtractor<'p, P: ?Sized> {
    provider: &'p P,
    dependencies: DependencyExtractor,
}

impl<'p, P: SourceModelProvider + ?Sized> ModelExtractor<'p, P> {
    /// Creates an extractor over `provider`.
    #[inline]
    #[must_use]
    pub fn new(provider: &'p P) -> Self {
        Self {
            provider,
            dependencies: DependencyExtractor::new(),
        }
    }

    /// Builds an unfinished model for the declaration `id`.
    ///
    /// The returned builder still accepts a target-instance name and
    /// required assets before [`TypeModelBuilder::build`] fixes them.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Construction`] if the provider does not know
    /// `id` or hands back a declaration without a name.
    #[instrument(level = "debug", skip(self))]
    pub fn extract(&self, id: &str) -> Result<TypeModelBuilder, ModelError> {
        let declaration = self
            .provider
            .declaration(id)
            .ok_or_else(|| ModelError::construction(id, "declaration not found"))?;
        if declaration.name.is_empty() {
            return Err(ModelError::construction(id, "declaration has no name"));
        }

        let mut dependencies = self.dependencies.extract(&declaration.constructors);
        let mut anomalies = 0_usize;
        for interface in &declaration.interfaces {
            for member in &interface.members {
                let member_ref = InterfaceMemberRef::new(interface.type_ref.clone(), &member.name);
                match self.provider.find_implementation(id, &member_ref) {
                    ImplementationLookup::Found(symbol) => {
                        trace!(%member_ref, %symbol, "Resolved interface member");
                        dependencies.record_implementation(symbol, member_ref);
                    }
                    ImplementationLookup::NotImplemented => {
                        trace!(%member_ref, "Interface member has no implementation");
                    }
                    ImplementationLookup::Anomaly(reason) => {
                        anomalies += 1;
                        debug!(
                            %member_ref,
                            reason = %reason,
                            "Skipping interface member after failed lookup"
                        );
                    }
                }
            }
        }

        debug!(
            type_name = %declaration.name,
            parameters = dependencies.parameter_count(),
            implementations = dependencies.implementation_count(),
            anomalies,
            "Extracted dependencies"
        );

        Ok(Self::assemble(&declaration).dependencies(dependencies))
    }

    /// Builds a finished model for the declaration `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Construction`] as [`extract`](Self::extract)
    /// does, or [`ModelError::Contract`] if the declaration names a default
    /// constructor that does not exist.
    pub fn extract_model(&self, id: &str, target_field: &str) -> Result<TypeModel, ModelError> {
        Ok(self.extract(id)?.target_instance(target_field).build()?)
    }

    /// Builds finished models for every declaration the provider knows.
    ///
    /// `target_field` names the system-under-test field for a declaration
    /// id. Declarations are processed in parallel. Results keep the
    /// provider's order; a failed declaration does not affect the others.
    pub fn extract_all<F>(&self, target_field: F) -> Vec<(String, Result<TypeModel, ModelError>)>
    where
        F: Fn(&str) -> String + Sync,
    {
        self.provider
            .declaration_ids()
            .into_par_iter()
            .map(|id| {
                let result = self.extract_model(&id, &target_field(&id));
                (id, result)
            })
            .collect()
    }

    fn assemble(declaration: &TypeDeclaration) -> TypeModelBuilder {
        let mut builder = TypeModelBuilder::new(declaration.name.clone())
            .type_ref(declaration.type_ref())
            .flags(declaration.flags());

        for constructor in &declaration.constructors {
            builder = builder.constructor(constructor.into());
        }
        for property in &declaration.properties {
            builder = builder.property(property.into());
        }
        for method in &declaration.methods {
            builder = builder.method(method.into());
        }
        for operator in &declaration.operators {
            builder = builder.operator(operator.into());
        }
        for indexer in &declaration.indexers {
            builder = builder.indexer(indexer.into());
        }
        for interface in &declaration.interfaces {
            builder = builder.interface(interface.type_ref.clone());
        }
        if let Some(index) = declaration.default_constructor {
            builder = builder.default_constructor(MemberId::new(index));
        }
        builder
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;
    use crate::declaration::{InterfaceDeclaration, InterfaceMemberDeclaration, MethodDeclaration};
    use crate::provider::JsonSourceModel;
    use sg_core::{SymbolId, TargetInstance, TypeRef};

    fn method(name: &str) -> MethodDeclaration {
        MethodDeclaration {
            name: name.to_owned(),
            symbol: None,
            parameters: Vec::new(),
            return_type: None,
            type_parameters: Vec::new(),
            explicit_interface: None,
            is_static: false,
        }
    }

    fn worker(lookups: &[(&str, ImplementationLookup)]) -> TypeDeclaration {
        let mut decl = TypeDeclaration::new("Worker");
        decl.methods = lookups.iter().map(|(name, _)| method(name)).collect();
        decl.interfaces.push(InterfaceDeclaration {
            type_ref: TypeRef::interface("IWorker"),
            members: lookups
                .iter()
                .map(|(name, lookup)| InterfaceMemberDeclaration {
                    name: (*name).to_owned(),
                    implementation: lookup.clone(),
                })
                .collect(),
        });
        decl
    }

    fn member(name: &str) -> InterfaceMemberRef {
        InterfaceMemberRef::new(TypeRef::interface("IWorker"), name)
    }

    #[test]
    fn test_members_and_flags_are_carried_over() {
        let mut decl = TypeDeclaration::new("Helpers");
        decl.is_static = true;
        decl.methods.push(method("Run"));
        let source = JsonSourceModel::new(vec![decl]);

        let model = ModelExtractor::new(&source)
            .extract_model("Helpers", "_testClass")
            .unwrap();
        assert!(model.is_static());
        assert_eq!(model.methods()[0].name, "Run");
        assert_eq!(model.target_instance(), &TargetInstance::Type("Helpers".to_owned()));
    }

    #[test]
    fn test_missing_declaration_fails() {
        let source = JsonSourceModel::default();
        let result = ModelExtractor::new(&source).extract("Nope");
        assert!(matches!(result, Err(ModelError::Construction { .. })));
    }

    #[test]
    fn test_bad_default_constructor_is_a_contract_error() {
        let mut decl = TypeDeclaration::new("Foo");
        decl.default_constructor = Some(3);
        let source = JsonSourceModel::new(vec![decl]);
        let result = ModelExtractor::new(&source).extract_model("Foo", "_testClass");
        assert!(matches!(result, Err(ModelError::Contract(_))));
    }

    #[test]
    fn test_failed_lookup_keeps_other_associations() {
        let source = JsonSourceModel::new(vec![worker(&[
            ("Start", ImplementationLookup::Found(SymbolId::new("Start()"))),
            ("Pause", ImplementationLookup::Anomaly("binding failed".to_owned())),
            ("Stop", ImplementationLookup::Found(SymbolId::new("Stop()"))),
        ])]);

        let model = ModelExtractor::new(&source)
            .extract_model("Worker", "_testClass")
            .unwrap();
        let deps = model.dependencies();
        assert_eq!(deps.implementation_count(), 2);
        assert!(deps.implementation_of(&member("Start")).is_some());
        assert!(deps.implementation_of(&member("Pause")).is_none());
        assert!(deps.implementation_of(&member("Stop")).is_some());
        assert_eq!(
            model.method_implementing(&member("Stop")).map(|m| m.name.as_str()),
            Some("Stop")
        );
    }

    /// Provider whose lookups always fail, regardless of the declaration.
    struct FailingLookups(JsonSourceModel);

    impl SourceModelProvider for FailingLookups {
        fn declaration(&self, id: &str) -> Option<Cow<'_, TypeDeclaration>> {
            self.0.declaration(id)
        }

        fn find_implementation(&self, _: &str, _: &InterfaceMemberRef) -> ImplementationLookup {
            ImplementationLookup::Anomaly("lookup unavailable".to_owned())
        }

        fn declaration_ids(&self) -> Vec<String> {
            self.0.declaration_ids()
        }
    }

    #[test]
    fn test_all_lookups_failing_still_builds_model() {
        let source = FailingLookups(JsonSourceModel::new(vec![worker(&[(
            "Start",
            ImplementationLookup::Found(SymbolId::new("Start()")),
        )])]));
        let model = ModelExtractor::new(&source)
            .extract_model("Worker", "_testClass")
            .unwrap();
        assert_eq!(model.dependencies().implementation_count(), 0);
        assert_eq!(model.interfaces().len(), 1);
    }

    #[test]
    fn test_extract_all_keeps_order_and_isolates_failures() {
        let mut broken = TypeDeclaration::new("Broken");
        broken.default_constructor = Some(0);
        let source = JsonSourceModel::new(vec![
            TypeDeclaration::new("First"),
            broken,
            TypeDeclaration::new("Last"),
        ]);

        let results = ModelExtractor::new(&source).extract_all(|_| "_sut".to_owned());
        let names: Vec<_> = results.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(names, ["First", "Broken", "Last"]);
        assert!(results[0].1.is_ok());
        assert!(results[1].1.is_err());
        assert_eq!(
            results[2].1.as_ref().map(|m| m.target_instance().name().to_owned()).ok(),
            Some("_sut".to_owned())
        );
    }
}
