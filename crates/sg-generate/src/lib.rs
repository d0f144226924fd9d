//! Test method selection, naming, and object synthesis for sutgen.
//!
//! Given the structural model of one type under test, this crate decides
//! which test methods should exist, names them without collisions, and
//! builds the expression that constructs the system under test.
//!
//! # Overview
//!
//! The main entry point is [`TestGenerator`], which combines:
//!
//! - [`NamingPolicy`](naming::NamingPolicy): configured naming patterns
//! - [`ObjectSynthesizer`]: construction and dependency wiring
//! - [`StrategyDispatcher`]: routing of every target to the
//!   [`strategies`] that apply
//! - Framework templates from [`frameworks`]
//!
//! Output is a [`GenerationOutput`] per type, handed to an external code
//! emitter. Nothing in this crate performs I/O.
//!
//! # Example
//!
//! ```
//! use sg_core::{Config, ConstructorModel, ParameterModel, TypeModelBuilder, TypeRef};
//! use sg_generate::TestGenerator;
//!
//! let model = TypeModelBuilder::new("Greeter")
//!     .constructor(ConstructorModel::new([ParameterModel::new("name", TypeRef::string())]))
//!     .build()
//!     .unwrap();
//!
//! let generator = TestGenerator::new(Config::default()).unwrap();
//! let output = generator.generate(&model);
//! assert_eq!(output.methods[0].name, "CanConstruct");
//! assert_eq!(
//!     output.setup.target_construction.map(|e| e.to_string()),
//!     Some("new Greeter(_name)".to_owned())
//! );
//! ```
//!
//! # Architecture
//!
//! ```text
//! TestGenerator::generate(model)
//!     │
//!     ├── SetupDescriptor (support fields, dependency fields, SUT)
//!     │
//!     ├── StrategyDispatcher (type, properties, methods, operators, indexers)
//!     │       │
//!     │       └── GenerationStrategy::create (naming + synthesizer)
//!     │
//!     └── make_names_unique (suffix repeats)
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod frameworks;
pub mod naming;
pub mod strategies;
pub mod syntax;

mod descriptor;
mod dispatcher;
mod error;
mod synthesizer;

pub use descriptor::{FieldDescriptor, GeneratedMethod, GenerationOutput, SetupDescriptor};
pub use dispatcher::StrategyDispatcher;
pub use error::GenerationError;
pub use synthesizer::ObjectSynthesizer;

use rayon::prelude::*;
use sg_core::{Config, NamingContext, RequiredAsset, TypeModel};
use tracing::{debug, instrument};

use crate::descriptor::make_names_unique;
use crate::frameworks::{
    AssertionFramework, AutoFixtureValueGenerator, DefaultValueGenerator, MockingFramework,
    ValueGenerator, assertion_framework, mocking_framework,
};
use crate::naming::NamingPolicy;
use crate::strategies::StrategyContext;

/// Generates test-method descriptors for type models.
///
/// A generator is immutable once built and can be shared across threads.
#[derive(Debug)]
pub struct TestGenerator {
    config: Config,
    policy: NamingPolicy,
    mocking: Box<dyn MockingFramework>,
    assertions: Box<dyn AssertionFramework>,
    values: Option<Box<dyn ValueGenerator>>,
    dispatcher: StrategyDispatcher<'static>,
}

impl TestGenerator {
    /// Creates a generator using the frameworks `config` selects.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Config`] if the configuration is invalid.
    pub fn new(config: Config) -> Result<Self, GenerationError> {
        Self::builder().config(config).build()
    }

    /// Returns a builder for a generator with custom collaborators.
    #[inline]
    #[must_use]
    pub fn builder() -> TestGeneratorBuilder {
        TestGeneratorBuilder::default()
    }

    /// The effective configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The parsed naming patterns.
    #[inline]
    #[must_use]
    pub const fn policy(&self) -> &NamingPolicy {
        &self.policy
    }

    /// Generates the setup and test methods for one type.
    ///
    /// Returns an empty output when nothing in the model is marked for
    /// generation, or when the type is not public and internal types are
    /// excluded by configuration.
    #[instrument(skip_all, fields(type_name = %model.class_name()))]
    pub fn generate(&self, model: &TypeModel) -> GenerationOutput {
        if !model.should_generate_any() {
            debug!("Nothing marked for generation");
            return GenerationOutput::empty(model.class_name());
        }
        if !model.flags().is_public && !self.config.generation.emit_tests_for_internals {
            debug!("Skipping non-public type");
            return GenerationOutput::empty(model.class_name());
        }

        let auto_fixture;
        let values: &dyn ValueGenerator = match &self.values {
            Some(values) => values.as_ref(),
            None if self.config.generation.use_auto_fixture_field => {
                let context = NamingContext::new(model.class_name());
                auto_fixture =
                    AutoFixtureValueGenerator::new(self.policy.auto_fixture_field_name(&context));
                &auto_fixture
            }
            None => &DefaultValueGenerator,
        };

        let cx = StrategyContext {
            model,
            config: &self.config,
            policy: &self.policy,
            assertions: self.assertions.as_ref(),
            synthesizer: ObjectSynthesizer::new(
                model,
                &self.config.generation,
                &self.policy,
                self.mocking.as_ref(),
                values,
            ),
        };

        let setup = setup(&cx, values);
        let mut methods = self.dispatcher.dispatch(&cx);
        make_names_unique(&mut methods);

        let mut required_assets: Vec<RequiredAsset> = model
            .required_assets()
            .iter()
            .copied()
            .chain(methods.iter().flat_map(|m| m.assets.iter().copied()))
            .collect();
        required_assets.sort_unstable();
        required_assets.dedup();

        debug!(
            methods = methods.len(),
            fields = setup.fields.len(),
            "Generated test methods"
        );

        GenerationOutput {
            type_name: model.class_name().to_owned(),
            setup,
            methods,
            required_assets,
        }
    }

    /// Generates outputs for many types in parallel, in input order.
    #[must_use]
    pub fn generate_all(&self, models: &[TypeModel]) -> Vec<GenerationOutput> {
        models.par_iter().map(|model| self.generate(model)).collect()
    }
}

/// Test-class fields and the construction of the system under test.
///
/// The value generator's support field comes first since dependency
/// initializers may read from it. Static types get no target field.
fn setup(cx: &StrategyContext<'_>, values: &dyn ValueGenerator) -> SetupDescriptor {
    let mut fields: Vec<FieldDescriptor> = values
        .support_field()
        .map(FieldDescriptor::from)
        .into_iter()
        .collect();

    if cx.model.is_static() {
        return SetupDescriptor {
            fields,
            ..SetupDescriptor::default()
        };
    }

    fields.extend(cx.synthesizer.dependency_fields());
    SetupDescriptor {
        fields,
        target_field: Some(cx.model.target_instance().name().to_owned()),
        target_construction: Some(cx.synthesizer.synthesize_construction(true)),
    }
}

/// Builder for [`TestGenerator`].
///
/// Only the configuration is required; frameworks default to the ones the
/// configuration selects.
#[derive(Debug, Default)]
pub struct TestGeneratorBuilder {
    config: Option<Config>,
    mocking: Option<Box<dyn MockingFramework>>,
    assertions: Option<Box<dyn AssertionFramework>>,
    values: Option<Box<dyn ValueGenerator>>,
    dispatcher: Option<StrategyDispatcher<'static>>,
}

impl TestGeneratorBuilder {
    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Overrides the mocking framework.
    #[must_use]
    pub fn mocking(mut self, mocking: impl MockingFramework + 'static) -> Self {
        self.mocking = Some(Box::new(mocking));
        self
    }

    /// Overrides the assertion framework.
    #[must_use]
    pub fn assertions(mut self, assertions: impl AssertionFramework + 'static) -> Self {
        self.assertions = Some(Box::new(assertions));
        self
    }

    /// Overrides the value generator for every type.
    #[must_use]
    pub fn values(mut self, values: impl ValueGenerator + 'static) -> Self {
        self.values = Some(Box::new(values));
        self
    }

    /// Overrides the strategy set.
    #[must_use]
    pub fn dispatcher(mut self, dispatcher: StrategyDispatcher<'static>) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    /// Finishes the generator.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::MissingCollaborator`] if no configuration
    /// was supplied and [`GenerationError::Config`] if it is invalid.
    pub fn build(self) -> Result<TestGenerator, GenerationError> {
        let config = self
            .config
            .ok_or(GenerationError::MissingCollaborator("config"))?;
        config.validate()?;
        let policy = NamingPolicy::from_options(&config.naming)?;

        let generation = &config.generation;
        let mocking = self
            .mocking
            .unwrap_or_else(|| mocking_framework(generation.mocking_framework));
        let assertions = self
            .assertions
            .unwrap_or_else(|| assertion_framework(generation.test_framework));
        debug!(
            mocking = mocking.name(),
            assertions = assertions.name(),
            "Built test generator"
        );

        Ok(TestGenerator {
            mocking,
            assertions,
            values: self.values,
            dispatcher: self.dispatcher.unwrap_or_default(),
            policy,
            config,
        })
    }
}
