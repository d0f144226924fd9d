//! Generation strategies.
//!
//! Each strategy is a unit struct implementing [`GenerationStrategy`], with
//! its dispatch metadata ([`StrategyInfo`]) held as static data. The
//! built-in set is the closed list [`STRATEGIES`], in registration order:
//!
//! | Strategy                  | Target   | Priority | Exclusive |
//! |---------------------------|----------|----------|-----------|
//! | `can_construct`           | type     | 1        | no        |
//! | `null_parameter_check`    | type     | 1        | no        |
//! | `string_parameter_check`  | type     | 1        | no        |
//! | `can_call_dispose`        | type     | 1        | no        |
//! | `initialized_property`    | property | 2        | yes       |
//! | `read_write_property`     | property | 1        | no        |
//! | `read_only_property`      | property | 1        | no        |
//! | `can_call_method`         | method   | 1        | no        |
//! | `method_null_check`       | method   | 1        | no        |
//! | `can_call_operator`       | operator | 1        | no        |
//! | `can_set_and_get_indexer` | indexer  | 2        | yes       |
//! | `can_get_indexer`         | indexer  | 1        | no        |

mod construction;
mod disposal;
mod indexer;
mod method;
mod operator;
mod property;

pub use construction::{CanConstruct, NullParameterCheck, StringParameterCheck};
pub use disposal::CanCallDispose;
pub use indexer::{CanGetIndexer, CanSetAndGetIndexer};
pub use method::{CanCallMethod, MethodNullCheck};
pub use operator::CanCallOperator;
pub use property::{InitializedProperty, ReadOnlyProperty, ReadWriteProperty};

use sg_core::{
    Config, ConstructorModel, IndexerModel, MethodModel, NamingContext, OperatorModel,
    ParameterModel, PropertyModel, StrategyToggle, TypeModel, TypeRef,
};

use crate::descriptor::GeneratedMethod;
use crate::frameworks::AssertionFramework;
use crate::naming::NamingPolicy;
use crate::synthesizer::ObjectSynthesizer;
use crate::syntax::{Expr, Stmt};

/// The kind of item a strategy generates tests for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    /// The type itself (construction, disposal).
    Type,
    /// One property.
    Property,
    /// One method.
    Method,
    /// One operator.
    Operator,
    /// One indexer.
    Indexer,
}

/// The item a strategy is asked about.
#[derive(Debug, Clone, Copy)]
pub enum Target<'m> {
    /// The type itself.
    Type,
    /// One property.
    Property(&'m PropertyModel),
    /// One method.
    Method(&'m MethodModel),
    /// One operator.
    Operator(&'m OperatorModel),
    /// One indexer.
    Indexer(&'m IndexerModel),
}

impl Target<'_> {
    /// The kind of this target.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> TargetKind {
        match self {
            Self::Type => TargetKind::Type,
            Self::Property(_) => TargetKind::Property,
            Self::Method(_) => TargetKind::Method,
            Self::Operator(_) => TargetKind::Operator,
            Self::Indexer(_) => TargetKind::Indexer,
        }
    }
}

/// Static dispatch metadata of a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyInfo {
    /// Stable identifier, recorded on every generated method.
    pub id: &'static str,
    /// The kind of item the strategy handles.
    pub target: TargetKind,
    /// Higher runs first.
    pub priority: u8,
    /// Suppresses lower-priority strategies for a target it produced output for.
    pub exclusive: bool,
    /// The configuration switch enabling the strategy.
    pub toggle: StrategyToggle,
}

/// A rule deciding whether and how to generate tests for one target.
pub trait GenerationStrategy: Sync {
    /// Dispatch metadata.
    fn info(&self) -> &'static StrategyInfo;

    /// Returns `true` if the configuration enables the strategy.
    fn is_enabled(&self, config: &Config) -> bool {
        config.strategies.is_enabled(self.info().toggle)
    }

    /// Returns `true` if the strategy applies to `target` of `model`.
    ///
    /// Only called for targets of the strategy's [`TargetKind`].
    fn can_handle(&self, target: Target<'_>, model: &TypeModel) -> bool;

    /// Generates test methods for `target`.
    ///
    /// Only called after [`can_handle`](Self::can_handle) returned `true`.
    fn create(&self, target: Target<'_>, cx: &StrategyContext<'_>) -> Vec<GeneratedMethod>;
}

/// The built-in strategies, in registration order.
pub static STRATEGIES: [&dyn GenerationStrategy; 12] = [
    &CanConstruct,
    &NullParameterCheck,
    &StringParameterCheck,
    &CanCallDispose,
    &InitializedProperty,
    &ReadWriteProperty,
    &ReadOnlyProperty,
    &CanCallMethod,
    &MethodNullCheck,
    &CanCallOperator,
    &CanSetAndGetIndexer,
    &CanGetIndexer,
];

/// Everything a strategy needs to build test methods for one type.
#[derive(Debug, Clone)]
pub struct StrategyContext<'a> {
    /// The type under test.
    pub model: &'a TypeModel,
    /// Effective configuration.
    pub config: &'a Config,
    /// Parsed naming patterns.
    pub policy: &'a NamingPolicy,
    /// Assertion templates.
    pub assertions: &'a dyn AssertionFramework,
    /// Construction and argument wiring.
    pub synthesizer: ObjectSynthesizer<'a>,
}

impl StrategyContext<'_> {
    /// Naming context of the owning type.
    #[inline]
    #[must_use]
    pub fn naming(&self) -> &NamingContext {
        self.synthesizer.context()
    }

    /// Expression referring to the system under test.
    #[must_use]
    pub fn target(&self) -> Expr {
        Expr::ident(self.model.target_instance().name())
    }

    /// Receiver for a member: the type name for static members, the system
    /// under test otherwise.
    #[must_use]
    pub fn receiver(&self, is_static: bool) -> Expr {
        if is_static {
            Expr::ident(self.model.class_name())
        } else {
            self.target()
        }
    }

    /// Asserts that `actual` matches `expected`, by identity for reference
    /// types other than strings and by equality otherwise.
    #[must_use]
    pub fn assert_matches(&self, type_ref: &TypeRef, expected: Expr, actual: Expr) -> Expr {
        if type_ref.is_reference() && !type_ref.is_string() {
            self.assertions.same(expected, actual)
        } else {
            self.assertions.equal(expected, actual)
        }
    }

    /// Statement failing the test until it is completed by hand.
    #[must_use]
    pub fn inconclusive(&self) -> Stmt {
        self.assertions
            .fail(crate::frameworks::INCONCLUSIVE_MESSAGE)
            .into()
    }

    /// `var p = value;` for every parameter, returning the statements and
    /// the arguments referring to them.
    #[must_use]
    pub fn parameter_locals(&self, parameters: &[ParameterModel]) -> (Vec<Stmt>, Vec<Expr>) {
        parameters
            .iter()
            .map(|p| {
                let name = local_name(&p.name);
                (
                    Stmt::local(name.clone(), self.synthesizer.fresh_value(&p.type_ref)),
                    Expr::ident(name),
                )
            })
            .unzip()
    }

    /// Accessible constructors of the type, in declaration order.
    pub fn accessible_constructors(&self) -> impl Iterator<Item = &ConstructorModel> {
        accessible_constructors(self.model)
    }

    /// Generation flag for a type-level method involving `constructors`.
    #[must_use]
    pub fn type_level_flag<'c>(
        &self,
        mut constructors: impl Iterator<Item = &'c ConstructorModel>,
    ) -> bool {
        self.model.should_generate() || constructors.any(|c| c.should_generate)
    }
}

/// Accessible constructors of `model`, in declaration order.
pub(crate) fn accessible_constructors(model: &TypeModel) -> impl Iterator<Item = &ConstructorModel> {
    model.constructors().iter().filter(|c| c.is_accessible)
}

/// Returns `true` if `model` can be built with `new`.
pub(crate) fn is_constructible(model: &TypeModel) -> bool {
    let flags = model.flags();
    !flags.is_static && !flags.is_abstract
}

/// Local variable name for a parameter, kept clear of the locals strategies declare.
fn local_name(parameter: &str) -> String {
    let name = sg_core::camel_case(parameter);
    if matches!(name.as_str(), "result" | "instance" | "testValue") {
        format!("{name}Value")
    } else {
        name
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::frameworks::{DefaultValueGenerator, Moq, XUnit};

    /// Owns the configuration a [`StrategyContext`] borrows.
    pub(crate) struct Fixture {
        config: Config,
        policy: NamingPolicy,
    }

    impl Fixture {
        pub(crate) fn new() -> Self {
            Self::with_config(Config::default())
        }

        pub(crate) fn with_config(config: Config) -> Self {
            let policy = NamingPolicy::from_options(&config.naming).unwrap();
            Self { config, policy }
        }

        pub(crate) fn context<'a>(&'a self, model: &'a TypeModel) -> StrategyContext<'a> {
            StrategyContext {
                model,
                config: &self.config,
                policy: &self.policy,
                assertions: &XUnit,
                synthesizer: ObjectSynthesizer::new(
                    model,
                    &self.config.generation,
                    &self.policy,
                    &Moq,
                    &DefaultValueGenerator,
                ),
            }
        }
    }

    /// `Name: stmt stmt ...`, one line per method.
    pub(crate) fn render(methods: &[GeneratedMethod]) -> Vec<String> {
        methods
            .iter()
            .map(|m| {
                let body: Vec<String> = m.body.iter().map(ToString::to_string).collect();
                format!("{}: {}", m.name, body.join(" "))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sg_core::FxHashSet;

    #[test]
    fn test_strategy_ids_are_unique() {
        let ids: FxHashSet<&str> = STRATEGIES.iter().map(|s| s.info().id).collect();
        assert_eq!(ids.len(), STRATEGIES.len());
    }

    #[test]
    fn test_exclusive_strategies_outrank_their_peers() {
        for strategy in STRATEGIES.iter().filter(|s| s.info().exclusive) {
            let info = strategy.info();
            assert!(
                STRATEGIES
                    .iter()
                    .filter(|s| s.info().target == info.target && s.info().id != info.id)
                    .all(|s| s.info().priority < info.priority),
                "{} must outrank every other {:?} strategy",
                info.id,
                info.target
            );
        }
    }

    #[test]
    fn test_every_strategy_is_enabled_by_default() {
        let config = Config::default();
        assert!(STRATEGIES.iter().all(|s| s.is_enabled(&config)));
    }

    #[test]
    fn test_local_names_avoid_generated_locals() {
        assert_eq!(local_name("Result"), "resultValue");
        assert_eq!(local_name("count"), "count");
    }
}
