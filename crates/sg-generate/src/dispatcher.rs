//! Routing of targets to strategies.
//!
//! For every target of a type, the dispatcher asks each strategy of the
//! target's kind, highest priority first, whether it applies. Strategies of
//! equal priority keep their registration order. Once an exclusive strategy
//! has produced output for a target, strategies of lower priority are
//! skipped for that target.

use std::cmp::Reverse;
use std::fmt;

use tracing::trace;

use crate::descriptor::GeneratedMethod;
use crate::strategies::{GenerationStrategy, STRATEGIES, StrategyContext, Target};

/// Runs a fixed set of strategies over the targets of a type.
#[derive(Clone, Copy)]
pub struct StrategyDispatcher<'s> {
    strategies: &'s [&'s dyn GenerationStrategy],
}

impl StrategyDispatcher<'static> {
    /// A dispatcher over the built-in [`STRATEGIES`].
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            strategies: &STRATEGIES,
        }
    }
}

impl Default for StrategyDispatcher<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'s> StrategyDispatcher<'s> {
    /// A dispatcher over `strategies`, in registration order.
    #[inline]
    #[must_use]
    pub const fn with_strategies(strategies: &'s [&'s dyn GenerationStrategy]) -> Self {
        Self { strategies }
    }

    /// Generates methods for every target of the context's type.
    ///
    /// Targets are visited in a fixed order: the type itself, then
    /// properties, methods, operators and indexers in declaration order.
    #[must_use]
    pub fn dispatch(&self, cx: &StrategyContext<'_>) -> Vec<GeneratedMethod> {
        let model = cx.model;
        let targets = std::iter::once(Target::Type)
            .chain(model.properties().iter().map(Target::Property))
            .chain(model.methods().iter().map(Target::Method))
            .chain(model.operators().iter().map(Target::Operator))
            .chain(model.indexers().iter().map(Target::Indexer));

        targets
            .flat_map(|target| self.dispatch_target(target, cx))
            .collect()
    }

    /// Generates methods for a single target.
    #[must_use]
    pub fn dispatch_target(
        &self,
        target: Target<'_>,
        cx: &StrategyContext<'_>,
    ) -> Vec<GeneratedMethod> {
        let kind = target.kind();
        let mut candidates: Vec<&dyn GenerationStrategy> = self
            .strategies
            .iter()
            .copied()
            .filter(|s| s.info().target == kind)
            .filter(|s| s.is_enabled(cx.config))
            .filter(|s| s.can_handle(target, cx.model))
            .collect();
        candidates.sort_by_key(|s| Reverse(s.info().priority));

        let mut methods = Vec::new();
        let mut floor = 0;
        for strategy in candidates {
            let info = strategy.info();
            if info.priority < floor {
                trace!(strategy = info.id, floor, "Suppressed by exclusive strategy");
                continue;
            }
            let created = strategy.create(target, cx);
            if info.exclusive && !created.is_empty() {
                floor = info.priority;
            }
            methods.extend(created);
        }
        methods
    }
}

impl fmt::Debug for StrategyDispatcher<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.strategies.iter().map(|s| s.info().id))
            .finish()
    }
}
