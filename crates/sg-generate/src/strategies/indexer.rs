//! Indexer strategies.

use sg_core::{IndexerModel, StrategyToggle, TypeModel};

use super::{GenerationStrategy, StrategyContext, StrategyInfo, Target, TargetKind};
use crate::descriptor::GeneratedMethod;
use crate::naming::indexer_name;
use crate::syntax::{Expr, Stmt};

const TEST_VALUE: &str = "testValue";

static CAN_SET_AND_GET_INDEXER: StrategyInfo = StrategyInfo {
    id: "can_set_and_get_indexer",
    target: TargetKind::Indexer,
    priority: 2,
    exclusive: true,
    toggle: StrategyToggle::IndexerTests,
};

static CAN_GET_INDEXER: StrategyInfo = StrategyInfo {
    id: "can_get_indexer",
    target: TargetKind::Indexer,
    priority: 1,
    exclusive: false,
    toggle: StrategyToggle::IndexerTests,
};

fn indexer<'m>(target: Target<'m>) -> Option<&'m IndexerModel> {
    match target {
        Target::Indexer(indexer) => Some(indexer),
        _ => None,
    }
}

/// Writes a value through an indexer and reads it back.
///
/// Exclusive: an indexer it generates a test for gets no read-only test.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanSetAndGetIndexer;

impl GenerationStrategy for CanSetAndGetIndexer {
    fn info(&self) -> &'static StrategyInfo {
        &CAN_SET_AND_GET_INDEXER
    }

    fn can_handle(&self, target: Target<'_>, model: &TypeModel) -> bool {
        indexer(target).is_some_and(|i| !model.is_static() && i.has_getter && i.has_setter)
    }

    fn create(&self, target: Target<'_>, cx: &StrategyContext<'_>) -> Vec<GeneratedMethod> {
        let Some(indexer) = indexer(target) else {
            return Vec::new();
        };
        let (mut body, arguments) = cx.parameter_locals(&indexer.parameters);
        let element = Expr::index(cx.target(), arguments);
        body.push(Stmt::local(TEST_VALUE, cx.synthesizer.fresh_value(&indexer.type_ref)));
        body.push(Stmt::assign(element.clone(), Expr::ident(TEST_VALUE)));
        body.push(
            cx.assert_matches(&indexer.type_ref, Expr::ident(TEST_VALUE), element)
                .into(),
        );

        let member_name = indexer_name(indexer, cx.model.indexers());
        let name = cx
            .policy
            .can_set_and_get_indexer
            .render(&cx.naming().with_member_name(member_name));
        vec![GeneratedMethod::new(
            name,
            CAN_SET_AND_GET_INDEXER.id,
            body,
            indexer.should_generate,
        )]
    }
}

/// Reads through an indexer and checks the element type.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanGetIndexer;

impl GenerationStrategy for CanGetIndexer {
    fn info(&self) -> &'static StrategyInfo {
        &CAN_GET_INDEXER
    }

    fn can_handle(&self, target: Target<'_>, model: &TypeModel) -> bool {
        indexer(target).is_some_and(|i| !model.is_static() && i.has_getter)
    }

    fn create(&self, target: Target<'_>, cx: &StrategyContext<'_>) -> Vec<GeneratedMethod> {
        let Some(indexer) = indexer(target) else {
            return Vec::new();
        };
        let (mut body, arguments) = cx.parameter_locals(&indexer.parameters);
        body.push(
            cx.assertions
                .is_type(&indexer.type_ref, Expr::index(cx.target(), arguments))
                .into(),
        );
        body.push(cx.inconclusive());

        let member_name = indexer_name(indexer, cx.model.indexers());
        let name = cx
            .policy
            .can_get_indexer
            .render(&cx.naming().with_member_name(member_name));
        vec![GeneratedMethod::new(
            name,
            CAN_GET_INDEXER.id,
            body,
            indexer.should_generate,
        )]
    }
}
