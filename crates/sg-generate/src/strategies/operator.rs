//! Operator strategy.

use sg_core::{OperatorModel, StrategyToggle, TypeModel};

use super::{GenerationStrategy, StrategyContext, StrategyInfo, Target, TargetKind};
use crate::descriptor::GeneratedMethod;
use crate::naming::unique_operator_name;
use crate::syntax::{Expr, Stmt};

static CAN_CALL_OPERATOR: StrategyInfo = StrategyInfo {
    id: "can_call_operator",
    target: TargetKind::Operator,
    priority: 1,
    exclusive: false,
    toggle: StrategyToggle::OperatorTests,
};

fn operator<'m>(target: Target<'m>) -> Option<&'m OperatorModel> {
    match target {
        Target::Operator(operator) => Some(operator),
        _ => None,
    }
}

/// Applies a unary or binary operator to generated operands.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanCallOperator;

impl GenerationStrategy for CanCallOperator {
    fn info(&self) -> &'static StrategyInfo {
        &CAN_CALL_OPERATOR
    }

    fn can_handle(&self, target: Target<'_>, _model: &TypeModel) -> bool {
        operator(target).is_some_and(|o| matches!(o.parameters.len(), 1 | 2))
    }

    fn create(&self, target: Target<'_>, cx: &StrategyContext<'_>) -> Vec<GeneratedMethod> {
        let Some(operator) = operator(target) else {
            return Vec::new();
        };
        let (mut body, operands) = cx.parameter_locals(&operator.parameters);
        body.push(Stmt::local("result", Expr::operator(&operator.token, operands)));
        body.push(cx.inconclusive());

        let member_name = unique_operator_name(operator, cx.model.operators());
        let name = cx
            .policy
            .can_call_operator
            .render(&cx.naming().with_member_name(member_name));
        vec![GeneratedMethod::new(
            name,
            CAN_CALL_OPERATOR.id,
            body,
            operator.should_generate,
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::test_support::{Fixture, render};
    use sg_core::{ParameterModel, TypeModelBuilder, TypeRef};

    fn money(name: &str) -> ParameterModel {
        ParameterModel::new(name, TypeRef::value("Money"))
    }

    #[test]
    fn test_binary_and_unary_operators() {
        let model = TypeModelBuilder::new("Money")
            .type_ref(TypeRef::value("Money"))
            .operator(OperatorModel::new("Addition", "+", [money("left"), money("right")], TypeRef::value("Money")))
            .operator(OperatorModel::new("UnaryNegation", "-", [money("value")], TypeRef::value("Money")))
            .build()
            .unwrap();
        let fixture = Fixture::new();
        let cx = fixture.context(&model);
        let rendered: Vec<String> = model
            .operators()
            .iter()
            .flat_map(|o| render(&CanCallOperator.create(Target::Operator(o), &cx)))
            .collect();
        assert_eq!(
            rendered,
            [
                "CanCallAdditionOperator: var left = default(Money); var right = default(Money); \
                 var result = left + right; Assert.Fail(\"Create or modify test\");",
                "CanCallUnaryNegationOperator: var value = default(Money); var result = -value; \
                 Assert.Fail(\"Create or modify test\");",
            ]
        );
    }

    #[test]
    fn test_overloaded_operators_are_named_by_type() {
        let model = TypeModelBuilder::new("Money")
            .operator(OperatorModel::new("Addition", "+", [money("left"), money("right")], TypeRef::value("Money")))
            .operator(OperatorModel::new(
                "Addition",
                "+",
                [money("left"), ParameterModel::new("right", TypeRef::value("Decimal"))],
                TypeRef::value("Money"),
            ))
            .build()
            .unwrap();
        let fixture = Fixture::new();
        let cx = fixture.context(&model);
        let names: Vec<String> = model
            .operators()
            .iter()
            .flat_map(|o| CanCallOperator.create(Target::Operator(o), &cx))
            .map(|m| m.name)
            .collect();
        assert_eq!(
            names,
            ["CanCallAdditionWithMoneyAndMoneyOperator", "CanCallAdditionWithMoneyAndDecimalOperator"]
        );
    }
}
