//! Method strategies.

use sg_core::{MethodModel, ParameterModel, StrategyToggle, TypeModel};

use super::{GenerationStrategy, StrategyContext, StrategyInfo, Target, TargetKind};
use crate::descriptor::GeneratedMethod;
use crate::naming::unique_method_name;
use crate::syntax::{Expr, Stmt};

const RESULT: &str = "result";
const ARGUMENT_NULL_EXCEPTION: &str = "ArgumentNullException";

static CAN_CALL_METHOD: StrategyInfo = StrategyInfo {
    id: "can_call_method",
    target: TargetKind::Method,
    priority: 1,
    exclusive: false,
    toggle: StrategyToggle::MethodTests,
};

static METHOD_NULL_CHECK: StrategyInfo = StrategyInfo {
    id: "method_null_check",
    target: TargetKind::Method,
    priority: 1,
    exclusive: false,
    toggle: StrategyToggle::MethodNullChecks,
};

fn method<'m>(target: Target<'m>) -> Option<&'m MethodModel> {
    match target {
        Target::Method(method) => Some(method),
        _ => None,
    }
}

/// `receiver.Name(arguments)`, through an interface cast for explicit
/// implementations and through the type name for static methods.
fn invocation(cx: &StrategyContext<'_>, method: &MethodModel, arguments: Vec<Expr>) -> Expr {
    let receiver = match &method.explicit_interface {
        Some(interface) if !method.is_static => Expr::cast(interface.clone(), cx.target()),
        _ => cx.receiver(method.is_static),
    };
    Expr::call(receiver, &method.name, arguments)
}

/// Calls a method with generated arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanCallMethod;

impl GenerationStrategy for CanCallMethod {
    fn info(&self) -> &'static StrategyInfo {
        &CAN_CALL_METHOD
    }

    fn can_handle(&self, target: Target<'_>, model: &TypeModel) -> bool {
        method(target).is_some_and(|m| m.is_static || !model.is_static())
    }

    fn create(&self, target: Target<'_>, cx: &StrategyContext<'_>) -> Vec<GeneratedMethod> {
        let Some(method) = method(target) else {
            return Vec::new();
        };
        let (mut body, arguments) = cx.parameter_locals(&method.parameters);
        let call = invocation(cx, method, arguments);
        body.push(match &method.return_type {
            Some(_) => Stmt::local(RESULT, call),
            None => call.into(),
        });
        body.push(cx.inconclusive());

        let member_name = unique_method_name(method, cx.model.methods());
        let name = cx
            .policy
            .can_call_method
            .render(&cx.naming().with_member_name(member_name));
        vec![GeneratedMethod::new(
            name,
            CAN_CALL_METHOD.id,
            body,
            method.should_generate,
        )]
    }
}

/// Passes `null` for each non-nullable reference parameter of a method and
/// expects `ArgumentNullException`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MethodNullCheck;

fn is_null_checked(parameter: &ParameterModel) -> bool {
    parameter.type_ref.is_reference() && !parameter.is_nullable()
}

impl GenerationStrategy for MethodNullCheck {
    fn info(&self) -> &'static StrategyInfo {
        &METHOD_NULL_CHECK
    }

    fn can_handle(&self, target: Target<'_>, model: &TypeModel) -> bool {
        method(target).is_some_and(|m| {
            (m.is_static || !model.is_static()) && m.parameters.iter().any(is_null_checked)
        })
    }

    fn create(&self, target: Target<'_>, cx: &StrategyContext<'_>) -> Vec<GeneratedMethod> {
        let Some(method) = method(target) else {
            return Vec::new();
        };
        let member_context = cx
            .naming()
            .with_member_name(unique_method_name(method, cx.model.methods()));

        method
            .parameters
            .iter()
            .enumerate()
            .filter(|(_, p)| is_null_checked(p))
            .map(|(position, parameter)| {
                let arguments = method
                    .parameters
                    .iter()
                    .enumerate()
                    .map(|(i, p)| {
                        if i == position {
                            Expr::Default(p.type_ref.clone())
                        } else {
                            cx.synthesizer.fresh_value(&p.type_ref)
                        }
                    })
                    .collect();
                let assertion = cx.assertions.throws_for_parameter(
                    ARGUMENT_NULL_EXCEPTION,
                    &parameter.name,
                    invocation(cx, method, arguments),
                );
                let name = cx
                    .policy
                    .cannot_call_method_with_null
                    .render(&member_context.with_parameter_name(&parameter.name));
                GeneratedMethod::new(
                    name,
                    METHOD_NULL_CHECK.id,
                    vec![assertion.into()],
                    method.should_generate,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::test_support::{Fixture, render};
    use sg_core::{TypeFlags, TypeModelBuilder, TypeRef};

    fn int(name: &str) -> ParameterModel {
        ParameterModel::new(name, TypeRef::value("Int32"))
    }

    fn text(name: &str) -> ParameterModel {
        ParameterModel::new(name, TypeRef::string())
    }

    fn rendered(strategy: &dyn GenerationStrategy, model: &TypeModel) -> Vec<String> {
        let fixture = Fixture::new();
        let cx = fixture.context(model);
        model
            .methods()
            .iter()
            .filter(|m| strategy.can_handle(Target::Method(*m), model))
            .flat_map(|m| render(&strategy.create(Target::Method(m), &cx)))
            .collect()
    }

    #[test]
    fn test_can_call_overloaded_methods() {
        let model = TypeModelBuilder::new("Calculator")
            .method(MethodModel::new("Add", [int("x")]).returning(TypeRef::value("Int32")))
            .method(MethodModel::new("Add", [text("x")]))
            .build()
            .unwrap();
        assert_eq!(
            rendered(&CanCallMethod, &model),
            [
                "CanCallAddWithInt32: var x = 42; var result = _testClass.Add(x); \
                 Assert.Fail(\"Create or modify test\");",
                "CanCallAddWithString: var x = \"TestValue\"; _testClass.Add(x); \
                 Assert.Fail(\"Create or modify test\");",
            ]
        );
    }

    #[test]
    fn test_can_call_static_and_explicit_methods() {
        let model = TypeModelBuilder::new("Service")
            .method(MethodModel::new("Create", []).as_static().returning(TypeRef::class("Service")))
            .method(MethodModel::new("Run", [ParameterModel::new("logger", TypeRef::interface("ILogger"))])
                .explicit_for(TypeRef::interface("IRunner")))
            .build()
            .unwrap();
        assert_eq!(
            rendered(&CanCallMethod, &model),
            [
                "CanCallCreate: var result = Service.Create(); Assert.Fail(\"Create or modify test\");",
                "CanCallRun: var logger = new Mock<ILogger>().Object; ((IRunner)_testClass).Run(logger); \
                 Assert.Fail(\"Create or modify test\");",
            ]
        );
    }

    #[test]
    fn test_instance_methods_of_static_types_are_skipped() {
        let model = TypeModelBuilder::new("Helpers")
            .flags(TypeFlags { is_static: true, ..TypeFlags::default() })
            .method(MethodModel::new("Run", []))
            .build()
            .unwrap();
        assert!(!CanCallMethod.can_handle(Target::Method(&model.methods()[0]), &model));
    }

    #[test]
    fn test_null_checks_for_each_reference_parameter() {
        let model = TypeModelBuilder::new("Mailer")
            .method(MethodModel::new(
                "Send",
                [
                    text("to"),
                    int("retries"),
                    ParameterModel::new("cc", TypeRef::string().nullable()),
                    ParameterModel::new("options", TypeRef::class("Options")),
                ],
            ))
            .build()
            .unwrap();
        assert_eq!(
            rendered(&MethodNullCheck, &model),
            [
                "CannotCallSendWithNullTo: Assert.Throws<ArgumentNullException>(\"to\", \
                 () => _testClass.Send(default(String), 42, \"TestValue\", new Options()));",
                "CannotCallSendWithNullOptions: Assert.Throws<ArgumentNullException>(\"options\", \
                 () => _testClass.Send(\"TestValue\", 42, \"TestValue\", default(Options)));",
            ]
        );
    }

    #[test]
    fn test_value_parameters_get_no_null_check() {
        let model = TypeModelBuilder::new("Counter")
            .method(MethodModel::new("Increment", [int("by")]))
            .build()
            .unwrap();
        assert!(rendered(&MethodNullCheck, &model).is_empty());
    }
}
