//! Repeated-dispose strategy.

use sg_core::{InterfaceMemberRef, StrategyToggle, TypeModel};

use super::{GenerationStrategy, StrategyContext, StrategyInfo, Target, TargetKind};
use crate::descriptor::GeneratedMethod;
use crate::syntax::Expr;

const DISPOSABLE: &str = "IDisposable";
const DISPOSE: &str = "Dispose";

static CAN_CALL_DISPOSE: StrategyInfo = StrategyInfo {
    id: "can_call_dispose",
    target: TargetKind::Type,
    priority: 1,
    exclusive: false,
    toggle: StrategyToggle::DisposableTests,
};

/// Disposes the system under test twice.
///
/// The call goes through an `IDisposable` cast when `Dispose` is implemented
/// explicitly or its implementation could not be resolved.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanCallDispose;

impl GenerationStrategy for CanCallDispose {
    fn info(&self) -> &'static StrategyInfo {
        &CAN_CALL_DISPOSE
    }

    fn can_handle(&self, _target: Target<'_>, model: &TypeModel) -> bool {
        !model.is_static() && model.implements(DISPOSABLE)
    }

    fn create(&self, _target: Target<'_>, cx: &StrategyContext<'_>) -> Vec<GeneratedMethod> {
        let Some(interface) = cx.model.interfaces().iter().find(|i| i.name == DISPOSABLE) else {
            return Vec::new();
        };

        let implementation =
            cx.model.method_implementing(&InterfaceMemberRef::new(interface.clone(), DISPOSE));
        let receiver = match implementation {
            Some(method) if method.explicit_interface.is_none() => cx.target(),
            _ => Expr::cast(interface.clone(), cx.target()),
        };
        let call = Expr::call(receiver, DISPOSE, []);

        let name = cx.policy.can_call_dispose_multiple_times.render(cx.naming());
        let should_generate =
            cx.model.should_generate() || implementation.is_some_and(|m| m.should_generate);
        vec![GeneratedMethod::new(
            name,
            CAN_CALL_DISPOSE.id,
            vec![call.clone().into(), call.into()],
            should_generate,
        )]
    }
}
