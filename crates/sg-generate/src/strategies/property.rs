//! Property strategies.

use sg_core::{PropertyModel, RequiredAsset, StrategyToggle, TypeModel};

use super::{GenerationStrategy, StrategyContext, StrategyInfo, Target, TargetKind};
use crate::descriptor::GeneratedMethod;
use crate::syntax::{Expr, Stmt};

const TEST_VALUE: &str = "testValue";
const CHECK_PROPERTY: &str = "CheckProperty";

static INITIALIZED_PROPERTY: StrategyInfo = StrategyInfo {
    id: "initialized_property",
    target: TargetKind::Property,
    priority: 2,
    exclusive: true,
    toggle: StrategyToggle::InitializedProperties,
};

static READ_WRITE_PROPERTY: StrategyInfo = StrategyInfo {
    id: "read_write_property",
    target: TargetKind::Property,
    priority: 1,
    exclusive: false,
    toggle: StrategyToggle::PropertyTests,
};

static READ_ONLY_PROPERTY: StrategyInfo = StrategyInfo {
    id: "read_only_property",
    target: TargetKind::Property,
    priority: 1,
    exclusive: false,
    toggle: StrategyToggle::PropertyTests,
};

fn property<'m>(target: Target<'m>) -> Option<&'m PropertyModel> {
    match target {
        Target::Property(property) => Some(property),
        _ => None,
    }
}

/// The constructor parameter assigned to `property` or to its backing field.
fn initializing_parameter<'m>(property: &PropertyModel, model: &'m TypeModel) -> Option<&'m str> {
    let dependencies = model.dependencies();
    dependencies.parameter_for_member(&property.name).or_else(|| {
        property
            .backing_field
            .as_deref()
            .and_then(|field| dependencies.parameter_for_member(field))
    })
}

/// Checks that a property initialized from a constructor argument returns
/// that argument.
///
/// Exclusive: a property it generates a test for gets no read/write or
/// read-only test.
#[derive(Debug, Clone, Copy, Default)]
pub struct InitializedProperty;

impl GenerationStrategy for InitializedProperty {
    fn info(&self) -> &'static StrategyInfo {
        &INITIALIZED_PROPERTY
    }

    fn can_handle(&self, target: Target<'_>, model: &TypeModel) -> bool {
        property(target).is_some_and(|p| {
            !model.is_static()
                && !p.is_static
                && p.has_getter
                && initializing_parameter(p, model).is_some()
        })
    }

    fn create(&self, target: Target<'_>, cx: &StrategyContext<'_>) -> Vec<GeneratedMethod> {
        let Some(property) = property(target) else {
            return Vec::new();
        };
        let Some(parameter) = initializing_parameter(property, cx.model).and_then(|name| {
            cx.accessible_constructors()
                .find_map(|c| c.parameter_named(name))
        }) else {
            return Vec::new();
        };

        let expected = cx.synthesizer.argument_for(parameter);
        let actual = Expr::member(cx.target(), &property.name);
        let body = vec![cx.assert_matches(&property.type_ref, expected, actual).into()];
        let name = cx
            .policy
            .is_initialized_correctly
            .render(&cx.naming().with_member_name(&property.name));
        vec![GeneratedMethod::new(
            name,
            INITIALIZED_PROPERTY.id,
            body,
            property.should_generate,
        )]
    }
}

/// Sets a read/write property and reads the value back.
///
/// With `use_property_tester` enabled, instance properties are checked
/// through the property tester asset instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadWriteProperty;

impl GenerationStrategy for ReadWriteProperty {
    fn info(&self) -> &'static StrategyInfo {
        &READ_WRITE_PROPERTY
    }

    fn can_handle(&self, target: Target<'_>, _model: &TypeModel) -> bool {
        property(target).is_some_and(|p| p.has_getter && p.has_setter)
    }

    fn create(&self, target: Target<'_>, cx: &StrategyContext<'_>) -> Vec<GeneratedMethod> {
        let Some(property) = property(target) else {
            return Vec::new();
        };
        let receiver = cx.receiver(property.is_static);
        let name = cx
            .policy
            .can_set_and_get_property
            .render(&cx.naming().with_member_name(&property.name));

        if cx.config.generation.use_property_tester && !property.is_static {
            let selector = Expr::lambda_with(["x"], Expr::member(Expr::ident("x"), &property.name));
            let body = vec![Expr::call(receiver, CHECK_PROPERTY, [selector]).into()];
            return vec![
                GeneratedMethod::new(name, READ_WRITE_PROPERTY.id, body, property.should_generate)
                    .requiring(RequiredAsset::PropertyTester),
            ];
        }

        let member = Expr::member(receiver, &property.name);
        let body = vec![
            Stmt::local(TEST_VALUE, cx.synthesizer.fresh_value(&property.type_ref)),
            Stmt::assign(member.clone(), Expr::ident(TEST_VALUE)),
            cx.assert_matches(&property.type_ref, Expr::ident(TEST_VALUE), member)
                .into(),
        ];
        vec![GeneratedMethod::new(
            name,
            READ_WRITE_PROPERTY.id,
            body,
            property.should_generate,
        )]
    }
}

/// Reads a property without a setter and checks the value's type.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadOnlyProperty;

impl GenerationStrategy for ReadOnlyProperty {
    fn info(&self) -> &'static StrategyInfo {
        &READ_ONLY_PROPERTY
    }

    fn can_handle(&self, target: Target<'_>, _model: &TypeModel) -> bool {
        property(target).is_some_and(|p| p.has_getter && !p.has_setter)
    }

    fn create(&self, target: Target<'_>, cx: &StrategyContext<'_>) -> Vec<GeneratedMethod> {
        let Some(property) = property(target) else {
            return Vec::new();
        };
        let member = Expr::member(cx.receiver(property.is_static), &property.name);
        let body = vec![
            cx.assertions.is_type(&property.type_ref, member).into(),
            cx.inconclusive(),
        ];
        let name = cx
            .policy
            .can_get_property
            .render(&cx.naming().with_member_name(&property.name));
        vec![GeneratedMethod::new(
            name,
            READ_ONLY_PROPERTY.id,
            body,
            property.should_generate,
        )]
    }
}
