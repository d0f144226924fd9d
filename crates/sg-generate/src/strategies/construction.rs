//! Type-level construction strategies.

use sg_core::{ConstructorModel, ParameterModel, StrategyToggle, TypeModel, TypeRef};

use super::{
    GenerationStrategy, StrategyContext, StrategyInfo, Target, TargetKind,
    accessible_constructors, is_constructible,
};
use crate::descriptor::GeneratedMethod;
use crate::syntax::{Expr, Stmt};

const INSTANCE: &str = "instance";
const ARGUMENT_NULL_EXCEPTION: &str = "ArgumentNullException";
const ARGUMENT_EXCEPTION: &str = "ArgumentException";

static CAN_CONSTRUCT: StrategyInfo = StrategyInfo {
    id: "can_construct",
    target: TargetKind::Type,
    priority: 1,
    exclusive: false,
    toggle: StrategyToggle::CanConstruct,
};

static NULL_PARAMETER_CHECK: StrategyInfo = StrategyInfo {
    id: "null_parameter_check",
    target: TargetKind::Type,
    priority: 1,
    exclusive: false,
    toggle: StrategyToggle::NullParameterChecks,
};

static STRING_PARAMETER_CHECK: StrategyInfo = StrategyInfo {
    id: "string_parameter_check",
    target: TargetKind::Type,
    priority: 1,
    exclusive: false,
    toggle: StrategyToggle::StringParameterChecks,
};

/// Constructs the type through every accessible constructor.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanConstruct;

impl GenerationStrategy for CanConstruct {
    fn info(&self) -> &'static StrategyInfo {
        &CAN_CONSTRUCT
    }

    fn can_handle(&self, _target: Target<'_>, model: &TypeModel) -> bool {
        is_constructible(model) && accessible_constructors(model).next().is_some()
    }

    fn create(&self, _target: Target<'_>, cx: &StrategyContext<'_>) -> Vec<GeneratedMethod> {
        let mut body = Vec::new();
        for (i, constructor) in cx.accessible_constructors().enumerate() {
            let construction = cx.synthesizer.construct_with(constructor);
            if i == 0 {
                body.push(Stmt::local(INSTANCE, construction));
            } else {
                body.push(Stmt::assign(Expr::ident(INSTANCE), construction));
            }
            body.push(cx.assertions.not_null(Expr::ident(INSTANCE)).into());
        }

        let name = cx.policy.can_construct.render(cx.naming());
        let should_generate = cx.type_level_flag(cx.accessible_constructors());
        vec![GeneratedMethod::new(name, CAN_CONSTRUCT.id, body, should_generate)]
    }
}

/// A constructor parameter name and the constructors that declare it.
struct ParameterGroup<'m> {
    name: String,
    uses: Vec<(&'m ConstructorModel, usize)>,
    nullable_everywhere: bool,
}

/// Groups the parameters selected by `select` by name, ignoring case, in
/// order of first appearance.
fn group_parameters<'m>(
    model: &'m TypeModel,
    select: impl Fn(&ParameterModel) -> bool,
) -> Vec<ParameterGroup<'m>> {
    let mut groups: Vec<ParameterGroup<'m>> = Vec::new();
    for constructor in accessible_constructors(model) {
        for (position, parameter) in constructor.parameters.iter().enumerate() {
            if !select(parameter) {
                continue;
            }
            match groups
                .iter_mut()
                .find(|g| g.name.eq_ignore_ascii_case(&parameter.name))
            {
                Some(group) => {
                    group.uses.push((constructor, position));
                    group.nullable_everywhere &= parameter.is_nullable();
                }
                None => groups.push(ParameterGroup {
                    name: parameter.name.clone(),
                    uses: vec![(constructor, position)],
                    nullable_everywhere: parameter.is_nullable(),
                }),
            }
        }
    }
    groups
}

fn throws_for_each_use(
    cx: &StrategyContext<'_>,
    group: &ParameterGroup<'_>,
    exception: &str,
    value: &Expr,
) -> Vec<Stmt> {
    group
        .uses
        .iter()
        .map(|&(constructor, position)| {
            let declared = &constructor.parameters[position].name;
            let construction = cx.synthesizer.construct_replacing(constructor, position, value);
            cx.assertions
                .throws_for_parameter(exception, declared, construction)
                .into()
        })
        .collect()
}

/// Passes `null` for every non-nullable reference parameter other than
/// strings and expects `ArgumentNullException`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullParameterCheck;

fn is_null_checked(parameter: &ParameterModel) -> bool {
    parameter.type_ref.is_reference() && !parameter.is_string() && !parameter.is_nullable()
}

impl GenerationStrategy for NullParameterCheck {
    fn info(&self) -> &'static StrategyInfo {
        &NULL_PARAMETER_CHECK
    }

    fn can_handle(&self, _target: Target<'_>, model: &TypeModel) -> bool {
        is_constructible(model)
            && accessible_constructors(model)
                .flat_map(|c| &c.parameters)
                .any(is_null_checked)
    }

    fn create(&self, _target: Target<'_>, cx: &StrategyContext<'_>) -> Vec<GeneratedMethod> {
        group_parameters(cx.model, is_null_checked)
            .into_iter()
            .map(|group| {
                let body = group
                    .uses
                    .iter()
                    .map(|&(constructor, position)| {
                        let parameter = &constructor.parameters[position];
                        let construction = cx.synthesizer.construct_replacing(
                            constructor,
                            position,
                            &Expr::Default(parameter.type_ref.clone()),
                        );
                        cx.assertions
                            .throws_for_parameter(ARGUMENT_NULL_EXCEPTION, &parameter.name, construction)
                            .into()
                    })
                    .collect();
                let name = cx
                    .policy
                    .cannot_construct_with_null
                    .render(&cx.naming().with_parameter_name(&group.name));
                let should_generate = cx.type_level_flag(group.uses.iter().map(|(c, _)| *c));
                GeneratedMethod::new(name, NULL_PARAMETER_CHECK.id, body, should_generate)
            })
            .collect()
    }
}

/// An invalid string argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InvalidString {
    Null,
    Empty,
    WhiteSpace,
}

impl InvalidString {
    const ALL: [Self; 3] = [Self::Null, Self::Empty, Self::WhiteSpace];

    /// Label substituted for `{invalidValue}`.
    const fn label(self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Empty => "Empty",
            Self::WhiteSpace => "WhiteSpace",
        }
    }

    fn value(self) -> Expr {
        match self {
            Self::Null => Expr::Default(TypeRef::string()),
            Self::Empty => Expr::string(""),
            Self::WhiteSpace => Expr::string("   "),
        }
    }

    const fn exception(self) -> &'static str {
        match self {
            Self::Null => ARGUMENT_NULL_EXCEPTION,
            Self::Empty | Self::WhiteSpace => ARGUMENT_EXCEPTION,
        }
    }
}

/// Passes null, empty and whitespace strings for every string constructor
/// parameter and expects the constructor to reject them.
///
/// A parameter that every declaring constructor marks nullable is only
/// checked with the empty and whitespace values. Abstract types and
/// inaccessible constructors are left out, since a test cannot call them.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringParameterCheck;

impl GenerationStrategy for StringParameterCheck {
    fn info(&self) -> &'static StrategyInfo {
        &STRING_PARAMETER_CHECK
    }

    fn can_handle(&self, _target: Target<'_>, model: &TypeModel) -> bool {
        is_constructible(model)
            && !model.flags().is_record
            && accessible_constructors(model)
                .flat_map(|c| &c.parameters)
                .any(ParameterModel::is_string)
    }

    fn create(&self, _target: Target<'_>, cx: &StrategyContext<'_>) -> Vec<GeneratedMethod> {
        let mut methods = Vec::new();
        for group in group_parameters(cx.model, ParameterModel::is_string) {
            let should_generate = cx.type_level_flag(group.uses.iter().map(|(c, _)| *c));
            let parameter_context = cx.naming().with_parameter_name(&group.name);
            for invalid in InvalidString::ALL {
                if invalid == InvalidString::Null && group.nullable_everywhere {
                    continue;
                }
                let body = throws_for_each_use(cx, &group, invalid.exception(), &invalid.value());
                let name = cx
                    .policy
                    .cannot_construct_with_invalid
                    .render(&parameter_context.with_invalid_value(invalid.label()));
                methods.push(GeneratedMethod::new(
                    name,
                    STRING_PARAMETER_CHECK.id,
                    body,
                    should_generate,
                ));
            }
        }
        methods
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::test_support::{Fixture, render};
    use sg_core::{ItemSelector, MemberId, TypeFlags, TypeModelBuilder};

    fn text(name: &str) -> ParameterModel {
        ParameterModel::new(name, TypeRef::string())
    }

    fn int(name: &str) -> ParameterModel {
        ParameterModel::new(name, TypeRef::value("Int32"))
    }

    fn foo(parameters: Vec<ParameterModel>) -> TypeModel {
        TypeModelBuilder::new("Foo")
            .constructor(ConstructorModel::new(parameters))
            .build()
            .unwrap()
    }

    #[test]
    fn test_can_construct_every_constructor() {
        let model = TypeModelBuilder::new("Foo")
            .constructor(ConstructorModel::new([]))
            .constructor(ConstructorModel::new([int("a")]))
            .constructor(ConstructorModel::new([int("b")]).inaccessible())
            .build()
            .unwrap();
        let fixture = Fixture::new();
        let methods = CanConstruct.create(Target::Type, &fixture.context(&model));
        assert_eq!(
            render(&methods),
            [
                "CanConstruct: var instance = new Foo(); Assert.NotNull(instance); \
                 instance = new Foo(_a); Assert.NotNull(instance);"
            ]
        );
    }

    #[test]
    fn test_can_construct_skips_static_and_abstract_types() {
        for flags in [
            TypeFlags { is_static: true, ..TypeFlags::default() },
            TypeFlags { is_abstract: true, ..TypeFlags::default() },
        ] {
            let model = TypeModelBuilder::new("Foo")
                .flags(flags)
                .constructor(ConstructorModel::new([]))
                .build()
                .unwrap();
            assert!(!CanConstruct.can_handle(Target::Type, &model));
        }
        let no_constructors = TypeModelBuilder::new("Foo").build().unwrap();
        assert!(!CanConstruct.can_handle(Target::Type, &no_constructors));
    }

    #[test]
    fn test_non_nullable_string_gets_three_methods() {
        let model = foo(vec![text("name")]);
        let fixture = Fixture::new();
        assert!(StringParameterCheck.can_handle(Target::Type, &model));

        let methods = StringParameterCheck.create(Target::Type, &fixture.context(&model));
        assert_eq!(
            render(&methods),
            [
                "CannotConstructWithNullName: \
                 Assert.Throws<ArgumentNullException>(\"name\", () => new Foo(default(String)));",
                "CannotConstructWithEmptyName: \
                 Assert.Throws<ArgumentException>(\"name\", () => new Foo(\"\"));",
                "CannotConstructWithWhiteSpaceName: \
                 Assert.Throws<ArgumentException>(\"name\", () => new Foo(\"   \"));",
            ]
        );
    }

    #[test]
    fn test_nullable_string_skips_null() {
        let fixture = Fixture::new();
        for parameter in [
            ParameterModel::new("name", TypeRef::string().nullable()),
            text("name").with_null_default(),
        ] {
            let model = foo(vec![parameter]);
            let methods = StringParameterCheck.create(Target::Type, &fixture.context(&model));
            let names: Vec<_> = methods.iter().map(|m| m.name.as_str()).collect();
            assert_eq!(names, ["CannotConstructWithEmptyName", "CannotConstructWithWhiteSpaceName"]);
        }
    }

    #[test]
    fn test_string_name_nullable_in_only_some_constructors() {
        let model = TypeModelBuilder::new("Foo")
            .constructor(ConstructorModel::new([text("name").with_null_default()]))
            .constructor(ConstructorModel::new([text("Name"), int("count")]))
            .build()
            .unwrap();
        let fixture = Fixture::new();
        let methods = StringParameterCheck.create(Target::Type, &fixture.context(&model));
        assert_eq!(methods.len(), 3);
        assert_eq!(
            render(&methods[1..2]),
            [
                "CannotConstructWithEmptyName: \
                 Assert.Throws<ArgumentException>(\"name\", () => new Foo(\"\")); \
                 Assert.Throws<ArgumentException>(\"Name\", () => new Foo(\"\", _count));"
            ]
        );
    }

    #[test]
    fn test_string_check_skips_records() {
        let model = TypeModelBuilder::new("Point")
            .flags(TypeFlags {
                is_record: true,
                is_public: true,
                ..TypeFlags::default()
            })
            .constructor(ConstructorModel::new([text("name")]))
            .build()
            .unwrap();
        assert!(!StringParameterCheck.can_handle(Target::Type, &model));
        assert!(!StringParameterCheck.can_handle(Target::Type, &foo(vec![int("a")])));
    }

    #[test]
    fn test_string_check_needs_a_callable_constructor() {
        let abstract_type = TypeModelBuilder::new("Foo")
            .flags(TypeFlags { is_abstract: true, is_public: true, ..TypeFlags::default() })
            .constructor(ConstructorModel::new([text("name")]))
            .build()
            .unwrap();
        assert!(!StringParameterCheck.can_handle(Target::Type, &abstract_type));

        let private_only = TypeModelBuilder::new("Foo")
            .constructor(ConstructorModel::new([text("name")]).inaccessible())
            .constructor(ConstructorModel::new([int("count")]))
            .build()
            .unwrap();
        assert!(!StringParameterCheck.can_handle(Target::Type, &private_only));
    }

    #[test]
    fn test_null_check_wires_other_arguments() {
        let model = foo(vec![
            ParameterModel::new("logger", TypeRef::interface("ILogger")),
            ParameterModel::new("options", TypeRef::class("Options")),
            ParameterModel::new("fallback", TypeRef::class("Options").nullable()),
            text("name"),
            int("count"),
        ]);
        let fixture = Fixture::new();
        assert!(NullParameterCheck.can_handle(Target::Type, &model));

        let methods = NullParameterCheck.create(Target::Type, &fixture.context(&model));
        assert_eq!(
            render(&methods),
            [
                "CannotConstructWithNullLogger: \
                 Assert.Throws<ArgumentNullException>(\"logger\", \
                 () => new Foo(default(ILogger), _options, _fallback, _name, _count));",
                "CannotConstructWithNullOptions: \
                 Assert.Throws<ArgumentNullException>(\"options\", \
                 () => new Foo(_logger.Object, default(Options), _fallback, _name, _count));",
            ]
        );
    }

    #[test]
    fn test_single_item_constructor_flags() {
        let mut model = TypeModelBuilder::new("Foo")
            .constructor(ConstructorModel::new([text("a")]))
            .constructor(ConstructorModel::new([text("b")]))
            .build()
            .unwrap();
        model
            .select_single_item(ItemSelector::Constructor(MemberId::new(1)))
            .unwrap();
        let fixture = Fixture::new();
        let methods = StringParameterCheck.create(Target::Type, &fixture.context(&model));
        let flags: Vec<_> = methods.iter().map(|m| (m.name.as_str(), m.should_generate)).collect();
        assert_eq!(
            flags,
            [
                ("CannotConstructWithNullA", false),
                ("CannotConstructWithEmptyA", false),
                ("CannotConstructWithWhiteSpaceA", false),
                ("CannotConstructWithNullB", true),
                ("CannotConstructWithEmptyB", true),
                ("CannotConstructWithWhiteSpaceB", true),
            ]
        );
    }
}
