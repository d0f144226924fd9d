//! Assertion framework templates.

use std::fmt;

use sg_core::{TestFrameworkKind, TypeRef};

use crate::syntax::Expr;

/// Message used when a generated test needs to be completed by hand.
pub const INCONCLUSIVE_MESSAGE: &str = "Create or modify test";

/// Assertion expressions contributed by a test framework.
pub trait AssertionFramework: fmt::Debug + Send + Sync {
    /// Framework name, for diagnostics.
    fn name(&self) -> &'static str;

    /// Asserts that evaluating `action` throws `exception` naming `parameter`.
    fn throws_for_parameter(&self, exception: &str, parameter: &str, action: Expr) -> Expr;

    /// Asserts that `value` is not `null`.
    fn not_null(&self, value: Expr) -> Expr;

    /// Asserts that `actual` equals `expected`.
    fn equal(&self, expected: Expr, actual: Expr) -> Expr;

    /// Asserts that `actual` is the same instance as `expected`.
    fn same(&self, expected: Expr, actual: Expr) -> Expr;

    /// Asserts that `value` is of type `type_ref`.
    fn is_type(&self, type_ref: &TypeRef, value: Expr) -> Expr;

    /// Fails the test with `message`.
    fn fail(&self, message: &str) -> Expr;
}

fn assert() -> Expr {
    Expr::ident("Assert")
}

/// xUnit assertions.
#[derive(Debug, Clone, Copy, Default)]
pub struct XUnit;

impl AssertionFramework for XUnit {
    fn name(&self) -> &'static str {
        "xUnit"
    }

    fn throws_for_parameter(&self, exception: &str, parameter: &str, action: Expr) -> Expr {
        Expr::generic_call(
            assert(),
            "Throws",
            [TypeRef::class(exception)],
            [Expr::string(parameter), Expr::lambda(action)],
        )
    }

    fn not_null(&self, value: Expr) -> Expr {
        Expr::call(assert(), "NotNull", [value])
    }

    fn equal(&self, expected: Expr, actual: Expr) -> Expr {
        Expr::call(assert(), "Equal", [expected, actual])
    }

    fn same(&self, expected: Expr, actual: Expr) -> Expr {
        Expr::call(assert(), "Same", [expected, actual])
    }

    fn is_type(&self, type_ref: &TypeRef, value: Expr) -> Expr {
        Expr::generic_call(assert(), "IsType", [type_ref.clone()], [value])
    }

    fn fail(&self, message: &str) -> Expr {
        Expr::call(assert(), "Fail", [Expr::string(message)])
    }
}

/// NUnit constraint-model assertions.
#[derive(Debug, Clone, Copy, Default)]
pub struct NUnit;

fn assert_that(actual: Expr, constraint: Expr) -> Expr {
    Expr::call(assert(), "That", [actual, constraint])
}

fn is(constraint: &str, arguments: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::call(Expr::ident("Is"), constraint, arguments)
}

impl AssertionFramework for NUnit {
    fn name(&self) -> &'static str {
        "NUnit"
    }

    fn throws_for_parameter(&self, exception: &str, parameter: &str, action: Expr) -> Expr {
        let thrown = Expr::generic_call(
            assert(),
            "Throws",
            [TypeRef::class(exception)],
            [Expr::lambda(action)],
        );
        assert_that(
            Expr::member(thrown, "ParamName"),
            is("EqualTo", [Expr::string(parameter)]),
        )
    }

    fn not_null(&self, value: Expr) -> Expr {
        assert_that(value, Expr::member(Expr::member(Expr::ident("Is"), "Not"), "Null"))
    }

    fn equal(&self, expected: Expr, actual: Expr) -> Expr {
        assert_that(actual, is("EqualTo", [expected]))
    }

    fn same(&self, expected: Expr, actual: Expr) -> Expr {
        assert_that(actual, is("SameAs", [expected]))
    }

    fn is_type(&self, type_ref: &TypeRef, value: Expr) -> Expr {
        assert_that(
            value,
            Expr::generic_call(Expr::ident("Is"), "InstanceOf", [type_ref.clone()], []),
        )
    }

    fn fail(&self, message: &str) -> Expr {
        Expr::call(assert(), "Fail", [Expr::string(message)])
    }
}

/// Returns the built-in framework for `kind`.
#[must_use]
pub fn assertion_framework(kind: TestFrameworkKind) -> Box<dyn AssertionFramework> {
    match kind {
        TestFrameworkKind::XUnit => Box::new(XUnit),
        TestFrameworkKind::NUnit => Box::new(NUnit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    fn construction() -> Expr {
        Expr::new_object(TypeRef::class("Foo"), [Expr::null()])
    }

    #[test]
    fn test_xunit_throws_names_parameter() {
        assert_snapshot!(
            XUnit.throws_for_parameter("ArgumentNullException", "name", construction()).to_string(),
            @r#"Assert.Throws<ArgumentNullException>("name", () => new Foo(null))"#
        );
    }

    #[test]
    fn test_nunit_throws_names_parameter() {
        assert_snapshot!(
            NUnit.throws_for_parameter("ArgumentException", "name", construction()).to_string(),
            @r#"Assert.That(Assert.Throws<ArgumentException>(() => new Foo(null)).ParamName, Is.EqualTo("name"))"#
        );
    }

    #[test]
    fn test_equality_argument_order() {
        let xunit = XUnit.equal(Expr::ident("expected"), Expr::ident("actual"));
        let nunit = NUnit.equal(Expr::ident("expected"), Expr::ident("actual"));
        assert_eq!(xunit.to_string(), "Assert.Equal(expected, actual)");
        assert_eq!(nunit.to_string(), "Assert.That(actual, Is.EqualTo(expected))");
    }

    #[test]
    fn test_type_and_null_checks() {
        let value = || Expr::ident("value");
        assert_eq!(
            XUnit.is_type(&TypeRef::string(), value()).to_string(),
            "Assert.IsType<String>(value)"
        );
        assert_eq!(
            NUnit.is_type(&TypeRef::string(), value()).to_string(),
            "Assert.That(value, Is.InstanceOf<String>())"
        );
        assert_eq!(NUnit.not_null(value()).to_string(), "Assert.That(value, Is.Not.Null)");
        assert_eq!(
            XUnit.fail(INCONCLUSIVE_MESSAGE).to_string(),
            "Assert.Fail(\"Create or modify test\")"
        );
        assert_eq!(assertion_framework(TestFrameworkKind::NUnit).name(), "NUnit");
    }
}
