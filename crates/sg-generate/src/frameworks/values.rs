//! Test value generators.

use std::fmt;

use sg_core::{TypeKind, TypeRef};

use crate::syntax::{Expr, Literal};

/// A field the generated test class needs before any value can be produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportField {
    /// Field name.
    pub name: String,
    /// Field type.
    pub type_ref: TypeRef,
    /// Field initializer.
    pub initializer: Expr,
}

/// Produces arbitrary values of a type for generated tests.
pub trait ValueGenerator: fmt::Debug + Send + Sync {
    /// Expression producing a value of `type_ref`.
    fn value_for(&self, type_ref: &TypeRef) -> Expr;

    /// Field the generator relies on, if any.
    fn support_field(&self) -> Option<SupportField> {
        None
    }
}

/// Literal values for well-known types, `default(T)` otherwise.
///
/// Values are fixed per type, so generated output is stable across runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultValueGenerator;

impl ValueGenerator for DefaultValueGenerator {
    fn value_for(&self, type_ref: &TypeRef) -> Expr {
        match type_ref.name.as_str() {
            "String" => Expr::string("TestValue"),
            "Boolean" => Expr::Literal(Literal::Bool(true)),
            "Byte" | "SByte" | "Int16" | "UInt16" | "Int32" | "UInt32" => Expr::number("42"),
            "Int64" => Expr::number("42L"),
            "UInt64" => Expr::number("42UL"),
            "Single" => Expr::number("1.5F"),
            "Double" => Expr::number("1.5"),
            "Decimal" => Expr::number("1.5M"),
            "Char" => Expr::number("'A'"),
            "Guid" => Expr::call(Expr::ident("Guid"), "NewGuid", []),
            "DateTime" => Expr::member(Expr::ident("DateTime"), "UtcNow"),
            "DateTimeOffset" => Expr::member(Expr::ident("DateTimeOffset"), "UtcNow"),
            "TimeSpan" => Expr::call(Expr::ident("TimeSpan"), "FromSeconds", [Expr::number("1")]),
            _ if type_ref.kind == TypeKind::Class && type_ref.type_arguments.is_empty() => {
                Expr::new_object(type_ref.clone(), [])
            }
            _ => Expr::Default(type_ref.clone()),
        }
    }
}

/// Values created through a shared `AutoFixture` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoFixtureValueGenerator {
    field: String,
}

impl AutoFixtureValueGenerator {
    /// Creates a generator that reads values from the field `field`.
    #[must_use]
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Name of the shared fixture field.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }
}

impl ValueGenerator for AutoFixtureValueGenerator {
    fn value_for(&self, type_ref: &TypeRef) -> Expr {
        Expr::generic_call(Expr::ident(&self.field), "Create", [type_ref.clone()], [])
    }

    fn support_field(&self) -> Option<SupportField> {
        Some(SupportField {
            name: self.field.clone(),
            type_ref: TypeRef::interface("IFixture"),
            initializer: Expr::new_object(TypeRef::class("Fixture"), []),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let values = DefaultValueGenerator;
        assert_eq!(values.value_for(&TypeRef::string()).to_string(), "\"TestValue\"");
        assert_eq!(values.value_for(&TypeRef::value("Int32")).to_string(), "42");
        assert_eq!(values.value_for(&TypeRef::value("Boolean")).to_string(), "true");
        assert_eq!(
            values.value_for(&TypeRef::value("Point")).to_string(),
            "default(Point)"
        );
        assert_eq!(
            values.value_for(&TypeRef::class("Options")).to_string(),
            "new Options()"
        );
        assert!(values.support_field().is_none());
    }

    #[test]
    fn test_default_values_are_stable() {
        let values = DefaultValueGenerator;
        let guid = TypeRef::value("Guid");
        assert_eq!(values.value_for(&guid), values.value_for(&guid));
    }

    #[test]
    fn test_auto_fixture_values() {
        let values = AutoFixtureValueGenerator::new("_fixture");
        assert_eq!(
            values.value_for(&TypeRef::value("Int32")).to_string(),
            "_fixture.Create<Int32>()"
        );
        let field = values.support_field().unwrap();
        assert_eq!(field.name, "_fixture");
        assert_eq!(field.initializer.to_string(), "new Fixture()");
    }
}
