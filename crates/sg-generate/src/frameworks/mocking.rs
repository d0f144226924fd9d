//! Mocking framework templates.

use std::fmt;

use sg_core::{MockingFrameworkKind, TypeModel, TypeRef};

use crate::syntax::Expr;

/// Expressions a mocking framework contributes to generated tests.
pub trait MockingFramework: fmt::Debug + Send + Sync {
    /// Framework name, for diagnostics.
    fn name(&self) -> &'static str;

    /// Type of the field that holds a mock of `type_ref`.
    fn mock_field_type(&self, type_ref: &TypeRef) -> TypeRef;

    /// Expression that creates a mock of `type_ref`.
    fn mock_field_init(&self, type_ref: &TypeRef) -> Expr;

    /// Expression that passes the mock held in `field` where the mocked
    /// type is expected.
    fn mock_object(&self, field: Expr) -> Expr;

    /// Expression that creates a substitute of the system under test itself,
    /// forwarding `arguments` to its constructor.
    fn substitute(&self, type_ref: &TypeRef, arguments: Vec<Expr>) -> Expr;

    /// Returns `true` if the system under test is built through
    /// [`substitute`](Self::substitute) instead of a constructor call.
    fn can_substitute(&self, model: &TypeModel) -> bool {
        let flags = model.flags();
        flags.is_abstract && !flags.is_static
    }
}

/// Moq: `new Mock<T>()` fields, passed as `field.Object`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Moq;

fn mock_of(type_ref: &TypeRef) -> TypeRef {
    TypeRef::class("Mock").with_arguments([type_ref.clone()])
}

impl MockingFramework for Moq {
    fn name(&self) -> &'static str {
        "Moq"
    }

    fn mock_field_type(&self, type_ref: &TypeRef) -> TypeRef {
        mock_of(type_ref)
    }

    fn mock_field_init(&self, type_ref: &TypeRef) -> Expr {
        Expr::new_object(mock_of(type_ref), [])
    }

    fn mock_object(&self, field: Expr) -> Expr {
        Expr::member(field, "Object")
    }

    fn substitute(&self, type_ref: &TypeRef, arguments: Vec<Expr>) -> Expr {
        Expr::member(Expr::new_object(mock_of(type_ref), arguments), "Object")
    }
}

/// NSubstitute: `Substitute.For<T>()` fields, passed directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct NSubstitute;

impl MockingFramework for NSubstitute {
    fn name(&self) -> &'static str {
        "NSubstitute"
    }

    fn mock_field_type(&self, type_ref: &TypeRef) -> TypeRef {
        type_ref.clone()
    }

    fn mock_field_init(&self, type_ref: &TypeRef) -> Expr {
        Expr::generic_call(Expr::ident("Substitute"), "For", [type_ref.clone()], [])
    }

    fn mock_object(&self, field: Expr) -> Expr {
        field
    }

    fn substitute(&self, type_ref: &TypeRef, arguments: Vec<Expr>) -> Expr {
        Expr::generic_call(
            Expr::ident("Substitute"),
            "ForPartsOf",
            [type_ref.clone()],
            arguments,
        )
    }
}

/// Returns the built-in framework for `kind`.
#[must_use]
pub fn mocking_framework(kind: MockingFrameworkKind) -> Box<dyn MockingFramework> {
    match kind {
        MockingFrameworkKind::Moq => Box::new(Moq),
        MockingFrameworkKind::NSubstitute => Box::new(NSubstitute),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sg_core::{TypeFlags, TypeModelBuilder};

    #[test]
    fn test_moq_expressions() {
        let logger = TypeRef::interface("ILogger");
        assert_eq!(Moq.mock_field_type(&logger).to_string(), "Mock<ILogger>");
        assert_eq!(Moq.mock_field_init(&logger).to_string(), "new Mock<ILogger>()");
        assert_eq!(Moq.mock_object(Expr::ident("_logger")).to_string(), "_logger.Object");
        assert_eq!(
            Moq.substitute(&TypeRef::class("Base"), vec![Expr::ident("_a")]).to_string(),
            "new Mock<Base>(_a).Object"
        );
    }

    #[test]
    fn test_nsubstitute_expressions() {
        let logger = TypeRef::interface("ILogger");
        assert_eq!(NSubstitute.mock_field_type(&logger).to_string(), "ILogger");
        assert_eq!(
            NSubstitute.mock_field_init(&logger).to_string(),
            "Substitute.For<ILogger>()"
        );
        assert_eq!(NSubstitute.mock_object(Expr::ident("_logger")).to_string(), "_logger");
        assert_eq!(
            NSubstitute.substitute(&TypeRef::class("Base"), vec![]).to_string(),
            "Substitute.ForPartsOf<Base>()"
        );
    }

    #[test]
    fn test_only_abstract_types_are_substituted() {
        let concrete = TypeModelBuilder::new("Foo").build().unwrap();
        let abstract_type = TypeModelBuilder::new("Base")
            .flags(TypeFlags {
                is_abstract: true,
                is_public: true,
                ..TypeFlags::default()
            })
            .build()
            .unwrap();
        assert!(!Moq.can_substitute(&concrete));
        assert!(Moq.can_substitute(&abstract_type));
        assert_eq!(mocking_framework(MockingFrameworkKind::NSubstitute).name(), "NSubstitute");
    }
}
