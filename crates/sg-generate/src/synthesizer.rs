//! Construction of the system under test.
//!
//! [`ObjectSynthesizer`] decides how generated code obtains an instance of
//! the type under test and what each constructor argument is. Rules, first
//! match wins:
//!
//! 1. In test-class setup, a type the mocking framework substitutes
//!    (abstract types) is created through the framework.
//! 2. The target constructor is the explicit default constructor, or else
//!    the accessible constructor with the most parameters (first declared
//!    wins ties).
//! 3. A target constructor with parameters yields `new T(args)`.
//! 4. Without a target constructor, settable or init-only properties yield
//!    `new T { P = field, ... }`.
//! 5. A parameterless target constructor, or no declared constructors,
//!    yields `new T()`.
//! 6. Otherwise the value generator supplies a value of the type.

use sg_core::{
    ConstructorModel, FxHashSet, GenerationOptions, NamingContext, ParameterModel, PropertyModel,
    TypeModel, TypeRef,
};

use crate::descriptor::FieldDescriptor;
use crate::frameworks::{MockingFramework, ValueGenerator};
use crate::naming::{NamingPolicy, property_field_name, resolve_field_name};
use crate::syntax::Expr;

/// Builds construction expressions and constructor arguments for one type.
#[derive(Debug, Clone)]
pub struct ObjectSynthesizer<'a> {
    model: &'a TypeModel,
    options: &'a GenerationOptions,
    policy: &'a NamingPolicy,
    mocking: &'a dyn MockingFramework,
    values: &'a dyn ValueGenerator,
    context: NamingContext,
}

impl<'a> ObjectSynthesizer<'a> {
    /// Creates a synthesizer for `model`.
    #[must_use]
    pub fn new(
        model: &'a TypeModel,
        options: &'a GenerationOptions,
        policy: &'a NamingPolicy,
        mocking: &'a dyn MockingFramework,
        values: &'a dyn ValueGenerator,
    ) -> Self {
        Self {
            context: NamingContext::new(model.class_name()),
            model,
            options,
            policy,
            mocking,
            values,
        }
    }

    /// The naming context of the owning type.
    #[inline]
    #[must_use]
    pub const fn context(&self) -> &NamingContext {
        &self.context
    }

    /// Returns `true` if values of `type_ref` are supplied through a mock.
    #[inline]
    #[must_use]
    pub fn is_mocked(&self, type_ref: &TypeRef) -> bool {
        self.options.is_mock_substituted(type_ref)
    }

    /// Name of the test-class field that supplies `parameter`.
    #[must_use]
    pub fn field_name(&self, parameter: &ParameterModel) -> String {
        resolve_field_name(parameter, self.model, &self.context, self.policy, self.options)
    }

    /// Best-effort argument for `parameter`: the field supplying it,
    /// unwrapped through the mocking framework when the parameter is mocked.
    #[must_use]
    pub fn argument_for(&self, parameter: &ParameterModel) -> Expr {
        let field = Expr::ident(self.field_name(parameter));
        if self.is_mocked(&parameter.type_ref) {
            self.mocking.mock_object(field)
        } else {
            field
        }
    }

    /// A fresh value of `type_ref` that does not depend on test-class fields.
    #[must_use]
    pub fn fresh_value(&self, type_ref: &TypeRef) -> Expr {
        if self.is_mocked(type_ref) {
            self.mocking.mock_object(self.mocking.mock_field_init(type_ref))
        } else {
            self.values.value_for(type_ref)
        }
    }

    /// The constructor generated code uses to build the type.
    #[must_use]
    pub fn target_constructor(&self) -> Option<&'a ConstructorModel> {
        if let Some(constructor) = self.model.default_constructor() {
            return Some(constructor);
        }
        self.model
            .constructors()
            .iter()
            .filter(|c| c.is_accessible)
            .fold(None, |best: Option<&ConstructorModel>, candidate| match best {
                Some(best) if best.parameters.len() >= candidate.parameters.len() => Some(best),
                _ => Some(candidate),
            })
    }

    /// Properties that can be assigned in an object initializer.
    pub fn initializer_properties(&self) -> impl Iterator<Item = &'a PropertyModel> + 'a {
        self.model
            .properties()
            .iter()
            .filter(|p| p.supports_initializer())
    }

    /// `new T(args)` through `constructor`, using [`argument_for`](Self::argument_for)
    /// for every parameter.
    #[must_use]
    pub fn construct_with(&self, constructor: &ConstructorModel) -> Expr {
        Expr::new_object(
            self.model.type_ref().clone(),
            constructor.parameters.iter().map(|p| self.argument_for(p)),
        )
    }

    /// `new T(args)` through `constructor` with `value` in place of the
    /// argument at `position`.
    #[must_use]
    pub fn construct_replacing(
        &self,
        constructor: &ConstructorModel,
        position: usize,
        value: &Expr,
    ) -> Expr {
        Expr::new_object(
            self.model.type_ref().clone(),
            constructor.parameters.iter().enumerate().map(|(i, p)| {
                if i == position {
                    value.clone()
                } else {
                    self.argument_for(p)
                }
            }),
        )
    }

    /// Expression that constructs the system under test.
    ///
    /// `for_setup` is `true` when the expression initializes the test-class
    /// field, which is the only place a mocked substitute is used.
    #[must_use]
    pub fn synthesize_construction(&self, for_setup: bool) -> Expr {
        let target = self.target_constructor();

        if for_setup && self.mocking.can_substitute(self.model) {
            let arguments = target
                .map(|c| c.parameters.iter().map(|p| self.argument_for(p)).collect())
                .unwrap_or_default();
            return self.mocking.substitute(self.model.type_ref(), arguments);
        }

        match target {
            Some(constructor) if !constructor.parameters.is_empty() => {
                self.construct_with(constructor)
            }
            None if self.initializer_properties().next().is_some() => {
                Expr::new_with_initializers(
                    self.model.type_ref().clone(),
                    self.initializer_properties().map(|p| {
                        let field = property_field_name(p, &self.context, self.policy, self.options);
                        let value = Expr::ident(field);
                        let value = if self.is_mocked(&p.type_ref) {
                            self.mocking.mock_object(value)
                        } else {
                            value
                        };
                        (p.name.clone(), value)
                    }),
                )
            }
            Some(_) => Expr::new_object(self.model.type_ref().clone(), []),
            None if self.model.constructors().is_empty() => {
                Expr::new_object(self.model.type_ref().clone(), [])
            }
            None => self.values.value_for(self.model.type_ref()),
        }
    }

    /// Test-class fields that supply constructor arguments and initializer
    /// properties, without duplicates, in declaration order.
    #[must_use]
    pub fn dependency_fields(&self) -> Vec<FieldDescriptor> {
        let mut seen = FxHashSet::default();
        let mut fields = Vec::new();

        let parameters = self
            .model
            .constructors()
            .iter()
            .filter(|c| c.is_accessible)
            .flat_map(|c| &c.parameters)
            .map(|p| (self.field_name(p), &p.type_ref));
        let properties = self
            .target_constructor()
            .is_none()
            .then(|| {
                self.initializer_properties().map(|p| {
                    (
                        property_field_name(p, &self.context, self.policy, self.options),
                        &p.type_ref,
                    )
                })
            })
            .into_iter()
            .flatten();

        for (name, type_ref) in parameters.chain(properties) {
            if !seen.insert(name.clone()) {
                continue;
            }
            let (field_type, initializer) = if self.is_mocked(type_ref) {
                (
                    self.mocking.mock_field_type(type_ref),
                    self.mocking.mock_field_init(type_ref),
                )
            } else {
                (type_ref.clone(), self.values.value_for(type_ref))
            };
            fields.push(FieldDescriptor {
                name,
                type_ref: field_type,
                initializer,
            });
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frameworks::{DefaultValueGenerator, Moq, NSubstitute};
    use sg_core::{MemberId, NamingOptions, TypeFlags, TypeModelBuilder};

    fn render(model: &TypeModel, for_setup: bool) -> String {
        let options = GenerationOptions::default();
        let policy = NamingPolicy::from_options(&NamingOptions::default()).unwrap();
        ObjectSynthesizer::new(model, &options, &policy, &Moq, &DefaultValueGenerator)
            .synthesize_construction(for_setup)
            .to_string()
    }

    fn int(name: &str) -> ParameterModel {
        ParameterModel::new(name, TypeRef::value("Int32"))
    }

    #[test]
    fn test_most_parameters_wins() {
        let model = TypeModelBuilder::new("Foo")
            .constructor(ConstructorModel::new([]))
            .constructor(ConstructorModel::new([int("a"), int("b")]))
            .build()
            .unwrap();
        assert_eq!(render(&model, false), "new Foo(_a, _b)");
    }

    #[test]
    fn test_first_declared_wins_ties() {
        let model = TypeModelBuilder::new("Foo")
            .constructor(ConstructorModel::new([int("a")]))
            .constructor(ConstructorModel::new([int("b")]))
            .build()
            .unwrap();
        assert_eq!(render(&model, false), "new Foo(_a)");
    }

    #[test]
    fn test_explicit_default_constructor_wins() {
        let model = TypeModelBuilder::new("Foo")
            .constructor(ConstructorModel::new([int("a")]))
            .constructor(ConstructorModel::new([int("a"), int("b")]))
            .default_constructor(MemberId::new(0))
            .build()
            .unwrap();
        assert_eq!(render(&model, false), "new Foo(_a)");
    }

    #[test]
    fn test_mocked_arguments_are_unwrapped() {
        let model = TypeModelBuilder::new("Service")
            .constructor(ConstructorModel::new([
                ParameterModel::new("logger", TypeRef::interface("ILogger")),
                ParameterModel::new("name", TypeRef::string()),
            ]))
            .build()
            .unwrap();
        assert_eq!(render(&model, false), "new Service(_logger.Object, _name)");
    }

    #[test]
    fn test_initializer_when_no_usable_constructor() {
        let model = TypeModelBuilder::new("Options")
            .property(PropertyModel::new("Name", TypeRef::string()).with_init())
            .property(PropertyModel::new("Id", TypeRef::value("Int32")))
            .property(PropertyModel::new("Size", TypeRef::value("Int32")).with_setter())
            .build()
            .unwrap();
        assert_eq!(render(&model, false), "new Options { Name = _name, Size = _size }");
    }

    #[test]
    fn test_parameterless_and_missing_constructors() {
        let parameterless = TypeModelBuilder::new("Foo")
            .constructor(ConstructorModel::new([]))
            .property(PropertyModel::new("Name", TypeRef::string()).with_setter())
            .build()
            .unwrap();
        assert_eq!(render(&parameterless, false), "new Foo()");

        let implicit = TypeModelBuilder::new("Bar").build().unwrap();
        assert_eq!(render(&implicit, false), "new Bar()");
    }

    #[test]
    fn test_only_inaccessible_constructors_fall_back_to_value() {
        let model = TypeModelBuilder::new("Singleton")
            .constructor(ConstructorModel::new([]).inaccessible())
            .build()
            .unwrap();
        assert_eq!(render(&model, false), "new Singleton()");

        let value_type = TypeModelBuilder::new("Point")
            .type_ref(TypeRef::value("Point"))
            .constructor(ConstructorModel::new([int("x")]).inaccessible())
            .build()
            .unwrap();
        assert_eq!(render(&value_type, false), "default(Point)");
    }

    #[test]
    fn test_abstract_types_are_substituted_in_setup_only() {
        let model = TypeModelBuilder::new("Base")
            .flags(TypeFlags {
                is_abstract: true,
                is_public: true,
                ..TypeFlags::default()
            })
            .constructor(ConstructorModel::new([int("a")]))
            .build()
            .unwrap();
        assert_eq!(render(&model, true), "new Mock<Base>(_a).Object");
        assert_eq!(render(&model, false), "new Base(_a)");
    }

    #[test]
    fn test_dependency_fields_are_deduplicated() {
        let model = TypeModelBuilder::new("Service")
            .constructor(ConstructorModel::new([ParameterModel::new(
                "logger",
                TypeRef::interface("ILogger"),
            )]))
            .constructor(ConstructorModel::new([
                ParameterModel::new("logger", TypeRef::interface("ILogger")),
                ParameterModel::new("name", TypeRef::string()),
            ]))
            .build()
            .unwrap();
        let options = GenerationOptions::default();
        let policy = NamingPolicy::from_options(&NamingOptions::default()).unwrap();
        let synthesizer =
            ObjectSynthesizer::new(&model, &options, &policy, &NSubstitute, &DefaultValueGenerator);

        let fields: Vec<String> = synthesizer
            .dependency_fields()
            .iter()
            .map(|f| format!("{} {} = {}", f.type_ref, f.name, f.initializer))
            .collect();
        assert_eq!(
            fields,
            [
                "ILogger _logger = Substitute.For<ILogger>()",
                "String _name = \"TestValue\"",
            ]
        );
    }

    #[test]
    fn test_construct_replacing() {
        let model = TypeModelBuilder::new("Foo")
            .constructor(ConstructorModel::new([int("a"), ParameterModel::new("name", TypeRef::string())]))
            .build()
            .unwrap();
        let options = GenerationOptions::default();
        let policy = NamingPolicy::from_options(&NamingOptions::default()).unwrap();
        let synthesizer = ObjectSynthesizer::new(&model, &options, &policy, &Moq, &DefaultValueGenerator);
        let expr = synthesizer.construct_replacing(&model.constructors()[0], 1, &Expr::string(""));
        assert_eq!(expr.to_string(), "new Foo(_a, \"\")");
    }
}
