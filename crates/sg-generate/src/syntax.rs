//! Language-neutral expression and statement trees for generated test bodies.
//!
//! Strategies and the object synthesizer build [`Expr`] and [`Stmt`] values;
//! the code emitter decides how to print them. [`Display`](fmt::Display)
//! renders a C#-like form used for diagnostics, snapshots and the CLI text
//! output.
//!
//! # Examples
//!
//! ```
//! use sg_core::TypeRef;
//! use sg_generate::syntax::Expr;
//!
//! let construction = Expr::new_object(
//!     TypeRef::class("Greeter"),
//!     [Expr::ident("_name"), Expr::member(Expr::ident("_logger"), "Object")],
//! );
//! assert_eq!(construction.to_string(), "new Greeter(_name, _logger.Object)");
//! ```

use std::fmt;

use serde::Serialize;
use sg_core::TypeRef;

/// A literal value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Literal {
    /// `null`
    Null,
    /// A string literal.
    String(String),
    /// `true` or `false`.
    Bool(bool),
    /// A numeric literal, kept as source text.
    Number(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::String(value) => {
                f.write_str("\"")?;
                for c in value.chars() {
                    match c {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        '\t' => f.write_str("\\t")?,
                        c => write!(f, "{c}")?,
                    }
                }
                f.write_str("\"")
            }
            Self::Bool(value) => write!(f, "{value}"),
            Self::Number(text) => f.write_str(text),
        }
    }
}

/// An expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    /// A local, field, or type name.
    Ident(String),

    /// A literal.
    Literal(Literal),

    /// `target.name`
    Member {
        /// Accessed object.
        target: Box<Expr>,
        /// Member name.
        name: String,
    },

    /// `target.method<T>(args)`, or `method(args)` without a target.
    Call {
        /// Receiver, if any.
        #[serde(skip_serializing_if = "Option::is_none")]
        target: Option<Box<Expr>>,
        /// Method name.
        method: String,
        /// Explicit generic arguments.
        #[serde(skip_serializing_if = "Vec::is_empty")]
        type_arguments: Vec<TypeRef>,
        /// Arguments.
        arguments: Vec<Expr>,
    },

    /// `new T(args) { P = v, ... }`
    New {
        /// Constructed type.
        type_ref: TypeRef,
        /// Constructor arguments.
        arguments: Vec<Expr>,
        /// Object initializer assignments.
        #[serde(skip_serializing_if = "Vec::is_empty")]
        initializers: Vec<(String, Expr)>,
    },

    /// `target[args]`
    Index {
        /// Indexed object.
        target: Box<Expr>,
        /// Index arguments.
        arguments: Vec<Expr>,
    },

    /// A unary (one operand) or binary (two operands) operator application.
    Operator {
        /// Operator token.
        token: String,
        /// Operands.
        operands: Vec<Expr>,
    },

    /// `(params) => body`
    Lambda {
        /// Parameter names.
        parameters: Vec<String>,
        /// Body expression.
        body: Box<Expr>,
    },

    /// `default(T)`
    Default(TypeRef),

    /// `((T)value)`
    Cast {
        /// Target type.
        type_ref: TypeRef,
        /// Converted value.
        value: Box<Expr>,
    },
}

impl Expr {
    /// Creates an identifier.
    #[must_use]
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Ident(name.into())
    }

    /// Creates the `null` literal.
    #[must_use]
    pub const fn null() -> Self {
        Self::Literal(Literal::Null)
    }

    /// Creates a string literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(Literal::String(value.into()))
    }

    /// Creates a numeric literal from its source text.
    #[must_use]
    pub fn number(text: impl Into<String>) -> Self {
        Self::Literal(Literal::Number(text.into()))
    }

    /// Creates a member access.
    #[must_use]
    pub fn member(target: Self, name: impl Into<String>) -> Self {
        Self::Member {
            target: Box::new(target),
            name: name.into(),
        }
    }

    /// Creates a method call on `target`.
    #[must_use]
    pub fn call(
        target: Self,
        method: impl Into<String>,
        arguments: impl IntoIterator<Item = Self>,
    ) -> Self {
        Self::Call {
            target: Some(Box::new(target)),
            method: method.into(),
            type_arguments: Vec::new(),
            arguments: arguments.into_iter().collect(),
        }
    }

    /// Creates a call to a generic method on `target`.
    #[must_use]
    pub fn generic_call(
        target: Self,
        method: impl Into<String>,
        type_arguments: impl IntoIterator<Item = TypeRef>,
        arguments: impl IntoIterator<Item = Self>,
    ) -> Self {
        Self::Call {
            target: Some(Box::new(target)),
            method: method.into(),
            type_arguments: type_arguments.into_iter().collect(),
            arguments: arguments.into_iter().collect(),
        }
    }

    /// Creates a constructor call.
    #[must_use]
    pub fn new_object(type_ref: TypeRef, arguments: impl IntoIterator<Item = Self>) -> Self {
        Self::New {
            type_ref,
            arguments: arguments.into_iter().collect(),
            initializers: Vec::new(),
        }
    }

    /// Creates a parameterless construction with an object initializer.
    #[must_use]
    pub fn new_with_initializers(
        type_ref: TypeRef,
        initializers: impl IntoIterator<Item = (String, Self)>,
    ) -> Self {
        Self::New {
            type_ref,
            arguments: Vec::new(),
            initializers: initializers.into_iter().collect(),
        }
    }

    /// Creates an indexer access.
    #[must_use]
    pub fn index(target: Self, arguments: impl IntoIterator<Item = Self>) -> Self {
        Self::Index {
            target: Box::new(target),
            arguments: arguments.into_iter().collect(),
        }
    }

    /// Creates an operator application.
    #[must_use]
    pub fn operator(token: impl Into<String>, operands: impl IntoIterator<Item = Self>) -> Self {
        Self::Operator {
            token: token.into(),
            operands: operands.into_iter().collect(),
        }
    }

    /// Creates a parameterless lambda.
    #[must_use]
    pub fn lambda(body: Self) -> Self {
        Self::Lambda {
            parameters: Vec::new(),
            body: Box::new(body),
        }
    }

    /// Creates a lambda with the given parameters.
    #[must_use]
    pub fn lambda_with<S: Into<String>>(
        parameters: impl IntoIterator<Item = S>,
        body: Self,
    ) -> Self {
        Self::Lambda {
            parameters: parameters.into_iter().map(Into::into).collect(),
            body: Box::new(body),
        }
    }

    /// Creates a cast.
    #[must_use]
    pub fn cast(type_ref: TypeRef, value: Self) -> Self {
        Self::Cast {
            type_ref,
            value: Box::new(value),
        }
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(name) => f.write_str(name),
            Self::Literal(literal) => write!(f, "{literal}"),
            Self::Member { target, name } => write!(f, "{target}.{name}"),
            Self::Call {
                target,
                method,
                type_arguments,
                arguments,
            } => {
                if let Some(target) = target {
                    write!(f, "{target}.")?;
                }
                f.write_str(method)?;
                if !type_arguments.is_empty() {
                    f.write_str("<")?;
                    write_list(f, type_arguments)?;
                    f.write_str(">")?;
                }
                f.write_str("(")?;
                write_list(f, arguments)?;
                f.write_str(")")
            }
            Self::New {
                type_ref,
                arguments,
                initializers,
            } => {
                write!(f, "new {type_ref}")?;
                if !arguments.is_empty() || initializers.is_empty() {
                    f.write_str("(")?;
                    write_list(f, arguments)?;
                    f.write_str(")")?;
                }
                if !initializers.is_empty() {
                    f.write_str(" { ")?;
                    for (i, (name, value)) in initializers.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{name} = {value}")?;
                    }
                    f.write_str(" }")?;
                }
                Ok(())
            }
            Self::Index { target, arguments } => {
                write!(f, "{target}[")?;
                write_list(f, arguments)?;
                f.write_str("]")
            }
            Self::Operator { token, operands } => match operands.as_slice() {
                [operand] => write!(f, "{token}{operand}"),
                [left, right] => write!(f, "{left} {token} {right}"),
                _ => {
                    write!(f, "operator {token}(")?;
                    write_list(f, operands)?;
                    f.write_str(")")
                }
            },
            Self::Lambda { parameters, body } => {
                match parameters.as_slice() {
                    [single] => f.write_str(single)?,
                    _ => {
                        f.write_str("(")?;
                        write_list(f, parameters)?;
                        f.write_str(")")?;
                    }
                }
                write!(f, " => {body}")
            }
            Self::Default(type_ref) => write!(f, "default({type_ref})"),
            Self::Cast { type_ref, value } => write!(f, "(({type_ref}){value})"),
        }
    }
}

/// A statement in a generated test body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stmt {
    /// An expression evaluated for its effect.
    Expr(Expr),

    /// `var name = value;`
    Local {
        /// Local name.
        name: String,
        /// Initial value.
        value: Expr,
    },

    /// `target = value;`
    Assign {
        /// Assigned location.
        target: Expr,
        /// Assigned value.
        value: Expr,
    },
}

impl Stmt {
    /// Creates a local declaration.
    #[must_use]
    pub fn local(name: impl Into<String>, value: Expr) -> Self {
        Self::Local {
            name: name.into(),
            value,
        }
    }

    /// Creates an assignment.
    #[must_use]
    pub const fn assign(target: Expr, value: Expr) -> Self {
        Self::Assign { target, value }
    }
}

impl From<Expr> for Stmt {
    fn from(expr: Expr) -> Self {
        Self::Expr(expr)
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expr(expr) => write!(f, "{expr};"),
            Self::Local { name, value } => write!(f, "var {name} = {value};"),
            Self::Assign { target, value } => write!(f, "{target} = {value};"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn test_string_literal_escaping() {
        assert_snapshot!(Expr::string("a \"b\" \\ c").to_string(), @r#""a \"b\" \\ c""#);
        assert_eq!(Expr::string("   ").to_string(), "\"   \"");
        assert_eq!(Expr::null().to_string(), "null");
    }

    #[test]
    fn test_generic_call() {
        let call = Expr::generic_call(
            Expr::ident("Assert"),
            "Throws",
            [TypeRef::class("ArgumentNullException")],
            [Expr::lambda(Expr::new_object(TypeRef::class("Foo"), [Expr::null()]))],
        );
        assert_snapshot!(
            call.to_string(),
            @"Assert.Throws<ArgumentNullException>(() => new Foo(null))"
        );
    }

    #[test]
    fn test_object_initializer() {
        let empty = Expr::new_with_initializers(TypeRef::class("Options"), []);
        assert_eq!(empty.to_string(), "new Options()");

        let init = Expr::new_with_initializers(
            TypeRef::class("Options"),
            [
                ("Name".to_owned(), Expr::ident("_name")),
                ("Size".to_owned(), Expr::ident("_size")),
            ],
        );
        assert_eq!(init.to_string(), "new Options { Name = _name, Size = _size }");
    }

    #[test]
    fn test_operators_cast_and_index() {
        let add = Expr::operator("+", [Expr::ident("left"), Expr::ident("right")]);
        assert_eq!(add.to_string(), "left + right");
        let negate = Expr::operator("-", [Expr::ident("value")]);
        assert_eq!(negate.to_string(), "-value");

        let dispose = Expr::call(
            Expr::cast(TypeRef::interface("IDisposable"), Expr::ident("_testClass")),
            "Dispose",
            [],
        );
        assert_eq!(dispose.to_string(), "((IDisposable)_testClass).Dispose()");

        let index = Expr::index(Expr::ident("_testClass"), [Expr::number("1")]);
        assert_eq!(index.to_string(), "_testClass[1]");
    }

    #[test]
    fn test_statements() {
        assert_eq!(
            Stmt::local("result", Expr::call(Expr::ident("_testClass"), "Run", [])).to_string(),
            "var result = _testClass.Run();"
        );
        assert_eq!(
            Stmt::assign(Expr::member(Expr::ident("_testClass"), "Name"), Expr::ident("testValue"))
                .to_string(),
            "_testClass.Name = testValue;"
        );
        assert_eq!(Stmt::from(Expr::ident("x")).to_string(), "x;");
    }

    #[test]
    fn test_single_parameter_lambda() {
        let lambda = Expr::lambda_with(["x"], Expr::member(Expr::ident("x"), "Name"));
        assert_eq!(lambda.to_string(), "x => x.Name");
    }
}
