//! Immutable naming values: [`NamingContext`] and [`NamingPattern`].
//!
//! A naming context carries the names a pattern may refer to. Every `with_*`
//! operation returns a new context and leaves the receiver untouched, so equal
//! inputs always yield equal contexts and therefore equal rendered names.
//!
//! Patterns are plain strings with `{token}` or `{token:modifier}` holes:
//!
//! | Token | Value |
//! |-------|-------|
//! | `typeName` | owning type name |
//! | `memberName` | member being named |
//! | `parameterName` | parameter being named |
//! | `interfaceName` | interface being named |
//! | `invalidValue` | label of an invalid argument value |
//!
//! Modifiers are `pascal`, `camel`, `lower` and `upper`.
//!
//! ```
//! use sg_core::{NamingContext, NamingPattern};
//!
//! let pattern = NamingPattern::parse("_{parameterName:camel}").unwrap();
//! let context = NamingContext::new("Foo").with_parameter_name("Logger");
//! assert_eq!(pattern.render(&context), "_logger");
//! ```

use std::fmt;

/// Values available to a naming pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamingContext {
    type_name: String,
    member_name: Option<String>,
    parameter_name: Option<String>,
    interface_name: Option<String>,
    invalid_value: Option<String>,
}

impl NamingContext {
    /// Creates a context for the given owning type.
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            member_name: None,
            parameter_name: None,
            interface_name: None,
            invalid_value: None,
        }
    }

    /// Returns a new context naming `member_name`.
    #[must_use]
    pub fn with_member_name(&self, member_name: impl Into<String>) -> Self {
        Self {
            member_name: Some(member_name.into()),
            ..self.clone()
        }
    }

    /// Returns a new context naming `parameter_name`.
    #[must_use]
    pub fn with_parameter_name(&self, parameter_name: impl Into<String>) -> Self {
        Self {
            parameter_name: Some(parameter_name.into()),
            ..self.clone()
        }
    }

    /// Returns a new context naming `interface_name`.
    #[must_use]
    pub fn with_interface_name(&self, interface_name: impl Into<String>) -> Self {
        Self {
            interface_name: Some(interface_name.into()),
            ..self.clone()
        }
    }

    /// Returns a new context labelling an invalid argument value.
    #[must_use]
    pub fn with_invalid_value(&self, invalid_value: impl Into<String>) -> Self {
        Self {
            invalid_value: Some(invalid_value.into()),
            ..self.clone()
        }
    }

    /// Owning type name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Member currently being named, if any.
    #[must_use]
    pub fn member_name(&self) -> Option<&str> {
        self.member_name.as_deref()
    }

    /// Parameter currently being named, if any.
    #[must_use]
    pub fn parameter_name(&self) -> Option<&str> {
        self.parameter_name.as_deref()
    }

    /// Interface currently being named, if any.
    #[must_use]
    pub fn interface_name(&self) -> Option<&str> {
        self.interface_name.as_deref()
    }

    /// Returns the value bound to `token`, if any.
    #[must_use]
    pub fn value_of(&self, token: PatternToken) -> Option<&str> {
        match token {
            PatternToken::TypeName => Some(&self.type_name),
            PatternToken::MemberName => self.member_name.as_deref(),
            PatternToken::ParameterName => self.parameter_name.as_deref(),
            PatternToken::InterfaceName => self.interface_name.as_deref(),
            PatternToken::InvalidValue => self.invalid_value.as_deref(),
        }
    }
}

/// A named hole in a [`NamingPattern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternToken {
    /// `{typeName}`
    TypeName,
    /// `{memberName}`
    MemberName,
    /// `{parameterName}`
    ParameterName,
    /// `{interfaceName}`
    InterfaceName,
    /// `{invalidValue}`
    InvalidValue,
}

impl PatternToken {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "typeName" => Some(Self::TypeName),
            "memberName" => Some(Self::MemberName),
            "parameterName" => Some(Self::ParameterName),
            "interfaceName" => Some(Self::InterfaceName),
            "invalidValue" => Some(Self::InvalidValue),
            _ => None,
        }
    }
}

/// Case transformation applied to a token value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseModifier {
    /// First character upper-cased.
    Pascal,
    /// First character lower-cased.
    Camel,
    /// All characters lower-cased.
    Lower,
    /// All characters upper-cased.
    Upper,
}

impl CaseModifier {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "pascal" => Some(Self::Pascal),
            "camel" => Some(Self::Camel),
            "lower" => Some(Self::Lower),
            "upper" => Some(Self::Upper),
            _ => None,
        }
    }

    /// Applies the modifier to `value`.
    #[must_use]
    pub fn apply(self, value: &str) -> String {
        match self {
            Self::Pascal => pascal_case(value),
            Self::Camel => camel_case(value),
            Self::Lower => value.to_lowercase(),
            Self::Upper => value.to_uppercase(),
        }
    }
}

/// Upper-cases the first character of `value`.
///
/// ```
/// assert_eq!(sg_core::types::pascal_case("name"), "Name");
/// assert_eq!(sg_core::types::pascal_case(""), "");
/// ```
#[must_use]
pub fn pascal_case(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Lower-cases the first character of `value`.
#[must_use]
pub fn camel_case(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    })
}

/// Reasons a pattern fails to parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    /// A `{` was never closed.
    #[error("unclosed '{{' at offset {0}")]
    Unclosed(usize),

    /// A `}` appeared without a matching `{`.
    #[error("unmatched '}}' at offset {0}")]
    Unmatched(usize),

    /// The token name is not one of the known tokens.
    #[error("unknown token '{0}'")]
    UnknownToken(String),

    /// The modifier name is not one of the known modifiers.
    #[error("unknown modifier '{0}'")]
    UnknownModifier(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Token {
        token: PatternToken,
        modifier: Option<CaseModifier>,
    },
}

/// A parsed naming pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingPattern {
    source: String,
    segments: Vec<Segment>,
}

impl NamingPattern {
    /// Parses a pattern.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] for unbalanced braces, unknown tokens and
    /// unknown modifiers.
    pub fn parse(source: &str) -> Result<Self, PatternError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = source.char_indices();

        while let Some((offset, c)) = rest.next() {
            match c {
                '{' => {
                    let mut hole = String::new();
                    let mut closed = false;
                    for (_, c) in rest.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        hole.push(c);
                    }
                    if !closed {
                        return Err(PatternError::Unclosed(offset));
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Self::parse_hole(&hole)?);
                }
                '}' => return Err(PatternError::Unmatched(offset)),
                _ => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_owned(),
            segments,
        })
    }

    fn parse_hole(hole: &str) -> Result<Segment, PatternError> {
        let (name, modifier) = match hole.split_once(':') {
            Some((name, modifier)) => (name.trim(), Some(modifier.trim())),
            None => (hole.trim(), None),
        };
        let token =
            PatternToken::parse(name).ok_or_else(|| PatternError::UnknownToken(name.to_owned()))?;
        let modifier = modifier
            .map(|m| CaseModifier::parse(m).ok_or_else(|| PatternError::UnknownModifier(m.to_owned())))
            .transpose()?;
        Ok(Segment::Token { token, modifier })
    }

    /// Renders the pattern against a context.
    ///
    /// Tokens without a bound value render as empty text.
    #[must_use]
    pub fn render(&self, context: &NamingContext) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Token { token, modifier } => {
                    let value = context.value_of(*token).unwrap_or_default();
                    match modifier {
                        Some(modifier) => out.push_str(&modifier.apply(value)),
                        None => out.push_str(value),
                    }
                }
            }
        }
        out
    }

    /// Returns `true` if the pattern refers to `token`.
    #[must_use]
    pub fn uses(&self, token: PatternToken) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Token { token: t, .. } if *t == token))
    }

    /// The original pattern text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for NamingPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_methods_leave_receiver_untouched() {
        let base = NamingContext::new("Foo");
        let member = base.with_member_name("Bar");
        assert_eq!(base.member_name(), None);
        assert_eq!(member.member_name(), Some("Bar"));
        assert_eq!(member.type_name(), "Foo");
    }

    #[test]
    fn test_equal_inputs_equal_contexts() {
        let a = NamingContext::new("Foo").with_parameter_name("x");
        let b = NamingContext::new("Foo").with_parameter_name("x");
        assert_eq!(a, b);
    }

    #[test]
    fn test_render_with_modifiers() {
        let context = NamingContext::new("Foo")
            .with_member_name("doThing")
            .with_parameter_name("Value");
        let pattern = NamingPattern::parse("{typeName:lower}_{memberName:pascal}_{parameterName:camel}_{parameterName:upper}").unwrap();
        assert_eq!(pattern.render(&context), "foo_DoThing_value_VALUE");
    }

    #[test]
    fn test_render_missing_value_is_empty() {
        let pattern = NamingPattern::parse("CanCall{memberName}").unwrap();
        assert_eq!(pattern.render(&NamingContext::new("Foo")), "CanCall");
    }

    #[test]
    fn test_literal_only_pattern() {
        let pattern = NamingPattern::parse("_fixture").unwrap();
        assert_eq!(pattern.render(&NamingContext::new("Foo")), "_fixture");
        assert!(!pattern.uses(PatternToken::ParameterName));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(NamingPattern::parse("_{parameterName"), Err(PatternError::Unclosed(1)));
        assert_eq!(NamingPattern::parse("a}"), Err(PatternError::Unmatched(1)));
        assert_eq!(
            NamingPattern::parse("{nope}"),
            Err(PatternError::UnknownToken("nope".to_owned()))
        );
        assert_eq!(
            NamingPattern::parse("{memberName:shout}"),
            Err(PatternError::UnknownModifier("shout".to_owned()))
        );
    }

    #[test]
    fn test_case_helpers() {
        assert_eq!(pascal_case("x"), "X");
        assert_eq!(camel_case("Logger"), "logger");
        assert_eq!(camel_case(""), "");
    }
}
