//! Type references as supplied by the source model provider.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The name of the well-known string type.
pub const STRING_TYPE_NAME: &str = "String";

/// Classification of a referenced type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum TypeKind {
    /// A reference type declared as a class (the default).
    #[default]
    Class,

    /// A value type (struct or primitive such as `Int32`).
    Struct,

    /// An interface.
    Interface,

    /// An enumeration (a value type).
    Enum,

    /// An unresolved generic type parameter such as `T`.
    TypeParameter,
}

impl TypeKind {
    /// Returns `true` if values of this kind are references (and may be null).
    #[inline]
    #[must_use]
    pub const fn is_reference(self) -> bool {
        matches!(self, Self::Class | Self::Interface)
    }
}

/// A reference to a type, possibly generic, possibly nullable-annotated.
///
/// Names are metadata names (`Int32`, `String`, `List`), so that formatted
/// names are usable directly as identifier fragments.
///
/// # Examples
///
/// ```
/// use sg_core::TypeRef;
///
/// let list = TypeRef::class("List").with_arguments([TypeRef::string()]);
/// assert_eq!(list.to_string(), "List<String>");
/// assert_eq!(list.formatted_name(), "ListString");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    /// Unqualified metadata name of the type.
    pub name: String,

    /// Generic type arguments, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_arguments: Vec<TypeRef>,

    /// Classification of the type.
    #[serde(default)]
    pub kind: TypeKind,

    /// Whether the reference carries a nullable annotation.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub nullable: bool,
}

impl TypeRef {
    /// Creates a reference to a class type.
    #[must_use]
    pub fn class(name: impl Into<String>) -> Self {
        Self::of_kind(name, TypeKind::Class)
    }

    /// Creates a reference to a value type.
    #[must_use]
    pub fn value(name: impl Into<String>) -> Self {
        Self::of_kind(name, TypeKind::Struct)
    }

    /// Creates a reference to an interface type.
    #[must_use]
    pub fn interface(name: impl Into<String>) -> Self {
        Self::of_kind(name, TypeKind::Interface)
    }

    /// Creates a reference to the well-known string type.
    #[must_use]
    pub fn string() -> Self {
        Self::class(STRING_TYPE_NAME)
    }

    /// Creates a reference of the given kind.
    #[must_use]
    pub fn of_kind(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            type_arguments: Vec::new(),
            kind,
            nullable: false,
        }
    }

    /// Returns this reference with the given type arguments.
    #[must_use]
    pub fn with_arguments(mut self, arguments: impl IntoIterator<Item = TypeRef>) -> Self {
        self.type_arguments = arguments.into_iter().collect();
        self
    }

    /// Returns this reference with a nullable annotation.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Returns `true` if this is the well-known string type.
    #[inline]
    #[must_use]
    pub fn is_string(&self) -> bool {
        self.name == STRING_TYPE_NAME && self.type_arguments.is_empty()
    }

    /// Returns `true` if values of this type are references.
    #[inline]
    #[must_use]
    pub const fn is_reference(&self) -> bool {
        self.kind.is_reference()
    }

    /// Returns `true` if this type is an interface.
    #[inline]
    #[must_use]
    pub const fn is_interface(&self) -> bool {
        matches!(self.kind, TypeKind::Interface)
    }

    /// Compares two references ignoring nullable annotations.
    ///
    /// `String` and `String?` denote the same type for naming purposes.
    #[must_use]
    pub fn is_same_type(&self, other: &Self) -> bool {
        self.name == other.name
            && self.type_arguments.len() == other.type_arguments.len()
            && self
                .type_arguments
                .iter()
                .zip(&other.type_arguments)
                .all(|(a, b)| a.is_same_type(b))
    }

    /// Formats the type as an identifier fragment.
    ///
    /// Generic types concatenate the outer name with the recursively
    /// formatted type arguments, in declaration order.
    ///
    /// # Examples
    ///
    /// ```
    /// use sg_core::TypeRef;
    ///
    /// let map = TypeRef::class("Dictionary")
    ///     .with_arguments([TypeRef::string(), TypeRef::class("List").with_arguments([TypeRef::value("Int32")])]);
    /// assert_eq!(map.formatted_name(), "DictionaryStringListInt32");
    /// ```
    #[must_use]
    pub fn formatted_name(&self) -> String {
        let mut out = String::with_capacity(self.name.len());
        self.write_formatted(&mut out);
        out
    }

    fn write_formatted(&self, out: &mut String) {
        out.push_str(&self.name);
        for argument in &self.type_arguments {
            argument.write_formatted(out);
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.type_arguments.is_empty() {
            f.write_str("<")?;
            for (i, argument) in self.type_arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{argument}")?;
            }
            f.write_str(">")?;
        }
        if self.nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}
