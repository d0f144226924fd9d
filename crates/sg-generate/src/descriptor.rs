//! Descriptors handed to the code emitter.

use serde::Serialize;
use sg_core::{FxHashMap, FxHashSet, RequiredAsset, TypeRef};
use smallvec::SmallVec;

use crate::frameworks::SupportField;
use crate::syntax::{Expr, Stmt};

/// One generated test method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedMethod {
    /// Test method name, unique within its [`GenerationOutput`].
    pub name: String,

    /// Id of the strategy that produced the method.
    pub strategy: &'static str,

    /// Statements of the method body.
    pub body: Vec<Stmt>,

    /// Whether the emitter should write this method.
    pub should_generate: bool,

    /// External assets the body relies on.
    #[serde(skip_serializing_if = "SmallVec::is_empty")]
    pub assets: SmallVec<[RequiredAsset; 1]>,
}

impl GeneratedMethod {
    /// Creates a method with no asset requirements.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        strategy: &'static str,
        body: Vec<Stmt>,
        should_generate: bool,
    ) -> Self {
        Self {
            name: name.into(),
            strategy,
            body,
            should_generate,
            assets: SmallVec::new(),
        }
    }

    /// Records an asset the body relies on.
    #[must_use]
    pub fn requiring(mut self, asset: RequiredAsset) -> Self {
        if !self.assets.contains(&asset) {
            self.assets.push(asset);
        }
        self
    }
}

/// A field of the generated test class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    /// Field name.
    pub name: String,

    /// Declared field type.
    #[serde(rename = "type")]
    pub type_ref: TypeRef,

    /// Initializer run in the test-class setup.
    pub initializer: Expr,
}

impl From<SupportField> for FieldDescriptor {
    fn from(field: SupportField) -> Self {
        Self {
            name: field.name,
            type_ref: field.type_ref,
            initializer: field.initializer,
        }
    }
}

/// Test-class setup: dependency fields and the system under test.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SetupDescriptor {
    /// Fields initialized before the system under test, in order.
    pub fields: Vec<FieldDescriptor>,

    /// Field holding the system under test; `None` for static types.
    pub target_field: Option<String>,

    /// Expression assigned to [`target_field`](Self::target_field).
    pub target_construction: Option<Expr>,
}

/// Everything generated for one type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationOutput {
    /// Name of the type under test.
    pub type_name: String,

    /// Test-class setup.
    pub setup: SetupDescriptor,

    /// Generated methods in dispatch order.
    pub methods: Vec<GeneratedMethod>,

    /// Assets required by the type or any method, sorted.
    pub required_assets: Vec<RequiredAsset>,
}

impl GenerationOutput {
    /// An output with no setup and no methods.
    #[must_use]
    pub fn empty(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    /// Returns `true` if nothing was generated.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Methods the emitter should write.
    pub fn methods_to_emit(&self) -> impl Iterator<Item = &GeneratedMethod> {
        self.methods.iter().filter(|m| m.should_generate)
    }
}

/// Makes method names unique by appending `2`, `3`, ... to repeats.
///
/// The first method with a given name keeps it. Suffixes skip names that
/// are already taken, so the result is unique and depends only on order.
pub(crate) fn make_names_unique(methods: &mut [GeneratedMethod]) {
    let mut taken: FxHashSet<String> = methods.iter().map(|m| m.name.clone()).collect();
    let mut seen: FxHashMap<String, u32> = FxHashMap::default();

    for method in methods.iter_mut() {
        let count = seen.entry(method.name.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            continue;
        }
        let mut suffix = *count;
        let mut candidate = format!("{}{suffix}", method.name);
        while taken.contains(&candidate) {
            suffix += 1;
            candidate = format!("{}{suffix}", method.name);
        }
        *count = suffix;
        taken.insert(candidate.clone());
        method.name = candidate;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(name: &str) -> GeneratedMethod {
        GeneratedMethod::new(name, "test", Vec::new(), true)
    }

    fn names(methods: &[GeneratedMethod]) -> Vec<&str> {
        methods.iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn test_unique_names_are_kept() {
        let mut methods = vec![method("A"), method("B")];
        make_names_unique(&mut methods);
        assert_eq!(names(&methods), ["A", "B"]);
    }

    #[test]
    fn test_repeats_get_numbered() {
        let mut methods = vec![method("CanGetIndexer"), method("CanGetIndexer"), method("CanGetIndexer")];
        make_names_unique(&mut methods);
        assert_eq!(names(&methods), ["CanGetIndexer", "CanGetIndexer2", "CanGetIndexer3"]);
    }

    #[test]
    fn test_suffix_skips_taken_names() {
        let mut methods = vec![method("Run"), method("Run2"), method("Run")];
        make_names_unique(&mut methods);
        assert_eq!(names(&methods), ["Run", "Run2", "Run3"]);
    }

    #[test]
    fn test_assets_are_deduplicated() {
        let method = method("A")
            .requiring(RequiredAsset::PropertyTester)
            .requiring(RequiredAsset::PropertyTester);
        assert_eq!(method.assets.as_slice(), [RequiredAsset::PropertyTester]);
    }

    #[test]
    fn test_methods_to_emit() {
        let mut output = GenerationOutput::empty("Foo");
        output.methods.push(method("A"));
        output.methods.push(GeneratedMethod::new("B", "test", Vec::new(), false));
        let emitted: Vec<_> = output.methods_to_emit().map(|m| m.name.as_str()).collect();
        assert_eq!(emitted, ["A"]);
    }
}
