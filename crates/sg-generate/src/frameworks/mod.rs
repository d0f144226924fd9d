//! Narrow interfaces to the mocking framework, the assertion framework and
//! test value generation, with the built-in implementations.

mod assertion;
mod mocking;
mod values;

pub use assertion::{AssertionFramework, INCONCLUSIVE_MESSAGE, NUnit, XUnit, assertion_framework};
pub use mocking::{MockingFramework, Moq, NSubstitute, mocking_framework};
pub use values::{AutoFixtureValueGenerator, DefaultValueGenerator, SupportField, ValueGenerator};
