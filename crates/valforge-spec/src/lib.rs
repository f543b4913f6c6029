//! Specification model for the valforge code generator.
//!
//! A [`Specification`] describes one user-declared type: the builder the
//! user sees, the classes to generate (builder, value, partial, property
//! enum), its ordered [`PropertyDescriptor`]s, which standard methods the
//! user implements itself, and its serialization capabilities. Discovery
//! code fills in a [`SpecificationBuilder`] and finalizes it once; code
//! generation only reads the frozen result.
//!
//! Equality and hashing never depend on compiler symbol identity, only on
//! canonical text, so a specification is usable as a cache key across
//! compilation rounds.

pub mod codegen;
pub mod error;
pub mod method;
pub mod property;
pub mod specification;

pub use codegen::{CodeGeneratorRef, DynStrategy, PropertyCodeGenerator};
pub use error::{SpecError, SpecResult};
pub use method::{BuilderFactory, StandardMethod};
pub use property::{PropertyDescriptor, PropertyDescriptorBuilder};
pub use specification::{Specification, SpecificationBuilder};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn frozen_model_is_shareable_across_threads() {
        assert_send_sync::<Specification>();
        assert_send_sync::<PropertyDescriptor>();
        assert_send_sync::<CodeGeneratorRef>();
    }
}
