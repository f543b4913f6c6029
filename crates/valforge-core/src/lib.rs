//! Core building blocks for the valforge specification model.
//!
//! Compiler symbols are only stable within a single analysis pass, so this
//! crate wraps them in references that compare by canonical text. It also
//! provides descriptors for the classes the generator will emit, the naming
//! conventions that tie a property name to its getter and enum constant,
//! and content hashing for cache fingerprints.

pub mod class;
pub mod conventions;
pub mod error;
pub mod hash;
pub mod naming;
pub mod symbol;

pub use class::GeneratedClass;
pub use conventions::{GeneratedClasses, GenerationConventions};
pub use error::{CoreError, CoreResult};
pub use hash::Fingerprint;
pub use naming::PropertyNames;
pub use symbol::{
    DeclRef, DeclarationSymbol, PlainDeclaration, PlainType, StaticSymbolTable, Symbol,
    SymbolTable, TypeRef, TypeSymbol,
};
