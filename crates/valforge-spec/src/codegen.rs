//! The seam between the specification model and per-property code generation.
//!
//! Strategy selection picks one [`PropertyCodeGenerator`] per property; the
//! model only stores it. Strategies take part in specification equality, so
//! every strategy must be `PartialEq + Hash`. [`DynStrategy`] is implemented
//! for all such types and lets two `dyn PropertyCodeGenerator` objects be
//! compared and hashed by value.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Serialize, Serializer};

/// Object-safe value equality and hashing for strategy trait objects.
pub trait DynStrategy: 'static {
    fn as_any(&self) -> &dyn Any;
    fn dyn_eq(&self, other: &dyn Any) -> bool;
    fn dyn_hash(&self, state: &mut dyn Hasher);
}

impl<T: PartialEq + Hash + 'static> DynStrategy for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn Any) -> bool {
        other.downcast_ref::<T>().is_some_and(|other| self == other)
    }

    fn dyn_hash(&self, mut state: &mut dyn Hasher) {
        TypeId::of::<T>().hash(&mut state);
        self.hash(&mut state);
    }
}

/// A per-property code-generation strategy.
pub trait PropertyCodeGenerator: DynStrategy + fmt::Debug + Send + Sync {
    /// Short, stable name of the strategy, e.g. `default` or `optional`.
    fn strategy_name(&self) -> &str;

    /// Stable text identifying this strategy and its configuration, used for
    /// cross-process fingerprints. Defaults to the strategy name.
    fn fingerprint_key(&self) -> String {
        self.strategy_name().to_string()
    }
}

/// Shared handle to a chosen strategy, compared and hashed by value.
#[derive(Clone)]
pub struct CodeGeneratorRef(Arc<dyn PropertyCodeGenerator>);

impl CodeGeneratorRef {
    /// Wrap a strategy in a fresh shared handle.
    pub fn new(generator: impl PropertyCodeGenerator + 'static) -> Self {
        Self(Arc::new(generator))
    }

    /// Wrap a strategy that is already shared, e.g. a registry singleton.
    pub fn from_shared(generator: Arc<dyn PropertyCodeGenerator>) -> Self {
        Self(generator)
    }

    /// Name of the wrapped strategy.
    pub fn strategy_name(&self) -> &str {
        self.0.strategy_name()
    }

    /// Canonical key of the wrapped strategy.
    pub fn fingerprint_key(&self) -> String {
        self.0.fingerprint_key()
    }

    /// The strategy as its concrete type, if it is a `T`.
    pub fn downcast_ref<T: PropertyCodeGenerator>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }
}

impl PartialEq for CodeGeneratorRef {
    fn eq(&self, other: &Self) -> bool {
        self.0.dyn_eq(other.0.as_any())
    }
}

impl Eq for CodeGeneratorRef {}

impl Hash for CodeGeneratorRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.dyn_hash(state);
    }
}

impl fmt::Debug for CodeGeneratorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for CodeGeneratorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.strategy_name())
    }
}

impl Serialize for CodeGeneratorRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.fingerprint_key())
    }
}
