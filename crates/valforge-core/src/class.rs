//! Descriptors for classes the generator will emit.
//!
//! A generated class is not yet known to the compiler, so it is modelled as
//! plain data: a package, a simple name, and optionally the generated class
//! it is nested inside. Nesting is a queryable attribute rather than a
//! structural property of these types; consumers that need a class to live
//! inside another check [`GeneratedClass::is_nested_in`] explicitly.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::{CoreError, CoreResult};
use crate::naming::is_identifier;

/// A class to be generated: name plus enclosing scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeneratedClass {
    package: String,
    simple_name: String,
    enclosing: Option<Box<GeneratedClass>>,
}

impl GeneratedClass {
    /// A top-level class in `package`. An empty package is the default package.
    pub fn top_level(
        package: impl Into<String>,
        simple_name: impl Into<String>,
    ) -> CoreResult<Self> {
        let package = package.into();
        if !package.is_empty() && !package.split('.').all(is_identifier) {
            return Err(CoreError::InvalidIdentifier(package));
        }
        Ok(Self {
            package,
            simple_name: checked_name(simple_name.into())?,
            enclosing: None,
        })
    }

    /// A class nested directly inside this one.
    pub fn nested(&self, simple_name: impl Into<String>) -> CoreResult<Self> {
        Ok(Self {
            package: self.package.clone(),
            simple_name: checked_name(simple_name.into())?,
            enclosing: Some(Box::new(self.clone())),
        })
    }

    /// Package the class (or its outermost enclosing class) lives in.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Unqualified name.
    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    /// The generated class this one is nested inside, if any.
    pub fn enclosing_scope(&self) -> Option<&GeneratedClass> {
        self.enclosing.as_deref()
    }

    /// True if this class is nested directly inside `outer`.
    pub fn is_nested_in(&self, outer: &GeneratedClass) -> bool {
        self.enclosing_scope() == Some(outer)
    }

    /// Fully qualified name, e.g. `com.example.Person_Builder.Value`.
    ///
    /// This is the canonical textual form used for equality and hashing by
    /// the specification model.
    pub fn qualified_name(&self) -> String {
        match &self.enclosing {
            Some(outer) => format!("{}.{}", outer.qualified_name(), self.simple_name),
            None if self.package.is_empty() => self.simple_name.clone(),
            None => format!("{}.{}", self.package, self.simple_name),
        }
    }

    /// Number of enclosing classes (zero for a top-level class).
    pub fn depth(&self) -> usize {
        self.enclosing.as_ref().map_or(0, |outer| outer.depth() + 1)
    }
}

fn checked_name(name: String) -> CoreResult<String> {
    if is_identifier(&name) {
        Ok(name)
    } else {
        Err(CoreError::InvalidIdentifier(name))
    }
}

impl fmt::Display for GeneratedClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name())
    }
}

impl Serialize for GeneratedClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.qualified_name())
    }
}
