//! Opaque compiler-level symbol references.
//!
//! The host compiler hands out type and declaration symbols whose identity is
//! only meaningful inside one analysis pass: the "same" `java.lang.String`
//! resolved twice may come back as two unrelated objects. Everything in this
//! crate therefore compares, hashes and serializes symbols by their canonical
//! textual form, captured once when the reference is created.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Serialize, Serializer};

/// Anything the host compiler can render to a stable canonical string.
pub trait Symbol: fmt::Debug + Send + Sync {
    /// Canonical textual form, e.g. `java.util.List<java.lang.String>`.
    fn canonical_text(&self) -> String;
}

/// A type as it appears in a declaration (a `TypeMirror`-like handle).
pub trait TypeSymbol: Symbol {
    /// Whether this is a primitive type with a boxed counterpart.
    fn is_primitive(&self) -> bool {
        false
    }
}

/// A type declaration (class, interface, enum) known to the compiler.
pub trait DeclarationSymbol: Symbol {
    /// Unqualified name of the declaration.
    fn simple_name(&self) -> String;

    /// The declaration this one is nested inside, if any.
    fn enclosing(&self) -> Option<DeclRef> {
        None
    }
}

/// Compiler-side lookup service used to resolve package membership.
///
/// Package ownership belongs to the live compilation context, so
/// specifications query it on demand instead of storing it.
pub trait SymbolTable: Send + Sync {
    /// Returns the package that owns `declaration`, or `None` if unknown.
    fn package_of(&self, declaration: &DeclRef) -> Option<String>;
}

macro_rules! canonical_ref_impls {
    ($name:ident) => {
        impl $name {
            /// Canonical textual form captured when the reference was created.
            pub fn canonical_text(&self) -> &str {
                &self.canonical
            }

            /// True when both references wrap the very same symbol object.
            ///
            /// This is identity, not equality; equality only looks at text.
            pub fn same_symbol(&self, other: &Self) -> bool {
                std::ptr::addr_eq(Arc::as_ptr(&self.symbol), Arc::as_ptr(&other.symbol))
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.canonical == other.canonical
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.canonical.hash(state);
            }
        }

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.canonical.cmp(&other.canonical)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:?})", stringify!($name), &*self.canonical)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.canonical)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.canonical)
            }
        }
    };
}

/// Shared handle to a [`TypeSymbol`], compared by canonical text.
#[derive(Clone)]
pub struct TypeRef {
    symbol: Arc<dyn TypeSymbol>,
    canonical: Arc<str>,
}

impl TypeRef {
    /// Wrap a symbol, capturing its canonical text.
    pub fn new(symbol: impl TypeSymbol + 'static) -> Self {
        Self::from_shared(Arc::new(symbol))
    }

    /// Wrap an already shared symbol.
    pub fn from_shared(symbol: Arc<dyn TypeSymbol>) -> Self {
        let canonical = symbol.canonical_text().into();
        Self { symbol, canonical }
    }

    /// The underlying compiler symbol.
    pub fn symbol(&self) -> &Arc<dyn TypeSymbol> {
        &self.symbol
    }

    /// Whether the referenced type is primitive.
    pub fn is_primitive(&self) -> bool {
        self.symbol.is_primitive()
    }
}

canonical_ref_impls!(TypeRef);

/// Shared handle to a [`DeclarationSymbol`], compared by canonical text.
#[derive(Clone)]
pub struct DeclRef {
    symbol: Arc<dyn DeclarationSymbol>,
    canonical: Arc<str>,
}

impl DeclRef {
    /// Wrap a symbol, capturing its canonical text.
    pub fn new(symbol: impl DeclarationSymbol + 'static) -> Self {
        Self::from_shared(Arc::new(symbol))
    }

    /// Wrap an already shared symbol.
    pub fn from_shared(symbol: Arc<dyn DeclarationSymbol>) -> Self {
        let canonical = symbol.canonical_text().into();
        Self { symbol, canonical }
    }

    /// The underlying compiler symbol.
    pub fn symbol(&self) -> &Arc<dyn DeclarationSymbol> {
        &self.symbol
    }

    /// Unqualified name of the declaration.
    pub fn simple_name(&self) -> String {
        self.symbol.simple_name()
    }

    /// Enclosing declaration, if nested.
    pub fn enclosing(&self) -> Option<DeclRef> {
        self.symbol.enclosing()
    }
}

canonical_ref_impls!(DeclRef);

/// A type symbol resolved outside a live compiler session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainType {
    text: String,
    primitive: bool,
}

impl PlainType {
    /// A reference type such as `java.util.List<java.lang.String>`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            primitive: false,
        }
    }

    /// A primitive type such as `int`.
    pub fn primitive(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            primitive: true,
        }
    }
}

impl Symbol for PlainType {
    fn canonical_text(&self) -> String {
        self.text.clone()
    }
}

impl TypeSymbol for PlainType {
    fn is_primitive(&self) -> bool {
        self.primitive
    }
}

/// A declaration symbol resolved outside a live compiler session.
///
/// `names` holds the outermost declaration first; a nested declaration
/// `com.example.Outer.Inner` has names `["Outer", "Inner"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainDeclaration {
    package: String,
    names: Vec<String>,
}

impl PlainDeclaration {
    /// A top-level declaration. An empty package denotes the default package.
    pub fn new(package: impl Into<String>, simple_name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            names: vec![simple_name.into()],
        }
    }

    /// A declaration nested directly inside this one.
    pub fn nested(&self, simple_name: impl Into<String>) -> Self {
        let mut names = self.names.clone();
        names.push(simple_name.into());
        Self {
            package: self.package.clone(),
            names,
        }
    }

    /// Package the declaration lives in.
    pub fn package(&self) -> &str {
        &self.package
    }
}

impl Symbol for PlainDeclaration {
    fn canonical_text(&self) -> String {
        let nested = self.names.join(".");
        if self.package.is_empty() {
            nested
        } else {
            format!("{}.{nested}", self.package)
        }
    }
}

impl DeclarationSymbol for PlainDeclaration {
    fn simple_name(&self) -> String {
        self.names.last().cloned().unwrap_or_default()
    }

    fn enclosing(&self) -> Option<DeclRef> {
        if self.names.len() < 2 {
            return None;
        }
        Some(DeclRef::new(PlainDeclaration {
            package: self.package.clone(),
            names: self.names[..self.names.len() - 1].to_vec(),
        }))
    }
}

/// A [`SymbolTable`] backed by explicitly registered package memberships.
#[derive(Debug, Clone, Default)]
pub struct StaticSymbolTable {
    packages: HashMap<String, String>,
}

impl StaticSymbolTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `declaration` belongs to `package`.
    pub fn register(&mut self, declaration: &DeclRef, package: impl Into<String>) -> &mut Self {
        self.packages
            .insert(declaration.canonical_text().to_string(), package.into());
        self
    }

    /// Register a plain declaration under its own package.
    pub fn register_plain(&mut self, declaration: &PlainDeclaration) -> DeclRef {
        let reference = DeclRef::new(declaration.clone());
        self.register(&reference, declaration.package());
        reference
    }
}

impl SymbolTable for StaticSymbolTable {
    fn package_of(&self, declaration: &DeclRef) -> Option<String> {
        self.packages.get(declaration.canonical_text()).cloned()
    }
}
