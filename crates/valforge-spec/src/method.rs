//! Standard methods and builder factory conventions.

use std::fmt;

use serde::Serialize;
use valforge_core::DeclRef;

/// Standard methods a user type may implement itself ("underride"), in which
/// case the generated value class must not emit its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum StandardMethod {
    ToString,
    HashCode,
    Equals,
}

impl StandardMethod {
    /// Every standard method, in declaration order.
    pub const ALL: [StandardMethod; 3] = [
        StandardMethod::ToString,
        StandardMethod::HashCode,
        StandardMethod::Equals,
    ];

    /// Name of the method in generated source.
    pub fn method_name(&self) -> &'static str {
        match self {
            StandardMethod::ToString => "toString",
            StandardMethod::HashCode => "hashCode",
            StandardMethod::Equals => "equals",
        }
    }
}

impl fmt::Display for StandardMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method_name())
    }
}

/// How generated code obtains a fresh instance of the user's builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum BuilderFactory {
    /// `new Person.Builder()`
    NoArgsConstructor,
    /// `Person.builder()`
    BuilderMethod,
    /// `Person.newBuilder()`
    NewBuilderMethod,
}

impl BuilderFactory {
    /// Render the expression that creates a builder.
    pub fn invocation(&self, declaring_type: &DeclRef, builder_type: &DeclRef) -> String {
        match self {
            BuilderFactory::NoArgsConstructor => format!("new {builder_type}()"),
            BuilderFactory::BuilderMethod => format!("{declaring_type}.builder()"),
            BuilderFactory::NewBuilderMethod => format!("{declaring_type}.newBuilder()"),
        }
    }
}

#[cfg(test)]
mod tests {
    use valforge_core::PlainDeclaration;

    use super::*;

    #[test]
    fn method_names() {
        let names: Vec<_> = StandardMethod::ALL.iter().map(|m| m.to_string()).collect();
        assert_eq!(names, ["toString", "hashCode", "equals"]);
    }

    #[test]
    fn factory_invocations() {
        let person = PlainDeclaration::new("com.example", "Person");
        let builder = DeclRef::new(person.nested("Builder"));
        let person = DeclRef::new(person);

        assert_eq!(
            BuilderFactory::NoArgsConstructor.invocation(&person, &builder),
            "new com.example.Person.Builder()"
        );
        assert_eq!(
            BuilderFactory::BuilderMethod.invocation(&person, &builder),
            "com.example.Person.builder()"
        );
        assert_eq!(
            BuilderFactory::NewBuilderMethod.invocation(&person, &builder),
            "com.example.Person.newBuilder()"
        );
    }
}
