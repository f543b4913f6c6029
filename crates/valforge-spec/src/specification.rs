//! The specification of one user type: everything the generator needs to
//! emit its builder, value, partial and property-enum classes.
//!
//! Discovery code populates a [`SpecificationBuilder`] one fact at a time
//! and then calls [`SpecificationBuilder::build`], which validates required
//! fields and the nesting of the generated classes in one step. The
//! resulting [`Specification`] is immutable; a changed specification is
//! always a freshly built one.
//!
//! Equality and hashing use the canonical text of every symbol reference and
//! generated class, so a specification rebuilt in a later compilation round
//! equals the earlier one and can serve as a cache key.

use std::collections::BTreeSet;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::Serialize;
use valforge_core::{
    DeclRef, Fingerprint, GeneratedClass, GeneratedClasses, GenerationConventions, SymbolTable,
};

use crate::error::{SpecError, SpecResult};
use crate::method::{BuilderFactory, StandardMethod};
use crate::property::PropertyDescriptor;

const ENTITY: &str = "Specification";

/// A finalized, immutable description of a user type.
#[derive(Clone)]
pub struct Specification {
    symbols: Arc<dyn SymbolTable>,
    declaring_type: DeclRef,
    builder_type: DeclRef,
    builder_factory: Option<BuilderFactory>,
    generated_builder: GeneratedClass,
    value_class: GeneratedClass,
    partial_class: GeneratedClass,
    property_enum: GeneratedClass,
    properties: Vec<PropertyDescriptor>,
    underridden_methods: BTreeSet<StandardMethod>,
    builder_serializable: bool,
    gwt_serializable: bool,
}

/// The fields that define specification identity, in canonical form.
#[derive(PartialEq, Eq, Hash, Serialize)]
struct CanonicalView<'a> {
    declaring_type: &'a str,
    builder_type: &'a str,
    builder_factory: Option<BuilderFactory>,
    generated_builder: String,
    value_class: String,
    partial_class: String,
    property_enum: String,
    properties: &'a [PropertyDescriptor],
    underridden_methods: &'a BTreeSet<StandardMethod>,
    builder_serializable: bool,
    gwt_serializable: bool,
}

impl Specification {
    /// Start an empty builder resolving packages through `symbols`.
    pub fn builder(symbols: Arc<dyn SymbolTable>) -> SpecificationBuilder {
        SpecificationBuilder::new(symbols)
    }

    /// The package the user type is in, resolved from the symbol table on
    /// every call.
    pub fn package(&self) -> Option<String> {
        self.symbols.package_of(&self.declaring_type)
    }

    /// The user type itself.
    pub fn declaring_type(&self) -> &DeclRef {
        &self.declaring_type
    }

    /// The builder type that users will see.
    pub fn builder_type(&self) -> &DeclRef {
        &self.builder_type
    }

    /// The builder factory mechanism the user has exposed, if any.
    pub fn builder_factory(&self) -> Option<BuilderFactory> {
        self.builder_factory
    }

    /// The expression that creates a user-visible builder, if a factory is
    /// exposed.
    pub fn builder_invocation(&self) -> Option<String> {
        self.builder_factory
            .map(|factory| factory.invocation(&self.declaring_type, &self.builder_type))
    }

    /// The builder class that should be generated.
    pub fn generated_builder(&self) -> &GeneratedClass {
        &self.generated_builder
    }

    /// The value class that should be generated.
    pub fn value_class(&self) -> &GeneratedClass {
        &self.value_class
    }

    /// The partial value class that should be generated.
    pub fn partial_class(&self) -> &GeneratedClass {
        &self.partial_class
    }

    /// The property enum that may be generated.
    pub fn property_enum(&self) -> &GeneratedClass {
        &self.property_enum
    }

    /// Properties in declaration order.
    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    /// First property called `name`.
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name() == name)
    }

    /// Property names in declaration order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.properties.iter().map(PropertyDescriptor::name)
    }

    /// Standard methods the user type implements itself.
    pub fn underridden_methods(&self) -> &BTreeSet<StandardMethod> {
        &self.underridden_methods
    }

    /// True if the user type implements `method` itself.
    pub fn is_underridden(&self, method: StandardMethod) -> bool {
        self.underridden_methods.contains(&method)
    }

    /// Whether the generated builder should be serializable.
    pub fn is_builder_serializable(&self) -> bool {
        self.builder_serializable
    }

    /// Whether the type, and hence the generated value class, is GWT serializable.
    pub fn is_gwt_serializable(&self) -> bool {
        self.gwt_serializable
    }

    /// A builder holding this specification's values.
    pub fn to_builder(&self) -> SpecificationBuilder {
        SpecificationBuilder {
            symbols: Arc::clone(&self.symbols),
            declaring_type: Some(self.declaring_type.clone()),
            builder_type: Some(self.builder_type.clone()),
            builder_factory: self.builder_factory,
            generated_builder: Some(self.generated_builder.clone()),
            value_class: Some(self.value_class.clone()),
            partial_class: Some(self.partial_class.clone()),
            property_enum: Some(self.property_enum.clone()),
            properties: self.properties.clone(),
            underridden_methods: self.underridden_methods.clone(),
            builder_serializable: Some(self.builder_serializable),
            gwt_serializable: Some(self.gwt_serializable),
        }
    }

    /// Content hash of the canonical form, stable across processes.
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of(&self.canonical_view())
    }

    fn canonical_view(&self) -> CanonicalView<'_> {
        CanonicalView {
            declaring_type: self.declaring_type.canonical_text(),
            builder_type: self.builder_type.canonical_text(),
            builder_factory: self.builder_factory,
            generated_builder: self.generated_builder.qualified_name(),
            value_class: self.value_class.qualified_name(),
            partial_class: self.partial_class.qualified_name(),
            property_enum: self.property_enum.qualified_name(),
            properties: &self.properties,
            underridden_methods: &self.underridden_methods,
            builder_serializable: self.builder_serializable,
            gwt_serializable: self.gwt_serializable,
        }
    }
}

impl PartialEq for Specification {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_view() == other.canonical_view()
    }
}

impl Eq for Specification {}

impl Hash for Specification {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_view().hash(state);
    }
}

impl fmt::Debug for Specification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Specification")
            .field("declaring_type", &self.declaring_type)
            .field("builder_type", &self.builder_type)
            .field("builder_factory", &self.builder_factory)
            .field("generated_builder", &self.generated_builder)
            .field("value_class", &self.value_class)
            .field("partial_class", &self.partial_class)
            .field("property_enum", &self.property_enum)
            .field("properties", &self.properties)
            .field("underridden_methods", &self.underridden_methods)
            .field("builder_serializable", &self.builder_serializable)
            .field("gwt_serializable", &self.gwt_serializable)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Specification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Specification{{declaring_type={}, builder_type={}, generated_builder={}, \
             value_class={}, partial_class={}, property_enum={}, properties=[",
            self.declaring_type,
            self.builder_type,
            self.generated_builder,
            self.value_class,
            self.partial_class,
            self.property_enum,
        )?;
        for (i, property) in self.properties.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{property}")?;
        }
        let methods: Vec<_> = self
            .underridden_methods
            .iter()
            .map(StandardMethod::method_name)
            .collect();
        write!(
            f,
            "], underridden_methods=[{}], builder_serializable={}, gwt_serializable={}}}",
            methods.join(", "),
            self.builder_serializable,
            self.gwt_serializable
        )
    }
}

/// Incremental builder for [`Specification`].
///
/// Owned by the discovery pass while it walks the user's declaration.
/// Scalar setters overwrite; property and method adders accumulate.
#[derive(Clone)]
pub struct SpecificationBuilder {
    symbols: Arc<dyn SymbolTable>,
    declaring_type: Option<DeclRef>,
    builder_type: Option<DeclRef>,
    builder_factory: Option<BuilderFactory>,
    generated_builder: Option<GeneratedClass>,
    value_class: Option<GeneratedClass>,
    partial_class: Option<GeneratedClass>,
    property_enum: Option<GeneratedClass>,
    properties: Vec<PropertyDescriptor>,
    underridden_methods: BTreeSet<StandardMethod>,
    builder_serializable: Option<bool>,
    gwt_serializable: Option<bool>,
}

impl fmt::Debug for SpecificationBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpecificationBuilder")
            .field("declaring_type", &self.declaring_type)
            .field("builder_type", &self.builder_type)
            .field("builder_factory", &self.builder_factory)
            .field("generated_builder", &self.generated_builder)
            .field("value_class", &self.value_class)
            .field("partial_class", &self.partial_class)
            .field("property_enum", &self.property_enum)
            .field("properties", &self.properties)
            .field("underridden_methods", &self.underridden_methods)
            .field("builder_serializable", &self.builder_serializable)
            .field("gwt_serializable", &self.gwt_serializable)
            .finish_non_exhaustive()
    }
}

impl SpecificationBuilder {
    /// An empty builder that resolves packages through `symbols`.
    pub fn new(symbols: Arc<dyn SymbolTable>) -> Self {
        Self {
            symbols,
            declaring_type: None,
            builder_type: None,
            builder_factory: None,
            generated_builder: None,
            value_class: None,
            partial_class: None,
            property_enum: None,
            properties: Vec::new(),
            underridden_methods: BTreeSet::new(),
            builder_serializable: None,
            gwt_serializable: None,
        }
    }

    /// Sets the user type the specification describes.
    pub fn set_declaring_type(&mut self, declaring_type: DeclRef) -> &mut Self {
        self.declaring_type = Some(declaring_type);
        self
    }

    /// Sets the builder type that users will see.
    pub fn set_builder_type(&mut self, builder_type: DeclRef) -> &mut Self {
        self.builder_type = Some(builder_type);
        self
    }

    /// Sets the builder factory mechanism the user has exposed, if any.
    pub fn set_builder_factory(
        &mut self,
        builder_factory: impl Into<Option<BuilderFactory>>,
    ) -> &mut Self {
        self.builder_factory = builder_factory.into();
        self
    }

    /// Sets the builder class that should be generated.
    pub fn set_generated_builder(&mut self, generated_builder: GeneratedClass) -> &mut Self {
        self.generated_builder = Some(generated_builder);
        self
    }

    /// Sets the value class; it must be nested directly in the generated builder.
    pub fn set_value_class(&mut self, value_class: GeneratedClass) -> &mut Self {
        self.value_class = Some(value_class);
        self
    }

    /// Sets the partial value class; it must be nested directly in the generated builder.
    pub fn set_partial_class(&mut self, partial_class: GeneratedClass) -> &mut Self {
        self.partial_class = Some(partial_class);
        self
    }

    /// Sets the property enum; it must be nested directly in the generated builder.
    pub fn set_property_enum(&mut self, property_enum: GeneratedClass) -> &mut Self {
        self.property_enum = Some(property_enum);
        self
    }

    /// Sets the generated builder and its three nested classes together.
    pub fn set_generated_classes(&mut self, classes: &GeneratedClasses) -> &mut Self {
        self.set_generated_builder(classes.builder.clone())
            .set_value_class(classes.value.clone())
            .set_partial_class(classes.partial.clone())
            .set_property_enum(classes.property_enum.clone())
    }

    /// Names the generated classes for the declaring type under `conventions`.
    ///
    /// The declaring type must already be set. Its package comes from the
    /// symbol table (the default package if unknown), and a type nested in
    /// other user types is flattened to `Outer_Inner` before the builder
    /// suffix is appended.
    pub fn derive_generated_classes(
        &mut self,
        conventions: &GenerationConventions,
    ) -> SpecResult<&mut Self> {
        let declaring_type = required(&self.declaring_type, "declaring_type")?;
        let package = self.symbols.package_of(declaring_type).unwrap_or_default();
        let mut names = vec![declaring_type.simple_name()];
        let mut scope = declaring_type.enclosing();
        while let Some(outer) = scope {
            names.push(outer.simple_name());
            scope = outer.enclosing();
        }
        names.reverse();
        let classes = GeneratedClasses::derive(&package, &names.join("_"), conventions)?;
        Ok(self.set_generated_classes(&classes))
    }

    /// Appends a property; declaration order is preserved.
    pub fn add_property(&mut self, property: PropertyDescriptor) -> &mut Self {
        self.properties.push(property);
        self
    }

    /// Appends properties in iteration order.
    pub fn add_all_properties(
        &mut self,
        properties: impl IntoIterator<Item = PropertyDescriptor>,
    ) -> &mut Self {
        self.properties.extend(properties);
        self
    }

    /// Records a standard method the user type implements itself.
    pub fn add_underridden_method(&mut self, method: StandardMethod) -> &mut Self {
        self.underridden_methods.insert(method);
        self
    }

    /// Records several standard methods; repeats are ignored.
    pub fn add_all_underridden_methods(
        &mut self,
        methods: impl IntoIterator<Item = StandardMethod>,
    ) -> &mut Self {
        self.underridden_methods.extend(methods);
        self
    }

    /// Sets whether the generated builder should be serializable.
    pub fn set_builder_serializable(&mut self, builder_serializable: bool) -> &mut Self {
        self.builder_serializable = Some(builder_serializable);
        self
    }

    /// Sets whether the type (and hence the generated value class) is GWT serializable.
    pub fn set_gwt_serializable(&mut self, gwt_serializable: bool) -> &mut Self {
        self.gwt_serializable = Some(gwt_serializable);
        self
    }

    /// Validate and return a frozen specification.
    ///
    /// Fails if a required field is unset, if the value, partial or
    /// property-enum class is not nested directly inside the generated
    /// builder, or if an attached property has no code generator.
    pub fn build(&self) -> SpecResult<Specification> {
        let builder_type = required(&self.builder_type, "builder_type")?;
        let generated_builder = required(&self.generated_builder, "generated_builder")?;
        let declaring_type = required(&self.declaring_type, "declaring_type")?;
        let value_class = required(&self.value_class, "value_class")?;
        check_nested("value_class", value_class, generated_builder)?;
        let partial_class = required(&self.partial_class, "partial_class")?;
        check_nested("partial_class", partial_class, generated_builder)?;
        let property_enum = required(&self.property_enum, "property_enum")?;
        check_nested("property_enum", property_enum, generated_builder)?;
        let builder_serializable = *required(&self.builder_serializable, "builder_serializable")?;
        let gwt_serializable = *required(&self.gwt_serializable, "gwt_serializable")?;

        if let Some(index) = self
            .properties
            .iter()
            .position(|p| p.code_generator().is_none())
        {
            return Err(SpecError::missing(
                ENTITY,
                format!("properties[{index}].code_generator"),
            ));
        }

        let mut seen = HashSet::new();
        for property in &self.properties {
            if !seen.insert(property.name()) {
                tracing::warn!(
                    declaring_type = %declaring_type,
                    property = property.name(),
                    "specification lists property more than once"
                );
            }
        }

        let specification = Specification {
            symbols: Arc::clone(&self.symbols),
            declaring_type: declaring_type.clone(),
            builder_type: builder_type.clone(),
            builder_factory: self.builder_factory,
            generated_builder: generated_builder.clone(),
            value_class: value_class.clone(),
            partial_class: partial_class.clone(),
            property_enum: property_enum.clone(),
            properties: self.properties.clone(),
            underridden_methods: self.underridden_methods.clone(),
            builder_serializable,
            gwt_serializable,
        };
        tracing::debug!(
            declaring_type = %specification.declaring_type,
            generated_builder = %specification.generated_builder,
            properties = specification.properties.len(),
            "built specification"
        );
        Ok(specification)
    }
}

fn required<'a, T>(value: &'a Option<T>, field: &str) -> SpecResult<&'a T> {
    value.as_ref().ok_or_else(|| SpecError::missing(ENTITY, field))
}

fn check_nested(
    artifact: &'static str,
    class: &GeneratedClass,
    generated_builder: &GeneratedClass,
) -> SpecResult<()> {
    if class.is_nested_in(generated_builder) {
        return Ok(());
    }
    Err(SpecError::StructuralMismatch {
        artifact,
        expected: generated_builder.qualified_name(),
        actual: class
            .enclosing_scope()
            .map_or_else(|| "<top level>".to_string(), GeneratedClass::qualified_name),
    })
}
