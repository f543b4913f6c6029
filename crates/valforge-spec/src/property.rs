//! Property descriptors: one declared property of a user type.
//!
//! A [`PropertyDescriptor`] is assembled incrementally through a
//! [`PropertyDescriptorBuilder`] and frozen by [`PropertyDescriptorBuilder::build`].
//! Type references compare by canonical text, so descriptors built in
//! separate analysis passes compare equal when they describe the same
//! property.

use std::fmt;

use serde::Serialize;
use valforge_core::{Fingerprint, PropertyNames, TypeRef};

use crate::codegen::CodeGeneratorRef;
use crate::error::{SpecError, SpecResult};

const ENTITY: &str = "PropertyDescriptor";

/// A finalized, immutable description of one property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PropertyDescriptor {
    declared_type: TypeRef,
    boxed_type: Option<TypeRef>,
    name: String,
    capitalized_name: String,
    all_caps_name: String,
    getter_name: String,
    code_generator: Option<CodeGeneratorRef>,
    fully_checked_cast: bool,
}

impl PropertyDescriptor {
    /// Start an empty builder.
    pub fn builder() -> PropertyDescriptorBuilder {
        PropertyDescriptorBuilder::new()
    }

    /// The declared type of the property.
    pub fn declared_type(&self) -> &TypeRef {
        &self.declared_type
    }

    /// The boxed form of the declared type, present only for primitives.
    pub fn boxed_type(&self) -> Option<&TypeRef> {
        self.boxed_type.as_ref()
    }

    /// Property name, e.g. `myProperty`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Capitalized name, e.g. `MyProperty`.
    pub fn capitalized_name(&self) -> &str {
        &self.capitalized_name
    }

    /// Upper snake-case name, e.g. `MY_PROPERTY`.
    pub fn all_caps_name(&self) -> &str {
        &self.all_caps_name
    }

    /// Getter name, e.g. `getMyProperty` or `isSomethingTrue`.
    pub fn getter_name(&self) -> &str {
        &self.getter_name
    }

    /// The chosen strategy, or `None` while the descriptor is being handed to
    /// strategy selection.
    pub fn code_generator(&self) -> Option<&CodeGeneratorRef> {
        self.code_generator.as_ref()
    }

    /// True if a cast to the declared type is fully checked at runtime: the
    /// type is non-generic, raw, or parameterized only with unbounded
    /// wildcards, such as `Integer`, `List` or `Map<?, ?>`.
    pub fn is_fully_checked_cast(&self) -> bool {
        self.fully_checked_cast
    }

    /// A builder holding this descriptor's values.
    pub fn to_builder(&self) -> PropertyDescriptorBuilder {
        PropertyDescriptorBuilder {
            declared_type: Some(self.declared_type.clone()),
            boxed_type: self.boxed_type.clone(),
            name: Some(self.name.clone()),
            capitalized_name: Some(self.capitalized_name.clone()),
            all_caps_name: Some(self.all_caps_name.clone()),
            getter_name: Some(self.getter_name.clone()),
            code_generator: self.code_generator.clone(),
            fully_checked_cast: Some(self.fully_checked_cast),
        }
    }

    /// A fresh descriptor identical to this one but with `generator` attached.
    pub fn with_code_generator(&self, generator: CodeGeneratorRef) -> Self {
        Self {
            code_generator: Some(generator),
            ..self.clone()
        }
    }

    /// Content hash of the canonical form, stable across processes.
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of(self)
    }
}

impl fmt::Display for PropertyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PropertyDescriptor{{declared_type={}", self.declared_type)?;
        match &self.boxed_type {
            Some(boxed) => write!(f, ", boxed_type={boxed}")?,
            None => write!(f, ", boxed_type=none")?,
        }
        write!(
            f,
            ", name={}, capitalized_name={}, getter_name={}, all_caps_name={}",
            self.name, self.capitalized_name, self.getter_name, self.all_caps_name
        )?;
        match &self.code_generator {
            Some(generator) => write!(f, ", code_generator={generator}")?,
            None => write!(f, ", code_generator=none")?,
        }
        write!(f, ", fully_checked_cast={}}}", self.fully_checked_cast)
    }
}

/// Incremental builder for [`PropertyDescriptor`].
///
/// Setters may be called in any order and any number of times; the last
/// write wins. [`build`](Self::build) leaves the builder untouched, so a
/// failed build can be completed and retried.
#[derive(Debug, Clone, Default)]
pub struct PropertyDescriptorBuilder {
    declared_type: Option<TypeRef>,
    boxed_type: Option<TypeRef>,
    name: Option<String>,
    capitalized_name: Option<String>,
    all_caps_name: Option<String>,
    getter_name: Option<String>,
    code_generator: Option<CodeGeneratorRef>,
    fully_checked_cast: Option<bool>,
}

impl PropertyDescriptorBuilder {
    /// An empty builder with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the declared type of the property.
    pub fn set_declared_type(&mut self, declared_type: TypeRef) -> &mut Self {
        self.declared_type = Some(declared_type);
        self
    }

    /// Sets the boxed type (`None` if the declared type is not primitive).
    pub fn set_boxed_type(&mut self, boxed_type: impl Into<Option<TypeRef>>) -> &mut Self {
        self.boxed_type = boxed_type.into();
        self
    }

    /// Sets the property name as it appears in generated code, e.g. `myProperty`.
    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the capitalized name used in method names, e.g. `MyProperty`.
    pub fn set_capitalized_name(&mut self, capitalized_name: impl Into<String>) -> &mut Self {
        self.capitalized_name = Some(capitalized_name.into());
        self
    }

    /// Sets the enum constant name, e.g. `MY_PROPERTY`.
    pub fn set_all_caps_name(&mut self, all_caps_name: impl Into<String>) -> &mut Self {
        self.all_caps_name = Some(all_caps_name.into());
        self
    }

    /// Sets the name of the user's accessor, e.g. `getMyProperty`.
    pub fn set_getter_name(&mut self, getter_name: impl Into<String>) -> &mut Self {
        self.getter_name = Some(getter_name.into());
        self
    }

    /// Sets all four name variants at once.
    pub fn set_names(&mut self, names: &PropertyNames) -> &mut Self {
        self.set_name(names.name.as_str())
            .set_capitalized_name(names.capitalized_name.as_str())
            .set_all_caps_name(names.all_caps_name.as_str())
            .set_getter_name(names.getter_name.as_str())
    }

    /// Sets the code-generation strategy (`None` to clear it).
    pub fn set_code_generator(
        &mut self,
        code_generator: impl Into<Option<CodeGeneratorRef>>,
    ) -> &mut Self {
        self.code_generator = code_generator.into();
        self
    }

    /// Sets whether a cast to the declared type is fully checked at runtime.
    pub fn set_fully_checked_cast(&mut self, fully_checked_cast: bool) -> &mut Self {
        self.fully_checked_cast = Some(fully_checked_cast);
        self
    }

    /// Validate required fields and return a frozen descriptor.
    ///
    /// `boxed_type` and `code_generator` may be absent.
    pub fn build(&self) -> SpecResult<PropertyDescriptor> {
        Ok(PropertyDescriptor {
            declared_type: required(&self.declared_type, "declared_type")?.clone(),
            name: required(&self.name, "name")?.clone(),
            capitalized_name: required(&self.capitalized_name, "capitalized_name")?.clone(),
            all_caps_name: required(&self.all_caps_name, "all_caps_name")?.clone(),
            getter_name: required(&self.getter_name, "getter_name")?.clone(),
            fully_checked_cast: *required(&self.fully_checked_cast, "fully_checked_cast")?,
            boxed_type: self.boxed_type.clone(),
            code_generator: self.code_generator.clone(),
        })
    }
}

fn required<'a, T>(value: &'a Option<T>, field: &str) -> SpecResult<&'a T> {
    value.as_ref().ok_or_else(|| SpecError::missing(ENTITY, field))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use valforge_core::PlainType;

    use super::*;
    use crate::codegen::PropertyCodeGenerator;

    #[derive(Debug, PartialEq, Eq, Hash)]
    struct Plain;

    impl PropertyCodeGenerator for Plain {
        fn strategy_name(&self) -> &str {
            "default"
        }
    }

    fn age_builder() -> PropertyDescriptorBuilder {
        let mut b = PropertyDescriptorBuilder::new();
        b.set_declared_type(TypeRef::new(PlainType::primitive("int")))
            .set_boxed_type(TypeRef::new(PlainType::new("java.lang.Integer")))
            .set_names(&PropertyNames::from_name("age", false))
            .set_fully_checked_cast(true);
        b
    }

    #[test]
    fn build_complete_descriptor() {
        let p = age_builder().build().unwrap();
        assert_eq!(p.declared_type().canonical_text(), "int");
        assert_eq!(p.boxed_type().unwrap().canonical_text(), "java.lang.Integer");
        assert_eq!(p.name(), "age");
        assert_eq!(p.capitalized_name(), "Age");
        assert_eq!(p.all_caps_name(), "AGE");
        assert_eq!(p.getter_name(), "getAge");
        assert!(p.is_fully_checked_cast());
        assert!(p.code_generator().is_none());
    }

    #[test]
    fn each_required_field_is_checked() {
        let fields = [
            "declared_type",
            "name",
            "capitalized_name",
            "all_caps_name",
            "getter_name",
            "fully_checked_cast",
        ];
        for field in fields {
            let mut b = age_builder();
            match field {
                "declared_type" => b.declared_type = None,
                "name" => b.name = None,
                "capitalized_name" => b.capitalized_name = None,
                "all_caps_name" => b.all_caps_name = None,
                "getter_name" => b.getter_name = None,
                _ => b.fully_checked_cast = None,
            }
            let err = b.build().unwrap_err();
            assert_eq!(err.missing_field(), Some(field));
        }
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let mut b = age_builder();
        b.set_boxed_type(None).set_code_generator(None);
        assert!(b.build().is_ok());
    }

    #[test]
    fn last_write_wins() {
        let mut b = age_builder();
        b.set_name("years").set_fully_checked_cast(false);
        let p = b.build().unwrap();
        assert_eq!(p.name(), "years");
        assert!(!p.is_fully_checked_cast());
    }

    #[test]
    fn failed_build_can_be_completed() {
        let mut b = age_builder();
        b.fully_checked_cast = None;
        assert!(b.build().is_err());
        b.set_fully_checked_cast(true);
        assert_eq!(b.build().unwrap(), age_builder().build().unwrap());
    }

    #[test]
    fn to_builder_round_trips() {
        let p = age_builder().build().unwrap();
        assert_eq!(p.to_builder().build().unwrap(), p);
    }

    #[test]
    fn code_generator_participates_in_equality() {
        let bare = age_builder().build().unwrap();
        let chosen = bare.with_code_generator(CodeGeneratorRef::new(Plain));
        assert_ne!(bare, chosen);
        assert_eq!(
            chosen,
            bare.with_code_generator(CodeGeneratorRef::new(Plain))
        );
        assert_eq!(chosen.code_generator().unwrap().strategy_name(), "default");
    }

    #[test]
    fn equal_descriptors_deduplicate_in_sets() {
        let set: HashSet<_> = [age_builder().build().unwrap(), age_builder().build().unwrap()]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn fingerprint_tracks_equality() {
        let a = age_builder().build().unwrap();
        let b = age_builder().build().unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());

        let mut renamed = age_builder();
        renamed.set_name("years");
        assert_ne!(a.fingerprint(), renamed.build().unwrap().fingerprint());
    }

    #[test]
    fn display_summary() {
        let text = age_builder().build().unwrap().to_string();
        assert!(text.starts_with(
            "PropertyDescriptor{declared_type=int, boxed_type=java.lang.Integer"
        ));
        assert!(text.contains("code_generator=none"));
        assert!(text.ends_with("fully_checked_cast=true}"));
    }
}
