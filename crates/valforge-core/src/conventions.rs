//! Generation conventions: how generated classes are named.
//!
//! Conventions are read from a `valforge.toml` document. Every field has a
//! default, so an empty document (or no document at all) yields the
//! standard layout:
//!
//! ```toml
//! builder_suffix = "_Builder"
//! value_class = "Value"
//! partial_class = "Partial"
//! property_enum = "Property"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::class::GeneratedClass;
use crate::error::{CoreError, CoreResult};
use crate::naming::is_identifier;

/// Naming conventions for the classes emitted per user type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationConventions {
    /// Appended to the user type's simple name to name the generated builder.
    #[serde(default = "default_builder_suffix")]
    pub builder_suffix: String,
    /// Simple name of the immutable value class nested in the builder.
    #[serde(default = "default_value_class")]
    pub value_class: String,
    /// Simple name of the partial value class nested in the builder.
    #[serde(default = "default_partial_class")]
    pub partial_class: String,
    /// Simple name of the property-identifier enum nested in the builder.
    #[serde(default = "default_property_enum")]
    pub property_enum: String,
}

fn default_builder_suffix() -> String {
    "_Builder".to_string()
}

fn default_value_class() -> String {
    "Value".to_string()
}

fn default_partial_class() -> String {
    "Partial".to_string()
}

fn default_property_enum() -> String {
    "Property".to_string()
}

impl Default for GenerationConventions {
    fn default() -> Self {
        Self {
            builder_suffix: default_builder_suffix(),
            value_class: default_value_class(),
            partial_class: default_partial_class(),
            property_enum: default_property_enum(),
        }
    }
}

impl GenerationConventions {
    /// Parse and validate conventions from a TOML document.
    pub fn from_toml_str(content: &str) -> CoreResult<Self> {
        let conventions: Self = toml::from_str(content)?;
        conventions.validate()?;
        Ok(conventions)
    }

    /// Load conventions from a file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CoreError::ConventionsRead {
            path: path.to_path_buf(),
            source,
        })?;
        let conventions = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), ?conventions, "loaded generation conventions");
        Ok(conventions)
    }

    /// Load conventions from `path` if it exists, otherwise use the defaults.
    pub fn load_or_default(path: &Path) -> CoreResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Check every configured name is usable and the nested names are distinct.
    pub fn validate(&self) -> CoreResult<()> {
        if self.builder_suffix.is_empty() {
            return Err(CoreError::InvalidConventions(
                "builder_suffix must not be empty".to_string(),
            ));
        }
        if !self
            .builder_suffix
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        {
            return Err(CoreError::InvalidConventions(format!(
                "builder_suffix `{}` contains characters not allowed in an identifier",
                self.builder_suffix
            )));
        }

        let nested = [
            ("value_class", &self.value_class),
            ("partial_class", &self.partial_class),
            ("property_enum", &self.property_enum),
        ];
        for (field, name) in nested {
            if !is_identifier(name) {
                return Err(CoreError::InvalidConventions(format!(
                    "{field} `{name}` is not a valid identifier"
                )));
            }
        }
        for (i, (field, name)) in nested.iter().enumerate() {
            if let Some((other, _)) = nested[i + 1..].iter().find(|(_, n)| n == name) {
                return Err(CoreError::InvalidConventions(format!(
                    "{field} and {other} both name `{name}`"
                )));
            }
        }
        Ok(())
    }
}

/// The generated builder and the three classes nested inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedClasses {
    pub builder: GeneratedClass,
    pub value: GeneratedClass,
    pub partial: GeneratedClass,
    pub property_enum: GeneratedClass,
}

impl GeneratedClasses {
    /// Name the generated classes for a user type.
    ///
    /// The value, partial and property-enum classes are always nested
    /// directly inside the builder. A nested class may not share the
    /// builder's simple name.
    pub fn derive(
        package: &str,
        declaring_simple_name: &str,
        conventions: &GenerationConventions,
    ) -> CoreResult<Self> {
        conventions.validate()?;
        let builder = GeneratedClass::top_level(
            package,
            format!("{declaring_simple_name}{}", conventions.builder_suffix),
        )?;
        let nested = [
            ("value_class", &conventions.value_class),
            ("partial_class", &conventions.partial_class),
            ("property_enum", &conventions.property_enum),
        ];
        if let Some((field, _)) = nested.iter().find(|(_, n)| *n == builder.simple_name()) {
            return Err(CoreError::InvalidConventions(format!(
                "{field} `{}` clashes with its enclosing builder",
                builder.simple_name()
            )));
        }
        Ok(Self {
            value: builder.nested(conventions.value_class.as_str())?,
            partial: builder.nested(conventions.partial_class.as_str())?,
            property_enum: builder.nested(conventions.property_enum.as_str())?,
            builder,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let conventions = GenerationConventions::from_toml_str("").unwrap();
        assert_eq!(conventions, GenerationConventions::default());
        assert_eq!(conventions.builder_suffix, "_Builder");
    }

    #[test]
    fn partial_override() {
        let conventions =
            GenerationConventions::from_toml_str("value_class = \"Immutable\"\n").unwrap();
        assert_eq!(conventions.value_class, "Immutable");
        assert_eq!(conventions.partial_class, "Partial");
    }

    #[test]
    fn unknown_field_rejected() {
        let err = GenerationConventions::from_toml_str("value_klass = \"X\"\n").unwrap_err();
        assert!(matches!(err, CoreError::ConventionsParse(_)));
    }

    #[test]
    fn colliding_names_rejected() {
        let err = GenerationConventions::from_toml_str(
            "value_class = \"Value\"\npartial_class = \"Value\"\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("value_class and partial_class"));
    }

    #[test]
    fn bad_suffix_rejected() {
        let conventions = GenerationConventions {
            builder_suffix: "-Builder".into(),
            ..GenerationConventions::default()
        };
        assert!(matches!(
            conventions.validate(),
            Err(CoreError::InvalidConventions(_))
        ));
    }

    #[test]
    fn empty_suffix_rejected() {
        let err = GenerationConventions::from_toml_str("builder_suffix = \"\"\n").unwrap_err();
        assert!(matches!(err, CoreError::InvalidConventions(_)));

        let conventions = GenerationConventions {
            builder_suffix: String::new(),
            ..GenerationConventions::default()
        };
        assert!(GeneratedClasses::derive("com.example", "Person", &conventions).is_err());
    }

    #[test]
    fn nested_name_matching_builder_rejected() {
        let conventions =
            GenerationConventions::from_toml_str("value_class = \"Person_Builder\"\n").unwrap();
        let err = GeneratedClasses::derive("com.example", "Person", &conventions).unwrap_err();
        assert!(err.to_string().contains("value_class `Person_Builder`"));

        // Only the type whose builder it would shadow is affected.
        let classes = GeneratedClasses::derive("com.example", "Address", &conventions).unwrap();
        assert_ne!(classes.value.simple_name(), classes.builder.simple_name());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "builder_suffix = \"Builder\"").unwrap();
        let conventions = GenerationConventions::load(file.path()).unwrap();
        assert_eq!(conventions.builder_suffix, "Builder");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("valforge.toml");
        let conventions = GenerationConventions::load_or_default(&path).unwrap();
        assert_eq!(conventions, GenerationConventions::default());
        assert!(matches!(
            GenerationConventions::load(&path),
            Err(CoreError::ConventionsRead { .. })
        ));
    }

    #[test]
    fn derived_classes_are_nested_in_builder() {
        let classes =
            GeneratedClasses::derive("com.example", "Person", &GenerationConventions::default())
                .unwrap();
        assert_eq!(classes.builder.qualified_name(), "com.example.Person_Builder");
        assert_eq!(
            classes.property_enum.qualified_name(),
            "com.example.Person_Builder.Property"
        );
        for nested in [&classes.value, &classes.partial, &classes.property_enum] {
            assert!(nested.is_nested_in(&classes.builder));
        }
    }
}
