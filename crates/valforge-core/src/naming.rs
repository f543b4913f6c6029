//! Property naming conventions.
//!
//! A property `myProperty` is read through `getMyProperty()` (or
//! `isMyProperty()` for booleans), is identified in the generated property
//! enum as `MY_PROPERTY`, and appears capitalized as `MyProperty` in setter
//! and mutator names.

use serde::Serialize;

/// Prefix of a conventional getter.
pub const GET_PREFIX: &str = "get";

/// Prefix of a conventional boolean getter.
pub const IS_PREFIX: &str = "is";

/// Returns true if `name` is a non-empty identifier (letters, digits, `_`, `$`,
/// not starting with a digit).
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Upper-case the first character: `myProperty` becomes `MyProperty`.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower-case the first character: `MyProperty` becomes `myProperty`.
///
/// A leading acronym stays as-is (`URL` remains `URL`), matching bean
/// introspection rules.
pub fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    if chars.clone().next().is_some_and(char::is_uppercase) && first.is_uppercase() {
        return name.to_string();
    }
    first.to_lowercase().chain(chars).collect()
}

/// Convert camelCase to UPPER_SNAKE: `myURLProperty` becomes `MY_URL_PROPERTY`.
pub fn to_all_caps(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower)
            {
                out.push('_');
            }
        }
        out.extend(c.to_uppercase());
    }
    out
}

/// Conventional getter for a property: `getName` or, for booleans, `isName`.
pub fn getter_name(name: &str, boolean: bool) -> String {
    let prefix = if boolean { IS_PREFIX } else { GET_PREFIX };
    format!("{prefix}{}", capitalize(name))
}

/// The four name variants stored on every property descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PropertyNames {
    /// `myProperty`
    pub name: String,
    /// `MyProperty`
    pub capitalized_name: String,
    /// `MY_PROPERTY`
    pub all_caps_name: String,
    /// `getMyProperty` or `isMyProperty`
    pub getter_name: String,
}

impl PropertyNames {
    /// Derive every variant from a property name.
    pub fn from_name(name: &str, boolean: bool) -> Self {
        Self {
            name: name.to_string(),
            capitalized_name: capitalize(name),
            all_caps_name: to_all_caps(name),
            getter_name: getter_name(name, boolean),
        }
    }

    /// Derive every variant from a getter such as `getFooBar` or `isEnabled`.
    ///
    /// Returns `None` if the method does not follow the getter convention.
    pub fn from_getter(getter: &str) -> Option<Self> {
        let stem = getter
            .strip_prefix(GET_PREFIX)
            .or_else(|| getter.strip_prefix(IS_PREFIX))?;
        if !stem.chars().next().is_some_and(char::is_uppercase) || !is_identifier(stem) {
            return None;
        }
        let name = decapitalize(stem);
        Some(Self {
            capitalized_name: capitalize(&name),
            all_caps_name: to_all_caps(&name),
            getter_name: getter.to_string(),
            name,
        })
    }
}
