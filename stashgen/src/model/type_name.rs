//! A newtype wrapper for qualified type names used throughout the generator
//!
//! `TypeName` holds a canonical, dot-separated qualified name such as
//! `com.example.MainActivity` or `com.example.Outer.Inner`. It is the identity used
//! by the round cache and the key for grouping fields by enclosing type.

use serde::{Deserialize, Serialize};

/// A newtype wrapper for qualified type names used as `HashMap` keys
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    /// Get the underlying string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the simple name (last segment after `.`)
    /// For example: `com.example.Outer.Inner` returns `Inner`
    pub fn simple_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    /// Everything before the last `.`, empty for unqualified names
    pub fn qualifier(&self) -> &str {
        self.0.rfind('.').map_or("", |pos| &self.0[..pos])
    }

    /// Append a nested or member segment: `Outer` + `Inner` -> `Outer.Inner`
    pub fn child(&self, segment: &str) -> Self {
        if self.0.is_empty() {
            Self(segment.to_string())
        } else {
            Self(format!("{}.{segment}", self.0))
        }
    }
}

impl From<&str> for TypeName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TypeName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&String> for TypeName {
    fn from(s: &String) -> Self {
        Self(s.clone())
    }
}

impl From<TypeName> for String {
    fn from(type_name: TypeName) -> Self {
        type_name.0
    }
}

impl std::fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for TypeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_segments() {
        let name = TypeName::from("com.example.Outer.Inner");
        assert_eq!(name.simple_name(), "Inner");
        assert_eq!(name.qualifier(), "com.example.Outer");

        let bare = TypeName::from("Widget");
        assert_eq!(bare.simple_name(), "Widget");
        assert_eq!(bare.qualifier(), "");
    }

    #[test]
    fn test_child() {
        assert_eq!(
            TypeName::from("com.example").child("Outer").as_str(),
            "com.example.Outer"
        );
        assert_eq!(TypeName::default().child("Outer").as_str(), "Outer");
    }
}
