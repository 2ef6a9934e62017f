//! Program elements handed to the engine by the type introspection service

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum::Display;

use super::{TypeName, TypeRef};

/// Declaration modifier as reported by the host toolchain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Modifier {
    /// `abstract`
    Abstract,
    /// `final`, a marked field cannot carry it
    Final,
    /// `private`, neither a marked field nor its enclosing type can carry it
    Private,
    /// `protected`
    Protected,
    /// `public`
    Public,
    /// `static`, a marked field cannot carry it
    Static,
    /// `transient`
    Transient,
    /// `volatile`
    Volatile,
}

/// The modifier set of one declaration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Modifiers(BTreeSet<Modifier>);

impl Modifiers {
    /// Whether `modifier` is present
    pub fn contains(&self, modifier: Modifier) -> bool {
        self.0.contains(&modifier)
    }

}

impl FromIterator<Modifier> for Modifiers {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[Modifier; N]> for Modifiers {
    fn from(modifiers: [Modifier; N]) -> Self {
        modifiers.into_iter().collect()
    }
}

/// A type declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeElement {
    /// Canonical qualified name, nested types include their enclosing type names
    pub name:        TypeName,
    /// Package or namespace, empty for the default package
    pub package:     String,
    /// Declared simple name
    pub simple_name: String,
    /// Enclosing type for nested declarations
    pub enclosing:   Option<TypeName>,
    /// Declared modifiers
    pub modifiers:   Modifiers,
}

/// A field carrying the transfer marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldElement {
    /// Simple field name
    pub name:      String,
    /// Declared field type
    pub ty:        TypeRef,
    /// Declared modifiers
    pub modifiers: Modifiers,
    /// The type that declares the field
    pub enclosing: TypeName,
}
