//! The type introspection collaborator
//!
//! The engine never looks at source code itself. Everything it knows about the program
//! being processed comes through [`TypeModel`], which the host toolchain implements.
//! [`super::ManifestModel`] is the in-memory implementation used by the CLI and the tests.

use super::{FieldElement, TypeElement, TypeName, TypeRef};

/// Read-only view of the program's types for one generation round
pub trait TypeModel {
    /// Every field carrying the transfer marker, in declaration order
    fn marked_fields(&self) -> Vec<FieldElement>;

    /// Declaration metadata for `name`, `None` when the type is unknown
    fn type_element(&self, name: &TypeName) -> Option<TypeElement>;

    /// Erasure of the direct supertype, `None` at the top of the type system
    fn superclass(&self, name: &TypeName) -> Option<TypeName>;

    /// Whether a value of type `ty` can be assigned to the erasure `target`
    fn is_assignable(&self, ty: &TypeRef, target: &TypeName) -> bool;

    /// Whether `name` itself declares at least one marked field
    fn declares_marked_field(&self, name: &TypeName) -> bool;
}
