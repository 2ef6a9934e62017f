//! Program model consumed by the generator
//!
//! This module holds the value types describing the program being processed
//! (qualified names, semantic type descriptors, declarations) and the [`TypeModel`]
//! trait through which the host toolchain answers structural questions about them.

mod element;
mod introspection;
mod manifest;
mod type_name;
mod type_ref;

pub use element::{FieldElement, Modifier, Modifiers, TypeElement};
pub use introspection::TypeModel;
pub use manifest::{FieldDecl, Manifest, ManifestModel, TypeDecl};
pub use type_name::TypeName;
pub use type_ref::{PRIMITIVES, TypeRef, WildcardBound};
