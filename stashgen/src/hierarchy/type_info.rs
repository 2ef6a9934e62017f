use serde::Serialize;

use crate::model::{Modifiers, TypeName};

/// Metadata for one type participating in generation, computed once per round
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeInfo {
    /// Qualified name of the type
    pub name:            TypeName,
    /// Package, empty for the default package
    pub package:         String,
    /// Declared simple name
    pub simple_name:     String,
    /// Nested names joined with `$`, outermost first
    pub flattened_name:  String,
    /// Name as written in source, used as the artifact's type bound
    pub source_name:     String,
    /// Assignable to the platform's renderable base type
    pub renderable:      bool,
    /// Artifact of the nearest marked ancestor
    pub parent_artifact: Option<TypeName>,
    /// Qualified name of this type's own artifact
    pub artifact:        TypeName,
    /// Declared modifiers of the type
    #[serde(skip)]
    pub modifiers:       Modifiers,
}
