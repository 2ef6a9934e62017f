//! In-memory type model loaded from a JSON manifest
//!
//! The manifest lists the program's types with their supertypes, modifiers and fields.
//! Unless disabled, a platform prelude describing the well-known library types (strings,
//! boxed primitives, collections, the persistence and view types) is loaded underneath the
//! manifest so that assignability questions about them can be answered.

use std::collections::{HashMap, HashSet, VecDeque};
use std::path::Path;
use std::sync::LazyLock;

use error_stack::{Report, ResultExt};
use serde::{Deserialize, Serialize};

use super::{FieldElement, Modifier, Modifiers, TypeElement, TypeModel, TypeName, TypeRef};
use crate::error::{Error, Result};

/// Erasures every array type is assignable to
const ARRAY_SUPERTYPES: [&str; 3] = ["java.lang.Object", "java.io.Serializable", "java.lang.Cloneable"];

/// Top-level manifest document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Load the platform prelude underneath the declared types
    #[serde(default = "default_prelude")]
    pub prelude: bool,
    /// Program types, in declaration order
    #[serde(default)]
    pub types:   Vec<TypeDecl>,
}

const fn default_prelude() -> bool {
    true
}

/// One declared type
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDecl {
    /// Package, may be omitted for nested types (inherited from the enclosing type)
    #[serde(default)]
    pub package:    String,
    /// Simple name
    pub name:       String,
    /// Qualified name of the enclosing type for nested declarations
    #[serde(default)]
    pub enclosing:  Option<TypeName>,
    /// Direct supertype
    #[serde(default)]
    pub superclass: Option<TypeRef>,
    /// Implemented interfaces
    #[serde(default)]
    pub interfaces: Vec<TypeRef>,
    /// Declared modifiers
    #[serde(default)]
    pub modifiers:  Modifiers,
    /// Declared fields
    #[serde(default)]
    pub fields:     Vec<FieldDecl>,
}

impl TypeDecl {
    fn platform(qualified: &str, superclass: Option<&str>, interfaces: &[&str]) -> Self {
        let name = TypeName::from(qualified);
        Self {
            package:    name.qualifier().to_string(),
            name:       name.simple_name().to_string(),
            enclosing:  None,
            superclass: superclass.map(TypeRef::declared),
            interfaces: interfaces.iter().copied().map(TypeRef::declared).collect(),
            modifiers:  Modifiers::from([Modifier::Public]),
            fields:     Vec::new(),
        }
    }

    /// Qualified name derived from the enclosing type or the package
    pub fn qualified_name(&self) -> TypeName {
        self.enclosing.as_ref().map_or_else(
            || TypeName::from(self.package.as_str()).child(&self.name),
            |enclosing| enclosing.child(&self.name),
        )
    }
}

/// One declared field
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDecl {
    /// Simple name
    pub name:      String,
    /// Declared type
    #[serde(rename = "type")]
    pub ty:        TypeRef,
    /// Declared modifiers
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Carries the transfer marker
    #[serde(default)]
    pub marked:    bool,
}

/// Well-known platform types, loaded underneath every manifest with `prelude: true`
static PLATFORM_PRELUDE: LazyLock<Vec<TypeDecl>> = LazyLock::new(|| {
    const OBJECT: &str = "java.lang.Object";
    const SERIALIZABLE: &str = "java.io.Serializable";
    const CLONEABLE: &str = "java.lang.Cloneable";
    const PARCELABLE: &str = "android.os.Parcelable";

    let mut prelude = vec![
        TypeDecl::platform(OBJECT, None, &[]),
        TypeDecl::platform(SERIALIZABLE, None, &[]),
        TypeDecl::platform(CLONEABLE, None, &[]),
        TypeDecl::platform("java.lang.CharSequence", None, &[]),
        TypeDecl::platform("java.lang.String", Some(OBJECT), &[SERIALIZABLE, "java.lang.CharSequence"]),
        TypeDecl::platform("java.lang.Number", Some(OBJECT), &[SERIALIZABLE]),
        TypeDecl::platform("java.lang.Boolean", Some(OBJECT), &[SERIALIZABLE]),
        TypeDecl::platform("java.lang.Character", Some(OBJECT), &[SERIALIZABLE]),
        TypeDecl::platform("java.lang.Enum", Some(OBJECT), &[SERIALIZABLE]),
        TypeDecl::platform("java.util.List", None, &[]),
        TypeDecl::platform("java.util.ArrayList", Some(OBJECT), &["java.util.List", SERIALIZABLE, CLONEABLE]),
        TypeDecl::platform("java.util.LinkedList", Some(OBJECT), &["java.util.List", SERIALIZABLE, CLONEABLE]),
        TypeDecl::platform("java.util.HashMap", Some(OBJECT), &[SERIALIZABLE, CLONEABLE]),
        TypeDecl::platform("java.util.Date", Some(OBJECT), &[SERIALIZABLE, CLONEABLE]),
        TypeDecl::platform(PARCELABLE, None, &[]),
        TypeDecl::platform("android.os.Bundle", Some(OBJECT), &[PARCELABLE, CLONEABLE]),
        TypeDecl::platform("android.util.SparseArray", Some(OBJECT), &[CLONEABLE]),
        TypeDecl::platform("android.content.Context", Some(OBJECT), &[]),
        TypeDecl::platform("android.app.Activity", Some("android.content.Context"), &[]),
        TypeDecl::platform("android.app.Fragment", Some(OBJECT), &[]),
        TypeDecl::platform("androidx.fragment.app.Fragment", Some(OBJECT), &[]),
        TypeDecl::platform("android.view.View", Some(OBJECT), &[]),
        TypeDecl::platform("android.view.ViewGroup", Some("android.view.View"), &[]),
        TypeDecl::platform("android.widget.FrameLayout", Some("android.view.ViewGroup"), &[]),
        TypeDecl::platform("android.widget.TextView", Some("android.view.View"), &[]),
    ];

    for boxed in ["Byte", "Short", "Integer", "Long", "Float", "Double"] {
        prelude.push(TypeDecl::platform(
            &format!("java.lang.{boxed}"),
            Some("java.lang.Number"),
            &[],
        ));
    }

    prelude
});

impl Manifest {
    /// Read a manifest from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|error| Report::new(Error::io_failed("read manifest", path, error)))?;
        serde_json::from_str(&text)
            .change_context(Error::Manifest(format!("malformed manifest {}", path.display())))
    }
}

/// [`TypeModel`] backed by a [`Manifest`]
#[derive(Debug, Clone)]
pub struct ManifestModel {
    types: HashMap<TypeName, TypeDecl>,
    /// Manifest (not prelude) types in declaration order
    order: Vec<TypeName>,
}

impl ManifestModel {
    /// Index a manifest, rejecting malformed names, duplicate names, unknown enclosing types,
    /// supertypes that are not declared types and cyclic superclass chains
    pub fn from_manifest(manifest: Manifest) -> Result<Self> {
        let mut types = HashMap::new();
        if manifest.prelude {
            for decl in PLATFORM_PRELUDE.iter() {
                types.insert(decl.qualified_name(), decl.clone());
            }
        }

        let mut order = Vec::with_capacity(manifest.types.len());
        let mut seen = HashSet::new();
        for decl in manifest.types {
            let name = decl.qualified_name();
            validate_names(&decl)?;
            if !seen.insert(name.clone()) {
                return Err(Report::new(Error::Manifest(format!(
                    "type '{name}' is declared more than once"
                ))));
            }
            if let Some(superclass) = &decl.superclass
                && superclass.erasure().is_none()
            {
                return Err(Report::new(Error::Manifest(format!(
                    "supertype '{superclass}' of '{name}' is not a declared type"
                ))));
            }
            // manifest declarations shadow prelude entries of the same name
            types.insert(name.clone(), decl);
            order.push(name);
        }

        for name in &order {
            if let Some(enclosing) = types.get(name).and_then(|decl| decl.enclosing.as_ref())
                && !types.contains_key(enclosing)
            {
                return Err(Report::new(Error::Manifest(format!(
                    "enclosing type '{enclosing}' of '{name}' is not declared"
                ))));
            }
        }

        for name in &order {
            check_superclass_chain(&types, name)?;
        }

        tracing::debug!(
            "Indexed {} manifest types ({} total with prelude)",
            order.len(),
            types.len()
        );
        Ok(Self { types, order })
    }

    /// Load and index a manifest file
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_manifest(Manifest::load(path)?)
    }

    /// Package of a declaration, nested types inherit it from their outermost type
    fn package_of(&self, decl: &TypeDecl) -> String {
        let mut current = decl;
        let mut visited = HashSet::new();
        loop {
            if !current.package.is_empty() {
                return current.package.clone();
            }
            let Some(enclosing) = current.enclosing.as_ref() else {
                return String::new();
            };
            if !visited.insert(enclosing.clone()) {
                return String::new();
            }
            match self.types.get(enclosing) {
                Some(outer) => current = outer,
                None => return String::new(),
            }
        }
    }

    /// Direct supertypes of a declared type: superclass first, then interfaces
    fn direct_supertypes<'a>(&'a self, name: &TypeName) -> impl Iterator<Item = &'a TypeName> + 'a {
        self.types
            .get(name)
            .into_iter()
            .flat_map(|decl| decl.superclass.iter().chain(decl.interfaces.iter()))
            .filter_map(TypeRef::erasure)
    }
}

/// Whether `text` is a source identifier: letters, digits, `_` and `$`, not starting with a digit
fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Names end up in generated source and output paths, so only identifiers are accepted
fn validate_names(decl: &TypeDecl) -> Result<()> {
    let malformed = |what: &str, text: &str| {
        Report::new(Error::Manifest(format!("{what} '{text}' is not a valid identifier")))
    };

    if !decl.package.is_empty() && !decl.package.split('.').all(is_identifier) {
        return Err(malformed("package", &decl.package));
    }
    if !is_identifier(&decl.name) {
        return Err(malformed("type name", &decl.name));
    }
    if let Some(field) = decl.fields.iter().find(|field| !is_identifier(&field.name)) {
        return Err(malformed("field name", &field.name));
    }
    Ok(())
}

/// Follow the superclass chain of `name` and reject it if it comes back to a visited type
fn check_superclass_chain(types: &HashMap<TypeName, TypeDecl>, name: &TypeName) -> Result<()> {
    let mut visited = HashSet::from([name.clone()]);
    let mut current = name;
    while let Some(superclass) = types
        .get(current)
        .and_then(|decl| decl.superclass.as_ref())
        .and_then(TypeRef::erasure)
    {
        if !visited.insert(superclass.clone()) {
            return Err(Report::new(Error::Manifest(format!(
                "superclass chain of '{name}' is cyclic at '{superclass}'"
            ))));
        }
        current = superclass;
    }
    Ok(())
}

impl TypeModel for ManifestModel {
    fn marked_fields(&self) -> Vec<FieldElement> {
        self.order
            .iter()
            .filter_map(|name| self.types.get(name).map(|decl| (name, decl)))
            .flat_map(|(name, decl)| {
                decl.fields
                    .iter()
                    .filter(|field| field.marked)
                    .map(move |field| FieldElement {
                        name:      field.name.clone(),
                        ty:        field.ty.clone(),
                        modifiers: field.modifiers.clone(),
                        enclosing: name.clone(),
                    })
            })
            .collect()
    }

    fn type_element(&self, name: &TypeName) -> Option<TypeElement> {
        self.types.get(name).map(|decl| TypeElement {
            name:        name.clone(),
            package:     self.package_of(decl),
            simple_name: decl.name.clone(),
            enclosing:   decl.enclosing.clone(),
            modifiers:   decl.modifiers.clone(),
        })
    }

    fn superclass(&self, name: &TypeName) -> Option<TypeName> {
        self.types
            .get(name)
            .and_then(|decl| decl.superclass.as_ref())
            .and_then(TypeRef::erasure)
            .cloned()
    }

    fn is_assignable(&self, ty: &TypeRef, target: &TypeName) -> bool {
        match ty {
            TypeRef::Primitive(_) | TypeRef::Wildcard(_) => false,
            TypeRef::Array(_) => ARRAY_SUPERTYPES.contains(&target.as_str()),
            TypeRef::Declared { name, .. } => {
                let mut visited = HashSet::new();
                let mut queue = VecDeque::from([name.clone()]);
                while let Some(current) = queue.pop_front() {
                    if &current == target {
                        return true;
                    }
                    if !visited.insert(current.clone()) {
                        continue;
                    }
                    queue.extend(self.direct_supertypes(&current).cloned());
                }
                false
            }
        }
    }

    fn declares_marked_field(&self, name: &TypeName) -> bool {
        self.types
            .get(name)
            .is_some_and(|decl| decl.fields.iter().any(|field| field.marked))
    }
}
