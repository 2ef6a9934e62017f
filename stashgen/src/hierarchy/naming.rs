//! Artifact naming
//!
//! An artifact is named `<package>.<Flattened><suffix>` where the flattened name joins the
//! simple names of the type and its enclosing types with `$`, outermost first. Two distinct
//! types therefore never share an artifact name, and the name doubles as the key prefix for
//! every field the artifact stores.

use std::collections::HashSet;

use crate::model::{TypeModel, TypeName};

/// Package and flattened nested name of a type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeIdentity {
    /// Package, empty for the default package
    pub package:        String,
    /// Declared simple name
    pub simple_name:    String,
    /// Simple names of the type and its enclosing types joined with `$`
    pub flattened_name: String,
}

impl TypeIdentity {
    /// Describe `name` through the model, falling back to its textual segments when the
    /// model has no declaration for it
    pub fn of(model: &dyn TypeModel, name: &TypeName) -> Self {
        let Some(element) = model.type_element(name) else {
            return Self {
                package:        name.qualifier().to_string(),
                simple_name:    name.simple_name().to_string(),
                flattened_name: name.simple_name().to_string(),
            };
        };

        let mut segments = vec![element.simple_name.clone()];
        let mut visited = HashSet::from([name.clone()]);
        let mut enclosing = element.enclosing.clone();
        while let Some(outer) = enclosing {
            if !visited.insert(outer.clone()) {
                break;
            }
            match model.type_element(&outer) {
                Some(outer_element) => {
                    segments.push(outer_element.simple_name);
                    enclosing = outer_element.enclosing;
                }
                None => {
                    segments.push(outer.simple_name().to_string());
                    enclosing = None;
                }
            }
        }
        segments.reverse();

        Self {
            package:        element.package,
            simple_name:    element.simple_name,
            flattened_name: segments.join("$"),
        }
    }

    /// Qualified artifact name for this type
    pub fn artifact_name(&self, suffix: &str) -> TypeName {
        TypeName::from(self.package.as_str()).child(&format!("{}{suffix}", self.flattened_name))
    }

    /// Name of the type as written in source: nested segments joined with `.`
    pub fn source_name(&self) -> String {
        let nested = self.flattened_name.replace('$', ".");
        if self.package.is_empty() {
            nested
        } else {
            format!("{}.{nested}", self.package)
        }
    }
}
