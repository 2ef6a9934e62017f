//! The diagnostics collaborator
//!
//! Validation problems with the user's marked fields never abort a round. Each one is
//! reported against the offending element and the round moves on, so a single invocation
//! surfaces every problem at once.

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::model::{Modifier, TypeName, TypeRef};

/// A problem with one marked field or its enclosing type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A marked field carries `private`, `static` or `final`
    #[error("field '{field}' in '{owner}' must not be {modifier}")]
    InvalidFieldModifier {
        /// Field name
        field:    String,
        /// Declaring type
        owner:    TypeName,
        /// The offending modifier
        modifier: Modifier,
    },

    /// A type holding marked fields cannot be referenced by its generated artifact
    #[error("type '{type_name}' holds marked fields and must not be private")]
    InaccessibleEnclosingType {
        /// The inaccessible type
        type_name: TypeName,
    },

    /// No transfer strategy applies to a marked field's type
    #[error("field '{field}' in '{owner}' has type '{ty}' which cannot be stored in the container")]
    UnrecognizedFieldType {
        /// Field name
        field: String,
        /// Declaring type
        owner: TypeName,
        /// The unrecognized declared type
        ty:    TypeRef,
    },
}

/// The element a diagnostic is tagged to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementRef {
    /// A field, named by its declaring type and simple name
    Field {
        /// Declaring type
        owner: TypeName,
        /// Field name
        name:  String,
    },
    /// A type declaration
    Type {
        /// Qualified type name
        name: TypeName,
    },
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field { owner, name } => write!(f, "{owner}.{name}"),
            Self::Type { name } => write!(f, "{name}"),
        }
    }
}

/// One reported problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Where the problem is
    pub element: ElementRef,
    /// What the problem is
    pub error:   ValidationError,
}

impl Diagnostic {
    /// Tag `error` to `element`
    pub const fn new(element: ElementRef, error: ValidationError) -> Self {
        Self { element, error }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error: {}: {}", self.element, self.error)
    }
}

/// Receives diagnostics during a round
pub trait Diagnostics {
    /// Report an error against one element, generation continues
    fn report(&mut self, diagnostic: Diagnostic);

    /// Number of errors reported so far
    fn error_count(&self) -> usize;
}

/// [`Diagnostics`] that keeps every report in memory
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    reported: Vec<Diagnostic>,
}

impl CollectingDiagnostics {
    /// An empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Every diagnostic in report order
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.reported
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        error!("{diagnostic}");
        self.reported.push(diagnostic);
    }

    fn error_count(&self) -> usize {
        self.reported.len()
    }
}
