//! Validation and classification of the round's marked fields

use std::collections::HashSet;

use tracing::{debug, warn};

use super::CollectedField;
use crate::classify::Classifier;
use crate::config::GeneratorConfig;
use crate::diagnostics::{Diagnostic, Diagnostics, ElementRef, ValidationError};
use crate::hierarchy::{HierarchyResolver, RoundCache};
use crate::model::{FieldElement, Modifier, TypeModel, TypeName};

/// Modifiers a marked field must not carry
const FORBIDDEN_FIELD_MODIFIERS: [Modifier; 3] = [Modifier::Private, Modifier::Static, Modifier::Final];

/// Turns raw marked elements into [`CollectedField`]s, reporting problems as it goes
pub struct FieldCollector<'a> {
    model:      &'a dyn TypeModel,
    classifier: Classifier<'a>,
    resolver:   HierarchyResolver<'a>,
}

impl<'a> FieldCollector<'a> {
    /// Create a collector classifying and resolving through `model`
    pub const fn new(model: &'a dyn TypeModel, config: &'a GeneratorConfig) -> Self {
        Self {
            model,
            classifier: Classifier::new(model, config),
            resolver: HierarchyResolver::new(model, config),
        }
    }

    /// Validate and classify every marked field in the model, in declaration order
    pub fn collect(
        &self,
        cache: &mut RoundCache,
        diagnostics: &mut dyn Diagnostics,
    ) -> Vec<CollectedField> {
        let mut checked_types = HashSet::new();

        self.model
            .marked_fields()
            .into_iter()
            .map(|field| {
                if checked_types.insert(field.enclosing.clone()) {
                    self.check_enclosing_type(&field.enclosing, diagnostics);
                }
                self.collect_field(field, cache, diagnostics)
            })
            .collect()
    }

    fn collect_field(
        &self,
        field: FieldElement,
        cache: &mut RoundCache,
        diagnostics: &mut dyn Diagnostics,
    ) -> CollectedField {
        let mut modifiers_valid = true;
        for modifier in FORBIDDEN_FIELD_MODIFIERS {
            if field.modifiers.contains(modifier) {
                modifiers_valid = false;
                diagnostics.report(Diagnostic::new(
                    field_ref(&field),
                    ValidationError::InvalidFieldModifier {
                        field: field.name.clone(),
                        owner: field.enclosing.clone(),
                        modifier,
                    },
                ));
            }
        }

        let strategy = self.classifier.classify(&field.ty);
        if strategy.is_none() {
            diagnostics.report(Diagnostic::new(
                field_ref(&field),
                ValidationError::UnrecognizedFieldType {
                    field: field.name.clone(),
                    owner: field.enclosing.clone(),
                    ty:    field.ty.clone(),
                },
            ));
        }

        let owner = self.resolver.type_info(&field.enclosing, cache);
        debug!(
            "Collected '{}.{}': strategy={strategy:?}, modifiers_valid={modifiers_valid}",
            field.enclosing, field.name
        );

        CollectedField {
            name: field.name,
            ty: field.ty,
            strategy,
            owner,
            modifiers_valid,
        }
    }

    fn check_enclosing_type(&self, name: &TypeName, diagnostics: &mut dyn Diagnostics) {
        let Some(element) = self.model.type_element(name) else {
            warn!("Enclosing type '{name}' is unknown to the type model");
            return;
        };
        if element.modifiers.contains(Modifier::Private) {
            diagnostics.report(Diagnostic::new(
                ElementRef::Type { name: name.clone() },
                ValidationError::InaccessibleEnclosingType {
                    type_name: name.clone(),
                },
            ));
        }
    }
}

fn field_ref(field: &FieldElement) -> ElementRef {
    ElementRef::Field {
        owner: field.enclosing.clone(),
        name:  field.name.clone(),
    }
}
