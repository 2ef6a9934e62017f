//! Shared fixtures for unit tests

use std::cell::Cell;

use crate::model::{
    FieldElement, Manifest, ManifestModel, TypeElement, TypeModel, TypeName, TypeRef,
};

/// Build a [`ManifestModel`] from an inline JSON manifest
#[allow(clippy::expect_used, reason = "test fixture")]
pub fn manifest_model(value: serde_json::Value) -> ManifestModel {
    let manifest: Manifest = serde_json::from_value(value).expect("fixture manifest parses");
    ManifestModel::from_manifest(manifest).expect("fixture manifest is consistent")
}

/// Wraps a model and counts the structural queries made against it
pub struct CountingModel {
    inner:                 ManifestModel,
    superclass_calls:      Cell<usize>,
    assignability_checks:  Cell<usize>,
    marked_field_inspects: Cell<usize>,
}

impl CountingModel {
    pub fn new(inner: ManifestModel) -> Self {
        Self {
            inner,
            superclass_calls: Cell::new(0),
            assignability_checks: Cell::new(0),
            marked_field_inspects: Cell::new(0),
        }
    }

    pub fn superclass_calls(&self) -> usize {
        self.superclass_calls.get()
    }

    pub fn assignability_checks(&self) -> usize {
        self.assignability_checks.get()
    }

    pub fn marked_field_inspections(&self) -> usize {
        self.marked_field_inspects.get()
    }
}

impl TypeModel for CountingModel {
    fn marked_fields(&self) -> Vec<FieldElement> {
        self.inner.marked_fields()
    }

    fn type_element(&self, name: &TypeName) -> Option<TypeElement> {
        self.inner.type_element(name)
    }

    fn superclass(&self, name: &TypeName) -> Option<TypeName> {
        self.superclass_calls.set(self.superclass_calls.get() + 1);
        self.inner.superclass(name)
    }

    fn is_assignable(&self, ty: &TypeRef, target: &TypeName) -> bool {
        self.assignability_checks
            .set(self.assignability_checks.get() + 1);
        self.inner.is_assignable(ty, target)
    }

    fn declares_marked_field(&self, name: &TypeName) -> bool {
        self.marked_field_inspects
            .set(self.marked_field_inspects.get() + 1);
        self.inner.declares_marked_field(name)
    }
}
