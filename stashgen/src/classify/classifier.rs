//! Field type classification
//!
//! Classification runs in a fixed order and the first match wins:
//! 1. the exact-shape table, compared against the canonical type text
//! 2. the capability rules in [`CAPABILITY_RULES`], each a structural or assignability check
//!
//! Types parameterized with a wildcard never reach the capability rules.

use tracing::debug;

use super::TransferStrategy;
use crate::config::GeneratorConfig;
use crate::model::{TypeModel, TypeRef};

type CapabilityRule = fn(&Classifier<'_>, &TypeRef) -> bool;

/// Capability rules in precedence order
const CAPABILITY_RULES: [(TransferStrategy, CapabilityRule); 4] = [
    (TransferStrategy::StructuredTransferable, is_structured_transferable),
    (TransferStrategy::StructuredTransferableList, is_structured_transferable_list),
    (TransferStrategy::SparseStructuredTransferableMap, is_sparse_structured_transferable_map),
    (TransferStrategy::Serializable, is_serializable),
];

/// Maps declared field types to transfer strategies
pub struct Classifier<'a> {
    model:  &'a dyn TypeModel,
    config: &'a GeneratorConfig,
}

impl<'a> Classifier<'a> {
    /// Create a classifier over `model` using the platform names from `config`
    pub const fn new(model: &'a dyn TypeModel, config: &'a GeneratorConfig) -> Self {
        Self { model, config }
    }

    /// The strategy for `ty`, `None` when the type cannot be transferred
    pub fn classify(&self, ty: &TypeRef) -> Option<TransferStrategy> {
        let shape = ty.to_string();
        if let Some(strategy) = TransferStrategy::from_exact_shape(&shape) {
            debug!("'{shape}' matched exact shape -> {strategy}");
            return Some(strategy);
        }

        if contains_wildcard(ty) {
            debug!("'{shape}' is wildcard-parameterized, not classified");
            return None;
        }

        let strategy = CAPABILITY_RULES
            .iter()
            .find(|(_, rule)| rule(self, ty))
            .map(|(strategy, _)| *strategy);
        debug!("'{shape}' classified by capability -> {strategy:?}");
        strategy
    }
}

fn contains_wildcard(ty: &TypeRef) -> bool {
    match ty {
        TypeRef::Wildcard(_) => true,
        TypeRef::Array(component) => contains_wildcard(component),
        TypeRef::Declared { args, .. } => args.iter().any(contains_wildcard),
        TypeRef::Primitive(_) => false,
    }
}

fn is_structured_transferable(classifier: &Classifier<'_>, ty: &TypeRef) -> bool {
    classifier
        .model
        .is_assignable(ty, &classifier.config.structured_transferable)
}

/// List type whose single argument is exactly the structured transferable capability
fn is_structured_transferable_list(classifier: &Classifier<'_>, ty: &TypeRef) -> bool {
    let config = classifier.config;
    ty.erasure() == Some(&config.list_type)
        && matches!(
            ty.type_args(),
            [TypeRef::Declared { name, args }]
                if name == &config.structured_transferable && args.is_empty()
        )
}

/// Sparse map type whose single argument is a structured transferable type
fn is_sparse_structured_transferable_map(classifier: &Classifier<'_>, ty: &TypeRef) -> bool {
    let config = classifier.config;
    ty.erasure() == Some(&config.sparse_map_type)
        && matches!(
            ty.type_args(),
            [element @ TypeRef::Declared { .. }]
                if classifier.model.is_assignable(element, &config.structured_transferable)
        )
}

fn is_serializable(classifier: &Classifier<'_>, ty: &TypeRef) -> bool {
    classifier
        .model
        .is_assignable(ty, &classifier.config.serializable)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests")]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::test_support::{CountingModel, manifest_model};

    fn fixture() -> CountingModel {
        CountingModel::new(manifest_model(json!({
            "types": [
                {
                    "package": "com.example", "name": "Point",
                    "superclass": "java.lang.Object",
                    "interfaces": ["android.os.Parcelable"]
                },
                {
                    "package": "com.example", "name": "Token",
                    "superclass": "java.lang.Object",
                    "interfaces": ["java.io.Serializable"]
                },
                {
                    "package": "com.example", "name": "SerializablePoint",
                    "superclass": "com.example.Point",
                    "interfaces": ["java.io.Serializable"]
                },
                { "package": "com.example", "name": "Opaque", "superclass": "java.lang.Object" }
            ]
        })))
    }

    fn classify(model: &CountingModel, text: &str) -> Option<TransferStrategy> {
        let config = GeneratorConfig::default();
        Classifier::new(model, &config).classify(&TypeRef::parse(text).unwrap())
    }

    #[test]
    fn test_exact_table_wins_without_assignability_checks() {
        let model = fixture();
        for (shape, strategy) in TransferStrategy::EXACT_TABLE {
            assert_eq!(classify(&model, shape), Some(*strategy), "{shape}");
        }
        // Bundle is also Parcelable, the table entry must still win
        assert_eq!(
            classify(&model, "android.os.Bundle"),
            Some(TransferStrategy::Bundle)
        );
        assert_eq!(model.assignability_checks(), 0);
    }

    #[test]
    fn test_structured_transferable_capability() {
        let model = fixture();
        assert_eq!(
            classify(&model, "com.example.Point"),
            Some(TransferStrategy::StructuredTransferable)
        );
        // structured transferable takes precedence over serializable
        assert_eq!(
            classify(&model, "com.example.SerializablePoint"),
            Some(TransferStrategy::StructuredTransferable)
        );
    }

    #[test]
    fn test_structured_transferable_list_requires_exact_element() {
        let model = fixture();
        assert_eq!(
            classify(&model, "java.util.ArrayList<android.os.Parcelable>"),
            Some(TransferStrategy::StructuredTransferableList)
        );
        assert_eq!(
            classify(&model, "java.util.ArrayList<? extends android.os.Parcelable>"),
            None
        );
        // a concrete element type is not the list strategy, the list itself is serializable
        assert_eq!(
            classify(&model, "java.util.ArrayList<com.example.Point>"),
            Some(TransferStrategy::Serializable)
        );
    }

    #[test]
    fn test_sparse_structured_transferable_map() {
        let model = fixture();
        assert_eq!(
            classify(&model, "android.util.SparseArray<com.example.Point>"),
            Some(TransferStrategy::SparseStructuredTransferableMap)
        );
        assert_eq!(
            classify(&model, "android.util.SparseArray<android.os.Parcelable>"),
            Some(TransferStrategy::SparseStructuredTransferableMap)
        );
        assert_eq!(
            classify(&model, "android.util.SparseArray<com.example.Opaque>"),
            None
        );
    }

    #[test]
    fn test_serializable_and_unrecognized() {
        let model = fixture();
        assert_eq!(
            classify(&model, "com.example.Token"),
            Some(TransferStrategy::Serializable)
        );
        assert_eq!(
            classify(&model, "com.example.Token[]"),
            Some(TransferStrategy::Serializable)
        );
        assert_eq!(
            classify(&model, "java.util.Date"),
            Some(TransferStrategy::Serializable)
        );
        assert_eq!(classify(&model, "com.example.Opaque"), None);
        assert_eq!(classify(&model, "com.example.Missing"), None);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let model = fixture();
        for text in [
            "int",
            "com.example.Point",
            "java.util.ArrayList<android.os.Parcelable>",
            "com.example.Token",
            "com.example.Opaque",
        ] {
            let first = classify(&model, text);
            for _ in 0..3 {
                assert_eq!(classify(&model, text), first, "{text}");
            }
        }
    }
}
