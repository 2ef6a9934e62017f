use itertools::Itertools;
use serde::Serialize;

use super::CollectedField;
use crate::hierarchy::TypeInfo;

/// The collected fields of one enclosing type, producing exactly one artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationGroup {
    /// The enclosing type shared by every field
    pub info:   TypeInfo,
    /// Every collected field of the type, valid or not, in declaration order
    pub fields: Vec<CollectedField>,
}

impl GenerationGroup {
    /// Fields that generated statements reference, in declaration order
    pub fn emitted_fields(&self) -> impl Iterator<Item = &CollectedField> {
        self.fields.iter().filter(|field| field.is_valid())
    }
}

/// Group fields by enclosing type, ordered by qualified type name
///
/// The sort is stable, so fields keep their declaration order inside a group.
pub fn group_fields(fields: Vec<CollectedField>) -> Vec<GenerationGroup> {
    let sorted = fields
        .into_iter()
        .sorted_by(|left, right| left.owner.name.cmp(&right.owner.name));
    let chunks = sorted.chunk_by(|field| field.owner.name.clone());

    chunks
        .into_iter()
        .filter_map(|(_, chunk)| {
            let fields: Vec<_> = chunk.collect();
            let info = fields.first()?.owner.clone();
            Some(GenerationGroup { info, fields })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::TransferStrategy;
    use crate::model::{Modifiers, TypeName, TypeRef};

    fn info(name: &str) -> TypeInfo {
        let name = TypeName::from(name);
        TypeInfo {
            package:         name.qualifier().to_string(),
            simple_name:     name.simple_name().to_string(),
            flattened_name:  name.simple_name().to_string(),
            source_name:     name.to_string(),
            renderable:      false,
            parent_artifact: None,
            artifact:        TypeName::from(format!("{name}$$Stash")),
            modifiers:       Modifiers::default(),
            name,
        }
    }

    fn field(owner: &str, name: &str) -> CollectedField {
        CollectedField {
            name:            name.to_string(),
            ty:              TypeRef::Primitive("int".to_string()),
            strategy:        Some(TransferStrategy::Int),
            owner:           info(owner),
            modifiers_valid: true,
        }
    }

    #[test]
    fn test_groups_are_sorted_and_keep_field_order() {
        let groups = group_fields(vec![
            field("com.example.Zeta", "b"),
            field("com.example.Alpha", "z"),
            field("com.example.Zeta", "a"),
            field("com.example.Alpha", "y"),
        ]);

        let summary: Vec<(&str, Vec<&str>)> = groups
            .iter()
            .map(|group| {
                (
                    group.info.name.as_str(),
                    group.fields.iter().map(|field| field.name.as_str()).collect(),
                )
            })
            .collect();
        assert_eq!(
            summary,
            vec![
                ("com.example.Alpha", vec!["z", "y"]),
                ("com.example.Zeta", vec!["b", "a"]),
            ]
        );
    }

    #[test]
    fn test_invalid_fields_are_not_emitted() {
        let mut invalid = field("com.example.Main", "hidden");
        invalid.modifiers_valid = false;
        let groups = group_fields(vec![field("com.example.Main", "shown"), invalid]);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].fields.len(), 2);
        let emitted: Vec<_> = groups[0].emitted_fields().map(|field| field.name.as_str()).collect();
        assert_eq!(emitted, vec!["shown"]);
    }
}
