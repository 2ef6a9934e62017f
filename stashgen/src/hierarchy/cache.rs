//! Round-scoped memo of hierarchy facts
//!
//! A [`RoundCache`] is created at the start of a generation round, passed by `&mut` into
//! everything that resolves hierarchy facts, and dropped when the round ends. Entries are
//! only ever added, so every answer stays valid for the rest of the round.

use std::collections::{HashMap, HashSet};

use super::TypeInfo;
use crate::model::TypeName;

/// Memoized hierarchy facts for one generation round
#[derive(Debug, Default)]
pub struct RoundCache {
    /// Types known to declare marked fields, mapped to their artifact name
    marked:     HashMap<TypeName, TypeName>,
    /// Types known to declare no marked fields themselves
    unmarked:   HashSet<TypeName>,
    /// Finished ancestor resolutions keyed by the type they started from
    ancestors:  HashMap<TypeName, Option<TypeName>>,
    type_infos: HashMap<TypeName, TypeInfo>,
}

impl RoundCache {
    /// An empty cache for a new round
    pub fn new() -> Self {
        Self::default()
    }

    /// Artifact name for a type known to be marked
    pub fn marked_artifact(&self, name: &TypeName) -> Option<&TypeName> {
        self.marked.get(name)
    }

    /// Whether `name` was already inspected and found to declare no marked field
    pub fn is_known_unmarked(&self, name: &TypeName) -> bool {
        self.unmarked.contains(name)
    }

    pub(crate) fn record_marked(&mut self, name: TypeName, artifact: TypeName) {
        self.marked.insert(name, artifact);
    }

    pub(crate) fn record_unmarked(&mut self, name: TypeName) {
        self.unmarked.insert(name);
    }

    /// A finished resolution: outer `None` means never resolved
    pub fn resolved_ancestor(&self, name: &TypeName) -> Option<Option<&TypeName>> {
        self.ancestors.get(name).map(Option::as_ref)
    }

    pub(crate) fn record_ancestor(&mut self, name: TypeName, ancestor: Option<TypeName>) {
        self.ancestors.insert(name, ancestor);
    }

    /// Memoized metadata for `name`
    pub fn type_info(&self, name: &TypeName) -> Option<&TypeInfo> {
        self.type_infos.get(name)
    }

    pub(crate) fn record_type_info(&mut self, info: TypeInfo) {
        self.type_infos.insert(info.name.clone(), info);
    }

    /// Number of types with a known marked/unmarked status
    pub fn inspected_types(&self) -> usize {
        self.marked.len() + self.unmarked.len()
    }
}
