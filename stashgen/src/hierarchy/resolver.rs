//! Nearest marked ancestor resolution
//!
//! Walks the supertype chain upward from a type, stopping at the top of the type system or
//! at the first supertype inside an excluded namespace. Every inspected type is recorded
//! in the [`RoundCache`], so sibling types and repeated queries reuse earlier walks.

use std::collections::HashSet;

use tracing::{debug, warn};

use super::{RoundCache, TypeIdentity, TypeInfo};
use crate::config::GeneratorConfig;
use crate::model::{TypeModel, TypeName, TypeRef};

/// Resolves hierarchy facts against a type model
pub struct HierarchyResolver<'a> {
    model:  &'a dyn TypeModel,
    config: &'a GeneratorConfig,
}

impl<'a> HierarchyResolver<'a> {
    /// Create a resolver over `model`
    pub const fn new(model: &'a dyn TypeModel, config: &'a GeneratorConfig) -> Self {
        Self { model, config }
    }

    /// Artifact name of the nearest strict ancestor of `name` that declares marked fields
    pub fn resolve_marked_ancestor(
        &self,
        name: &TypeName,
        cache: &mut RoundCache,
    ) -> Option<TypeName> {
        if let Some(resolved) = cache.resolved_ancestor(name) {
            debug!("Ancestor of '{name}' already resolved");
            return resolved.cloned();
        }

        let resolved = self.walk_supertypes(name, cache);
        cache.record_ancestor(name.clone(), resolved.clone());
        resolved
    }

    fn walk_supertypes(&self, name: &TypeName, cache: &mut RoundCache) -> Option<TypeName> {
        let mut current = self.model.superclass(name);
        let mut visited = HashSet::from([name.clone()]);

        while let Some(supertype) = current {
            if !visited.insert(supertype.clone()) {
                warn!("Supertype chain of '{name}' is cyclic at '{supertype}'");
                return None;
            }

            if self.config.is_excluded(&supertype) {
                debug!("Stopping at excluded supertype '{supertype}' of '{name}'");
                return None;
            }

            if let Some(artifact) = cache.marked_artifact(&supertype) {
                debug!("Cache hit: '{supertype}' is marked");
                return Some(artifact.clone());
            }

            if cache.is_known_unmarked(&supertype) {
                // an unmarked supertype with a finished walk answers for everything above it
                if let Some(resolved) = cache.resolved_ancestor(&supertype) {
                    debug!("Cache hit: reusing resolution of '{supertype}'");
                    return resolved.cloned();
                }
                current = self.model.superclass(&supertype);
                continue;
            }

            if self.model.declares_marked_field(&supertype) {
                let artifact = self.artifact_name(&supertype);
                debug!("'{supertype}' is marked, artifact '{artifact}'");
                cache.record_marked(supertype, artifact.clone());
                return Some(artifact);
            }

            debug!("'{supertype}' is unmarked");
            current = self.model.superclass(&supertype);
            cache.record_unmarked(supertype);
        }

        None
    }

    /// Qualified artifact name for `name`
    pub fn artifact_name(&self, name: &TypeName) -> TypeName {
        TypeIdentity::of(self.model, name).artifact_name(&self.config.artifact_suffix)
    }

    /// Metadata for `name`, computed on first request and memoized for the round
    pub fn type_info(&self, name: &TypeName, cache: &mut RoundCache) -> TypeInfo {
        if let Some(info) = cache.type_info(name) {
            return info.clone();
        }

        let identity = TypeIdentity::of(self.model, name);
        let modifiers = self
            .model
            .type_element(name)
            .map(|element| element.modifiers)
            .unwrap_or_default();
        let renderable = self.model.is_assignable(
            &TypeRef::declared(name.clone()),
            &self.config.renderable_type,
        );
        let parent_artifact = self.resolve_marked_ancestor(name, cache);

        let info = TypeInfo {
            name: name.clone(),
            artifact: identity.artifact_name(&self.config.artifact_suffix),
            source_name: identity.source_name(),
            package: identity.package,
            simple_name: identity.simple_name,
            flattened_name: identity.flattened_name,
            renderable,
            parent_artifact,
            modifiers,
        };
        debug!(
            "Type info for '{name}': renderable={}, parent={:?}",
            info.renderable, info.parent_artifact
        );
        cache.record_type_info(info.clone());
        info
    }
}
