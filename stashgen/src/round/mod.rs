//! One generation round
//!
//! A round collects every marked field from the type model, groups the fields by
//! enclosing type and emits one artifact per group. The [`RoundCache`] lives exactly as
//! long as one call to [`Processor::process_round`].

use serde::Serialize;
use tracing::info;

use crate::collect::{FieldCollector, group_fields};
use crate::config::GeneratorConfig;
use crate::diagnostics::Diagnostics;
use crate::emit::{ArtifactEmitter, ArtifactVariant, Filer};
use crate::error::Result;
use crate::hierarchy::RoundCache;
use crate::model::{TypeModel, TypeName};

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic, reason = "tests")]
mod tests;

/// What a round produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundReport {
    /// Emitted artifacts ordered by enclosing type name
    pub artifacts:       Vec<ArtifactSummary>,
    /// Diagnostics reported during this round
    pub error_count:     usize,
    /// Supertypes inspected for marked fields
    pub inspected_types: usize,
}

impl RoundReport {
    /// Whether the round reported any diagnostic
    pub const fn has_errors(&self) -> bool {
        self.error_count > 0
    }
}

/// One emitted artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactSummary {
    /// Qualified artifact name
    pub name:           TypeName,
    /// The type the artifact was generated for
    pub origin:         TypeName,
    /// Save/restore protocol the artifact implements
    pub variant:        ArtifactVariant,
    /// The type the artifact extends
    pub parent:         String,
    /// Fields referenced by the generated statements
    pub fields:         Vec<String>,
    /// Invalid fields left out of the generated statements
    pub skipped_fields: Vec<String>,
}

/// Runs generation rounds with a fixed configuration
#[derive(Debug, Clone)]
pub struct Processor {
    config: GeneratorConfig,
}

impl Processor {
    /// Create a processor generating with `config`
    pub const fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Run one round over every marked field in `model`
    ///
    /// Validation problems go to `diagnostics` and do not stop the round. A failing
    /// collaborator, such as a sink that cannot be written, aborts it.
    pub fn process_round(
        &self,
        model: &dyn TypeModel,
        diagnostics: &mut dyn Diagnostics,
        filer: &mut dyn Filer,
    ) -> Result<RoundReport> {
        let errors_before = diagnostics.error_count();
        let mut cache = RoundCache::new();

        let fields = FieldCollector::new(model, &self.config).collect(&mut cache, diagnostics);
        let groups = group_fields(fields);
        info!(
            "Round collected {} group(s), {} type(s) inspected",
            groups.len(),
            cache.inspected_types()
        );

        let emitter = ArtifactEmitter::new(&self.config);
        let mut artifacts = Vec::with_capacity(groups.len());
        for group in &groups {
            let variant = emitter.emit(group, filer)?;
            let (fields, skipped_fields) = group
                .fields
                .iter()
                .partition::<Vec<_>, _>(|field| field.is_valid());
            artifacts.push(ArtifactSummary {
                name: group.info.artifact.clone(),
                origin: group.info.name.clone(),
                variant,
                parent: variant.parent(&group.info, &self.config),
                fields: fields.into_iter().map(|field| field.name.clone()).collect(),
                skipped_fields: skipped_fields
                    .into_iter()
                    .map(|field| field.name.clone())
                    .collect(),
            });
        }

        let report = RoundReport {
            artifacts,
            error_count: diagnostics.error_count().saturating_sub(errors_before),
            inspected_types: cache.inspected_types(),
        };
        info!(
            "Round finished: {} artifact(s), {} error(s)",
            report.artifacts.len(),
            report.error_count
        );
        Ok(report)
    }
}
