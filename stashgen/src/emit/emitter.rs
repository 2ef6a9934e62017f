use std::io::Write;

use error_stack::ResultExt;
use tracing::info;

use super::{ArtifactVariant, Filer};
use crate::collect::GenerationGroup;
use crate::config::GeneratorConfig;
use crate::error::{Error, Result};

/// Renders one artifact per group and hands it to a [`Filer`]
pub struct ArtifactEmitter<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> ArtifactEmitter<'a> {
    /// Create an emitter using the platform names from `config`
    pub const fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Render and write the artifact for `group`, returning the variant used
    ///
    /// The text is fully rendered before a sink is opened, so a rendering failure never
    /// leaves a partial artifact behind.
    pub fn emit(&self, group: &GenerationGroup, filer: &mut dyn Filer) -> Result<ArtifactVariant> {
        let variant = ArtifactVariant::of(&group.info);
        let source = variant.render(group, self.config)?;

        let mut sink = filer.create_source(&group.info.artifact, &group.info.name)?;
        sink.write_all(source.as_bytes())
            .change_context(Error::failed_to("write artifact", &group.info.artifact))?;
        sink.commit()?;

        info!(
            "Emitted {variant} artifact '{}' with {} field(s)",
            group.info.artifact,
            group.emitted_fields().count()
        );
        Ok(variant)
    }
}
