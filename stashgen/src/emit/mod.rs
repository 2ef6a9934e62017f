//! Artifact rendering and emission

mod emitter;
mod filer;
mod template;
mod variant;

pub use emitter::ArtifactEmitter;
pub use filer::{DirectoryFiler, Filer, MemoryFiler, SourceSink, relative_source_path};
pub use template::render_template;
pub use variant::ArtifactVariant;
