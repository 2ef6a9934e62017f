//! The file emission collaborator
//!
//! A [`Filer`] hands out one [`SourceSink`] per artifact. Text written to a sink only
//! becomes visible once the sink is committed; a sink dropped without a commit leaves
//! nothing behind.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use error_stack::Report;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::TypeName;

/// Extension of emitted source files
const SOURCE_EXTENSION: &str = "java";

/// Writable destination for one artifact
pub trait SourceSink: Write {
    /// Publish everything written so far
    fn commit(self: Box<Self>) -> Result<()>;
}

/// Creates sinks for generated artifacts
pub trait Filer {
    /// Open a sink for the artifact `name`, generated on behalf of `origin`
    fn create_source<'a>(
        &'a mut self,
        name: &TypeName,
        origin: &TypeName,
    ) -> Result<Box<dyn SourceSink + 'a>>;
}

/// Writes `<root>/<package path>/<Artifact>.java`
///
/// Each artifact is written to a temporary file next to its destination and renamed into
/// place on commit.
#[derive(Debug, Clone)]
pub struct DirectoryFiler {
    root: PathBuf,
}

impl DirectoryFiler {
    /// Write artifacts below `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Destination path of the artifact `name`
    pub fn source_path(&self, name: &TypeName) -> PathBuf {
        let mut path = self.root.clone();
        path.extend(name.qualifier().split('.').filter(|segment| !segment.is_empty()));
        path.push(format!("{}.{SOURCE_EXTENSION}", name.simple_name()));
        path
    }
}

impl Filer for DirectoryFiler {
    fn create_source<'a>(
        &'a mut self,
        name: &TypeName,
        origin: &TypeName,
    ) -> Result<Box<dyn SourceSink + 'a>> {
        let path = self.source_path(name);
        let directory = path.parent().unwrap_or(&self.root).to_path_buf();
        std::fs::create_dir_all(&directory)
            .map_err(|error| Report::new(Error::io_failed("create directory", &directory, error)))?;
        let file = NamedTempFile::new_in(&directory)
            .map_err(|error| Report::new(Error::io_failed("create temporary file in", &directory, error)))?;

        debug!("Opened sink for '{name}' (origin '{origin}') at {}", path.display());
        Ok(Box::new(FileSink { file, path }))
    }
}

struct FileSink {
    file: NamedTempFile,
    path: PathBuf,
}

impl Write for FileSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl SourceSink for FileSink {
    fn commit(self: Box<Self>) -> Result<()> {
        let Self { mut file, path } = *self;
        file.flush()
            .map_err(|error| Report::new(Error::io_failed("flush", &path, error)))?;
        file.persist(&path)
            .map_err(|error| Report::new(Error::io_failed("persist", &path, error.error)))?;
        Ok(())
    }
}

/// Keeps committed sources in memory, keyed by artifact name
#[derive(Debug, Default)]
pub struct MemoryFiler {
    sources: BTreeMap<TypeName, String>,
}

impl MemoryFiler {
    /// An empty filer
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed source of the artifact `name`
    pub fn source(&self, name: &TypeName) -> Option<&str> {
        self.sources.get(name).map(String::as_str)
    }

    /// Every committed source ordered by artifact name
    pub fn sources(&self) -> &BTreeMap<TypeName, String> {
        &self.sources
    }
}

impl Filer for MemoryFiler {
    fn create_source<'a>(
        &'a mut self,
        name: &TypeName,
        _origin: &TypeName,
    ) -> Result<Box<dyn SourceSink + 'a>> {
        if self.sources.contains_key(name) {
            return Err(Report::new(Error::InvalidState(format!(
                "artifact '{name}' was already emitted"
            ))));
        }
        Ok(Box::new(MemorySink {
            name:    name.clone(),
            buffer:  Vec::new(),
            sources: &mut self.sources,
        }))
    }
}

struct MemorySink<'a> {
    name:    TypeName,
    buffer:  Vec<u8>,
    sources: &'a mut BTreeMap<TypeName, String>,
}

impl Write for MemorySink<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SourceSink for MemorySink<'_> {
    fn commit(self: Box<Self>) -> Result<()> {
        let Self {
            name,
            buffer,
            sources,
        } = *self;
        let text = String::from_utf8(buffer).map_err(|error| {
            Report::new(Error::InvalidState(format!(
                "artifact '{name}' is not valid UTF-8: {error}"
            )))
        })?;
        sources.insert(name, text);
        Ok(())
    }
}

/// Relative path of the artifact `name` below an output root
pub fn relative_source_path(name: &TypeName) -> PathBuf {
    DirectoryFiler::new(Path::new("")).source_path(name)
}
