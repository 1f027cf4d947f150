//! Input artifacts and the sources they are read from.
//!
//! An [`ArtifactSource`] abstracts where input bytes come from. The CLI
//! reads from disk through [`FsSource`]; tests and in-process callers can
//! stage blobs in a [`MemorySource`] instead.

use crate::error::{Error, Result};
use crate::naming;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// A single input file: its path, derived identifier and raw content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputArtifact {
    /// Path the content was read from
    pub path: PathBuf,
    /// Array name emitted for this input
    pub identifier: String,
    /// Raw file content
    pub data: Vec<u8>,
}

impl InputArtifact {
    /// Creates an artifact, deriving the identifier from `path`.
    pub fn new(path: impl Into<PathBuf>, data: Vec<u8>) -> Result<Self> {
        let path = path.into();
        let identifier = naming::identifier(&path)?;
        Ok(Self {
            path,
            identifier,
            data,
        })
    }

    /// Number of content bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the input was empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the content as a slice
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

/// Somewhere input bytes can be read from.
pub trait ArtifactSource {
    /// Read the entire content at `path`.
    ///
    /// Inputs that cannot be opened must be reported as
    /// [`Error::InputNotFound`] so callers can tell them apart from other
    /// I/O failures.
    fn read(&self, path: &Path) -> Result<Vec<u8>>;
}

impl<S: ArtifactSource + ?Sized> ArtifactSource for &S {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        (**self).read(path)
    }
}

/// Reads artifacts from the host filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl ArtifactSource for FsSource {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        trace!("Reading {}", path.display());
        fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
                Error::input_not_found(path, Some(e))
            }
            _ => Error::file_read(path, e),
        })
    }
}

/// An in-memory set of artifacts keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MemorySource {
    /// Creates an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a file
    pub fn insert(&mut self, path: impl Into<PathBuf>, data: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), data.into());
    }

    /// Builder-style variant of [`MemorySource::insert`]
    pub fn with_file(mut self, path: impl Into<PathBuf>, data: impl Into<Vec<u8>>) -> Self {
        self.insert(path, data);
        self
    }
}

impl ArtifactSource for MemorySource {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| Error::input_not_found(path, None))
    }
}

/// Reads every input in order.
///
/// Stops at the first input that cannot be read. Inputs whose identifiers
/// collide are rejected, since the generated header would not compile.
pub fn load_artifacts<S, P>(source: &S, paths: &[P]) -> Result<Vec<InputArtifact>>
where
    S: ArtifactSource + ?Sized,
    P: AsRef<Path>,
{
    let mut seen: HashMap<String, PathBuf> = HashMap::with_capacity(paths.len());
    let mut artifacts = Vec::with_capacity(paths.len());

    for path in paths {
        let path = path.as_ref();
        let identifier = naming::identifier(path)?;
        if let Some(first) = seen.get(&identifier) {
            return Err(Error::DuplicateIdentifier {
                identifier,
                first: first.clone(),
                second: path.to_path_buf(),
            });
        }

        let data = source.read(path)?;
        debug!("Loaded {} ({} bytes) as '{}'", path.display(), data.len(), identifier);

        seen.insert(identifier.clone(), path.to_path_buf());
        artifacts.push(InputArtifact {
            path: path.to_path_buf(),
            identifier,
            data,
        });
    }

    Ok(artifacts)
}
