//! Header emission.
//!
//! [`Embedder`] ties the pieces together: it loads every input, renders the
//! header in memory and only then replaces the destination file. A failure
//! at any step leaves the previous output (or its absence) untouched.

use crate::artifact::{load_artifacts, ArtifactSource, FsSource};
use crate::error::{Error, Result};
use crate::header::{GeneratedHeader, HeaderConfig};
use crate::naming;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};
use tracing::{debug, info, trace};

/// Outcome of a successful [`Embedder::emit_header`] call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitReport {
    /// The header that was written
    pub output: PathBuf,
    /// Number of arrays declared
    pub arrays: usize,
    /// Total number of embedded bytes
    pub total_bytes: usize,
    /// blake3 digest of the rendered header, hex encoded
    pub digest: String,
    /// True if the existing file already matched and was left alone
    pub unchanged: bool,
}

/// Embeds input artifacts into a generated C header.
#[derive(Debug, Clone, Default)]
pub struct Embedder<S = FsSource> {
    config: HeaderConfig,
    source: S,
}

impl Embedder<FsSource> {
    /// Creates an embedder reading from the filesystem with default layout
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: ArtifactSource> Embedder<S> {
    /// Creates an embedder reading from `source`
    pub fn with_source(source: S) -> Self {
        Self {
            config: HeaderConfig::default(),
            source,
        }
    }

    /// Replaces the layout configuration
    pub fn config(mut self, config: HeaderConfig) -> Self {
        self.config = config;
        self
    }

    /// Reads `inputs` and renders the header for `output` without writing it.
    pub fn build<P: AsRef<Path>>(&self, inputs: &[P], output: &Path) -> Result<GeneratedHeader> {
        if inputs.is_empty() {
            return Err(Error::NoInputs);
        }

        // Fail on a bad output name before reading anything
        naming::include_guard(output)?;

        let artifacts = load_artifacts(&self.source, inputs)?;
        GeneratedHeader::new(output, artifacts)
    }

    /// Generates the header for `inputs` and writes it to `output`.
    ///
    /// The file is replaced atomically once the whole header has been
    /// rendered. If `output` already holds identical content it is not
    /// rewritten.
    pub fn emit_header<P: AsRef<Path>>(&self, inputs: &[P], output: &Path) -> Result<EmitReport> {
        let header = self.build(inputs, output)?;
        let text = header.render(&self.config);
        let digest = blake3::hash(text.as_bytes());

        debug!(
            "Rendered {} ({} arrays, {} bytes, guard {})",
            output.display(),
            header.artifacts().len(),
            header.total_bytes(),
            header.guard()
        );

        let unchanged = existing_digest(output)? == Some(digest);
        if unchanged {
            info!("{} is up to date", output.display());
        } else {
            write_atomic(output, text.as_bytes())?;
            info!("Wrote {}", output.display());
        }

        Ok(EmitReport {
            output: header.output_path().to_path_buf(),
            arrays: header.artifacts().len(),
            total_bytes: header.total_bytes(),
            digest: digest.to_hex().to_string(),
            unchanged,
        })
    }
}

/// Generates a header from files on disk using the default layout.
pub fn emit_header<P: AsRef<Path>>(inputs: &[P], output: &Path) -> Result<EmitReport> {
    Embedder::new().emit_header(inputs, output)
}

/// Hashes the current content of `path`, if it exists.
fn existing_digest(path: &Path) -> Result<Option<blake3::Hash>> {
    match fs::read(path) {
        Ok(existing) => Ok(Some(blake3::hash(&existing))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        // Unreadable or a directory: let the write report the real problem
        Err(e) => {
            trace!("Cannot read existing {}: {}", path.display(), e);
            Ok(None)
        }
    }
}

/// Follows a symlinked output to the file it points at, so the link is
/// kept and its target receives the new content.
fn resolve_output(path: &Path) -> io::Result<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => match fs::canonicalize(path) {
            Ok(target) => Ok(target),
            // Dangling link: write where it points
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let link = fs::read_link(path)?;
                Ok(path.parent().unwrap_or(Path::new("")).join(link))
            }
            Err(e) => Err(e),
        },
        _ => Ok(path.to_path_buf()),
    }
}

/// Creates the staging file in `dir` with the permissions `target` should
/// end up with: those of the existing file, or the umask default.
fn staging_file(dir: &Path, target: &Path) -> io::Result<NamedTempFile> {
    match fs::metadata(target) {
        Ok(meta) => {
            let staged = Builder::new().prefix(".bin2c").tempfile_in(dir)?;
            staged.as_file().set_permissions(meta.permissions())?;
            Ok(staged)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => fresh_staging_file(dir),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn fresh_staging_file(dir: &Path) -> io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    // The mode passes through open(2), so the umask still applies
    Builder::new()
        .prefix(".bin2c")
        .permissions(fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn fresh_staging_file(dir: &Path) -> io::Result<NamedTempFile> {
    Builder::new().prefix(".bin2c").tempfile_in(dir)
}

/// Writes `contents` to a temporary file next to `path`, then renames it
/// over `path`. The temporary file is removed if anything fails.
fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let target = resolve_output(path).map_err(|e| Error::file_write(path, e))?;
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = staging_file(dir, &target).map_err(|e| Error::file_write(path, e))?;
    trace!("Staging {} at {}", target.display(), staged.path().display());

    staged
        .write_all(contents)
        .and_then(|()| staged.as_file().sync_all())
        .map_err(|e| Error::file_write(path, e))?;

    staged
        .persist(&target)
        .map_err(|e| Error::file_write(path, e.error))?;

    Ok(())
}
