//! Name derivation for generated headers.
//!
//! Both names come from a path's base filename: the final component with
//! its last extension removed (`vertex.ps.h` has base `vertex.ps`).

use crate::error::{Error, Result};
use std::path::Path;

/// Returns the base filename of `path` as UTF-8.
fn base_name(path: &Path) -> Result<&str> {
    let stem = path
        .file_stem()
        .ok_or_else(|| Error::invalid_file_name(path, "path has no file name"))?;
    stem.to_str()
        .ok_or_else(|| Error::invalid_file_name(path, "file name is not valid UTF-8"))
}

/// Derives the include guard for a header written to `output`.
///
/// The base filename is uppercased, wrapped in single underscores and has
/// any remaining dots replaced with underscores.
///
/// ```
/// use bin2c_core::naming::include_guard;
/// use std::path::Path;
///
/// assert_eq!(include_guard(Path::new("shaders.h")).unwrap(), "_SHADERS_");
/// assert_eq!(include_guard(Path::new("vertex.ps.h")).unwrap(), "_VERTEX_PS_");
/// ```
pub fn include_guard(output: &Path) -> Result<String> {
    let base = base_name(output)?;
    Ok(format!("_{}_", base.to_uppercase()).replace('.', "_"))
}

/// Derives the array identifier for an input file. The base filename is
/// used verbatim.
pub fn identifier(input: &Path) -> Result<String> {
    base_name(input).map(str::to_owned)
}
