//! Rendering of generated C headers.
//!
//! The layout produced here is consumed by native compilers and must stay
//! byte-for-byte stable:
//!
//! ```text
//! #ifndef _SHADERS_
//! #define _SHADERS_
//!
//! unsigned char QuadVS[] = {
//!     0x44, 0x58, 0x42, 0x43, 0x1A, 0x2B, 0x3C, 0x4D, 0x01, 0x00, 0x00, 0x00,
//!     0x9C, 0x03, };
//!
//! unsigned int QuadVS_size = 14;
//!
//! #endif // _SHADERS_
//! ```
//!
//! Every byte is followed by `", "`, a line break follows every full row,
//! and the closing `};` is appended directly after the last byte.

use crate::artifact::InputArtifact;
use crate::error::Result;
use crate::naming;
use std::fmt::Write as FmtWrite;
use std::path::{Path, PathBuf};

/// Bytes emitted per array line by default
pub const DEFAULT_BYTES_PER_LINE: usize = 12;

/// Layout settings for generated headers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderConfig {
    /// Number of byte literals per line (at least 1)
    pub bytes_per_line: usize,
    /// Prefix written at the start of each array line
    pub indent: String,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            bytes_per_line: DEFAULT_BYTES_PER_LINE,
            indent: "    ".to_string(),
        }
    }
}

impl HeaderConfig {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of bytes per line; zero is treated as one
    pub fn bytes_per_line(mut self, n: usize) -> Self {
        self.bytes_per_line = n.max(1);
        self
    }

    /// Sets the line indentation
    pub fn indent(mut self, s: impl Into<String>) -> Self {
        self.indent = s.into();
        self
    }
}

/// A header ready to be rendered: the guard plus the arrays it declares.
#[derive(Debug, Clone)]
pub struct GeneratedHeader {
    output_path: PathBuf,
    guard: String,
    artifacts: Vec<InputArtifact>,
}

impl GeneratedHeader {
    /// Creates a header for `output_path`, deriving its include guard.
    pub fn new(output_path: impl Into<PathBuf>, artifacts: Vec<InputArtifact>) -> Result<Self> {
        let output_path = output_path.into();
        let guard = naming::include_guard(&output_path)?;
        Ok(Self {
            output_path,
            guard,
            artifacts,
        })
    }

    /// Path the header is meant to be written to
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// The include guard token
    pub fn guard(&self) -> &str {
        &self.guard
    }

    /// The embedded artifacts, in declaration order
    pub fn artifacts(&self) -> &[InputArtifact] {
        &self.artifacts
    }

    /// Total number of embedded bytes
    pub fn total_bytes(&self) -> usize {
        self.artifacts.iter().map(InputArtifact::len).sum()
    }

    /// Renders the complete header text.
    pub fn render(&self, config: &HeaderConfig) -> String {
        // "0xHH, " is six bytes per value
        let capacity = 64 + self.total_bytes() * 6 + self.artifacts.len() * 96;
        let mut out = String::with_capacity(capacity);

        // Writing to a String cannot fail
        let _ = self.write_to(&mut out, config);
        out
    }

    /// Writes the header into any [`std::fmt::Write`] sink.
    pub fn write_to<W: FmtWrite>(&self, out: &mut W, config: &HeaderConfig) -> std::fmt::Result {
        writeln!(out, "#ifndef {}", self.guard)?;
        writeln!(out, "#define {}", self.guard)?;
        writeln!(out)?;

        for artifact in &self.artifacts {
            write_array(out, artifact, config)?;
        }

        writeln!(out, "#endif // {}", self.guard)
    }
}

/// Writes one array declaration and its size declaration.
fn write_array<W: FmtWrite>(
    out: &mut W,
    artifact: &InputArtifact,
    config: &HeaderConfig,
) -> std::fmt::Result {
    let per_line = config.bytes_per_line.max(1);

    writeln!(out, "unsigned char {}[] = {{", artifact.identifier)?;
    for (i, byte) in artifact.data.iter().enumerate() {
        if i % per_line == 0 {
            out.write_str(&config.indent)?;
        }
        write!(out, "0x{:02X}, ", byte)?;
        if (i + 1) % per_line == 0 {
            out.write_char('\n')?;
        }
    }
    out.write_str("};\n\n")?;

    writeln!(out, "unsigned int {}_size = {};", artifact.identifier, artifact.len())?;
    writeln!(out)
}
