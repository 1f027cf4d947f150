//! # bin2c-core
//!
//! A library for embedding binary blobs, such as compiled shader bytecode,
//! into a generated C header as byte arrays.
//!
//! For each input file the generated header declares
//! `unsigned char <name>[]` holding every byte and
//! `unsigned int <name>_size` holding the byte count, where `<name>` is the
//! input's base filename. The whole header is wrapped in an include guard
//! derived from the output filename.
//!
//! ## Architecture
//!
//! - [`naming`]: include guard and identifier derivation
//! - [`artifact`]: input artifacts and the [`ArtifactSource`] they are read from
//! - [`header`]: header layout and rendering
//! - [`embed`]: end-to-end emission with atomic output replacement
//! - [`error`]: error types and handling
//!
//! ## Example
//!
//! ```no_run
//! use bin2c_core::{Embedder, HeaderConfig};
//! use std::path::Path;
//!
//! let report = Embedder::new()
//!     .config(HeaderConfig::new().bytes_per_line(16))
//!     .emit_header(&["QuadVS.cso", "QuadPS.cso"], Path::new("shaders.h"))?;
//!
//! println!("{} arrays, {} bytes", report.arrays, report.total_bytes);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Extensibility
//!
//! - [`ArtifactSource`]: read inputs from somewhere other than the filesystem

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod artifact;
pub mod embed;
pub mod error;
pub mod header;
pub mod naming;

// Re-export primary types for convenience
pub use artifact::{load_artifacts, ArtifactSource, FsSource, InputArtifact, MemorySource};
pub use embed::{emit_header, EmitReport, Embedder};
pub use error::{Error, ErrorKind, Result};
pub use header::{GeneratedHeader, HeaderConfig, DEFAULT_BYTES_PER_LINE};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
