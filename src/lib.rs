//! # lasrust
//!
//! A pure Rust library for reading and writing well-log files in the
//! Log ASCII Standard (LAS) format.
//!
//! ## Features
//!
//! - Read LAS 1.2, 2.0 and 3.0 files (wrapped and unwrapped data)
//! - Write LAS 2.0 and 3.0 files
//! - Lazy per-curve column access over a shared row-major matrix
//! - Non-fatal read issues collected as notifications and forwarded to `log`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lasrust::{io::LasReader, LasVersion};
//!
//! // Read a LAS file
//! let doc = LasReader::from_file("sample.las")?.read()?;
//!
//! // Access curves
//! for name in doc.curve_names() {
//!     println!("{}: {:?}", name, doc.curve_data(name)?);
//! }
//!
//! // Write as LAS 3.0
//! use lasrust::io::LasWriter;
//! LasWriter::new(&doc).with_version(LasVersion::V3_0).write_to_file("output.las")?;
//! # Ok::<(), lasrust::error::LasError>(())
//! ```
//!
//! ## Architecture
//!
//! - `LasDocument` - Header sections plus the data matrix
//! - `Section` - Ordered, mnemonic keyed header items
//! - `CurveStore` - Row-major samples with lazily split columns
//! - `LasReader` / `LasWriter` - Streaming text I/O

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod data;
pub mod document;
pub mod error;
pub mod header;
pub mod io;
pub mod notification;
pub mod types;

use std::path::Path;

// Re-export commonly used types
pub use error::{LasError, Result};
pub use types::{Delimiter, LasVersion, SectionKind, WrapMode};

pub use data::CurveStore;
pub use document::{DocumentBuilder, HeaderOverride, LasDocument, SectionRef};
pub use header::{CurveDefinition, HeaderItem, Section, SectionEntry};
pub use notification::{Notification, NotificationCollection, NotificationType};

// Re-export I/O types
pub use io::las::{write_las, write_las_file};
pub use io::{LasReader, LasReaderConfiguration, LasWriter, LasWriterConfiguration};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Read a LAS file with the default configuration
pub fn read_las<P: AsRef<Path>>(path: P) -> Result<LasDocument> {
    LasReader::from_file(path)?.read()
}

/// Parse an in-memory LAS document with the default configuration
pub fn parse_las(bytes: &[u8]) -> Result<LasDocument> {
    LasReader::from_bytes(bytes).read()
}
