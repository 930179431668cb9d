//! LAS file reader

mod header_parser;
mod line_reader;
mod section_reader;

pub use header_parser::{parse_header_line, Leniency, ParsedHeaderLine};
pub use line_reader::{ClassifiedLine, LasLineReader, LineKind};

use section_reader::SectionReader;

use crate::document::LasDocument;
use crate::error::Result;
use encoding_rs::Encoding;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Null sentinel used when the Well section declares none
pub const DEFAULT_NULL_VALUE: f64 = -999.25;

/// Configuration for the LAS reader.
#[derive(Debug, Clone)]
pub struct LasReaderConfiguration {
    /// Decoder for lines that are not valid UTF-8.
    ///
    /// Default: `None` (Latin-1, byte to char).
    pub encoding: Option<&'static Encoding>,

    /// Null sentinel when the file has no `NULL.` item.
    ///
    /// Default: `-999.25`.
    pub default_null: f64,

    /// When `true`, every curve column is split out of the data matrix
    /// before `read` returns instead of on first access.
    ///
    /// Default: `false`.
    pub eager: bool,

    /// Use rayon worker threads when several columns are materialised at once.
    ///
    /// Default: `true`.
    pub parallel: bool,
}

impl Default for LasReaderConfiguration {
    fn default() -> Self {
        Self {
            encoding: None,
            default_null: DEFAULT_NULL_VALUE,
            eager: false,
            parallel: true,
        }
    }
}

/// LAS file reader
pub struct LasReader<R: BufRead> {
    lines: LasLineReader<R>,
    config: LasReaderConfiguration,
}

impl<R: Read> LasReader<BufReader<R>> {
    /// Create a new LAS reader from any reader
    pub fn from_reader(reader: R) -> Self {
        Self::from_buf_reader(BufReader::new(reader))
    }
}

impl LasReader<BufReader<File>> {
    /// Create a new LAS reader from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::from_reader(file))
    }
}

impl<'a> LasReader<&'a [u8]> {
    /// Create a new LAS reader over an in-memory document
    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        Self::from_buf_reader(bytes)
    }
}

impl<R: BufRead> LasReader<R> {
    /// Create a new LAS reader from a buffered reader
    pub fn from_buf_reader(reader: R) -> Self {
        Self {
            lines: LasLineReader::new(reader),
            config: LasReaderConfiguration::default(),
        }
    }

    /// Set the reader configuration.
    pub fn with_configuration(mut self, config: LasReaderConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Read the whole stream and return a LasDocument.
    ///
    /// Parsing is all-or-nothing: any structural error aborts the read.
    pub fn read(mut self) -> Result<LasDocument> {
        self.lines.set_encoding(self.config.encoding);

        let mut section_reader = SectionReader::new(&self.config);
        while let Some(line) = self.lines.next_line()? {
            section_reader.accept(line)?;
        }
        section_reader.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LasError;
    use std::io::Cursor;

    const MINIMAL: &str = "~V\n VERS. 2.0 : v\n WRAP. NO : w\n~C\n DEPT.M : d\n~A\n1.0\n2.0\n";

    #[test]
    fn test_read_from_bytes() {
        let doc = LasReader::from_bytes(MINIMAL.as_bytes()).read().unwrap();
        assert_eq!(doc.row_count(), 2);
    }

    #[test]
    fn test_read_from_reader() {
        let doc = LasReader::from_reader(Cursor::new(MINIMAL.to_string()))
            .read()
            .unwrap();
        assert_eq!(doc.curve_data("DEPT").unwrap(), &[1.0, 2.0]);
    }

    #[test]
    fn test_nonexistent_file() {
        let result = LasReader::from_file("nonexistent.las");
        assert!(matches!(result, Err(LasError::Io(_))));
    }

    #[test]
    fn test_eager_configuration() {
        let config = LasReaderConfiguration {
            eager: true,
            parallel: false,
            ..Default::default()
        };
        let doc = LasReader::from_bytes(MINIMAL.as_bytes())
            .with_configuration(config)
            .read()
            .unwrap();
        assert!(doc.is_materialized("DEPT"));
    }

    #[test]
    fn test_error_reports_physical_line() {
        let text = "~C\n DEPT.M : d\n GR.API : g\n~A\n1.0 2.0\n1.5 x\n";
        let err = LasReader::from_bytes(text.as_bytes()).read().unwrap_err();
        assert_eq!(err.line(), Some(6));
    }
}
