//! LAS writer module

mod section_writer;
mod text_writer;

pub use section_writer::SectionWriter;
pub use text_writer::{HeaderLayout, LasTextWriter};

use crate::document::LasDocument;
use crate::error::{LasError, Result};
use crate::types::LasVersion;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Configuration for the LAS writer.
#[derive(Debug, Clone)]
pub struct LasWriterConfiguration {
    /// Version stated in the `VERS.` line.
    ///
    /// Default: `2.0`.
    pub version: LasVersion,

    /// Decimals printed for every data value.
    ///
    /// Default: `6`.
    pub precision: usize,

    /// Maximum width of continuation lines in wrapped output.
    ///
    /// Default: `80`.
    pub wrap_width: usize,
}

impl Default for LasWriterConfiguration {
    fn default() -> Self {
        Self {
            version: LasVersion::V2_0,
            precision: 6,
            wrap_width: 80,
        }
    }
}

/// LAS file writer
pub struct LasWriter<'a> {
    document: &'a LasDocument,
    config: LasWriterConfiguration,
}

impl<'a> LasWriter<'a> {
    /// Create a new LAS writer with the default configuration
    pub fn new(document: &'a LasDocument) -> Self {
        Self {
            document,
            config: LasWriterConfiguration::default(),
        }
    }

    /// Set the writer configuration.
    pub fn with_configuration(mut self, config: LasWriterConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Set only the target version
    pub fn with_version(mut self, version: LasVersion) -> Self {
        self.config.version = version;
        self
    }

    /// Write to a file
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.check_version()?;
        let file = File::create(path)?;
        self.write_to_writer(BufWriter::new(file))
    }

    /// Write to any writer
    pub fn write_to_writer<W: Write>(&self, writer: W) -> Result<()> {
        self.check_version()?;
        let mut text_writer = LasTextWriter::new(writer);
        self.write_las(&mut text_writer)?;
        text_writer.flush()
    }

    /// Write to a byte vector (useful for testing)
    pub fn write_to_vec(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_to_writer(&mut buffer)?;
        Ok(buffer)
    }

    /// Get a reference to the document
    pub fn document(&self) -> &LasDocument {
        self.document
    }

    fn check_version(&self) -> Result<()> {
        if self.config.version.is_writable() {
            Ok(())
        } else {
            Err(LasError::UnsupportedVersion(self.config.version.as_str().to_string()))
        }
    }

    fn write_las<W: Write>(&self, writer: &mut LasTextWriter<W>) -> Result<()> {
        log::debug!(
            "writing LAS {} with {} curves and {} rows",
            self.config.version.as_str(),
            self.document.curves().len(),
            self.document.row_count()
        );

        let mut section_writer = SectionWriter::new(writer);
        section_writer.write_version(self.document, self.config.version)?;
        section_writer.write_well(self.document)?;
        section_writer.write_curves(self.document)?;
        section_writer.write_params(self.document)?;
        section_writer.write_other(self.document)?;
        section_writer.write_data(self.document, self.config.precision, self.config.wrap_width)?;
        Ok(())
    }
}

/// Convenience function to write a document to any sink
pub fn write_las<W: Write>(document: &LasDocument, version: LasVersion, sink: W) -> Result<()> {
    LasWriter::new(document).with_version(version).write_to_writer(sink)
}

/// Convenience function to write a document to a file
pub fn write_las_file<P: AsRef<Path>>(
    document: &LasDocument,
    version: LasVersion,
    path: P,
) -> Result<()> {
    LasWriter::new(document).with_version(version).write_to_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentBuilder;
    use crate::header::HeaderItem;

    fn sample() -> LasDocument {
        DocumentBuilder::new()
            .well_item(HeaderItem::new("NULL", "", "-999.25", "NULL VALUE"))
            .curve(HeaderItem::new("DEPT", "M", "", "DEPTH"), vec![100.0, 100.5])
            .curve(HeaderItem::new("GR", "GAPI", "", "GAMMA"), vec![45.2, -999.25])
            .build()
            .unwrap()
    }

    #[test]
    fn test_section_order() {
        let doc = sample();
        let output = String::from_utf8(LasWriter::new(&doc).write_to_vec().unwrap()).unwrap();
        let titles: Vec<&str> = output.lines().filter(|l| l.starts_with('~')).collect();
        assert_eq!(
            titles,
            vec!["~Version Information", "~Well Information", "~Curve Information", "~A  DEPT  GR"]
        );
    }

    #[test]
    fn test_null_written_verbatim() {
        let doc = sample();
        let output = String::from_utf8(LasWriter::new(&doc).write_to_vec().unwrap()).unwrap();
        assert!(output.contains(" 100.500000 -999.250000\n"));
    }

    #[test]
    fn test_unsupported_target_version() {
        let doc = sample();
        let mut sink = Vec::new();
        let err = write_las(&doc, LasVersion::V1_2, &mut sink).unwrap_err();
        assert!(matches!(err, LasError::UnsupportedVersion(_)));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_precision() {
        let doc = sample();
        let config = LasWriterConfiguration {
            precision: 2,
            ..Default::default()
        };
        let output = LasWriter::new(&doc).with_configuration(config).write_to_vec().unwrap();
        let output = String::from_utf8(output).unwrap();
        assert!(output.ends_with("~A  DEPT  GR\n 100.00   45.20\n 100.50 -999.25\n"));
    }
}
