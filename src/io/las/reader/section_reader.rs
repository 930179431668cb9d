//! LAS section reader
//!
//! Groups classified lines into the Version, Well, Curve, Parameter, Other
//! and ASCII sections and feeds the data lines to the matrix decoder.

use super::header_parser::{parse_header_line, Leniency, ParsedHeaderLine};
use super::line_reader::{ClassifiedLine, LineKind};
use super::LasReaderConfiguration;
use crate::data::{CurveStore, MatrixDecoder};
use crate::document::LasDocument;
use crate::error::{LasError, Result};
use crate::header::{CurveDefinition, HeaderItem, Section};
use crate::notification::{NotificationCollection, NotificationType};
use crate::types::{Delimiter, SectionKind, WrapMode};

/// Section the reader is currently inside
#[derive(Debug)]
enum Current {
    /// No `~` line seen yet
    Start,
    Header(SectionKind),
    Other,
    Ascii(MatrixDecoder),
    /// Unrecognised section; its lines are skipped
    Skipped,
}

/// Assembles sections from classified lines
pub struct SectionReader<'a> {
    config: &'a LasReaderConfiguration,
    current: Current,
    version: Section<HeaderItem>,
    well: Section<HeaderItem>,
    curves: Section<CurveDefinition>,
    params: Section<HeaderItem>,
    other: Vec<String>,
    /// Decoded data once the `~A` section has been closed
    data: Option<CurveStore>,
    null_value: Option<f64>,
    notifications: NotificationCollection,
}

impl<'a> SectionReader<'a> {
    /// Create a new section reader
    pub fn new(config: &'a LasReaderConfiguration) -> Self {
        Self {
            config,
            current: Current::Start,
            version: Section::new(),
            well: Section::new(),
            curves: Section::new(),
            params: Section::new(),
            other: Vec::new(),
            data: None,
            null_value: None,
            notifications: NotificationCollection::new(),
        }
    }

    /// Consume one classified line
    pub fn accept(&mut self, line: ClassifiedLine) -> Result<()> {
        match line.kind {
            LineKind::SectionHeader(title) => self.open_section(line.number, &title),
            LineKind::Blank => {
                if let Current::Ascii(decoder) = &mut self.current {
                    decoder.push_blank(line.number);
                }
                Ok(())
            }
            LineKind::Content(text) => self.read_content(line.number, &text),
        }
    }

    /// Close the last section and build the document
    pub fn finish(mut self) -> Result<LasDocument> {
        self.close_section()?;

        let data = self
            .data
            .take()
            .ok_or_else(|| LasError::MissingRequiredSection("~A (ASCII data)".to_string()))?;

        let null_value = self.null_value.unwrap_or(self.config.default_null);
        let mut document = LasDocument::from_sections(
            self.version,
            self.well,
            self.curves,
            self.params,
            self.other,
            data,
            null_value,
        );
        document.notifications = self.notifications;
        document.check_depth_range();

        if self.config.eager {
            document.materialize_all(self.config.parallel);
        }
        Ok(document)
    }

    fn open_section(&mut self, line: usize, title: &str) -> Result<()> {
        self.close_section()?;

        let Some(kind) = SectionKind::from_title(title) else {
            if title.is_empty() {
                return Err(LasError::MalformedSection {
                    line,
                    message: "section header without a name".to_string(),
                });
            }
            self.notifications.notify(
                NotificationType::NotSupported,
                format!("line {}: section ~{} skipped", line, title),
            );
            self.current = Current::Skipped;
            return Ok(());
        };

        if self.data.is_some() && matches!(kind, SectionKind::Ascii | SectionKind::Curve) {
            return Err(LasError::MalformedSection {
                line,
                message: format!("~{} after the ~A section", kind),
            });
        }

        self.current = match kind {
            SectionKind::Ascii => Current::Ascii(MatrixDecoder::new(
                self.curves.len(),
                self.wrap_mode(),
                self.delimiter(),
            )),
            SectionKind::Other => Current::Other,
            header => Current::Header(header),
        };
        Ok(())
    }

    fn close_section(&mut self) -> Result<()> {
        if let Current::Ascii(decoder) = std::mem::replace(&mut self.current, Current::Skipped) {
            self.data = Some(decoder.finish()?);
        }
        Ok(())
    }

    fn read_content(&mut self, line: usize, text: &str) -> Result<()> {
        match &mut self.current {
            Current::Start => Err(LasError::MalformedSection {
                line,
                message: format!("content before any section header: '{}'", text.trim()),
            }),
            Current::Header(kind) => {
                let kind = *kind;
                let leniency = if kind == SectionKind::Curve {
                    Leniency::Curve
                } else {
                    Leniency::Strict
                };
                let parsed = parse_header_line(text, line, leniency)?;
                self.insert_item(kind, line, parsed)
            }
            Current::Other => {
                self.other.push(text.to_string());
                Ok(())
            }
            Current::Ascii(decoder) => decoder.push_line(line, text),
            Current::Skipped => Ok(()),
        }
    }

    fn insert_item(
        &mut self,
        kind: SectionKind,
        line: usize,
        parsed: ParsedHeaderLine,
    ) -> Result<()> {
        let ParsedHeaderLine { item, degraded } = parsed;
        if degraded {
            self.notifications.notify(
                NotificationType::Warning,
                format!("line {}: no '.' after mnemonic {} in ~{}", line, item.mnemonic, kind),
            );
        }

        if kind == SectionKind::Curve {
            self.insert_curve(line, item);
            return Ok(());
        }

        if kind == SectionKind::Well && item.mnemonic == "NULL" {
            let value = item.numeric_value().ok_or_else(|| LasError::NumericParse {
                line,
                token: item.value.clone(),
            })?;
            self.null_value = Some(value);
        }

        let section = match kind {
            SectionKind::Version => &mut self.version,
            SectionKind::Well => &mut self.well,
            _ => &mut self.params,
        };
        if let Some(old) = section.insert(item) {
            self.notifications.notify(
                NotificationType::Warning,
                format!(
                    "line {}: duplicate {} in ~{} overrides earlier value",
                    line, old.mnemonic, kind
                ),
            );
        }
        Ok(())
    }

    /// Append a curve, renaming repeated mnemonics `GR`, `GR:1`, `GR:2`
    fn insert_curve(&mut self, line: usize, mut item: HeaderItem) {
        if self.curves.contains(&item.mnemonic) {
            let original = item.mnemonic.clone();
            let mut n = 1;
            while self.curves.contains(&format!("{}:{}", original, n)) {
                n += 1;
            }
            item.mnemonic = format!("{}:{}", original, n);
            self.notifications.notify(
                NotificationType::Info,
                format!("line {}: duplicate curve {} renamed to {}", line, original, item.mnemonic),
            );
        }
        self.curves.push_curve(item);
    }

    fn wrap_mode(&mut self) -> WrapMode {
        let Some(item) = self.version.get("WRAP") else {
            return WrapMode::NoWrap;
        };
        match WrapMode::from_value(&item.value) {
            Some(mode) => mode,
            None => {
                let value = item.value.clone();
                self.notifications.notify(
                    NotificationType::Warning,
                    format!("unrecognised WRAP value '{}', reading as NO", value),
                );
                WrapMode::NoWrap
            }
        }
    }

    fn delimiter(&mut self) -> Delimiter {
        let Some(item) = self.version.get("DLM") else {
            return Delimiter::Space;
        };
        match Delimiter::from_value(&item.value) {
            Some(delimiter) => delimiter,
            None => {
                let value = item.value.clone();
                self.notifications.notify(
                    NotificationType::NotSupported,
                    format!("unsupported DLM value '{}', reading as SPACE", value),
                );
                Delimiter::Space
            }
        }
    }
}
