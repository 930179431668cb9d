//! LAS section writers
//!
//! Sections are always written in the order the format prescribes:
//! `~Version`, `~Well`, `~Curve`, `~Parameter`, `~Other`, `~A`.

use super::text_writer::{HeaderLayout, LasTextWriter};
use crate::document::LasDocument;
use crate::error::Result;
use crate::header::HeaderItem;
use crate::types::{Delimiter, LasVersion, SectionKind, WrapMode};
use std::io::Write;

/// Writes all LAS sections
pub struct SectionWriter<'a, W: Write> {
    writer: &'a mut LasTextWriter<W>,
}

impl<'a, W: Write> SectionWriter<'a, W> {
    /// Create a new section writer
    pub fn new(writer: &'a mut LasTextWriter<W>) -> Self {
        Self { writer }
    }

    /// Write the `~Version` section.
    ///
    /// VERS always states `version`. Its stored description is kept only if
    /// the stored value already is that version. WRAP reflects the layout
    /// the data section is written in.
    pub fn write_version(&mut self, document: &LasDocument, version: LasVersion) -> Result<()> {
        let section = document.version();

        let vers = match section.get("VERS") {
            Some(item) if LasVersion::from_version_string(&item.value) == Some(version) => {
                HeaderItem::new(
                    "VERS",
                    item.unit.as_str(),
                    version.as_str(),
                    item.description.as_str(),
                )
            }
            _ => HeaderItem::new("VERS", "", version.as_str(), version.description()),
        };

        let wrap_mode = document.wrap_mode();
        let wrap = match section.get("WRAP") {
            Some(item) => HeaderItem::new(
                "WRAP",
                item.unit.as_str(),
                wrap_mode.as_str(),
                item.description.as_str(),
            ),
            None => HeaderItem::new("WRAP", "", wrap_mode.as_str(), wrap_mode.description()),
        };

        let mut items = vec![&vers, &wrap];
        items.extend(section.iter().filter(|i| i.mnemonic != "VERS" && i.mnemonic != "WRAP"));

        self.write_items(SectionKind::Version, &items)
    }

    /// Write the `~Well` section
    pub fn write_well(&mut self, document: &LasDocument) -> Result<()> {
        let items: Vec<&HeaderItem> = document.well().items().collect();
        self.write_items(SectionKind::Well, &items)
    }

    /// Write the `~Curve` section.
    ///
    /// Curve values (LAS 2.0 API codes) are written back when any curve has
    /// one; otherwise the section has no value column.
    pub fn write_curves(&mut self, document: &LasDocument) -> Result<()> {
        let items: Vec<&HeaderItem> = document.curves().items().collect();
        self.write_items(SectionKind::Curve, &items)
    }

    /// Write the `~Parameter` section, if there is one
    pub fn write_params(&mut self, document: &LasDocument) -> Result<()> {
        if document.params().is_empty() {
            return Ok(());
        }
        let items: Vec<&HeaderItem> = document.params().items().collect();
        self.write_items(SectionKind::Parameter, &items)
    }

    /// Write the `~Other` section, if there is one
    pub fn write_other(&mut self, document: &LasDocument) -> Result<()> {
        if document.other().is_empty() {
            return Ok(());
        }
        self.writer.write_section_title(SectionKind::Other.title())?;
        for line in document.other() {
            self.writer.write_line(line)?;
        }
        Ok(())
    }

    /// Write the `~A` section.
    ///
    /// Every value is printed with `precision` decimals and right aligned to
    /// the widest value of its column. Wrapped documents put the index value
    /// alone on the first line of a row and fill continuation lines up to
    /// `wrap_width` characters.
    pub fn write_data(
        &mut self,
        document: &LasDocument,
        precision: usize,
        wrap_width: usize,
    ) -> Result<()> {
        let names = document.curve_names();
        let title = if names.is_empty() {
            SectionKind::Ascii.title().to_string()
        } else {
            format!("{}  {}", SectionKind::Ascii.title(), names.join("  "))
        };
        self.writer.write_section_title(&title)?;

        let widths = column_widths(document, precision);
        let separator = match document.delimiter() {
            Delimiter::Space => " ",
            Delimiter::Tab => "\t",
            Delimiter::Comma => ", ",
        };
        let wrap = document.wrap_mode() == WrapMode::Wrap;

        let mut values: Vec<String> = Vec::with_capacity(widths.len());
        for row in document.rows() {
            values.clear();
            values.extend(
                row.iter()
                    .zip(&widths)
                    .map(|(v, &w)| format!("{:>w$.p$}", v, w = w, p = precision)),
            );

            if !wrap {
                self.writer.write_values(&values, separator)?;
                continue;
            }

            self.writer.write_values(&values[..1], separator)?;
            let mut start = 1;
            let mut line_width = 0;
            for (i, value) in values.iter().enumerate().skip(1) {
                let width = value.len() + separator.len();
                if i > start && line_width + width > wrap_width {
                    self.writer.write_values(&values[start..i], separator)?;
                    start = i;
                    line_width = 0;
                }
                line_width += width;
            }
            if start < values.len() {
                self.writer.write_values(&values[start..], separator)?;
            }
        }
        Ok(())
    }

    fn write_items(&mut self, kind: SectionKind, items: &[&HeaderItem]) -> Result<()> {
        self.writer.write_section_title(kind.title())?;
        let layout = HeaderLayout::for_items(items.iter().copied());
        for item in items {
            self.writer.write_header_item(item, layout)?;
        }
        Ok(())
    }
}

/// Widest formatted value of every column
fn column_widths(document: &LasDocument, precision: usize) -> Vec<usize> {
    let mut widths = vec![0; document.curves().len()];
    for row in document.rows() {
        for (width, value) in widths.iter_mut().zip(row) {
            *width = (*width).max(format!("{:.p$}", value, p = precision).len());
        }
    }
    widths
}
