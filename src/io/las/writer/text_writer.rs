//! Line-level LAS text writer

use crate::error::Result;
use crate::header::HeaderItem;
use std::io::Write;

/// Column widths shared by all lines of one header section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderLayout {
    /// Width of the `MNEM.UNIT` column
    pub name_width: usize,
    /// Width of the value column
    pub value_width: usize,
}

impl HeaderLayout {
    /// Widest `MNEM.UNIT` and value among `items`
    pub fn for_items<'i>(items: impl IntoIterator<Item = &'i HeaderItem>) -> Self {
        items.into_iter().fold(Self::default(), |layout, item| Self {
            name_width: layout
                .name_width
                .max(item.mnemonic.chars().count() + 1 + item.unit.chars().count()),
            value_width: layout.value_width.max(item.value.chars().count()),
        })
    }
}

/// LAS text stream writer
pub struct LasTextWriter<W: Write> {
    writer: W,
}

impl<W: Write> LasTextWriter<W> {
    /// Create a new LAS text writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write a `~` section header line
    pub fn write_section_title(&mut self, title: &str) -> Result<()> {
        writeln!(self.writer, "~{}", title)?;
        Ok(())
    }

    /// Write one line, dropping trailing whitespace
    pub fn write_line(&mut self, text: &str) -> Result<()> {
        writeln!(self.writer, "{}", text.trim_end())?;
        Ok(())
    }

    /// Write ` MNEM.UNIT  VALUE : DESCRIPTION` padded to `layout`.
    ///
    /// A section without values (the usual `~Curve`) gets no value column.
    pub fn write_header_item(&mut self, item: &HeaderItem, layout: HeaderLayout) -> Result<()> {
        let name = format!("{}.{}", item.mnemonic, item.unit);
        if layout.value_width == 0 && item.value.is_empty() {
            let line = format!(
                " {:<name_width$} : {}",
                name,
                item.description,
                name_width = layout.name_width,
            );
            return self.write_line(&line);
        }
        let line = format!(
            " {:<name_width$} {:<value_width$} : {}",
            name,
            item.value,
            item.description,
            name_width = layout.name_width,
            value_width = layout.value_width,
        );
        self.write_line(&line)
    }

    /// Write one line of already formatted data values
    pub fn write_values(&mut self, values: &[String], separator: &str) -> Result<()> {
        writeln!(self.writer, " {}", values.join(separator))?;
        Ok(())
    }

    /// Flush the underlying writer
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Get the inner writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}
