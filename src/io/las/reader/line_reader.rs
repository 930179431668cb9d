//! LAS physical line reader and classifier

use crate::error::{LasError, Result};
use encoding_rs::Encoding;
use std::io::BufRead;

/// What a physical line is, once comments are discarded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Empty or whitespace-only line
    Blank,
    /// `~` line; holds the title text after the `~`
    SectionHeader(String),
    /// Any other line, trailing whitespace removed
    Content(String),
}

/// A classified line with its 1-based physical line number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    pub number: usize,
    pub kind: LineKind,
}

/// Reads a LAS stream one physical line at a time.
///
/// Accepts `\n` and `\r\n` line endings. Full-line `#` comments are skipped
/// here and never reach the section reader.
pub struct LasLineReader<R: BufRead> {
    reader: R,
    line_number: usize,
    buffer: Vec<u8>,
    /// Non-UTF8 fallback encoding.  `None` means use Latin-1 (byte-to-char).
    encoding: Option<&'static Encoding>,
}

impl<R: BufRead> LasLineReader<R> {
    /// Create a new line reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            buffer: Vec::new(),
            encoding: None,
        }
    }

    /// Set the fallback encoding for lines that are not valid UTF-8
    pub fn set_encoding(&mut self, encoding: Option<&'static Encoding>) {
        self.encoding = encoding;
    }

    /// Number of the last physical line read
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read the next non-comment line
    pub fn next_line(&mut self) -> Result<Option<ClassifiedLine>> {
        loop {
            let text = match self.read_raw_line()? {
                Some(text) => text,
                None => return Ok(None),
            };

            let content = text.trim_start();
            let kind = if content.is_empty() {
                LineKind::Blank
            } else if content.starts_with('#') {
                continue;
            } else if let Some(title) = content.strip_prefix('~') {
                LineKind::SectionHeader(title.trim().to_string())
            } else {
                LineKind::Content(text)
            };

            return Ok(Some(ClassifiedLine {
                number: self.line_number,
                kind,
            }));
        }
    }

    /// Read a single line, decode it and trim trailing whitespace
    fn read_raw_line(&mut self) -> Result<Option<String>> {
        self.buffer.clear();
        if self.reader.read_until(b'\n', &mut self.buffer)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        let line = match std::str::from_utf8(&self.buffer) {
            Ok(s) => s.to_string(),
            Err(_) => {
                if let Some(enc) = self.encoding {
                    let (decoded, _, had_errors) = enc.decode(&self.buffer);
                    if had_errors {
                        return Err(LasError::Encoding(format!(
                            "line {} is not valid {}",
                            self.line_number,
                            enc.name()
                        )));
                    }
                    decoded.into_owned()
                } else {
                    // Latin-1 is a 1:1 mapping of bytes 0-255 to Unicode code points
                    self.buffer.iter().map(|&b| b as char).collect()
                }
            }
        };

        let line = if self.line_number == 1 {
            line.trim_start_matches('\u{feff}')
        } else {
            line.as_str()
        };

        // Trims the newline, any \r before it and trailing blanks
        Ok(Some(line.trim_end().to_string()))
    }
}
