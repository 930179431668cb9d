//! `~A` data matrix decoder

use super::CurveStore;
use crate::error::{LasError, Result};
use crate::types::{Delimiter, WrapMode};

/// Incremental decoder for the lines of an `~A` section.
///
/// Lines are fed in file order with [`push_line`](Self::push_line); every
/// token is parsed immediately so that a bad number fails the read at the
/// line it appears on. [`finish`](Self::finish) fixes the row count.
#[derive(Debug)]
pub struct MatrixDecoder {
    curve_count: usize,
    wrap: WrapMode,
    delimiter: Delimiter,
    values: Vec<f64>,
    /// Tokens accumulated for the row currently being assembled
    pending: usize,
    /// First blank line seen since the last data line
    blank_line: Option<usize>,
    last_line: usize,
}

impl MatrixDecoder {
    /// Create a decoder for `curve_count` columns
    pub fn new(curve_count: usize, wrap: WrapMode, delimiter: Delimiter) -> Self {
        Self {
            curve_count,
            wrap,
            delimiter,
            values: Vec::new(),
            pending: 0,
            blank_line: None,
            last_line: 0,
        }
    }

    /// Record a blank line; only an error if more data follows it
    pub fn push_blank(&mut self, line: usize) {
        self.blank_line.get_or_insert(line);
    }

    /// Decode one physical data line
    pub fn push_line(&mut self, line: usize, text: &str) -> Result<()> {
        if let Some(blank) = self.blank_line {
            return Err(LasError::MalformedSection {
                line: blank,
                message: "blank line inside ~A data".to_string(),
            });
        }
        self.last_line = line;

        let before = self.values.len();
        for token in self.tokens(text) {
            let value = parse_value(token).ok_or_else(|| LasError::NumericParse {
                line,
                token: token.to_string(),
            })?;
            self.values.push(value);
        }
        let found = self.values.len() - before;
        if found == 0 {
            return Ok(());
        }

        if self.curve_count == 0 {
            return Err(LasError::MalformedSection {
                line,
                message: "~A data without any curve in ~Curve".to_string(),
            });
        }

        match self.wrap {
            WrapMode::NoWrap => {
                if found < self.curve_count {
                    return Err(LasError::TruncatedRow {
                        line,
                        expected: self.curve_count,
                        found,
                    });
                }
                if found > self.curve_count {
                    return Err(LasError::MalformedRow {
                        line,
                        expected: self.curve_count,
                        found,
                    });
                }
            }
            WrapMode::Wrap => {
                self.pending = (self.pending + found) % self.curve_count;
            }
        }
        Ok(())
    }

    /// Number of complete rows decoded so far
    pub fn row_count(&self) -> usize {
        if self.curve_count == 0 {
            0
        } else {
            self.values.len() / self.curve_count
        }
    }

    /// Finish decoding; a partial trailing row is an error
    pub fn finish(self) -> Result<CurveStore> {
        if self.pending != 0 {
            return Err(LasError::TruncatedRow {
                line: self.last_line,
                expected: self.curve_count,
                found: self.pending,
            });
        }
        CurveStore::from_rows(self.values, self.curve_count)
    }

    fn tokens<'t>(&self, text: &'t str) -> Box<dyn Iterator<Item = &'t str> + 't> {
        match self.delimiter {
            Delimiter::Space | Delimiter::Tab => Box::new(text.split_whitespace()),
            Delimiter::Comma => {
                if text.trim().is_empty() {
                    Box::new(std::iter::empty())
                } else {
                    Box::new(text.split(',').map(str::trim))
                }
            }
        }
    }
}

/// Parse one numeric token.
///
/// Accepts anything `f64::from_str` does (sign, exponent, `NaN`) plus the
/// Fortran `D` exponent (`1.5D+02`).
pub(crate) fn parse_value(token: &str) -> Option<f64> {
    if let Ok(value) = token.parse::<f64>() {
        return Some(value);
    }
    if token.contains(['D', 'd']) {
        return token.replace(['D', 'd'], "E").parse().ok();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_wrapped_rows() {
        let mut decoder = MatrixDecoder::new(3, WrapMode::NoWrap, Delimiter::Space);
        decoder.push_line(10, "100.0 45.2 2.35").unwrap();
        decoder.push_line(11, "  100.5   48.1\t2.38  ").unwrap();
        decoder.push_line(12, "101.0 42.0 2.34").unwrap();
        assert_eq!(decoder.row_count(), 3);

        let store = decoder.finish().unwrap();
        assert_eq!(store.column(1).unwrap(), &[45.2, 48.1, 42.0]);
    }

    #[test]
    fn test_scientific_notation_and_signs() {
        let mut decoder = MatrixDecoder::new(4, WrapMode::NoWrap, Delimiter::Space);
        decoder.push_line(1, "+1.5 -2.0E+01 3e-2 1.0D+03").unwrap();
        let store = decoder.finish().unwrap();
        assert_eq!(store.row(0).unwrap(), &[1.5, -20.0, 0.03, 1000.0]);
    }

    #[test]
    fn test_null_value_kept_verbatim() {
        let mut decoder = MatrixDecoder::new(2, WrapMode::NoWrap, Delimiter::Space);
        decoder.push_line(1, "1670.0 -999.25").unwrap();
        let store = decoder.finish().unwrap();
        assert_eq!(store.column(1).unwrap(), &[-999.25]);
    }

    #[test]
    fn test_numeric_parse_error() {
        let mut decoder = MatrixDecoder::new(2, WrapMode::NoWrap, Delimiter::Space);
        let err = decoder.push_line(7, "1.0 abc").unwrap_err();
        match err {
            LasError::NumericParse { line, token } => {
                assert_eq!(line, 7);
                assert_eq!(token, "abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_short_non_wrapped_line() {
        let mut decoder = MatrixDecoder::new(3, WrapMode::NoWrap, Delimiter::Space);
        let err = decoder.push_line(5, "1.0 2.0").unwrap_err();
        assert!(matches!(
            err,
            LasError::TruncatedRow { line: 5, expected: 3, found: 2 }
        ));
    }

    #[test]
    fn test_long_non_wrapped_line() {
        let mut decoder = MatrixDecoder::new(2, WrapMode::NoWrap, Delimiter::Space);
        let err = decoder.push_line(5, "1.0 2.0 3.0").unwrap_err();
        assert!(matches!(err, LasError::MalformedRow { found: 3, .. }));
    }

    #[test]
    fn test_wrapped_two_lines_per_row() {
        let mut decoder = MatrixDecoder::new(3, WrapMode::Wrap, Delimiter::Space);
        decoder.push_line(1, "100.0").unwrap();
        decoder.push_line(2, "45.2 2.35").unwrap();
        decoder.push_line(3, "100.5").unwrap();
        decoder.push_line(4, "48.1 2.38").unwrap();
        let store = decoder.finish().unwrap();
        assert_eq!(store.row_count(), 2);
        assert_eq!(store.column(0).unwrap(), &[100.0, 100.5]);
        assert_eq!(store.column(2).unwrap(), &[2.35, 2.38]);
    }

    #[test]
    fn test_wrapped_trailing_partial_row() {
        let mut decoder = MatrixDecoder::new(3, WrapMode::Wrap, Delimiter::Space);
        decoder.push_line(1, "100.0").unwrap();
        decoder.push_line(2, "45.2 2.35").unwrap();
        decoder.push_line(3, "100.5").unwrap();
        let err = decoder.finish().unwrap_err();
        assert!(matches!(
            err,
            LasError::TruncatedRow { line: 3, expected: 3, found: 1 }
        ));
    }

    #[test]
    fn test_blank_line_then_data() {
        let mut decoder = MatrixDecoder::new(1, WrapMode::NoWrap, Delimiter::Space);
        decoder.push_line(1, "1.0").unwrap();
        decoder.push_blank(2);
        let err = decoder.push_line(3, "2.0").unwrap_err();
        assert!(matches!(err, LasError::MalformedSection { line: 2, .. }));
    }

    #[test]
    fn test_trailing_blank_lines_allowed() {
        let mut decoder = MatrixDecoder::new(1, WrapMode::NoWrap, Delimiter::Space);
        decoder.push_line(1, "1.0").unwrap();
        decoder.push_blank(2);
        decoder.push_blank(3);
        assert_eq!(decoder.finish().unwrap().row_count(), 1);
    }

    #[test]
    fn test_comma_delimited() {
        let mut decoder = MatrixDecoder::new(3, WrapMode::NoWrap, Delimiter::Comma);
        decoder.push_line(1, "100.0, 45.2 ,2.35").unwrap();
        let store = decoder.finish().unwrap();
        assert_eq!(store.row(0).unwrap(), &[100.0, 45.2, 2.35]);
    }

    #[test]
    fn test_data_without_curves() {
        let mut decoder = MatrixDecoder::new(0, WrapMode::NoWrap, Delimiter::Space);
        assert!(decoder.push_line(1, "1.0 2.0").is_err());
    }
}
