//! Header line field splitter
//!
//! A header line has the shape `MNEM.UNIT  VALUE : DESCRIPTION`. Real files
//! bend this: the unit may be missing, values may contain colons (`12:30:00`)
//! and whitespace runs vary. The rules applied here:
//!
//! - mnemonic is everything before the first `.`, trimmed
//! - unit is the token glued to the `.`, up to the first whitespace
//! - description is everything after the last `:`, value is what lies between

use crate::error::{LasError, Result};
use crate::header::HeaderItem;
use nom::{
    bytes::complete::{take_till, take_till1},
    character::complete::char,
    sequence::terminated,
    IResult,
};

/// Result of splitting one header line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedHeaderLine {
    pub item: HeaderItem,
    /// The line had no mnemonic `.` and was split with the relaxed rules
    pub degraded: bool,
}

/// Which relaxed rules apply when a line has no `.`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leniency {
    /// Only a `NULL` line may omit the `.`
    Strict,
    /// Curve lines may omit the `.` too (mnemonic is the first token)
    Curve,
}

fn mnemonic(input: &str) -> IResult<&str, &str> {
    terminated(take_till(|c| c == '.'), char('.'))(input)
}

fn unit_token(input: &str) -> IResult<&str, &str> {
    take_till(char::is_whitespace)(input)
}

fn first_token(input: &str) -> IResult<&str, &str> {
    take_till1(|c: char| c.is_whitespace() || c == ':')(input)
}

/// Whether the first `.` sits in a value or description instead of ending a
/// mnemonic: `NULL -999.25`, `STEP 0.5 : STEP`, `RHOB : density g.cc`
fn dot_in_value(before_dot: &str) -> bool {
    let mut words = before_dot.split_whitespace();
    let (Some(first), Some(_)) = (words.next(), words.next()) else {
        return false;
    };
    let last = before_dot.split_whitespace().last().unwrap_or_default();
    let numeric = last.trim_start_matches(['+', '-']).chars().all(|c| c.is_ascii_digit());
    first.eq_ignore_ascii_case("NULL") || numeric || before_dot.contains(':')
}

/// Split `rest` into value and description on its last `:`
fn value_and_description(rest: &str) -> (&str, &str) {
    match rest.rfind(':') {
        Some(pos) => (rest[..pos].trim(), rest[pos + 1..].trim()),
        None => (rest.trim(), ""),
    }
}

/// Split one header line into its four fields
pub fn parse_header_line(text: &str, line: usize, leniency: Leniency) -> Result<ParsedHeaderLine> {
    let trimmed = text.trim();

    // Mnemonics may hold spaces (`DATE LOGGED.`), so the first `.` ends the
    // mnemonic unless it belongs to a number or follows the `:`.
    if let Some((rest, mnem)) = mnemonic(trimmed)
        .ok()
        .map(|(rest, mnem)| (rest, mnem.trim()))
        .filter(|(_, mnem)| !dot_in_value(mnem))
    {
        if mnem.is_empty() {
            return Err(LasError::EmptyMnemonic {
                line,
                text: trimmed.to_string(),
            });
        }

        let (mut after_unit, mut unit) = unit_token(rest).unwrap_or((rest, ""));
        // A colon glued to the unit (`DEPT.M:depth`) still ends the value
        // when no later colon exists.
        if let Some(last_colon) = rest.rfind(':') {
            if last_colon < unit.len() {
                unit = &rest[..last_colon];
                after_unit = &rest[last_colon..];
            }
        }

        let (value, description) = value_and_description(after_unit);
        return Ok(ParsedHeaderLine {
            item: HeaderItem::new(mnem, unit.trim(), value, description),
            degraded: false,
        });
    }

    let (rest, token) = first_token(trimmed).map_err(|_| LasError::MissingMnemonicDelimiter {
        line,
        text: trimmed.to_string(),
    })?;

    let is_null = token.eq_ignore_ascii_case("NULL");
    if !is_null && leniency != Leniency::Curve {
        return Err(LasError::MissingMnemonicDelimiter {
            line,
            text: trimmed.to_string(),
        });
    }

    let mnem = if is_null { "NULL" } else { token };
    let (value, description) = value_and_description(rest);
    Ok(ParsedHeaderLine {
        item: HeaderItem::new(mnem, "", value, description),
        degraded: true,
    })
}
