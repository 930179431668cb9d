//! Core LAS types: format versions, section kinds and data layout modes

use std::fmt;

/// LAS format version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LasVersion {
    /// LAS 1.2 (read only)
    V1_2,
    /// LAS 2.0
    #[default]
    V2_0,
    /// LAS 3.0 (single data section subset)
    V3_0,
}

impl LasVersion {
    /// Parse the value of a `VERS.` item ("2.0", "2", "3.00", ...).
    pub fn from_version_string(value: &str) -> Option<Self> {
        let number: f64 = value.trim().parse().ok()?;
        if (number - 1.2).abs() < 1e-9 {
            Some(LasVersion::V1_2)
        } else if (number - 2.0).abs() < 1e-9 {
            Some(LasVersion::V2_0)
        } else if (number - 3.0).abs() < 1e-9 {
            Some(LasVersion::V3_0)
        } else {
            None
        }
    }

    /// Value written in the `VERS.` line
    pub fn as_str(&self) -> &'static str {
        match self {
            LasVersion::V1_2 => "1.2",
            LasVersion::V2_0 => "2.0",
            LasVersion::V3_0 => "3.0",
        }
    }

    /// Description written after the `VERS.` value
    pub fn description(&self) -> &'static str {
        match self {
            LasVersion::V1_2 => "CWLS LOG ASCII STANDARD -VERSION 1.2",
            LasVersion::V2_0 => "CWLS LOG ASCII STANDARD -VERSION 2.0",
            LasVersion::V3_0 => "CWLS LOG ASCII STANDARD -VERSION 3.0",
        }
    }

    /// Whether the writer can produce this version
    pub fn is_writable(&self) -> bool {
        matches!(self, LasVersion::V2_0 | LasVersion::V3_0)
    }
}

impl fmt::Display for LasVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Section of a LAS file, identified by the first letter after `~`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Version,
    Well,
    Curve,
    Parameter,
    Other,
    Ascii,
}

impl SectionKind {
    /// Identify a section from its title (the text after `~`).
    ///
    /// Only the first letter counts, case-insensitively, so `~W`, `~Well`
    /// and `~WELL INFORMATION` are all the Well section.
    pub fn from_title(title: &str) -> Option<Self> {
        match title.trim_start().chars().next()?.to_ascii_uppercase() {
            'V' => Some(SectionKind::Version),
            'W' => Some(SectionKind::Well),
            'C' => Some(SectionKind::Curve),
            'P' => Some(SectionKind::Parameter),
            'O' => Some(SectionKind::Other),
            'A' => Some(SectionKind::Ascii),
            _ => None,
        }
    }

    /// Title written by the writer after `~`
    pub fn title(&self) -> &'static str {
        match self {
            SectionKind::Version => "Version Information",
            SectionKind::Well => "Well Information",
            SectionKind::Curve => "Curve Information",
            SectionKind::Parameter => "Parameter Information",
            SectionKind::Other => "Other Information",
            SectionKind::Ascii => "A",
        }
    }

    /// Whether lines of this section are `MNEM.UNIT VALUE : DESCRIPTION` items
    pub fn has_header_items(&self) -> bool {
        matches!(
            self,
            SectionKind::Version | SectionKind::Well | SectionKind::Curve | SectionKind::Parameter
        )
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SectionKind::Version => "Version",
            SectionKind::Well => "Well",
            SectionKind::Curve => "Curve",
            SectionKind::Parameter => "Parameter",
            SectionKind::Other => "Other",
            SectionKind::Ascii => "ASCII",
        };
        f.write_str(name)
    }
}

/// Layout of the `~A` data section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WrapMode {
    /// One data row per physical line
    #[default]
    NoWrap,
    /// One data row spread over several physical lines
    Wrap,
}

impl WrapMode {
    /// Parse a `WRAP.` value; `None` for anything but YES/NO
    pub fn from_value(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("YES") {
            Some(WrapMode::Wrap)
        } else if value.eq_ignore_ascii_case("NO") {
            Some(WrapMode::NoWrap)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WrapMode::NoWrap => "NO",
            WrapMode::Wrap => "YES",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            WrapMode::NoWrap => "ONE LINE PER DEPTH STEP",
            WrapMode::Wrap => "MULTIPLE LINES PER DEPTH STEP",
        }
    }
}

/// Separator between values of one data row (LAS 3.0 `DLM.` item)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Delimiter {
    /// Runs of spaces (LAS 2.0, and `DLM. SPACE`)
    #[default]
    Space,
    /// `DLM. TAB`; tokenised exactly like `Space`
    Tab,
    /// `DLM. COMMA`
    Comma,
}

impl Delimiter {
    /// Parse a `DLM.` value
    pub fn from_value(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "SPACE" | "" => Some(Delimiter::Space),
            "TAB" => Some(Delimiter::Tab),
            "COMMA" => Some(Delimiter::Comma),
            _ => None,
        }
    }
}
