//! LAS document structure

use crate::data::CurveStore;
use crate::error::{LasError, Result};
use crate::header::{CurveDefinition, HeaderItem, Section};
use crate::io::las::DEFAULT_NULL_VALUE;
use crate::notification::{NotificationCollection, NotificationType};
use crate::types::{Delimiter, LasVersion, SectionKind, WrapMode};
use std::sync::Arc;

/// Borrowed view of one header section, as returned by [`LasDocument::section`]
#[derive(Debug, Clone, Copy)]
pub enum SectionRef<'a> {
    Items(&'a Section<HeaderItem>),
    Curves(&'a Section<CurveDefinition>),
}

impl<'a> SectionRef<'a> {
    /// Get a header item by mnemonic
    pub fn get(&self, mnemonic: &str) -> Option<&'a HeaderItem> {
        match *self {
            SectionRef::Items(section) => section.get(mnemonic),
            SectionRef::Curves(section) => section.get(mnemonic).map(|c| &c.item),
        }
    }

    /// Iterate over items in declaration order
    pub fn items(&self) -> Box<dyn Iterator<Item = &'a HeaderItem> + 'a> {
        match *self {
            SectionRef::Items(section) => Box::new(section.items()),
            SectionRef::Curves(section) => Box::new(section.items()),
        }
    }

    /// Mnemonics in declaration order
    pub fn mnemonics(&self) -> Vec<&'a str> {
        self.items().map(|i| i.mnemonic.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        match *self {
            SectionRef::Items(section) => section.len(),
            SectionRef::Curves(section) => section.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Replacement fields for one header item; `None` keeps the current field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderOverride {
    pub unit: Option<String>,
    pub value: Option<String>,
    pub description: Option<String>,
}

impl HeaderOverride {
    /// Override only the description
    pub fn description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Default::default()
        }
    }

    /// Override only the value
    pub fn value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Default::default()
        }
    }

    fn check(&self, mnemonic: &str) -> Result<()> {
        let unit = self.unit.as_deref().unwrap_or_default();
        let description = self.description.as_deref().unwrap_or_default();
        check_writable_fields(&HeaderItem::new(mnemonic, unit, "", description))
    }

    fn apply(&self, item: &mut HeaderItem) {
        if let Some(unit) = &self.unit {
            item.unit = unit.clone();
        }
        if let Some(value) = &self.value {
            item.value = value.clone();
        }
        if let Some(description) = &self.description {
            item.description = description.clone();
        }
    }
}

/// A parsed LAS file.
///
/// Read-only once built. Curve samples are shared behind an `Arc`, so
/// documents derived with [`with_overrides`](Self::with_overrides) reuse the
/// data and its column cache.
#[derive(Debug, Clone)]
pub struct LasDocument {
    version: Section<HeaderItem>,
    well: Section<HeaderItem>,
    curves: Section<CurveDefinition>,
    params: Section<HeaderItem>,
    /// `~Other` section lines, comments and blank lines removed
    other: Vec<String>,
    data: Arc<CurveStore>,
    null_value: f64,
    /// Issues absorbed while reading
    pub(crate) notifications: NotificationCollection,
}

impl LasDocument {
    pub(crate) fn from_sections(
        version: Section<HeaderItem>,
        well: Section<HeaderItem>,
        curves: Section<CurveDefinition>,
        params: Section<HeaderItem>,
        other: Vec<String>,
        data: CurveStore,
        null_value: f64,
    ) -> Self {
        Self {
            version,
            well,
            curves,
            params,
            other,
            data: Arc::new(data),
            null_value,
            notifications: NotificationCollection::new(),
        }
    }

    // ==================== Sections ====================

    /// `~Version` section
    pub fn version(&self) -> &Section<HeaderItem> {
        &self.version
    }

    /// `~Well` section
    pub fn well(&self) -> &Section<HeaderItem> {
        &self.well
    }

    /// `~Curve` section
    pub fn curves(&self) -> &Section<CurveDefinition> {
        &self.curves
    }

    /// `~Parameter` section
    pub fn params(&self) -> &Section<HeaderItem> {
        &self.params
    }

    /// `~Other` section lines
    pub fn other(&self) -> &[String] {
        &self.other
    }

    /// Look up a header section by name.
    ///
    /// Names are matched like section titles, by first letter: `"Well"`,
    /// `"W"` and `"well information"` all find the Well section.
    pub fn section(&self, name: &str) -> Result<SectionRef<'_>> {
        SectionKind::from_title(name)
            .and_then(|kind| self.section_by_kind(kind))
            .ok_or_else(|| LasError::NotFound(format!("section '{}'", name)))
    }

    /// Header section of the given kind; `None` for Other and ASCII
    pub fn section_by_kind(&self, kind: SectionKind) -> Option<SectionRef<'_>> {
        match kind {
            SectionKind::Version => Some(SectionRef::Items(&self.version)),
            SectionKind::Well => Some(SectionRef::Items(&self.well)),
            SectionKind::Curve => Some(SectionRef::Curves(&self.curves)),
            SectionKind::Parameter => Some(SectionRef::Items(&self.params)),
            SectionKind::Other | SectionKind::Ascii => None,
        }
    }

    /// Header item by section and mnemonic
    pub fn header_item(&self, kind: SectionKind, mnemonic: &str) -> Result<&HeaderItem> {
        self.section_by_kind(kind)
            .and_then(|section| section.get(mnemonic))
            .ok_or_else(|| LasError::NotFound(format!("{} in ~{}", mnemonic, kind)))
    }

    // ==================== Curves ====================

    /// Curve mnemonics in declaration order
    pub fn curve_names(&self) -> Vec<&str> {
        self.curves.mnemonics().collect()
    }

    /// Curve definition by mnemonic
    pub fn curve_definition(&self, mnemonic: &str) -> Result<&CurveDefinition> {
        self.curves
            .get(mnemonic)
            .ok_or_else(|| LasError::NotFound(format!("curve {}", mnemonic)))
    }

    /// Samples of a curve, NULL sentinel values included verbatim
    pub fn curve_data(&self, mnemonic: &str) -> Result<&[f64]> {
        let index = self.curve_definition(mnemonic)?.index;
        self.data
            .column(index)
            .ok_or_else(|| LasError::NotFound(format!("data for curve {}", mnemonic)))
    }

    /// Samples of a curve with the NULL sentinel mapped to `None`
    pub fn curve_data_masked(&self, mnemonic: &str) -> Result<Vec<Option<f64>>> {
        let null = self.null_value;
        Ok(self
            .curve_data(mnemonic)?
            .iter()
            .map(|&v| if v == null { None } else { Some(v) })
            .collect())
    }

    /// Whether the curve's column has been split out of the matrix yet
    pub fn is_materialized(&self, mnemonic: &str) -> bool {
        self.curves
            .get(mnemonic)
            .is_some_and(|c| self.data.is_materialized(c.index))
    }

    /// Materialise every curve column now
    pub fn materialize_all(&self, parallel: bool) {
        self.data.materialize_all(parallel);
    }

    /// The first declared curve, conventionally depth or time
    pub fn index_curve(&self) -> Option<&CurveDefinition> {
        self.curves.get_index(0)
    }

    /// First and last value of the index curve
    pub fn depth_range(&self) -> Option<(f64, f64)> {
        let first = self.data.row(0)?.first().copied()?;
        let last = self.data.row(self.data.row_count() - 1)?.first().copied()?;
        Some((first, last))
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.data.row_count()
    }

    /// Iterate over data rows in file order
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.rows()
    }

    // ==================== Metadata ====================

    /// NULL sentinel of the data matrix
    pub fn null_value(&self) -> f64 {
        self.null_value
    }

    /// Version declared by `VERS.`, if recognised
    pub fn las_version(&self) -> Option<LasVersion> {
        self.version
            .get("VERS")
            .and_then(|item| LasVersion::from_version_string(&item.value))
    }

    /// Data layout declared by `WRAP.` (`NO` when absent or unrecognised)
    pub fn wrap_mode(&self) -> WrapMode {
        self.version
            .get("WRAP")
            .and_then(|item| WrapMode::from_value(&item.value))
            .unwrap_or_default()
    }

    /// Data delimiter declared by `DLM.` (space when absent or unrecognised)
    pub fn delimiter(&self) -> Delimiter {
        self.version
            .get("DLM")
            .and_then(|item| Delimiter::from_value(&item.value))
            .unwrap_or_default()
    }

    /// Issues absorbed while reading
    pub fn notifications(&self) -> &NotificationCollection {
        &self.notifications
    }

    // ==================== Derivation ====================

    /// Build a new document with some header items of one section replaced.
    ///
    /// The original document is left untouched. Mnemonics are kept; only
    /// unit, value and description can change. Fails with `NotFound` if a
    /// mnemonic is not in the section, and with `InvalidDocument` if a new
    /// description holds a `:` or a new unit holds whitespace or `:`.
    pub fn with_overrides<'o, I>(&self, kind: SectionKind, overrides: I) -> Result<LasDocument>
    where
        I: IntoIterator<Item = (&'o str, HeaderOverride)>,
    {
        let mut derived = self.clone();
        derived.notifications = NotificationCollection::new();

        for (mnemonic, change) in overrides {
            let not_found = || LasError::NotFound(format!("{} in ~{}", mnemonic, kind));
            let item = match kind {
                SectionKind::Version => derived.version.get_mut(mnemonic),
                SectionKind::Well => derived.well.get_mut(mnemonic),
                SectionKind::Parameter => derived.params.get_mut(mnemonic),
                SectionKind::Curve => derived.curves.get_mut(mnemonic).map(|c| &mut c.item),
                SectionKind::Other | SectionKind::Ascii => None,
            }
            .ok_or_else(not_found)?;
            change.check(mnemonic)?;
            change.apply(item);
        }

        if kind == SectionKind::Well {
            derived.null_value = null_from_well(&derived.well)?;
        }
        Ok(derived)
    }

    /// Record an advisory notification when the index curve does not span
    /// STRT..STOP. Never fails the read.
    pub(crate) fn check_depth_range(&mut self) {
        let Some((first, last)) = self.depth_range() else {
            return;
        };
        for (mnemonic, actual) in [("STRT", first), ("STOP", last)] {
            let Some(declared) = self.well.get(mnemonic).and_then(HeaderItem::numeric_value) else {
                continue;
            };
            if (declared - actual).abs() > 1e-6 * declared.abs().max(1.0) {
                self.notifications.notify(
                    NotificationType::Warning,
                    format!("{} is {} but the data has {}", mnemonic, declared, actual),
                );
            }
        }
    }
}

fn null_from_well(well: &Section<HeaderItem>) -> Result<f64> {
    match well.get("NULL") {
        Some(item) => item.numeric_value().ok_or_else(|| {
            LasError::InvalidDocument(format!("NULL value '{}' is not numeric", item.value))
        }),
        None => Ok(DEFAULT_NULL_VALUE),
    }
}

/// Builds a [`LasDocument`] in memory, for writing files from scratch.
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    version: Section<HeaderItem>,
    well: Section<HeaderItem>,
    params: Section<HeaderItem>,
    curves: Vec<(HeaderItem, Vec<f64>)>,
    other: Vec<String>,
}

impl DocumentBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `~Version` item (later items replace earlier ones)
    pub fn version_item(mut self, item: HeaderItem) -> Self {
        self.version.insert(item);
        self
    }

    /// Add a `~Well` item
    pub fn well_item(mut self, item: HeaderItem) -> Self {
        self.well.insert(item);
        self
    }

    /// Add a `~Parameter` item
    pub fn param_item(mut self, item: HeaderItem) -> Self {
        self.params.insert(item);
        self
    }

    /// Add a curve and its samples
    pub fn curve(mut self, item: HeaderItem, data: Vec<f64>) -> Self {
        self.curves.push((item, data));
        self
    }

    /// Add a `~Other` line
    pub fn other_line(mut self, line: impl Into<String>) -> Self {
        self.other.push(line.into());
        self
    }

    /// Validate and build the document
    pub fn build(self) -> Result<LasDocument> {
        let sections = [&self.version, &self.well, &self.params];
        if let Some(item) = sections
            .iter()
            .flat_map(|s| s.items())
            .chain(self.curves.iter().map(|(item, _)| item))
            .find(|item| !is_valid_mnemonic(&item.mnemonic))
        {
            return Err(LasError::InvalidDocument(format!(
                "invalid mnemonic '{}'",
                item.mnemonic
            )));
        }

        sections
            .iter()
            .flat_map(|s| s.items())
            .chain(self.curves.iter().map(|(item, _)| item))
            .try_for_each(check_writable_fields)?;

        if let Some(line) = self.other.iter().find(|line| {
            let line = line.trim_start();
            line.is_empty() || line.starts_with(['#', '~'])
        }) {
            return Err(LasError::InvalidDocument(format!(
                "~Other line '{}' would not read back",
                line
            )));
        }

        let null_value = null_from_well(&self.well)?;

        let mut curves = Section::new();
        let mut columns = Vec::with_capacity(self.curves.len());
        for (item, data) in self.curves {
            let mnemonic = item.mnemonic.clone();
            if curves.push_curve(item).is_none() {
                return Err(LasError::InvalidDocument(format!(
                    "duplicate curve {}",
                    mnemonic
                )));
            }
            columns.push(data);
        }
        let data = CurveStore::from_columns(columns)?;

        Ok(LasDocument::from_sections(
            self.version,
            self.well,
            curves,
            self.params,
            self.other,
            data,
            null_value,
        ))
    }
}

/// Unit and description must split back to the same fields when written
fn check_writable_fields(item: &HeaderItem) -> Result<()> {
    if item.unit.contains(|c: char| c == ':' || c.is_whitespace()) {
        return Err(LasError::InvalidDocument(format!(
            "unit of {} contains whitespace or ':'",
            item.mnemonic
        )));
    }
    if item.description.contains(':') {
        return Err(LasError::InvalidDocument(format!(
            "description of {} contains ':'",
            item.mnemonic
        )));
    }
    Ok(())
}

/// Non-empty and free of characters that would split differently on re-read
fn is_valid_mnemonic(mnemonic: &str) -> bool {
    !mnemonic.is_empty()
        && !mnemonic.starts_with(['#', '~'])
        && !mnemonic.contains(|c: char| c == '.' || c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LasDocument {
        DocumentBuilder::new()
            .version_item(HeaderItem::new(
                "VERS",
                "",
                "2.0",
                "CWLS LOG ASCII STANDARD -VERSION 2.0",
            ))
            .version_item(HeaderItem::new("WRAP", "", "NO", "ONE LINE PER DEPTH STEP"))
            .well_item(HeaderItem::new("STRT", "M", "100.0", "START DEPTH"))
            .well_item(HeaderItem::new("STOP", "M", "101.0", "STOP DEPTH"))
            .well_item(HeaderItem::new("NULL", "", "-999.25", "NULL VALUE"))
            .curve(HeaderItem::new("DEPT", "M", "", "DEPTH"), vec![100.0, 100.5, 101.0])
            .curve(HeaderItem::new("GR", "GAPI", "", "GAMMA RAY"), vec![45.2, -999.25, 42.0])
            .build()
            .unwrap()
    }

    #[test]
    fn test_section_lookup() {
        let doc = sample();
        let well = doc.section("Well").unwrap();
        assert_eq!(well.get("STRT").unwrap().value, "100.0");
        assert_eq!(well.mnemonics(), vec!["STRT", "STOP", "NULL"]);
        assert_eq!(doc.section("c").unwrap().len(), 2);
        assert!(doc.section("Parameter").unwrap().is_empty());
        assert!(matches!(doc.section("Other"), Err(LasError::NotFound(_))));
        assert!(matches!(doc.section("Tops"), Err(LasError::NotFound(_))));
    }

    #[test]
    fn test_header_item_not_found() {
        let doc = sample();
        assert!(doc.header_item(SectionKind::Well, "STEP").is_err());
        assert_eq!(doc.header_item(SectionKind::Curve, "GR").unwrap().unit, "GAPI");
    }

    #[test]
    fn test_curve_data() {
        let doc = sample();
        assert_eq!(doc.curve_names(), vec!["DEPT", "GR"]);
        assert_eq!(doc.curve_data("GR").unwrap(), &[45.2, -999.25, 42.0]);
        assert!(matches!(doc.curve_data("RHOB"), Err(LasError::NotFound(_))));
    }

    #[test]
    fn test_curve_data_masked() {
        let doc = sample();
        assert_eq!(
            doc.curve_data_masked("GR").unwrap(),
            vec![Some(45.2), None, Some(42.0)]
        );
    }

    #[test]
    fn test_metadata() {
        let doc = sample();
        assert_eq!(doc.null_value(), -999.25);
        assert_eq!(doc.las_version(), Some(LasVersion::V2_0));
        assert_eq!(doc.wrap_mode(), WrapMode::NoWrap);
        assert_eq!(doc.delimiter(), Delimiter::Space);
        assert_eq!(doc.row_count(), 3);
        assert_eq!(doc.depth_range(), Some((100.0, 101.0)));
        assert_eq!(doc.index_curve().unwrap().mnemonic, "DEPT");
    }

    #[test]
    fn test_with_overrides_leaves_original() {
        let doc = sample();
        let derived = doc
            .with_overrides(
                SectionKind::Curve,
                [("GR", HeaderOverride::description("Gamma ray, corrected"))],
            )
            .unwrap();
        assert_eq!(derived.curve_definition("GR").unwrap().description, "Gamma ray, corrected");
        assert_eq!(doc.curve_definition("GR").unwrap().description, "GAMMA RAY");
        assert_eq!(derived.curve_data("GR").unwrap(), doc.curve_data("GR").unwrap());
    }

    #[test]
    fn test_with_overrides_updates_null() {
        let doc = sample();
        let derived = doc
            .with_overrides(SectionKind::Well, [("NULL", HeaderOverride::value("45.2"))])
            .unwrap();
        assert_eq!(derived.null_value(), 45.2);
        assert_eq!(derived.curve_data_masked("GR").unwrap()[0], None);
        assert_eq!(doc.null_value(), -999.25);
    }

    #[test]
    fn test_with_overrides_unknown_mnemonic() {
        let doc = sample();
        let result = doc.with_overrides(SectionKind::Well, [("UWI", HeaderOverride::value("1"))]);
        assert!(matches!(result, Err(LasError::NotFound(_))));
    }

    #[test]
    fn test_with_overrides_rejects_colon_in_description() {
        let doc = sample();
        let result = doc.with_overrides(
            SectionKind::Curve,
            [("DEPT", HeaderOverride::description("Depth: measured"))],
        );
        assert!(matches!(result, Err(LasError::InvalidDocument(_))));

        let unit = HeaderOverride {
            unit: Some("G/C3 X".to_string()),
            ..Default::default()
        };
        let result = doc.with_overrides(SectionKind::Curve, [("GR", unit)]);
        assert!(matches!(result, Err(LasError::InvalidDocument(_))));
    }

    #[test]
    fn test_builder_rejects_colon_in_description() {
        let result = DocumentBuilder::new()
            .well_item(HeaderItem::new("SRVC", "", "ACME", "Service: wireline"))
            .build();
        assert!(matches!(result, Err(LasError::InvalidDocument(_))));

        let result = DocumentBuilder::new()
            .curve(HeaderItem::new("DEPT", "M", "", "Depth: measured"), vec![1.0])
            .build();
        assert!(matches!(result, Err(LasError::InvalidDocument(_))));
    }

    #[test]
    fn test_builder_rejects_unequal_columns() {
        let result = DocumentBuilder::new()
            .curve(HeaderItem::new("DEPT", "M", "", ""), vec![1.0, 2.0])
            .curve(HeaderItem::new("GR", "", "", ""), vec![1.0])
            .build();
        assert!(matches!(result, Err(LasError::InvalidDocument(_))));
    }

    #[test]
    fn test_builder_rejects_duplicate_curve() {
        let result = DocumentBuilder::new()
            .curve(HeaderItem::new("GR", "", "", ""), vec![1.0])
            .curve(HeaderItem::new("GR", "", "", ""), vec![2.0])
            .build();
        assert!(matches!(result, Err(LasError::InvalidDocument(_))));
    }

    #[test]
    fn test_builder_rejects_bad_mnemonic() {
        let result = DocumentBuilder::new()
            .well_item(HeaderItem::new("BAD MNEM", "", "", ""))
            .build();
        assert!(matches!(result, Err(LasError::InvalidDocument(_))));
    }

    #[test]
    fn test_builder_rejects_section_like_other_line() {
        let result = DocumentBuilder::new().other_line("~A  not data").build();
        assert!(matches!(result, Err(LasError::InvalidDocument(_))));
    }

    #[test]
    fn test_depth_range_advisory() {
        let mut doc = DocumentBuilder::new()
            .well_item(HeaderItem::new("STRT", "M", "99.0", ""))
            .curve(HeaderItem::new("DEPT", "M", "", ""), vec![100.0, 101.0])
            .build()
            .unwrap();
        doc.check_depth_range();
        assert_eq!(doc.notifications().of_type(NotificationType::Warning).len(), 1);
    }
}
