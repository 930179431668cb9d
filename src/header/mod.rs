//! Header items and the ordered sections that hold them

use ahash::RandomState;
use indexmap::IndexMap;
use std::ops::Deref;

/// Base trait for everything stored in a [`Section`]
pub trait SectionEntry {
    /// The entry's mnemonic, its lookup key within the section
    fn mnemonic(&self) -> &str;

    /// The plain header fields of the entry
    fn item(&self) -> &HeaderItem;
}

/// One `MNEM.UNIT  VALUE : DESCRIPTION` line of a header section
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeaderItem {
    pub mnemonic: String,
    pub unit: String,
    pub value: String,
    pub description: String,
}

impl HeaderItem {
    /// Create a new header item
    pub fn new(
        mnemonic: impl Into<String>,
        unit: impl Into<String>,
        value: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            mnemonic: mnemonic.into(),
            unit: unit.into(),
            value: value.into(),
            description: description.into(),
        }
    }

    /// Value parsed as a number, if it is one
    pub fn numeric_value(&self) -> Option<f64> {
        self.value.trim().parse().ok()
    }
}

impl SectionEntry for HeaderItem {
    fn mnemonic(&self) -> &str {
        &self.mnemonic
    }

    fn item(&self) -> &HeaderItem {
        self
    }
}

/// A curve declared in the `~Curve` section.
///
/// `index` is the declaration order, which is also the column of the curve
/// in the data matrix. The samples themselves live in the document's
/// curve store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurveDefinition {
    pub item: HeaderItem,
    pub index: usize,
}

impl CurveDefinition {
    /// Create a new curve definition
    pub fn new(item: HeaderItem, index: usize) -> Self {
        Self { item, index }
    }
}

impl Deref for CurveDefinition {
    type Target = HeaderItem;

    fn deref(&self) -> &HeaderItem {
        &self.item
    }
}

impl SectionEntry for CurveDefinition {
    fn mnemonic(&self) -> &str {
        &self.item.mnemonic
    }

    fn item(&self) -> &HeaderItem {
        &self.item
    }
}

/// Ordered mapping from mnemonic to entry.
///
/// Insertion order is preserved and drives write-back order. Inserting an
/// entry whose mnemonic already exists replaces the earlier one in place.
#[derive(Debug, Clone)]
pub struct Section<T: SectionEntry> {
    entries: IndexMap<String, T, RandomState>,
}

impl<T: SectionEntry> Section<T> {
    /// Create a new empty section
    pub fn new() -> Self {
        Section {
            entries: IndexMap::with_hasher(RandomState::new()),
        }
    }

    /// Insert an entry, returning the entry it replaced (same mnemonic)
    pub fn insert(&mut self, entry: T) -> Option<T> {
        let key = entry.mnemonic().to_string();
        self.entries.insert(key, entry)
    }

    /// Get an entry by mnemonic
    pub fn get(&self, mnemonic: &str) -> Option<&T> {
        self.entries.get(mnemonic)
    }

    /// Get an entry by position
    pub fn get_index(&self, index: usize) -> Option<&T> {
        self.entries.get_index(index).map(|(_, v)| v)
    }

    /// Position of a mnemonic in declaration order
    pub fn index_of(&self, mnemonic: &str) -> Option<usize> {
        self.entries.get_index_of(mnemonic)
    }

    /// Check if a mnemonic exists
    pub fn contains(&self, mnemonic: &str) -> bool {
        self.entries.contains_key(mnemonic)
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the section is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    /// Iterate over the plain header fields of all entries
    pub fn items(&self) -> impl Iterator<Item = &HeaderItem> {
        self.entries.values().map(|e| e.item())
    }

    /// Get all mnemonics in declaration order
    pub fn mnemonics(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    /// Get a mutable entry by mnemonic
    pub(crate) fn get_mut(&mut self, mnemonic: &str) -> Option<&mut T> {
        self.entries.get_mut(mnemonic)
    }
}

impl<T: SectionEntry> Default for Section<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SectionEntry + PartialEq> PartialEq for Section<T> {
    /// Equal when both hold the same entries in the same order
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl Section<CurveDefinition> {
    /// Append a curve; its index is its position in the section.
    ///
    /// Returns `None` and leaves the section unchanged if the mnemonic is
    /// already declared, since replacing a curve would shift the columns.
    pub fn push_curve(&mut self, item: HeaderItem) -> Option<&CurveDefinition> {
        if self.contains(&item.mnemonic) {
            return None;
        }
        let index = self.len();
        let key = item.mnemonic.clone();
        self.entries.insert(key.clone(), CurveDefinition::new(item, index));
        self.entries.get(&key)
    }
}
