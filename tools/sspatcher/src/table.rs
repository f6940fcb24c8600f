//! In-memory wavetable data and the ordered set written to an image.

use std::ops::Deref;

use indexmap::IndexMap;

use crate::error::{Result, SsPatcherError};
use crate::layout::{NUM_WT, WT_DATA_LENGTH};
use crate::name::WavetableName;

/// One table's audio data, always exactly [`WT_DATA_LENGTH`] bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableData(Box<[u8; WT_DATA_LENGTH]>);

impl TableData {
    /// Wrap `bytes`, reporting `name` if the length is wrong.
    pub fn new(name: &str, bytes: Vec<u8>) -> Result<Self> {
        let actual = bytes.len();
        let block: Box<[u8; WT_DATA_LENGTH]> =
            bytes
                .into_boxed_slice()
                .try_into()
                .map_err(|_| SsPatcherError::WrongSize {
                    name: name.to_string(),
                    expected: WT_DATA_LENGTH,
                    actual,
                })?;
        Ok(Self(block))
    }

    pub fn from_slice(name: &str, bytes: &[u8]) -> Result<Self> {
        Self::new(name, bytes.to_vec())
    }

    pub fn as_bytes(&self) -> &[u8; WT_DATA_LENGTH] {
        &self.0
    }
}

impl Deref for TableData {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0[..]
    }
}

/// Exactly [`NUM_WT`] uniquely named tables in image order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavetableSet {
    tables: IndexMap<WavetableName, TableData>,
}

impl WavetableSet {
    /// Build a set from `(name, data)` pairs, keeping their order.
    pub fn new<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (WavetableName, TableData)>,
    {
        let mut tables = IndexMap::with_capacity(NUM_WT);
        for (name, data) in entries {
            if tables.insert(name, data).is_some() {
                return Err(SsPatcherError::DuplicateName {
                    name: name.to_string(),
                });
            }
        }

        if tables.len() != NUM_WT {
            return Err(SsPatcherError::WrongCount {
                expected: NUM_WT,
                actual: tables.len(),
            });
        }

        Ok(Self { tables })
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn get(&self, name: &WavetableName) -> Option<&TableData> {
        self.tables.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &WavetableName> {
        self.tables.keys()
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableData> {
        self.tables.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&WavetableName, &TableData)> {
        self.tables.iter()
    }
}

impl<'a> IntoIterator for &'a WavetableSet {
    type Item = (&'a WavetableName, &'a TableData);
    type IntoIter = indexmap::map::Iter<'a, WavetableName, TableData>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.iter()
    }
}
