//! JSON lists decoded one record at a time.

use serde::{Deserialize, Serialize};

/// A stored JSON array whose elements are decoded independently.
///
/// Elements that do not decode as `T` are kept verbatim and written back
/// in place, so one malformed record never costs the others.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonList<T> {
    entries: Vec<Entry<T>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum Entry<T> {
    Record(T),
    Unreadable(serde_json::Value),
}

impl<T> Default for JsonList<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> JsonList<T> {
    /// The decoded records, in stored order.
    pub fn records(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Record(record) => Some(record),
            Entry::Unreadable(_) => None,
        })
    }

    /// Mutable access to the decoded records.
    pub fn records_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.iter_mut().filter_map(|entry| match entry {
            Entry::Record(record) => Some(record),
            Entry::Unreadable(_) => None,
        })
    }

    /// Append a record.
    pub fn push(&mut self, record: T) {
        self.entries.push(Entry::Record(record));
    }

    /// Consume the list, dropping undecodable elements.
    #[must_use]
    pub fn into_records(self) -> Vec<T> {
        self.entries
            .into_iter()
            .filter_map(|entry| match entry {
                Entry::Record(record) => Some(record),
                Entry::Unreadable(_) => None,
            })
            .collect()
    }

    /// Number of decoded records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records().count()
    }

    /// Whether there are no decoded records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of elements kept verbatim because they did not decode.
    #[must_use]
    pub fn unreadable(&self) -> usize {
        self.entries.len() - self.len()
    }
}
