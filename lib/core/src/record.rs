//! Catalog records and immutable dataset snapshots.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a catalog record.
///
/// Supports string, UUID, and integer identifiers so callers can keep
/// whatever key scheme their catalog already uses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// String identifier
    String(String),
    /// UUID identifier
    Uuid(Uuid),
    /// Integer identifier
    Integer(u64),
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordId::String(s) => write!(f, "{}", s),
            RecordId::Uuid(u) => write!(f, "{}", u),
            RecordId::Integer(i) => write!(f, "{}", i),
        }
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId::String(s)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::String(s.to_string())
    }
}

impl From<Uuid> for RecordId {
    fn from(u: Uuid) -> Self {
        RecordId::Uuid(u)
    }
}

impl From<u64> for RecordId {
    fn from(i: u64) -> Self {
        RecordId::Integer(i)
    }
}

/// A single catalog item.
///
/// Only `title`, `author`, and `synopsis` participate in similarity
/// scoring. Absent fields deserialize to the empty string and score
/// zero rather than failing. `metadata` carries display-only details
/// (publisher, publish date, page count, ISBN) that scoring never
/// inspects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier
    pub id: RecordId,
    /// Title text
    #[serde(default)]
    pub title: String,
    /// Author text
    #[serde(default)]
    pub author: String,
    /// Synopsis or description text
    #[serde(default)]
    pub synopsis: String,
    /// Opaque display payload, ignored by scoring
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl Record {
    /// Create a record from its scored fields.
    pub fn new(
        id: impl Into<RecordId>,
        title: impl Into<String>,
        author: impl Into<String>,
        synopsis: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            synopsis: synopsis.into(),
            metadata: None,
        }
    }

    /// Attach a display payload.
    #[must_use]
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// An ordered, immutable snapshot of catalog records.
///
/// Records keep their insertion order, which is also the tie-break
/// order during ranking. Ids are unique: inserting a record whose id
/// is already present replaces the earlier record in place, keeping
/// its original position.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
    positions: AHashMap<RecordId, usize>,
}

impl Dataset {
    /// Build a dataset from records, deduplicating by id (last write wins).
    pub fn new(records: impl IntoIterator<Item = Record>) -> Self {
        let mut dataset = Self::default();
        for record in records {
            dataset.insert(record);
        }
        dataset
    }

    fn insert(&mut self, record: Record) {
        match self.positions.get(&record.id) {
            Some(&pos) => self.records[pos] = record,
            None => {
                self.positions.insert(record.id.clone(), self.records.len());
                self.records.push(record);
            }
        }
    }

    /// Number of records in the snapshot.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the snapshot holds no records.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by id.
    #[must_use]
    pub fn get(&self, id: &RecordId) -> Option<&Record> {
        self.positions.get(id).map(|&pos| &self.records[pos])
    }

    /// Position of a record in snapshot order.
    #[must_use]
    pub fn position(&self, id: &RecordId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Whether the snapshot contains a record with this id.
    #[must_use]
    pub fn contains(&self, id: &RecordId) -> bool {
        self.positions.contains_key(id)
    }

    /// All records in snapshot order.
    #[inline]
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterate over records in snapshot order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter)
    }
}
