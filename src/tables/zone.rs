//! Zoning-district coverage and FAR table

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, ScaleError};

/// Coverage and floor-area ratios for one zoning district
///
/// Applied values are the reduced figures the review actually uses; the
/// table data keeps them at or below the legal maxima.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneRecord {
    pub legal_coverage: f64,
    pub legal_far: f64,
    pub applied_coverage: f64,
    pub applied_far: f64,
}

impl ZoneRecord {
    pub fn new(legal_coverage: f64, legal_far: f64, applied_coverage: f64, applied_far: f64) -> Self {
        Self {
            legal_coverage,
            legal_far,
            applied_coverage,
            applied_far,
        }
    }

    /// Whether applied values stay within the legal maxima
    pub fn within_legal_limits(&self) -> bool {
        self.applied_coverage <= self.legal_coverage && self.applied_far <= self.legal_far
    }
}

/// One `[[zones]]` entry in a review TOML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneEntry {
    pub id: String,
    pub legal_coverage: f64,
    pub legal_far: f64,
    pub applied_coverage: f64,
    pub applied_far: f64,
}

impl ZoneEntry {
    pub fn record(&self) -> ZoneRecord {
        ZoneRecord::new(
            self.legal_coverage,
            self.legal_far,
            self.applied_coverage,
            self.applied_far,
        )
    }
}

/// Read-only mapping from zone id to its ratios
///
/// Iteration follows insertion order so listings are stable.
#[derive(Debug, Clone, Default)]
pub struct ZoneTable {
    entries: Vec<(String, ZoneRecord)>,
    by_id: AHashMap<String, usize>,
}

impl ZoneTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The four districts the legacy spreadsheet ships with
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        table.insert("일반주거지역_2종", ZoneRecord::new(0.6, 2.5, 0.55, 2.49));
        table.insert("일반주거지역_3종", ZoneRecord::new(0.5, 3.0, 0.4, 2.99));
        table.insert("준주거지역", ZoneRecord::new(0.6, 4.0, 0.55, 3.99));
        table.insert("일반상업지역", ZoneRecord::new(0.6, 8.0, 0.55, 7.99));
        table
    }

    /// Build a table from file entries, rejecting non-positive ratios
    /// and duplicate ids
    pub fn from_entries(entries: impl IntoIterator<Item = ZoneEntry>) -> Result<Self> {
        let mut table = Self::new();
        for entry in entries {
            let record = entry.record();
            let values = [
                record.legal_coverage,
                record.legal_far,
                record.applied_coverage,
                record.applied_far,
            ];
            if values.iter().any(|v| !(*v > 0.0)) {
                return Err(ScaleError::InvalidTable(format!(
                    "zone {} has a non-positive ratio",
                    entry.id
                )));
            }
            if table.contains(&entry.id) {
                return Err(ScaleError::InvalidTable(format!(
                    "duplicate zone {}",
                    entry.id
                )));
            }
            if !record.within_legal_limits() {
                tracing::warn!("Zone {} applies ratios above its legal maxima", entry.id);
            }
            table.insert(entry.id, record);
        }
        Ok(table)
    }

    /// Insert or replace a zone
    pub fn insert(&mut self, id: impl Into<String>, record: ZoneRecord) {
        let id = id.into();
        match self.by_id.get(&id) {
            Some(&idx) => self.entries[idx].1 = record,
            None => {
                self.by_id.insert(id.clone(), self.entries.len());
                self.entries.push((id, record));
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&ZoneRecord> {
        self.by_id.get(id).map(|&idx| &self.entries[idx].1)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ZoneRecord)> {
        self.entries.iter().map(|(id, record)| (id.as_str(), record))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_zones() {
        let table = ZoneTable::with_defaults();
        assert_eq!(table.len(), 4);

        let zone = table.get("일반주거지역_3종").unwrap();
        assert_eq!(zone.applied_far, 2.99);
        assert_eq!(zone.applied_coverage, 0.4);
        assert!(table.get("자연녹지지역").is_none());
    }

    #[test]
    fn test_default_zones_within_legal_limits() {
        for (id, record) in ZoneTable::with_defaults().iter() {
            assert!(record.within_legal_limits(), "{} exceeds legal limits", id);
        }
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut table = ZoneTable::with_defaults();
        table.insert("준주거지역", ZoneRecord::new(0.6, 4.0, 0.5, 3.5));

        assert_eq!(table.len(), 4);
        assert_eq!(table.get("준주거지역").unwrap().applied_far, 3.5);
        assert_eq!(table.iter().nth(2).map(|(id, _)| id), Some("준주거지역"));
    }

    #[test]
    fn test_from_entries_rejects_zero_far() {
        let entries = vec![ZoneEntry {
            id: "broken".into(),
            legal_coverage: 0.6,
            legal_far: 2.0,
            applied_coverage: 0.5,
            applied_far: 0.0,
        }];
        assert!(matches!(
            ZoneTable::from_entries(entries),
            Err(ScaleError::InvalidTable(_))
        ));
    }

    #[test]
    fn test_from_entries_rejects_duplicates() {
        let entry = ZoneEntry {
            id: "준주거지역".into(),
            legal_coverage: 0.6,
            legal_far: 4.0,
            applied_coverage: 0.55,
            applied_far: 3.99,
        };
        assert!(ZoneTable::from_entries(vec![entry.clone(), entry]).is_err());
    }
}
