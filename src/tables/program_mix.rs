//! Use-type to facility-category allocation table

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::config::MIX_SUM_TOLERANCE;
use crate::core::error::{Result, ScaleError};
use crate::core::types::{Category, PerCategory};

/// Fraction of FAR area allocated to each facility category
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgramMix(pub PerCategory<f64>);

impl ProgramMix {
    pub fn new(dorm: f64, officetel: f64, hotel: f64, retail: f64) -> Self {
        Self(PerCategory::new(dorm, officetel, hotel, retail))
    }

    pub fn fraction(&self, category: Category) -> f64 {
        self.0[category]
    }

    /// Whether the mix allocates any area to `category`
    pub fn includes(&self, category: Category) -> bool {
        self.0[category] > 0.0
    }

    pub fn sum(&self) -> f64 {
        self.0.sum()
    }

    /// Fractions sum to one within tolerance
    pub fn is_complete(&self) -> bool {
        (self.sum() - 1.0).abs() <= MIX_SUM_TOLERANCE
    }

    pub fn fractions(&self) -> &PerCategory<f64> {
        &self.0
    }
}

/// One `[[use_types]]` entry in a review TOML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UseTypeEntry {
    pub id: String,
    #[serde(default)]
    pub dorm: f64,
    #[serde(default)]
    pub officetel: f64,
    #[serde(default)]
    pub hotel: f64,
    #[serde(default)]
    pub retail: f64,
}

impl UseTypeEntry {
    pub fn mix(&self) -> ProgramMix {
        ProgramMix::new(self.dorm, self.officetel, self.hotel, self.retail)
    }
}

/// Read-only mapping from use-type id to its program mix
#[derive(Debug, Clone, Default)]
pub struct ProgramMixTable {
    entries: Vec<(String, ProgramMix)>,
    by_id: AHashMap<String, usize>,
}

impl ProgramMixTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The six use types the legacy spreadsheet ships with
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        table.insert("임대형기숙사", ProgramMix::new(1.0, 0.0, 0.0, 0.0));
        table.insert("관광호텔", ProgramMix::new(0.0, 0.0, 1.0, 0.0));
        table.insert("오피스텔", ProgramMix::new(0.0, 1.0, 0.0, 0.0));
        table.insert("임대형기숙사 + 근생", ProgramMix::new(0.75, 0.0, 0.0, 0.25));
        table.insert("임대형기숙사 + 관광호텔", ProgramMix::new(0.75, 0.0, 0.25, 0.0));
        table.insert(
            "임대형기숙사 + 오피스텔 + 근생",
            ProgramMix::new(0.75, 0.15, 0.0, 0.1),
        );
        table
    }

    /// Build a table from file entries; every mix must be complete and
    /// non-negative
    pub fn from_entries(entries: impl IntoIterator<Item = UseTypeEntry>) -> Result<Self> {
        let mut table = Self::new();
        for entry in entries {
            let mix = entry.mix();
            if mix.fractions().iter().any(|(_, f)| !(*f >= 0.0)) {
                return Err(ScaleError::InvalidTable(format!(
                    "use type {} has a negative fraction",
                    entry.id
                )));
            }
            if !mix.is_complete() {
                return Err(ScaleError::InvalidTable(format!(
                    "use type {} fractions sum to {}, expected 1",
                    entry.id,
                    mix.sum()
                )));
            }
            if table.contains(&entry.id) {
                return Err(ScaleError::InvalidTable(format!(
                    "duplicate use type {}",
                    entry.id
                )));
            }
            table.insert(entry.id, mix);
        }
        Ok(table)
    }

    /// Insert or replace a use type
    pub fn insert(&mut self, id: impl Into<String>, mix: ProgramMix) {
        let id = id.into();
        match self.by_id.get(&id) {
            Some(&idx) => self.entries[idx].1 = mix,
            None => {
                self.by_id.insert(id.clone(), self.entries.len());
                self.entries.push((id, mix));
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&ProgramMix> {
        self.by_id.get(id).map(|&idx| &self.entries[idx].1)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProgramMix)> {
        self.entries.iter().map(|(id, mix)| (id.as_str(), mix))
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
    fn test_every_default_mix_is_complete() {
        for (id, mix) in ProgramMixTable::with_defaults().iter() {
            assert!(
                (mix.sum() - 1.0).abs() <= 1e-9,
                "{} sums to {}",
                id,
                mix.sum()
            );
        }
    }

    #[test]
    fn test_mixed_use_fractions() {
        let table = ProgramMixTable::with_defaults();
        let mix = table.get("임대형기숙사 + 오피스텔 + 근생").unwrap();

        assert_eq!(mix.fraction(Category::Dorm), 0.75);
        assert_eq!(mix.fraction(Category::Officetel), 0.15);
        assert!(!mix.includes(Category::Hotel));
        assert!(mix.includes(Category::Retail));
    }

    #[test]
    fn test_incomplete_mix_rejected() {
        let entries = vec![UseTypeEntry {
            id: "half".into(),
            dorm: 0.5,
            officetel: 0.0,
            hotel: 0.0,
            retail: 0.0,
        }];
        let err = ProgramMixTable::from_entries(entries).unwrap_err();
        assert!(err.to_string().contains("half"));
    }

    #[test]
    fn test_negative_fraction_rejected() {
        let entries = vec![UseTypeEntry {
            id: "odd".into(),
            dorm: 1.5,
            officetel: -0.5,
            hotel: 0.0,
            retail: 0.0,
        }];
        assert!(ProgramMixTable::from_entries(entries).is_err());
    }
}
