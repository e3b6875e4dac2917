//! Calculation constants and user-tunable assumptions
//!
//! The constants reproduce the legacy scale-review spreadsheet cell for cell.
//! Changing any of them moves results away from the spreadsheet baseline.

use crate::core::error::{Result, ScaleError};
use crate::scale::inputs::SiteInputs;
use crate::tables::{ProgramMixTable, UseTypeEntry, ZoneEntry, ZoneTable};
use serde::{Deserialize, Serialize};
use std::path::Path;

// === SOLVER ===

/// Upper bound on fixed-point passes per solve
///
/// Typical inputs settle in 3-6 passes. Some oscillate between two unit
/// counts forever; those stop here and the last pass is used as-is.
pub const MAX_ITERATIONS: usize = 50;

/// Underground shared (common) area as a fraction of total ground area
pub const UNDERGROUND_SHARED_RATIO: f64 = 0.02;

// === SHARED SPACE ===

/// Shared space per unit up to the first bracket
pub const SHARED_SPACE_PER_UNIT_SMALL: f64 = 4.0;

/// Shared space per unit above the first bracket
pub const SHARED_SPACE_PER_UNIT_LARGE: f64 = 6.0;

// === PARKING ===

/// Gross area (ground + underground) per dorm parking space
pub const DORM_AREA_PER_SPACE: f64 = 200.0;

/// Gross area per hotel or retail parking space
pub const COMMERCIAL_AREA_PER_SPACE: f64 = 134.0;

/// Officetel spaces per unit (counted, not area based)
pub const OFFICETEL_SPACES_PER_UNIT: f64 = 0.5;

/// Mechanical spaces one parking-tower unit holds
pub const TOWER_SPACES_PER_UNIT: i64 = 80;

/// Ground floor area one parking-tower unit occupies
pub const TOWER_UNIT_AREA: f64 = 50.0;

// === DERIVED METRICS ===

/// Floor-to-floor height (m)
pub const FLOOR_HEIGHT: f64 = 3.3;

/// Floors added on top of the typical-floor count (ground-level lobby)
pub const EXTRA_GROUND_FLOORS: f64 = 1.0;

/// Fixed construction months independent of floor count
pub const CONSTRUCTION_BASE_MONTHS: f64 = 6.0;

/// Construction months per underground floor (one per ground floor)
pub const MONTHS_PER_UNDERGROUND_FLOOR: f64 = 3.0;

/// Months of permitting and design before construction starts
pub const DEVELOPMENT_LEAD_MONTHS: f64 = 15.0;

// === FAR ===

/// Applied FAR used when a dual-zone site is missing a zone or an area
pub const DEFAULT_DUAL_ZONE_FAR: f64 = 3.0;

/// Tolerance for program-mix fractions summing to one
pub const MIX_SUM_TOLERANCE: f64 = 1e-9;

/// Ratios the review is sensitive to; all user-overridable
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssumptionSet {
    /// Share of shared space placed above ground
    pub ground_shared_ratio: f64,
    /// Exclusive (leasable) share of dorm ground area
    pub dorm_exclusive_ratio: f64,
    /// Exclusive share of hotel and officetel ground area
    pub hotel_officetel_exclusive_ratio: f64,
    /// Mechanical/electrical rooms as a fraction of ground area
    pub mech_elec_ratio: f64,
    /// Footprint of an underground floor as a fraction of land area
    pub underground_coverage: f64,
    /// Footprint of a typical ground floor as a fraction of land area
    pub typical_coverage: f64,
    /// Share of parking provided as self-park spaces (rest go in the tower)
    pub self_parking_ratio: f64,
}

impl Default for AssumptionSet {
    fn default() -> Self {
        Self {
            ground_shared_ratio: 0.5,
            dorm_exclusive_ratio: 0.55,
            hotel_officetel_exclusive_ratio: 0.6,
            mech_elec_ratio: 0.08,
            underground_coverage: 0.75,
            typical_coverage: 0.3,
            self_parking_ratio: 0.03,
        }
    }
}

impl AssumptionSet {
    fn named(&self) -> [(&'static str, f64); 7] {
        [
            ("ground_shared_ratio", self.ground_shared_ratio),
            ("dorm_exclusive_ratio", self.dorm_exclusive_ratio),
            ("hotel_officetel_exclusive_ratio", self.hotel_officetel_exclusive_ratio),
            ("mech_elec_ratio", self.mech_elec_ratio),
            ("underground_coverage", self.underground_coverage),
            ("typical_coverage", self.typical_coverage),
            ("self_parking_ratio", self.self_parking_ratio),
        ]
    }

    /// Check every ratio lies in [0, 1] and the coverage divisors are positive
    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.named() {
            if !(0.0..=1.0).contains(&value) {
                return Err(ScaleError::InvalidInput(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        if self.underground_coverage <= 0.0 || self.typical_coverage <= 0.0 {
            return Err(ScaleError::InvalidInput(
                "coverage ratios must be positive".into(),
            ));
        }

        Ok(())
    }
}

/// Contents of a review TOML file
///
/// Every section is optional. Missing tables fall back to the built-in
/// legacy tables; missing assumption fields fall back to their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    pub assumptions: AssumptionSet,
    pub site: Option<SiteInputs>,
    pub zones: Vec<ZoneEntry>,
    pub use_types: Vec<UseTypeEntry>,
}

impl ReviewConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ReviewConfig = toml::from_str(content)?;
        config.assumptions.validate()?;
        Ok(config)
    }

    /// Load a review config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Zone table from `[[zones]]`, or the built-in table when none are given
    pub fn zone_table(&self) -> Result<ZoneTable> {
        if self.zones.is_empty() {
            Ok(ZoneTable::with_defaults())
        } else {
            ZoneTable::from_entries(self.zones.iter().cloned())
        }
    }

    /// Program-mix table from `[[use_types]]`, or the built-in table
    pub fn program_mix_table(&self) -> Result<ProgramMixTable> {
        if self.use_types.is_empty() {
            Ok(ProgramMixTable::with_defaults())
        } else {
            ProgramMixTable::from_entries(self.use_types.iter().cloned())
        }
    }
}
