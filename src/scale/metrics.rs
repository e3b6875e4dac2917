//! Floor counts, height and schedule derived from a solved scale
//!
//! All values stay `f64` so a zero land area shows up as `NaN`/`inf`
//! instead of being clamped to a plausible-looking number.

use serde::{Deserialize, Serialize};

use crate::core::config::{
    AssumptionSet, CONSTRUCTION_BASE_MONTHS, DEVELOPMENT_LEAD_MONTHS, EXTRA_GROUND_FLOORS,
    FLOOR_HEIGHT, MONTHS_PER_UNDERGROUND_FLOOR,
};
use crate::core::types::Area;
use crate::scale::result::SolverResult;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub ground_floors: f64,
    pub underground_floors: f64,
    /// Meters
    pub building_height: f64,
    pub construction_months: f64,
    /// Construction plus the pre-construction lead time
    pub development_months: f64,
}

impl DerivedMetrics {
    pub fn derive(result: &SolverResult, land_area: Area, assumptions: &AssumptionSet) -> Self {
        let typical_floor = land_area * assumptions.typical_coverage;
        let underground_floor = land_area * assumptions.underground_coverage;

        let ground_floors = (result.ground_area() / typical_floor).ceil() + EXTRA_GROUND_FLOORS;
        let underground_floors = (result.under_area() / underground_floor).ceil();
        let construction_months =
            ground_floors + underground_floors * MONTHS_PER_UNDERGROUND_FLOOR + CONSTRUCTION_BASE_MONTHS;

        Self {
            ground_floors,
            underground_floors,
            building_height: ground_floors * FLOOR_HEIGHT,
            construction_months,
            development_months: DEVELOPMENT_LEAD_MONTHS + construction_months,
        }
    }

    /// Every metric is a finite number
    pub fn is_finite(&self) -> bool {
        [
            self.ground_floors,
            self.underground_floors,
            self.building_height,
            self.construction_months,
            self.development_months,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}
