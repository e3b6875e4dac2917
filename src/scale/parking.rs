//! Parking demand and the mechanical parking tower

use serde::{Deserialize, Serialize};

use crate::core::config::{
    COMMERCIAL_AREA_PER_SPACE, DORM_AREA_PER_SPACE, OFFICETEL_SPACES_PER_UNIT,
    TOWER_SPACES_PER_UNIT, TOWER_UNIT_AREA,
};
use crate::core::types::{Area, Category, PerCategory};
use crate::scale::facility::FacilityState;
use crate::tables::ProgramMix;

/// Required spaces for one category
///
/// Categories the mix does not include need none. Officetel demand is
/// counted from units; the others from gross (ground + underground) area.
pub fn category_demand(category: Category, mix: &ProgramMix, state: &FacilityState) -> i64 {
    if !mix.includes(category) {
        return 0;
    }

    let gross = state.ground_area + state.under_area;
    match category {
        Category::Dorm => (gross / DORM_AREA_PER_SPACE).ceil() as i64,
        Category::Officetel => (state.units as f64 * OFFICETEL_SPACES_PER_UNIT).floor() as i64,
        Category::Hotel | Category::Retail => (gross / COMMERCIAL_AREA_PER_SPACE).ceil() as i64,
    }
}

pub fn parking_demand(mix: &ProgramMix, facilities: &PerCategory<FacilityState>) -> PerCategory<i64> {
    facilities.map(|category, state| category_demand(category, mix, state))
}

/// How the required spaces are provided
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ParkingSplit {
    pub total: i64,
    pub self_parking: i64,
    /// Spaces housed in the parking tower
    pub mechanical: i64,
    pub tower_units: i64,
    pub tower_area: Area,
}

impl ParkingSplit {
    pub fn new(total: i64, self_parking_ratio: f64) -> Self {
        let self_parking = (total as f64 * self_parking_ratio).ceil() as i64;
        let mechanical = total.saturating_sub(self_parking);
        let tower_units = (mechanical as f64 / TOWER_SPACES_PER_UNIT as f64).ceil() as i64;

        Self {
            total,
            self_parking,
            mechanical,
            tower_units,
            tower_area: tower_units as f64 * TOWER_UNIT_AREA,
        }
    }
}
