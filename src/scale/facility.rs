//! Per-category floor area, unit and parking state

use serde::{Deserialize, Serialize};

use crate::core::types::{Area, PerCategory};

/// Solver state for one facility category
///
/// `facility_area` is fixed for a run. Everything else is rewritten on
/// every pass and frozen when the solver stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FacilityState {
    /// Program share of the FAR area, before the parking tower
    pub facility_area: Area,
    /// Share of the parking-tower footprint
    pub parking_tower_area: Area,
    /// Facility area plus parking tower
    pub ground_area: Area,
    /// Sum of the three underground components below
    pub under_area: Area,
    /// Share of the underground common area
    pub under_shared: Area,
    /// Share of the below-ground part of shared space
    pub shared_under: Area,
    /// Share of mechanical/electrical rooms
    pub mech_elec: Area,
    pub units: i64,
    pub parking: i64,
}

impl FacilityState {
    pub fn new(facility_area: Area) -> Self {
        Self {
            facility_area,
            ground_area: facility_area,
            ..Self::default()
        }
    }

    /// Underground area not claimed by any listed component
    pub fn parking_lot(&self) -> Area {
        self.under_area - self.under_shared - self.shared_under - self.mech_elec
    }

    pub fn total_area(&self) -> Area {
        self.ground_area + self.under_area
    }
}

/// Split `amount` across categories in proportion to `weights`
///
/// Returns `None` when the weights sum to zero; callers keep their
/// previous values in that case.
pub fn distribute(amount: Area, weights: &PerCategory<Area>) -> Option<PerCategory<Area>> {
    let total = weights.sum();
    if total > 0.0 {
        Some(weights.map(|_, w| amount * (w / total)))
    } else {
        None
    }
}
