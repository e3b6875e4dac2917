//! Immutable solver output

use serde::{Deserialize, Serialize};

use crate::core::types::{Area, PerCategory};
use crate::scale::facility::FacilityState;
use crate::scale::parking::ParkingSplit;
use crate::scale::shared_space::SharedSpace;
use crate::scale::solver::SolverState;

/// Aggregate row across all categories
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FacilityTotals {
    pub facility_area: Area,
    pub parking_tower_area: Area,
    pub ground_area: Area,
    pub under_area: Area,
    /// Underground common area, undistributed
    pub under_shared: Area,
    /// Below-ground shared space, undistributed
    pub shared_under: Area,
    /// Mechanical/electrical rooms, undistributed
    pub mech_elec: Area,
    pub parking_lot: Area,
    pub total_area: Area,
    pub units: i64,
    pub parking: i64,
}

/// Frozen solver state handed to the metrics and presentation layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverResult {
    pub applied_far: f64,
    /// Land area times applied FAR
    pub far_area: Area,
    pub facilities: PerCategory<FacilityState>,
    pub totals: FacilityTotals,
    pub shared_space: SharedSpace,
    /// Parking split from the last pass (sizes the tower)
    pub parking: ParkingSplit,
    pub passes: usize,
    pub converged: bool,
}

impl SolverResult {
    pub fn from_state(state: SolverState, applied_far: f64, far_area: Area, converged: bool) -> Self {
        let facilities = state.facilities;
        let totals = FacilityTotals {
            facility_area: facilities.map(|_, f| f.facility_area).sum(),
            parking_tower_area: facilities.map(|_, f| f.parking_tower_area).sum(),
            ground_area: state.total_ground_area,
            under_area: state.total_under_area,
            under_shared: state.underground_shared,
            shared_under: state.shared_space.underground,
            mech_elec: state.mech_elec,
            parking_lot: state.total_under_area
                - state.underground_shared
                - state.shared_space.underground
                - state.mech_elec,
            total_area: state.total_ground_area + state.total_under_area,
            units: state.occupied_units(),
            parking: state.total_parking,
        };

        Self {
            applied_far,
            far_area,
            facilities,
            totals,
            shared_space: state.shared_space,
            parking: state.parking,
            passes: state.passes,
            converged,
        }
    }

    pub fn total_units(&self) -> i64 {
        self.totals.units
    }

    pub fn ground_area(&self) -> Area {
        self.totals.ground_area
    }

    pub fn under_area(&self) -> Area {
        self.totals.under_area
    }

    pub fn total_area(&self) -> Area {
        self.totals.total_area
    }

    /// Final parking count, recounted from the final areas
    pub fn total_parking(&self) -> i64 {
        self.totals.parking
    }
}
