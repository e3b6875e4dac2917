//! Fixed-point scale solver
//!
//! Unit count, shared space, parking demand and parking-tower area depend
//! on each other in a cycle:
//!
//! - units size the shared space, which feeds underground area
//! - ground + underground area (and officetel units) set parking demand
//! - mechanical parking sizes the tower, which adds to ground area
//! - ground area minus shared space sets the unit count
//!
//! Each pass recomputes the cycle once from the previous pass's state.
//! The solver stops when parking and unit counts stop moving, or after
//! [`MAX_ITERATIONS`] passes, and then recounts parking once from the final
//! areas.

use crate::core::config::{AssumptionSet, MAX_ITERATIONS, UNDERGROUND_SHARED_RATIO};
use crate::core::error::{Result, ScaleError};
use crate::core::types::{Area, Category, PerCategory};
use crate::scale::facility::{distribute, FacilityState};
use crate::scale::inputs::{SiteInputs, UnitSizes};
use crate::scale::parking::{parking_demand, ParkingSplit};
use crate::scale::result::SolverResult;
use crate::scale::shared_space::SharedSpace;
use crate::tables::{ProgramMix, ProgramMixTable};

/// Everything a pass reads but never writes
#[derive(Debug, Clone, Copy)]
pub struct SolveContext {
    pub mix: ProgramMix,
    pub unit_sizes: UnitSizes,
    pub assumptions: AssumptionSet,
}

/// Full solver state after a pass
#[derive(Debug, Clone, PartialEq)]
pub struct SolverState {
    pub facilities: PerCategory<FacilityState>,
    pub total_ground_area: Area,
    pub total_under_area: Area,
    pub total_parking: i64,
    pub shared_space: SharedSpace,
    /// Underground common area before distribution
    pub underground_shared: Area,
    /// Mechanical/electrical area before distribution
    pub mech_elec: Area,
    pub parking: ParkingSplit,
    /// Passes applied so far
    pub passes: usize,
}

impl SolverState {
    /// State before the first pass: ground area equals facility area
    pub fn initial(far_area: Area, mix: &ProgramMix) -> Self {
        let facilities = mix
            .fractions()
            .map(|_, fraction| FacilityState::new(fraction * far_area));
        let total_ground_area = facilities.map(|_, f| f.ground_area).sum();

        Self {
            facilities,
            total_ground_area,
            total_under_area: 0.0,
            total_parking: 0,
            shared_space: SharedSpace::default(),
            underground_shared: 0.0,
            mech_elec: 0.0,
            parking: ParkingSplit::default(),
            passes: 0,
        }
    }

    /// Units across dorm, officetel and hotel, saturating at the `i64` bounds
    pub fn occupied_units(&self) -> i64 {
        Category::OCCUPIED
            .iter()
            .fold(0, |acc, &c| acc.saturating_add(self.facilities[c].units))
    }

    fn ground_areas(&self) -> PerCategory<Area> {
        self.facilities.map(|_, f| f.ground_area)
    }

    /// Apply one pass of the cycle and return the new state
    pub fn step(&self, ctx: &SolveContext) -> Self {
        let assumptions = &ctx.assumptions;
        let mut next = self.clone();
        next.passes += 1;

        // Shared space from last pass's units
        next.shared_space =
            SharedSpace::for_units(self.occupied_units(), assumptions.ground_shared_ratio);

        // Underground composition, split by ground-area share
        next.underground_shared = self.total_ground_area * UNDERGROUND_SHARED_RATIO;
        next.mech_elec = self.total_ground_area * assumptions.mech_elec_ratio;

        let ground = self.ground_areas();
        if let (Some(under_shared), Some(shared_under), Some(mech_elec)) = (
            distribute(next.underground_shared, &ground),
            distribute(next.shared_space.underground, &ground),
            distribute(next.mech_elec, &ground),
        ) {
            for category in Category::ALL {
                let facility = &mut next.facilities[category];
                facility.under_shared = under_shared[category];
                facility.shared_under = shared_under[category];
                facility.mech_elec = mech_elec[category];
                facility.under_area = facility.under_shared + facility.shared_under + facility.mech_elec;
            }
        }
        next.total_under_area = next.facilities.map(|_, f| f.under_area).sum();

        // Parking demand
        next.recount_parking(&ctx.mix);

        // Parking tower, split by fixed facility-area share
        next.parking = ParkingSplit::new(next.total_parking, assumptions.self_parking_ratio);
        let facility_areas = next.facilities.map(|_, f| f.facility_area);
        if let Some(tower) = distribute(next.parking.tower_area, &facility_areas) {
            for category in Category::ALL {
                let facility = &mut next.facilities[category];
                facility.parking_tower_area = tower[category];
                facility.ground_area = facility.facility_area + facility.parking_tower_area;
            }
        }
        next.total_ground_area = next.ground_areas().sum();

        // Units from the new ground area
        let shared_ground = next.shared_space.ground;
        let total_ground = next.total_ground_area;
        for (category, unit_size) in ctx.unit_sizes.occupied() {
            let ground_area = next.facilities[category].ground_area;
            if !(ground_area > 0.0) {
                continue;
            }

            let (shared, exclusive_ratio) = match category {
                Category::Dorm => (shared_ground, assumptions.dorm_exclusive_ratio),
                _ if ctx.mix.includes(Category::Dorm) => {
                    (0.0, assumptions.hotel_officetel_exclusive_ratio)
                }
                _ => (
                    shared_ground * (ground_area / total_ground),
                    assumptions.hotel_officetel_exclusive_ratio,
                ),
            };

            next.facilities[category].units =
                ((ground_area - shared) * exclusive_ratio / unit_size).floor() as i64;
        }

        next
    }

    /// Recount per-category and total parking from the current areas and units
    pub fn recount_parking(&mut self, mix: &ProgramMix) {
        let demand = parking_demand(mix, &self.facilities);
        for category in Category::ALL {
            self.facilities[category].parking = demand[category];
        }
        self.total_parking = demand.sum();
    }

    /// Parking moved by less than one space and no unit count changed
    ///
    /// Parking is compared with a tolerance but units must match exactly;
    /// the legacy baseline depends on that asymmetry.
    pub fn has_converged_from(&self, previous: &SolverState) -> bool {
        self.total_parking.abs_diff(previous.total_parking) < 1
            && Category::OCCUPIED
                .iter()
                .all(|&c| self.facilities[c].units == previous.facilities[c].units)
    }
}

/// Build the solve context for a site, validating its divisors
pub fn solve_context(
    site: &SiteInputs,
    assumptions: &AssumptionSet,
    mixes: &ProgramMixTable,
) -> Result<SolveContext> {
    let mix = *mixes
        .get(&site.use_type)
        .ok_or_else(|| ScaleError::UnknownUseType(site.use_type.clone()))?;

    assumptions.validate()?;
    site.validate(&mix)?;

    Ok(SolveContext {
        mix,
        unit_sizes: site.unit_sizes,
        assumptions: *assumptions,
    })
}

/// Solve the building scale for a site at the given applied FAR
pub fn solve(
    applied_far: f64,
    site: &SiteInputs,
    assumptions: &AssumptionSet,
    mixes: &ProgramMixTable,
) -> Result<SolverResult> {
    let ctx = solve_context(site, assumptions, mixes)?;
    let far_area = site.land_area * applied_far;

    let mut state = SolverState::initial(far_area, &ctx.mix);
    let mut converged = false;

    for _ in 0..MAX_ITERATIONS {
        let next = state.step(&ctx);
        converged = next.has_converged_from(&state);
        state = next;

        tracing::debug!(
            "Pass {}: units={} parking={} ground={:.2}",
            state.passes,
            state.occupied_units(),
            state.total_parking,
            state.total_ground_area
        );

        if converged {
            break;
        }
    }

    if converged {
        tracing::debug!("Converged after {} passes", state.passes);
    } else {
        tracing::warn!(
            "No fixed point after {} passes for {}; using last pass",
            MAX_ITERATIONS,
            site.use_type
        );
    }

    // The loop's parking count lags the final areas by one pass
    state.recount_parking(&ctx.mix);

    Ok(SolverResult::from_state(state, applied_far, far_area, converged))
}
