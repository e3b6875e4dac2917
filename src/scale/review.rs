//! End-to-end review: FAR resolution, solve, derived metrics

use rayon::prelude::*;
use serde::Serialize;

use crate::core::config::AssumptionSet;
use crate::core::error::Result;
use crate::scale::far::resolve_far;
use crate::scale::inputs::SiteInputs;
use crate::scale::metrics::DerivedMetrics;
use crate::scale::result::SolverResult;
use crate::scale::solver::solve;
use crate::tables::{ProgramMixTable, ZoneTable};

/// Complete output for one site
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleReview {
    pub address: String,
    pub use_type: String,
    pub land_area: f64,
    pub assumptions: AssumptionSet,
    pub result: SolverResult,
    pub metrics: DerivedMetrics,
}

/// Run the full review for one set of inputs
///
/// Pure and synchronous; call again whenever any input changes.
pub fn review(
    site: &SiteInputs,
    zones: &ZoneTable,
    mixes: &ProgramMixTable,
    assumptions: &AssumptionSet,
) -> Result<ScaleReview> {
    let applied_far = resolve_far(&site.zoning, zones)?;
    let result = solve(applied_far, site, assumptions, mixes)?;
    let metrics = DerivedMetrics::derive(&result, site.land_area, assumptions);

    tracing::debug!(
        "Reviewed {} ({}): FAR {:.2}, {} units, {} parking, {} floors",
        site.address,
        site.use_type,
        applied_far,
        result.total_units(),
        result.total_parking(),
        metrics.ground_floors
    );

    Ok(ScaleReview {
        address: site.address.clone(),
        use_type: site.use_type.clone(),
        land_area: site.land_area,
        assumptions: *assumptions,
        result,
        metrics,
    })
}

/// Review the same site once per value of one assumption
///
/// `apply` writes the swept value into a copy of `base`. Runs are
/// independent and evaluated in parallel; output keeps input order.
pub fn sweep<F>(
    site: &SiteInputs,
    zones: &ZoneTable,
    mixes: &ProgramMixTable,
    base: &AssumptionSet,
    values: &[f64],
    apply: F,
) -> Vec<(f64, Result<ScaleReview>)>
where
    F: Fn(&mut AssumptionSet, f64) + Sync,
{
    values
        .par_iter()
        .map(|&value| {
            let mut assumptions = *base;
            apply(&mut assumptions, value);
            (value, review(site, zones, mixes, &assumptions))
        })
        .collect()
}
