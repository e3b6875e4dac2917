//! Applied floor-area ratio for a site

use crate::core::config::DEFAULT_DUAL_ZONE_FAR;
use crate::core::error::{Result, ScaleError};
use crate::scale::inputs::ZoningSelection;
use crate::tables::ZoneTable;

/// Resolve the applied FAR for a zoning selection
///
/// Single-zone sites take the zone's applied FAR and fail on an unknown
/// zone. Dual-zone sites use the manual override when it is positive,
/// otherwise the area-weighted average of both zones' applied FAR. A
/// dual-zone site with an unknown zone or a non-positive area falls back
/// to [`DEFAULT_DUAL_ZONE_FAR`] instead of failing.
pub fn resolve_far(zoning: &ZoningSelection, zones: &ZoneTable) -> Result<f64> {
    match zoning {
        ZoningSelection::Single { zone } => zones
            .get(zone)
            .map(|record| record.applied_far)
            .ok_or_else(|| ScaleError::UnknownZone(zone.clone())),

        ZoningSelection::Dual {
            zone1,
            zone1_area,
            zone2,
            zone2_area,
            manual_far,
        } => {
            if let Some(far) = manual_far.filter(|far| *far > 0.0) {
                return Ok(far);
            }

            let total_area = zone1_area + zone2_area;
            if !(total_area > 0.0 && *zone1_area > 0.0 && *zone2_area > 0.0) {
                tracing::debug!("Dual-zone area missing, using default FAR");
                return Ok(DEFAULT_DUAL_ZONE_FAR);
            }

            match (zones.get(zone1), zones.get(zone2)) {
                (Some(first), Some(second)) => Ok((first.applied_far * zone1_area
                    + second.applied_far * zone2_area)
                    / total_area),
                _ => {
                    tracing::debug!("Dual-zone id {} / {} not in table, using default FAR", zone1, zone2);
                    Ok(DEFAULT_DUAL_ZONE_FAR)
                }
            }
        }
    }
}
