//! Shared (common) space sized from the occupied unit count

use serde::{Deserialize, Serialize};

use crate::core::config::{SHARED_SPACE_PER_UNIT_LARGE, SHARED_SPACE_PER_UNIT_SMALL};
use crate::core::types::Area;

/// Shared space and its above/below-ground split
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SharedSpace {
    pub total: Area,
    pub ground: Area,
    pub underground: Area,
}

impl SharedSpace {
    /// Size shared space for `units` and split it by `ground_ratio`
    pub fn for_units(units: i64, ground_ratio: f64) -> Self {
        let total = shared_space_area(units);
        let ground = total * ground_ratio;
        Self {
            total,
            ground,
            underground: total - ground,
        }
    }
}

/// Piecewise-linear shared space requirement
///
/// 4 m² per unit up to 150 units, then 6 m² per unit. The 301-500 and >500
/// brackets restart from the legacy sheet's own base values (1125, 1725),
/// which leaves a step at each boundary; those bases are kept as-is.
pub fn shared_space_area(units: i64) -> Area {
    let units = units as f64;
    if units <= 150.0 {
        units * SHARED_SPACE_PER_UNIT_SMALL
    } else if units <= 300.0 {
        600.0 + (units - 150.0) * SHARED_SPACE_PER_UNIT_LARGE
    } else if units <= 500.0 {
        1125.0 + (units - 300.0) * SHARED_SPACE_PER_UNIT_LARGE
    } else {
        1725.0 + (units - 500.0) * SHARED_SPACE_PER_UNIT_LARGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brackets() {
        assert_eq!(shared_space_area(0), 0.0);
        assert_eq!(shared_space_area(150), 600.0);
        assert_eq!(shared_space_area(151), 606.0);
        assert_eq!(shared_space_area(300), 1500.0);
        assert_eq!(shared_space_area(301), 1131.0);
        assert_eq!(shared_space_area(500), 2325.0);
        assert_eq!(shared_space_area(501), 1731.0);
    }

    #[test]
    fn test_split_by_ground_ratio() {
        let shared = SharedSpace::for_units(296, 0.5);
        assert_eq!(shared.total, 1476.0);
        assert_eq!(shared.ground, 738.0);
        assert_eq!(shared.underground, 738.0);

        let all_ground = SharedSpace::for_units(100, 1.0);
        assert_eq!(all_ground.underground, 0.0);
    }
}
