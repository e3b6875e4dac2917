//! Site and program inputs supplied by the caller

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, ScaleError};
use crate::core::types::{Area, Category};
use crate::tables::ProgramMix;

/// How the site's FAR is determined
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ZoningSelection {
    /// Whole site in one zoning district
    Single { zone: String },
    /// Site split across two districts
    Dual {
        zone1: String,
        zone1_area: Area,
        zone2: String,
        zone2_area: Area,
        /// Manually entered FAR as a ratio (3.5 = 350%); used when > 0
        #[serde(default)]
        manual_far: Option<f64>,
    },
}

impl ZoningSelection {
    pub fn single(zone: impl Into<String>) -> Self {
        ZoningSelection::Single { zone: zone.into() }
    }

    pub fn dual(
        zone1: impl Into<String>,
        zone1_area: Area,
        zone2: impl Into<String>,
        zone2_area: Area,
    ) -> Self {
        ZoningSelection::Dual {
            zone1: zone1.into(),
            zone1_area,
            zone2: zone2.into(),
            zone2_area,
            manual_far: None,
        }
    }

    /// Set the manual FAR override (only meaningful for dual-zone sites)
    pub fn with_manual_far(mut self, far: f64) -> Self {
        if let ZoningSelection::Dual { manual_far, .. } = &mut self {
            *manual_far = Some(far);
        }
        self
    }
}

impl Default for ZoningSelection {
    fn default() -> Self {
        ZoningSelection::single("일반주거지역_3종")
    }
}

/// Exclusive area of one unit per occupied category (m²)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitSizes {
    pub dorm: Area,
    pub officetel: Area,
    pub hotel: Area,
}

impl Default for UnitSizes {
    fn default() -> Self {
        Self {
            dorm: 14.5,
            officetel: 17.5,
            hotel: 17.5,
        }
    }
}

impl UnitSizes {
    /// Unit size paired with each occupied category, in [`Category::OCCUPIED`] order
    pub fn occupied(&self) -> [(Category, Area); 3] {
        [
            (Category::Dorm, self.dorm),
            (Category::Officetel, self.officetel),
            (Category::Hotel, self.hotel),
        ]
    }
}

/// Everything the review needs to know about the site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInputs {
    /// Free-text site address; carried through, never parsed
    pub address: String,
    pub land_area: Area,
    pub zoning: ZoningSelection,
    pub use_type: String,
    pub unit_sizes: UnitSizes,
}

impl Default for SiteInputs {
    fn default() -> Self {
        Self {
            address: "서울특별시 성동구 도선동 39-2".to_string(),
            land_area: 2845.3,
            zoning: ZoningSelection::default(),
            use_type: "임대형기숙사".to_string(),
            unit_sizes: UnitSizes::default(),
        }
    }
}

impl SiteInputs {
    pub fn new(land_area: Area, zoning: ZoningSelection, use_type: impl Into<String>) -> Self {
        Self {
            address: String::new(),
            land_area,
            zoning,
            use_type: use_type.into(),
            unit_sizes: UnitSizes::default(),
        }
    }

    pub fn with_unit_sizes(mut self, unit_sizes: UnitSizes) -> Self {
        self.unit_sizes = unit_sizes;
        self
    }

    /// Guard the divisors the solver uses for this mix
    ///
    /// Zero land area passes: it is a degenerate but legal input whose
    /// `NaN` floor counts are reported as-is. Infinite land area does not.
    pub fn validate(&self, mix: &ProgramMix) -> Result<()> {
        if !self.land_area.is_finite() || self.land_area < 0.0 {
            return Err(ScaleError::InvalidInput(format!(
                "land area must be finite and non-negative, got {}",
                self.land_area
            )));
        }

        for (category, size) in self.unit_sizes.occupied() {
            if !mix.includes(category) {
                continue;
            }
            if !(size > 0.0) {
                return Err(ScaleError::InvalidInput(format!(
                    "{} unit size must be positive, got {}",
                    category, size
                )));
            }
        }

        Ok(())
    }
}
