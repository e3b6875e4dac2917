//! Integration tests for the scale review pipeline
//!
//! The baseline figures come from the legacy spreadsheet this calculator
//! replaces: 2845.3 m² in 일반주거지역_3종, pure dormitory, 14.5 m² units.

use scale_review::core::config::{AssumptionSet, MAX_ITERATIONS};
use scale_review::core::error::ScaleError;
use scale_review::core::types::Category;
use scale_review::scale::{
    resolve_far, review, solve, ScaleReview, SiteInputs, UnitSizes, ZoningSelection,
};
use scale_review::tables::{ProgramMixTable, ZoneTable};

fn run(site: &SiteInputs) -> ScaleReview {
    review(
        site,
        &ZoneTable::with_defaults(),
        &ProgramMixTable::with_defaults(),
        &AssumptionSet::default(),
    )
    .expect("review should succeed")
}

fn site_with_use_type(use_type: &str) -> SiteInputs {
    SiteInputs {
        use_type: use_type.to_string(),
        ..SiteInputs::default()
    }
}

// ============================================================================
// Legacy Baseline
// ============================================================================

#[test]
fn test_legacy_dormitory_baseline() {
    let review = run(&SiteInputs::default());
    let result = &review.result;
    let metrics = &review.metrics;

    assert_eq!(result.applied_far, 2.99);
    assert_eq!(result.total_units(), 296);
    assert!((result.ground_area() - 8557.447).abs() < 1e-6);
    assert!((result.under_area() - 1593.7447).abs() < 1e-6);
    assert!((result.total_area() - 10151.1917).abs() < 1e-6);
    assert_eq!(result.total_parking(), 51);

    assert_eq!(metrics.ground_floors, 12.0);
    assert_eq!(metrics.underground_floors, 1.0);
    assert!((metrics.building_height - 39.6).abs() < 1e-9);
    assert_eq!(metrics.construction_months, 21.0);
    assert_eq!(metrics.development_months, 36.0);

    assert!(result.converged);
    assert_eq!(result.passes, 4);
}

#[test]
fn test_legacy_baseline_breakdown() {
    let result = run(&SiteInputs::default()).result;
    let dorm = &result.facilities.dorm;

    assert!((dorm.facility_area - 8507.447).abs() < 1e-6);
    assert!((dorm.parking_tower_area - 50.0).abs() < 1e-9);
    assert_eq!(dorm.units, 296);
    assert_eq!(dorm.parking, 51);

    // Other categories stay empty for a pure dormitory
    for category in [Category::Officetel, Category::Hotel, Category::Retail] {
        let facility = &result.facilities[category];
        assert_eq!(facility.ground_area, 0.0);
        assert_eq!(facility.under_area, 0.0);
        assert_eq!(facility.units, 0);
        assert_eq!(facility.parking, 0);
    }

    assert_eq!(result.shared_space.total, 1476.0);
    assert_eq!(result.shared_space.ground, 738.0);
    assert_eq!(result.shared_space.underground, 738.0);
    assert_eq!(result.parking.self_parking, 2);
    assert_eq!(result.parking.mechanical, 49);
    assert_eq!(result.parking.tower_units, 1);
}

// ============================================================================
// Use Types
// ============================================================================

#[test]
fn test_every_builtin_use_type() {
    // (use type, units, parking)
    let expected = [
        ("임대형기숙사", 296, 51),
        ("관광호텔", 270, 76),
        ("오피스텔", 272, 136),
        ("임대형기숙사 + 근생", 223, 57),
        ("임대형기숙사 + 관광호텔", 289, 57),
        ("임대형기숙사 + 오피스텔 + 근생", 263, 68),
    ];

    for (use_type, units, parking) in expected {
        let result = run(&site_with_use_type(use_type)).result;
        assert_eq!(result.total_units(), units, "{} units", use_type);
        assert_eq!(result.total_parking(), parking, "{} parking", use_type);
        assert!(result.converged, "{} should converge", use_type);
    }
}

#[test]
fn test_mixed_use_parking_by_category() {
    let result = run(&site_with_use_type("임대형기숙사 + 오피스텔 + 근생")).result;

    assert_eq!(result.facilities.dorm.units, 219);
    assert_eq!(result.facilities.officetel.units, 44);
    assert_eq!(result.facilities.dorm.parking, 38);
    assert_eq!(result.facilities.officetel.parking, 22);
    assert_eq!(result.facilities.retail.parking, 8);
    assert_eq!(result.facilities.retail.units, 0);
}

#[test]
fn test_officetel_tower_grows_ground_area() {
    let result = run(&site_with_use_type("오피스텔")).result;

    // 136 spaces need two tower units
    assert_eq!(result.parking.tower_units, 2);
    assert!((result.ground_area() - 8607.447).abs() < 1e-6);
    assert_eq!(result.passes, 5);
}

#[test]
fn test_unit_size_changes_unit_count() {
    let larger = SiteInputs::default().with_unit_sizes(UnitSizes {
        dorm: 20.0,
        ..UnitSizes::default()
    });
    let baseline = run(&SiteInputs::default()).result;
    let result = run(&larger).result;

    assert!(result.total_units() < baseline.total_units());
}

// ============================================================================
// Zoning
// ============================================================================

#[test]
fn test_dual_zone_blend_feeds_solver() {
    let site = SiteInputs {
        zoning: ZoningSelection::dual("준주거지역", 1422.65, "일반주거지역_3종", 1422.65),
        ..SiteInputs::default()
    };
    let review = run(&site);

    assert!((review.result.applied_far - 3.49).abs() < 1e-12);
    assert!((review.result.far_area - 2845.3 * review.result.applied_far).abs() < 1e-9);
}

#[test]
fn test_dual_zone_manual_far() {
    let site = SiteInputs {
        zoning: ZoningSelection::dual("준주거지역", 1000.0, "일반주거지역_3종", 1845.3)
            .with_manual_far(3.5),
        ..SiteInputs::default()
    };
    assert_eq!(run(&site).result.applied_far, 3.5);
}

#[test]
fn test_dual_zone_fallback_far() {
    let zoning = ZoningSelection::dual("준주거지역", 0.0, "일반주거지역_3종", 0.0);
    let far = resolve_far(&zoning, &ZoneTable::with_defaults()).unwrap();
    assert_eq!(far, 3.0);
}

// ============================================================================
// Errors and Boundaries
// ============================================================================

#[test]
fn test_unknown_zone_aborts() {
    let site = SiteInputs {
        zoning: ZoningSelection::single("중심상업지역"),
        ..SiteInputs::default()
    };
    let err = review(
        &site,
        &ZoneTable::with_defaults(),
        &ProgramMixTable::with_defaults(),
        &AssumptionSet::default(),
    )
    .unwrap_err();

    assert!(matches!(err, ScaleError::UnknownZone(ref id) if id == "중심상업지역"));
}

#[test]
fn test_unknown_use_type_aborts() {
    let err = review(
        &site_with_use_type("지식산업센터"),
        &ZoneTable::with_defaults(),
        &ProgramMixTable::with_defaults(),
        &AssumptionSet::default(),
    )
    .unwrap_err();

    assert!(matches!(err, ScaleError::UnknownUseType(_)));
}

#[test]
fn test_zero_unit_size_for_used_category_rejected() {
    let site = site_with_use_type("관광호텔").with_unit_sizes(UnitSizes {
        hotel: 0.0,
        ..UnitSizes::default()
    });
    let err = solve(
        2.99,
        &site,
        &AssumptionSet::default(),
        &ProgramMixTable::with_defaults(),
    )
    .unwrap_err();

    assert!(matches!(err, ScaleError::InvalidInput(_)));
}

#[test]
fn test_zero_land_area_propagates_nan() {
    let site = SiteInputs {
        land_area: 0.0,
        ..SiteInputs::default()
    };
    let review = run(&site);
    let result = &review.result;

    assert!(result.converged);
    assert_eq!(result.passes, 1);
    assert_eq!(result.total_units(), 0);
    assert_eq!(result.total_parking(), 0);
    assert_eq!(result.ground_area(), 0.0);
    assert_eq!(result.under_area(), 0.0);

    assert!(review.metrics.ground_floors.is_nan());
    assert!(review.metrics.underground_floors.is_nan());
    assert!(review.metrics.building_height.is_nan());
    assert!(review.metrics.construction_months.is_nan());
    assert!(!review.metrics.is_finite());
}

#[test]
fn test_huge_land_area_saturates_unit_counts() {
    let site = SiteInputs::new(
        1.0e20,
        ZoningSelection::single("일반상업지역"),
        "임대형기숙사 + 관광호텔",
    );
    let review = run(&site);
    let result = &review.result;

    assert_eq!(result.facilities.dorm.units, i64::MAX);
    assert_eq!(result.total_units(), i64::MAX);
    assert!(result.total_parking() > 0);
    assert!(result.ground_area().is_finite());
    assert!(review.metrics.is_finite());
}

#[test]
fn test_infinite_land_area_rejected() {
    let site = SiteInputs {
        land_area: f64::INFINITY,
        ..SiteInputs::default()
    };
    let err = review(
        &site,
        &ZoneTable::with_defaults(),
        &ProgramMixTable::with_defaults(),
        &AssumptionSet::default(),
    )
    .unwrap_err();

    assert!(matches!(err, ScaleError::InvalidInput(_)));
}

#[test]
fn test_iteration_cap_is_respected() {
    for (use_type, _) in ProgramMixTable::with_defaults().iter() {
        for land_area in [150.0, 900.0, 4321.0, 15_000.0] {
            let site = SiteInputs {
                land_area,
                ..site_with_use_type(use_type)
            };
            let result = run(&site).result;
            assert!(result.passes <= MAX_ITERATIONS);
            if !result.converged {
                assert_eq!(result.passes, MAX_ITERATIONS);
            }
        }
    }
}

#[test]
fn test_review_serializes_to_json() {
    let review = run(&SiteInputs::default());
    let json = serde_json::to_value(&review).unwrap();

    assert_eq!(json["result"]["totals"]["units"], 296);
    assert_eq!(json["result"]["facilities"]["dorm"]["parking"], 51);
    assert_eq!(json["metrics"]["ground_floors"], 12.0);
    assert_eq!(json["use_type"], "임대형기숙사");
}
