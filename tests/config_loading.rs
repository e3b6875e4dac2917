//! Integration tests for review TOML files

use std::path::PathBuf;

use scale_review::core::config::{AssumptionSet, ReviewConfig};
use scale_review::core::error::ScaleError;
use scale_review::scale::{review, SiteInputs, ZoningSelection};

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/scale_review.toml")
}

#[test]
fn test_sample_config_matches_builtin_defaults() {
    let config = ReviewConfig::load(&sample_path()).expect("sample config should load");

    assert_eq!(config.assumptions, AssumptionSet::default());
    assert_eq!(config.site.as_ref(), Some(&SiteInputs::default()));

    let zones = config.zone_table().unwrap();
    let mixes = config.program_mix_table().unwrap();
    assert_eq!(zones.len(), 4);
    assert_eq!(mixes.len(), 6);
    assert_eq!(zones.get("일반상업지역").unwrap().applied_far, 7.99);
}

#[test]
fn test_sample_config_reproduces_baseline() {
    let config = ReviewConfig::load(&sample_path()).unwrap();
    let site = config.site.clone().unwrap();

    let review = review(
        &site,
        &config.zone_table().unwrap(),
        &config.program_mix_table().unwrap(),
        &config.assumptions,
    )
    .unwrap();

    assert_eq!(review.result.total_units(), 296);
    assert_eq!(review.result.total_parking(), 51);
    assert_eq!(review.metrics.ground_floors, 12.0);
}

#[test]
fn test_custom_tables_replace_builtins() {
    let config = ReviewConfig::from_toml_str(
        r#"
        [site]
        land_area = 1000.0
        use_type = "레지던스"

        [site.zoning]
        mode = "single"
        zone = "특별구역"

        [[zones]]
        id = "특별구역"
        legal_coverage = 0.6
        legal_far = 5.0
        applied_coverage = 0.5
        applied_far = 4.5

        [[use_types]]
        id = "레지던스"
        hotel = 0.5
        officetel = 0.5
        "#,
    )
    .unwrap();

    let zones = config.zone_table().unwrap();
    let mixes = config.program_mix_table().unwrap();
    assert!(!zones.contains("준주거지역"));
    assert!(mixes.get("임대형기숙사").is_none());

    let site = config.site.clone().unwrap();
    assert_eq!(site.zoning, ZoningSelection::single("특별구역"));

    let review = review(&site, &zones, &mixes, &config.assumptions).unwrap();
    assert_eq!(review.result.applied_far, 4.5);
    assert!(review.result.facilities.hotel.units > 0);
    assert!(review.result.facilities.officetel.units > 0);
    assert_eq!(review.result.facilities.dorm.units, 0);
}

#[test]
fn test_incomplete_use_type_rejected() {
    let config = ReviewConfig::from_toml_str(
        r#"
        [[use_types]]
        id = "미완성"
        dorm = 0.6
        retail = 0.3
        "#,
    )
    .unwrap();

    assert!(matches!(
        config.program_mix_table(),
        Err(ScaleError::InvalidTable(_))
    ));
}

#[test]
fn test_invalid_assumption_rejected_on_load() {
    let err = ReviewConfig::from_toml_str(
        r#"
        [assumptions]
        typical_coverage = 1.4
        "#,
    )
    .unwrap_err();

    assert!(matches!(err, ScaleError::InvalidInput(_)));
}

#[test]
fn test_malformed_toml_rejected() {
    let err = ReviewConfig::from_toml_str("[assumptions\nself_parking_ratio = ").unwrap_err();
    assert!(matches!(err, ScaleError::Toml(_)));
}
