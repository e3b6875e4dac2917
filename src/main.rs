//! Scale Review - command-line entry point
//!
//! Reads site inputs from flags and/or a review TOML file, optionally asks
//! the zone-lookup service for the site's district, and prints the review.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

use scale_review::core::config::{AssumptionSet, ReviewConfig};
use scale_review::core::error::Result;
use scale_review::core::types::Category;
use scale_review::lookup::{LookupOutcome, ZoneLookupClient};
use scale_review::scale::{review, sweep, ScaleReview, SiteInputs, ZoningSelection};
use scale_review::tables::{ProgramMixTable, ZoneTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Building scale review for mixed-use sites
#[derive(Parser, Debug)]
#[command(name = "scale-review")]
#[command(about = "Estimate floor area, units, parking, floors and schedule for a site")]
struct Args {
    /// Review TOML file (assumptions, site, optional zone/use-type tables)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Site address (used by --lookup, otherwise only echoed)
    #[arg(long)]
    address: Option<String>,

    /// Land area in m²
    #[arg(long)]
    land_area: Option<f64>,

    /// Zone id; the first zone when --zone2 is given
    #[arg(long)]
    zone: Option<String>,

    /// Second zone id; switches to dual-zone FAR blending
    #[arg(long)]
    zone2: Option<String>,

    /// Area of the first zone (dual-zone)
    #[arg(long, default_value_t = 0.0)]
    zone1_area: f64,

    /// Area of the second zone (dual-zone)
    #[arg(long, default_value_t = 0.0)]
    zone2_area: f64,

    /// Manual FAR as a ratio, e.g. 3.5 for 350% (dual-zone)
    #[arg(long)]
    manual_far: Option<f64>,

    /// Use type id
    #[arg(long)]
    use_type: Option<String>,

    /// Dorm unit exclusive area (m²)
    #[arg(long)]
    dorm_size: Option<f64>,

    /// Officetel unit exclusive area (m²)
    #[arg(long)]
    officetel_size: Option<f64>,

    /// Hotel unit exclusive area (m²)
    #[arg(long)]
    hotel_size: Option<f64>,

    #[arg(long)]
    ground_shared_ratio: Option<f64>,

    #[arg(long)]
    dorm_exclusive_ratio: Option<f64>,

    #[arg(long)]
    hotel_officetel_exclusive_ratio: Option<f64>,

    #[arg(long)]
    mech_elec_ratio: Option<f64>,

    #[arg(long)]
    underground_coverage: Option<f64>,

    #[arg(long)]
    typical_coverage: Option<f64>,

    #[arg(long)]
    self_parking_ratio: Option<f64>,

    /// Look up the address's zoning district and pre-select the zone
    #[arg(long)]
    lookup: bool,

    /// Print the zone and use-type tables and exit
    #[arg(long)]
    list_tables: bool,

    /// Review once per self-parking ratio (comma separated)
    #[arg(long, value_delimiter = ',')]
    sweep_self_parking: Vec<f64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

impl Args {
    fn apply_site(&self, site: &mut SiteInputs) {
        if let Some(address) = &self.address {
            site.address = address.clone();
        }
        if let Some(land_area) = self.land_area {
            site.land_area = land_area;
        }
        if let Some(use_type) = &self.use_type {
            site.use_type = use_type.clone();
        }

        match (&self.zone, &self.zone2) {
            (Some(zone1), Some(zone2)) => {
                let mut zoning =
                    ZoningSelection::dual(zone1, self.zone1_area, zone2, self.zone2_area);
                if let Some(far) = self.manual_far {
                    zoning = zoning.with_manual_far(far);
                }
                site.zoning = zoning;
            }
            (Some(zone), None) => site.zoning = ZoningSelection::single(zone),
            _ => {}
        }

        let sizes = &mut site.unit_sizes;
        for (flag, size) in [
            (self.dorm_size, &mut sizes.dorm),
            (self.officetel_size, &mut sizes.officetel),
            (self.hotel_size, &mut sizes.hotel),
        ] {
            if let Some(value) = flag {
                *size = value;
            }
        }
    }

    fn apply_assumptions(&self, a: &mut AssumptionSet) {
        for (flag, ratio) in [
            (self.ground_shared_ratio, &mut a.ground_shared_ratio),
            (self.dorm_exclusive_ratio, &mut a.dorm_exclusive_ratio),
            (
                self.hotel_officetel_exclusive_ratio,
                &mut a.hotel_officetel_exclusive_ratio,
            ),
            (self.mech_elec_ratio, &mut a.mech_elec_ratio),
            (self.underground_coverage, &mut a.underground_coverage),
            (self.typical_coverage, &mut a.typical_coverage),
            (self.self_parking_ratio, &mut a.self_parking_ratio),
        ] {
            if let Some(value) = flag {
                *ratio = value;
            }
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("scale_review=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ReviewConfig::load(path)?,
        None => ReviewConfig::default(),
    };
    let zones = config.zone_table()?;
    let mixes = config.program_mix_table()?;

    if args.list_tables {
        print_tables(&zones, &mixes);
        return Ok(());
    }

    let mut site = config.site.clone().unwrap_or_default();
    args.apply_site(&mut site);

    let mut assumptions = config.assumptions;
    args.apply_assumptions(&mut assumptions);

    if args.lookup {
        preselect_zone(&mut site, &zones)?;
    }

    if !args.sweep_self_parking.is_empty() {
        let runs = sweep(
            &site,
            &zones,
            &mixes,
            &assumptions,
            &args.sweep_self_parking,
            |a, ratio| a.self_parking_ratio = ratio,
        );
        return print_sweep(runs, args.format);
    }

    let review = review(&site, &zones, &mixes, &assumptions)?;
    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&review)?),
        OutputFormat::Text => display_review(&review),
    }

    Ok(())
}

/// Replace a single-zone selection with the district the lookup service found
fn preselect_zone(site: &mut SiteInputs, zones: &ZoneTable) -> Result<()> {
    if !matches!(site.zoning, ZoningSelection::Single { .. }) {
        tracing::warn!("--lookup ignored for dual-zone sites");
        return Ok(());
    }

    let rt = Runtime::new()?;
    let client = ZoneLookupClient::from_env()?;

    match rt.block_on(client.search(&site.address)) {
        Ok(outcome) => match outcome.zone_id(zones) {
            Some(zone) => {
                tracing::info!("Lookup selected zone {}", zone);
                site.zoning = ZoningSelection::single(zone);
            }
            None => match outcome {
                LookupOutcome::Found { district, .. } => {
                    tracing::warn!("District {} has no zone table entry", district)
                }
                LookupOutcome::NotFound => {
                    tracing::warn!("No zoning district found for {}", site.address)
                }
            },
        },
        Err(e) => tracing::warn!("Zone lookup via {} failed: {}", client.base_url(), e),
    }

    Ok(())
}

fn print_tables(zones: &ZoneTable, mixes: &ProgramMixTable) {
    println!("Zones (legal coverage / legal FAR / applied coverage / applied FAR):");
    for (id, zone) in zones.iter() {
        println!(
            "  {:<20} {:>5.0}% {:>5.0}% {:>5.0}% {:>5.0}%",
            id,
            zone.legal_coverage * 100.0,
            zone.legal_far * 100.0,
            zone.applied_coverage * 100.0,
            zone.applied_far * 100.0
        );
    }
    println!();
    println!("Use types (dorm / officetel / hotel / retail):");
    for (id, mix) in mixes.iter() {
        let fractions = mix.fractions();
        println!(
            "  {:<28} {:.2} {:.2} {:.2} {:.2}",
            id, fractions.dorm, fractions.officetel, fractions.hotel, fractions.retail
        );
    }
}

fn print_sweep(runs: Vec<(f64, Result<ScaleReview>)>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let reviews: Vec<serde_json::Value> = runs
                .into_iter()
                .map(|(ratio, run)| match run {
                    Ok(review) => serde_json::json!({ "self_parking_ratio": ratio, "review": review }),
                    Err(e) => serde_json::json!({ "self_parking_ratio": ratio, "error": e.to_string() }),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&reviews)?);
        }
        OutputFormat::Text => {
            println!(
                "{:>8} {:>8} {:>8} {:>10} {:>12} {:>8}",
                "self%", "parking", "tower", "tower m²", "ground m²", "units"
            );
            for (ratio, run) in runs {
                match run {
                    Ok(review) => {
                        let result = &review.result;
                        println!(
                            "{:>8} {:>8} {:>8} {:>10} {:>12} {:>8}",
                            fmt(ratio * 100.0, 1),
                            result.total_parking(),
                            result.parking.mechanical,
                            fmt(result.parking.tower_area, 0),
                            fmt(result.ground_area(), 2),
                            result.total_units()
                        );
                    }
                    Err(e) => println!("{:>8} error: {}", fmt(ratio * 100.0, 1), e),
                }
            }
        }
    }
    Ok(())
}

fn display_review(review: &ScaleReview) {
    let result = &review.result;
    let metrics = &review.metrics;

    println!("\n=== 건축 규모검토 ===");
    if !review.address.is_empty() {
        println!("대지위치: {}", review.address);
    }
    println!(
        "대지면적: {} m²   용도: {}   적용 용적률: {}%",
        fmt(review.land_area, 2),
        review.use_type,
        fmt(result.applied_far * 100.0, 1)
    );
    println!();
    println!("세대수:     {}", result.total_units());
    println!("건물높이:   {} m", fmt(metrics.building_height, 1));
    println!(
        "층수:       지상 {}층 / 지하 {}층",
        fmt(metrics.ground_floors, 0),
        fmt(metrics.underground_floors, 0)
    );
    println!("공사기간:   {}개월", fmt(metrics.construction_months, 0));
    println!("사업기간:   {}개월", fmt(metrics.development_months, 0));
    println!(
        "주차:       {}대 (자주식 {} / 기계식 {}, 주차타워 {}기)",
        result.total_parking(),
        result.parking.self_parking,
        result.parking.mechanical,
        result.parking.tower_units
    );
    println!();

    println!(
        "{:<8} {:>12} {:>10} {:>12} {:>12} {:>12} {:>6} {:>6}",
        "구분", "시설면적", "주차타워", "지상연면적", "지하연면적", "전체연면적", "호실", "주차"
    );
    for (category, facility) in result.facilities.iter() {
        let units = if category == Category::Retail {
            "-".to_string()
        } else {
            facility.units.to_string()
        };
        println!(
            "{:<8} {:>12} {:>10} {:>12} {:>12} {:>12} {:>6} {:>6}",
            category.label(),
            fmt(facility.facility_area, 2),
            fmt(facility.parking_tower_area, 2),
            fmt(facility.ground_area, 2),
            fmt(facility.under_area, 2),
            fmt(facility.total_area(), 2),
            units,
            facility.parking
        );
    }
    let totals = &result.totals;
    println!(
        "{:<8} {:>12} {:>10} {:>12} {:>12} {:>12} {:>6} {:>6}",
        "합계",
        fmt(totals.facility_area, 2),
        fmt(totals.parking_tower_area, 2),
        fmt(totals.ground_area, 2),
        fmt(totals.under_area, 2),
        fmt(totals.total_area, 2),
        totals.units,
        totals.parking
    );
    println!();
    println!(
        "공유공간: {} m² (지상 {} / 지하 {})",
        fmt(result.shared_space.total, 2),
        fmt(result.shared_space.ground, 2),
        fmt(result.shared_space.underground, 2)
    );
    if !result.converged {
        println!("(수렴하지 않음: {}회 반복 후 마지막 값 사용)", result.passes);
    }
    if !metrics.is_finite() {
        println!("(대지면적이 0이라 층수와 공사기간을 계산할 수 없음)");
    }
}

/// Fixed decimals with thousands separators; non-finite values print as-is
fn fmt(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let formatted = format!("{:.*}", decimals, value);
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}
