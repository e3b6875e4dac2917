//! Map official zoning-district names onto zone-table keys

use crate::tables::ZoneTable;

/// Zone-table key for a district name returned by the lookup service
///
/// Accepts table keys as-is and official numbered names such as
/// `제3종일반주거지역` (→ `일반주거지역_3종`). Whitespace and a trailing
/// parenthetical qualifier (`(7층이하)`) are ignored. Returns `None` when
/// the district has no entry in `zones`.
pub fn zone_id_for_district(district: &str, zones: &ZoneTable) -> Option<String> {
    let compact: String = district.split_whitespace().collect();
    let name = compact.split(['(', '（']).next().unwrap_or_default();
    if name.is_empty() {
        return None;
    }

    if zones.contains(name) {
        return Some(name.to_string());
    }

    let candidate = numbered_district_key(name)?;
    zones.contains(&candidate).then_some(candidate)
}

/// `제N종<name>` → `<name>_N종`
fn numbered_district_key(name: &str) -> Option<String> {
    let rest = name.strip_prefix('제')?;
    let (number, district) = rest.split_once('종')?;
    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) || district.is_empty() {
        return None;
    }
    Some(format!("{}_{}종", district, number))
}
