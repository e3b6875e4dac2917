//! Static lookup data: zoning districts and program mixes
//!
//! Both tables are immutable once built and are passed by reference into
//! the FAR resolver and the scale solver. Built-in contents mirror the
//! legacy spreadsheet; a review TOML file can replace either table.

pub mod program_mix;
pub mod zone;

pub use program_mix::{ProgramMix, ProgramMixTable, UseTypeEntry};
pub use zone::{ZoneEntry, ZoneRecord, ZoneTable};
