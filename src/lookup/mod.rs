//! Zoning-district lookup by address
//!
//! The lookup service is an external collaborator; its answer only
//! pre-selects a zone id; the review itself never depends on it.

pub mod client;
pub mod district;

pub use client::{LookupOutcome, SearchResponse, ZoneLookupClient};
pub use district::zone_id_for_district;
