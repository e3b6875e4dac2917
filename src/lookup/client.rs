//! Async client for the external address → zoning-district service
//!
//! The service takes a free-text address and answers with the district
//! name it found (or none). Only its string answer is used here; geocoding
//! and scraping stay on the service side.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, ScaleError};
use crate::tables::ZoneTable;

use super::district::zone_id_for_district;

/// Lookups that scrape slowly are abandoned after this long
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    address: &'a str,
}

/// Body returned by `POST /search`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub address: String,
    /// District name the service settled on
    #[serde(rename = "final", default)]
    pub final_zone: Option<String>,
    /// Answer from the land-use portal
    #[serde(rename = "method1", default)]
    pub portal: Option<String>,
    /// Answer from the map data API
    #[serde(rename = "method2", default)]
    pub map_api: Option<String>,
    #[serde(rename = "match", default)]
    pub sources_agree: Option<bool>,
}

/// What the lookup found for an address
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found {
        district: String,
        /// `Some(false)` when both sources answered differently
        sources_agree: Option<bool>,
    },
    NotFound,
}

impl LookupOutcome {
    pub fn from_response(response: SearchResponse) -> Self {
        match response.final_zone.filter(|zone| !zone.trim().is_empty()) {
            Some(district) => LookupOutcome::Found {
                district,
                sources_agree: response.sources_agree,
            },
            None => LookupOutcome::NotFound,
        }
    }

    /// Zone-table key to pre-select for this outcome
    pub fn zone_id(&self, zones: &ZoneTable) -> Option<String> {
        match self {
            LookupOutcome::Found { district, .. } => zone_id_for_district(district, zones),
            LookupOutcome::NotFound => None,
        }
    }
}

pub struct ZoneLookupClient {
    client: Client,
    base_url: String,
}

impl ZoneLookupClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ScaleError::Lookup(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from environment variables
    ///
    /// Optional: ZONE_LOOKUP_URL (defaults to http://localhost:8080)
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("ZONE_LOOKUP_URL")
            .unwrap_or_else(|_| "http://localhost:8080".into());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the service which district an address lies in
    pub async fn search(&self, address: &str) -> Result<LookupOutcome> {
        let address = address.trim();
        if address.is_empty() {
            return Err(ScaleError::InvalidInput("address is empty".into()));
        }

        tracing::debug!("Zone lookup for {}", address);

        let response = self
            .client
            .post(format!("{}/search", self.base_url))
            .json(&SearchRequest { address })
            .send()
            .await
            .map_err(|e| ScaleError::Lookup(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ScaleError::Lookup(format!("{}: {}", status, error_text)));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| ScaleError::Lookup(e.to_string()))?;

        if body.sources_agree == Some(false) {
            tracing::warn!(
                "Lookup sources disagree for {}: {:?} vs {:?}",
                address,
                body.portal,
                body.map_api
            );
        }

        Ok(LookupOutcome::from_response(body))
    }
}
