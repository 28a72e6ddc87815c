//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{District, FareQuote, Location, Segment};
use crate::guide::GuideSource;
use crate::store::LoadedGuide;

/// Request to price a journey.
#[derive(Debug, Deserialize)]
pub struct FareCalculationRequest {
    /// District number
    pub district: u32,

    /// Where the journey starts
    pub start_location: String,

    /// Where it ends; the hub when omitted
    #[serde(default)]
    pub destination: Option<String>,

    /// Add a trike surcharge
    #[serde(default)]
    pub include_trike: bool,
}

/// One leg of a priced journey.
#[derive(Debug, Serialize)]
pub struct FareSegmentResult {
    pub vehicle: String,
    pub description: String,
    pub fare: f64,
}

impl FareSegmentResult {
    pub fn from_segment(segment: &Segment) -> Self {
        Self {
            vehicle: segment.vehicle().to_string(),
            description: segment.description().to_string(),
            fare: segment.fare().to_f64(),
        }
    }
}

/// A priced journey.
#[derive(Debug, Serialize)]
pub struct FareCalculationResponse {
    pub segments: Vec<FareSegmentResult>,
    pub trike_fare: f64,
    pub total_fare: f64,
}

impl FareCalculationResponse {
    pub fn from_quote(quote: &FareQuote) -> Self {
        Self {
            segments: quote
                .segments()
                .iter()
                .map(FareSegmentResult::from_segment)
                .collect(),
            trike_fare: quote.trike_fare().to_f64(),
            total_fare: quote.total_fare().to_f64(),
        }
    }
}

/// Query naming a district.
#[derive(Debug, Deserialize)]
pub struct LocationsQuery {
    pub district: u32,
}

/// All locations of a district.
#[derive(Debug, Serialize)]
pub struct LocationsResponse {
    pub district: u32,
    pub locations: Vec<String>,
}

impl LocationsResponse {
    pub fn new(district: District, locations: &[Location]) -> Self {
        Self {
            district: district.number(),
            locations: locations.iter().map(|l| l.as_str().to_string()).collect(),
        }
    }
}

/// Query for a location check.
#[derive(Debug, Deserialize)]
pub struct ValidateLocationQuery {
    pub district: u32,
    pub location: String,
}

#[derive(Debug, Serialize)]
pub struct ValidateLocationResponse {
    pub district: u32,
    pub location: String,
    pub valid: bool,
}

/// Summary of one district in the loaded guide.
#[derive(Debug, Serialize)]
pub struct DistrictStatus {
    pub district: u32,

    /// "keyed" or "flat"
    pub form: &'static str,

    pub routes: usize,
    pub segments: usize,
    pub locations: usize,
}

/// What the server currently has loaded.
#[derive(Debug, Serialize)]
pub struct GuideStatusResponse {
    pub source: String,
    pub format: String,
    pub loaded_at: DateTime<Utc>,
    pub districts: Vec<DistrictStatus>,
}

impl GuideStatusResponse {
    pub fn new(source: &GuideSource, loaded: &LoadedGuide) -> Self {
        let districts = loaded
            .guide
            .districts()
            .map(|(district, catalogue)| DistrictStatus {
                district: district.number(),
                form: catalogue.form(),
                routes: catalogue.route_count(),
                segments: catalogue.segment_count(),
                locations: loaded
                    .guide
                    .locations(district)
                    .map_or(0, |locations| locations.len()),
            })
            .collect();

        Self {
            source: source.path().display().to_string(),
            format: source.format().to_string(),
            loaded_at: loaded.loaded_at,
            districts,
        }
    }
}

/// Service banner for `/`.
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
