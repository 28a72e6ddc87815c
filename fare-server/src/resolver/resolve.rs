//! Fare resolution.
//!
//! Turns a request (district, start, optional destination, trike flag) into a
//! priced [`FareQuote`]. Keyed districts are answered by exact route lookup;
//! flat districts by depth-first search over their segments.

use std::collections::BTreeSet;
use std::fmt;

use tracing::debug;

use super::config::ResolverConfig;
use super::search::{find_path, orient};
use crate::domain::{District, Fare, FareQuote, Location, Segment};
use crate::guide::{DistrictCatalogue, KeyedRoutes, RouteGuide};

/// Which side of a request a location came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationRole {
    Start,
    Destination,
}

impl fmt::Display for LocationRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationRole::Start => f.write_str("start location"),
            LocationRole::Destination => f.write_str("destination"),
        }
    }
}

/// Error from fare resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The guide has no catalogue for the district
    #[error("no routes found for district {0}")]
    UnknownDistrict(District),

    /// A location is not named anywhere in the district
    #[error(
        "invalid {role} '{location}' for district {district}. Available locations: {}",
        join_locations(.available)
    )]
    UnknownLocation {
        role: LocationRole,
        location: String,
        district: District,
        available: Vec<Location>,
    },

    /// Both locations are known but nothing connects them
    #[error("no route found from {start} to {destination} in district {district}")]
    NoRoute {
        district: District,
        start: Location,
        destination: Location,
    },
}

fn join_locations(locations: &[Location]) -> String {
    locations
        .iter()
        .map(Location::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A fare query.
///
/// Locations are raw user input; they are normalized during resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FareRequest {
    pub district: District,
    pub start: String,
    pub destination: Option<String>,
    pub include_trike: bool,
}

impl FareRequest {
    /// A request to the hub without a trike.
    pub fn new(district: District, start: impl Into<String>) -> Self {
        Self {
            district,
            start: start.into(),
            destination: None,
            include_trike: false,
        }
    }

    pub fn to(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    pub fn with_trike(mut self, include_trike: bool) -> Self {
        self.include_trike = include_trike;
        self
    }
}

/// Answers fare queries against a loaded guide.
///
/// Holds only shared references, so any number of resolvers can query one
/// guide concurrently.
pub struct RouteResolver<'a> {
    guide: &'a RouteGuide,
    config: &'a ResolverConfig,
}

impl<'a> RouteResolver<'a> {
    pub fn new(guide: &'a RouteGuide, config: &'a ResolverConfig) -> Self {
        Self { guide, config }
    }

    /// Price the route from `request.start` to `request.destination`
    /// (or the hub, when no destination is given).
    pub fn resolve(&self, request: &FareRequest) -> Result<FareQuote, ResolveError> {
        let district = request.district;
        let catalogue = self
            .guide
            .get(district)
            .ok_or(ResolveError::UnknownDistrict(district))?;
        let known = self
            .guide
            .locations(district)
            .ok_or(ResolveError::UnknownDistrict(district))?;

        let start = known_location(district, known, &request.start, LocationRole::Start)?;
        let destination = match &request.destination {
            Some(raw) => known_location(district, known, raw, LocationRole::Destination)?,
            None => known_location(district, known, self.config.hub.as_str(), LocationRole::Destination)?,
        };

        let no_route = || ResolveError::NoRoute {
            district,
            start: start.clone(),
            destination: destination.clone(),
        };

        // A single location is never a route
        if start == destination {
            return Err(no_route());
        }

        let segments = match catalogue {
            DistrictCatalogue::Keyed(routes) => self.resolve_keyed(routes, &start, &destination),
            DistrictCatalogue::Flat(flat) => self.search(flat.segments(), &start, &destination),
        }
        .filter(|segments| !segments.is_empty())
        .ok_or_else(no_route)?;

        let subtotal: Fare = segments.iter().map(Segment::fare).sum();
        let trike_fare = if request.include_trike {
            self.config.trike_surcharge(subtotal)
        } else {
            Fare::ZERO
        };

        debug!(
            district = %district,
            start = %start,
            destination = %destination,
            segments = segments.len(),
            subtotal = %subtotal,
            trike = %trike_fare,
            "Resolved fare"
        );

        Ok(FareQuote::new(segments, trike_fare))
    }

    /// Exact key lookup, with graph search only when the fallback is enabled.
    fn resolve_keyed(
        &self,
        routes: &KeyedRoutes,
        start: &Location,
        destination: &Location,
    ) -> Option<Vec<Segment>> {
        if let Some(route) = routes.get(start, destination) {
            return Some(route.segments().to_vec());
        }
        if !self.config.keyed_search_fallback {
            return None;
        }
        let segments: Vec<&Segment> = routes.segments().collect();
        self.search(&segments, start, destination)
    }

    fn search<S: std::borrow::Borrow<Segment>>(
        &self,
        segments: &[S],
        start: &Location,
        destination: &Location,
    ) -> Option<Vec<Segment>> {
        let result = find_path(segments, start, destination, self.config.max_depth);
        debug!(
            start = %start,
            destination = %destination,
            explored = result.locations_explored,
            found = result.path.is_some(),
            "Searched segment graph"
        );
        result.path.map(|path| orient(segments, &path))
    }

    /// True iff `location` (normalized) is named anywhere in the district.
    pub fn is_valid_location(&self, location: &str, district: District) -> bool {
        let Ok(location) = Location::new(location) else {
            return false;
        };
        self.guide
            .locations(district)
            .is_some_and(|known| known.contains(&location))
    }

    /// All locations of a district, sorted ascending.
    pub fn locations(&self, district: District) -> Result<Vec<Location>, ResolveError> {
        self.guide
            .locations(district)
            .map(|known| known.iter().cloned().collect())
            .ok_or(ResolveError::UnknownDistrict(district))
    }
}

/// Normalize `raw` and check it against the district's locations.
fn known_location(
    district: District,
    known: &BTreeSet<Location>,
    raw: &str,
    role: LocationRole,
) -> Result<Location, ResolveError> {
    match Location::new(raw) {
        Ok(location) if known.contains(&location) => Ok(location),
        _ => Err(ResolveError::UnknownLocation {
            role,
            location: raw.trim().to_uppercase(),
            district,
            available: known.iter().cloned().collect(),
        }),
    }
}
