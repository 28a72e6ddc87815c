//! The in-memory route catalogue.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::domain::{District, Location, Segment};

/// A pre-authored route: an ordered chain of segments addressed by its
/// `(start, destination)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedRoute {
    start: Location,
    destination: Location,
    segments: Vec<Segment>,
}

impl KeyedRoute {
    pub fn start(&self) -> &Location {
        &self.start
    }

    pub fn destination(&self) -> &Location {
        &self.destination
    }

    /// Segments in file order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

/// Keyed-route form of a district.
///
/// Routes keep their authoring order so that anything walking all of them
/// (location listing, the optional search fallback) is deterministic.
#[derive(Debug, Clone, Default)]
pub struct KeyedRoutes {
    routes: Vec<KeyedRoute>,
    index: HashMap<(Location, Location), usize>,
}

impl KeyedRoutes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a route with no segments and return its handle.
    ///
    /// Reopening an existing key empties that route but keeps its position.
    pub fn open_route(&mut self, start: Location, destination: Location) -> usize {
        let key = (start.clone(), destination.clone());
        let route = KeyedRoute {
            start,
            destination,
            segments: Vec::new(),
        };
        match self.index.get(&key) {
            Some(&idx) => {
                self.routes[idx] = route;
                idx
            }
            None => {
                self.routes.push(route);
                let idx = self.routes.len() - 1;
                self.index.insert(key, idx);
                idx
            }
        }
    }

    /// Append a segment to a route opened with [`KeyedRoutes::open_route`].
    ///
    /// Unknown handles are ignored.
    pub fn push_segment(&mut self, route: usize, segment: Segment) {
        if let Some(r) = self.routes.get_mut(route) {
            r.segments.push(segment);
        }
    }

    /// Insert (or replace) a whole route.
    pub fn insert(&mut self, start: Location, destination: Location, segments: Vec<Segment>) {
        let idx = self.open_route(start, destination);
        self.routes[idx].segments = segments;
    }

    /// Exact lookup by `(start, destination)`.
    pub fn get(&self, start: &Location, destination: &Location) -> Option<&KeyedRoute> {
        self.index
            .get(&(start.clone(), destination.clone()))
            .map(|&idx| &self.routes[idx])
    }

    /// Routes in authoring order.
    pub fn routes(&self) -> &[KeyedRoute] {
        &self.routes
    }

    /// Every segment of every route, in file order.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.routes.iter().flat_map(|r| r.segments.iter())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    fn locations(&self) -> BTreeSet<Location> {
        let mut locations = BTreeSet::new();
        for route in &self.routes {
            locations.insert(route.start.clone());
            locations.insert(route.destination.clone());
            for segment in &route.segments {
                locations.insert(segment.from().clone());
                locations.insert(segment.to().clone());
            }
        }
        locations
    }
}

/// Flat-segment form of a district: standalone edges in row order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatSegments {
    segments: Vec<Segment>,
}

impl FlatSegments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Segments in row order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    fn locations(&self) -> BTreeSet<Location> {
        self.segments
            .iter()
            .flat_map(|s| [s.from().clone(), s.to().clone()])
            .collect()
    }
}

impl FromIterator<Segment> for FlatSegments {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

/// The routes of one district, in whichever form the guide was authored.
#[derive(Debug, Clone)]
pub enum DistrictCatalogue {
    /// Named routes looked up by exact key
    Keyed(KeyedRoutes),
    /// Standalone segments searched as a graph
    Flat(FlatSegments),
}

impl DistrictCatalogue {
    /// Short name of the catalogue form, for status output.
    pub fn form(&self) -> &'static str {
        match self {
            DistrictCatalogue::Keyed(_) => "keyed",
            DistrictCatalogue::Flat(_) => "flat",
        }
    }

    /// Number of keyed routes; zero for the flat form.
    pub fn route_count(&self) -> usize {
        match self {
            DistrictCatalogue::Keyed(routes) => routes.len(),
            DistrictCatalogue::Flat(_) => 0,
        }
    }

    pub fn segment_count(&self) -> usize {
        match self {
            DistrictCatalogue::Keyed(routes) => routes.segments().count(),
            DistrictCatalogue::Flat(flat) => flat.len(),
        }
    }

    /// Every location named by this catalogue: segment endpoints and
    /// keyed-route endpoints.
    pub fn locations(&self) -> BTreeSet<Location> {
        match self {
            DistrictCatalogue::Keyed(routes) => routes.locations(),
            DistrictCatalogue::Flat(flat) => flat.locations(),
        }
    }
}

/// A catalogue entry with its location set computed once at insertion.
#[derive(Debug, Clone)]
struct DistrictEntry {
    catalogue: DistrictCatalogue,
    locations: BTreeSet<Location>,
}

/// The loaded fare guide: one catalogue per district.
///
/// Read-only once built; share it behind an `Arc` for concurrent queries.
#[derive(Debug, Clone, Default)]
pub struct RouteGuide {
    districts: BTreeMap<District, DistrictEntry>,
}

impl RouteGuide {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a district, replacing any catalogue already stored for it.
    pub fn insert(&mut self, district: District, catalogue: DistrictCatalogue) {
        let locations = catalogue.locations();
        self.districts.insert(
            district,
            DistrictEntry {
                catalogue,
                locations,
            },
        );
    }

    pub fn get(&self, district: District) -> Option<&DistrictCatalogue> {
        self.districts.get(&district).map(|e| &e.catalogue)
    }

    /// Sorted locations of a district.
    pub fn locations(&self, district: District) -> Option<&BTreeSet<Location>> {
        self.districts.get(&district).map(|e| &e.locations)
    }

    /// Districts with their catalogues, in ascending district order.
    pub fn districts(&self) -> impl Iterator<Item = (District, &DistrictCatalogue)> {
        self.districts.iter().map(|(d, e)| (*d, &e.catalogue))
    }

    pub fn len(&self) -> usize {
        self.districts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.districts.is_empty()
    }

    /// Total segments across all districts.
    pub fn segment_count(&self) -> usize {
        self.districts
            .values()
            .map(|e| e.catalogue.segment_count())
            .sum()
    }
}
