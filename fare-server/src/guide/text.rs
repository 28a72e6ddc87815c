//! Line-oriented fare guide grammar (keyed-route form).
//!
//! ```text
//! District 1:
//! Balayan - BSU:
//! Balayan to Grand Terminal,bus,50.00
//! Grand Terminal to BSU,jeep,56.00
//! ```
//!
//! The parser is lenient: lines it cannot use are skipped, never reported.
//! Only a source without a single usable district header is an error.

use std::collections::BTreeMap;

use tracing::trace;

use super::catalogue::{DistrictCatalogue, KeyedRoutes, RouteGuide};
use super::error::GuideError;
use crate::domain::{District, Fare, Location, Segment, split_description};

const DISTRICT_KEYWORD: &str = "district";
const ROUTE_SEPARATOR: &str = " - ";

/// What a single non-blank line means.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    /// `District <n>:` with `None` when the number is malformed
    District(Option<District>),
    /// `<start> - <end>:` with `None` when the header is malformed
    Route(Option<(Location, Location)>),
    /// `<description>,<vehicle>,<fare>[,...]`
    Segment(&'a str),
    Other,
}

fn classify(line: &str) -> Line<'_> {
    let is_district = line
        .get(..DISTRICT_KEYWORD.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(DISTRICT_KEYWORD));
    if is_district {
        let number = line[DISTRICT_KEYWORD.len()..].replace(':', "");
        return Line::District(District::parse(&number).ok());
    }

    if line.contains(ROUTE_SEPARATOR) && line.ends_with(':') {
        return Line::Route(parse_route_header(line));
    }

    if line.contains(',') {
        return Line::Segment(line);
    }

    Line::Other
}

fn parse_route_header(line: &str) -> Option<(Location, Location)> {
    let header = line.replace(':', "");
    let parts: Vec<&str> = header.trim().split(ROUTE_SEPARATOR).collect();
    if parts.len() != 2 {
        return None;
    }
    let start = Location::new(parts[0]).ok()?;
    let destination = Location::new(parts[1]).ok()?;
    Some((start, destination))
}

/// Parse a `<description>,<vehicle>,<fare>` line. Fields past the third are
/// ignored.
fn parse_segment(line: &str) -> Option<Segment> {
    let mut fields = line.split(',');
    let description = fields.next()?.trim();
    let vehicle = fields.next()?.trim();
    let fare = Fare::parse(fields.next()?).ok()?;

    let (from, to) = split_description(description)?;
    let from = Location::new(from).ok()?;
    let to = Location::new(to).ok()?;

    Segment::new(from, to, vehicle, description, fare).ok()
}

/// Parse the keyed-route text grammar into a guide.
///
/// Every district that appears has a [`DistrictCatalogue::Keyed`] catalogue,
/// possibly with no routes.
pub fn parse_text(source: &str) -> Result<RouteGuide, GuideError> {
    let mut districts: BTreeMap<District, KeyedRoutes> = BTreeMap::new();
    let mut current_district: Option<District> = None;
    let mut current_route: Option<usize> = None;

    for (idx, raw) in source.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        match classify(line) {
            Line::District(Some(district)) => {
                districts.entry(district).or_default();
                current_district = Some(district);
                current_route = None;
            }
            Line::District(None) => {
                trace!(line = line_no, "skipping malformed district header");
            }
            Line::Route(header) => {
                let Some(district) = current_district else {
                    trace!(line = line_no, "skipping route header outside a district");
                    continue;
                };
                let Some((start, destination)) = header else {
                    trace!(line = line_no, "skipping malformed route header");
                    continue;
                };
                let routes = districts.entry(district).or_default();
                current_route = Some(routes.open_route(start, destination));
            }
            Line::Segment(text) => {
                let (Some(district), Some(route)) = (current_district, current_route) else {
                    trace!(line = line_no, "skipping segment outside a route");
                    continue;
                };
                match parse_segment(text) {
                    Some(segment) => districts.entry(district).or_default().push_segment(route, segment),
                    None => trace!(line = line_no, "skipping malformed segment"),
                }
            }
            Line::Other => {
                trace!(line = line_no, "skipping unrecognized line");
            }
        }
    }

    if districts.is_empty() {
        return Err(GuideError::format("no district headers found"));
    }

    let mut guide = RouteGuide::new();
    for (district, routes) in districts {
        guide.insert(district, DistrictCatalogue::Keyed(routes));
    }
    Ok(guide)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(s: &str) -> Location {
        Location::new(s).unwrap()
    }

    fn district(n: u32) -> District {
        District::new(n).unwrap()
    }

    fn keyed(guide: &RouteGuide, n: u32) -> &KeyedRoutes {
        match guide.get(district(n)) {
            Some(DistrictCatalogue::Keyed(routes)) => routes,
            other => panic!("expected keyed catalogue, got {other:?}"),
        }
    }

    const SAMPLE: &str = "\
district 1:
Balayan - BSU:
Balayan to Grand Terminal,bus,50.00
Grand Terminal to BSU,jeep,56.00

Lemery - BSU:
Lemery to BSU,bus,90.00

DISTRICT 2
Lipa - BSU:
Lipa to BSU,bus,40
";

    #[test]
    fn parses_districts_routes_and_segments() {
        let guide = parse_text(SAMPLE).unwrap();
        assert_eq!(guide.len(), 2);

        let d1 = keyed(&guide, 1);
        assert_eq!(d1.len(), 2);

        let route = d1.get(&loc("BALAYAN"), &loc("BSU")).unwrap();
        assert_eq!(route.segments().len(), 2);
        assert_eq!(route.segments()[0].description(), "Balayan to Grand Terminal");
        assert_eq!(route.segments()[0].vehicle(), "bus");
        assert_eq!(route.segments()[0].from(), &loc("BALAYAN"));
        assert_eq!(route.segments()[0].to(), &loc("GRAND TERMINAL"));
        assert_eq!(route.segments()[1].fare(), Fare::parse("56").unwrap());

        let d2 = keyed(&guide, 2);
        assert!(d2.get(&loc("lipa"), &loc("bsu")).is_some());
    }

    #[test]
    fn malformed_district_number_is_skipped() {
        let source = "\
District 1:
A - B:
A to B,bus,10
District one:
C - D:
C to D,bus,5
";
        let guide = parse_text(source).unwrap();
        // The bad header does not open a district, so C - D lands in district 1
        assert_eq!(guide.len(), 1);
        let d1 = keyed(&guide, 1);
        assert!(d1.get(&loc("C"), &loc("D")).is_some());
    }

    #[test]
    fn route_header_before_any_district_is_ignored() {
        let source = "\
A - B:
A to B,bus,10
District 3:
";
        let guide = parse_text(source).unwrap();
        assert!(keyed(&guide, 3).is_empty());
    }

    #[test]
    fn malformed_segments_are_dropped() {
        let source = "\
District 1:
A - C:
A to B,bus,20
no separator here,bus,5
B to C to D,bus,5
B to C,bus,free
B to B,bus,3
B to C,bus,-4
B to C,jeep
B to C,jeep,15,extra
";
        let guide = parse_text(source).unwrap();
        let route = keyed(&guide, 1).get(&loc("A"), &loc("C")).unwrap();
        let fares: Vec<String> = route.segments().iter().map(|s| s.fare().to_string()).collect();
        assert_eq!(fares, vec!["20.00", "15.00"]);
    }

    #[test]
    fn malformed_route_header_keeps_current_route() {
        let source = "\
District 1:
A - B:
A to B,bus,10
X - Y - Z:
B to C,bus,5
";
        let guide = parse_text(source).unwrap();
        let d1 = keyed(&guide, 1);
        assert_eq!(d1.len(), 1);
        assert_eq!(d1.get(&loc("A"), &loc("B")).unwrap().segments().len(), 2);
    }

    #[test]
    fn new_district_closes_current_route() {
        let source = "\
District 1:
A - B:
A to B,bus,10
District 2:
B to C,bus,5
";
        let guide = parse_text(source).unwrap();
        assert_eq!(keyed(&guide, 1).get(&loc("A"), &loc("B")).unwrap().segments().len(), 1);
        assert!(keyed(&guide, 2).is_empty());
    }

    #[test]
    fn repeated_district_header_extends_district() {
        let source = "\
District 1:
A - B:
A to B,bus,10
District 2:
C - D:
C to D,bus,5
District 1:
E - F:
E to F,bus,7
";
        let guide = parse_text(source).unwrap();
        assert_eq!(keyed(&guide, 1).len(), 2);
        assert_eq!(keyed(&guide, 2).len(), 1);
    }

    #[test]
    fn unrecognized_lines_are_ignored() {
        let source = "\
Fare guide, revised
District 1:
Notes about the route
A - B:
A to B,bus,10
";
        // The first line contains a comma but no route is open yet
        let guide = parse_text(source).unwrap();
        assert_eq!(keyed(&guide, 1).len(), 1);
    }

    #[test]
    fn no_district_is_a_format_error() {
        let err = parse_text("A - B:\nA to B,bus,10\n").unwrap_err();
        assert!(matches!(err, GuideError::Format { line: None, .. }));

        assert!(parse_text("").is_err());
        assert!(parse_text("District zero:\n").is_err());
    }

    #[test]
    fn classify_lines() {
        assert_eq!(classify("District 4:"), Line::District(Some(district(4))));
        assert_eq!(classify("district4"), Line::District(Some(district(4))));
        assert_eq!(classify("DISTRICT x:"), Line::District(None));
        assert_eq!(
            classify("Balayan - BSU:"),
            Line::Route(Some((loc("BALAYAN"), loc("BSU"))))
        );
        assert_eq!(classify("Balayan - BSU"), Line::Other);
        assert_eq!(classify("A to B,bus,1"), Line::Segment("A to B,bus,1"));
        assert_eq!(classify("just words"), Line::Other);
    }
}
