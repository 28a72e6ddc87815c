//! Tabular fare guide (flat-segment form).
//!
//! A CSV table with one edge per row:
//!
//! ```text
//! District,Start Location,Destination,Vehicle,Description,Fare
//! 1,Balayan,Grand Terminal,bus,Balayan to Grand Terminal,50.00
//! ```
//!
//! Header names are matched ignoring case, spaces and underscores, so
//! `Start Location`, `StartLocation` and `start_location` all name the same
//! column. Unlike the text grammar this form is strict: any unusable row
//! fails the load.

use std::collections::{BTreeMap, HashMap};
use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};

use super::catalogue::{DistrictCatalogue, FlatSegments, RouteGuide};
use super::error::GuideError;
use crate::domain::{District, Fare, Location, Segment};

/// Required columns as (normalized key, display name).
const REQUIRED_COLUMNS: [(&str, &str); 6] = [
    ("district", "District"),
    ("startlocation", "Start Location"),
    ("destination", "Destination"),
    ("vehicle", "Vehicle"),
    ("description", "Description"),
    ("fare", "Fare"),
];

/// Column positions resolved from the header row.
struct Columns {
    district: usize,
    start: usize,
    destination: usize,
    vehicle: usize,
    description: usize,
    fare: usize,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self, GuideError> {
        let index: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (normalize_header(h), i))
            .collect();

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .filter(|(key, _)| !index.contains_key(*key))
            .map(|(_, name)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(GuideError::format(format!(
                "missing required columns: {}",
                missing.join(", ")
            )));
        }

        Ok(Self {
            district: index["district"],
            start: index["startlocation"],
            destination: index["destination"],
            vehicle: index["vehicle"],
            description: index["description"],
            fare: index["fare"],
        })
    }
}

fn normalize_header(header: &str) -> String {
    header
        .trim_start_matches('\u{feff}')
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

fn field<'r>(record: &'r StringRecord, idx: usize) -> &'r str {
    record.get(idx).unwrap_or("")
}

fn parse_row(record: &StringRecord, columns: &Columns, line: u64) -> Result<(District, Segment), GuideError> {
    let district = District::parse(field(record, columns.district))
        .map_err(|e| GuideError::format_at(line, e.to_string()))?;
    let from = Location::new(field(record, columns.start))
        .map_err(|e| GuideError::format_at(line, format!("start {e}")))?;
    let to = Location::new(field(record, columns.destination))
        .map_err(|e| GuideError::format_at(line, format!("destination {e}")))?;
    let fare = Fare::parse(field(record, columns.fare))
        .map_err(|e| GuideError::format_at(line, e.to_string()))?;

    let segment = Segment::new(
        from,
        to,
        field(record, columns.vehicle),
        field(record, columns.description),
        fare,
    )
    .map_err(|e| GuideError::format_at(line, e.to_string()))?;

    Ok((district, segment))
}

/// Parse a tabular guide into flat-segment catalogues.
pub fn parse_table<R: Read>(reader: R) -> Result<RouteGuide, GuideError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| GuideError::format(format!("unreadable header row: {e}")))?
        .clone();
    let columns = Columns::from_headers(&headers)?;

    let mut districts: BTreeMap<District, FlatSegments> = BTreeMap::new();
    for (idx, result) in reader.records().enumerate() {
        let fallback_line = idx as u64 + 2;
        let record = result.map_err(|e| {
            let line = e.position().map(|p| p.line()).unwrap_or(fallback_line);
            GuideError::format_at(line, e.to_string())
        })?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let line = record.position().map(|p| p.line()).unwrap_or(fallback_line);

        let (district, segment) = parse_row(&record, &columns, line)?;
        districts.entry(district).or_default().push(segment);
    }

    if districts.is_empty() {
        return Err(GuideError::format("no fare rows found"));
    }

    let mut guide = RouteGuide::new();
    for (district, segments) in districts {
        guide.insert(district, DistrictCatalogue::Flat(segments));
    }
    Ok(guide)
}
