//! Fare quotes.

use super::{Fare, Segment};

/// The priced answer to a fare query.
///
/// Segments are in travel order from start to destination. The trike
/// surcharge is reported separately and is never one of the segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FareQuote {
    segments: Vec<Segment>,
    trike_fare: Fare,
    total_fare: Fare,
}

impl FareQuote {
    /// Price a segment chain, adding `trike_fare` to the segment total.
    pub fn new(segments: Vec<Segment>, trike_fare: Fare) -> Self {
        let total_fare = segments.iter().map(Segment::fare).sum::<Fare>() + trike_fare;
        Self {
            segments,
            trike_fare,
            total_fare,
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The trike surcharge; zero unless one was requested.
    pub fn trike_fare(&self) -> Fare {
        self.trike_fare
    }

    /// Segment fares plus the trike surcharge.
    pub fn total_fare(&self) -> Fare {
        self.total_fare
    }

    /// Sum of the segment fares alone.
    pub fn segment_total(&self) -> Fare {
        self.segments.iter().map(Segment::fare).sum()
    }
}
