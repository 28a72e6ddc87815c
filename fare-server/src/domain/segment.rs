//! Priced travel segments.

use super::{DomainError, Fare, Location};

/// Separator between the two operands of a segment description.
pub const DESCRIPTION_SEPARATOR: &str = " to ";

/// One priced leg of travel between two locations.
///
/// A segment never starts and ends at the same location; this is enforced
/// by [`Segment::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    from: Location,
    to: Location,
    vehicle: String,
    description: String,
    fare: Fare,
}

impl Segment {
    /// Creates a segment, rejecting one whose endpoints coincide.
    pub fn new(
        from: Location,
        to: Location,
        vehicle: impl Into<String>,
        description: impl Into<String>,
        fare: Fare,
    ) -> Result<Self, DomainError> {
        if from == to {
            return Err(DomainError::SameEndpoints(from));
        }
        Ok(Self {
            from,
            to,
            vehicle: vehicle.into(),
            description: description.into(),
            fare,
        })
    }

    pub fn from(&self) -> &Location {
        &self.from
    }

    pub fn to(&self) -> &Location {
        &self.to
    }

    /// Vehicle type, e.g. "bus" or "jeep".
    pub fn vehicle(&self) -> &str {
        &self.vehicle
    }

    /// Human-readable leg label as authored.
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn fare(&self) -> Fare {
        self.fare
    }

    /// The same leg travelled backwards.
    ///
    /// Endpoints swap and the description operands swap; vehicle and fare
    /// are unchanged.
    pub fn reversed(&self) -> Segment {
        Segment {
            from: self.to.clone(),
            to: self.from.clone(),
            vehicle: self.vehicle.clone(),
            description: reverse_description(&self.description),
            fare: self.fare,
        }
    }
}

/// Split a description into its `from`/`to` operands.
///
/// Returns `None` unless the separator occurs exactly once.
pub fn split_description(description: &str) -> Option<(&str, &str)> {
    let mut parts = description.split(DESCRIPTION_SEPARATOR);
    let from = parts.next()?;
    let to = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some((from, to))
}

/// Swap the operands of an `"A to B"` description.
///
/// Descriptions that do not have exactly two operands are returned as-is.
pub fn reverse_description(description: &str) -> String {
    match split_description(description) {
        Some((from, to)) => format!("{to}{DESCRIPTION_SEPARATOR}{from}"),
        None => description.to_string(),
    }
}
