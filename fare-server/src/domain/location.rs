//! Location and district types.

use std::fmt;
use std::str::FromStr;

/// Error returned when a location name is unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid location: {reason}")]
pub struct InvalidLocation {
    reason: &'static str,
}

/// A normalized place name.
///
/// Locations are trimmed and upper-cased on construction, so two
/// locations compare equal regardless of how they were authored. No other
/// normalization is applied: there is no synonym or fuzzy matching.
///
/// # Examples
///
/// ```
/// use fare_server::domain::Location;
///
/// let a = Location::new("  Balayan ").unwrap();
/// let b = Location::new("BALAYAN").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "BALAYAN");
///
/// // Blank names are rejected
/// assert!(Location::new("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location(String);

impl Location {
    /// Normalize and validate a location name.
    pub fn new(raw: &str) -> Result<Self, InvalidLocation> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InvalidLocation {
                reason: "must not be blank",
            });
        }
        Ok(Location(trimmed.to_uppercase()))
    }

    /// Wrap a name that is already trimmed, upper-cased and non-blank.
    pub(crate) fn from_normalized(name: &str) -> Self {
        debug_assert!(!name.is_empty() && name.trim() == name && name.to_uppercase() == name);
        Location(name.to_string())
    }

    /// Returns the normalized name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Location({})", self.0)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Location {
    type Err = InvalidLocation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Location::new(s)
    }
}

/// Error returned when parsing an invalid district number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid district: {reason}")]
pub struct InvalidDistrict {
    reason: &'static str,
}

/// An administrative grouping of routes, numbered from 1.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct District(u32);

impl District {
    /// Create a district from its number. Zero is rejected.
    pub fn new(number: u32) -> Result<Self, InvalidDistrict> {
        if number == 0 {
            return Err(InvalidDistrict {
                reason: "must be a positive integer",
            });
        }
        Ok(District(number))
    }

    /// Parse a district number, ignoring surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidDistrict> {
        let number = s.trim().parse::<u32>().map_err(|_| InvalidDistrict {
            reason: "must be a positive integer",
        })?;
        District::new(number)
    }

    /// Returns the district number.
    pub fn number(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for District {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "District({})", self.0)
    }
}

impl fmt::Display for District {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        let loc = Location::new("  Grand Terminal\t").unwrap();
        assert_eq!(loc.as_str(), "GRAND TERMINAL");
    }

    #[test]
    fn inner_whitespace_is_kept() {
        let a = Location::new("Grand Terminal").unwrap();
        let b = Location::new("Grand  Terminal").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn reject_blank() {
        assert!(Location::new("").is_err());
        assert!(Location::new(" \t ").is_err());
    }

    #[test]
    fn location_display_and_debug() {
        let loc = Location::new("bsu").unwrap();
        assert_eq!(format!("{}", loc), "BSU");
        assert_eq!(format!("{:?}", loc), "Location(BSU)");
    }

    #[test]
    fn locations_sort_alphabetically() {
        let mut locs = vec![
            Location::new("lemery").unwrap(),
            Location::new("balayan").unwrap(),
            Location::new("bsu").unwrap(),
        ];
        locs.sort();
        let names: Vec<&str> = locs.iter().map(Location::as_str).collect();
        assert_eq!(names, vec!["BALAYAN", "BSU", "LEMERY"]);
    }

    #[test]
    fn parse_district() {
        assert_eq!(District::parse("1").unwrap().number(), 1);
        assert_eq!(District::parse(" 12 ").unwrap().number(), 12);
    }

    #[test]
    fn reject_bad_district() {
        assert!(District::parse("0").is_err());
        assert!(District::parse("-1").is_err());
        assert!(District::parse("one").is_err());
        assert!(District::parse("").is_err());
        assert!(District::new(0).is_err());
    }

    #[test]
    fn district_display() {
        let d = District::new(4).unwrap();
        assert_eq!(d.to_string(), "4");
        assert_eq!(format!("{:?}", d), "District(4)");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Case and surrounding whitespace never affect equality
        #[test]
        fn case_and_padding_insensitive(
            name in "[A-Za-z][A-Za-z ]{0,15}[A-Za-z]",
            left in "[ \t]{0,3}",
            right in "[ \t]{0,3}",
        ) {
            let plain = Location::new(&name).unwrap();
            let padded = Location::new(&format!("{left}{}{right}", name.to_lowercase())).unwrap();
            prop_assert_eq!(plain, padded);
        }

        /// Normalization is idempotent
        #[test]
        fn normalize_idempotent(name in "[A-Za-z0-9 ]{1,20}".prop_filter("not blank", |s| !s.trim().is_empty())) {
            let once = Location::new(&name).unwrap();
            let twice = Location::new(once.as_str()).unwrap();
            prop_assert_eq!(once, twice);
        }

        /// Any positive number parses as a district
        #[test]
        fn positive_districts_parse(n in 1u32..10_000) {
            prop_assert_eq!(District::parse(&n.to_string()).unwrap().number(), n);
        }
    }
}
