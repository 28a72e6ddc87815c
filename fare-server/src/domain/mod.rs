//! Domain types for the fare engine.
//!
//! Value types shared by the guide loader and the route resolver. Each type
//! checks its invariants when it is built; nothing hands out an unchecked
//! location, district or fare.

mod error;
mod fare;
mod location;
mod quote;
mod segment;

pub use error::DomainError;
pub use fare::{Fare, InvalidFare};
pub use location::{District, InvalidDistrict, InvalidLocation, Location};
pub use quote::FareQuote;
pub use segment::{DESCRIPTION_SEPARATOR, Segment, reverse_description, split_description};
