//! Fare guide loading.
//!
//! A guide is authored either as the line-oriented text grammar, which
//! produces keyed routes, or as a CSV table, which produces flat segments.
//! Both normalize locations so lookups are independent of authoring case.

mod catalogue;
mod error;
mod source;
mod table;
mod text;

pub use catalogue::{DistrictCatalogue, FlatSegments, KeyedRoute, KeyedRoutes, RouteGuide};
pub use error::GuideError;
pub use source::{GuideFormat, GuideSource, InvalidGuideFormat, load};
pub use table::parse_table;
pub use text::parse_text;
