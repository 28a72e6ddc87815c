//! Route resolution.
//!
//! Given a loaded [`RouteGuide`](crate::guide::RouteGuide), answers
//! "what does it cost to get from here to there in this district?".
//! Keyed districts use exact route lookup; flat districts use a bounded
//! depth-first search over their segments.

mod config;
mod resolve;
mod search;


pub use config::{DEFAULT_HUB, DEFAULT_MAX_DEPTH, ResolverConfig, default_trike_rate};
pub use resolve::{FareRequest, LocationRole, ResolveError, RouteResolver};
pub use search::{Direction, PathSearch, Step, find_path, orient};
