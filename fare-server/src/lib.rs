//! Fare calculator server.
//!
//! Loads a district fare guide and answers: "what does it cost to get from
//! here to there, and which rides make up the trip?"

pub mod config;
pub mod domain;
pub mod guide;
pub mod resolver;
pub mod store;
pub mod web;
