//! Web layer for the fare calculator.
//!
//! Provides HTTP endpoints for pricing journeys and inspecting the loaded
//! fare guide.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
