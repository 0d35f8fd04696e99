//! Web layer for the rail network directory.
//!
//! Exposes the stores, the search engine, and the statistics engines as
//! a JSON REST API.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
