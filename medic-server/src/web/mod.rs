//! Web layer for the facility radar.
//!
//! JSON endpoints for setting the reference coordinate, running scans and
//! reading the ranked results. Rendering is left to the client.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
