//! Overpass API client.
//!
//! Builds Overpass QL radius queries for medical amenities, sends them to
//! a list of interchangeable public interpreters with sequential fallback,
//! and normalizes the JSON elements into domain facilities.
//!
//! Key characteristics of Overpass:
//! - Mirrors are best-effort and frequently rate limit or time out
//! - Queries travel URL-encoded in the `data` query parameter
//! - Nodes carry `lat`/`lon`; ways and relations only carry a `center`

mod client;
mod convert;
mod error;
mod mock;
mod query;
mod types;

pub use client::{
    DEFAULT_ENDPOINTS, DEFAULT_USER_AGENT, FacilityBatch, OverpassClient, OverpassConfig,
};
pub use convert::{ConversionError, convert_element, convert_response};
pub use error::OverpassError;
pub use mock::MockOverpassSource;
pub use query::{DEFAULT_RADIUS_M, FacilityQuery, SERVER_TIMEOUT_SECS};
pub use types::{Center, Element, OverpassResponse};
