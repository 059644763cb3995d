//! Reference coordinate sources.
//!
//! A reference coordinate comes either from a device GPS report or from a
//! free-text place search against Nominatim.

mod client;
mod error;

pub use client::{GeocodeClient, GeocodeConfig, GeocodedPlace, Place};
pub use error::LocateError;
