//! Facility discovery pipeline.
//!
//! Turns a reference coordinate into a ranked, bounded list of nearby
//! medical facilities: cooldown-gated, cached by coarse location, and
//! tolerant of individual geodata endpoint outages.

mod config;
mod error;
mod pipeline;
mod rank;
mod select;
mod source;

pub use config::ScanConfig;
pub use error::ScanError;
pub use pipeline::{Discovery, ScanOutcome, ScanSource};
pub use rank::rank_facilities;
pub use select::{CategoryFilter, filter_by_category, filter_by_text, find_by_id, nearest_hospital};
pub use source::{ConfiguredSource, FacilitySource};
