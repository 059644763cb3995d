//! Medical facility radar server.
//!
//! A web service that answers: "Which hospitals, clinics and pharmacies
//! are near this point, and which should I go to first?"

pub mod cache;
pub mod config;
pub mod discovery;
pub mod domain;
pub mod geocode;
pub mod overpass;
pub mod scoring;
pub mod web;
