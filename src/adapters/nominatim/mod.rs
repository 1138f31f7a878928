//! Nominatim geocoder adapter.
//!
//! Resolves free-text locations with the OpenStreetMap Nominatim search API.

pub mod client;
pub mod models;

pub use client::NominatimClient;
