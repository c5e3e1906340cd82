//! Core data types and extrema extraction for uvid
//!
//! This crate provides the fundamental data structures for UV index
//! samples and the daily min/max extraction the sensor layer is built on.

pub mod extrema;
pub mod provider;
pub mod types;

pub use extrema::*;
pub use provider::*;
pub use types::*;
