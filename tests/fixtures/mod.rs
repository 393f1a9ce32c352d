//! Test fixtures for clinic-locator.
//!
//! Provides realistic test data including:
//! - Real Calgary hospital/clinic locations (from OpenStreetMap)
//! - Downtown traffic-signal positions

pub mod calgary_locations;

pub use calgary_locations::*;
