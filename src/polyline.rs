//! Polyline representation for route geometries.
//!
//! This module provides a type for working with polylines as decoded
//! coordinate sequences, plus the thin adapter between shapes and the
//! compact wire format: `from_encoded` builds a shape from an encoded
//! string, `encode_path` produces one for transmission.

use serde::{Deserialize, Serialize};

use crate::codec::{self, CodecError, CodecOptions};
use crate::haversine;

/// A polyline representing a route geometry as decoded coordinates.
///
/// Stores latitude/longitude points directly for internal processing.
/// Encoding to/from the compact polyline format happens at API boundaries,
/// not within the locator core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    /// Creates a new Polyline from decoded coordinate points.
    ///
    /// Each point is a (latitude, longitude) tuple.
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Decodes an encoded polyline string at the default 5-digit precision.
    pub fn from_encoded(encoded: &str) -> Result<Self, CodecError> {
        Self::from_encoded_with(encoded, CodecOptions::default())
    }

    /// Decodes an encoded polyline string with explicit codec options.
    pub fn from_encoded_with(
        encoded: &str,
        options: CodecOptions,
    ) -> Result<Self, CodecError> {
        Ok(Self {
            points: codec::decode_coords(encoded, options)?,
        })
    }

    /// Encodes the path at the default 5-digit precision.
    pub fn encode_path(&self) -> Result<String, CodecError> {
        codec::encode_coords(&self.points, CodecOptions::default())
    }

    /// Total path length in meters.
    pub fn length_m(&self) -> f64 {
        haversine::path_length_m(&self.points)
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }
}
