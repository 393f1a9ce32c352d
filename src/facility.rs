//! Facility and traffic-signal datasets from the map-data feed.
//!
//! The feed delivers GeoJSON feature collections of Point features:
//! hospitals/clinics carry `name` and `comm_code` properties, traffic
//! signals are bare points. GeoJSON stores coordinates as [lng, lat]; the
//! locator works in (lat, lng), so ingestion flips them.

use serde::Deserialize;
use tracing::debug;

use crate::haversine;
use crate::traits::{Facility, SignalSource};

#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    pub geometry: PointGeometry,
    #[serde(default)]
    pub properties: FeatureProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PointGeometry {
    /// GeoJSON order: [lng, lat].
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureProperties {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub comm_code: String,
}

impl Feature {
    /// Location as (lat, lng), if the geometry has both coordinates.
    fn location(&self) -> Option<(f64, f64)> {
        match self.geometry.coordinates.as_slice() {
            [lng, lat, ..] => Some((*lat, *lng)),
            _ => None,
        }
    }
}

/// A hospital or clinic from the feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FacilityRecord {
    pub code: String,
    pub name: String,
    pub location: (f64, f64),
}

impl Facility for FacilityRecord {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.code
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn location(&self) -> (f64, f64) {
        self.location
    }
}

/// All facilities known to the locator, keyed by community code.
#[derive(Debug, Clone, Default)]
pub struct FacilityDirectory {
    facilities: Vec<FacilityRecord>,
}

impl FacilityDirectory {
    pub fn new(facilities: Vec<FacilityRecord>) -> Self {
        Self { facilities }
    }

    /// Parses a GeoJSON feature collection of facility points.
    ///
    /// Features without a usable point geometry are skipped.
    pub fn from_geojson(raw: &str) -> Result<Self, serde_json::Error> {
        let collection: FeatureCollection = serde_json::from_str(raw)?;
        let mut facilities = Vec::with_capacity(collection.features.len());
        for feature in collection.features {
            match feature.location() {
                Some(location) => facilities.push(FacilityRecord {
                    code: feature.properties.comm_code,
                    name: feature.properties.name,
                    location,
                }),
                None => debug!("skipping facility feature without point geometry"),
            }
        }
        Ok(Self { facilities })
    }

    pub fn facilities(&self) -> &[FacilityRecord] {
        &self.facilities
    }

    /// Looks a facility up by its community code.
    pub fn find(&self, code: &str) -> Option<&FacilityRecord> {
        self.facilities.iter().find(|facility| facility.code == code)
    }

    /// The facility closest to the given (lat, lng) location.
    pub fn nearest(&self, from: (f64, f64)) -> Option<&FacilityRecord> {
        haversine::nearest(from, &self.facilities)
    }
}

/// Traffic-signal locations from the feed.
#[derive(Debug, Clone, Default)]
pub struct SignalLayer {
    signals: Vec<(f64, f64)>,
}

impl SignalLayer {
    pub fn new(signals: Vec<(f64, f64)>) -> Self {
        Self { signals }
    }

    /// Parses a GeoJSON feature collection of signal points.
    pub fn from_geojson(raw: &str) -> Result<Self, serde_json::Error> {
        let collection: FeatureCollection = serde_json::from_str(raw)?;
        let mut signals = Vec::with_capacity(collection.features.len());
        for feature in collection.features {
            match feature.location() {
                Some(location) => signals.push(location),
                None => debug!("skipping signal feature without point geometry"),
            }
        }
        Ok(Self { signals })
    }

    pub fn signals(&self) -> &[(f64, f64)] {
        &self.signals
    }
}

impl SignalSource for SignalLayer {
    fn signal_locations(&self) -> Vec<(f64, f64)> {
        self.signals.clone()
    }
}
