//! Directions HTTP adapter for route alternatives.
//!
//! Talks to an OSRM-style routing backend. Each returned route carries its
//! geometry as encoded polyline strings, one per step; the adapter decodes
//! them through the codec and concatenates per route.

use serde::Deserialize;
use tracing::warn;

use crate::codec::{self, CodecError, CodecOptions};
use crate::traits::DirectionsProvider;

#[derive(Debug, Clone)]
pub struct DirectionsConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for DirectionsConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "driving".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DirectionsClient {
    config: DirectionsConfig,
    client: reqwest::blocking::Client,
}

impl DirectionsClient {
    pub fn new(config: DirectionsConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Fetches route alternatives between two (lat, lng) points.
    ///
    /// The backend expects lng,lat order on the wire.
    pub fn routes_between(
        &self,
        from: (f64, f64),
        to: (f64, f64),
    ) -> Result<Vec<Route>, reqwest::Error> {
        let url = format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}?alternatives=true&steps=true",
            self.config.base_url, self.config.profile, from.1, from.0, to.1, to.0
        );

        let response = self
            .client
            .get(url)
            .send()?
            .error_for_status()?
            .json::<DirectionsResponse>()?;

        Ok(response.routes)
    }
}

impl DirectionsProvider for DirectionsClient {
    fn alternatives_for(&self, from: (f64, f64), to: (f64, f64)) -> Vec<Vec<(f64, f64)>> {
        let routes = match self.routes_between(from, to) {
            Ok(routes) => routes,
            Err(err) => {
                warn!("directions request failed: {err}");
                return Vec::new();
            }
        };

        routes
            .iter()
            .filter_map(|route| match route.path() {
                Ok(path) => Some(path),
                Err(err) => {
                    warn!("skipping route with undecodable geometry: {err}");
                    None
                }
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    #[serde(default)]
    pub routes: Vec<Route>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Route {
    #[serde(default)]
    pub legs: Vec<RouteLeg>,
    pub distance: Option<f64>,
    pub duration: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteLeg {
    #[serde(default)]
    pub steps: Vec<RouteStep>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteStep {
    /// Encoded polyline geometry at the default 5-digit precision.
    pub geometry: String,
}

impl Route {
    /// Decodes and concatenates the step geometries of every leg, in order.
    pub fn path(&self) -> Result<Vec<(f64, f64)>, CodecError> {
        let mut path = Vec::new();
        for leg in &self.legs {
            for step in &leg.steps {
                path.extend(codec::decode_coords(&step.geometry, CodecOptions::default())?);
            }
        }
        Ok(path)
    }
}
