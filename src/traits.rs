//! Core domain traits for the facility locator.
//!
//! These are intentionally minimal and domain-agnostic. Concrete apps should
//! implement them for their own data models.

use std::hash::Hash;

/// Unique identifier for locator entities.
pub trait Id: Clone + Eq + Hash {}

impl<T> Id for T where T: Clone + Eq + Hash {}

/// A facility is a hospital or clinic that can be located and routed to.
pub trait Facility {
    type Id: Id;

    fn id(&self) -> &Self::Id;

    /// Display name.
    fn name(&self) -> &str;

    /// Location coordinates (lat, lng).
    fn location(&self) -> (f64, f64);
}

/// Provides alternative driving routes between two points.
///
/// Geometries are returned decoded, in (lat, lng) order, one path per
/// alternative. An unreachable backend yields an empty list.
pub trait DirectionsProvider {
    fn alternatives_for(&self, from: (f64, f64), to: (f64, f64)) -> Vec<Vec<(f64, f64)>>;
}

/// Provides known traffic-signal locations (lat, lng).
pub trait SignalSource {
    fn signal_locations(&self) -> Vec<(f64, f64)>;
}
