//! Great-circle distance helpers for facility lookup and path ranking.
//!
//! Straight-line estimates are enough for picking the nearest facility and
//! measuring decoded route geometry; road-accurate travel comes from the
//! directions backend.

use crate::traits::Facility;

/// Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance between two (lat, lng) points in meters.
pub fn haversine_m(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lng1) = from;
    let (lat2, lng2) = to;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_M * c
}

/// Total length of a path in meters, summed over its segments.
pub fn path_length_m(path: &[(f64, f64)]) -> f64 {
    path.windows(2)
        .map(|pair| haversine_m(pair[0], pair[1]))
        .sum()
}

/// Distance in meters from a point to the closest position on a path.
///
/// Returns `None` for an empty path. Segments are measured in a local
/// equirectangular frame around the query point, which is accurate at the
/// city scales the locator works with.
pub fn distance_to_path_m(point: (f64, f64), path: &[(f64, f64)]) -> Option<f64> {
    match path {
        [] => None,
        [only] => Some(haversine_m(point, *only)),
        _ => path
            .windows(2)
            .map(|pair| distance_to_segment_m(point, pair[0], pair[1]))
            .min_by(|a, b| a.total_cmp(b)),
    }
}

/// The facility closest to `from` by great-circle distance.
pub fn nearest<'a, F: Facility>(from: (f64, f64), facilities: &'a [F]) -> Option<&'a F> {
    facilities.iter().min_by(|a, b| {
        haversine_m(from, a.location()).total_cmp(&haversine_m(from, b.location()))
    })
}

fn distance_to_segment_m(point: (f64, f64), start: (f64, f64), end: (f64, f64)) -> f64 {
    // Work in meters east/north of the query point, which sits at the origin.
    let (ax, ay) = local_offset_m(point, start);
    let (bx, by) = local_offset_m(point, end);

    let dx = bx - ax;
    let dy = by - ay;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return ax.hypot(ay);
    }

    let t = (-(ax * dx + ay * dy) / len_sq).clamp(0.0, 1.0);
    (ax + t * dx).hypot(ay + t * dy)
}

fn local_offset_m(origin: (f64, f64), point: (f64, f64)) -> (f64, f64) {
    let x = (point.1 - origin.1).to_radians() * EARTH_RADIUS_M * origin.0.to_radians().cos();
    let y = (point.0 - origin.0).to_radians() * EARTH_RADIUS_M;
    (x, y)
}
