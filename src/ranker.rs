//! Ranking of alternative route geometries.
//!
//! Given the decoded paths returned for a from/to pair, picks the best one
//! either by total path length or by exposure to traffic signals along the
//! way. This is a plain scoring loop; actual routing happens in the
//! backend.

use rayon::prelude::*;
use tracing::debug;

use crate::haversine;

/// Criterion used to order alternatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankBy {
    /// Shortest total path length wins.
    Distance,
    /// Fewest traffic signals near the path wins; the first minimum seen
    /// wins ties.
    TrafficSignals,
}

#[derive(Debug, Clone)]
pub struct RankOptions {
    /// Signals within this distance of the path count against a route.
    pub signal_radius_m: f64,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            signal_radius_m: 50.0,
        }
    }
}

/// One scored alternative. `index` refers back to the input order.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedRoute {
    pub index: usize,
    pub distance_m: f64,
    pub signal_count: usize,
}

/// Scores every alternative and returns them best-first.
///
/// Both the length and the signal count are computed for each route, so the
/// caller can show either in a popup regardless of the ranking criterion.
pub fn rank_routes(
    paths: &[Vec<(f64, f64)>],
    signals: &[(f64, f64)],
    rank_by: RankBy,
    options: &RankOptions,
) -> Vec<RankedRoute> {
    let mut ranked: Vec<RankedRoute> = paths
        .par_iter()
        .enumerate()
        .map(|(index, path)| RankedRoute {
            index,
            distance_m: haversine::path_length_m(path),
            signal_count: count_signals_near(path, signals, options.signal_radius_m),
        })
        .collect();

    match rank_by {
        RankBy::Distance => ranked.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m)),
        // Stable sort keeps the first minimum first on ties.
        RankBy::TrafficSignals => ranked.sort_by(|a, b| a.signal_count.cmp(&b.signal_count)),
    }

    debug!(
        "ranked {} alternatives by {:?}, best index {:?}",
        ranked.len(),
        rank_by,
        ranked.first().map(|route| route.index)
    );

    ranked
}

/// The winning alternative, if any routes were given.
pub fn best_route(
    paths: &[Vec<(f64, f64)>],
    signals: &[(f64, f64)],
    rank_by: RankBy,
    options: &RankOptions,
) -> Option<RankedRoute> {
    rank_routes(paths, signals, rank_by, options).into_iter().next()
}

fn count_signals_near(path: &[(f64, f64)], signals: &[(f64, f64)], radius_m: f64) -> usize {
    signals
        .iter()
        .filter(|signal| {
            haversine::distance_to_path_m(**signal, path)
                .is_some_and(|distance| distance < radius_m)
        })
        .count()
}
