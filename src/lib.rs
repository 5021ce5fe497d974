//! # spread
//!
//! Diverse vantage-point selection: pick k measurement probes out of n so the
//! chosen set covers as much geography (or as many networks) as possible.
//!
//! The core is greedy max-min selection over a pluggable
//! [`DistanceMetric`](metric::DistanceMetric), in O(n·k) metric evaluations,
//! with an exhaustive-start mode for small pools.
//!
//! ```rust
//! use spread::metric::GreatCircle;
//! use spread::{select_diverse, Probe};
//!
//! let pool = vec![
//!     Probe::new(1).with_location(52.37, 4.90),   // Amsterdam
//!     Probe::new(2).with_location(52.52, 13.40),  // Berlin
//!     Probe::new(3).with_location(-33.87, 151.21), // Sydney
//!     Probe::new(4).with_location(40.71, -74.01), // New York
//! ];
//!
//! let ids = select_diverse(&pool, 2, &GreatCircle::new(), None).unwrap();
//! assert_eq!(ids, vec![1, 3]);
//! ```
//!
//! Probe ingestion from platform JSON lives in [`atlas`] (feature `serde`,
//! on by default). Exhaustive restarts run on rayon with feature `parallel`.

#[cfg(feature = "serde")]
pub mod atlas;
/// Error types used across `spread`.
pub mod error;
pub mod metric;
pub mod probe;
pub mod select;


pub use error::{Error, Result};
pub use probe::{GeoPoint, Probe, ProbeId};
pub use select::{
    AggregateScore, DiversityResult, ExhaustiveSelector, GreedySelector, SelectionConfig,
    SelectionStrategy, Selector, StartingProbe,
};

use metric::DistanceMetric;

/// Greedy selection of `k` probes, optionally starting from a given probe.
///
/// Without a start the first probe of `pool` is used. Returns ids in
/// selection order.
pub fn select_diverse<M: DistanceMetric + ?Sized>(
    pool: &[Probe],
    k: usize,
    metric: &M,
    start: Option<ProbeId>,
) -> Result<Vec<ProbeId>> {
    let start = start.map_or(StartingProbe::First, StartingProbe::Id);
    GreedySelector::new(k)
        .with_start(start)
        .select(pool, metric)
        .map(DiversityResult::into_ids)
}

/// Exhaustive-start selection of `k` probes.
///
/// Runs greedy once per starting probe and keeps the selection with the
/// largest minimum pairwise distance. O(n²·k); meant for small pools.
pub fn select_diverse_best<M: DistanceMetric + ?Sized>(
    pool: &[Probe],
    k: usize,
    metric: &M,
) -> Result<Vec<ProbeId>> {
    ExhaustiveSelector::new(k)
        .select_best(pool, metric)
        .map(DiversityResult::into_ids)
}
