//! Diversity selection over a candidate pool.
//!
//! Given n probes and a [`DistanceMetric`](crate::metric::DistanceMetric),
//! choose k of them so that no two chosen probes are close together. The
//! objective is max-min dispersion:
//!
//! ```text
//! maximize  min_{i≠j ∈ S} d(sᵢ, sⱼ)   over |S| = k
//! ```
//!
//! Solving it exactly is NP-hard. Both selectors here use the greedy
//! farthest-point heuristic and differ only in how the first probe is chosen.
//!
//! | Selector | Start | Cost |
//! |----------|-------|------|
//! | [`GreedySelector`] | first, given, or seeded random | O(n·k) |
//! | [`ExhaustiveSelector`] | every probe, best [`AggregateScore`] | O(n²·k) |
//!
//! [`SelectionConfig`] wraps both behind one [`SelectionStrategy`].
//!
//! ## Usage
//!
//! ```rust
//! use spread::metric::GreatCircle;
//! use spread::select::{GreedySelector, Selector};
//! use spread::Probe;
//!
//! let pool = vec![
//!     Probe::new(1).with_location(0.0, 0.0),
//!     Probe::new(2).with_location(0.0, 10.0),
//!     Probe::new(3).with_location(10.0, 0.0),
//!     Probe::new(4).with_location(10.0, 10.0),
//! ];
//!
//! let result = GreedySelector::new(2)
//!     .with_start_probe(1)
//!     .select(&pool, &GreatCircle::new())
//!     .unwrap();
//! assert_eq!(result.ids(), &[1, 4]); // the opposite corner
//! ```

mod exhaustive;
mod greedy;
mod result;
mod score;
mod strategy;
mod tracker;
mod traits;

pub use exhaustive::ExhaustiveSelector;
pub use greedy::{GreedySelector, StartingProbe};
pub use result::DiversityResult;
pub use score::AggregateScore;
pub use strategy::{SelectionConfig, SelectionStrategy};
pub use tracker::NearestSelectedTracker;
pub use traits::Selector;
