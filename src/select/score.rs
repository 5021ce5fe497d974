//! Aggregate diversity scores.
//!
//! The exhaustive-start selector needs one number per candidate selection to
//! pick a winner. Two choices:
//!
//! | Score | Formula | Rewards |
//! |-------|---------|---------|
//! | [`MinPairwise`](AggregateScore::MinPairwise) | min_{i<j} d(sᵢ, sⱼ) | no close pair anywhere |
//! | [`SumNearestNeighbor`](AggregateScore::SumNearestNeighbor) | Σᵢ min_{j≠i} d(sᵢ, sⱼ) | overall spacing |
//!
//! `MinPairwise` is the max-min objective the greedy loop approximates, so it
//! is the default. It is coarse: many selections share the same closest
//! pair, and ties fall back to the earliest starting probe.
//! `SumNearestNeighbor` separates those cases at the cost of tolerating one
//! tight pair when the rest of the set is well spread.

use super::result::DiversityResult;
use crate::error::{Error, Result};
use crate::metric::{checked, DistanceMetric};
use crate::probe::Probe;

/// Score used to rank whole selections. Higher is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AggregateScore {
    /// Smallest distance between any two selected probes.
    #[default]
    MinPairwise,
    /// Sum of each selected probe's distance to its nearest selected neighbor.
    SumNearestNeighbor,
}

impl AggregateScore {
    /// Score a selection given as positions, with `dist` over positions.
    ///
    /// Selections of fewer than two probes score 0.
    pub fn evaluate<D>(&self, selected: &[usize], dist: D) -> f64
    where
        D: Fn(usize, usize) -> f64,
    {
        if selected.len() < 2 {
            return 0.0;
        }
        match self {
            AggregateScore::MinPairwise => {
                let mut min = f64::INFINITY;
                for (a, &i) in selected.iter().enumerate() {
                    for &j in &selected[a + 1..] {
                        min = min.min(dist(i, j));
                    }
                }
                min
            }
            AggregateScore::SumNearestNeighbor => selected
                .iter()
                .map(|&i| {
                    selected
                        .iter()
                        .filter(|&&j| j != i)
                        .map(|&j| dist(i, j))
                        .fold(f64::INFINITY, f64::min)
                })
                .sum(),
        }
    }

    /// Score a finished selection by re-evaluating `metric` on its members.
    ///
    /// `result` must come from `pool`; positions outside it are an
    /// [`Error::InvalidParameter`].
    pub fn of_result<M: DistanceMetric + ?Sized>(
        &self,
        pool: &[Probe],
        result: &DiversityResult,
        metric: &M,
    ) -> Result<f64> {
        let members = result.indices();
        if members.iter().any(|&i| i >= pool.len()) {
            return Err(Error::InvalidParameter {
                name: "result",
                message: "selection refers to positions outside the pool",
            });
        }
        let m = members.len();
        let mut local = vec![0.0; m * m];
        for a in 0..m {
            for b in (a + 1)..m {
                let d = checked(metric.distance(&pool[members[a]], &pool[members[b]])?)?;
                local[a * m + b] = d;
                local[b * m + a] = d;
            }
        }
        let positions: Vec<usize> = (0..m).collect();
        Ok(self.evaluate(&positions, |a, b| local[a * m + b]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(points: &[f64]) -> impl Fn(usize, usize) -> f64 + '_ {
        move |a, b| (points[a] - points[b]).abs()
    }

    #[test]
    fn test_min_pairwise() {
        let pts = [0.0, 10.0, 3.0, 20.0];
        let s = AggregateScore::MinPairwise.evaluate(&[0, 1, 2, 3], line(&pts));
        assert_eq!(s, 3.0);
    }

    #[test]
    fn test_sum_nearest_neighbor() {
        let pts = [0.0, 10.0, 3.0, 20.0];
        // 0→3, 10→7, 3→3, 20→10
        let s = AggregateScore::SumNearestNeighbor.evaluate(&[0, 1, 2, 3], line(&pts));
        assert_eq!(s, 23.0);
    }

    #[test]
    fn test_of_result_rejects_foreign_pool() {
        use crate::metric::GreatCircle;

        let big: Vec<Probe> = (0..4)
            .map(|i| Probe::new(i).with_location(i as f64, 0.0))
            .collect();
        let r = DiversityResult::new(&big, vec![0, 3], vec![f64::INFINITY, 1.0]);
        let m = GreatCircle::new();

        assert!(AggregateScore::MinPairwise.of_result(&big, &r, &m).is_ok());
        assert!(matches!(
            AggregateScore::MinPairwise.of_result(&big[..2], &r, &m),
            Err(Error::InvalidParameter { name: "result", .. })
        ));
    }

    #[test]
    fn test_small_selections_score_zero() {
        let pts = [1.0, 2.0];
        assert_eq!(AggregateScore::MinPairwise.evaluate(&[1], line(&pts)), 0.0);
        assert_eq!(
            AggregateScore::SumNearestNeighbor.evaluate(&[], line(&pts)),
            0.0
        );
    }

    #[test]
    fn test_scores_separate_what_min_cannot() {
        // Same closest pair, different overall spacing.
        let pts = [0.0, 1.0, 50.0, 100.0, 60.0];
        let spread = [0, 1, 2, 3];
        let uneven = [0, 1, 4, 3];
        let min = AggregateScore::MinPairwise;
        let sum = AggregateScore::SumNearestNeighbor;
        assert_eq!(min.evaluate(&spread, line(&pts)), min.evaluate(&uneven, line(&pts)));
        assert!(sum.evaluate(&spread, line(&pts)) > sum.evaluate(&uneven, line(&pts)));
    }
}
