//! Exhaustive-start selection.
//!
//! Greedy max-min depends on its first pick. For small pools, rerunning it
//! from every candidate and keeping the best-scoring selection removes that
//! dependency:
//!
//! ```text
//! best = argmax_{p ∈ pool} score(greedy(pool, k, start = p))
//! ```
//!
//! Cost is n greedy runs of O(n·k) each, O(n²·k) overall, plus n(n-1)/2
//! metric evaluations to fill a [`DistanceMatrix`] that every run shares.
//! Whether a pool is small enough is the caller's call.
//!
//! The runs are independent. With the `parallel` feature they execute on the
//! rayon pool; the winner is chosen after all runs finish, so the answer is
//! the same either way.

use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::greedy::{check_request, run, AsnCap};
use super::result::DiversityResult;
use super::score::AggregateScore;
use super::traits::Selector;
use crate::error::{Error, Result};
use crate::metric::{DistanceMatrix, DistanceMetric};
use crate::probe::Probe;

/// Best-of-all-starts greedy selector.
#[derive(Debug, Clone)]
pub struct ExhaustiveSelector {
    /// Number of probes to select.
    k: usize,
    /// How finished selections are compared.
    score: AggregateScore,
    /// Maximum selected probes per ASN.
    max_per_asn: Option<usize>,
}

/// One finished restart.
struct Restart {
    start: usize,
    score: f64,
    order: Vec<usize>,
    separations: Vec<f64>,
}

impl ExhaustiveSelector {
    /// Select `k` probes, scoring with [`AggregateScore::MinPairwise`].
    pub fn new(k: usize) -> Self {
        Self {
            k,
            score: AggregateScore::default(),
            max_per_asn: None,
        }
    }

    /// Set the aggregate score.
    pub fn with_score(mut self, score: AggregateScore) -> Self {
        self.score = score;
        self
    }

    /// Allow at most `cap` selected probes per ASN.
    pub fn with_max_per_asn(mut self, cap: usize) -> Self {
        self.max_per_asn = Some(cap);
        self
    }

    /// Run every restart and return the best selection, with its score.
    ///
    /// Equal scores keep the restart with the smallest starting position.
    pub fn select_best<M: DistanceMetric + ?Sized>(
        &self,
        pool: &[Probe],
        metric: &M,
    ) -> Result<DiversityResult> {
        let _ = check_request(pool, self.k)?;
        let cap = AsnCap::build(pool, self.max_per_asn, self.k)?;

        // Every restart of a single pick is just its start, all scoring 0.
        if self.k == 1 {
            return Ok(DiversityResult::new(pool, vec![0], vec![f64::INFINITY]).with_score(0.0));
        }

        let matrix = DistanceMatrix::compute(pool, metric)?;
        let n = pool.len();

        debug!(
            n,
            k = self.k,
            metric = metric.name(),
            score = ?self.score,
            "exhaustive-start selection"
        );

        let restart = |start: usize| -> Result<Restart> {
            let state = run(n, self.k, start, cap.as_ref(), |c, s| Ok(matrix.get(c, s)))?;
            let score = self.score.evaluate(state.order(), |i, j| matrix.get(i, j));
            let (order, separations) = state.into_parts();
            Ok(Restart {
                start,
                score,
                order,
                separations,
            })
        };

        #[cfg(feature = "parallel")]
        let restarts = (0..n)
            .into_par_iter()
            .map(restart)
            .collect::<Result<Vec<_>>>()?;

        #[cfg(not(feature = "parallel"))]
        let restarts = (0..n).map(restart).collect::<Result<Vec<_>>>()?;

        // Restarts are in start order; strict improvement keeps the earliest.
        let mut best: Option<Restart> = None;
        for r in restarts {
            match &best {
                Some(b) if r.score.total_cmp(&b.score).is_le() => {}
                _ => best = Some(r),
            }
        }

        // n >= 1 after check_request, so at least one restart ran.
        let best = best.ok_or(Error::EmptyInput)?;
        debug!(start = pool[best.start].id(), score = best.score, "best restart");

        Ok(DiversityResult::new(pool, best.order, best.separations).with_score(best.score))
    }
}

impl Selector for ExhaustiveSelector {
    fn select<M: DistanceMetric + ?Sized>(
        &self,
        pool: &[Probe],
        metric: &M,
    ) -> Result<DiversityResult> {
        self.select_best(pool, metric)
    }

    fn k(&self) -> usize {
        self.k
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::{AsnDistance, FnMetric, GreatCircle};
    use crate::select::GreedySelector;

    fn square() -> Vec<Probe> {
        vec![
            Probe::new(1).with_location(0.0, 0.0),
            Probe::new(2).with_location(0.0, 10.0),
            Probe::new(3).with_location(10.0, 0.0),
            Probe::new(4).with_location(10.0, 10.0),
        ]
    }

    fn is_diagonal(ids: &[u64]) -> bool {
        let mut pair = ids.to_vec();
        pair.sort_unstable();
        pair == [1, 4] || pair == [2, 3]
    }

    #[test]
    fn test_square_returns_diagonal() {
        let r = ExhaustiveSelector::new(2)
            .select_best(&square(), &GreatCircle::new())
            .unwrap();
        assert!(is_diagonal(r.ids()), "{:?}", r.ids());
        assert_eq!(r.ids(), &[1, 4]);
        assert!((r.score().unwrap() - 1568.52).abs() < 0.01);
    }

    #[test]
    fn test_square_any_input_order() {
        let base = square();
        let orders = [[0, 1, 2, 3], [3, 2, 1, 0], [1, 3, 0, 2], [2, 0, 3, 1]];
        for order in orders {
            let pool: Vec<Probe> = order.iter().map(|&i| base[i].clone()).collect();
            let r = ExhaustiveSelector::new(2)
                .select_best(&pool, &GreatCircle::new())
                .unwrap();
            assert!(is_diagonal(r.ids()), "{order:?} -> {:?}", r.ids());
            assert!((r.score().unwrap() - 1568.52).abs() < 0.01);
        }
    }

    #[test]
    fn test_at_least_as_good_as_every_start() {
        // A tight cluster and three outliers; some starts waste a pick.
        let pool = vec![
            Probe::new(1).with_location(0.0, 0.0),
            Probe::new(2).with_location(0.5, 0.5),
            Probe::new(3).with_location(-0.5, 0.5),
            Probe::new(4).with_location(60.0, 100.0),
            Probe::new(5).with_location(-60.0, -100.0),
            Probe::new(6).with_location(60.0, -100.0),
        ];
        let m = GreatCircle::new();
        let best = ExhaustiveSelector::new(3).select_best(&pool, &m).unwrap();
        let best_score = best.score().unwrap();

        for p in &pool {
            let greedy = GreedySelector::new(3)
                .with_start_probe(p.id())
                .select(&pool, &m)
                .unwrap();
            let score = AggregateScore::MinPairwise
                .of_result(&pool, &greedy, &m)
                .unwrap();
            assert!(best_score >= score - 1e-9, "start {}: {score} > {best_score}", p.id());
        }
    }

    #[test]
    fn test_ties_keep_smallest_start() {
        let pool: Vec<Probe> = (0..5).map(|i| Probe::new(i + 1).with_asn(i as u32)).collect();
        let r = ExhaustiveSelector::new(3)
            .select_best(&pool, &AsnDistance::new())
            .unwrap();
        assert_eq!(r.start_index(), 0);
        assert_eq!(r.ids(), &[1, 2, 3]);
        assert_eq!(r.score(), Some(1.0));
    }

    #[test]
    fn test_sum_score_selectable() {
        let pool = square();
        let r = ExhaustiveSelector::new(3)
            .with_score(AggregateScore::SumNearestNeighbor)
            .select_best(&pool, &GreatCircle::new())
            .unwrap();
        assert_eq!(r.len(), 3);
        let rescored = AggregateScore::SumNearestNeighbor
            .of_result(&pool, &r, &GreatCircle::new())
            .unwrap();
        assert!((rescored - r.score().unwrap()).abs() < 1e-9);
    }

    #[test]
    fn test_metric_evaluated_once_per_pair() {
        use std::cell::Cell;

        let calls = Cell::new(0usize);
        let geo = GreatCircle::new();
        let counting = FnMetric::new("counting", |a: &Probe, b: &Probe| {
            calls.set(calls.get() + 1);
            geo.distance(a, b)
        });
        let pool: Vec<Probe> = (0..12)
            .map(|i| Probe::new(i).with_location(i as f64 * 7.0 - 40.0, i as f64 * 29.0 - 170.0))
            .collect();

        let _ = ExhaustiveSelector::new(4).select_best(&pool, &counting).unwrap();
        assert_eq!(calls.get(), 12 * 11 / 2);
    }

    #[test]
    fn test_single_pick_needs_no_distances() {
        // The second probe has no location; a lone pick never measures it.
        let pool = vec![Probe::new(1).with_location(0.0, 0.0), Probe::new(2)];
        let m = GreatCircle::new();

        let greedy = GreedySelector::new(1).select(&pool, &m).unwrap();
        let best = ExhaustiveSelector::new(1).select_best(&pool, &m).unwrap();
        assert_eq!(best.ids(), greedy.ids());
        assert_eq!(best.ids(), &[1]);
        assert_eq!(best.score(), Some(0.0));
        assert_eq!(best.separations(), &[f64::INFINITY]);
    }

    #[test]
    fn test_errors() {
        let m = GreatCircle::new();
        assert_eq!(
            ExhaustiveSelector::new(1).select_best(&[], &m).unwrap_err(),
            Error::EmptyInput
        );
        assert!(matches!(
            ExhaustiveSelector::new(9).select_best(&square(), &m),
            Err(Error::InvalidSelectionCount { .. })
        ));
        let mut pool = square();
        pool.push(Probe::new(9));
        assert!(matches!(
            ExhaustiveSelector::new(2).select_best(&pool, &m),
            Err(Error::MissingAttribute { id: 9, .. })
        ));
    }

    #[test]
    fn test_asn_cap() {
        let pool = vec![
            Probe::new(1).with_location(0.0, -170.0).with_asn(1),
            Probe::new(2).with_location(0.0, 170.0).with_asn(1),
            Probe::new(3).with_location(0.0, 0.0).with_asn(1),
            Probe::new(4).with_location(1.0, 1.0).with_asn(2),
        ];
        let r = ExhaustiveSelector::new(2)
            .with_max_per_asn(1)
            .select_best(&pool, &GreatCircle::new())
            .unwrap();
        let asns: Vec<_> = r.indices().iter().map(|&i| pool[i].asn()).collect();
        assert!(asns.contains(&Some(2)), "{:?}", r.ids());
    }
}
