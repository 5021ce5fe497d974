//! One configuration for every selection strategy.
//!
//! Callers pick greedy or exhaustive-start through [`SelectionStrategy`]
//! instead of constructing selectors directly, so the choice can live in a
//! config file next to `k`.
//!
//! ```rust
//! use spread::metric::GreatCircle;
//! use spread::{Probe, SelectionConfig, SelectionStrategy, Selector};
//!
//! let pool = vec![
//!     Probe::new(1).with_location(0.0, 0.0),
//!     Probe::new(2).with_location(0.0, 10.0),
//!     Probe::new(3).with_location(10.0, 10.0),
//! ];
//! let config = SelectionConfig::new(2).with_strategy(SelectionStrategy::ExhaustiveStart);
//! let result = config.select(&pool, &GreatCircle::new()).unwrap();
//! assert_eq!(result.ids(), &[1, 3]);
//! ```

use super::exhaustive::ExhaustiveSelector;
use super::greedy::{GreedySelector, StartingProbe};
use super::result::DiversityResult;
use super::score::AggregateScore;
use super::traits::Selector;
use crate::error::{Error, Result};
use crate::metric::DistanceMetric;
use crate::probe::{Probe, ProbeId};

/// Which selection algorithm to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SelectionStrategy {
    /// A single greedy run from the given start.
    Greedy {
        /// First-probe choice.
        #[cfg_attr(feature = "serde", serde(default))]
        start: StartingProbe,
    },
    /// Greedy from every start, best aggregate score wins.
    ExhaustiveStart,
}

impl Default for SelectionStrategy {
    fn default() -> Self {
        SelectionStrategy::Greedy {
            start: StartingProbe::First,
        }
    }
}

/// Full selection configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionConfig {
    /// Number of probes to select.
    pub k: usize,
    /// Algorithm.
    #[cfg_attr(feature = "serde", serde(default))]
    pub strategy: SelectionStrategy,
    /// Score for comparing restarts (exhaustive-start only).
    #[cfg_attr(feature = "serde", serde(default))]
    pub score: AggregateScore,
    /// Maximum selected probes per ASN.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub max_per_asn: Option<usize>,
}

impl SelectionConfig {
    /// Greedy selection of `k` probes from the first probe.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            strategy: SelectionStrategy::default(),
            score: AggregateScore::default(),
            max_per_asn: None,
        }
    }

    /// Set the strategy.
    pub fn with_strategy(mut self, strategy: SelectionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Greedy selection starting from the probe with this id.
    pub fn with_start(self, id: ProbeId) -> Self {
        self.with_strategy(SelectionStrategy::Greedy {
            start: StartingProbe::Id(id),
        })
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

    /// Check parameters that do not depend on the pool.
    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(Error::InvalidParameter {
                name: "k",
                message: "must be at least 1",
            });
        }
        if self.max_per_asn == Some(0) {
            return Err(Error::InvalidParameter {
                name: "max_per_asn",
                message: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Parse a JSON configuration and validate it.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to JSON.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Selector for SelectionConfig {
    fn select<M: DistanceMetric + ?Sized>(
        &self,
        pool: &[Probe],
        metric: &M,
    ) -> Result<DiversityResult> {
        match self.strategy {
            SelectionStrategy::Greedy { start } => {
                let mut selector = GreedySelector::new(self.k).with_start(start);
                if let Some(cap) = self.max_per_asn {
                    selector = selector.with_max_per_asn(cap);
                }
                selector.select(pool, metric)
            }
            SelectionStrategy::ExhaustiveStart => {
                let mut selector = ExhaustiveSelector::new(self.k).with_score(self.score);
                if let Some(cap) = self.max_per_asn {
                    selector = selector.with_max_per_asn(cap);
                }
                selector.select_best(pool, metric)
            }
        }
    }

    fn k(&self) -> usize {
        self.k
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::{AsnDistance, GreatCircle};

    fn pool() -> Vec<Probe> {
        vec![
            Probe::new(10).with_location(0.0, 0.0).with_asn(1),
            Probe::new(20).with_location(0.0, 10.0).with_asn(1),
            Probe::new(30).with_location(10.0, 0.0).with_asn(2),
            Probe::new(40).with_location(10.0, 10.0).with_asn(2),
        ]
    }

    #[test]
    fn test_default_is_greedy_from_first() {
        let c = SelectionConfig::new(2);
        assert_eq!(
            c.strategy,
            SelectionStrategy::Greedy {
                start: StartingProbe::First
            }
        );
        let r = c.select(&pool(), &GreatCircle::new()).unwrap();
        assert_eq!(r.ids(), &[10, 40]);
        assert_eq!(r.score(), None);
    }

    #[test]
    fn test_start_routes_to_greedy() {
        let r = SelectionConfig::new(2)
            .with_start(20)
            .select(&pool(), &GreatCircle::new())
            .unwrap();
        assert_eq!(r.ids(), &[20, 30]);
    }

    #[test]
    fn test_exhaustive_sets_score() {
        let r = SelectionConfig::new(2)
            .with_strategy(SelectionStrategy::ExhaustiveStart)
            .select(&pool(), &AsnDistance::new())
            .unwrap();
        assert_eq!(r.ids(), &[10, 30]);
        assert_eq!(r.score(), Some(1.0));
    }

    #[test]
    fn test_cap_forwarded() {
        let r = SelectionConfig::new(3)
            .with_max_per_asn(1)
            .select(&pool(), &GreatCircle::new());
        assert!(matches!(r, Err(Error::Exhausted { available: 2, .. })));
    }

    #[test]
    fn test_validate() {
        assert!(SelectionConfig::new(3).validate().is_ok());
        assert!(SelectionConfig::new(0).validate().is_err());
        assert!(SelectionConfig::new(3).with_max_per_asn(0).validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_round_trip_and_defaults() {
        let c = SelectionConfig::from_json(r#"{ "k": 5 }"#).unwrap();
        assert_eq!(c, SelectionConfig::new(5));

        let c = SelectionConfig::from_json(
            r#"{ "k": 3, "strategy": "exhaustive_start", "score": "sum_nearest_neighbor", "max_per_asn": 2 }"#,
        )
        .unwrap();
        assert_eq!(c.strategy, SelectionStrategy::ExhaustiveStart);
        assert_eq!(c.score, AggregateScore::SumNearestNeighbor);
        assert_eq!(c.max_per_asn, Some(2));

        let c = SelectionConfig::from_json(
            r#"{ "k": 3, "strategy": { "greedy": { "start": { "id": 7 } } } }"#,
        )
        .unwrap();
        assert_eq!(c.strategy, SelectionStrategy::Greedy { start: StartingProbe::Id(7) });

        let back = SelectionConfig::from_json(&c.to_json().unwrap()).unwrap();
        assert_eq!(back, c);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_rejects_invalid() {
        assert!(matches!(
            SelectionConfig::from_json(r#"{ "k": 0 }"#),
            Err(Error::InvalidParameter { name: "k", .. })
        ));
        assert!(matches!(
            SelectionConfig::from_json("not json"),
            Err(Error::Parse(_))
        ));
    }
}
