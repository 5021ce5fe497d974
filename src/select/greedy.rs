//! Greedy max-min (farthest-point) selection.
//!
//! # The Algorithm
//!
//! 1. Pick a starting probe.
//! 2. Repeat until k are picked: take the candidate whose distance to its
//!    nearest already-picked probe is largest.
//!
//! This is the deterministic sibling of k-means++ seeding: instead of
//! sampling proportionally to D(x)², it always takes argmax D(x). For
//! metric distances it is a 2-approximation of the max-min dispersion
//! optimum (Gonzalez 1985), but the result depends on the starting probe.
//! [`ExhaustiveSelector`](super::ExhaustiveSelector) removes that
//! dependency for small pools.
//!
//! # Complexity
//!
//! O(n·k) metric evaluations: one pass over the remaining candidates per
//! pick, through [`NearestSelectedTracker`]. No spatial index is used; pools
//! of a few thousand probes and k of a few hundred keep each pass cheap.
//!
//! # ASN Cap
//!
//! With [`GreedySelector::with_max_per_asn`], a candidate stops being
//! eligible once its ASN already has `cap` selected probes. The number of
//! selectable probes, Σ_asn min(count, cap), does not depend on pick order,
//! so infeasible requests fail before any distance is computed.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use super::result::DiversityResult;
use super::tracker::NearestSelectedTracker;
use super::traits::Selector;
use crate::error::{Error, Result};
use crate::metric::DistanceMetric;
use crate::probe::{index_pool, Probe, ProbeId};

/// How the first probe of a greedy run is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StartingProbe {
    /// First probe in input order.
    #[default]
    First,
    /// The probe with this id. It must be in the pool.
    Id(ProbeId),
    /// A uniformly random probe, reproducible from the seed.
    Seeded(u64),
}

impl StartingProbe {
    /// Pool position of the starting probe.
    pub(crate) fn resolve(&self, pool_len: usize, index: &HashMap<ProbeId, usize>) -> Result<usize> {
        match *self {
            StartingProbe::First => Ok(0),
            StartingProbe::Id(id) => index.get(&id).copied().ok_or(Error::UnknownProbe { id }),
            StartingProbe::Seeded(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                Ok(rng.random_range(0..pool_len))
            }
        }
    }
}

/// Greedy max-min diversity selector.
#[derive(Debug, Clone)]
pub struct GreedySelector {
    /// Number of probes to select.
    k: usize,
    /// First-probe choice.
    start: StartingProbe,
    /// Maximum selected probes per ASN.
    max_per_asn: Option<usize>,
}

impl GreedySelector {
    /// Select `k` probes starting from the first probe in the pool.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            start: StartingProbe::First,
            max_per_asn: None,
        }
    }

    /// Set how the first probe is chosen.
    pub fn with_start(mut self, start: StartingProbe) -> Self {
        self.start = start;
        self
    }

    /// Start from the probe with this id.
    pub fn with_start_probe(self, id: ProbeId) -> Self {
        self.with_start(StartingProbe::Id(id))
    }

    /// Allow at most `cap` selected probes per ASN.
    pub fn with_max_per_asn(mut self, cap: usize) -> Self {
        self.max_per_asn = Some(cap);
        self
    }
}

impl Selector for GreedySelector {
    fn select<M: DistanceMetric + ?Sized>(
        &self,
        pool: &[Probe],
        metric: &M,
    ) -> Result<DiversityResult> {
        let index = check_request(pool, self.k)?;
        let start = self.start.resolve(pool.len(), &index)?;
        let cap = AsnCap::build(pool, self.max_per_asn, self.k)?;

        debug!(
            n = pool.len(),
            k = self.k,
            start = pool[start].id(),
            metric = metric.name(),
            "greedy selection"
        );

        let state = run(pool.len(), self.k, start, cap.as_ref(), |c, s| {
            metric.distance(&pool[c], &pool[s])
        })?;
        Ok(state.into_result(pool))
    }

    fn k(&self) -> usize {
        self.k
    }
}

/// Validate pool and k, returning the id → position map.
pub(crate) fn check_request(pool: &[Probe], k: usize) -> Result<HashMap<ProbeId, usize>> {
    let index = index_pool(pool)?;
    if k == 0 || k > pool.len() {
        return Err(Error::InvalidSelectionCount {
            requested: k,
            n_items: pool.len(),
        });
    }
    Ok(index)
}

/// Per-ASN eligibility limit for one run.
#[derive(Debug, Clone)]
pub(crate) struct AsnCap {
    asns: Vec<u32>,
    cap: usize,
}

impl AsnCap {
    /// Build the cap for `pool`, or `None` when uncapped.
    ///
    /// Fails if the cap is zero, a probe has no ASN, or fewer than `k`
    /// probes could ever be selected.
    pub(crate) fn build(pool: &[Probe], cap: Option<usize>, k: usize) -> Result<Option<Self>> {
        let Some(cap) = cap else {
            return Ok(None);
        };
        if cap == 0 {
            return Err(Error::InvalidParameter {
                name: "max_per_asn",
                message: "must be at least 1",
            });
        }

        let asns = pool.iter().map(Probe::require_asn).collect::<Result<Vec<_>>>()?;

        let mut counts: HashMap<u32, usize> = HashMap::new();
        for &asn in &asns {
            *counts.entry(asn).or_insert(0) += 1;
        }
        let available: usize = counts.values().map(|&c| c.min(cap)).sum();
        if available < k {
            return Err(Error::Exhausted {
                requested: k,
                available,
            });
        }

        Ok(Some(Self { asns, cap }))
    }

    #[inline]
    fn allows(&self, candidate: usize, counts: &HashMap<u32, usize>) -> bool {
        counts.get(&self.asns[candidate]).copied().unwrap_or(0) < self.cap
    }
}

/// Working state of one greedy run.
#[derive(Debug)]
pub(crate) struct SelectionState {
    /// Selected pool positions, in pick order.
    order: Vec<usize>,
    /// Nearest-selected distance of each pick when it was made.
    separations: Vec<f64>,
    tracker: NearestSelectedTracker,
    /// Selected probes per ASN (only maintained under a cap).
    asn_counts: HashMap<u32, usize>,
}

impl SelectionState {
    fn new(n: usize, k: usize) -> Self {
        Self {
            order: Vec::with_capacity(k),
            separations: Vec::with_capacity(k),
            tracker: NearestSelectedTracker::new(n),
            asn_counts: HashMap::new(),
        }
    }

    fn push(&mut self, index: usize, separation: f64, cap: Option<&AsnCap>) {
        let taken = self.tracker.take(index);
        debug_assert!(taken, "pool position {index} picked twice");
        self.order.push(index);
        self.separations.push(separation);
        if let Some(cap) = cap {
            *self.asn_counts.entry(cap.asns[index]).or_insert(0) += 1;
        }
    }

    /// Selected pool positions, in pick order.
    pub(crate) fn order(&self) -> &[usize] {
        &self.order
    }

    /// Pick order and separations, dropping the tracker.
    pub(crate) fn into_parts(self) -> (Vec<usize>, Vec<f64>) {
        (self.order, self.separations)
    }

    pub(crate) fn into_result(self, pool: &[Probe]) -> DiversityResult {
        let (order, separations) = self.into_parts();
        DiversityResult::new(pool, order, separations)
    }
}

/// The greedy loop over pool positions.
///
/// `dist(candidate, selected)` supplies distances, so the same loop runs
/// against a live metric or a precomputed matrix.
pub(crate) fn run<D>(
    n: usize,
    k: usize,
    start: usize,
    cap: Option<&AsnCap>,
    mut dist: D,
) -> Result<SelectionState>
where
    D: FnMut(usize, usize) -> Result<f64>,
{
    let mut state = SelectionState::new(n, k);
    state.push(start, f64::INFINITY, cap);

    while state.order.len() < k {
        let last = state.order[state.order.len() - 1];
        state.tracker.record_selection(last, &mut dist)?;

        let counts = &state.asn_counts;
        let (next, separation) = state
            .tracker
            .arg_max(|c| cap.map_or(true, |cap| cap.allows(c, counts)))
            .ok_or(Error::Exhausted {
                requested: k,
                available: state.order.len(),
            })?;

        trace!(round = state.order.len(), next, separation, "picked");
        state.push(next, separation, cap);
    }

    Ok(state)
}
