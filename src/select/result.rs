use std::collections::HashSet;

use crate::probe::{Probe, ProbeId};

/// Outcome of a selection run.
///
/// Ids are in selection order, which doubles as a diversity ranking: the
/// first `m` entries are the greedy answer for `k = m`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DiversityResult {
    ids: Vec<ProbeId>,
    indices: Vec<usize>,
    separations: Vec<f64>,
    start: usize,
    score: Option<f64>,
}

impl DiversityResult {
    pub(crate) fn new(pool: &[Probe], indices: Vec<usize>, separations: Vec<f64>) -> Self {
        let ids = indices.iter().map(|&i| pool[i].id()).collect();
        let start = indices.first().copied().unwrap_or(0);
        Self {
            ids,
            indices,
            separations,
            start,
            score: None,
        }
    }

    pub(crate) fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Selected probe ids, in selection order.
    pub fn ids(&self) -> &[ProbeId] {
        &self.ids
    }

    /// Positions of the selected probes in the input pool.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Nearest-selected distance of each probe at the moment it was picked.
    ///
    /// The starting probe has nothing to be compared against and reports
    /// `f64::INFINITY`.
    pub fn separations(&self) -> &[f64] {
        &self.separations
    }

    /// Pool position of the starting probe.
    pub fn start_index(&self) -> usize {
        self.start
    }

    /// Aggregate score, set by the exhaustive-start selector.
    pub fn score(&self) -> Option<f64> {
        self.score
    }

    /// Number of selected probes.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing was selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The `m` most diverse probes (clamped to the selection size).
    pub fn top(&self, m: usize) -> &[ProbeId] {
        &self.ids[..m.min(self.ids.len())]
    }

    /// Smallest separation over the picks after the start.
    ///
    /// `None` for selections of a single probe.
    pub fn min_separation(&self) -> Option<f64> {
        self.separations
            .iter()
            .skip(1)
            .copied()
            .min_by(f64::total_cmp)
    }

    /// Ids of this selection followed by the ids of `other` not already in it.
    ///
    /// Used to merge selections made under different metrics.
    pub fn union(&self, other: &DiversityResult) -> Vec<ProbeId> {
        let mut seen: HashSet<ProbeId> = HashSet::with_capacity(self.len() + other.len());
        self.ids
            .iter()
            .chain(other.ids.iter())
            .copied()
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Consume the result, keeping the ids.
    pub fn into_ids(self) -> Vec<ProbeId> {
        self.ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(n: u64) -> Vec<Probe> {
        (0..n).map(|i| Probe::new(100 + i)).collect()
    }

    #[test]
    fn test_ids_follow_indices() {
        let p = pool(4);
        let r = DiversityResult::new(&p, vec![2, 0, 3], vec![f64::INFINITY, 5.0, 2.0]);
        assert_eq!(r.ids(), &[102, 100, 103]);
        assert_eq!(r.start_index(), 2);
        assert_eq!(r.top(2), &[102, 100]);
        assert_eq!(r.top(10).len(), 3);
        assert_eq!(r.min_separation(), Some(2.0));
        assert_eq!(r.score(), None);
    }

    #[test]
    fn test_single_probe_has_no_separation() {
        let p = pool(2);
        let r = DiversityResult::new(&p, vec![1], vec![f64::INFINITY]);
        assert_eq!(r.min_separation(), None);
        assert_eq!(r.len(), 1);
    }

    #[test]
    fn test_union_keeps_order_and_dedups() {
        let p = pool(5);
        let a = DiversityResult::new(&p, vec![0, 3], vec![f64::INFINITY, 1.0]);
        let b = DiversityResult::new(&p, vec![3, 1, 0, 4], vec![f64::INFINITY, 1.0, 1.0, 0.0]);
        assert_eq!(a.union(&b), vec![100, 103, 101, 104]);
    }
}
