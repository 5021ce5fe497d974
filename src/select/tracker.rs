//! Nearest-selected distance bookkeeping.
//!
//! For each candidate that has not been picked yet, the tracker keeps
//! `nearest[c] = min_{s ∈ selected} d(c, s)`. Adding a selection only ever
//! lowers these values, so one pass over the remaining candidates per pick
//! keeps the invariant exact:
//!
//! ```text
//! nearest[c] ← min(nearest[c], d(c, s_new))
//! ```
//!
//! Over k picks that is O(n·k) distance evaluations in total.

use crate::error::Result;
use crate::metric::checked;

/// Tracks every unselected candidate's distance to the selected set.
#[derive(Debug, Clone)]
pub struct NearestSelectedTracker {
    /// Unselected pool positions, in input order.
    remaining: Vec<usize>,
    /// Nearest-selected distance per pool position.
    nearest: Vec<f64>,
}

impl NearestSelectedTracker {
    /// Start tracking `n` candidates, all at distance `+inf`.
    pub fn new(n: usize) -> Self {
        Self {
            remaining: (0..n).collect(),
            nearest: vec![f64::INFINITY; n],
        }
    }

    /// Remove `index` from the unselected set.
    ///
    /// Returns `false` if it was not there.
    pub fn take(&mut self, index: usize) -> bool {
        match self.remaining.iter().position(|&c| c == index) {
            Some(pos) => {
                let _ = self.remaining.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Fold a newly selected probe into every remaining candidate's distance.
    ///
    /// `dist(candidate, selected)` is called once per remaining candidate.
    /// Its errors propagate, and negative or NaN results are rejected.
    pub fn record_selection<F>(&mut self, selected: usize, mut dist: F) -> Result<()>
    where
        F: FnMut(usize, usize) -> Result<f64>,
    {
        for &c in &self.remaining {
            let d = checked(dist(c, selected)?)?;
            if d < self.nearest[c] {
                self.nearest[c] = d;
            }
        }
        Ok(())
    }

    /// Eligible candidate farthest from the selected set, with its distance.
    ///
    /// Ties go to the candidate earliest in input order. `None` when no
    /// remaining candidate passes `eligible`.
    pub fn arg_max<P>(&self, mut eligible: P) -> Option<(usize, f64)>
    where
        P: FnMut(usize) -> bool,
    {
        let mut best: Option<(usize, f64)> = None;
        for &c in &self.remaining {
            if !eligible(c) {
                continue;
            }
            let d = self.nearest[c];
            match best {
                Some((_, best_d)) if d <= best_d => {}
                _ => best = Some((c, d)),
            }
        }
        best
    }

    /// Tracked distance of an unselected candidate.
    pub fn nearest(&self, index: usize) -> Option<f64> {
        if self.remaining.contains(&index) {
            self.nearest.get(index).copied()
        } else {
            None
        }
    }

    /// Unselected pool positions, in input order.
    pub fn remaining(&self) -> &[usize] {
        &self.remaining
    }

    /// Number of unselected candidates.
    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    /// Whether every candidate has been selected.
    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }
}
