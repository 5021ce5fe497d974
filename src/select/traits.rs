//! Selector trait.

use super::result::DiversityResult;
use crate::error::Result;
use crate::metric::DistanceMetric;
use crate::probe::Probe;

/// Trait for diversity selection strategies.
pub trait Selector {
    /// Select probes from `pool` under `metric`.
    ///
    /// Returns the selected ids in selection order.
    fn select<M: DistanceMetric + ?Sized>(
        &self,
        pool: &[Probe],
        metric: &M,
    ) -> Result<DiversityResult>;

    /// Number of probes this selector returns.
    fn k(&self) -> usize;
}
