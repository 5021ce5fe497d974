//! Distance metric trait.

use crate::error::Result;
use crate::probe::Probe;

/// A pairwise dissimilarity over probes.
///
/// Implementations must be symmetric, return values `>= 0`, and return `0`
/// for a probe compared with itself. Probes a metric cannot handle (missing
/// coordinates, missing ASN) should produce an error rather than a default
/// distance; selectors propagate it unchanged.
pub trait DistanceMetric {
    /// Distance between two probes.
    fn distance(&self, a: &Probe, b: &Probe) -> Result<f64>;

    /// Short name used in logs.
    fn name(&self) -> &'static str {
        "custom"
    }
}

impl<M: DistanceMetric + ?Sized> DistanceMetric for &M {
    fn distance(&self, a: &Probe, b: &Probe) -> Result<f64> {
        (**self).distance(a, b)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<M: DistanceMetric + ?Sized> DistanceMetric for Box<M> {
    fn distance(&self, a: &Probe, b: &Probe) -> Result<f64> {
        (**self).distance(a, b)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
