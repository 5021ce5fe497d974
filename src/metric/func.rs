use super::traits::DistanceMetric;
use crate::error::Result;
use crate::probe::Probe;

/// Adapts a closure into a [`DistanceMetric`].
///
/// ```rust
/// use spread::metric::{DistanceMetric, FnMetric};
/// use spread::Probe;
///
/// // Latitude-only spread.
/// let m = FnMetric::new("lat", |a: &Probe, b: &Probe| {
///     Ok((a.require_location()?.lat - b.require_location()?.lat).abs())
/// });
/// let a = Probe::new(1).with_location(10.0, 0.0);
/// let b = Probe::new(2).with_location(-5.0, 90.0);
/// assert_eq!(m.distance(&a, &b).unwrap(), 15.0);
/// ```
#[derive(Clone)]
pub struct FnMetric<F> {
    name: &'static str,
    f: F,
}

impl<F> FnMetric<F>
where
    F: Fn(&Probe, &Probe) -> Result<f64>,
{
    /// Wrap `f`, reported as `name` in logs.
    pub fn new(name: &'static str, f: F) -> Self {
        Self { name, f }
    }
}

impl<F> std::fmt::Debug for FnMetric<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnMetric").field("name", &self.name).finish()
    }
}

impl<F> DistanceMetric for FnMetric<F>
where
    F: Fn(&Probe, &Probe) -> Result<f64>,
{
    fn distance(&self, a: &Probe, b: &Probe) -> Result<f64> {
        (self.f)(a, b)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
