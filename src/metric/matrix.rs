//! Precomputed pairwise distances.
//!
//! The exhaustive-start selector runs the greedy loop once per candidate,
//! which would evaluate the metric O(n²·k) times. Filling the matrix first
//! costs n(n-1)/2 evaluations and turns every later lookup into an index.

use ndarray::Array2;

use super::traits::DistanceMetric;
use crate::error::{Error, Result};
use crate::probe::Probe;

/// Symmetric matrix of distances between pool members.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Array2<f64>,
}

impl DistanceMatrix {
    /// Evaluate `metric` on every unordered pair of `pool`.
    ///
    /// The first metric error aborts the computation. Negative or NaN
    /// distances are rejected with [`Error::InvalidDistance`].
    pub fn compute<M: DistanceMetric + ?Sized>(pool: &[Probe], metric: &M) -> Result<Self> {
        let n = pool.len();
        let mut data = Array2::zeros((n, n));

        for i in 0..n {
            for j in (i + 1)..n {
                let d = checked(metric.distance(&pool[i], &pool[j])?)?;
                data[[i, j]] = d;
                data[[j, i]] = d;
            }
        }

        Ok(Self { data })
    }

    /// Distance between pool positions `i` and `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[[i, j]]
    }

    /// Number of probes covered.
    pub fn len(&self) -> usize {
        self.data.nrows()
    }

    /// Whether the matrix covers no probes.
    pub fn is_empty(&self) -> bool {
        self.data.nrows() == 0
    }

    /// Underlying array.
    pub fn as_array(&self) -> &Array2<f64> {
        &self.data
    }
}

/// Reject distances that break the metric contract.
#[inline]
pub(crate) fn checked(d: f64) -> Result<f64> {
    if d >= 0.0 {
        Ok(d)
    } else {
        Err(Error::InvalidDistance { value: d })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::{AsnDistance, FnMetric, GreatCircle};

    #[test]
    fn test_matrix_symmetric_zero_diagonal() {
        let pool = vec![
            Probe::new(1).with_location(0.0, 0.0),
            Probe::new(2).with_location(0.0, 10.0),
            Probe::new(3).with_location(10.0, 0.0),
        ];
        let m = DistanceMatrix::compute(&pool, &GreatCircle::new()).unwrap();

        assert_eq!(m.len(), 3);
        for i in 0..3 {
            assert_eq!(m.get(i, i), 0.0);
            for j in 0..3 {
                assert_eq!(m.get(i, j), m.get(j, i));
            }
        }
        assert!((m.get(0, 1) - 1111.949).abs() < 1e-3);
    }

    #[test]
    fn test_matrix_propagates_metric_error() {
        let pool = vec![Probe::new(1).with_asn(1), Probe::new(2)];
        let err = DistanceMatrix::compute(&pool, &AsnDistance::new()).unwrap_err();
        assert!(matches!(err, Error::MissingAttribute { id: 2, .. }));
    }

    #[test]
    fn test_matrix_rejects_nan() {
        let pool = vec![Probe::new(1), Probe::new(2)];
        let nan = FnMetric::new("nan", |_: &Probe, _: &Probe| Ok(f64::NAN));
        assert!(matches!(
            DistanceMatrix::compute(&pool, &nan),
            Err(Error::InvalidDistance { .. })
        ));
    }

    #[test]
    fn test_single_probe_matrix() {
        let pool = vec![Probe::new(1)];
        let m = DistanceMatrix::compute(&pool, &AsnDistance::new()).unwrap();
        assert_eq!(m.len(), 1);
        assert!(!m.is_empty());
    }
}
