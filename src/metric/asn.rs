//! ASN dissimilarity.
//!
//! A coarse binary metric: probes in the same autonomous system are at
//! distance 0, probes in different ones at a fixed positive distance. Under
//! max-min selection this spreads picks across networks before it ever
//! repeats one.

use super::traits::DistanceMetric;
use crate::error::{Error, Result};
use crate::probe::Probe;

/// Binary ASN metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AsnDistance {
    mismatch: f64,
}

impl AsnDistance {
    /// Distance 1.0 between different ASNs.
    pub fn new() -> Self {
        Self { mismatch: 1.0 }
    }

    /// Set the distance between probes in different ASNs.
    pub fn with_mismatch(mut self, mismatch: f64) -> Self {
        self.mismatch = mismatch;
        self
    }
}

impl Default for AsnDistance {
    fn default() -> Self {
        Self::new()
    }
}

impl DistanceMetric for AsnDistance {
    fn distance(&self, a: &Probe, b: &Probe) -> Result<f64> {
        if !(self.mismatch.is_finite() && self.mismatch > 0.0) {
            return Err(Error::InvalidParameter {
                name: "mismatch",
                message: "must be positive and finite",
            });
        }
        if a.require_asn()? == b.require_asn()? {
            Ok(0.0)
        } else {
            Ok(self.mismatch)
        }
    }

    fn name(&self) -> &'static str {
        "asn"
    }
}
