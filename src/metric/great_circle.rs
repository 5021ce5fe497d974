//! Great-circle distance via the haversine formula.
//!
//! ```text
//! a = sin²(Δφ/2) + cos φ₁ · cos φ₂ · sin²(Δλ/2)
//! d = 2R · asin(√a)
//! ```
//!
//! φ is latitude and λ longitude, both in radians. The haversine form stays
//! well conditioned for small separations, which matters when many probes sit
//! in the same city.

use super::traits::DistanceMetric;
use crate::error::{Error, Result};
use crate::probe::{GeoPoint, Probe};

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Geographic distance between probe locations, in kilometers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreatCircle {
    radius: f64,
}

impl GreatCircle {
    /// Great-circle metric on the Earth (radius 6371 km).
    pub fn new() -> Self {
        Self {
            radius: EARTH_RADIUS_KM,
        }
    }

    /// Use a different sphere radius. Distances scale linearly with it.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Sphere radius in use.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Haversine distance between two points.
    pub fn between(&self, a: GeoPoint, b: GeoPoint) -> f64 {
        let (lat1, lon1) = (a.lat.to_radians(), a.lon.to_radians());
        let (lat2, lon2) = (b.lat.to_radians(), b.lon.to_radians());

        let h = ((lat2 - lat1) / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * ((lon2 - lon1) / 2.0).sin().powi(2);
        // Rounding can push h slightly above 1 for antipodal points.
        2.0 * self.radius * h.min(1.0).sqrt().asin()
    }

    fn validate(&self) -> Result<()> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(Error::InvalidParameter {
                name: "radius",
                message: "must be positive and finite",
            });
        }
        Ok(())
    }
}

impl Default for GreatCircle {
    fn default() -> Self {
        Self::new()
    }
}

impl DistanceMetric for GreatCircle {
    fn distance(&self, a: &Probe, b: &Probe) -> Result<f64> {
        self.validate()?;
        Ok(self.between(a.require_location()?, b.require_location()?))
    }

    fn name(&self) -> &'static str {
        "great-circle"
    }
}
