//! Distance metrics over probes.
//!
//! Selection is metric-agnostic: anything implementing [`DistanceMetric`]
//! can drive it. Two metrics ship with the crate:
//!
//! | Metric | Distance | Use |
//! |--------|----------|-----|
//! | [`GreatCircle`] | haversine km | geographic spread |
//! | [`AsnDistance`] | 0 same ASN, 1 otherwise | network spread |
//!
//! [`FnMetric`] adapts a closure for anything else. To combine geographic and
//! network diversity, run a selection per metric and merge the results with
//! [`crate::DiversityResult::union`].
//!
//! ```rust
//! use spread::metric::{AsnDistance, DistanceMetric, GreatCircle};
//! use spread::Probe;
//!
//! let ams = Probe::new(1).with_location(52.37, 4.90).with_asn(1136);
//! let syd = Probe::new(2).with_location(-33.87, 151.21).with_asn(1221);
//!
//! assert!(GreatCircle::new().distance(&ams, &syd).unwrap() > 16_000.0);
//! assert_eq!(AsnDistance::new().distance(&ams, &syd).unwrap(), 1.0);
//! ```

mod asn;
mod func;
mod great_circle;
mod matrix;
mod traits;

pub use asn::AsnDistance;
pub use func::FnMetric;
pub use great_circle::{GreatCircle, EARTH_RADIUS_KM};
pub use matrix::DistanceMatrix;
pub use traits::DistanceMetric;

pub(crate) use matrix::checked;
