//! Probe records and candidate-pool checks.
//!
//! A [`Probe`] is a measurement vantage point: a unique id, optionally a
//! geographic position, optionally the ASN of the network hosting it, and a
//! tag set. Probes are built once (usually by [`crate::atlas`]) and only read
//! afterwards; selectors borrow them as a `&[Probe]` candidate pool.

use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};

/// Unique probe identifier.
pub type ProbeId = u64;

/// A point on the globe in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    /// Latitude in degrees, `[-90, 90]`.
    pub lat: f64,
    /// Longitude in degrees, `[-180, 180]`.
    pub lon: f64,
}

impl GeoPoint {
    /// Create a point from latitude and longitude in degrees.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Whether latitude and longitude are inside their valid ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.abs() <= 90.0 && self.lon.abs() <= 180.0
    }
}

/// A measurement vantage point.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Probe {
    id: ProbeId,
    location: Option<GeoPoint>,
    asn: Option<u32>,
    tags: Vec<String>,
}

impl Probe {
    /// Create a probe with no location, ASN or tags.
    pub fn new(id: ProbeId) -> Self {
        Self {
            id,
            location: None,
            asn: None,
            tags: Vec::new(),
        }
    }

    /// Set the location (latitude, longitude in degrees).
    pub fn with_location(mut self, lat: f64, lon: f64) -> Self {
        self.location = Some(GeoPoint::new(lat, lon));
        self
    }

    /// Set the ASN.
    pub fn with_asn(mut self, asn: u32) -> Self {
        self.asn = Some(asn);
        self
    }

    /// Set the tag set.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Probe id.
    pub fn id(&self) -> ProbeId {
        self.id
    }

    /// Location, if known.
    pub fn location(&self) -> Option<GeoPoint> {
        self.location
    }

    /// ASN, if known.
    pub fn asn(&self) -> Option<u32> {
        self.asn
    }

    /// Tags attached by the platform. Not used by selection.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Location or a [`Error::MissingAttribute`] naming this probe.
    pub fn require_location(&self) -> Result<GeoPoint> {
        self.location.ok_or(Error::MissingAttribute {
            id: self.id,
            attribute: "location",
        })
    }

    /// ASN or a [`Error::MissingAttribute`] naming this probe.
    pub fn require_asn(&self) -> Result<u32> {
        self.asn.ok_or(Error::MissingAttribute {
            id: self.id,
            attribute: "asn",
        })
    }
}

impl fmt::Display for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "id: {}\tasn: ", self.id)?;
        match self.asn {
            Some(asn) => write!(f, "{asn}")?,
            None => write!(f, "-")?,
        }
        write!(f, "\tlongitude/latitude: ")?;
        match self.location {
            Some(p) => write!(f, "[{}, {}]", p.lon, p.lat),
            None => write!(f, "-"),
        }
    }
}

/// Check a candidate pool and map each id to its position.
///
/// Fails on an empty pool or a repeated id.
pub(crate) fn index_pool(pool: &[Probe]) -> Result<HashMap<ProbeId, usize>> {
    if pool.is_empty() {
        return Err(Error::EmptyInput);
    }
    let mut index = HashMap::with_capacity(pool.len());
    for (i, probe) in pool.iter().enumerate() {
        if index.insert(probe.id, i).is_some() {
            return Err(Error::DuplicateProbe { id: probe.id });
        }
    }
    Ok(index)
}
