//! Probe records in measurement-platform JSON.
//!
//! Parses the probe objects returned by a RIPE Atlas style API:
//!
//! ```json
//! {
//!   "id": 6001,
//!   "asn_v4": 3333,
//!   "asn_v6": 3333,
//!   "geometry": { "type": "Point", "coordinates": [4.9, 52.37] },
//!   "tags": [{ "name": "IPv6 Works", "slug": "system-ipv6-works" }]
//! }
//! ```
//!
//! GeoJSON puts longitude first. Either a bare array of such objects or an
//! API page (`{ "results": [...] }`) is accepted. Fetching pages over the
//! network and filtering by tags are left to the caller.
//!
//! The ASN used for selection is `asn_v4`, falling back to `asn_v6`; the two
//! rarely differ for the same probe.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::probe::{Probe, ProbeId};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Document {
    Page { results: Vec<RawProbe> },
    List(Vec<RawProbe>),
}

#[derive(Debug, Deserialize)]
struct RawProbe {
    id: ProbeId,
    #[serde(default)]
    asn_v4: Option<u32>,
    #[serde(default)]
    asn_v6: Option<u32>,
    #[serde(default)]
    geometry: Option<Geometry>,
    #[serde(default)]
    tags: Option<Vec<RawTag>>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    /// `[longitude, latitude]`.
    coordinates: [f64; 2],
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTag {
    Slug(String),
    Full { slug: String },
}

impl From<RawProbe> for Probe {
    fn from(raw: RawProbe) -> Self {
        let mut probe = Probe::new(raw.id);
        if let Some(g) = raw.geometry {
            let [lon, lat] = g.coordinates;
            probe = probe.with_location(lat, lon);
        }
        if let Some(asn) = raw.asn_v4.or(raw.asn_v6) {
            probe = probe.with_asn(asn);
        }
        if let Some(tags) = raw.tags {
            probe = probe.with_tags(tags.into_iter().map(|t| match t {
                RawTag::Slug(s) | RawTag::Full { slug: s } => s,
            }));
        }
        probe
    }
}

/// Parse probes from a JSON array or an API page with a `results` array.
pub fn parse_probes(json: &str) -> Result<Vec<Probe>> {
    let doc: Document = serde_json::from_str(json)?;
    let raw = match doc {
        Document::Page { results } => results,
        Document::List(list) => list,
    };
    debug!(count = raw.len(), "parsed probe records");
    Ok(raw.into_iter().map(Probe::from).collect())
}

/// Keep only probes that carry both a location and an ASN.
///
/// Software probes and probes with hidden positions lack one or the other
/// and cannot take part in geographic or ASN selection.
pub fn retain_selectable(probes: Vec<Probe>) -> Vec<Probe> {
    let before = probes.len();
    let kept: Vec<Probe> = probes
        .into_iter()
        .filter(|p| p.location().is_some() && p.asn().is_some())
        .collect();
    if kept.len() < before {
        warn!(
            dropped = before - kept.len(),
            kept = kept.len(),
            "dropped probes without location or ASN"
        );
    }
    kept
}

/// Fail on the first probe whose coordinates are out of range.
pub fn validate_coordinates(probes: &[Probe]) -> Result<()> {
    for probe in probes {
        if let Some(p) = probe.location() {
            if !p.is_valid() {
                return Err(Error::InvalidCoordinate {
                    id: probe.id(),
                    lat: p.lat,
                    lon: p.lon,
                });
            }
        }
    }
    Ok(())
}

/// Parse, drop unusable probes, and validate coordinates.
pub fn load_pool(json: &str) -> Result<Vec<Probe>> {
    let pool = retain_selectable(parse_probes(json)?);
    validate_coordinates(&pool)?;
    Ok(pool)
}
