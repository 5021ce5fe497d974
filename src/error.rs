use thiserror::Error;

use crate::probe::ProbeId;

/// Result alias for `spread`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by metrics, selectors and probe ingestion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Candidate pool was empty.
    #[error("empty input provided")]
    EmptyInput,

    /// Invalid number of probes requested.
    #[error("cannot select {requested} probes from {n_items} candidates")]
    InvalidSelectionCount {
        /// Requested count.
        requested: usize,
        /// Number of candidates.
        n_items: usize,
    },

    /// A probe id was referenced that is not in the pool.
    #[error("probe {id} is not in the candidate pool")]
    UnknownProbe {
        /// Missing id.
        id: ProbeId,
    },

    /// The same probe id appears more than once in the pool.
    #[error("probe {id} appears more than once in the candidate pool")]
    DuplicateProbe {
        /// Repeated id.
        id: ProbeId,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },

    /// The per-ASN cap leaves fewer eligible probes than requested.
    #[error("only {available} probes are selectable under the ASN cap, {requested} requested")]
    Exhausted {
        /// Requested count.
        requested: usize,
        /// Probes selectable under the cap.
        available: usize,
    },

    /// A metric needed an attribute the probe does not carry.
    #[error("probe {id} has no {attribute}")]
    MissingAttribute {
        /// Offending probe.
        id: ProbeId,
        /// Attribute name ("location", "asn").
        attribute: &'static str,
    },

    /// A metric produced a negative or NaN distance.
    #[error("metric returned invalid distance {value}")]
    InvalidDistance {
        /// The value returned.
        value: f64,
    },

    /// Failure raised by a caller-supplied metric.
    #[error("metric failed: {0}")]
    Metric(String),

    /// Probe coordinates outside the valid latitude/longitude range.
    #[error("probe {id} has out-of-range coordinates (lat {lat}, lon {lon})")]
    InvalidCoordinate {
        /// Offending probe.
        id: ProbeId,
        /// Latitude in degrees.
        lat: f64,
        /// Longitude in degrees.
        lon: f64,
    },

    /// Probe or config JSON could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err.to_string())
    }
}
