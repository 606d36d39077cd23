//! Core data types and enums for stop records.

use std::sync::Arc;

use geo::Point;

use crate::identifiers::StopIdentifier;

// ============================================================================
// Enums
// ============================================================================

/// Kind of stop, used by the presenter to pick a marker style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StopCategory {
    Bus,
    Tram,
    Train,
    Bike,
    Unknown,
}

impl StopCategory {
    /// Parse the free-form `icon` value the transit API attaches to stations.
    ///
    /// Matching is case-insensitive; anything unrecognized maps to `Unknown`.
    pub fn from_icon(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "bus" => Self::Bus,
            "tram" => Self::Tram,
            "train" => Self::Train,
            "bike" => Self::Bike,
            _ => Self::Unknown,
        }
    }
}

// ============================================================================
// Data Structures
// ============================================================================

/// A stop record as delivered by a provider, before validation.
///
/// Upstream APIs omit coordinates on some records, so both are optional here.
/// A `RawStop` never reaches rendering directly; it has to pass through
/// [`RawStop::validate`] first.
#[derive(Clone, Debug, PartialEq)]
pub struct RawStop {
    pub id: Option<String>,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub category: StopCategory,
}

impl RawStop {
    /// Promote to a renderable [`Stop`] if both coordinates are present.
    ///
    /// Records missing either coordinate yield `None` and are dropped by the
    /// caller, not errored.
    pub fn validate(self) -> Option<Stop> {
        let (latitude, longitude) = (self.latitude?, self.longitude?);
        Some(Stop {
            id: self.id.map(StopIdentifier::new),
            name: self.name.into(),
            location: Point::new(longitude, latitude),
            category: self.category,
        })
    }
}

/// A validated stop. Both coordinates are guaranteed present.
#[derive(Clone, Debug, PartialEq)]
pub struct Stop {
    pub id: Option<StopIdentifier>,
    pub name: Arc<str>,
    pub location: Point,
    pub category: StopCategory,
}

impl Stop {
    pub fn latitude(&self) -> f64 {
        self.location.y()
    }

    pub fn longitude(&self) -> f64 {
        self.location.x()
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StopError {
    #[error("Malformed request URL: {0}")]
    MalformedUrl(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, StopError>;
