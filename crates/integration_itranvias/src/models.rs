//! iTranvias data models
//!
//! Typed representations of stops, lines and real-time bus arrivals. Every
//! value is an owned snapshot of a single query response.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A tram or bus stop
///
/// Full stops come from the network snapshot. Placeholder stops carry only a
/// name (a line's origin or destination) or only an id (a bus's last stop).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Stop {
    /// Stop identifier, absent for name-only placeholders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Display name, empty for id-only placeholders
    #[serde(default)]
    pub name: String,
    /// Lines serving this stop, in the order the service lists them
    #[serde(default)]
    pub connections: Vec<Line>,
    /// Longitude as provided by the service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long: Option<f64>,
    /// Latitude as provided by the service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
}

impl Stop {
    /// Create a placeholder stop holding only a name
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create a placeholder stop holding only an id
    #[must_use]
    pub fn with_id(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    /// Whether this stop is a placeholder rather than a full record
    ///
    /// Only full records carry coordinates.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.long.is_none()
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.id, self.name.is_empty()) {
            (Some(id), true) => write!(f, "#{id}"),
            (Some(id), false) => write!(f, "{} (#{id})", self.name),
            (None, _) => write!(f, "{}", self.name),
        }
    }
}

/// A tram or bus line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Line {
    /// Line identifier, as referenced by a stop's connections
    pub id: i64,
    /// Commercial name (e.g. "1", "1A", "UDC")
    pub name: String,
    /// Display color as provided by the service
    pub color: String,
    /// First stop of the route (name only)
    pub origin: Stop,
    /// Last stop of the route (name only)
    pub destination: Stop,
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} → {}",
            self.name, self.origin.name, self.destination.name
        )
    }
}

/// A scalar forwarded verbatim from the service
///
/// Arrival time, distance and state have no unit or format guarantee, so the
/// JSON scalar kind is preserved as sent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Reading {
    /// Whole number
    Integer(i64),
    /// Whole number above `i64::MAX`
    Unsigned(u64),
    /// Fractional number
    Decimal(f64),
    /// Flag
    Bool(bool),
    /// Free text
    Text(String),
    /// Explicit JSON `null`
    Null,
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Unsigned(value) => write!(f, "{value}"),
            Self::Decimal(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value}"),
            Self::Null => write!(f, "null"),
        }
    }
}

/// A real-time arrival record for one bus at the queried stop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bus {
    /// Bus identifier
    pub id: i64,
    /// Estimated arrival time
    pub time: Reading,
    /// Distance to the stop
    pub distance: Reading,
    /// Status code
    pub state: Reading,
    /// Last stop the bus passed (id only)
    pub last_stop: Stop,
}

impl fmt::Display for Bus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bus {}: {} ({}), last stop {}",
            self.id, self.time, self.distance, self.last_stop
        )
    }
}
