//! Stop identity and attributes.

use std::fmt;

use super::geo::Coordinate;

/// Persisted integer identifier of a stop.
///
/// Ordering is numeric; it is the tie-breaker wherever two stops compare
/// equal on distance or name.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StopId(pub i64);

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A boarding point: id, display name and position.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub id: StopId,
    pub name: String,
    pub coord: Coordinate,
}

impl Stop {
    pub fn new(id: StopId, name: impl Into<String>, coord: Coordinate) -> Self {
        Self {
            id,
            name: name.into(),
            coord,
        }
    }
}
