//! Transit lines and their directions of travel.

use std::fmt;

use super::error::DomainError;
use super::stop::StopId;

/// One of the two directions a line runs in.
///
/// The two directions are independent stop sequences; neither is assumed to
/// be the reverse of the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    /// Persisted as `direction1Stops`.
    Outbound,
    /// Persisted as `direction2Stops`.
    Inbound,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Outbound => "outbound",
            Direction::Inbound => "inbound",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A line code tagged with a direction, e.g. `12/outbound`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineId {
    pub code: String,
    pub direction: Direction,
}

impl LineId {
    pub fn new(code: impl Into<String>, direction: Direction) -> Self {
        Self {
            code: code.into(),
            direction,
        }
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.code, self.direction)
    }
}

/// A line as persisted: a code and two unresolved stop id sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    code: String,
    outbound: Vec<StopId>,
    inbound: Vec<StopId>,
}

impl Line {
    /// Create a line. The code is trimmed and must not be empty.
    pub fn new(
        code: impl AsRef<str>,
        outbound: Vec<StopId>,
        inbound: Vec<StopId>,
    ) -> Result<Self, DomainError> {
        let code = code.as_ref().trim();
        if code.is_empty() {
            return Err(DomainError::EmptyLineCode);
        }
        Ok(Self {
            code: code.to_string(),
            outbound,
            inbound,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Stop ids for the given direction, in order of travel.
    pub fn stops(&self, direction: Direction) -> &[StopId] {
        match direction {
            Direction::Outbound => &self.outbound,
            Direction::Inbound => &self.inbound,
        }
    }

    /// Both directions with their identifiers.
    pub fn directions(&self) -> impl Iterator<Item = (LineId, &[StopId])> + '_ {
        [Direction::Outbound, Direction::Inbound]
            .into_iter()
            .map(|d| (LineId::new(self.code.clone(), d), self.stops(d)))
    }
}
