//! Itineraries: ordered stops plus the lines serving each hop.

use super::error::DomainError;
use super::line::LineId;
use super::stop::{Stop, StopId};

/// Travel between two consecutive stops of an itinerary.
#[derive(Debug, Clone, PartialEq)]
pub struct Hop {
    pub from: StopId,
    pub to: StopId,

    /// Line-directions serving this pair. Empty means the hop is
    /// unannotated: the stops are adjacent in the graph but no line could be
    /// attributed to the pair.
    pub lines: Vec<LineId>,

    /// Edge weight used by the search.
    pub distance_km: f64,
}

impl Hop {
    pub fn is_annotated(&self) -> bool {
        !self.lines.is_empty()
    }
}

/// A route through the network.
///
/// Invariant: `hops.len() == stops.len() - 1` and hop `i` joins stop `i` to
/// stop `i + 1`. There is always at least one stop.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    stops: Vec<Stop>,
    hops: Vec<Hop>,
}

impl Itinerary {
    /// Build an itinerary, checking that hops line up with stops.
    pub fn new(stops: Vec<Stop>, hops: Vec<Hop>) -> Result<Self, DomainError> {
        if stops.is_empty() {
            return Err(DomainError::InvalidItinerary("must contain at least one stop"));
        }
        if hops.len() + 1 != stops.len() {
            return Err(DomainError::InvalidItinerary(
                "hop count must be one less than stop count",
            ));
        }
        let lined_up = hops
            .iter()
            .zip(stops.windows(2))
            .all(|(hop, pair)| hop.from == pair[0].id && hop.to == pair[1].id);
        if !lined_up {
            return Err(DomainError::InvalidItinerary("hops must join consecutive stops"));
        }
        Ok(Self { stops, hops })
    }

    /// The degenerate itinerary where start and end coincide.
    pub fn single(stop: Stop) -> Self {
        Self {
            stops: vec![stop],
            hops: Vec::new(),
        }
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }

    pub fn first(&self) -> &Stop {
        &self.stops[0]
    }

    pub fn last(&self) -> &Stop {
        &self.stops[self.stops.len() - 1]
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// True when start and end are the same stop.
    pub fn is_single_stop(&self) -> bool {
        self.stops.len() == 1
    }

    /// Sum of edge weights along the route.
    pub fn total_km(&self) -> f64 {
        self.hops.iter().map(|h| h.distance_km).sum()
    }

    /// Number of hops that no line could be attributed to.
    pub fn unannotated_hops(&self) -> usize {
        self.hops.iter().filter(|h| !h.is_annotated()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinate, Direction};

    fn stop(id: i64) -> Stop {
        Stop::new(StopId(id), format!("Stop {id}"), Coordinate::new(0.0, id as f64).unwrap())
    }

    fn hop(from: i64, to: i64, lines: &[&str]) -> Hop {
        Hop {
            from: StopId(from),
            to: StopId(to),
            lines: lines
                .iter()
                .map(|l| LineId::new(*l, Direction::Outbound))
                .collect(),
            distance_km: 1.5,
        }
    }

    #[test]
    fn valid_itinerary() {
        let it = Itinerary::new(
            vec![stop(1), stop(2), stop(3)],
            vec![hop(1, 2, &["5"]), hop(2, 3, &[])],
        )
        .unwrap();

        assert_eq!(it.stop_count(), 3);
        assert_eq!(it.first().id, StopId(1));
        assert_eq!(it.last().id, StopId(3));
        assert_eq!(it.unannotated_hops(), 1);
        assert!((it.total_km() - 3.0).abs() < 1e-12);
        assert!(!it.is_single_stop());
    }

    #[test]
    fn single_stop() {
        let it = Itinerary::single(stop(7));
        assert!(it.is_single_stop());
        assert!(it.hops().is_empty());
        assert_eq!(it.first(), it.last());
        assert_eq!(it.total_km(), 0.0);
    }

    #[test]
    fn rejects_empty() {
        assert!(Itinerary::new(vec![], vec![]).is_err());
    }

    #[test]
    fn rejects_wrong_hop_count() {
        assert!(Itinerary::new(vec![stop(1), stop(2)], vec![]).is_err());
    }

    #[test]
    fn rejects_misaligned_hops() {
        let result = Itinerary::new(vec![stop(1), stop(2)], vec![hop(2, 1, &["5"])]);
        assert_eq!(
            result,
            Err(DomainError::InvalidItinerary("hops must join consecutive stops"))
        );
    }
}
