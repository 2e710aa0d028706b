//! Coordinate-to-coordinate planning via boundary stop combinations.
//!
//! The nearest stop to a coordinate is not always on a well-connected line.
//! Each side resolves to its nearest and second-nearest stop, every pairing
//! is searched, and the itinerary with the fewest stops wins. The search is
//! bounded to these four pairings to keep latency predictable.

use tracing::{debug, trace};

use crate::domain::{Coordinate, Itinerary, Stop};

use super::search::{Planner, SearchError};

/// Which boundary stops a plan was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combination {
    NearestNearest,
    NearestSecond,
    SecondNearest,
    SecondSecond,
}

impl Combination {
    /// All pairings in evaluation order. Earlier entries win ties.
    pub const ALL: [Combination; 4] = [
        Combination::NearestNearest,
        Combination::NearestSecond,
        Combination::SecondNearest,
        Combination::SecondSecond,
    ];

    /// Rank (0 = nearest, 1 = second) of the start stop.
    fn start_rank(&self) -> usize {
        match self {
            Combination::NearestNearest | Combination::NearestSecond => 0,
            Combination::SecondNearest | Combination::SecondSecond => 1,
        }
    }

    /// Rank (0 = nearest, 1 = second) of the end stop.
    fn end_rank(&self) -> usize {
        match self {
            Combination::NearestNearest | Combination::SecondNearest => 0,
            Combination::NearestSecond | Combination::SecondSecond => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Combination::NearestNearest => "nearest-nearest",
            Combination::NearestSecond => "nearest-second",
            Combination::SecondNearest => "second-nearest",
            Combination::SecondSecond => "second-second",
        }
    }
}

/// Result of planning between two coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanOutcome {
    /// Boundary stop the itinerary starts from; the nearest stop to the
    /// start coordinate when no itinerary was found.
    pub start: Stop,

    /// Boundary stop the itinerary ends at; the nearest stop to the end
    /// coordinate when no itinerary was found.
    pub end: Stop,

    /// `None` means no known route.
    pub itinerary: Option<Itinerary>,

    /// The pairing that produced `itinerary`.
    pub combination: Option<Combination>,
}

impl Planner<'_> {
    /// Plan a route between two raw coordinates.
    pub fn plan(&self, from: &Coordinate, to: &Coordinate) -> Result<PlanOutcome, SearchError> {
        let starts = self.boundary_candidates(from);
        let ends = self.boundary_candidates(to);

        let (Some(&nearest_start), Some(&nearest_end)) = (starts.first(), ends.first()) else {
            return Err(SearchError::EmptyNetwork);
        };

        let mut chosen: Option<(Combination, Itinerary)> = None;

        for combination in Combination::ALL {
            let (Some(start), Some(end)) = (
                starts.get(combination.start_rank()),
                ends.get(combination.end_rank()),
            ) else {
                continue;
            };

            let Some(itinerary) = self.shortest_path(start.id, end.id)? else {
                trace!(combination = combination.as_str(), "No route for pairing");
                continue;
            };
            if itinerary.is_single_stop() {
                trace!(combination = combination.as_str(), "Degenerate single-stop pairing");
                continue;
            }

            trace!(
                combination = combination.as_str(),
                stops = itinerary.stop_count(),
                "Candidate itinerary"
            );

            let better = chosen
                .as_ref()
                .is_none_or(|(_, current)| itinerary.stop_count() < current.stop_count());
            if better {
                chosen = Some((combination, itinerary));
            }
        }

        let outcome = match chosen {
            Some((combination, itinerary)) => PlanOutcome {
                start: itinerary.first().clone(),
                end: itinerary.last().clone(),
                itinerary: Some(itinerary),
                combination: Some(combination),
            },
            None => PlanOutcome {
                start: nearest_start.clone(),
                end: nearest_end.clone(),
                itinerary: None,
                combination: None,
            },
        };

        debug!(
            start = %outcome.start.id,
            end = %outcome.end.id,
            stops = outcome.itinerary.as_ref().map_or(0, Itinerary::stop_count),
            unannotated = outcome.itinerary.as_ref().map_or(0, Itinerary::unannotated_hops),
            combination = outcome.combination.map(|c| c.as_str()),
            "Planned route"
        );

        Ok(outcome)
    }

    /// The nearest stop to `at`, followed by the second-nearest if it is
    /// within the configured slack of the nearest.
    fn boundary_candidates(&self, at: &Coordinate) -> Vec<&Stop> {
        let ranked = self.graph.registry.nearest(at, 2);
        let Some(&(nearest, nearest_m)) = ranked.first() else {
            return Vec::new();
        };

        let mut candidates = vec![nearest];
        if let Some(&(second, second_m)) = ranked.get(1) {
            if second_m - nearest_m <= self.config.second_nearest_slack_m {
                candidates.push(second);
            }
        }
        candidates
    }
}
