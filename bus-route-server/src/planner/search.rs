//! Shortest-path search between two stops.
//!
//! Dijkstra over the transit graph with geodesic edge weights in
//! kilometers. The search stops as soon as the end stop is settled; the
//! route is rebuilt from predecessor links and each hop is annotated with
//! the line-directions serving it.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

use crate::domain::{DomainError, Hop, Itinerary, Stop, StopId};

use super::config::PlannerConfig;
use super::graph::TransitGraph;

/// Error from route search.
///
/// An unreachable destination is not an error; it is `Ok(None)`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// Stop id not present in the registry
    #[error("unknown stop {0}")]
    UnknownStop(StopId),

    /// No stops to resolve coordinates against
    #[error("network has no stops")]
    EmptyNetwork,

    /// Search ran past its deadline
    #[error("search timed out after {0:?}")]
    Timeout(Duration),

    /// Reconstructed route failed validation
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Priority queue entry. Ordered so that `BinaryHeap` pops the lowest cost
/// first, then the lowest stop id.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Pending {
    cost: f64,
    stop: StopId,
}

impl Eq for Pending {}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.stop.cmp(&self.stop))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Route planner over one transit graph.
///
/// Holds no mutable state: every search allocates its own distance and
/// predecessor maps, so repeated calls with the same inputs give the same
/// answer.
pub struct Planner<'a> {
    pub(super) graph: &'a TransitGraph,
    pub(super) config: &'a PlannerConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(graph: &'a TransitGraph, config: &'a PlannerConfig) -> Self {
        Self { graph, config }
    }

    /// Find the shortest route from `start` to `end`.
    ///
    /// Returns `Ok(None)` if `end` is unreachable. `start == end` yields a
    /// single-stop itinerary with no hops.
    pub fn shortest_path(
        &self,
        start: StopId,
        end: StopId,
    ) -> Result<Option<Itinerary>, SearchError> {
        let registry = &self.graph.registry;
        let start_stop = registry
            .by_id(start)
            .ok_or(SearchError::UnknownStop(start))?;
        if !registry.contains(end) {
            return Err(SearchError::UnknownStop(end));
        }

        if start == end {
            return Ok(Some(Itinerary::single(start_stop.clone())));
        }

        let deadline = self
            .config
            .search_deadline
            .map(|budget| (Instant::now() + budget, budget));

        let mut best: HashMap<StopId, f64> = HashMap::new();
        let mut predecessor: HashMap<StopId, StopId> = HashMap::new();
        let mut queue = BinaryHeap::new();

        best.insert(start, 0.0);
        queue.push(Pending {
            cost: 0.0,
            stop: start,
        });

        let mut reached = false;
        let mut settled = 0usize;

        while let Some(Pending { cost, stop }) = queue.pop() {
            if let Some((at, budget)) = deadline {
                if Instant::now() >= at {
                    warn!(%start, %end, settled, "Route search exceeded deadline");
                    return Err(SearchError::Timeout(budget));
                }
            }

            if stop == end {
                reached = true;
                break;
            }

            // Superseded by a cheaper entry pushed later.
            if cost > best.get(&stop).copied().unwrap_or(f64::INFINITY) {
                continue;
            }
            settled += 1;

            let Some(here) = registry.by_id(stop) else {
                continue;
            };

            for next in self.graph.topology.neighbors(stop) {
                let Some(there) = registry.by_id(next) else {
                    continue;
                };
                let candidate = cost + here.coord.distance_km(&there.coord);
                if candidate < best.get(&next).copied().unwrap_or(f64::INFINITY) {
                    best.insert(next, candidate);
                    predecessor.insert(next, stop);
                    queue.push(Pending {
                        cost: candidate,
                        stop: next,
                    });
                }
            }
        }

        trace!(%start, %end, settled, reached, "Route search finished");

        if !reached {
            debug!(%start, %end, "No route between stops");
            return Ok(None);
        }

        let Some(path) = reconstruct(&predecessor, start, end, registry.len()) else {
            warn!(%start, %end, "Broken predecessor chain, treating as no route");
            return Ok(None);
        };

        self.annotate(&path).map(Some)
    }

    /// Turn a stop id path into an itinerary with per-hop line annotations.
    fn annotate(&self, path: &[StopId]) -> Result<Itinerary, SearchError> {
        let registry = &self.graph.registry;

        let stops: Vec<Stop> = path
            .iter()
            .map(|&id| registry.by_id(id).cloned().ok_or(SearchError::UnknownStop(id)))
            .collect::<Result<_, _>>()?;

        let hops: Vec<Hop> = stops
            .windows(2)
            .map(|pair| {
                let (from, to) = (&pair[0], &pair[1]);
                let lines = self.graph.topology.lines_serving(from.id, to.id);
                if lines.is_empty() {
                    debug!(from = %from.id, to = %to.id, "No line serves hop");
                }
                Hop {
                    from: from.id,
                    to: to.id,
                    lines,
                    distance_km: from.coord.distance_km(&to.coord),
                }
            })
            .collect();

        Ok(Itinerary::new(stops, hops)?)
    }
}

/// Walk predecessor links from `end` back to `start`.
///
/// Returns `None` if the chain breaks or runs longer than `max_len` links.
fn reconstruct(
    predecessor: &HashMap<StopId, StopId>,
    start: StopId,
    end: StopId,
    max_len: usize,
) -> Option<Vec<StopId>> {
    let mut path = vec![end];
    let mut current = end;

    while current != start {
        if path.len() > max_len {
            return None;
        }
        current = *predecessor.get(&current)?;
        path.push(current);
    }

    path.reverse();
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[i64]) -> Vec<StopId> {
        raw.iter().copied().map(StopId).collect()
    }

    #[test]
    fn heap_pops_cheapest_first() {
        let mut heap = BinaryHeap::new();
        heap.push(Pending {
            cost: 2.0,
            stop: StopId(1),
        });
        heap.push(Pending {
            cost: 0.5,
            stop: StopId(2),
        });
        heap.push(Pending {
            cost: 1.0,
            stop: StopId(3),
        });

        let order: Vec<_> = std::iter::from_fn(|| heap.pop()).map(|p| p.stop).collect();
        assert_eq!(order, ids(&[2, 3, 1]));
    }

    #[test]
    fn heap_ties_pop_lowest_id() {
        let mut heap = BinaryHeap::new();
        heap.push(Pending {
            cost: 1.0,
            stop: StopId(9),
        });
        heap.push(Pending {
            cost: 1.0,
            stop: StopId(4),
        });
        assert_eq!(heap.pop().map(|p| p.stop), Some(StopId(4)));
    }

    #[test]
    fn reconstruct_follows_links() {
        let predecessor: HashMap<_, _> = [(StopId(3), StopId(2)), (StopId(2), StopId(1))]
            .into_iter()
            .collect();
        assert_eq!(
            reconstruct(&predecessor, StopId(1), StopId(3), 10),
            Some(ids(&[1, 2, 3]))
        );
    }

    #[test]
    fn reconstruct_broken_chain() {
        let predecessor: HashMap<_, _> = [(StopId(3), StopId(2))].into_iter().collect();
        assert_eq!(reconstruct(&predecessor, StopId(1), StopId(3), 10), None);
    }

    #[test]
    fn reconstruct_cycle_is_bounded() {
        let predecessor: HashMap<_, _> = [(StopId(3), StopId(2)), (StopId(2), StopId(3))]
            .into_iter()
            .collect();
        assert_eq!(reconstruct(&predecessor, StopId(1), StopId(3), 5), None);
    }

    #[test]
    fn error_display() {
        assert_eq!(SearchError::UnknownStop(StopId(7)).to_string(), "unknown stop 7");
        assert_eq!(SearchError::EmptyNetwork.to_string(), "network has no stops");
        assert_eq!(
            SearchError::Timeout(Duration::from_millis(500)).to_string(),
            "search timed out after 500ms"
        );
    }
}
