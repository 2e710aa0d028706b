//! The per-request transit graph.

use tracing::debug;

use crate::domain::{Line, Stop};
use crate::network::{NetworkSnapshot, lines_from_records, stops_from_records};

use super::config::PlannerConfig;
use super::registry::StopRegistry;
use super::topology::{Adjacency, RouteTopology};

/// Stops plus line topology, built from scratch for one planning request
/// and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct TransitGraph {
    pub registry: StopRegistry,
    pub topology: RouteTopology,
}

impl TransitGraph {
    /// Build from already-validated domain values.
    pub fn build(stops: Vec<Stop>, lines: &[Line], adjacency: Adjacency) -> Self {
        let registry = StopRegistry::from_stops(stops);
        let topology = RouteTopology::build(lines, &registry, adjacency);
        Self { registry, topology }
    }

    /// Build from persisted records, with edges laid out per
    /// `config.adjacency`. Records that fail validation are dropped, as are
    /// line references to unknown stops.
    pub fn from_snapshot(snapshot: &NetworkSnapshot, config: &PlannerConfig) -> Self {
        let stops = stops_from_records(&snapshot.stops);
        let lines = lines_from_records(&snapshot.lines);
        let graph = Self::build(stops, &lines, config.adjacency);

        debug!(
            stops = graph.registry.len(),
            edges = graph.topology.edge_count(),
            adjacency = ?graph.topology.adjacency(),
            "Built transit graph"
        );
        graph
    }
}
