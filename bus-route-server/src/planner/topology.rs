//! Route topology: resolved stop sequences per line-direction and the
//! adjacency derived from them.

use std::collections::{BTreeSet, HashMap, HashSet};

use tracing::{debug, warn};

use crate::domain::{Line, LineId, StopId};

use super::registry::StopRegistry;

/// How consecutive stops in a line-direction become graph edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Adjacency {
    /// `S_i -> S_{i+1}` only, in the direction of travel.
    #[default]
    Directed,
    /// Both `S_i -> S_{i+1}` and `S_{i+1} -> S_i`.
    Bidirectional,
}

/// One line-direction with its stop references resolved.
#[derive(Debug, Clone)]
pub struct LineSequence {
    pub id: LineId,
    stops: Vec<StopId>,
    members: HashSet<StopId>,
}

impl LineSequence {
    fn new(id: LineId, stops: Vec<StopId>) -> Self {
        let members = stops.iter().copied().collect();
        Self { id, stops, members }
    }

    /// Stops in order of travel.
    pub fn stops(&self) -> &[StopId] {
        &self.stops
    }

    pub fn contains(&self, stop: StopId) -> bool {
        self.members.contains(&stop)
    }
}

/// Every line-direction of the network and the adjacency they induce.
#[derive(Debug, Clone, Default)]
pub struct RouteTopology {
    mode: Adjacency,
    sequences: Vec<LineSequence>,
    /// Stop -> stops reachable in one hop. `BTreeSet` keeps iteration order
    /// stable across builds.
    edges: HashMap<StopId, BTreeSet<StopId>>,
    dropped_references: usize,
}

impl RouteTopology {
    /// Create an empty topology with the given adjacency mode.
    pub fn new(mode: Adjacency) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Build a topology from `lines`, resolving stop ids through `registry`.
    pub fn build(lines: &[Line], registry: &StopRegistry, mode: Adjacency) -> Self {
        let mut topology = Self::new(mode);
        topology.load(lines, registry);
        topology
    }

    /// Replace the topology contents.
    ///
    /// Each line yields one sequence per direction. Stop ids that are not in
    /// `registry` are skipped; the rest of that sequence is kept.
    pub fn load(&mut self, lines: &[Line], registry: &StopRegistry) {
        self.sequences.clear();
        self.edges.clear();
        self.dropped_references = 0;

        for line in lines {
            for (id, raw) in line.directions() {
                let mut resolved = Vec::with_capacity(raw.len());
                for &stop in raw {
                    if registry.contains(stop) {
                        resolved.push(stop);
                    } else {
                        warn!(line = %id, stop_id = %stop, "Line references unknown stop, skipping");
                        self.dropped_references += 1;
                    }
                }
                self.add_edges(&resolved);
                self.sequences.push(LineSequence::new(id, resolved));
            }
        }

        debug!(
            sequences = self.sequences.len(),
            stops = self.edges.len(),
            dropped = self.dropped_references,
            "Built route topology"
        );
    }

    fn add_edges(&mut self, stops: &[StopId]) {
        for pair in stops.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            // A stop listed twice in a row is not a hop.
            if from == to {
                continue;
            }
            self.edges.entry(from).or_default().insert(to);
            if self.mode == Adjacency::Bidirectional {
                self.edges.entry(to).or_default().insert(from);
            }
        }
    }

    /// Stops one hop away from `stop`, in ascending id order.
    pub fn neighbors(&self, stop: StopId) -> impl Iterator<Item = StopId> + '_ {
        self.edges.get(&stop).into_iter().flatten().copied()
    }

    /// Whether the graph has an edge `from -> to`.
    pub fn is_adjacent(&self, from: StopId, to: StopId) -> bool {
        self.edges.get(&from).is_some_and(|n| n.contains(&to))
    }

    /// Every line-direction whose sequence contains both stops, in load
    /// order.
    pub fn lines_serving(&self, a: StopId, b: StopId) -> Vec<LineId> {
        let mut serving: Vec<LineId> = Vec::new();
        for seq in &self.sequences {
            if seq.contains(a) && seq.contains(b) && !serving.contains(&seq.id) {
                serving.push(seq.id.clone());
            }
        }
        serving
    }

    pub fn sequences(&self) -> &[LineSequence] {
        &self.sequences
    }

    pub fn sequence(&self, id: &LineId) -> Option<&LineSequence> {
        self.sequences.iter().find(|s| &s.id == id)
    }

    pub fn adjacency(&self) -> Adjacency {
        self.mode
    }

    /// Number of stop ids skipped because the registry didn't know them.
    pub fn dropped_references(&self) -> usize {
        self.dropped_references
    }

    /// Number of distinct directed edges.
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeSet::len).sum()
    }
}
