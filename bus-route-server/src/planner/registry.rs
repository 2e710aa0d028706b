//! Stop registry: every known stop, looked up by id, name or position.

use std::collections::HashMap;

use tracing::warn;

use crate::domain::{Coordinate, Stop, StopId};

/// All stops known for one planning request.
///
/// Stops are kept sorted by id, so every scan (name lookup, nearest-stop
/// ranking) visits them in ascending id order.
#[derive(Debug, Clone, Default)]
pub struct StopRegistry {
    stops: Vec<Stop>,
    index: HashMap<StopId, usize>,
}

impl StopRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding `stops`.
    pub fn from_stops(stops: Vec<Stop>) -> Self {
        let mut registry = Self::new();
        registry.load(stops);
        registry
    }

    /// Replace the registry contents.
    ///
    /// If several stops share an id, the first one given wins and the rest
    /// are dropped.
    pub fn load(&mut self, mut stops: Vec<Stop>) {
        // Stable, so duplicates stay in input order.
        stops.sort_by_key(|s| s.id);

        let before = stops.len();
        stops.dedup_by(|later, earlier| {
            let duplicate = later.id == earlier.id;
            if duplicate {
                warn!(stop_id = %later.id, name = %later.name, "Dropping duplicate stop id");
            }
            duplicate
        });
        if stops.len() != before {
            warn!(dropped = before - stops.len(), "Duplicate stop ids in network data");
        }

        self.index = stops.iter().enumerate().map(|(i, s)| (s.id, i)).collect();
        self.stops = stops;
    }

    pub fn by_id(&self, id: StopId) -> Option<&Stop> {
        self.index.get(&id).map(|&i| &self.stops[i])
    }

    pub fn contains(&self, id: StopId) -> bool {
        self.index.contains_key(&id)
    }

    /// Case-insensitive name lookup. With several matches, the lowest id wins.
    pub fn by_name(&self, name: &str) -> Option<&Stop> {
        let wanted = name.to_lowercase();
        self.stops.iter().find(|s| s.name.to_lowercase() == wanted)
    }

    /// The `k` stops closest to `at`, nearest first, with distances in meters.
    ///
    /// Equal distances are ordered by ascending id.
    pub fn nearest(&self, at: &Coordinate, k: usize) -> Vec<(&Stop, f64)> {
        let mut ranked: Vec<(&Stop, f64)> = self
            .stops
            .iter()
            .map(|s| (s, at.distance_m(&s.coord)))
            .collect();

        ranked.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.id.cmp(&b.0.id)));
        ranked.truncate(k);
        ranked
    }

    /// All stops in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Stop> {
        self.stops.iter()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}
