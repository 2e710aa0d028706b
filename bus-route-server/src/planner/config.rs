//! Planner configuration.

use std::time::Duration;

use super::topology::Adjacency;

/// Configuration parameters for route planning.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Whether line-directions yield one-way or two-way adjacency.
    pub adjacency: Adjacency,

    /// Wall-clock budget for one shortest-path search.
    /// `None` means the search always runs to completion.
    pub search_deadline: Option<Duration>,

    /// How much further (meters) the second-nearest stop may be than the
    /// nearest one and still be tried as a boundary stop.
    /// `f64::INFINITY` always tries it.
    pub second_nearest_slack_m: f64,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        adjacency: Adjacency,
        search_deadline: Option<Duration>,
        second_nearest_slack_m: f64,
    ) -> Self {
        Self {
            adjacency,
            search_deadline,
            second_nearest_slack_m,
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            adjacency: Adjacency::Directed,
            search_deadline: Some(Duration::from_millis(500)),
            second_nearest_slack_m: 400.0,
        }
    }
}
