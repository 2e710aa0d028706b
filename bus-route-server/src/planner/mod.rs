//! Route planner over a fixed bus network.
//!
//! This module answers: "given a start and an end coordinate, which stops
//! and which lines connect them?"
//!
//! Every request builds a [`TransitGraph`] from the current stops and lines,
//! resolves each coordinate to nearby stops, and runs a shortest-path search
//! for each pairing of boundary stops.

mod candidates;
mod config;
mod graph;
mod registry;
mod search;
mod topology;


pub use candidates::{Combination, PlanOutcome};
pub use config::PlannerConfig;
pub use graph::TransitGraph;
pub use registry::StopRegistry;
pub use search::{Planner, SearchError};
pub use topology::{Adjacency, LineSequence, RouteTopology};
