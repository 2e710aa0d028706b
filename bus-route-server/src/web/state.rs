//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::{CacheConfig, CachedNetwork};
use crate::network::Backend;
use crate::planner::PlannerConfig;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Source of stops and lines, optionally cached
    pub network: Arc<CachedNetwork<Backend>>,

    /// Route planner configuration
    pub config: Arc<PlannerConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(backend: Backend, cache: &CacheConfig, config: PlannerConfig) -> Self {
        Self {
            network: Arc::new(CachedNetwork::new(backend, cache)),
            config: Arc::new(config),
        }
    }
}
