//! Server configuration from environment variables.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::network::{Backend, FileNetwork, NetworkClient, NetworkClientConfig, NetworkError};
use crate::planner::{Adjacency, PlannerConfig};

const DEFAULT_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_NETWORK_DIR: &str = "data";

/// Error reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Variable present but not parseable
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Where stops and lines come from.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendConfig {
    /// Remote data service
    Http {
        base_url: String,
        api_key: Option<String>,
    },
    /// `stops.json` and `lines.json` in a directory
    Files { dir: PathBuf },
}

impl BackendConfig {
    /// Construct the backend this configuration names.
    pub fn build(&self) -> Result<Backend, NetworkError> {
        match self {
            BackendConfig::Http { base_url, api_key } => {
                let mut config = NetworkClientConfig::new(base_url.clone());
                if let Some(key) = api_key {
                    config = config.with_api_key(key.clone());
                }
                Ok(Backend::Http(NetworkClient::new(config)?))
            }
            BackendConfig::Files { dir } => Ok(Backend::Files(FileNetwork::new(dir))),
        }
    }
}

impl fmt::Display for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendConfig::Http { base_url, .. } => write!(f, "http {base_url}"),
            BackendConfig::Files { dir } => write!(f, "files {}", dir.display()),
        }
    }
}

/// Everything `main` needs to start serving.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub backend: BackendConfig,
    pub planner: PlannerConfig,
    pub cache: CacheConfig,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`. Unset and empty variables take
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let addr = match get("BUS_PLANNER_ADDR") {
            Some(raw) => parse("BUS_PLANNER_ADDR", &raw)?,
            None => parse("BUS_PLANNER_ADDR", DEFAULT_ADDR)?,
        };

        let backend = match get("BUS_NETWORK_URL") {
            Some(base_url) => BackendConfig::Http {
                base_url: base_url.trim().to_string(),
                api_key: get("BUS_NETWORK_API_KEY"),
            },
            None => BackendConfig::Files {
                dir: get("BUS_NETWORK_DIR")
                    .unwrap_or_else(|| DEFAULT_NETWORK_DIR.to_string())
                    .into(),
            },
        };

        let mut planner = PlannerConfig::default();
        if let Some(raw) = get("BUS_BIDIRECTIONAL") {
            let bidirectional: bool = parse("BUS_BIDIRECTIONAL", &raw)?;
            planner.adjacency = if bidirectional {
                Adjacency::Bidirectional
            } else {
                Adjacency::Directed
            };
        }
        if let Some(raw) = get("BUS_SEARCH_DEADLINE_MS") {
            // Zero turns the deadline off.
            let ms: u64 = parse("BUS_SEARCH_DEADLINE_MS", &raw)?;
            planner.search_deadline = (ms > 0).then(|| Duration::from_millis(ms));
        }
        if let Some(raw) = get("BUS_SECOND_NEAREST_SLACK_M") {
            let slack: f64 = parse("BUS_SECOND_NEAREST_SLACK_M", &raw)?;
            if slack.is_nan() || slack < 0.0 {
                return Err(ConfigError::Invalid {
                    key: "BUS_SECOND_NEAREST_SLACK_M",
                    value: raw,
                    reason: "must be a non-negative number".to_string(),
                });
            }
            planner.second_nearest_slack_m = slack;
        }

        let cache = match get("BUS_CACHE_TTL_SECS") {
            Some(raw) => match parse::<u64>("BUS_CACHE_TTL_SECS", &raw)? {
                0 => CacheConfig::default(),
                secs => CacheConfig::with_ttl(Duration::from_secs(secs)),
            },
            None => CacheConfig::default(),
        };

        Ok(Self {
            addr,
            backend,
            planner,
            cache,
        })
    }
}

fn parse<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}
