//! The data source abstraction the planner loads its network from.

use std::future::Future;

use tracing::debug;

use super::client::NetworkClient;
use super::error::NetworkError;
use super::file::FileNetwork;
use super::records::{LineRecord, StopRecord};

/// Trait for providing persisted stop and line records.
///
/// This abstraction allows the web layer to be tested with in-memory data.
pub trait NetworkSource: Send + Sync {
    /// Load every stop record.
    fn load_stops(&self) -> impl Future<Output = Result<Vec<StopRecord>, NetworkError>> + Send;

    /// Load every line record.
    fn load_lines(&self) -> impl Future<Output = Result<Vec<LineRecord>, NetworkError>> + Send;
}

/// Stop and line records loaded together for one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkSnapshot {
    pub stops: Vec<StopRecord>,
    pub lines: Vec<LineRecord>,
}

/// Load stops and lines concurrently. Either failure fails the whole load.
pub async fn load_snapshot<S: NetworkSource>(source: &S) -> Result<NetworkSnapshot, NetworkError> {
    let (stops, lines) = futures::try_join!(source.load_stops(), source.load_lines())?;
    debug!(
        stops = stops.len(),
        lines = lines.len(),
        "Loaded network snapshot"
    );
    Ok(NetworkSnapshot { stops, lines })
}

impl NetworkSource for NetworkClient {
    fn load_stops(&self) -> impl Future<Output = Result<Vec<StopRecord>, NetworkError>> + Send {
        self.fetch_stops()
    }

    fn load_lines(&self) -> impl Future<Output = Result<Vec<LineRecord>, NetworkError>> + Send {
        self.fetch_lines()
    }
}

impl NetworkSource for FileNetwork {
    fn load_stops(&self) -> impl Future<Output = Result<Vec<StopRecord>, NetworkError>> + Send {
        self.read_stops()
    }

    fn load_lines(&self) -> impl Future<Output = Result<Vec<LineRecord>, NetworkError>> + Send {
        self.read_lines()
    }
}

/// Fixed in-memory records.
#[derive(Debug, Clone, Default)]
pub struct StaticNetwork {
    pub stops: Vec<StopRecord>,
    pub lines: Vec<LineRecord>,
}

impl StaticNetwork {
    pub fn new(stops: Vec<StopRecord>, lines: Vec<LineRecord>) -> Self {
        Self { stops, lines }
    }
}

impl NetworkSource for StaticNetwork {
    fn load_stops(&self) -> impl Future<Output = Result<Vec<StopRecord>, NetworkError>> + Send {
        async move { Ok(self.stops.clone()) }
    }

    fn load_lines(&self) -> impl Future<Output = Result<Vec<LineRecord>, NetworkError>> + Send {
        async move { Ok(self.lines.clone()) }
    }
}

/// The configured data source.
#[derive(Debug, Clone)]
pub enum Backend {
    Http(NetworkClient),
    Files(FileNetwork),
    Static(StaticNetwork),
}

impl NetworkSource for Backend {
    fn load_stops(&self) -> impl Future<Output = Result<Vec<StopRecord>, NetworkError>> + Send {
        async move {
            match self {
                Backend::Http(client) => client.load_stops().await,
                Backend::Files(files) => files.load_stops().await,
                Backend::Static(fixed) => fixed.load_stops().await,
            }
        }
    }

    fn load_lines(&self) -> impl Future<Output = Result<Vec<LineRecord>, NetworkError>> + Send {
        async move {
            match self {
                Backend::Http(client) => client.load_lines().await,
                Backend::Files(files) => files.load_lines().await,
                Backend::Static(fixed) => fixed.load_lines().await,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Source whose line load always fails.
    struct BrokenLines;

    impl NetworkSource for BrokenLines {
        fn load_stops(
            &self,
        ) -> impl Future<Output = Result<Vec<StopRecord>, NetworkError>> + Send {
            async { Ok(Vec::new()) }
        }

        fn load_lines(
            &self,
        ) -> impl Future<Output = Result<Vec<LineRecord>, NetworkError>> + Send {
            async {
                Err(NetworkError::Api {
                    status: 500,
                    message: "boom".into(),
                })
            }
        }
    }

    fn sample() -> StaticNetwork {
        StaticNetwork::new(
            vec![StopRecord {
                id: 1,
                name: "Zoravar Andranik".into(),
                lat: 40.17,
                lng: 44.50,
            }],
            vec![LineRecord {
                number: "2".into(),
                direction1_stops: vec![1],
                direction2_stops: vec![],
            }],
        )
    }

    #[tokio::test]
    async fn snapshot_from_static_source() {
        let snapshot = load_snapshot(&sample()).await.unwrap();
        assert_eq!(snapshot.stops.len(), 1);
        assert_eq!(snapshot.lines.len(), 1);
    }

    #[tokio::test]
    async fn backend_delegates() {
        let snapshot = load_snapshot(&Backend::Static(sample())).await.unwrap();
        assert_eq!(snapshot.stops[0].id, 1);
        assert_eq!(snapshot.lines[0].number, "2");
    }

    #[tokio::test]
    async fn any_failure_fails_the_snapshot() {
        let err = load_snapshot(&BrokenLines).await.unwrap_err();
        assert!(matches!(err, NetworkError::Api { status: 500, .. }));
    }
}
