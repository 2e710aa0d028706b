//! Network data served from JSON files on disk.
//!
//! Useful for development and fixtures without a running data service.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use super::error::NetworkError;
use super::records::{LineRecord, StopRecord};

/// File name holding the stop records.
pub const STOPS_FILE: &str = "stops.json";

/// File name holding the line records.
pub const LINES_FILE: &str = "lines.json";

/// Reads `stops.json` and `lines.json` from a directory on every load.
#[derive(Debug, Clone)]
pub struct FileNetwork {
    dir: PathBuf,
}

impl FileNetwork {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub async fn read_stops(&self) -> Result<Vec<StopRecord>, NetworkError> {
        read_json(&self.dir.join(STOPS_FILE)).await
    }

    pub async fn read_lines(&self) -> Result<Vec<LineRecord>, NetworkError> {
        read_json(&self.dir.join(LINES_FILE)).await
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, NetworkError> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| NetworkError::Io {
            path: path.display().to_string(),
            source,
        })?;

    serde_json::from_str(&json).map_err(|e| NetworkError::Json {
        message: format!("{}: {}", path.display(), e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_both_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(STOPS_FILE),
            r#"[{"id": 1, "name": "Opera", "lat": 40.186, "lng": 44.515}]"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join(LINES_FILE),
            r#"[{"number": "1", "direction1Stops": [1], "direction2Stops": []}]"#,
        )
        .unwrap();

        let network = FileNetwork::new(dir.path());
        let stops = network.read_stops().await.unwrap();
        let lines = network.read_lines().await.unwrap();

        assert_eq!(stops.len(), 1);
        assert_eq!(stops[0].name, "Opera");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].direction1_stops, vec![1]);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let network = FileNetwork::new(dir.path());

        let err = network.read_stops().await.unwrap_err();
        assert!(matches!(err, NetworkError::Io { .. }));
        assert!(err.to_string().contains(STOPS_FILE));
    }

    #[tokio::test]
    async fn malformed_file_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(LINES_FILE), "not json").unwrap();

        let network = FileNetwork::new(dir.path());
        assert!(matches!(
            network.read_lines().await,
            Err(NetworkError::Json { .. })
        ));
    }
}
