//! Loading of persisted stops and lines.
//!
//! The planner owns no storage: every request pulls the current stop and
//! line records from a [`NetworkSource`] (an HTTP data service, a directory
//! of JSON files, or fixed in-memory records) and builds its graph from them.

mod client;
mod error;
mod file;
mod records;
mod source;

pub use client::{NetworkClient, NetworkClientConfig};
pub use error::NetworkError;
pub use file::{FileNetwork, LINES_FILE, STOPS_FILE};
pub use records::{LineRecord, StopRecord, lines_from_records, stops_from_records};
pub use source::{Backend, NetworkSnapshot, NetworkSource, StaticNetwork, load_snapshot};
