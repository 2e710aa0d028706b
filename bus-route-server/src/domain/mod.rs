//! Domain types for the bus route planner.
//!
//! This module contains the core domain model types that represent
//! validated network data. All types enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity.

mod error;
pub mod geo;
mod itinerary;
mod line;
mod stop;

pub use error::DomainError;
pub use geo::{Coordinate, InvalidCoordinate};
pub use itinerary::{Hop, Itinerary};
pub use line::{Direction, Line, LineId};
pub use stop::{Stop, StopId};
