//! Persisted stop and line records, as served by the data collaborator.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{Coordinate, DomainError, Line, Stop, StopId};

/// A stop as stored upstream.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StopRecord {
    pub id: i64,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl StopRecord {
    /// Validate into a domain stop.
    pub fn to_stop(&self) -> Result<Stop, DomainError> {
        let coord = Coordinate::new(self.lat, self.lng)?;
        Ok(Stop::new(StopId(self.id), self.name.clone(), coord))
    }
}

/// A line as stored upstream: a code and two directions of stop ids.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRecord {
    pub number: String,
    #[serde(default)]
    pub direction1_stops: Vec<i64>,
    #[serde(default)]
    pub direction2_stops: Vec<i64>,
}

impl LineRecord {
    /// Validate into a domain line. Stop ids are not resolved here.
    pub fn to_line(&self) -> Result<Line, DomainError> {
        Line::new(
            &self.number,
            self.direction1_stops.iter().copied().map(StopId).collect(),
            self.direction2_stops.iter().copied().map(StopId).collect(),
        )
    }
}

/// Convert stop records, dropping (and logging) the ones that don't validate.
pub fn stops_from_records(records: &[StopRecord]) -> Vec<Stop> {
    records
        .iter()
        .filter_map(|r| match r.to_stop() {
            Ok(stop) => Some(stop),
            Err(e) => {
                warn!(stop_id = r.id, error = %e, "Dropping stop record");
                None
            }
        })
        .collect()
}

/// Convert line records, dropping (and logging) the ones that don't validate.
pub fn lines_from_records(records: &[LineRecord]) -> Vec<Line> {
    records
        .iter()
        .filter_map(|r| match r.to_line() {
            Ok(line) => Some(line),
            Err(e) => {
                warn!(line = %r.number, error = %e, "Dropping line record");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Direction;

    #[test]
    fn line_record_wire_format() {
        let json = r#"{"number": "12", "direction1Stops": [1, 2, 3], "direction2Stops": [3, 1]}"#;
        let record: LineRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.number, "12");
        assert_eq!(record.direction1_stops, vec![1, 2, 3]);
        assert_eq!(record.direction2_stops, vec![3, 1]);

        let back = serde_json::to_value(&record).unwrap();
        assert!(back.get("direction1Stops").is_some());
    }

    #[test]
    fn line_record_missing_direction_defaults_empty() {
        let record: LineRecord =
            serde_json::from_str(r#"{"number": "3", "direction1Stops": [5]}"#).unwrap();
        assert!(record.direction2_stops.is_empty());
    }

    #[test]
    fn stop_record_wire_format() {
        let json = r#"{"id": 4, "name": "Republic Square", "lat": 40.1777, "lng": 44.5126}"#;
        let record: StopRecord = serde_json::from_str(json).unwrap();
        let stop = record.to_stop().unwrap();

        assert_eq!(stop.id, StopId(4));
        assert_eq!(stop.name, "Republic Square");
        assert_eq!(stop.coord.lat(), 40.1777);
    }

    #[test]
    fn invalid_records_are_dropped() {
        let stops = vec![
            StopRecord {
                id: 1,
                name: "Ok".into(),
                lat: 40.0,
                lng: 44.0,
            },
            StopRecord {
                id: 2,
                name: "Off the map".into(),
                lat: 140.0,
                lng: 44.0,
            },
        ];
        let converted = stops_from_records(&stops);
        assert_eq!(converted.len(), 1);
        assert_eq!(converted[0].id, StopId(1));

        let lines = vec![
            LineRecord {
                number: "".into(),
                direction1_stops: vec![1],
                direction2_stops: vec![],
            },
            LineRecord {
                number: "8".into(),
                direction1_stops: vec![1, 2],
                direction2_stops: vec![2, 1],
            },
        ];
        let converted = lines_from_records(&lines);
        assert_eq!(converted.len(), 1);
        assert_eq!(converted[0].stops(Direction::Inbound), &[StopId(2), StopId(1)]);
    }
}
