//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, InvalidCoordinate, Itinerary, LineId, Stop};
use crate::planner::PlanOutcome;

/// Request to plan a route between two points.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRouteRequest {
    pub start_lat: f64,
    pub start_lng: f64,
    pub end_lat: f64,
    pub end_lng: f64,
}

impl PlanRouteRequest {
    /// Validate both points.
    pub fn coordinates(&self) -> Result<(Coordinate, Coordinate), InvalidCoordinate> {
        Ok((
            Coordinate::new(self.start_lat, self.start_lng)?,
            Coordinate::new(self.end_lat, self.end_lng)?,
        ))
    }
}

/// Request for the stop closest to a point.
#[derive(Debug, Deserialize)]
pub struct NearestStopRequest {
    pub lat: f64,
    pub lng: f64,
}

impl NearestStopRequest {
    pub fn coordinate(&self) -> Result<Coordinate, InvalidCoordinate> {
        Coordinate::new(self.lat, self.lng)
    }
}

/// The closest stop and how far away it is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearestStopResponse {
    pub id: i64,
    pub name: String,
    pub lat: f64,
    pub lng: f64,

    /// Meters from the requested point
    pub distance: f64,
}

impl NearestStopResponse {
    pub fn new(stop: &Stop, distance_m: f64) -> Self {
        Self {
            id: stop.id.0,
            name: stop.name.clone(),
            lat: stop.coord.lat(),
            lng: stop.coord.lng(),
            distance: distance_m,
        }
    }
}

/// A boundary stop in a route response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopView {
    pub id: i64,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl StopView {
    pub fn from_stop(stop: &Stop) -> Self {
        Self {
            id: stop.id.0,
            name: stop.name.clone(),
            lat: stop.coord.lat(),
            lng: stop.coord.lng(),
        }
    }
}

/// One stop along the route and the lines serving it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentView {
    pub stop_id: i64,
    pub lat: f64,
    pub lng: f64,

    /// Comma-joined line identifiers, e.g. `"12/outbound, 7/inbound"`
    pub lines: String,
}

/// Response for route planning.
///
/// An empty `segments` list means no known route; `start` and `end` are then
/// the stops nearest to the requested points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanRouteResponse {
    pub start: StopView,
    pub end: StopView,
    pub segments: Vec<SegmentView>,
}

impl PlanRouteResponse {
    pub fn from_outcome(outcome: &PlanOutcome) -> Self {
        Self {
            start: StopView::from_stop(&outcome.start),
            end: StopView::from_stop(&outcome.end),
            segments: outcome
                .itinerary
                .as_ref()
                .map(segments_from_itinerary)
                .unwrap_or_default(),
        }
    }
}

/// One segment per stop. Each stop carries the lines of the hop leaving it;
/// the final stop carries the lines of the hop that reached it.
fn segments_from_itinerary(itinerary: &Itinerary) -> Vec<SegmentView> {
    let hops = itinerary.hops();

    itinerary
        .stops()
        .iter()
        .enumerate()
        .map(|(i, stop)| {
            let hop = hops.get(i).or_else(|| i.checked_sub(1).and_then(|p| hops.get(p)));
            SegmentView {
                stop_id: stop.id.0,
                lat: stop.coord.lat(),
                lng: stop.coord.lng(),
                lines: hop.map(|h| join_lines(&h.lines)).unwrap_or_default(),
            }
        })
        .collect()
}

fn join_lines(lines: &[LineId]) -> String {
    lines
        .iter()
        .map(LineId::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Direction, Hop, StopId};
    use crate::planner::Combination;

    fn stop(id: i64, lng: f64) -> Stop {
        Stop::new(StopId(id), format!("Stop {id}"), Coordinate::new(0.0, lng).unwrap())
    }

    fn hop(from: i64, to: i64, lines: &[(&str, Direction)]) -> Hop {
        Hop {
            from: StopId(from),
            to: StopId(to),
            lines: lines.iter().map(|(c, d)| LineId::new(*c, *d)).collect(),
            distance_km: 1.0,
        }
    }

    #[test]
    fn request_wire_format() {
        let req: PlanRouteRequest = serde_json::from_str(
            r#"{"startLat": 40.1, "startLng": 44.5, "endLat": 40.2, "endLng": 44.6}"#,
        )
        .unwrap();
        let (from, to) = req.coordinates().unwrap();
        assert_eq!(from.lat(), 40.1);
        assert_eq!(to.lng(), 44.6);
    }

    #[test]
    fn request_rejects_non_numeric() {
        let result = serde_json::from_str::<PlanRouteRequest>(
            r#"{"startLat": "north", "startLng": 44.5, "endLat": 40.2, "endLng": 44.6}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn request_rejects_out_of_range() {
        let req = PlanRouteRequest {
            start_lat: 0.0,
            start_lng: 0.0,
            end_lat: 95.0,
            end_lng: 0.0,
        };
        assert!(req.coordinates().is_err());
    }

    #[test]
    fn nearest_request_wire_format() {
        let req: NearestStopRequest =
            serde_json::from_str(r#"{"lat": 40.18, "lng": 44.51}"#).unwrap();
        let at = req.coordinate().unwrap();
        assert_eq!(at.lat(), 40.18);
        assert_eq!(at.lng(), 44.51);

        let out_of_range = NearestStopRequest {
            lat: -91.0,
            lng: 0.0,
        };
        assert!(out_of_range.coordinate().is_err());
    }

    #[test]
    fn nearest_response_wire_format() {
        let json = serde_json::to_value(NearestStopResponse::new(&stop(7, 0.5), 12.5)).unwrap();

        assert_eq!(json["id"], 7);
        assert_eq!(json["name"], "Stop 7");
        assert_eq!(json["lng"], 0.5);
        assert_eq!(json["distance"], 12.5);
    }

    #[test]
    fn segments_carry_hop_lines() {
        let itinerary = Itinerary::new(
            vec![stop(1, 0.0), stop(2, 0.01), stop(3, 0.02)],
            vec![
                hop(1, 2, &[("5", Direction::Outbound), ("9", Direction::Inbound)]),
                hop(2, 3, &[("5", Direction::Outbound)]),
            ],
        )
        .unwrap();

        let outcome = PlanOutcome {
            start: stop(1, 0.0),
            end: stop(3, 0.02),
            itinerary: Some(itinerary),
            combination: Some(Combination::NearestNearest),
        };
        let response = PlanRouteResponse::from_outcome(&outcome);

        let lines: Vec<_> = response.segments.iter().map(|s| s.lines.as_str()).collect();
        assert_eq!(lines, vec!["5/outbound, 9/inbound", "5/outbound", "5/outbound"]);
        assert_eq!(response.start.id, 1);
        assert_eq!(response.end.id, 3);
    }

    #[test]
    fn no_itinerary_means_no_segments() {
        let outcome = PlanOutcome {
            start: stop(1, 0.0),
            end: stop(2, 0.01),
            itinerary: None,
            combination: None,
        };
        let response = PlanRouteResponse::from_outcome(&outcome);

        assert!(response.segments.is_empty());
        assert_eq!(response.start.name, "Stop 1");
    }

    #[test]
    fn response_wire_format() {
        let response = PlanRouteResponse {
            start: StopView {
                id: 1,
                name: "A".into(),
                lat: 0.0,
                lng: 0.0,
            },
            end: StopView {
                id: 2,
                name: "B".into(),
                lat: 0.0,
                lng: 1.0,
            },
            segments: vec![SegmentView {
                stop_id: 1,
                lat: 0.0,
                lng: 0.0,
                lines: "1/outbound".into(),
            }],
        };
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["segments"][0]["stopId"], 1);
        assert_eq!(json["segments"][0]["lines"], "1/outbound");
        assert_eq!(json["end"]["name"], "B");
    }
}
