//! Bus route planner server.
//!
//! A web application that answers: "which buses take me from here to
//! there?" Coordinates are resolved to nearby stops, and the shortest
//! route over the bus network is returned stop by stop with the lines
//! serving each hop.

pub mod cache;
pub mod config;
pub mod domain;
pub mod network;
pub mod planner;
pub mod web;
