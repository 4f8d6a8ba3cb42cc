//! Two small HTTP services sharing one crate:
//!
//! - a weather aggregator (geocoding, current conditions, air quality and an
//!   AI-written summary), rendered as HTML or JSON;
//! - a token-guarded CRUD router over the company database.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod weather;
