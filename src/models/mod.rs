//! Domain models.
//!
//! ## Weather
//!
//! - [`Coordinates`]: a geocoded city.
//! - [`WeatherReading`]: current conditions plus air quality at those coordinates.
//! - [`WeatherReport`]: everything a renderer needs for one city.
//!
//! ## Company database
//!
//! Flat rows over the three company tables, with their create/update inputs:
//! [`Employee`], [`Department`], [`Project`].

mod department;
mod employee;
mod project;
mod weather;

pub use department::*;
pub use employee::*;
pub use project::*;
pub use weather::*;
