//! Synthetic environmental sensor data for the vineyard monitoring testbed.
//!
//! The [`simulation`] engine maps any instant in the vineyard's civil time to
//! plausible air temperature, humidity, light, soil temperature, wind speed
//! and soil moisture readings. The [`generator`] drivers turn those readings
//! into line-protocol points, either as a backfill file or as a live stream
//! into a [`sink`].

#[cfg(feature = "calibration")]
pub mod calibration;
pub mod config;
pub mod error;
pub mod generator;
pub mod simulation;
pub mod sink;
pub mod telemetry;

pub use error::{SimResult, SimulationError};
