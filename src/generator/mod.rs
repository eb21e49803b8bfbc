//! # Measurement Generation
//!
//! Drives registered sensors over time and turns readings into line-protocol
//! points.
//!
//! - [`BatchGenerator`] walks a closed range at a fixed step and writes one
//!   line per (sensor, timestep) for backfilling a store.
//! - [`StreamingGenerator`] fires on a fixed wall-clock cadence and pushes
//!   each reading to a [`PointSink`](crate::sink::PointSink).
//!
//! Within one timestep sensors are read in registration order; timestamps
//! strictly increase across timesteps.

pub mod batch;
pub mod stream;

pub use batch::{BatchError, BatchGenerator, BatchSummary};
pub use stream::{StreamSummary, StreamingGenerator, TickReport};

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::error::{SimResult, SimulationError};
use crate::simulation::Sensor;

/// Measurement name used by the vineyard store
pub const DEFAULT_MEASUREMENT: &str = "env_data";

/// One reading of one sensor at one instant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub sensor_id: String,
    pub field: String,
    pub value: f64,
    pub timestamp: DateTime<FixedOffset>,
}

impl Measurement {
    pub fn unix_nanos(&self) -> SimResult<i64> {
        self.timestamp.timestamp_nanos_opt().ok_or_else(|| {
            SimulationError::TimestampOutOfRange(self.timestamp.to_rfc3339())
        })
    }

    /// `<measurement>,sensor_id=<id> <field>=<value:.6> <unix_ns>` without trailing newline
    pub fn to_line_protocol(&self, measurement: &str) -> SimResult<String> {
        Ok(format!(
            "{},sensor_id={} {}={:.6} {}",
            escape_measurement(measurement),
            escape_key(&self.sensor_id),
            escape_key(&self.field),
            self.value,
            self.unix_nanos()?
        ))
    }
}

fn escape_measurement(raw: &str) -> String {
    raw.replace(',', "\\,").replace(' ', "\\ ")
}

/// Tag keys, tag values and field keys escape commas, spaces and equals signs
fn escape_key(raw: &str) -> String {
    raw.replace(',', "\\,")
        .replace('=', "\\=")
        .replace(' ', "\\ ")
}

/// Read every sensor once at `instant`, in registration order
pub fn sample_all(
    sensors: &mut [Box<dyn Sensor>],
    instant: &DateTime<FixedOffset>,
) -> SimResult<Vec<Measurement>> {
    sensors
        .iter_mut()
        .map(|sensor| {
            Ok(Measurement {
                sensor_id: sensor.id().to_string(),
                field: sensor.field().to_string(),
                value: sensor.get_value(instant)?,
                timestamp: *instant,
            })
        })
        .collect()
}
