//! Batch backfill over a closed time range.

use chrono::{DateTime, Duration, FixedOffset};
use serde::Serialize;
use std::io::Write;
use thiserror::Error;
use tracing::{debug, info};

use super::{sample_all, DEFAULT_MEASUREMENT};
use crate::error::SimulationError;
use crate::simulation::{CivilOffset, Sensor, Timeline};

#[derive(Debug, Error)]
pub enum BatchError {
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error("Failed to write measurement line: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of one batch run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub timesteps: usize,
    pub lines: usize,
    pub first: Option<DateTime<FixedOffset>>,
    pub last: Option<DateTime<FixedOffset>>,
}

pub struct BatchGenerator {
    sensors: Vec<Box<dyn Sensor>>,
    offset: CivilOffset,
    step: Duration,
    measurement: String,
}

impl BatchGenerator {
    /// Hourly generator writing `env_data` points
    pub fn new(sensors: Vec<Box<dyn Sensor>>, offset: CivilOffset) -> Self {
        Self {
            sensors,
            offset,
            step: Duration::minutes(60),
            measurement: DEFAULT_MEASUREMENT.to_string(),
        }
    }

    pub fn with_step(mut self, step: Duration) -> Self {
        self.step = step;
        self
    }

    pub fn with_measurement(mut self, measurement: impl Into<String>) -> Self {
        self.measurement = measurement.into();
        self
    }

    pub fn sensor_count(&self) -> usize {
        self.sensors.len()
    }

    /// Generate every timestep in `[start, end]` and append one line per reading to `out`
    ///
    /// Fails on the first reading that cannot be computed; lines already
    /// written stay in `out`.
    pub fn run<W: Write>(
        &mut self,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
        out: &mut W,
    ) -> Result<BatchSummary, BatchError> {
        let timeline = Timeline::new(start, end, self.step, self.offset)?;

        info!(
            start = %start.to_rfc3339(),
            end = %end.to_rfc3339(),
            step_minutes = self.step.num_minutes(),
            sensors = self.sensors.len(),
            "starting batch generation"
        );

        let mut summary = BatchSummary {
            timesteps: 0,
            lines: 0,
            first: None,
            last: None,
        };

        for instant in timeline {
            for point in sample_all(&mut self.sensors, &instant)? {
                writeln!(out, "{}", point.to_line_protocol(&self.measurement)?)?;
                summary.lines += 1;
            }

            summary.timesteps += 1;
            summary.first.get_or_insert(instant);
            summary.last = Some(instant);

            if summary.timesteps % 1000 == 0 {
                debug!(timesteps = summary.timesteps, at = %instant.to_rfc3339(), "batch progress");
            }
        }

        out.flush()?;

        info!(
            timesteps = summary.timesteps,
            lines = summary.lines,
            "batch generation complete"
        );

        Ok(summary)
    }
}
