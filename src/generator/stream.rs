//! Live streaming at a fixed wall-clock cadence.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::sample_all;
use crate::error::SimResult;
use crate::simulation::{CivilOffset, Sensor};
use crate::sink::PointSink;

/// Delivery result of a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TickReport {
    pub written: usize,
    pub failed: usize,
}

/// Totals across a streaming run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StreamSummary {
    pub ticks: u64,
    pub written: u64,
    pub failed: u64,
}

impl StreamSummary {
    fn absorb(&mut self, report: TickReport) {
        self.ticks += 1;
        self.written += report.written as u64;
        self.failed += report.failed as u64;
    }
}

pub struct StreamingGenerator {
    sensors: Vec<Box<dyn Sensor>>,
    offset: CivilOffset,
    cadence: Duration,
    sink: Arc<dyn PointSink>,
}

impl StreamingGenerator {
    /// Generator firing every 5 seconds
    pub fn new(
        sensors: Vec<Box<dyn Sensor>>,
        offset: CivilOffset,
        sink: Arc<dyn PointSink>,
    ) -> Self {
        Self {
            sensors,
            offset,
            cadence: Duration::from_secs(5),
            sink,
        }
    }

    pub fn with_cadence(mut self, cadence: Duration) -> Self {
        self.cadence = cadence.max(Duration::from_millis(1));
        self
    }

    /// Tick until `cancel` fires. Cancellation is observed between ticks only.
    ///
    /// Sink failures are logged and counted; a reading that cannot be computed
    /// is a configuration bug and ends the run.
    pub async fn run(&mut self, cancel: CancellationToken) -> SimResult<StreamSummary> {
        let mut interval = tokio::time::interval(self.cadence);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut summary = StreamSummary::default();

        info!(
            cadence_ms = self.cadence.as_millis() as u64,
            sensors = self.sensors.len(),
            "starting streaming generation"
        );

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = interval.tick() => {}
            }

            let now = self.offset.now();
            let report = self.tick(now).await?;
            summary.absorb(report);
        }

        info!(
            ticks = summary.ticks,
            written = summary.written,
            failed = summary.failed,
            "streaming generation stopped"
        );
        Ok(summary)
    }

    /// Read every sensor at `now` and push each point to the sink
    pub async fn tick(&mut self, now: DateTime<FixedOffset>) -> SimResult<TickReport> {
        let points = sample_all(&mut self.sensors, &now)?;
        let mut report = TickReport::default();

        for point in &points {
            match self.sink.write_point(point).await {
                Ok(()) => report.written += 1,
                Err(e) => {
                    warn!(sensor_id = %point.sensor_id, error = %e, "sink write failed");
                    report.failed += 1;
                }
            }
        }

        debug!(
            at = %now.to_rfc3339(),
            written = report.written,
            failed = report.failed,
            "tick complete"
        );
        Ok(report)
    }
}
