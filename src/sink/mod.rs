//! Destinations for streamed measurements.

pub mod influxdb;

pub use influxdb::InfluxDbSink;

use async_trait::async_trait;
use thiserror::Error;

use crate::error::SimulationError;
use crate::generator::Measurement;

/// Errors from pushing one point to a store
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Sink write failed: {0}")]
    WriteFailure(String),

    #[error("Sink rejected point with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Point could not be encoded: {0}")]
    Encode(#[from] SimulationError),
}

/// Accepts one measurement per call
#[async_trait]
pub trait PointSink: Send + Sync {
    async fn write_point(&self, point: &Measurement) -> Result<(), SinkError>;
}
