//! InfluxDB v2 HTTP writer.
//!
//! Each point is posted as a single line-protocol line with nanosecond
//! precision to `/api/v2/write`.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use std::time::Duration;
use tracing::debug;

use super::{PointSink, SinkError};
use crate::config::InfluxDbConfig;
use crate::generator::Measurement;

#[derive(Clone)]
pub struct InfluxDbSink {
    client: reqwest::Client,
    write_url: String,
    org: String,
    bucket: String,
    measurement: String,
}

impl InfluxDbSink {
    pub fn new(cfg: &InfluxDbConfig, measurement: impl Into<String>) -> Result<Self, SinkError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static("vineyard-sensor-sim/0.2"),
        );
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        let mut auth = HeaderValue::from_str(&format!("Token {}", cfg.token))
            .map_err(|e| SinkError::WriteFailure(format!("invalid token header: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_seconds.max(1)))
            .default_headers(headers)
            .build()
            .map_err(|e| SinkError::WriteFailure(e.to_string()))?;

        Ok(Self {
            client,
            write_url: format!("{}/api/v2/write", cfg.url.trim_end_matches('/')),
            org: cfg.org.clone(),
            bucket: cfg.bucket.clone(),
            measurement: measurement.into(),
        })
    }
}

#[async_trait]
impl PointSink for InfluxDbSink {
    async fn write_point(&self, point: &Measurement) -> Result<(), SinkError> {
        let line = point.to_line_protocol(&self.measurement)?;

        let resp = self
            .client
            .post(&self.write_url)
            .query(&[
                ("org", self.org.as_str()),
                ("bucket", self.bucket.as_str()),
                ("precision", "ns"),
            ])
            .body(line)
            .send()
            .await
            .map_err(|e| SinkError::WriteFailure(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SinkError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        debug!(sensor_id = %point.sensor_id, field = %point.field, "point written");
        Ok(())
    }
}
