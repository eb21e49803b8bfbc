//! # Soil Moisture Calibration
//!
//! Offline least-squares fit of the five harmonic coefficients used by the
//! soil moisture model. The model is linear in β, so the fit is a direct
//! SVD solve of the design matrix built from [`harmonic_basis`].
//!
//! The fitted [`CoefficientSet`] is copied into configuration by hand; this
//! module is never on the generation path.

use chrono::NaiveDateTime;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::simulation::{harmonic_basis, CivilOffset, CoefficientSet, TimeContext};

/// Timestamp layout of the probe export, e.g. `2024-01-01T00:00`
pub const PROBE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

const COEFFICIENTS: usize = 5;

#[derive(Debug, Error)]
pub enum CalibrationError {
    #[error("Insufficient data: {0} observations, at least 5 are required")]
    InsufficientData(usize),

    #[error("Least-squares fit did not converge: {0}")]
    DidNotConverge(String),

    #[error("Invalid calibration input: {0}")]
    Input(String),
}

/// One moisture reading at a continuous time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub hours_since_epoch: f64,
    pub moisture: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalibrationReport {
    pub coefficients: CoefficientSet,
    pub observations: usize,
    pub rms_residual: f64,
}

#[derive(Debug, Deserialize)]
struct ProbeRow {
    time: String,
    soil_moisture: f64,
}

/// Read `time,soil_moisture` rows; naive times are taken in `offset`
pub fn read_observations<R: Read>(
    reader: R,
    offset: CivilOffset,
) -> Result<Vec<Observation>, CalibrationError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut observations = Vec::new();

    for (line, row) in rdr.deserialize::<ProbeRow>().enumerate() {
        let row = row.map_err(|e| CalibrationError::Input(e.to_string()))?;
        let instant = match NaiveDateTime::parse_from_str(row.time.trim(), PROBE_TIME_FORMAT) {
            Ok(naive) => offset.localize(naive),
            Err(_) => offset.parse_instant(row.time.trim()),
        }
        .map_err(|e| CalibrationError::Input(format!("row {}: {e}", line + 1)))?;

        let ctx = TimeContext::derive(&instant, offset)
            .map_err(|e| CalibrationError::Input(format!("row {}: {e}", line + 1)))?;

        observations.push(Observation {
            hours_since_epoch: ctx.hours_since_epoch,
            moisture: row.soil_moisture,
        });
    }

    Ok(observations)
}

pub fn load_observations(
    path: &Path,
    offset: CivilOffset,
) -> Result<Vec<Observation>, CalibrationError> {
    let file = std::fs::File::open(path)
        .map_err(|e| CalibrationError::Input(format!("{}: {e}", path.display())))?;
    read_observations(file, offset)
}

/// Fit β0..β4 minimising the squared residuals of the harmonic model
pub fn fit_harmonic(observations: &[Observation]) -> Result<CalibrationReport, CalibrationError> {
    let n = observations.len();
    if n < COEFFICIENTS {
        return Err(CalibrationError::InsufficientData(n));
    }
    if let Some(bad) = observations
        .iter()
        .find(|o| !o.hours_since_epoch.is_finite() || !o.moisture.is_finite())
    {
        return Err(CalibrationError::Input(format!(
            "non-finite observation {bad:?}"
        )));
    }

    let design = DMatrix::from_row_iterator(
        n,
        COEFFICIENTS,
        observations
            .iter()
            .flat_map(|o| harmonic_basis(o.hours_since_epoch)),
    );
    let target = DVector::from_iterator(n, observations.iter().map(|o| o.moisture));

    let svd = design.clone().svd(true, true);
    let tolerance = svd.singular_values.max() * 1e-10;
    let rank = svd.rank(tolerance);
    if rank < COEFFICIENTS {
        return Err(CalibrationError::DidNotConverge(format!(
            "design matrix has rank {rank}, observations do not span both cycles"
        )));
    }

    let beta = svd
        .solve(&target, tolerance)
        .map_err(|e| CalibrationError::DidNotConverge(e.to_string()))?;
    if beta.iter().any(|b| !b.is_finite()) {
        return Err(CalibrationError::DidNotConverge(
            "solution is not finite".to_string(),
        ));
    }

    let residuals = &design * &beta - &target;
    let rms_residual = (residuals.norm_squared() / n as f64).sqrt();

    let coefficients = CoefficientSet([beta[0], beta[1], beta[2], beta[3], beta[4]]);

    info!(
        observations = n,
        beta0 = coefficients.0[0],
        beta1 = coefficients.0[1],
        beta2 = coefficients.0[2],
        beta3 = coefficients.0[3],
        beta4 = coefficients.0[4],
        rms_residual,
        "soil moisture calibration complete"
    );

    Ok(CalibrationReport {
        coefficients,
        observations: n,
        rms_residual,
    })
}
