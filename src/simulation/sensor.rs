//! # Virtual Sensors
//!
//! A [`VirtualSensor`] binds a stable identifier and output field to one
//! calibrated [`SensorModel`] and its own [`NoiseInjector`].

use chrono::{DateTime, FixedOffset};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

use super::models::{
    HumidityParams, LightParams, SensorModel, SoilMoistureParams, SoilTemperatureParams,
    TemperatureParams, WindSpeedParams,
};
use super::noise::NoiseInjector;
use super::time::{CivilOffset, TimeContext};
use crate::error::SimResult;

/// Anything that yields one reading per instant
pub trait Sensor: Send {
    /// Stable identifier, e.g. `v_temp_1`
    fn id(&self) -> &str;

    /// Name of the field the reading is stored under, e.g. `temperature`
    fn field(&self) -> &str;

    fn get_value(&mut self, instant: &DateTime<FixedOffset>) -> SimResult<f64>;
}

/// Declarative description of one sensor, as found in configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSpec {
    pub id: String,
    pub field: String,
    #[serde(flatten)]
    pub model: SensorModel,
}

impl SensorSpec {
    pub fn new(id: impl Into<String>, field: impl Into<String>, model: SensorModel) -> Self {
        Self {
            id: id.into(),
            field: field.into(),
            model,
        }
    }
}

/// The six calibrated sensors of the vineyard testbed, in registration order
pub fn vineyard_sensors() -> Vec<SensorSpec> {
    vec![
        SensorSpec::new(
            "v_temp_1",
            "temperature",
            SensorModel::Temperature(TemperatureParams::default()),
        ),
        SensorSpec::new(
            "v_humidity_1",
            "humidity",
            SensorModel::Humidity(HumidityParams::default()),
        ),
        SensorSpec::new(
            "v_light_1",
            "light_intensity",
            SensorModel::Light(LightParams::default()),
        ),
        SensorSpec::new(
            "v_soil_temp_1",
            "soil_temperature",
            SensorModel::SoilTemperature(SoilTemperatureParams::default()),
        ),
        SensorSpec::new(
            "v_wind_1",
            "wind_speed",
            SensorModel::WindSpeed(WindSpeedParams::default()),
        ),
        SensorSpec::new(
            "v_soil_moisture_1",
            "soil_moisture",
            SensorModel::SoilMoisture(SoilMoistureParams::default()),
        ),
    ]
}

#[derive(Debug)]
pub struct VirtualSensor {
    id: String,
    field: String,
    model: SensorModel,
    offset: CivilOffset,
    noise: NoiseInjector,
}

impl VirtualSensor {
    pub fn new(spec: SensorSpec, offset: CivilOffset, noise: NoiseInjector) -> SimResult<Self> {
        spec.model.validate()?;
        Ok(Self {
            id: spec.id,
            field: spec.field,
            model: spec.model,
            offset,
            noise,
        })
    }

    pub fn model(&self) -> &SensorModel {
        &self.model
    }
}

impl Sensor for VirtualSensor {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self) -> &str {
        &self.field
    }

    fn get_value(&mut self, instant: &DateTime<FixedOffset>) -> SimResult<f64> {
        let ctx = TimeContext::derive(instant, self.offset)?;
        let raw = self.model.raw_value(&ctx)?;
        let noisy = self.noise.perturb(raw, self.model.noise_std_dev_at(&ctx))?;
        Ok(self.model.clamp().apply(noisy))
    }
}

/// Build sensors in spec order. With a seed, each sensor's seed is drawn from
/// a parent generator seeded with it, so nearby run seeds share no streams.
pub fn build_sensors(
    specs: &[SensorSpec],
    offset: CivilOffset,
    seed: Option<u64>,
) -> SimResult<Vec<Box<dyn Sensor>>> {
    let mut parent = seed.map(StdRng::seed_from_u64);
    specs
        .iter()
        .map(|spec| {
            let noise = NoiseInjector::new(parent.as_mut().map(|rng| rng.next_u64()));
            VirtualSensor::new(spec.clone(), offset, noise).map(|s| Box::new(s) as Box<dyn Sensor>)
        })
        .collect()
}
