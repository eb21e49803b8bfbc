//! # Sensor Simulation Engine
//!
//! Produces plausible vineyard environment readings for any instant.
//!
//! ## Components
//!
//! - **Time**: canonical civil offset and per-instant decomposition
//! - **Models**: deterministic temperature, humidity, light, soil temperature,
//!   wind speed and soil moisture models with calibrated parameters
//! - **Noise**: per-sensor Gaussian noise source, seedable for reproducible runs
//! - **Sensor**: model + noise bound to a stable sensor id, with range clamping
//!
//! ## Usage
//!
//! ```rust
//! use vineyard_sensor_sim::simulation::{build_sensors, vineyard_sensors, CivilOffset, Sensor};
//!
//! let offset = CivilOffset::default(); // UTC+8
//! let mut sensors = build_sensors(&vineyard_sensors(), offset, Some(42)).unwrap();
//!
//! let now = offset.now();
//! for sensor in sensors.iter_mut() {
//!     let value = sensor.get_value(&now).unwrap();
//!     println!("{} {}={value:.6}", sensor.id(), sensor.field());
//! }
//! ```

pub mod models;
pub mod noise;
pub mod sensor;
pub mod time;

pub use models::{
    harmonic_basis, Clamp, CoefficientSet, HumidityParams, LightParams, SensorKind, SensorModel,
    SoilMoistureParams, SoilTemperatureParams, TemperatureParams, WindSpeedParams,
};
pub use noise::NoiseInjector;
pub use sensor::{build_sensors, vineyard_sensors, Sensor, SensorSpec, VirtualSensor};
pub use time::{step_from_minutes, CivilOffset, TimeContext, Timeline, DEFAULT_UTC_OFFSET_HOURS};
