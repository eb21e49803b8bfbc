//! # Sensor Models
//!
//! Deterministic value models for each vineyard quantity. A model maps a
//! [`TimeContext`] and its calibrated parameters to a raw value before noise.
//!
//! - **Temperature / soil temperature**: daily and yearly cosines around a mean
//! - **Humidity**: daily cosine around a mean
//! - **Light**: raised-cosine bell between sunrise and sunset, zero at night
//! - **Wind speed**: monthly mean lookup plus a daily sine
//! - **Soil moisture**: harmonic regression over continuous hours since 2000

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use strum::{AsRefStr, Display, EnumString};

use super::time::TimeContext;
use crate::error::{SimResult, SimulationError};

/// Hours in one daily cycle
pub const DAILY_PERIOD_HOURS: f64 = 24.0;
/// Days in one seasonal cycle
pub const YEAR_DAYS: f64 = 365.25;
/// Hours in one yearly cycle (≈ 8766)
pub const YEARLY_PERIOD_HOURS: f64 = DAILY_PERIOD_HOURS * YEAR_DAYS;

/// Physical quantity a model produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum SensorKind {
    Temperature,
    Humidity,
    Light,
    SoilTemperature,
    WindSpeed,
    SoilMoisture,
}

/// Post-noise bounds applied to a sensor value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clamp {
    /// Value passes through unchanged
    None,
    /// `max(0, value)`
    NonNegative,
    /// `clamp(0, 1)`
    UnitInterval,
}

impl Clamp {
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            Clamp::None => value,
            Clamp::NonNegative => value.max(0.0),
            Clamp::UnitInterval => value.clamp(0.0, 1.0),
        }
    }
}

fn cosine_cycle(amplitude: f64, position: f64, peak: f64, period: f64) -> f64 {
    amplitude * (2.0 * PI * (position - peak) / period).cos()
}

/// Air temperature (°C)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureParams {
    pub t_mean: f64,
    pub a_diurnal: f64,
    /// Hour of the daily maximum
    pub t_max_diurnal: f64,
    pub a_seasonal: f64,
    /// Day of year of the seasonal maximum
    pub t_max_seasonal: f64,
    pub noise_std_dev: f64,
}

impl Default for TemperatureParams {
    fn default() -> Self {
        Self {
            t_mean: 10.0,
            a_diurnal: 7.0,
            t_max_diurnal: 13.0,
            a_seasonal: 6.0,
            t_max_seasonal: 215.0,
            noise_std_dev: 1.0,
        }
    }
}

impl TemperatureParams {
    pub fn evaluate(&self, ctx: &TimeContext) -> f64 {
        let diurnal = cosine_cycle(
            self.a_diurnal,
            ctx.hour_of_day,
            self.t_max_diurnal,
            DAILY_PERIOD_HOURS,
        );
        let seasonal = cosine_cycle(
            self.a_seasonal,
            ctx.day_of_year as f64,
            self.t_max_seasonal,
            YEAR_DAYS,
        );
        self.t_mean + diurnal + seasonal
    }
}

/// Relative humidity (%)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HumidityParams {
    pub h_mean: f64,
    pub a_diurnal: f64,
    pub t_max: f64,
    pub noise_std_dev: f64,
}

impl Default for HumidityParams {
    fn default() -> Self {
        Self {
            h_mean: 60.0,
            a_diurnal: 20.0,
            t_max: 4.0, // humid pre-dawn
            noise_std_dev: 5.0,
        }
    }
}

impl HumidityParams {
    pub fn evaluate(&self, ctx: &TimeContext) -> f64 {
        self.h_mean + cosine_cycle(self.a_diurnal, ctx.hour_of_day, self.t_max, DAILY_PERIOD_HOURS)
    }
}

/// Light intensity (lux-like units)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightParams {
    pub max_light: f64,
    pub sunrise: f64,
    pub sunset: f64,
    pub noise_std_dev: f64,
}

impl Default for LightParams {
    fn default() -> Self {
        Self {
            max_light: 1000.0,
            sunrise: 6.0,
            sunset: 18.0,
            noise_std_dev: 50.0,
        }
    }
}

impl LightParams {
    pub fn is_daylight(&self, ctx: &TimeContext) -> bool {
        ctx.hour_of_day >= self.sunrise && ctx.hour_of_day <= self.sunset
    }

    pub fn evaluate(&self, ctx: &TimeContext) -> f64 {
        if !self.is_daylight(ctx) {
            return 0.0;
        }
        let daylight_hours = self.sunset - self.sunrise;
        let x = 2.0 * PI * (ctx.hour_of_day - self.sunrise) / daylight_hours;
        self.max_light * (1.0 - x.cos()) / 2.0
    }
}

/// Soil temperature (°C); lags the air temperature's daily peak by `delta_t` hours
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilTemperatureParams {
    pub t_mean: f64,
    pub a_diurnal: f64,
    pub t_max_diurnal_air: f64,
    pub delta_t: f64,
    pub a_seasonal: f64,
    pub t_max_seasonal: f64,
    pub noise_std_dev: f64,
}

impl Default for SoilTemperatureParams {
    fn default() -> Self {
        Self {
            t_mean: 15.0,
            a_diurnal: 5.0,
            t_max_diurnal_air: 14.0,
            delta_t: 3.0,
            a_seasonal: 5.0,
            t_max_seasonal: 196.0,
            noise_std_dev: 1.0,
        }
    }
}

impl SoilTemperatureParams {
    pub fn evaluate(&self, ctx: &TimeContext) -> f64 {
        let diurnal = cosine_cycle(
            self.a_diurnal,
            ctx.hour_of_day,
            self.t_max_diurnal_air + self.delta_t,
            DAILY_PERIOD_HOURS,
        );
        let seasonal = cosine_cycle(
            self.a_seasonal,
            ctx.day_of_year as f64,
            self.t_max_seasonal,
            YEAR_DAYS,
        );
        self.t_mean + diurnal + seasonal
    }
}

/// Wind speed (mph)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindSpeedParams {
    /// Mean speed per calendar month, January first
    pub monthly_mean: Vec<f64>,
    pub a_diurnal: f64,
    pub t_max: f64,
    pub noise_std_dev: f64,
}

impl Default for WindSpeedParams {
    fn default() -> Self {
        Self {
            monthly_mean: vec![6.7, 6.9, 7.2, 7.5, 7.7, 7.9, 7.7, 7.3, 6.7, 6.4, 6.5, 7.0],
            a_diurnal: 2.5,
            t_max: 14.0,
            noise_std_dev: 1.0,
        }
    }
}

impl WindSpeedParams {
    pub fn monthly_mean(&self, month: u32) -> SimResult<f64> {
        month
            .checked_sub(1)
            .and_then(|idx| self.monthly_mean.get(idx as usize))
            .copied()
            .ok_or(SimulationError::UnknownCalendarMonth(month))
    }

    pub fn evaluate(&self, ctx: &TimeContext) -> SimResult<f64> {
        let mean = self.monthly_mean(ctx.month)?;
        let diurnal =
            self.a_diurnal * (2.0 * PI * (ctx.hour_of_day - self.t_max) / DAILY_PERIOD_HOURS).sin();
        Ok(mean + diurnal)
    }
}

/// Harmonic regression coefficients β0..β4 for soil moisture
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoefficientSet(pub [f64; 5]);

impl CoefficientSet {
    /// Coefficients fitted against the 2024 vineyard probe record
    pub const VINEYARD_2024: CoefficientSet =
        CoefficientSet([0.2843, -0.0011, 0.0004, 0.0227, -0.0722]);

    pub fn evaluate(&self, hours_since_epoch: f64) -> f64 {
        harmonic_basis(hours_since_epoch)
            .iter()
            .zip(self.0.iter())
            .map(|(basis, beta)| basis * beta)
            .sum()
    }
}

impl Default for CoefficientSet {
    fn default() -> Self {
        Self::VINEYARD_2024
    }
}

/// Regressors `[1, cos, sin (daily), cos, sin (yearly)]` at `t` hours
pub fn harmonic_basis(t: f64) -> [f64; 5] {
    let daily = 2.0 * PI * t / DAILY_PERIOD_HOURS;
    let yearly = 2.0 * PI * t / YEARLY_PERIOD_HOURS;
    [1.0, daily.cos(), daily.sin(), yearly.cos(), yearly.sin()]
}

/// Volumetric soil moisture, fraction in [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilMoistureParams {
    pub coefficients: CoefficientSet,
    pub noise_std_dev: f64,
}

impl Default for SoilMoistureParams {
    fn default() -> Self {
        Self {
            coefficients: CoefficientSet::default(),
            noise_std_dev: 0.05,
        }
    }
}

impl SoilMoistureParams {
    pub fn evaluate(&self, ctx: &TimeContext) -> f64 {
        self.coefficients.evaluate(ctx.hours_since_epoch)
    }
}

/// A calibrated model for one physical quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SensorModel {
    Temperature(TemperatureParams),
    Humidity(HumidityParams),
    Light(LightParams),
    SoilTemperature(SoilTemperatureParams),
    WindSpeed(WindSpeedParams),
    SoilMoisture(SoilMoistureParams),
}

impl SensorModel {
    pub fn kind(&self) -> SensorKind {
        match self {
            SensorModel::Temperature(_) => SensorKind::Temperature,
            SensorModel::Humidity(_) => SensorKind::Humidity,
            SensorModel::Light(_) => SensorKind::Light,
            SensorModel::SoilTemperature(_) => SensorKind::SoilTemperature,
            SensorModel::WindSpeed(_) => SensorKind::WindSpeed,
            SensorModel::SoilMoisture(_) => SensorKind::SoilMoisture,
        }
    }

    /// Model value before noise and clamping
    pub fn raw_value(&self, ctx: &TimeContext) -> SimResult<f64> {
        Ok(match self {
            SensorModel::Temperature(p) => p.evaluate(ctx),
            SensorModel::Humidity(p) => p.evaluate(ctx),
            SensorModel::Light(p) => p.evaluate(ctx),
            SensorModel::SoilTemperature(p) => p.evaluate(ctx),
            SensorModel::WindSpeed(p) => p.evaluate(ctx)?,
            SensorModel::SoilMoisture(p) => p.evaluate(ctx),
        })
    }

    /// Configured noise standard deviation
    pub fn noise_std_dev(&self) -> f64 {
        match self {
            SensorModel::Temperature(p) => p.noise_std_dev,
            SensorModel::Humidity(p) => p.noise_std_dev,
            SensorModel::Light(p) => p.noise_std_dev,
            SensorModel::SoilTemperature(p) => p.noise_std_dev,
            SensorModel::WindSpeed(p) => p.noise_std_dev,
            SensorModel::SoilMoisture(p) => p.noise_std_dev,
        }
    }

    /// Noise applied at this moment; darkness is exact, so light gets none at night
    pub fn noise_std_dev_at(&self, ctx: &TimeContext) -> f64 {
        match self {
            SensorModel::Light(p) if !p.is_daylight(ctx) => 0.0,
            _ => self.noise_std_dev(),
        }
    }

    pub fn clamp(&self) -> Clamp {
        match self {
            SensorModel::Temperature(_)
            | SensorModel::Humidity(_)
            | SensorModel::SoilTemperature(_) => Clamp::None,
            SensorModel::Light(_) | SensorModel::WindSpeed(_) => Clamp::NonNegative,
            SensorModel::SoilMoisture(_) => Clamp::UnitInterval,
        }
    }

    /// Same model with the noise term switched off
    pub fn without_noise(mut self) -> Self {
        match &mut self {
            SensorModel::Temperature(p) => p.noise_std_dev = 0.0,
            SensorModel::Humidity(p) => p.noise_std_dev = 0.0,
            SensorModel::Light(p) => p.noise_std_dev = 0.0,
            SensorModel::SoilTemperature(p) => p.noise_std_dev = 0.0,
            SensorModel::WindSpeed(p) => p.noise_std_dev = 0.0,
            SensorModel::SoilMoisture(p) => p.noise_std_dev = 0.0,
        }
        self
    }

    /// Every shape parameter by name, noise excluded
    fn named_parameters(&self) -> Vec<(String, f64)> {
        let named = |pairs: &[(&str, f64)]| -> Vec<(String, f64)> {
            pairs.iter().map(|(n, v)| (n.to_string(), *v)).collect()
        };
        match self {
            SensorModel::Temperature(p) => named(&[
                ("t_mean", p.t_mean),
                ("a_diurnal", p.a_diurnal),
                ("t_max_diurnal", p.t_max_diurnal),
                ("a_seasonal", p.a_seasonal),
                ("t_max_seasonal", p.t_max_seasonal),
            ]),
            SensorModel::Humidity(p) => named(&[
                ("h_mean", p.h_mean),
                ("a_diurnal", p.a_diurnal),
                ("t_max", p.t_max),
            ]),
            SensorModel::Light(p) => named(&[
                ("max_light", p.max_light),
                ("sunrise", p.sunrise),
                ("sunset", p.sunset),
            ]),
            SensorModel::SoilTemperature(p) => named(&[
                ("t_mean", p.t_mean),
                ("a_diurnal", p.a_diurnal),
                ("t_max_diurnal_air", p.t_max_diurnal_air),
                ("delta_t", p.delta_t),
                ("a_seasonal", p.a_seasonal),
                ("t_max_seasonal", p.t_max_seasonal),
            ]),
            SensorModel::WindSpeed(p) => {
                let mut params = named(&[("a_diurnal", p.a_diurnal), ("t_max", p.t_max)]);
                params.extend(
                    p.monthly_mean
                        .iter()
                        .enumerate()
                        .map(|(i, v)| (format!("monthly_mean[{}]", i + 1), *v)),
                );
                params
            }
            SensorModel::SoilMoisture(p) => p
                .coefficients
                .0
                .iter()
                .enumerate()
                .map(|(i, v)| (format!("beta{i}"), *v))
                .collect(),
        }
    }

    /// Check parameters once at construction so evaluation cannot hit a config bug mid-run
    pub fn validate(&self) -> SimResult<()> {
        let std_dev = self.noise_std_dev();
        if !std_dev.is_finite() || std_dev < 0.0 {
            return Err(SimulationError::InvalidNoiseStdDev(std_dev));
        }
        if let Some((name, value)) = self
            .named_parameters()
            .into_iter()
            .find(|(_, value)| !value.is_finite())
        {
            return Err(SimulationError::InvalidParameter(format!(
                "{} parameter {name} must be finite, got {value}",
                self.kind()
            )));
        }

        match self {
            SensorModel::Light(p) if p.sunset <= p.sunrise => {
                Err(SimulationError::InvalidParameter(format!(
                    "sunset ({}) must be after sunrise ({})",
                    p.sunset, p.sunrise
                )))
            }
            SensorModel::WindSpeed(p) => {
                for month in 1..=12 {
                    p.monthly_mean(month)?;
                }
                if p.monthly_mean.len() > 12 {
                    return Err(SimulationError::InvalidParameter(format!(
                        "wind speed table has {} entries, expected 12",
                        p.monthly_mean.len()
                    )));
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ctx(hour_of_day: f64, day_of_year: u32, month: u32) -> TimeContext {
        TimeContext {
            hour_of_day,
            day_of_year,
            month,
            hours_since_epoch: 0.0,
        }
    }

    #[test]
    fn test_light_zero_outside_daylight() {
        let light = LightParams::default();
        for hour in [0.0, 3.5, 5.99, 18.01, 23.99] {
            assert_eq!(light.evaluate(&ctx(hour, 100, 4)), 0.0, "hour {hour}");
        }
    }

    #[test]
    fn test_light_peaks_at_solar_midpoint() {
        let light = LightParams::default();
        assert_eq!(light.evaluate(&ctx(12.0, 100, 4)), light.max_light);
        assert_eq!(light.evaluate(&ctx(6.0, 100, 4)), 0.0);
        assert!(light.evaluate(&ctx(9.0, 100, 4)) > 0.0);
    }

    #[test]
    fn test_light_no_noise_at_night() {
        let model = SensorModel::Light(LightParams::default());
        assert_eq!(model.noise_std_dev_at(&ctx(2.0, 1, 1)), 0.0);
        assert_eq!(model.noise_std_dev_at(&ctx(12.0, 1, 1)), 50.0);
    }

    #[test]
    fn test_temperature_peak_hour() {
        let params = TemperatureParams::default();
        let at_peak = ctx(params.t_max_diurnal, 120, 4);
        let seasonal = params.a_seasonal
            * (2.0 * PI * (120.0 - params.t_max_seasonal) / YEAR_DAYS).cos();

        let value = params.evaluate(&at_peak);
        assert!((value - (params.t_mean + params.a_diurnal + seasonal)).abs() < 1e-12);

        // Any other hour is cooler
        assert!(params.evaluate(&ctx(params.t_max_diurnal + 1.0, 120, 4)) < value);
        assert!(params.evaluate(&ctx(params.t_max_diurnal - 1.0, 120, 4)) < value);
    }

    #[test]
    fn test_soil_temperature_lags_air() {
        let params = SoilTemperatureParams::default();
        let peak = params.t_max_diurnal_air + params.delta_t;
        let at_peak = params.evaluate(&ctx(peak, 196, 7));
        assert!((at_peak - (params.t_mean + params.a_diurnal + params.a_seasonal)).abs() < 1e-12);
        assert!(params.evaluate(&ctx(params.t_max_diurnal_air, 196, 7)) < at_peak);
    }

    #[test]
    fn test_humidity_trough_opposite_peak() {
        let params = HumidityParams::default();
        let trough = params.evaluate(&ctx(params.t_max + 12.0, 1, 1));
        assert!((trough - (params.h_mean - params.a_diurnal)).abs() < 1e-12);
    }

    #[rstest]
    #[case(1, 6.7)]
    #[case(7, 7.7)]
    #[case(10, 6.4)]
    #[case(12, 7.0)]
    fn test_wind_monthly_lookup(#[case] month: u32, #[case] expected: f64) {
        let params = WindSpeedParams {
            a_diurnal: 0.0,
            ..WindSpeedParams::default()
        };
        assert_eq!(params.evaluate(&ctx(9.0, 1, month)).unwrap(), expected);
    }

    #[test]
    fn test_wind_missing_month_is_error() {
        let params = WindSpeedParams {
            monthly_mean: vec![5.0; 11],
            ..WindSpeedParams::default()
        };
        assert_eq!(
            params.evaluate(&ctx(9.0, 340, 12)),
            Err(SimulationError::UnknownCalendarMonth(12))
        );
        assert_eq!(
            SensorModel::WindSpeed(params).validate(),
            Err(SimulationError::UnknownCalendarMonth(12))
        );
    }

    #[rstest]
    #[case(SensorModel::Temperature(TemperatureParams { t_mean: f64::NAN, ..TemperatureParams::default() }))]
    #[case(SensorModel::Humidity(HumidityParams { t_max: f64::INFINITY, ..HumidityParams::default() }))]
    #[case(SensorModel::Light(LightParams { max_light: f64::NAN, ..LightParams::default() }))]
    #[case(SensorModel::SoilTemperature(SoilTemperatureParams { delta_t: f64::NEG_INFINITY, ..SoilTemperatureParams::default() }))]
    #[case(SensorModel::WindSpeed(WindSpeedParams { monthly_mean: { let mut m = WindSpeedParams::default().monthly_mean; m[4] = f64::NAN; m }, ..WindSpeedParams::default() }))]
    #[case(SensorModel::SoilMoisture(SoilMoistureParams { coefficients: CoefficientSet([0.28, f64::NAN, 0.0, 0.02, -0.07]), ..SoilMoistureParams::default() }))]
    fn test_validate_rejects_non_finite_parameters(#[case] model: SensorModel) {
        assert!(matches!(
            model.validate(),
            Err(SimulationError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_default_models_validate() {
        for model in [
            SensorModel::Temperature(TemperatureParams::default()),
            SensorModel::Humidity(HumidityParams::default()),
            SensorModel::Light(LightParams::default()),
            SensorModel::SoilTemperature(SoilTemperatureParams::default()),
            SensorModel::WindSpeed(WindSpeedParams::default()),
            SensorModel::SoilMoisture(SoilMoistureParams::default()),
        ] {
            assert_eq!(model.validate(), Ok(()));
        }
    }

    #[test]
    fn test_wind_month_zero_is_error() {
        let params = WindSpeedParams::default();
        assert_eq!(
            params.monthly_mean(0),
            Err(SimulationError::UnknownCalendarMonth(0))
        );
    }

    #[test]
    fn test_harmonic_basis_at_origin() {
        assert_eq!(harmonic_basis(0.0), [1.0, 1.0, 0.0, 1.0, 0.0]);
        let beta = CoefficientSet::VINEYARD_2024.0;
        let expected = beta[0] + beta[1] + beta[3];
        assert!((CoefficientSet::VINEYARD_2024.evaluate(0.0) - expected).abs() < 1e-15);
    }

    #[test]
    fn test_soil_moisture_raw_stays_in_unit_interval() {
        let params = SoilMoistureParams::default();
        let mut t = 24.0 * 365.25 * 24.0;
        while t < 24.0 * 365.25 * 25.0 {
            let value = params.evaluate(&TimeContext {
                hour_of_day: t % 24.0,
                day_of_year: 1,
                month: 1,
                hours_since_epoch: t,
            });
            assert!((0.0..=1.0).contains(&value));
            t += 0.5;
        }
    }

    #[test]
    fn test_raw_value_is_deterministic() {
        let models = [
            SensorModel::Temperature(TemperatureParams::default()),
            SensorModel::Humidity(HumidityParams::default()),
            SensorModel::Light(LightParams::default()),
            SensorModel::SoilTemperature(SoilTemperatureParams::default()),
            SensorModel::WindSpeed(WindSpeedParams::default()),
            SensorModel::SoilMoisture(SoilMoistureParams::default()),
        ];
        let c = TimeContext {
            hour_of_day: 10.25,
            day_of_year: 200,
            month: 7,
            hours_since_epoch: 215_000.25,
        };
        for model in models {
            let a = model.raw_value(&c).unwrap();
            let b = model.raw_value(&c).unwrap();
            assert_eq!(a.to_bits(), b.to_bits(), "{}", model.kind());
        }
    }

    #[test]
    fn test_clamps() {
        assert_eq!(Clamp::NonNegative.apply(-3.0), 0.0);
        assert_eq!(Clamp::UnitInterval.apply(1.2), 1.0);
        assert_eq!(Clamp::UnitInterval.apply(-0.1), 0.0);
        assert_eq!(Clamp::None.apply(-40.0), -40.0);
    }

    #[test]
    fn test_validate_rejects_bad_params() {
        let negative = SensorModel::Humidity(HumidityParams {
            noise_std_dev: -1.0,
            ..HumidityParams::default()
        });
        assert_eq!(
            negative.validate(),
            Err(SimulationError::InvalidNoiseStdDev(-1.0))
        );

        let inverted = SensorModel::Light(LightParams {
            sunrise: 18.0,
            sunset: 6.0,
            ..LightParams::default()
        });
        assert!(matches!(
            inverted.validate(),
            Err(SimulationError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_without_noise() {
        let model = SensorModel::SoilMoisture(SoilMoistureParams::default()).without_noise();
        assert_eq!(model.noise_std_dev(), 0.0);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(SensorKind::SoilMoisture.to_string(), "soil_moisture");
        assert_eq!("wind_speed".parse::<SensorKind>().unwrap(), SensorKind::WindSpeed);
    }

    #[test]
    fn test_model_deserializes_from_toml() {
        let model: SensorModel = toml::from_str(
            r#"
            kind = "humidity"
            h_mean = 55.0
            a_diurnal = 15.0
            t_max = 5.0
            noise_std_dev = 2.0
            "#,
        )
        .unwrap();
        assert_eq!(model.kind(), SensorKind::Humidity);
        assert_eq!(model.noise_std_dev(), 2.0);
    }
}
