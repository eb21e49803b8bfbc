//! # Civil Time Decomposition
//!
//! Every model works in a single local civil time zone (UTC+8 at the reference
//! vineyard). This module owns that offset and turns instants into the
//! quantities the models consume: fractional hour of day, day of year, month
//! and continuous hours since 2000-01-01T00:00 local time.

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDateTime, Offset, TimeZone, Timelike, Utc,
};
use serde::{Deserialize, Serialize};

use crate::error::{SimResult, SimulationError};

/// Unix seconds at 2000-01-01T00:00:00Z
const UNIX_SECONDS_AT_2000: i64 = 946_684_800;

const NANOS_PER_SECOND: u32 = 1_000_000_000;

/// Offset of the reference deployment (UTC+8)
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 8;

/// The canonical local civil-time offset shared by all sensor models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct CivilOffset(FixedOffset);

impl CivilOffset {
    /// Create an offset from whole hours east of UTC
    pub fn from_hours(hours: i32) -> SimResult<Self> {
        hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .map(Self)
            .ok_or_else(|| {
                SimulationError::InvalidTimeKind(format!("offset of {hours}h is outside ±24h"))
            })
    }

    pub fn fixed_offset(&self) -> FixedOffset {
        self.0
    }

    pub fn hours(&self) -> i32 {
        self.0.local_minus_utc() / 3600
    }

    /// Current wall-clock instant expressed in this offset
    pub fn now(&self) -> DateTime<FixedOffset> {
        self.convert(Utc::now())
    }

    /// Explicitly re-express an instant from any zone in this offset
    pub fn convert<Tz: TimeZone>(&self, instant: DateTime<Tz>) -> DateTime<FixedOffset> {
        instant.with_timezone(&self.0)
    }

    /// Interpret a naive local timestamp as civil time in this offset
    pub fn localize(&self, naive: NaiveDateTime) -> SimResult<DateTime<FixedOffset>> {
        self.0.from_local_datetime(&naive).single().ok_or_else(|| {
            SimulationError::InvalidTimeKind(format!("{naive} cannot be placed in {}", self.0))
        })
    }

    /// Reject any instant not already expressed in this offset
    pub fn ensure(&self, instant: &DateTime<FixedOffset>) -> SimResult<()> {
        if instant.offset() != &self.0 {
            return Err(SimulationError::InvalidTimeKind(format!(
                "instant {} carries offset {}, expected {}",
                instant.to_rfc3339(),
                instant.offset(),
                self.0
            )));
        }
        Ok(())
    }

    /// Parse an RFC 3339 instant that must carry exactly this offset
    pub fn parse_instant(&self, raw: &str) -> SimResult<DateTime<FixedOffset>> {
        let instant = DateTime::parse_from_rfc3339(raw).map_err(|e| {
            if raw.parse::<NaiveDateTime>().is_ok() {
                SimulationError::InvalidTimeKind(format!("'{raw}' has no UTC offset"))
            } else {
                SimulationError::InvalidTimeKind(format!("'{raw}' is not an RFC 3339 instant: {e}"))
            }
        })?;
        self.ensure(&instant)?;
        Ok(instant)
    }

    /// Unix seconds of 2000-01-01T00:00 local time
    fn epoch_unix_seconds(&self) -> i64 {
        UNIX_SECONDS_AT_2000 - self.0.local_minus_utc() as i64
    }
}

impl Default for CivilOffset {
    fn default() -> Self {
        Self::from_hours(DEFAULT_UTC_OFFSET_HOURS).unwrap_or(Self(Utc.fix()))
    }
}

impl TryFrom<i32> for CivilOffset {
    type Error = SimulationError;

    fn try_from(hours: i32) -> Result<Self, Self::Error> {
        Self::from_hours(hours)
    }
}

impl From<CivilOffset> for i32 {
    fn from(offset: CivilOffset) -> Self {
        offset.hours()
    }
}

/// Time quantities derived from one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeContext {
    /// Fractional hour of day, in [0, 24)
    pub hour_of_day: f64,
    /// Day of year, 1-366
    pub day_of_year: u32,
    /// Calendar month, 1-12
    pub month: u32,
    /// Continuous hours since 2000-01-01T00:00 local time
    pub hours_since_epoch: f64,
}

impl TimeContext {
    /// Decompose an instant expressed in the canonical offset
    pub fn derive(instant: &DateTime<FixedOffset>, offset: CivilOffset) -> SimResult<Self> {
        offset.ensure(instant)?;

        // chrono reports a leap second as nanos >= 1e9 on :59; fold it back onto :59
        let subsec = (instant.nanosecond() % NANOS_PER_SECOND) as f64 / NANOS_PER_SECOND as f64;
        let seconds_of_hour = instant.second() as f64 + subsec;
        let hour_of_day =
            instant.hour() as f64 + instant.minute() as f64 / 60.0 + seconds_of_hour / 3600.0;

        let elapsed_seconds = (instant.timestamp() - offset.epoch_unix_seconds()) as f64 + subsec;

        Ok(Self {
            hour_of_day,
            day_of_year: instant.ordinal(),
            month: instant.month(),
            hours_since_epoch: elapsed_seconds / 3600.0,
        })
    }
}

/// Step length from a whole number of minutes
pub fn step_from_minutes(minutes: i64) -> SimResult<Duration> {
    Duration::try_minutes(minutes).ok_or_else(|| {
        SimulationError::InvalidStep(format!("{minutes} minutes is out of range"))
    })
}

/// Closed range of instants `[start, end]` walked at a fixed step
#[derive(Debug, Clone)]
pub struct Timeline {
    next: Option<DateTime<FixedOffset>>,
    end: DateTime<FixedOffset>,
    step: Duration,
}

impl Timeline {
    pub fn new(
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
        step: Duration,
        offset: CivilOffset,
    ) -> SimResult<Self> {
        offset.ensure(&start)?;
        offset.ensure(&end)?;
        if step <= Duration::zero() {
            return Err(SimulationError::InvalidStep(format!(
                "step must be positive, got {step}"
            )));
        }

        Ok(Self {
            next: Some(start),
            end,
            step,
        })
    }
}

impl Iterator for Timeline {
    type Item = DateTime<FixedOffset>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        if current > self.end {
            return None;
        }
        self.next = current.checked_add_signed(self.step);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn utc8() -> CivilOffset {
        CivilOffset::from_hours(8).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<FixedOffset> {
        utc8().localize(
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(h, min, s)
                .unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_default_offset_is_utc8() {
        assert_eq!(CivilOffset::default(), utc8());
        assert_eq!(CivilOffset::default().hours(), 8);
    }

    #[test]
    fn test_derive_fractional_hour() {
        let ctx = TimeContext::derive(&at(2024, 3, 1, 13, 30, 36), utc8()).unwrap();
        assert!((ctx.hour_of_day - 13.51).abs() < 1e-12);
        assert_eq!(ctx.month, 3);
        // 2024 is a leap year: Jan 31 + Feb 29 + 1
        assert_eq!(ctx.day_of_year, 61);
    }

    #[rstest]
    #[case(500_000_000)]
    #[case(1_000_000_000)]
    #[case(1_500_000_000)]
    #[case(1_999_999_999)]
    fn test_leap_second_stays_inside_the_day(#[case] nanos: u32) {
        let instant = utc8()
            .localize(
                NaiveDate::from_ymd_opt(2016, 12, 31)
                    .unwrap()
                    .and_hms_nano_opt(23, 59, 59, nanos)
                    .unwrap(),
            )
            .unwrap();
        let ctx = TimeContext::derive(&instant, utc8()).unwrap();

        assert!((0.0..24.0).contains(&ctx.hour_of_day), "{}", ctx.hour_of_day);
        assert!(ctx.hour_of_day > 23.9997);
        assert_eq!(ctx.day_of_year, 366);
        let midnight = TimeContext::derive(&at(2017, 1, 1, 0, 0, 0), utc8()).unwrap();
        assert!(ctx.hours_since_epoch < midnight.hours_since_epoch);
    }

    #[test]
    fn test_parsed_leap_second_stays_inside_the_day() {
        let instant = utc8().parse_instant("2016-12-31T23:59:60+08:00").unwrap();
        let ctx = TimeContext::derive(&instant, utc8()).unwrap();
        assert!(ctx.hour_of_day < 24.0);
    }

    #[test]
    fn test_hours_since_epoch_starts_at_local_midnight() {
        let ctx = TimeContext::derive(&at(2000, 1, 1, 0, 0, 0), utc8()).unwrap();
        assert_eq!(ctx.hours_since_epoch, 0.0);

        let ctx = TimeContext::derive(&at(2000, 1, 2, 6, 15, 0), utc8()).unwrap();
        assert!((ctx.hours_since_epoch - 30.25).abs() < 1e-12);
    }

    #[test]
    fn test_hours_since_epoch_keeps_sub_hour_phase() {
        let ctx = TimeContext::derive(&at(2024, 1, 1, 0, 20, 0), utc8()).unwrap();
        assert!(ctx.hours_since_epoch.fract() > 0.33 && ctx.hours_since_epoch.fract() < 0.34);
    }

    #[rstest]
    #[case(0)]
    #[case(-5)]
    #[case(9)]
    fn test_derive_rejects_other_offsets(#[case] hours: i32) {
        let other = CivilOffset::from_hours(hours).unwrap();
        let instant = other.localize(
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        )
        .unwrap();

        let err = TimeContext::derive(&instant, utc8()).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidTimeKind(_)));
    }

    #[test]
    fn test_derive_rejects_same_moment_in_utc() {
        let local = at(2024, 1, 1, 8, 0, 0);
        let as_utc = local.with_timezone(&FixedOffset::east_opt(0).unwrap());
        assert_eq!(local, as_utc);
        assert!(TimeContext::derive(&as_utc, utc8()).is_err());
        assert!(TimeContext::derive(&utc8().convert(as_utc), utc8()).is_ok());
    }

    #[rstest]
    #[case("2024-01-01T00:00:00")]
    #[case("2024-01-01T00:00:00Z")]
    #[case("2024-01-01T00:00:00+09:00")]
    #[case("yesterday")]
    fn test_parse_instant_rejects(#[case] raw: &str) {
        assert!(matches!(
            utc8().parse_instant(raw),
            Err(SimulationError::InvalidTimeKind(_))
        ));
    }

    #[test]
    fn test_parse_instant_accepts_canonical_offset() {
        let instant = utc8().parse_instant("2024-01-01T02:00:00+08:00").unwrap();
        assert_eq!(instant, at(2024, 1, 1, 2, 0, 0));
    }

    #[test]
    fn test_offset_out_of_range() {
        assert!(CivilOffset::from_hours(25).is_err());
        assert!(CivilOffset::from_hours(i32::MAX).is_err());
    }

    #[test]
    fn test_timeline_is_closed_range() {
        let steps: Vec<_> = Timeline::new(
            at(2024, 1, 1, 0, 0, 0),
            at(2024, 1, 1, 2, 0, 0),
            Duration::minutes(60),
            utc8(),
        )
        .unwrap()
        .collect();

        assert_eq!(steps.len(), 3);
        assert_eq!(steps[2], at(2024, 1, 1, 2, 0, 0));
    }

    #[test]
    fn test_timeline_empty_when_end_before_start() {
        let mut timeline = Timeline::new(
            at(2024, 1, 2, 0, 0, 0),
            at(2024, 1, 1, 0, 0, 0),
            Duration::minutes(60),
            utc8(),
        )
        .unwrap();
        assert!(timeline.next().is_none());
    }

    #[rstest]
    #[case(i64::MAX)]
    #[case(i64::MAX / 10)]
    #[case(i64::MIN)]
    fn test_step_from_minutes_out_of_range(#[case] minutes: i64) {
        assert!(matches!(
            step_from_minutes(minutes),
            Err(SimulationError::InvalidStep(_))
        ));
    }

    #[test]
    fn test_step_from_minutes() {
        assert_eq!(step_from_minutes(60).unwrap(), Duration::hours(1));
    }

    #[test]
    fn test_timeline_rejects_non_positive_step() {
        let start = at(2024, 1, 1, 0, 0, 0);
        assert!(matches!(
            Timeline::new(start, start, Duration::zero(), utc8()),
            Err(SimulationError::InvalidStep(_))
        ));
    }
}
