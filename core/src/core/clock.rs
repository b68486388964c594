//! Time management for the simulation
//!
//! The simulation operates in discrete periods. Each period has a fixed
//! duration (a count of hours, days, weeks, months or years) measured from
//! a start datetime. This module provides deterministic time advancement
//! and the mapping from period indices to calendar datetimes.

use chrono::{Months, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during clock operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClockError {
    #[error("datetime overflow computing period {period_ix}")]
    DatetimeOverflow { period_ix: usize },
}

/// Duration unit of one simulation timestep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimePeriod {
    Hour,
    Day,
    Week,
    Month,
    Year,
}

/// Drives simulation time in discrete periods
///
/// The clock holds the current period index and maps any period index to
/// its calendar datetime. It never decides which activities run; the model
/// loop advances it once per period.
///
/// # Example
/// ```
/// use business_simulator_core_rs::{Clock, TimePeriod};
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2016, 2, 1)
///     .unwrap()
///     .and_hms_opt(0, 0, 0)
///     .unwrap();
/// let mut clock = Clock::new("clock", start, TimePeriod::Month);
/// assert_eq!(clock.timestep_ix(), 0);
///
/// clock.tick();
/// assert_eq!(clock.timestep_ix(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clock {
    /// Clock name
    name: String,

    /// Optional description
    description: Option<String>,

    /// Datetime of period 0
    start_datetime: NaiveDateTime,

    /// Duration unit of one timestep
    timestep_period: TimePeriod,

    /// Number of units per timestep (e.g. 3 + Month = quarterly periods)
    timestep_count: u32,

    /// Current period index
    timestep_ix: usize,
}

impl Clock {
    /// Create a new clock starting at period 0
    ///
    /// # Arguments
    /// * `name` - Clock name
    /// * `start_datetime` - Datetime of period 0
    /// * `timestep_period` - Duration unit of one period
    ///
    /// # Example
    /// ```
    /// use business_simulator_core_rs::{Clock, TimePeriod};
    /// use chrono::NaiveDate;
    ///
    /// let start = NaiveDate::from_ymd_opt(2016, 2, 1)
    ///     .unwrap()
    ///     .and_hms_opt(0, 0, 0)
    ///     .unwrap();
    /// let clock = Clock::new("clock", start, TimePeriod::Month);
    /// ```
    pub fn new(name: &str, start_datetime: NaiveDateTime, timestep_period: TimePeriod) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            start_datetime,
            timestep_period,
            timestep_count: 1,
            timestep_ix: 0,
        }
    }

    /// Set description (builder pattern)
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Set the number of units per timestep (builder pattern)
    ///
    /// # Panics
    /// Panics if `timestep_count` is zero
    pub fn with_timestep_count(mut self, timestep_count: u32) -> Self {
        assert!(timestep_count > 0, "timestep_count must be positive");
        self.timestep_count = timestep_count;
        self
    }

    /// Get clock name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get description
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Get the datetime of period 0
    pub fn start_datetime(&self) -> NaiveDateTime {
        self.start_datetime
    }

    /// Get the duration unit of one timestep
    pub fn timestep_period(&self) -> TimePeriod {
        self.timestep_period
    }

    /// Get the number of units per timestep
    pub fn timestep_count(&self) -> u32 {
        self.timestep_count
    }

    /// Get the current period index
    pub fn timestep_ix(&self) -> usize {
        self.timestep_ix
    }

    /// Advance the clock by one period
    pub fn tick(&mut self) {
        self.timestep_ix += 1;
    }

    /// Reset the clock to period 0
    pub fn reset(&mut self) {
        self.timestep_ix = 0;
    }

    /// Compute the datetime at a given period index
    ///
    /// The datetime is `start + ix * timestep_count` units of the clock's
    /// timestep period.
    ///
    /// # Example
    /// ```
    /// use business_simulator_core_rs::{Clock, TimePeriod};
    /// use chrono::NaiveDate;
    ///
    /// let start = NaiveDate::from_ymd_opt(2016, 2, 1)
    ///     .unwrap()
    ///     .and_hms_opt(0, 0, 0)
    ///     .unwrap();
    /// let clock = Clock::new("clock", start, TimePeriod::Month);
    ///
    /// let expected = NaiveDate::from_ymd_opt(2016, 4, 1)
    ///     .unwrap()
    ///     .and_hms_opt(0, 0, 0)
    ///     .unwrap();
    /// assert_eq!(clock.datetime_at_period_ix(2).unwrap(), expected);
    /// ```
    pub fn datetime_at_period_ix(&self, ix: usize) -> Result<NaiveDateTime, ClockError> {
        let overflow = ClockError::DatetimeOverflow { period_ix: ix };

        let steps = i64::try_from(ix)
            .ok()
            .and_then(|ix| ix.checked_mul(i64::from(self.timestep_count)))
            .ok_or(overflow.clone())?;

        let datetime = match self.timestep_period {
            TimePeriod::Hour => TimeDelta::try_hours(steps)
                .and_then(|delta| self.start_datetime.checked_add_signed(delta)),
            TimePeriod::Day => TimeDelta::try_days(steps)
                .and_then(|delta| self.start_datetime.checked_add_signed(delta)),
            TimePeriod::Week => TimeDelta::try_weeks(steps)
                .and_then(|delta| self.start_datetime.checked_add_signed(delta)),
            TimePeriod::Month => u32::try_from(steps)
                .ok()
                .and_then(|months| self.start_datetime.checked_add_months(Months::new(months))),
            TimePeriod::Year => u32::try_from(steps)
                .ok()
                .and_then(|years| years.checked_mul(12))
                .and_then(|months| self.start_datetime.checked_add_months(Months::new(months))),
        };

        datetime.ok_or(overflow)
    }

    /// Compute the datetime at the current period index
    pub fn current_datetime(&self) -> Result<NaiveDateTime, ClockError> {
        self.datetime_at_period_ix(self.timestep_ix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2016, 2, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    #[should_panic(expected = "timestep_count must be positive")]
    fn test_zero_timestep_count_panics() {
        let _ = Clock::new("clock", start(), TimePeriod::Month).with_timestep_count(0);
    }

    #[test]
    fn test_year_periods() {
        let clock = Clock::new("clock", start(), TimePeriod::Year);
        let expected = NaiveDate::from_ymd_opt(2019, 2, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(clock.datetime_at_period_ix(3).unwrap(), expected);
    }

    #[test]
    fn test_datetime_overflow_reported() {
        let clock = Clock::new("clock", start(), TimePeriod::Year);
        let result = clock.datetime_at_period_ix(usize::MAX);
        assert_eq!(
            result,
            Err(ClockError::DatetimeOverflow {
                period_ix: usize::MAX
            })
        );
    }
}
