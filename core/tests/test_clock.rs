//! Tests for the simulation clock

use business_simulator_core_rs::{Clock, ClockError, TimePeriod};
use chrono::{NaiveDate, NaiveDateTime};

fn datetime(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

#[test]
fn test_clock_starts_at_period_zero() {
    let clock = Clock::new("clock", datetime(2016, 2, 1), TimePeriod::Month);

    assert_eq!(clock.name(), "clock");
    assert_eq!(clock.timestep_ix(), 0);
    assert_eq!(clock.timestep_count(), 1);
    assert_eq!(clock.current_datetime().unwrap(), datetime(2016, 2, 1));
}

#[test]
fn test_tick_and_reset() {
    let mut clock = Clock::new("clock", datetime(2016, 2, 1), TimePeriod::Month);

    clock.tick();
    clock.tick();
    assert_eq!(clock.timestep_ix(), 2);
    assert_eq!(clock.current_datetime().unwrap(), datetime(2016, 4, 1));

    clock.reset();
    assert_eq!(clock.timestep_ix(), 0);
    assert_eq!(clock.current_datetime().unwrap(), datetime(2016, 2, 1));
}

#[test]
fn test_monthly_periods_cross_year_boundary() {
    let clock = Clock::new("clock", datetime(2016, 2, 1), TimePeriod::Month);

    assert_eq!(clock.datetime_at_period_ix(11).unwrap(), datetime(2017, 1, 1));
    assert_eq!(clock.datetime_at_period_ix(12).unwrap(), datetime(2017, 2, 1));
}

#[test]
fn test_daily_periods() {
    let clock = Clock::new("clock", datetime(2016, 2, 27), TimePeriod::Day);

    // 2016 is a leap year
    assert_eq!(clock.datetime_at_period_ix(2).unwrap(), datetime(2016, 2, 29));
    assert_eq!(clock.datetime_at_period_ix(3).unwrap(), datetime(2016, 3, 1));
}

#[test]
fn test_weekly_periods() {
    let clock = Clock::new("clock", datetime(2016, 2, 1), TimePeriod::Week);

    assert_eq!(clock.datetime_at_period_ix(1).unwrap(), datetime(2016, 2, 8));
}

#[test]
fn test_hourly_periods() {
    let start = NaiveDate::from_ymd_opt(2016, 2, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    let clock = Clock::new("clock", start, TimePeriod::Hour);

    let expected = NaiveDate::from_ymd_opt(2016, 2, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    assert_eq!(clock.datetime_at_period_ix(3).unwrap(), expected);
}

#[test]
fn test_timestep_count_scales_period_length() {
    // Quarterly periods: 3-month timesteps
    let clock = Clock::new("clock", datetime(2016, 2, 1), TimePeriod::Month)
        .with_timestep_count(3);

    assert_eq!(clock.datetime_at_period_ix(1).unwrap(), datetime(2016, 5, 1));
    assert_eq!(clock.datetime_at_period_ix(4).unwrap(), datetime(2017, 2, 1));
}

#[test]
fn test_overflow_is_an_error_not_a_panic() {
    let clock = Clock::new("clock", datetime(2016, 2, 1), TimePeriod::Year);

    let result = clock.datetime_at_period_ix(1_000_000_000);
    assert_eq!(
        result,
        Err(ClockError::DatetimeOverflow {
            period_ix: 1_000_000_000
        })
    );
}

#[test]
fn test_description_builder() {
    let clock = Clock::new("clock", datetime(2016, 2, 1), TimePeriod::Month)
        .with_description("Simulation clock");
    assert_eq!(clock.description(), Some("Simulation clock"));
}
