//! Core simulation infrastructure: the clock.

pub mod clock;

pub use clock::{Clock, ClockError, TimePeriod};
