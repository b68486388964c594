//! Activity module
//!
//! An activity is a schedulable unit of business logic evaluated once per
//! simulation period. The [`Activity`] trait is the seam the simulation
//! structure runs; concrete activities decide per period whether they are
//! eligible and, if so, append to the entity's general ledger.
//!
//! # Temporal eligibility
//!
//! Eligibility over time is supplied by an [`ExecutionWindow`] owned by the
//! activity, not inherited from a base type. A window holds a start
//! datetime, an end datetime and an interval. Before a simulation run the
//! window is resolved against a concrete clock into an inclusive range of
//! period indices; during the run `is_eligible` is a pure predicate over
//! that range. Concrete activities conjoin their own gates on top (for
//! example [`BasicActivity`] requires a positive amount).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::clock::{Clock, ClockError};
use crate::ledger::{GeneralLedger, LedgerError};

pub mod basic;

pub use basic::BasicActivity;

/// Errors that can occur while running an activity
///
/// Activities define no failure modes of their own; these wrap the
/// collaborators' errors so `run` can propagate them unmodified.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActivityError {
    #[error("clock error: {0}")]
    Clock(#[from] ClockError),

    #[error("ledger rejected transaction: {0}")]
    Ledger(#[from] LedgerError),
}

/// Resolved period-index bounds of an execution window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum PeriodBounds {
    /// Window has not been resolved against a clock yet
    Unresolved,

    /// No period of the run falls inside the datetime window
    Empty,

    /// Inclusive range of eligible period indices
    Range { first_ix: usize, last_ix: usize },
}

/// Temporal eligibility window of an activity
///
/// The window brackets eligible periods between two datetimes (inclusive)
/// and thins them by an interval stride. Interval alignment is anchored to
/// the first period of the resolved range: period `ix` is aligned iff
/// `(ix - first_ix) % interval == 0`.
///
/// An unresolved or empty window makes nothing eligible.
///
/// # Example
/// ```
/// use business_simulator_core_rs::{Clock, ExecutionWindow, TimePeriod};
/// use chrono::NaiveDateTime;
///
/// let clock = Clock::new(
///     "clock",
///     NaiveDateTime::default(),
///     TimePeriod::Month,
/// );
/// let mut window = ExecutionWindow::new(NaiveDateTime::MIN, NaiveDateTime::MAX, 3);
/// window.prepare(&clock, 12).unwrap();
///
/// assert!(window.is_eligible(0));
/// assert!(!window.is_eligible(1));
/// assert!(window.is_eligible(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionWindow {
    /// First eligible datetime (inclusive)
    start_datetime: NaiveDateTime,

    /// Last eligible datetime (inclusive)
    end_datetime: NaiveDateTime,

    /// Period stride within the window
    interval: usize,

    /// Bounds resolved by `prepare`
    bounds: PeriodBounds,
}

impl ExecutionWindow {
    /// Create a new window
    ///
    /// Use [`NaiveDateTime::MIN`] / [`NaiveDateTime::MAX`] to leave either
    /// end unbounded.
    ///
    /// # Panics
    /// Panics if `interval` is zero
    pub fn new(start_datetime: NaiveDateTime, end_datetime: NaiveDateTime, interval: usize) -> Self {
        assert!(interval > 0, "interval must be positive");
        Self {
            start_datetime,
            end_datetime,
            interval,
            bounds: PeriodBounds::Unresolved,
        }
    }

    /// Window spanning all periods with an interval of 1
    pub fn unbounded() -> Self {
        Self::new(NaiveDateTime::MIN, NaiveDateTime::MAX, 1)
    }

    /// Get the first eligible datetime
    pub fn start_datetime(&self) -> NaiveDateTime {
        self.start_datetime
    }

    /// Get the last eligible datetime
    pub fn end_datetime(&self) -> NaiveDateTime {
        self.end_datetime
    }

    /// Get the period stride
    pub fn interval(&self) -> usize {
        self.interval
    }

    /// First period index of the resolved range, if any
    pub fn first_period_ix(&self) -> Option<usize> {
        match self.bounds {
            PeriodBounds::Range { first_ix, .. } => Some(first_ix),
            _ => None,
        }
    }

    /// Last period index of the resolved range, if any
    pub fn last_period_ix(&self) -> Option<usize> {
        match self.bounds {
            PeriodBounds::Range { last_ix, .. } => Some(last_ix),
            _ => None,
        }
    }

    /// Resolve the datetime window to period indices against a clock
    ///
    /// The range becomes `[first, last]` where `first` is the earliest
    /// period at or after `start_datetime` and `last` the latest period at
    /// or before `end_datetime`, both within `0..period_count`. The MIN and
    /// MAX sentinels map straight to the run's boundary periods without
    /// consulting the clock.
    ///
    /// # Errors
    /// Propagates [`ClockError`] if a period datetime cannot be computed.
    pub fn prepare(&mut self, clock: &Clock, period_count: usize) -> Result<(), ClockError> {
        if period_count == 0 {
            self.bounds = PeriodBounds::Empty;
            return Ok(());
        }

        let first_ix = if self.start_datetime == NaiveDateTime::MIN {
            Some(0)
        } else {
            let mut found = None;
            for ix in 0..period_count {
                if clock.datetime_at_period_ix(ix)? >= self.start_datetime {
                    found = Some(ix);
                    break;
                }
            }
            found
        };

        let last_ix = if self.end_datetime == NaiveDateTime::MAX {
            Some(period_count - 1)
        } else {
            let mut found = None;
            for ix in (0..period_count).rev() {
                if clock.datetime_at_period_ix(ix)? <= self.end_datetime {
                    found = Some(ix);
                    break;
                }
            }
            found
        };

        self.bounds = match (first_ix, last_ix) {
            (Some(first_ix), Some(last_ix)) if first_ix <= last_ix => {
                PeriodBounds::Range { first_ix, last_ix }
            }
            _ => PeriodBounds::Empty,
        };
        Ok(())
    }

    /// Pure temporal predicate: is this period index inside the window and
    /// aligned with the interval?
    pub fn is_eligible(&self, period_ix: usize) -> bool {
        match self.bounds {
            PeriodBounds::Range { first_ix, last_ix } => {
                period_ix >= first_ix
                    && period_ix <= last_ix
                    && (period_ix - first_ix) % self.interval == 0
            }
            PeriodBounds::Unresolved | PeriodBounds::Empty => false,
        }
    }
}

/// A schedulable unit of business logic evaluated once per simulation period
///
/// The simulation structure holds activities as trait objects and drives
/// them through this interface: paths are assigned when the hierarchy is
/// assembled, windows are resolved in `prepare_to_run`, and `run` is
/// invoked once per period with the shared clock and the owning entity's
/// ledger.
pub trait Activity: Send + Sync {
    /// Activity name
    fn name(&self) -> &str;

    /// Activity description
    fn description(&self) -> Option<&str>;

    /// Hierarchical path, e.g. `entity/component/activity`
    fn path(&self) -> &str;

    /// Set the parent path; the activity's path becomes `parent/name`
    fn set_parent_path(&mut self, parent: &str);

    /// Resolve temporal state against the clock before a run
    fn prepare_to_run(&mut self, clock: &Clock, period_count: usize) -> Result<(), ClockError>;

    /// Pure predicate: would this activity fire at the given period index?
    fn meets_execution_criteria(&self, period_ix: usize) -> bool;

    /// Execute the activity at the clock's current period
    ///
    /// Performs zero or one ledger mutation. Collaborator failures
    /// propagate unmodified.
    fn run(&mut self, clock: &Clock, ledger: &mut GeneralLedger) -> Result<(), ActivityError>;
}
