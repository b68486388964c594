//! Basic activity: periodically create a transaction between two accounts
//!
//! This is the simplest concrete activity. On every eligible period it
//! books one transaction, stamped from its template, against the owning
//! entity's general ledger.

use chrono::NaiveDateTime;

use crate::activity::{Activity, ActivityError, ExecutionWindow};
use crate::core::clock::{Clock, ClockError};
use crate::ledger::GeneralLedger;
use crate::models::transaction::TransactionTemplate;

/// Default amount booked per firing (minor units)
pub const DEFAULT_AMOUNT: i64 = 1_000;

/// A periodic, criteria-gated transaction generator
///
/// A `BasicActivity` fires at most once per period. It fires iff its
/// execution window admits the period AND its amount is strictly positive;
/// a non-positive amount is a silent skip, not an error. Each firing issues
/// exactly one transaction-creation request carrying the template's
/// accounts and metadata, the clock's current datetime, the activity's
/// hierarchical path as source, and the configured amount.
///
/// # Example
/// ```
/// use business_simulator_core_rs::{BasicActivity, TransactionTemplate};
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2016, 2, 1)
///     .unwrap()
///     .and_hms_opt(0, 0, 0)
///     .unwrap();
/// let end = NaiveDate::from_ymd_opt(2017, 2, 1)
///     .unwrap()
///     .and_hms_opt(0, 0, 0)
///     .unwrap();
///
/// let activity = BasicActivity::new("rent")
///     .with_description("Monthly office rent")
///     .with_window(start, end)
///     .with_amount(50_000)
///     .with_template(TransactionTemplate::new("Rent", "Expenses", "Bank"));
///
/// assert_eq!(activity.amount(), 50_000);
/// ```
pub struct BasicActivity {
    /// Activity name
    name: String,

    /// Optional description
    description: Option<String>,

    /// Hierarchical path; `name` until a parent path is set
    path: String,

    /// Temporal eligibility window
    window: ExecutionWindow,

    /// Amount booked per firing (minor units)
    amount: i64,

    /// Template stamped onto every generated transaction (owned, immutable)
    tx_template: TransactionTemplate,
}

impl BasicActivity {
    /// Create a new basic activity with default configuration
    ///
    /// Defaults: no description, unbounded window, interval 1, amount
    /// [`DEFAULT_AMOUNT`], and a fresh [`TransactionTemplate::unknown`]
    /// template.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            path: name.to_string(),
            window: ExecutionWindow::unbounded(),
            amount: DEFAULT_AMOUNT,
            tx_template: TransactionTemplate::unknown(),
        }
    }

    /// Set description (builder pattern)
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Set the datetime window (builder pattern)
    ///
    /// Both bounds are inclusive; the current interval is kept.
    pub fn with_window(mut self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        self.window = ExecutionWindow::new(start, end, self.window.interval());
        self
    }

    /// Set the period stride (builder pattern)
    ///
    /// # Panics
    /// Panics if `interval` is zero
    pub fn with_interval(mut self, interval: usize) -> Self {
        self.window = ExecutionWindow::new(
            self.window.start_datetime(),
            self.window.end_datetime(),
            interval,
        );
        self
    }

    /// Set the amount booked per firing (builder pattern)
    ///
    /// A non-positive amount is allowed and disables the activity without
    /// erroring.
    pub fn with_amount(mut self, amount: i64) -> Self {
        self.amount = amount;
        self
    }

    /// Set the transaction template (builder pattern)
    pub fn with_template(mut self, tx_template: TransactionTemplate) -> Self {
        self.tx_template = tx_template;
        self
    }

    /// Get the amount booked per firing
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Get the first eligible datetime
    pub fn start_datetime(&self) -> NaiveDateTime {
        self.window.start_datetime()
    }

    /// Get the last eligible datetime
    pub fn end_datetime(&self) -> NaiveDateTime {
        self.window.end_datetime()
    }

    /// Get the period stride
    pub fn interval(&self) -> usize {
        self.window.interval()
    }

    /// Get the execution window
    pub fn window(&self) -> &ExecutionWindow {
        &self.window
    }

    /// Get the transaction template
    pub fn tx_template(&self) -> &TransactionTemplate {
        &self.tx_template
    }
}

impl Activity for BasicActivity {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn set_parent_path(&mut self, parent: &str) {
        self.path = format!("{}/{}", parent, self.name);
    }

    fn prepare_to_run(&mut self, clock: &Clock, period_count: usize) -> Result<(), ClockError> {
        self.window.prepare(clock, period_count)
    }

    fn meets_execution_criteria(&self, period_ix: usize) -> bool {
        self.window.is_eligible(period_ix) && self.amount > 0
    }

    fn run(&mut self, clock: &Clock, ledger: &mut GeneralLedger) -> Result<(), ActivityError> {
        if !self.meets_execution_criteria(clock.timestep_ix()) {
            return Ok(());
        }

        let tx_datetime = clock.current_datetime()?;
        ledger.create_transaction(
            self.tx_template.name(),
            self.tx_template.description(),
            tx_datetime,
            self.tx_template.dt_account(),
            self.tx_template.cr_account(),
            &self.path,
            self.amount,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let activity = BasicActivity::new("rent");
        assert_eq!(activity.amount(), DEFAULT_AMOUNT);
        assert_eq!(activity.window().interval(), 1);
        assert_eq!(activity.tx_template().name(), "Unknown");
        assert_eq!(activity.path(), "rent");
    }

    #[test]
    fn test_path_follows_parent() {
        let mut activity = BasicActivity::new("rent");
        activity.set_parent_path("acme/office");
        assert_eq!(activity.path(), "acme/office/rent");
    }

    #[test]
    fn test_each_activity_owns_its_template() {
        // The default template is constructed fresh per activity; mutating
        // one activity's configuration can never leak into another.
        let a = BasicActivity::new("a");
        let b = BasicActivity::new("b").with_template(
            TransactionTemplate::new("Rent", "Expenses", "Bank"),
        );
        assert_eq!(a.tx_template().name(), "Unknown");
        assert_eq!(b.tx_template().name(), "Rent");
    }
}
