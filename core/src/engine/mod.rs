//! Time-based model: the main simulation loop
//!
//! The model owns the clock and the entities and drives one run:
//!
//! ```text
//! prepare: reset clock, resolve every activity's window
//! for each period ix in 0..period_count:
//!     run every entity (activities append to their entity's ledger)
//!     advance the clock
//! ```
//!
//! The model decides *when* periods occur; activities only decide, given
//! the current period index, whether they fire in it.

use chrono::NaiveDateTime;
use thiserror::Error;
use tracing::{debug, info};

use crate::activity::ActivityError;
use crate::core::clock::{Clock, ClockError};
use crate::structure::Entity;

/// Errors that can occur during a simulation run
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SimulationError {
    #[error("clock error: {0}")]
    Clock(#[from] ClockError),

    #[error("activity failed: {0}")]
    Activity(#[from] ActivityError),
}

/// Outcome of one simulated period
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodResult {
    /// Period index that was run
    pub period_ix: usize,

    /// Datetime of the period
    pub period_datetime: NaiveDateTime,

    /// Transactions created across all entities during the period
    pub transactions_created: usize,
}

/// A discrete-event business simulation
///
/// # Example
/// ```
/// use business_simulator_core_rs::{
///     Account, AccountType, BasicActivity, Clock, Component, Entity, GeneralLedger,
///     GeneralLedgerStructure, TimeBasedModel, TimePeriod, TransactionTemplate,
/// };
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2016, 2, 1)
///     .unwrap()
///     .and_hms_opt(0, 0, 0)
///     .unwrap();
///
/// let mut structure = GeneralLedgerStructure::new("structure");
/// structure.add_account(Account::new("Bank", AccountType::Asset)).unwrap();
/// structure.add_account(Account::new("Expenses", AccountType::Expense)).unwrap();
///
/// let mut office = Component::new("office");
/// office.add_activity(Box::new(
///     BasicActivity::new("rent")
///         .with_amount(50_000)
///         .with_template(TransactionTemplate::new("Rent", "Expenses", "Bank")),
/// ));
///
/// let mut entity = Entity::new("acme", GeneralLedger::new("ledger", structure));
/// entity.add_component(office);
///
/// let clock = Clock::new("clock", start, TimePeriod::Month);
/// let mut model = TimeBasedModel::new("model", clock, 12);
/// model.add_entity(entity);
///
/// let results = model.run().unwrap();
/// assert_eq!(results.len(), 12);
/// ```
pub struct TimeBasedModel {
    /// Model name
    name: String,

    /// Clock shared by all entities
    clock: Clock,

    /// Number of periods one run simulates
    period_count: usize,

    /// Participating entities
    entities: Vec<Entity>,
}

impl TimeBasedModel {
    /// Create a new model
    ///
    /// # Panics
    /// Panics if `period_count` is zero
    pub fn new(name: &str, clock: Clock, period_count: usize) -> Self {
        assert!(period_count > 0, "period_count must be positive");
        Self {
            name: name.to_string(),
            clock,
            period_count,
            entities: Vec::new(),
        }
    }

    /// Get model name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the clock
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Get the number of periods one run simulates
    pub fn period_count(&self) -> usize {
        self.period_count
    }

    /// Get the entities
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Look up an entity by name
    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.name() == name)
    }

    /// Add an entity to the model
    pub fn add_entity(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Reset the clock and prepare every entity for a run
    pub fn prepare_to_run(&mut self) -> Result<(), SimulationError> {
        self.clock.reset();
        for entity in &mut self.entities {
            entity.prepare_to_run(&self.clock, self.period_count)?;
        }
        Ok(())
    }

    /// Run every entity at the clock's current period, then advance
    ///
    /// Callers stepping the model manually must call [`prepare_to_run`]
    /// first; [`run`] does both.
    ///
    /// [`prepare_to_run`]: TimeBasedModel::prepare_to_run
    /// [`run`]: TimeBasedModel::run
    pub fn step(&mut self) -> Result<PeriodResult, SimulationError> {
        let period_ix = self.clock.timestep_ix();
        let period_datetime = self.clock.current_datetime()?;

        let before: usize = self
            .entities
            .iter()
            .map(|entity| entity.general_ledger().transactions().len())
            .sum();

        for entity in &mut self.entities {
            entity.run(&self.clock)?;
        }

        let after: usize = self
            .entities
            .iter()
            .map(|entity| entity.general_ledger().transactions().len())
            .sum();

        self.clock.tick();

        let result = PeriodResult {
            period_ix,
            period_datetime,
            transactions_created: after - before,
        };
        debug!(
            model = %self.name,
            period_ix,
            transactions_created = result.transactions_created,
            "period complete"
        );
        Ok(result)
    }

    /// Run the full simulation: prepare, then step through every period
    pub fn run(&mut self) -> Result<Vec<PeriodResult>, SimulationError> {
        info!(
            model = %self.name,
            periods = self.period_count,
            entities = self.entities.len(),
            "starting run"
        );
        self.prepare_to_run()?;

        let mut results = Vec::with_capacity(self.period_count);
        for _ in 0..self.period_count {
            results.push(self.step()?);
        }

        let total: usize = results.iter().map(|r| r.transactions_created).sum();
        info!(model = %self.name, transactions_created = total, "run complete");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::TimePeriod;
    use chrono::NaiveDate;

    #[test]
    #[should_panic(expected = "period_count must be positive")]
    fn test_zero_period_count_panics() {
        let start = NaiveDate::from_ymd_opt(2016, 2, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        TimeBasedModel::new("model", Clock::new("clock", start, TimePeriod::Month), 0);
    }
}
