//! Business Simulator Core - Rust Engine
//!
//! Discrete-event business simulator: periodic activities generate
//! double-entry transactions against per-entity general ledgers, driven by
//! a shared clock.
//!
//! # Architecture
//!
//! - **core**: Clock and period/datetime mapping
//! - **models**: Domain types (Account, Transaction, TransactionTemplate)
//! - **ledger**: General ledger structure and append-only journal
//! - **activity**: Activity trait, execution windows, BasicActivity
//! - **structure**: Entity/component hierarchy and path assignment
//! - **engine**: Time-based model loop
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 (minor units)
//! 2. The ledger journal is append-only; `create_transaction` is its only
//!    mutation entry point
//! 3. An activity performs at most one ledger mutation per period

// Module declarations
pub mod activity;
pub mod core;
pub mod engine;
pub mod ledger;
pub mod models;
pub mod structure;

// Re-exports for convenience
pub use activity::{Activity, ActivityError, BasicActivity, ExecutionWindow};
pub use crate::core::clock::{Clock, ClockError, TimePeriod};
pub use engine::{PeriodResult, SimulationError, TimeBasedModel};
pub use ledger::{GeneralLedger, GeneralLedgerStructure, LedgerError};
pub use models::{
    account::{Account, AccountType},
    transaction::{Transaction, TransactionTemplate},
};
pub use structure::{Component, Entity};
