//! Transaction model
//!
//! Represents one journal entry: a transfer of an amount from a credit
//! account to a debit account at a point in simulation time, tagged with
//! the hierarchical path of the activity that emitted it.
//!
//! CRITICAL: All money values are i64 (minor units)

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A recorded general ledger transaction
///
/// Transactions are created through
/// [`GeneralLedger::create_transaction`](crate::GeneralLedger::create_transaction)
/// and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction identifier (UUID)
    id: String,

    /// Transaction name
    name: String,

    /// Optional description
    description: Option<String>,

    /// Simulation datetime at which the transaction occurred
    tx_datetime: NaiveDateTime,

    /// Debited account name
    dt_account: String,

    /// Credited account name
    cr_account: String,

    /// Provenance tag: hierarchical path of the emitting activity
    source: String,

    /// Transaction amount (i64 minor units)
    amount: i64,
}

impl Transaction {
    /// Create a new transaction
    ///
    /// # Panics
    /// Panics if `amount <= 0`. The ledger validates amounts before
    /// constructing transactions; this assertion guards direct callers.
    pub(crate) fn new(
        name: &str,
        description: Option<&str>,
        tx_datetime: NaiveDateTime,
        dt_account: &str,
        cr_account: &str,
        source: &str,
        amount: i64,
    ) -> Self {
        assert!(amount > 0, "amount must be positive");

        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: description.map(|d| d.to_string()),
            tx_datetime,
            dt_account: dt_account.to_string(),
            cr_account: cr_account.to_string(),
            source: source.to_string(),
            amount,
        }
    }

    /// Get transaction ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get transaction name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get description
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Get the simulation datetime of the transaction
    pub fn tx_datetime(&self) -> NaiveDateTime {
        self.tx_datetime
    }

    /// Get debited account name
    pub fn dt_account(&self) -> &str {
        &self.dt_account
    }

    /// Get credited account name
    pub fn cr_account(&self) -> &str {
        &self.cr_account
    }

    /// Get the provenance tag of the emitting activity
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Get transaction amount (i64 minor units)
    pub fn amount(&self) -> i64 {
        self.amount
    }
}

/// Immutable description of a recurring transaction
///
/// A template names the two accounts and the metadata stamped onto every
/// transaction an activity emits. Templates are plain owned values; cloning
/// one into an activity gives that activity its own copy, so no sharing
/// takes place between activity instances.
///
/// # Example
/// ```
/// use business_simulator_core_rs::TransactionTemplate;
///
/// let template = TransactionTemplate::new("Rent", "Expenses", "Bank")
///     .with_description("Monthly office rent");
///
/// assert_eq!(template.dt_account(), "Expenses");
/// assert_eq!(template.cr_account(), "Bank");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionTemplate {
    /// Name stamped onto generated transactions
    name: String,

    /// Optional description stamped onto generated transactions
    description: Option<String>,

    /// Debited account name
    dt_account: String,

    /// Credited account name
    cr_account: String,
}

impl TransactionTemplate {
    /// Create a new transaction template
    pub fn new(name: &str, dt_account: &str, cr_account: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            dt_account: dt_account.to_string(),
            cr_account: cr_account.to_string(),
        }
    }

    /// The placeholder template used when an activity is built without one
    ///
    /// Its accounts exist in no ledger structure; an activity still
    /// carrying it is rejected at the ledger with an unknown-account error.
    pub fn unknown() -> Self {
        Self::new("Unknown", "Unknown", "Unknown")
    }

    /// Set description (builder pattern)
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Get template name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get description
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Get debited account name
    pub fn dt_account(&self) -> &str {
        &self.dt_account
    }

    /// Get credited account name
    pub fn cr_account(&self) -> &str {
        &self.cr_account
    }
}
