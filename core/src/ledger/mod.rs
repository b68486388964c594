//! General ledger: account-validated, append-only transaction journal
//!
//! The ledger owns an account structure and a journal of transactions.
//! `create_transaction` is the single mutation entry point: it validates
//! the request (positive amount, both accounts known) and appends one
//! journal entry. Entries are never modified or deleted afterwards.
//!
//! Validation lives here, not in the activities that emit transactions:
//! an activity supplies whatever its template names, and the ledger is the
//! authority on whether those accounts exist.
//!
//! CRITICAL: All money values are i64 (minor units)

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::transaction::Transaction;

pub mod structure;

pub use structure::GeneralLedgerStructure;

/// Errors that can occur during ledger operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("account {name} already exists in the ledger structure")]
    DuplicateAccount { name: String },

    #[error("account {name} does not exist in the ledger structure")]
    UnknownAccount { name: String },

    #[error("transaction amount must be positive, got {amount}")]
    NonPositiveAmount { amount: i64 },
}

/// An append-only general ledger
///
/// # Example
/// ```
/// use business_simulator_core_rs::{Account, AccountType, GeneralLedger, GeneralLedgerStructure};
/// use chrono::NaiveDate;
///
/// let mut structure = GeneralLedgerStructure::new("structure");
/// structure.add_account(Account::new("Bank", AccountType::Asset)).unwrap();
/// structure.add_account(Account::new("Sales", AccountType::Revenue)).unwrap();
///
/// let mut ledger = GeneralLedger::new("ledger", structure);
/// let datetime = NaiveDate::from_ymd_opt(2016, 2, 1)
///     .unwrap()
///     .and_hms_opt(0, 0, 0)
///     .unwrap();
///
/// ledger
///     .create_transaction("Sale", None, datetime, "Bank", "Sales", "shop/sales", 100_000)
///     .unwrap();
/// assert_eq!(ledger.transactions().len(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralLedger {
    /// Ledger name
    name: String,

    /// Account structure transactions are validated against
    structure: GeneralLedgerStructure,

    /// Journal of all transactions, in creation order
    transactions: Vec<Transaction>,
}

impl GeneralLedger {
    /// Create a new empty ledger over an account structure
    pub fn new(name: &str, structure: GeneralLedgerStructure) -> Self {
        Self {
            name: name.to_string(),
            structure,
            transactions: Vec::new(),
        }
    }

    /// Get ledger name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the account structure
    pub fn structure(&self) -> &GeneralLedgerStructure {
        &self.structure
    }

    /// Get the full journal, in creation order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Create a transaction and append it to the journal
    ///
    /// This is the ledger's only mutation entry point.
    ///
    /// # Arguments
    /// * `name` - Transaction name
    /// * `description` - Optional description
    /// * `tx_datetime` - Simulation datetime of the transaction
    /// * `dt_account` - Debited account name
    /// * `cr_account` - Credited account name
    /// * `source` - Provenance tag of the emitting activity
    /// * `amount` - Amount in minor units (must be positive)
    ///
    /// # Errors
    /// Returns [`LedgerError::NonPositiveAmount`] if `amount <= 0`, or
    /// [`LedgerError::UnknownAccount`] if either account name is absent
    /// from the ledger structure. The journal is untouched on error.
    #[allow(clippy::too_many_arguments)]
    pub fn create_transaction(
        &mut self,
        name: &str,
        description: Option<&str>,
        tx_datetime: NaiveDateTime,
        dt_account: &str,
        cr_account: &str,
        source: &str,
        amount: i64,
    ) -> Result<&Transaction, LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::NonPositiveAmount { amount });
        }
        for account in [dt_account, cr_account] {
            if !self.structure.contains(account) {
                return Err(LedgerError::UnknownAccount {
                    name: account.to_string(),
                });
            }
        }

        let transaction = Transaction::new(
            name,
            description,
            tx_datetime,
            dt_account,
            cr_account,
            source,
            amount,
        );
        debug!(
            ledger = %self.name,
            tx_id = %transaction.id(),
            %dt_account,
            %cr_account,
            %source,
            amount,
            "transaction created"
        );
        self.transactions.push(transaction);

        // Just pushed, so last() is the new entry
        Ok(self.transactions.last().unwrap())
    }

    /// Get all transactions emitted by a given source path
    pub fn transactions_by_source(&self, source: &str) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|tx| tx.source() == source)
            .collect()
    }

    /// Compute an account's balance, optionally as of a datetime (inclusive)
    ///
    /// Debit-normal accounts (asset, expense) accumulate debits minus
    /// credits; credit-normal accounts accumulate credits minus debits.
    ///
    /// # Errors
    /// Returns [`LedgerError::UnknownAccount`] if the account name is
    /// absent from the ledger structure.
    pub fn account_balance(
        &self,
        name: &str,
        as_of: Option<NaiveDateTime>,
    ) -> Result<i64, LedgerError> {
        let account = self
            .structure
            .account(name)
            .ok_or_else(|| LedgerError::UnknownAccount {
                name: name.to_string(),
            })?;

        let mut debits: i64 = 0;
        let mut credits: i64 = 0;
        for tx in &self.transactions {
            if let Some(cutoff) = as_of {
                if tx.tx_datetime() > cutoff {
                    continue;
                }
            }
            if tx.dt_account() == name {
                debits += tx.amount();
            }
            if tx.cr_account() == name {
                credits += tx.amount();
            }
        }

        if account.account_type().is_debit_normal() {
            Ok(debits - credits)
        } else {
            Ok(credits - debits)
        }
    }
}
