//! General ledger structure: the set of accounts a ledger may book against.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ledger::LedgerError;
use crate::models::account::Account;

/// The account structure of a general ledger
///
/// Account names are unique within a structure. The ledger consults the
/// structure to validate every transaction-creation request.
///
/// # Example
/// ```
/// use business_simulator_core_rs::{Account, AccountType, GeneralLedgerStructure};
///
/// let mut structure = GeneralLedgerStructure::new("structure");
/// structure.add_account(Account::new("Bank", AccountType::Asset)).unwrap();
/// assert!(structure.contains("Bank"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralLedgerStructure {
    /// Structure name
    name: String,

    /// Accounts keyed by name
    accounts: BTreeMap<String, Account>,
}

impl GeneralLedgerStructure {
    /// Create a new empty structure
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            accounts: BTreeMap::new(),
        }
    }

    /// Get structure name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add an account to the structure
    ///
    /// # Errors
    /// Returns [`LedgerError::DuplicateAccount`] if an account with the
    /// same name already exists.
    pub fn add_account(&mut self, account: Account) -> Result<(), LedgerError> {
        if self.accounts.contains_key(account.name()) {
            return Err(LedgerError::DuplicateAccount {
                name: account.name().to_string(),
            });
        }
        self.accounts.insert(account.name().to_string(), account);
        Ok(())
    }

    /// Look up an account by name
    pub fn account(&self, name: &str) -> Option<&Account> {
        self.accounts.get(name)
    }

    /// Check whether an account name exists in the structure
    pub fn contains(&self, name: &str) -> bool {
        self.accounts.contains_key(name)
    }

    /// Number of accounts in the structure
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the structure has no accounts
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Iterate over the accounts in name order
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }
}
