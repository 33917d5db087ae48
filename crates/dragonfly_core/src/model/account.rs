//! Ledger accounts.

use crate::model::transaction::Transaction;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type AccountId = Uuid;

/// Account names offered when none are seeded.
pub const DEFAULT_ACCOUNT_NAMES: &[&str] =
    &["Cash", "Checking Account", "Savings Account", "Credit Card"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    #[serde(default)]
    pub balance: f64,
}

impl Account {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            balance: 0.0,
        }
    }

    /// Returns a copy with the transaction's signed amount added.
    pub fn apply(&self, transaction: &Transaction) -> Self {
        Self {
            balance: self.balance + transaction.signed_amount(),
            ..self.clone()
        }
    }

    /// Returns a copy with the transaction's signed amount removed.
    pub fn revert(&self, transaction: &Transaction) -> Self {
        Self {
            balance: self.balance - transaction.signed_amount(),
            ..self.clone()
        }
    }
}

/// Zero-balance accounts for [`DEFAULT_ACCOUNT_NAMES`].
pub fn default_accounts() -> Vec<Account> {
    DEFAULT_ACCOUNT_NAMES.iter().map(|name| Account::new(*name)).collect()
}
