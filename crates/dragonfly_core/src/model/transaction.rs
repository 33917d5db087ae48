//! Transaction model.
//!
//! Flat income/expense records. Categories come from a fixed list per kind,
//! and the account is referenced by name.

use crate::model::account::Account;
use crate::model::validation::{require, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type TransactionId = Uuid;

pub const INCOME_CATEGORIES: &[&str] = &[
    "Sales",
    "Services",
    "Interest",
    "Investments",
    "Other Income",
];

pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Office Supplies",
    "Rent",
    "Utilities",
    "Software",
    "Marketing",
    "Travel",
    "Meals",
    "Salaries",
    "Other Expense",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    #[default]
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Categories selectable for this kind.
    pub fn categories(self) -> &'static [&'static str] {
        match self {
            Self::Income => INCOME_CATEGORIES,
            Self::Expense => EXPENSE_CATEGORIES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub date: NaiveDate,
    pub description: String,
    /// Always positive; direction comes from `kind`.
    pub amount: f64,
    pub kind: TransactionKind,
    pub category: String,
    /// Name of the account the money moved through.
    pub account: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub kind: TransactionKind,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub account: String,
}

impl Transaction {
    /// Validates a draft against the known accounts and builds a transaction.
    ///
    /// # Errors
    /// - `MissingField` for blank description, category or account.
    /// - `InvalidAmount` for zero, negative or non-finite amounts.
    /// - `UnknownCategory` when the category is not listed for the kind.
    /// - `UnknownAccount` when no account has that name.
    pub fn submit(
        draft: TransactionDraft,
        accounts: &[Account],
        today: NaiveDate,
    ) -> Result<Self, ValidationError> {
        require("description", &draft.description)?;
        if !draft.amount.is_finite() || draft.amount <= 0.0 {
            return Err(ValidationError::InvalidAmount(draft.amount));
        }
        require("category", &draft.category)?;
        require("account", &draft.account)?;

        let category = draft.category.trim();
        if !draft.kind.categories().contains(&category) {
            return Err(ValidationError::UnknownCategory {
                kind: draft.kind.as_str(),
                category: category.to_string(),
            });
        }
        let account = draft.account.trim();
        if !accounts.iter().any(|known| known.name == account) {
            return Err(ValidationError::UnknownAccount(account.to_string()));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            date: draft.date.unwrap_or(today),
            description: draft.description.trim().to_string(),
            amount: draft.amount,
            kind: draft.kind,
            category: category.to_string(),
            account: account.to_string(),
        })
    }

    /// Amount with sign applied: income positive, expense negative.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Transaction, TransactionDraft, TransactionKind};
    use crate::model::account::default_accounts;
    use crate::model::validation::ValidationError;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn draft() -> TransactionDraft {
        TransactionDraft {
            date: None,
            description: "Printer paper".to_string(),
            amount: 42.5,
            kind: TransactionKind::Expense,
            category: "Office Supplies".to_string(),
            account: "Cash".to_string(),
        }
    }

    #[test]
    fn submit_defaults_date_to_today() {
        let txn = Transaction::submit(draft(), &default_accounts(), today()).unwrap();
        assert_eq!(txn.date, today());
        assert_eq!(txn.signed_amount(), -42.5);
    }

    #[test]
    fn category_must_match_kind() {
        let mut input = draft();
        input.kind = TransactionKind::Income;
        let err = Transaction::submit(input, &default_accounts(), today()).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownCategory { .. }));
    }

    #[test]
    fn rejects_non_positive_amount() {
        let mut input = draft();
        input.amount = 0.0;
        let err = Transaction::submit(input, &default_accounts(), today()).unwrap_err();
        assert_eq!(err, ValidationError::InvalidAmount(0.0));
    }

    #[test]
    fn rejects_unknown_account() {
        let mut input = draft();
        input.account = "Offshore".to_string();
        let err = Transaction::submit(input, &default_accounts(), today()).unwrap_err();
        assert_eq!(err, ValidationError::UnknownAccount("Offshore".to_string()));
    }
}
