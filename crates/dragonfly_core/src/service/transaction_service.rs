//! Transaction screen use-cases.
//!
//! Recording a transaction adds its signed amount to the named account;
//! deleting one takes it back out. Balances are plain sums.

use crate::model::account::Account;
use crate::model::transaction::{Transaction, TransactionDraft, TransactionId, TransactionKind};
use crate::notify::{Notification, NotificationSink};
use crate::service::error::{ServiceError, ServiceResult};
use chrono::NaiveDate;
use log::{info, warn};

/// Income/expense sums over the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LedgerTotals {
    pub income: f64,
    pub expense: f64,
    /// `income - expense`.
    pub net: f64,
}

/// Transaction screen state.
pub struct TransactionService<N: NotificationSink> {
    transactions: Vec<Transaction>,
    accounts: Vec<Account>,
    sink: N,
}

impl<N: NotificationSink> TransactionService<N> {
    /// Seeded transactions are assumed to be reflected in seeded balances.
    pub fn new(transactions: Vec<Transaction>, accounts: Vec<Account>, sink: N) -> Self {
        Self {
            transactions,
            accounts,
            sink,
        }
    }

    pub fn list(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn account(&self, name: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.name == name)
    }

    /// Validates and appends a transaction, updating the account balance.
    pub fn record(
        &mut self,
        draft: TransactionDraft,
        today: NaiveDate,
    ) -> ServiceResult<Transaction> {
        let transaction = match Transaction::submit(draft, &self.accounts, today) {
            Ok(transaction) => transaction,
            Err(err) => {
                let err = ServiceError::from(err);
                warn!(
                    "event=transaction_reject module=service status=error reason={}",
                    err.code()
                );
                self.sink
                    .notify(Notification::error("Transaction not saved", err.to_string()));
                return Err(err);
            }
        };

        if let Some(account) = self
            .accounts
            .iter_mut()
            .find(|account| account.name == transaction.account)
        {
            *account = account.apply(&transaction);
        }
        self.transactions.push(transaction.clone());
        info!(
            "event=transaction_record module=service status=ok id={} kind={}",
            transaction.id,
            transaction.kind.as_str()
        );
        self.sink.notify(Notification::success(
            "Transaction recorded",
            format!(
                "{} of {:.2} recorded in {}.",
                capitalize(transaction.kind.as_str()),
                transaction.amount,
                transaction.account
            ),
        ));
        Ok(transaction)
    }

    /// Removes a transaction and reverts its effect on the account balance.
    pub fn delete(&mut self, id: TransactionId) -> ServiceResult<Transaction> {
        let Some(index) = self.transactions.iter().position(|txn| txn.id == id) else {
            let err = ServiceError::NotFound {
                entity: "transaction",
                id,
            };
            warn!(
                "event=transaction_reject module=service status=error reason={}",
                err.code()
            );
            self.sink
                .notify(Notification::error("Transaction not deleted", err.to_string()));
            return Err(err);
        };

        let removed = self.transactions.remove(index);
        if let Some(account) = self
            .accounts
            .iter_mut()
            .find(|account| account.name == removed.account)
        {
            *account = account.revert(&removed);
        }
        info!(
            "event=transaction_delete module=service status=ok id={}",
            id
        );
        self.sink.notify(Notification::destructive(
            "Transaction deleted",
            "The transaction has been removed from the ledger.",
        ));
        Ok(removed)
    }

    pub fn totals(&self) -> LedgerTotals {
        let mut totals = LedgerTotals::default();
        for transaction in &self.transactions {
            match transaction.kind {
                TransactionKind::Income => totals.income += transaction.amount,
                TransactionKind::Expense => totals.expense += transaction.amount,
            }
        }
        totals.net = totals.income - totals.expense;
        totals
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
