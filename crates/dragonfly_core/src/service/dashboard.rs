//! All screens of one dashboard session.
//!
//! # Responsibility
//! - Build every screen from one injected seed.
//! - Route operations that read one screen and write another.
//!
//! # Invariants
//! - Screens never share collections; cross-screen operations copy data.
//! - Promoting a contact leaves it in the contact list.
//! - After promotion the contact and the customer are separate records that
//!   share an id; edits on one screen are not mirrored to the other.
//! - Deleting a customer leaves invoices that reference it in place.

use crate::config::DashboardSeed;
use crate::model::contact::ContactId;
use crate::model::customer::{Customer, CustomerExtensionPatch};
use crate::model::invoice::{Invoice, InvoiceDraft, InvoiceId};
use crate::notify::{Notification, NotificationSink};
use crate::service::contact_service::ContactService;
use crate::service::customer_service::CustomerService;
use crate::service::error::{ServiceError, ServiceResult};
use crate::service::invoice_service::InvoiceService;
use crate::service::transaction_service::TransactionService;
use chrono::NaiveDate;
use log::{info, warn};

pub struct Dashboard<N: NotificationSink + Clone> {
    contacts: ContactService<N>,
    customers: CustomerService<N>,
    invoices: InvoiceService<N>,
    transactions: TransactionService<N>,
    sink: N,
}

impl<N: NotificationSink + Clone> Dashboard<N> {
    /// Builds all screens; each gets its own clone of `sink`.
    pub fn from_seed(seed: DashboardSeed, sink: N) -> Self {
        info!(
            "event=dashboard_init module=service status=ok contacts={} customers={} invoices={} transactions={}",
            seed.contacts.len(),
            seed.customers.len(),
            seed.invoices.len(),
            seed.transactions.len()
        );
        Self {
            contacts: ContactService::new(seed.contacts, sink.clone()),
            customers: CustomerService::new(seed.customers, sink.clone()),
            invoices: InvoiceService::new(seed.invoices, sink.clone()),
            transactions: TransactionService::new(seed.transactions, seed.accounts, sink.clone()),
            sink,
        }
    }

    pub fn contacts(&self) -> &ContactService<N> {
        &self.contacts
    }

    pub fn contacts_mut(&mut self) -> &mut ContactService<N> {
        &mut self.contacts
    }

    pub fn customers(&self) -> &CustomerService<N> {
        &self.customers
    }

    pub fn customers_mut(&mut self) -> &mut CustomerService<N> {
        &mut self.customers
    }

    pub fn invoices(&self) -> &InvoiceService<N> {
        &self.invoices
    }

    pub fn invoices_mut(&mut self) -> &mut InvoiceService<N> {
        &mut self.invoices
    }

    pub fn transactions(&self) -> &TransactionService<N> {
        &self.transactions
    }

    pub fn transactions_mut(&mut self) -> &mut TransactionService<N> {
        &mut self.transactions
    }

    /// Creates an invoice against the current customer list.
    pub fn create_invoice(
        &mut self,
        draft: InvoiceDraft,
        today: NaiveDate,
    ) -> ServiceResult<Invoice> {
        self.invoices.create(draft, self.customers.list(), today)
    }

    /// Revises an invoice. A customer reference that is kept unchanged is not
    /// looked up again, so invoices of deleted customers stay editable.
    pub fn update_invoice(&mut self, id: InvoiceId, draft: InvoiceDraft) -> ServiceResult<Invoice> {
        self.invoices.update(id, draft, self.customers.list())
    }

    /// Copies a contact into the customer list under the same id.
    ///
    /// The copy is a snapshot: later contact edits do not reach the customer
    /// and customer edits do not reach the contact.
    pub fn promote_contact(
        &mut self,
        id: ContactId,
        patch: Option<CustomerExtensionPatch>,
        today: NaiveDate,
    ) -> ServiceResult<Customer> {
        let Some(contact) = self.contacts.get(id).cloned() else {
            let err = ServiceError::NotFound {
                entity: "contact",
                id,
            };
            warn!(
                "event=contact_promote module=service status=error reason={}",
                err.code()
            );
            self.sink
                .notify(Notification::error("Customer not saved", err.to_string()));
            return Err(err);
        };
        self.customers.promote_contact(&contact, patch, today)
    }
}
