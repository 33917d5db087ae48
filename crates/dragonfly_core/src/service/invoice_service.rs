//! Invoice screen use-cases.
//!
//! # Invariants
//! - A draft is accepted or rejected as a whole.
//! - Customer references are checked against the customer list passed in at
//!   save time; the invoice screen keeps no customer state of its own.

use crate::model::customer::Customer;
use crate::model::invoice::{Invoice, InvoiceDraft, InvoiceId, InvoiceStatus};
use crate::notify::{Notification, NotificationSink};
use crate::service::error::{ServiceError, ServiceResult};
use chrono::NaiveDate;
use log::{info, warn};

/// Invoice screen state.
pub struct InvoiceService<N: NotificationSink> {
    invoices: Vec<Invoice>,
    sink: N,
}

impl<N: NotificationSink> InvoiceService<N> {
    pub fn new(invoices: Vec<Invoice>, sink: N) -> Self {
        Self { invoices, sink }
    }

    pub fn list(&self) -> &[Invoice] {
        &self.invoices
    }

    pub fn get(&self, id: InvoiceId) -> Option<&Invoice> {
        self.invoices.iter().find(|invoice| invoice.id == id)
    }

    /// Submits the invoice form as a new invoice.
    pub fn create(
        &mut self,
        draft: InvoiceDraft,
        customers: &[Customer],
        today: NaiveDate,
    ) -> ServiceResult<Invoice> {
        let invoice = match Invoice::submit(draft, customers, today) {
            Ok(invoice) => invoice,
            Err(err) => return Err(self.reject("Invoice not saved", err.into())),
        };

        self.invoices.push(invoice.clone());
        info!(
            "event=invoice_create module=service status=ok id={} items={} total={}",
            invoice.id,
            invoice.items.len(),
            invoice.total
        );
        self.sink.notify(Notification::success(
            "Invoice created",
            format!("Invoice {} has been created.", invoice.invoice_number),
        ));
        Ok(invoice)
    }

    /// Submits the invoice form as an edit of `id`.
    pub fn update(
        &mut self,
        id: InvoiceId,
        draft: InvoiceDraft,
        customers: &[Customer],
    ) -> ServiceResult<Invoice> {
        let index = self.position(id, "Invoice not updated")?;
        let revised = match self.invoices[index].revise(draft, customers) {
            Ok(invoice) => invoice,
            Err(err) => return Err(self.reject("Invoice not updated", err.into())),
        };
        self.store(index, revised, "invoice_update")
    }

    /// Moves an invoice to `status`; any transition is allowed.
    pub fn set_status(&mut self, id: InvoiceId, status: InvoiceStatus) -> ServiceResult<Invoice> {
        let index = self.position(id, "Invoice not updated")?;
        let next = self.invoices[index].with_status(status);
        self.store(index, next, "invoice_status")
    }

    pub fn delete(&mut self, id: InvoiceId) -> ServiceResult<Invoice> {
        let index = self.position(id, "Invoice not deleted")?;
        let removed = self.invoices.remove(index);
        info!(
            "event=invoice_delete module=service status=ok id={} remaining={}",
            id,
            self.invoices.len()
        );
        self.sink.notify(Notification::destructive(
            "Invoice deleted",
            format!("Invoice {} has been removed.", removed.invoice_number),
        ));
        Ok(removed)
    }

    /// Sum of totals of invoices not yet paid.
    pub fn total_outstanding(&self) -> f64 {
        self.invoices
            .iter()
            .filter(|invoice| !invoice.is_paid())
            .map(|invoice| invoice.total)
            .sum()
    }

    /// Sum of totals of paid invoices.
    pub fn total_paid(&self) -> f64 {
        self.invoices
            .iter()
            .filter(|invoice| invoice.is_paid())
            .map(|invoice| invoice.total)
            .sum()
    }

    fn store(&mut self, index: usize, invoice: Invoice, event: &str) -> ServiceResult<Invoice> {
        self.invoices[index] = invoice.clone();
        info!(
            "event={} module=service status=ok id={} invoice_status={}",
            event,
            invoice.id,
            invoice.status.as_str()
        );
        self.sink.notify(Notification::success(
            "Invoice updated",
            format!("Invoice {} has been updated.", invoice.invoice_number),
        ));
        Ok(invoice)
    }

    fn position(&self, id: InvoiceId, title: &str) -> ServiceResult<usize> {
        self.invoices
            .iter()
            .position(|invoice| invoice.id == id)
            .ok_or_else(|| {
                self.reject(
                    title,
                    ServiceError::NotFound {
                        entity: "invoice",
                        id,
                    },
                )
            })
    }

    fn reject(&self, title: &str, err: ServiceError) -> ServiceError {
        warn!(
            "event=invoice_reject module=service status=error reason={}",
            err.code()
        );
        self.sink.notify(Notification::error(title, err.to_string()));
        err
    }
}
