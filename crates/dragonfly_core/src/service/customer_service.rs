//! Customer screen use-cases.
//!
//! # Responsibility
//! - Own the customer collection shown by the customers screen.
//! - Apply model transforms and replace entries in place.
//! - Emit one notification per completed or rejected operation.
//!
//! # Invariants
//! - Rejected operations leave the collection unchanged.
//! - Edits keep `value`/`last_purchase`; only `record_value` moves them.
//! - Deleting a customer does not touch invoices that reference it.

use crate::export::csv::{export_customers_csv, export_filename};
use crate::model::contact::{Contact, ContactDraft, ContactId, Tagged};
use crate::model::customer::{
    promote_to_customer_on, set_status, update_value_on, Customer, CustomerDetails,
    CustomerExtensionPatch, CustomerStatus,
};
use crate::model::validation::ValidationError;
use crate::notify::{Notification, NotificationSink};
use crate::search::filter::filter_collection;
use crate::service::error::{ServiceError, ServiceResult};
use chrono::NaiveDate;
use log::{info, warn};

/// Rendered CSV export ready to be handed to a download collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
    pub rows: usize,
}

/// Customer screen state.
pub struct CustomerService<N: NotificationSink> {
    customers: Vec<Customer>,
    sink: N,
}

impl<N: NotificationSink> CustomerService<N> {
    /// Creates the screen over an injected initial collection.
    pub fn new(customers: Vec<Customer>, sink: N) -> Self {
        Self { customers, sink }
    }

    pub fn list(&self) -> &[Customer] {
        &self.customers
    }

    pub fn get(&self, id: ContactId) -> Option<&Customer> {
        self.customers.iter().find(|customer| customer.id() == id)
    }

    /// Customers matching the search box, in collection order.
    pub fn search(&self, query: &str) -> Vec<Customer> {
        filter_collection(&self.customers, query)
    }

    /// Adds a customer from the customer form.
    pub fn add(
        &mut self,
        draft: ContactDraft,
        details: CustomerDetails,
        today: NaiveDate,
    ) -> ServiceResult<Customer> {
        let contact = Contact::from_draft(draft);
        let customer = promote_to_customer_on(&contact, Some(details.into()), today);
        self.insert(customer, "Customer added", |name| {
            format!("{name} has been added as a new customer.")
        })
    }

    /// Promotes an existing contact into this collection under its own id.
    pub fn promote_contact(
        &mut self,
        contact: &Contact,
        patch: Option<CustomerExtensionPatch>,
        today: NaiveDate,
    ) -> ServiceResult<Customer> {
        let customer = promote_to_customer_on(contact, patch, today);
        self.insert(customer, "Customer added", |name| {
            format!("{name} is now a customer.")
        })
    }

    /// Replaces contact fields and editable details of one customer.
    pub fn update(
        &mut self,
        id: ContactId,
        draft: ContactDraft,
        details: CustomerDetails,
    ) -> ServiceResult<Customer> {
        let index = self.position(id, "Customer not updated")?;
        let edited = self.customers[index].edit(draft, details);
        self.replace(index, edited, "customer_update")
    }

    /// Adds `delta` to a customer's lifetime value. NaN or infinite deltas
    /// are rejected.
    pub fn record_value(
        &mut self,
        id: ContactId,
        delta: f64,
        today: NaiveDate,
    ) -> ServiceResult<Customer> {
        let index = self.position(id, "Customer not updated")?;
        if !delta.is_finite() {
            let err = ValidationError::NonFiniteAmount(delta);
            return Err(self.reject("Customer not updated", err.into()));
        }
        let next = update_value_on(&self.customers[index], delta, today);
        self.replace(index, next, "customer_value")
    }

    pub fn set_status(&mut self, id: ContactId, status: CustomerStatus) -> ServiceResult<Customer> {
        let index = self.position(id, "Customer not updated")?;
        let next = set_status(&self.customers[index], status);
        self.replace(index, next, "customer_status")
    }

    /// Adds a tag; a blank or present tag changes nothing and stays silent.
    pub fn add_tag(&mut self, id: ContactId, tag: &str) -> ServiceResult<Customer> {
        let index = self.position(id, "Customer not updated")?;
        let next = self.customers[index].add_tag(tag);
        if next == self.customers[index] {
            return Ok(next);
        }
        self.replace(index, next, "customer_tag_add")
    }

    /// Removes a tag; an absent tag changes nothing and stays silent.
    pub fn remove_tag(&mut self, id: ContactId, tag: &str) -> ServiceResult<Customer> {
        let index = self.position(id, "Customer not updated")?;
        let next = self.customers[index].remove_tag(tag);
        if next == self.customers[index] {
            return Ok(next);
        }
        self.replace(index, next, "customer_tag_remove")
    }

    /// Removes one customer and returns it.
    pub fn delete(&mut self, id: ContactId) -> ServiceResult<Customer> {
        let index = self.position(id, "Customer not deleted")?;
        let removed = self.customers.remove(index);
        info!(
            "event=customer_delete module=service status=ok id={} remaining={}",
            id,
            self.customers.len()
        );
        self.sink.notify(Notification::destructive(
            "Customer deleted",
            "The customer has been removed from your list.",
        ));
        Ok(removed)
    }

    /// Renders the whole collection as CSV.
    pub fn export_csv(&self, today: NaiveDate) -> CsvExport {
        let export = CsvExport {
            filename: export_filename(today),
            content: export_customers_csv(&self.customers),
            rows: self.customers.len(),
        };
        info!(
            "event=customer_export module=service status=ok rows={}",
            export.rows
        );
        self.sink.notify(Notification::success(
            "Export successful",
            format!("{} customers exported to CSV.", export.rows),
        ));
        export
    }

    fn insert(
        &mut self,
        customer: Customer,
        title: &str,
        describe: impl FnOnce(&str) -> String,
    ) -> ServiceResult<Customer> {
        if let Err(err) = customer.validate() {
            return Err(self.reject("Customer not saved", err.into()));
        }
        if self.get(customer.id()).is_some() {
            let err = ValidationError::DuplicateId(customer.id());
            return Err(self.reject("Customer not saved", err.into()));
        }

        self.customers.push(customer.clone());
        info!(
            "event=customer_add module=service status=ok id={} total={}",
            customer.id(),
            self.customers.len()
        );
        self.sink
            .notify(Notification::success(title, describe(customer.name())));
        Ok(customer)
    }

    fn replace(
        &mut self,
        index: usize,
        customer: Customer,
        event: &str,
    ) -> ServiceResult<Customer> {
        if let Err(err) = customer.validate() {
            return Err(self.reject("Customer not updated", err.into()));
        }

        self.customers[index] = customer.clone();
        info!(
            "event={} module=service status=ok id={}",
            event,
            customer.id()
        );
        self.sink.notify(Notification::success(
            "Customer updated",
            format!("{}'s information has been updated.", customer.name()),
        ));
        Ok(customer)
    }

    fn position(&self, id: ContactId, title: &str) -> ServiceResult<usize> {
        match self.customers.iter().position(|customer| customer.id() == id) {
            Some(index) => Ok(index),
            None => Err(self.reject(
                title,
                ServiceError::NotFound {
                    entity: "customer",
                    id,
                },
            )),
        }
    }

    fn reject(&self, title: &str, err: ServiceError) -> ServiceError {
        warn!(
            "event=customer_reject module=service status=error reason={}",
            err.code()
        );
        self.sink
            .notify(Notification::error(title, err.to_string()));
        err
    }
}
