//! Contact screen use-cases.
//!
//! # Invariants
//! - Ids are assigned on add and never change on update.
//! - Rejected operations leave the collection unchanged.

use crate::model::contact::{Contact, ContactDraft, ContactId, Tagged};
use crate::notify::{Notification, NotificationSink};
use crate::search::filter::filter_collection;
use crate::service::error::{ServiceError, ServiceResult};
use log::{info, warn};

/// Contact screen state.
pub struct ContactService<N: NotificationSink> {
    contacts: Vec<Contact>,
    sink: N,
}

impl<N: NotificationSink> ContactService<N> {
    pub fn new(contacts: Vec<Contact>, sink: N) -> Self {
        Self { contacts, sink }
    }

    pub fn list(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn get(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|contact| contact.id == id)
    }

    pub fn search(&self, query: &str) -> Vec<Contact> {
        filter_collection(&self.contacts, query)
    }

    /// Submits the contact form as a new contact.
    pub fn add(&mut self, draft: ContactDraft) -> ServiceResult<Contact> {
        let contact = Contact::from_draft(draft);
        if let Err(err) = contact.validate() {
            return Err(self.reject("Contact not saved", err.into()));
        }

        self.contacts.push(contact.clone());
        info!(
            "event=contact_add module=service status=ok id={} total={}",
            contact.id,
            self.contacts.len()
        );
        self.sink.notify(Notification::success(
            "Contact added",
            format!("{} has been added to your contacts.", contact.name),
        ));
        Ok(contact)
    }

    /// Submits the contact form as an edit of `id`.
    pub fn update(&mut self, id: ContactId, draft: ContactDraft) -> ServiceResult<Contact> {
        let index = self.position(id, "Contact not updated")?;
        let edited = self.contacts[index].with_draft(draft);
        self.replace(index, edited)
    }

    pub fn add_tag(&mut self, id: ContactId, tag: &str) -> ServiceResult<Contact> {
        let index = self.position(id, "Contact not updated")?;
        let next = self.contacts[index].add_tag(tag);
        if next == self.contacts[index] {
            return Ok(next);
        }
        self.replace(index, next)
    }

    pub fn remove_tag(&mut self, id: ContactId, tag: &str) -> ServiceResult<Contact> {
        let index = self.position(id, "Contact not updated")?;
        let next = self.contacts[index].remove_tag(tag);
        if next == self.contacts[index] {
            return Ok(next);
        }
        self.replace(index, next)
    }

    pub fn delete(&mut self, id: ContactId) -> ServiceResult<Contact> {
        let index = self.position(id, "Contact not deleted")?;
        let removed = self.contacts.remove(index);
        info!(
            "event=contact_delete module=service status=ok id={} remaining={}",
            id,
            self.contacts.len()
        );
        self.sink.notify(Notification::destructive(
            "Contact deleted",
            "The contact has been removed from your list.",
        ));
        Ok(removed)
    }

    fn replace(&mut self, index: usize, contact: Contact) -> ServiceResult<Contact> {
        if let Err(err) = contact.validate() {
            return Err(self.reject("Contact not updated", err.into()));
        }

        self.contacts[index] = contact.clone();
        info!(
            "event=contact_update module=service status=ok id={}",
            contact.id
        );
        self.sink.notify(Notification::success(
            "Contact updated",
            format!("{}'s information has been updated.", contact.name),
        ));
        Ok(contact)
    }

    fn position(&self, id: ContactId, title: &str) -> ServiceResult<usize> {
        self.contacts
            .iter()
            .position(|contact| contact.id == id)
            .ok_or_else(|| {
                self.reject(
                    title,
                    ServiceError::NotFound {
                        entity: "contact",
                        id,
                    },
                )
            })
    }

    fn reject(&self, title: &str, err: ServiceError) -> ServiceError {
        warn!(
            "event=contact_reject module=service status=error reason={}",
            err.code()
        );
        self.sink.notify(Notification::error(title, err.to_string()));
        err
    }
}
