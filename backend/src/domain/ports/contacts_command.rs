//! Driving port for contact mutations.
//!
//! HTTP handlers call [`ContactsCommand`] to create, overwrite, and remove
//! contacts. Field validation has already happened by the time a
//! [`ContactDraft`] reaches this port; implementations own existence and
//! uniqueness checks.

use async_trait::async_trait;

use crate::domain::{Contact, ContactDraft, ContactId, Error};

/// Domain use-case port for changing contacts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactsCommand: Send + Sync {
    /// Store a new contact and return it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns a conflict error naming each field that another contact
    /// already uses, or a service error if the store fails.
    async fn create(&self, draft: ContactDraft) -> Result<Contact, Error>;

    /// Overwrite every mutable field of an existing contact.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when no contact has `id`, a conflict error
    /// when a different contact already uses the phone number or email, or a
    /// service error if the store fails.
    async fn update(&self, id: ContactId, draft: ContactDraft) -> Result<Contact, Error>;

    /// Remove a contact and return the record as it was before removal.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when no contact has `id`, or a service error
    /// if the store fails.
    async fn delete(&self, id: ContactId) -> Result<Contact, Error>;
}
