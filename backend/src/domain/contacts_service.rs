//! Contacts domain service.
//!
//! Implements the [`ContactsCommand`] and [`ContactsQuery`] driving ports on
//! top of a [`ContactRepository`]. Writes run existence, then uniqueness,
//! then the mutation; nothing is written when an earlier step fails.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::Paged;
use tracing::{info, warn};

use crate::domain::ports::{
    ContactRepository, ContactRepositoryError, ContactsCommand, ContactsQuery, DuplicateField,
};
use crate::domain::{Contact, ContactDraft, ContactId, ContactListQuery, DuplicateProbe, Error};

const CONTACT_NOT_FOUND: &str = "Contact not found";
const DUPLICATE_CONTACT: &str = "Duplicate contact detected";

/// Contacts service implementing the driving ports.
#[derive(Clone)]
pub struct ContactsService<R> {
    repo: Arc<R>,
}

impl<R> ContactsService<R> {
    /// Create a new service over the given repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

fn phone_taken(phone_number: &str) -> String {
    format!("A contact with the phone number '{phone_number}' already exists.")
}

fn email_taken(email: &str) -> String {
    format!("A contact with the email address '{email}' already exists.")
}

impl<R> ContactsService<R>
where
    R: ContactRepository,
{
    fn map_repository_error(error: ContactRepositoryError) -> Error {
        match error {
            ContactRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("contact repository unavailable: {message}"))
            }
            ContactRepositoryError::Query { message } => {
                Error::internal(format!("contact repository error: {message}"))
            }
            ContactRepositoryError::Duplicate { field } => {
                Error::conflict(DUPLICATE_CONTACT).with_errors([format!(
                    "A contact with the same {field} already exists."
                )])
            }
        }
    }

    /// Map a write failure, naming the offending value when the store
    /// reports a uniqueness violation the pre-check missed.
    fn map_write_error(error: ContactRepositoryError, draft: &ContactDraft) -> Error {
        let message = match error {
            ContactRepositoryError::Duplicate {
                field: DuplicateField::PhoneNumber,
            } => phone_taken(draft.phone_number()),
            ContactRepositoryError::Duplicate {
                field: DuplicateField::Email,
            } => match draft.email() {
                Some(email) => email_taken(email),
                None => return Self::map_repository_error(error),
            },
            _ => return Self::map_repository_error(error),
        };
        Error::conflict(DUPLICATE_CONTACT).with_errors([message])
    }

    /// Per-field collision messages, phone number first.
    fn duplicate_messages(probe: &DuplicateProbe, existing: &[Contact]) -> Vec<String> {
        let mut messages = Vec::new();
        if existing.iter().any(|c| probe.phone_matches(c)) {
            messages.push(phone_taken(&probe.phone_number));
        }
        let taken_email = probe
            .email
            .as_deref()
            .filter(|_| existing.iter().any(|c| probe.email_matches(c)));
        if let Some(email) = taken_email {
            messages.push(email_taken(email));
        }
        messages
    }

    async fn ensure_unique(&self, probe: &DuplicateProbe) -> Result<(), Error> {
        let existing = self
            .repo
            .find_duplicates(probe)
            .await
            .map_err(Self::map_repository_error)?;
        let messages = Self::duplicate_messages(probe, &existing);
        if messages.is_empty() {
            return Ok(());
        }
        warn!(errors = %messages.join("; "), "duplicate contact rejected");
        Err(Error::conflict(DUPLICATE_CONTACT).with_errors(messages))
    }

    async fn ensure_exists(&self, id: ContactId, missing: &str) -> Result<Contact, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found(CONTACT_NOT_FOUND).with_errors([missing]))
    }
}

#[async_trait]
impl<R> ContactsCommand for ContactsService<R>
where
    R: ContactRepository,
{
    async fn create(&self, draft: ContactDraft) -> Result<Contact, Error> {
        self.ensure_unique(&draft.duplicate_probe(None)).await?;

        let contact = self
            .repo
            .insert(&draft)
            .await
            .map_err(|err| Self::map_write_error(err, &draft))?;
        info!(contact_id = %contact.id, "contact created");
        Ok(contact)
    }

    async fn update(&self, id: ContactId, draft: ContactDraft) -> Result<Contact, Error> {
        const MISSING: &str = "The contact you are trying to update does not exist.";

        self.ensure_exists(id, MISSING).await?;
        self.ensure_unique(&draft.duplicate_probe(Some(id))).await?;

        let updated = self
            .repo
            .update(id, &draft)
            .await
            .map_err(|err| Self::map_write_error(err, &draft))?
            .ok_or_else(|| Error::not_found(CONTACT_NOT_FOUND).with_errors([MISSING]))?;
        info!(contact_id = %id, "contact updated");
        Ok(updated)
    }

    async fn delete(&self, id: ContactId) -> Result<Contact, Error> {
        const MISSING: &str = "The contact you are trying to delete does not exist.";

        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found(CONTACT_NOT_FOUND).with_errors([MISSING]))?;
        info!(contact_id = %id, "contact deleted");
        Ok(deleted)
    }
}

#[async_trait]
impl<R> ContactsQuery for ContactsService<R>
where
    R: ContactRepository,
{
    async fn list(&self, query: &ContactListQuery) -> Result<Paged<Contact>, Error> {
        let total = self
            .repo
            .count_matching(query)
            .await
            .map_err(Self::map_repository_error)?;
        if total == 0 {
            return Ok(Paged::empty(query.page));
        }

        let contacts = self
            .repo
            .list(query)
            .await
            .map_err(Self::map_repository_error)?;
        Ok(Paged::new(contacts, total, query.page))
    }

    async fn get(&self, id: ContactId) -> Result<Contact, Error> {
        self.ensure_exists(id, "The requested contact does not exist.")
            .await
    }
}

#[cfg(test)]
#[path = "contacts_service_tests.rs"]
mod tests;
