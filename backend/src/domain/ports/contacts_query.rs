//! Driving port for contact reads.

use async_trait::async_trait;
use pagination::Paged;

use crate::domain::{Contact, ContactId, ContactListQuery, Error};

/// Domain use-case port for reading contacts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactsQuery: Send + Sync {
    /// Fetch one page of contacts matching the query.
    ///
    /// `total_count` reflects every contact matching the search term, not
    /// just the returned page.
    async fn list(&self, query: &ContactListQuery) -> Result<Paged<Contact>, Error>;

    /// Fetch a single contact, failing with not-found when it is missing.
    async fn get(&self, id: ContactId) -> Result<Contact, Error>;
}
