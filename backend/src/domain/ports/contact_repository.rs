//! Port for contact persistence.
//!
//! The [`ContactRepository`] trait is the driven port behind the contacts
//! service. Adapters provide filter/sort/skip/take/count over a contact
//! table plus single-record reads and writes.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{Contact, ContactDraft, ContactId, ContactListQuery, DuplicateProbe};

use super::define_port_error;

/// Uniquely constrained contact column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DuplicateField {
    PhoneNumber,
    Email,
}

impl fmt::Display for DuplicateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PhoneNumber => f.write_str("phone number"),
            Self::Email => f.write_str("email"),
        }
    }
}

define_port_error! {
    /// Errors raised by contact repository adapters.
    pub enum ContactRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "contact repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "contact repository query failed: {message}",
        /// A write violated the store's uniqueness rule for a column.
        Duplicate { field: DuplicateField } =>
            "contact repository rejected duplicate {field}",
    }
}

/// Port for contact storage and retrieval.
///
/// Implementations acquire their store handle per call and release it before
/// returning. No call spans more than one statement, so the duplicate check
/// performed by callers before a write is not atomic with that write;
/// adapters report uniqueness violations on write as
/// [`ContactRepositoryError::Duplicate`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Fetch a contact by identifier.
    async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>, ContactRepositoryError>;

    /// Fetch every contact whose phone number or (present) email equals the
    /// probe's, skipping the probe's excluded identifier.
    async fn find_duplicates(
        &self,
        probe: &DuplicateProbe,
    ) -> Result<Vec<Contact>, ContactRepositoryError>;

    /// Count contacts matching the query's search term; sort and page are
    /// ignored.
    async fn count_matching(&self, query: &ContactListQuery) -> Result<u64, ContactRepositoryError>;

    /// Fetch one page of contacts matching the query, in sort order.
    async fn list(&self, query: &ContactListQuery) -> Result<Vec<Contact>, ContactRepositoryError>;

    /// Persist a new contact, letting the store assign the identifier.
    async fn insert(&self, draft: &ContactDraft) -> Result<Contact, ContactRepositoryError>;

    /// Overwrite the mutable fields of an existing contact.
    ///
    /// Returns `None` when no contact has the identifier.
    async fn update(
        &self,
        id: ContactId,
        draft: &ContactDraft,
    ) -> Result<Option<Contact>, ContactRepositoryError>;

    /// Remove a contact, returning the removed record.
    ///
    /// Returns `None` when no contact has the identifier.
    async fn delete(&self, id: ContactId) -> Result<Option<Contact>, ContactRepositoryError>;
}

#[derive(Debug)]
struct FixtureState {
    next_id: i32,
    contacts: BTreeMap<ContactId, Contact>,
}

impl Default for FixtureState {
    fn default() -> Self {
        Self {
            next_id: 1,
            contacts: BTreeMap::new(),
        }
    }
}

impl FixtureState {
    /// Emulates the unique indexes on `phone_number` and `email`.
    fn check_unique(&self, draft: &ContactDraft, id: Option<ContactId>) -> Result<(), ContactRepositoryError> {
        let probe = draft.duplicate_probe(id);
        let mut others = self.contacts.values().filter(|c| probe.matches(c));
        match others.next() {
            Some(other) if other.phone_number == draft.phone_number() => {
                Err(ContactRepositoryError::duplicate(DuplicateField::PhoneNumber))
            }
            Some(_) => Err(ContactRepositoryError::duplicate(DuplicateField::Email)),
            None => Ok(()),
        }
    }
}

/// In-memory repository used when no database is configured and in tests.
///
/// Identifiers start at 1 and are never reused, like a serial column.
#[derive(Debug, Default)]
pub struct FixtureContactRepository {
    state: Mutex<FixtureState>,
}

impl FixtureContactRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<T>(
        &self,
        f: impl FnOnce(&mut FixtureState) -> Result<T, ContactRepositoryError>,
    ) -> Result<T, ContactRepositoryError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| ContactRepositoryError::query("fixture store lock poisoned"))?;
        f(&mut state)
    }

    fn matching(state: &FixtureState, query: &ContactListQuery) -> Vec<Contact> {
        state
            .contacts
            .values()
            .filter(|c| query.search.as_ref().is_none_or(|term| term.matches(c)))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ContactRepository for FixtureContactRepository {
    async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>, ContactRepositoryError> {
        self.with_state(|state| Ok(state.contacts.get(&id).cloned()))
    }

    async fn find_duplicates(
        &self,
        probe: &DuplicateProbe,
    ) -> Result<Vec<Contact>, ContactRepositoryError> {
        self.with_state(|state| {
            Ok(state
                .contacts
                .values()
                .filter(|c| probe.matches(c))
                .cloned()
                .collect())
        })
    }

    async fn count_matching(&self, query: &ContactListQuery) -> Result<u64, ContactRepositoryError> {
        self.with_state(|state| {
            let total = Self::matching(state, query).len();
            u64::try_from(total).map_err(|err| ContactRepositoryError::query(err.to_string()))
        })
    }

    async fn list(&self, query: &ContactListQuery) -> Result<Vec<Contact>, ContactRepositoryError> {
        self.with_state(|state| {
            let mut contacts = Self::matching(state, query);
            contacts.sort_by(|a, b| query.sort.compare(a, b));
            let skip = usize::try_from(query.page.offset()).unwrap_or(usize::MAX);
            let take = usize::try_from(query.page.limit()).unwrap_or(usize::MAX);
            Ok(contacts.into_iter().skip(skip).take(take).collect())
        })
    }

    async fn insert(&self, draft: &ContactDraft) -> Result<Contact, ContactRepositoryError> {
        self.with_state(|state| {
            state.check_unique(draft, None)?;
            let id = ContactId::new(state.next_id);
            state.next_id = state
                .next_id
                .checked_add(1)
                .ok_or_else(|| ContactRepositoryError::query("identifier sequence exhausted"))?;
            let contact = Contact::from_draft(id, draft.clone());
            state.contacts.insert(id, contact.clone());
            Ok(contact)
        })
    }

    async fn update(
        &self,
        id: ContactId,
        draft: &ContactDraft,
    ) -> Result<Option<Contact>, ContactRepositoryError> {
        self.with_state(|state| {
            if !state.contacts.contains_key(&id) {
                return Ok(None);
            }
            state.check_unique(draft, Some(id))?;
            Ok(state.contacts.get_mut(&id).map(|contact| {
                contact.overwrite(draft.clone());
                contact.clone()
            }))
        })
    }

    async fn delete(&self, id: ContactId) -> Result<Option<Contact>, ContactRepositoryError> {
        self.with_state(|state| Ok(state.contacts.remove(&id)))
    }
}
