//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ContactsCommand, ContactsQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub contacts: Arc<dyn ContactsCommand>,
    pub contacts_query: Arc<dyn ContactsQuery>,
}

impl HttpState {
    /// Bundle the contact ports.
    pub fn new(contacts: Arc<dyn ContactsCommand>, contacts_query: Arc<dyn ContactsQuery>) -> Self {
        Self {
            contacts,
            contacts_query,
        }
    }

    /// Use one implementation for both the command and query ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use contact_manager::domain::ContactsService;
    /// use contact_manager::domain::ports::FixtureContactRepository;
    /// use contact_manager::inbound::http::state::HttpState;
    ///
    /// let service = ContactsService::new(Arc::new(FixtureContactRepository::new()));
    /// let _state = HttpState::from_service(Arc::new(service));
    /// ```
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: ContactsCommand + ContactsQuery + 'static,
    {
        Self {
            contacts: service.clone(),
            contacts_query: service,
        }
    }
}
