//! Domain primitives, ports, and services.
//!
//! Purpose: Define strongly typed contact entities and the use-case service
//! consumed by the HTTP adapter. Types here know nothing about HTTP or SQL.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure with a stable category.
//! - ContactDraft / Contact: validated fields and stored records.
//! - ContactListQuery: search, sort, and page for listings.
//! - ContactsService: implementation of the driving ports.

pub mod contact;
pub mod contact_listing;
pub mod contacts_service;
pub mod error;
pub mod ports;
pub mod trace_id;

pub use self::contact::{
    ADDRESS_MAX, Contact, ContactDraft, ContactFields, ContactId, ContactValidationError,
    ContactValidationErrors, DuplicateProbe, NAME_MAX, PHONE_MAX, PHONE_MIN,
};
pub use self::contact_listing::{
    ContactListQuery, ContactSort, SearchTerm, SortDirection, SortField,
};
pub use self::contacts_service::ContactsService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
