//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use diesel::prelude::*;

use crate::domain::{Contact, ContactDraft, ContactId};

use super::schema::contacts;

/// Row struct for reading from the contacts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = contacts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ContactRow {
    pub id: i32,
    pub name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        Self {
            id: ContactId::new(row.id),
            name: row.name,
            phone_number: row.phone_number,
            email: row.email,
            address: row.address,
        }
    }
}

/// Insertable struct for new contacts; the id comes from the sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = contacts)]
pub(crate) struct NewContactRow<'a> {
    pub name: &'a str,
    pub phone_number: &'a str,
    pub email: Option<&'a str>,
    pub address: Option<&'a str>,
}

/// Changeset replacing every mutable column, clearing absent optionals.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = contacts)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ContactChangeset<'a> {
    pub name: &'a str,
    pub phone_number: &'a str,
    pub email: Option<&'a str>,
    pub address: Option<&'a str>,
}

impl<'a> From<&'a ContactDraft> for NewContactRow<'a> {
    fn from(draft: &'a ContactDraft) -> Self {
        Self {
            name: draft.name(),
            phone_number: draft.phone_number(),
            email: draft.email(),
            address: draft.address(),
        }
    }
}

impl<'a> From<&'a ContactDraft> for ContactChangeset<'a> {
    fn from(draft: &'a ContactDraft) -> Self {
        Self {
            name: draft.name(),
            phone_number: draft.phone_number(),
            email: draft.email(),
            address: draft.address(),
        }
    }
}
