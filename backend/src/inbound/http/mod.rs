//! HTTP inbound adapter exposing REST endpoints.

pub mod contacts;
pub mod envelope;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod validation;

use actix_web::{Scope, web};

pub use error::ApiResult;

use self::contacts::{create_contact, delete_contact, get_contact, list_contacts, update_contact};

/// Contacts API mounted under `/api`, with extractor failures rendered as
/// envelopes.
pub fn contacts_scope() -> Scope {
    web::scope("/api")
        .app_data(validation::json_config())
        .app_data(validation::query_config())
        .app_data(validation::path_config())
        .service(create_contact)
        .service(list_contacts)
        .service(get_contact)
        .service(update_contact)
        .service(delete_contact)
}
