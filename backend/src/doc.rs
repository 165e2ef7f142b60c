//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: the contact CRUD endpoints and the health probes
//! - **Schemas**: the request and response bodies plus concrete envelope
//!   wrappers, which give the generic response envelope a documented shape
//!   without coupling it to utoipa
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::contacts::{ContactRequest, ContactResponse};
use crate::inbound::http::schemas::{
    ContactEnvelopeSchema, ContactPageEnvelopeSchema, ContactPageSchema, ErrorEnvelopeSchema,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Contact manager API",
        description = "CRUD, search, sorting, and paging over a contact list, plus health probes.",
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::contacts::create_contact,
        crate::inbound::http::contacts::list_contacts,
        crate::inbound::http::contacts::get_contact,
        crate::inbound::http::contacts::update_contact,
        crate::inbound::http::contacts::delete_contact,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ContactRequest,
        ContactResponse,
        ContactPageSchema,
        ContactEnvelopeSchema,
        ContactPageEnvelopeSchema,
        ErrorEnvelopeSchema
    )),
    tags(
        (name = "contacts", description = "Create, read, update, delete, and search contacts"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
