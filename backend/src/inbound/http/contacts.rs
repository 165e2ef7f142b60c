//! Contacts HTTP handlers.
//!
//! ```text
//! POST   /api/contacts
//! GET    /api/contacts?searchTerm=&sortBy=&sortDescending=&pageNumber=&pageSize=
//! GET    /api/contacts/{id}
//! PUT    /api/contacts/{id}
//! DELETE /api/contacts/{id}
//! ```
//!
//! Every response, success or failure, is an [`Envelope`].

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, PageRequest, PageRequestError};
use serde::{Deserialize, Deserializer, Serialize, de};
use tracing::warn;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Contact, ContactDraft, ContactFields, ContactId, ContactListQuery, ContactSort, Error,
    SearchTerm, SortDirection, SortField,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::schemas::{
    ContactEnvelopeSchema, ContactPageEnvelopeSchema, ErrorEnvelopeSchema,
};
use crate::inbound::http::state::HttpState;

/// Request payload for creating or replacing a contact.
///
/// Any `id` in the body is ignored; identifiers come from the store or the
/// request path.
#[derive(Debug, Default, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    #[schema(example = "+44 20 7946 000")]
    pub phone_number: Option<String>,
    #[schema(example = "ada@example.org")]
    pub email: Option<String>,
    pub address: Option<String>,
}

impl From<ContactRequest> for ContactFields {
    fn from(value: ContactRequest) -> Self {
        Self {
            name: value.name,
            phone_number: value.phone_number,
            email: value.email,
            address: value.address,
        }
    }
}

/// Stored contact as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    #[schema(example = 1)]
    pub id: i32,
    pub name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl From<Contact> for ContactResponse {
    fn from(value: Contact) -> Self {
        Self {
            id: value.id.get(),
            name: value.name,
            phone_number: value.phone_number,
            email: value.email,
            address: value.address,
        }
    }
}

/// Query parameters accepted by the listing endpoint.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase", default)]
#[into_params(parameter_in = Query)]
pub struct ListContactsParams {
    /// Case-insensitive substring matched against name, phone number, and
    /// email.
    pub search_term: Option<String>,
    /// One of `name`, `phoneNumber`, or `email`; anything else sorts by name.
    pub sort_by: Option<String>,
    /// `true` or `false` in any letter case.
    #[serde(deserialize_with = "caseless_bool")]
    pub sort_descending: bool,
    /// One-based page number.
    #[param(example = 1)]
    pub page_number: i32,
    #[param(example = 10)]
    pub page_size: i32,
}

impl Default for ListContactsParams {
    fn default() -> Self {
        Self {
            search_term: None,
            sort_by: None,
            sort_descending: false,
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn caseless_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(de::Error::invalid_value(
            de::Unexpected::Str(&raw),
            &"`true` or `false`",
        )),
    }
}

fn map_page_error(err: PageRequestError) -> Error {
    let message = match err {
        PageRequestError::InvalidPageNumber { .. } => "Invalid page number",
        PageRequestError::InvalidPageSize { .. } => "Invalid page size",
    };
    Error::invalid_request(message).with_errors([err.to_string()])
}

impl TryFrom<ListContactsParams> for ContactListQuery {
    type Error = Error;

    fn try_from(params: ListContactsParams) -> Result<Self, Self::Error> {
        let page = PageRequest::new(params.page_number, params.page_size).map_err(map_page_error)?;
        Ok(Self {
            search: params.search_term.as_deref().and_then(SearchTerm::parse),
            sort: ContactSort {
                field: params
                    .sort_by
                    .as_deref()
                    .map(SortField::parse_lenient)
                    .unwrap_or_default(),
                direction: SortDirection::from_descending(params.sort_descending),
            },
            page,
        })
    }
}

fn parse_draft(payload: ContactRequest, operation: &str) -> Result<ContactDraft, Error> {
    ContactDraft::try_new(payload.into()).map_err(|errors| {
        warn!(operation, errors = %errors, "contact validation failed");
        Error::validation(errors.messages())
    })
}

fn contact_envelope(message: &str, contact: Contact) -> HttpResponse {
    Envelope::success(StatusCode::OK, message, ContactResponse::from(contact)).into_response()
}

/// Create a contact.
#[utoipa::path(
    post,
    path = "/api/contacts",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Contact created", body = ContactEnvelopeSchema),
        (status = 400, description = "Validation failed", body = ErrorEnvelopeSchema),
        (status = 409, description = "Phone number or email already in use", body = ErrorEnvelopeSchema)
    ),
    tags = ["contacts"],
    operation_id = "createContact"
)]
#[post("/contacts")]
pub async fn create_contact(
    state: web::Data<HttpState>,
    payload: web::Json<ContactRequest>,
) -> ApiResult<HttpResponse> {
    let draft = parse_draft(payload.into_inner(), "create")?;
    let contact = state.contacts.create(draft).await?;
    Ok(contact_envelope("Contact created successfully", contact))
}

/// List contacts with optional search, sort, and paging.
#[utoipa::path(
    get,
    path = "/api/contacts",
    params(ListContactsParams),
    responses(
        (status = 200, description = "One page of contacts", body = ContactPageEnvelopeSchema),
        (status = 400, description = "Invalid page number or size", body = ErrorEnvelopeSchema)
    ),
    tags = ["contacts"],
    operation_id = "listContacts"
)]
#[get("/contacts")]
pub async fn list_contacts(
    state: web::Data<HttpState>,
    params: web::Query<ListContactsParams>,
) -> ApiResult<HttpResponse> {
    let query = ContactListQuery::try_from(params.into_inner())?;
    let page = state.contacts_query.list(&query).await?;
    let message = if page.total_count == 0 {
        "No contacts found"
    } else {
        "Contacts retrieved successfully"
    };
    Ok(Envelope::success(StatusCode::OK, message, page.map(ContactResponse::from)).into_response())
}

/// Fetch a contact by identifier.
#[utoipa::path(
    get,
    path = "/api/contacts/{id}",
    params(("id" = i32, Path, description = "Contact identifier")),
    responses(
        (status = 200, description = "Contact found", body = ContactEnvelopeSchema),
        (status = 404, description = "Contact not found", body = ErrorEnvelopeSchema)
    ),
    tags = ["contacts"],
    operation_id = "getContact"
)]
#[get("/contacts/{id}")]
pub async fn get_contact(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let contact = state
        .contacts_query
        .get(ContactId::new(path.into_inner()))
        .await?;
    Ok(contact_envelope("Contact retrieved successfully", contact))
}

/// Replace every field of an existing contact.
#[utoipa::path(
    put,
    path = "/api/contacts/{id}",
    params(("id" = i32, Path, description = "Contact identifier")),
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Contact updated", body = ContactEnvelopeSchema),
        (status = 400, description = "Validation failed", body = ErrorEnvelopeSchema),
        (status = 404, description = "Contact not found", body = ErrorEnvelopeSchema),
        (status = 409, description = "Phone number or email already in use", body = ErrorEnvelopeSchema)
    ),
    tags = ["contacts"],
    operation_id = "updateContact"
)]
#[put("/contacts/{id}")]
pub async fn update_contact(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<ContactRequest>,
) -> ApiResult<HttpResponse> {
    let id = ContactId::new(path.into_inner());
    let draft = parse_draft(payload.into_inner(), "update")?;
    let contact = state.contacts.update(id, draft).await?;
    Ok(contact_envelope("Contact updated successfully", contact))
}

/// Delete a contact, returning the removed record.
#[utoipa::path(
    delete,
    path = "/api/contacts/{id}",
    params(("id" = i32, Path, description = "Contact identifier")),
    responses(
        (status = 200, description = "Contact deleted", body = ContactEnvelopeSchema),
        (status = 404, description = "Contact not found", body = ErrorEnvelopeSchema)
    ),
    tags = ["contacts"],
    operation_id = "deleteContact"
)]
#[delete("/contacts/{id}")]
pub async fn delete_contact(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let contact = state
        .contacts
        .delete(ContactId::new(path.into_inner()))
        .await?;
    Ok(contact_envelope("Contact deleted successfully", contact))
}
