//! OpenAPI schema definitions for envelope and page types.
//!
//! [`Envelope`](crate::inbound::http::envelope::Envelope) and
//! [`pagination::Paged`] are generic and framework-agnostic, so they do not
//! derive `ToSchema`. The concrete wrappers below mirror each shape the API
//! actually returns and exist only for documentation.

use utoipa::ToSchema;

use crate::inbound::http::contacts::ContactResponse;

/// One page of contacts.
#[derive(ToSchema)]
#[schema(as = ContactPage, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ContactPageSchema {
    /// Contacts matching the search across all pages.
    #[schema(example = 42)]
    total_count: u64,
    /// Contacts on this page.
    #[schema(example = 10)]
    current_page_data_count: u64,
    #[schema(example = 1)]
    page_number: u32,
    #[schema(example = 10)]
    page_size: u32,
    data: Vec<ContactResponse>,
}

/// Envelope carrying a single contact.
#[derive(ToSchema)]
#[schema(as = ContactEnvelope, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ContactEnvelopeSchema {
    #[schema(example = 200)]
    status_code: u16,
    success: bool,
    #[schema(example = "Contact retrieved successfully")]
    message: String,
    data: Option<ContactResponse>,
    errors: Option<Vec<String>>,
}

/// Envelope carrying one page of contacts.
#[derive(ToSchema)]
#[schema(as = ContactPageEnvelope, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ContactPageEnvelopeSchema {
    #[schema(example = 200)]
    status_code: u16,
    success: bool,
    #[schema(example = "Contacts retrieved successfully")]
    message: String,
    data: Option<ContactPageSchema>,
    errors: Option<Vec<String>>,
}

/// Failure envelope; `data` is always `null`.
#[derive(ToSchema)]
#[schema(as = ErrorEnvelope, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorEnvelopeSchema {
    #[schema(example = 404)]
    status_code: u16,
    #[schema(example = false)]
    success: bool,
    #[schema(example = "Contact not found")]
    message: String,
    #[schema(value_type = Option<Object>)]
    data: Option<serde_json::Value>,
    #[schema(example = json!(["The requested contact does not exist."]))]
    errors: Option<Vec<String>>,
}
