//! Uniform JSON wrapper for every contacts API response.
//!
//! Success and failure share one shape so clients can branch on `success`
//! without inspecting the status line. Absent `data` and `errors` are
//! serialised as `null`.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Response envelope generic over the payload type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub status_code: u16,
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    pub errors: Option<Vec<String>>,
}

impl<T> Envelope<T> {
    /// Successful response carrying `data`.
    pub fn success(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            status_code: status.as_u16(),
            success: true,
            message: message.into(),
            data: Some(data),
            errors: None,
        }
    }

    /// Failed response with no payload.
    ///
    /// An empty `errors` list is rendered as `null`.
    pub fn failure(status: StatusCode, message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            success: false,
            message: message.into(),
            data: None,
            errors: (!errors.is_empty()).then_some(errors),
        }
    }
}

impl<T: Serialize> Envelope<T> {
    /// Render as a JSON response whose status line matches `status_code`.
    pub fn into_response(self) -> HttpResponse {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK);
        HttpResponse::build(status).json(self)
    }
}
