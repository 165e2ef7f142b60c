//! Rendering of domain errors as failure envelopes.
//!
//! The domain [`Error`] knows nothing about HTTP. This module decides the
//! status line for each [`ErrorCode`] and what part of an error a client is
//! allowed to see.

use actix_web::http::StatusCode;
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{HttpResponse, ResponseError};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};
use crate::inbound::http::envelope::Envelope;

/// Result alias returned by contact handlers.
pub type ApiResult<T> = Result<T, Error>;

const REDACTED_MESSAGE: &str = "Internal server error";

impl From<ErrorCode> for StatusCode {
    fn from(code: ErrorCode) -> Self {
        match code {
            ErrorCode::ValidationFailed | ErrorCode::InvalidRequest => Self::BAD_REQUEST,
            ErrorCode::NotFound => Self::NOT_FOUND,
            ErrorCode::Conflict => Self::CONFLICT,
            ErrorCode::ServiceUnavailable => Self::SERVICE_UNAVAILABLE,
            ErrorCode::InternalError => Self::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Envelope<()> {
    /// Failure envelope exposing only what a client may see of `error`.
    ///
    /// Internal errors keep their status but lose their message and detail
    /// list; the original is logged instead.
    pub fn from_error(error: &Error) -> Self {
        let status = StatusCode::from(error.code());
        if error.code() == ErrorCode::InternalError {
            error!(error = %error, trace_id = ?error.trace_id(), "internal error redacted");
            return Self::failure(status, REDACTED_MESSAGE, Vec::new());
        }
        Self::failure(status, error.message(), error.errors().to_vec())
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        self.code().into()
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = Envelope::from_error(self).into_response();
        if let Some(value) = self.trace_id().and_then(|id| HeaderValue::from_str(id).ok()) {
            response
                .headers_mut()
                .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
        }
        response
    }
}
