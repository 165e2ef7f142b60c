//! Extractor error handlers for inbound HTTP adapters.
//!
//! Actix rejects malformed bodies, query strings, and path segments before a
//! handler runs. These handlers turn those rejections into the same failure
//! envelope every other error uses.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, web};
use tracing::warn;

use crate::domain::Error;

const INVALID_REQUEST: &str = "Invalid request";

fn reject(source: &str, detail: String, req: &HttpRequest) -> actix_web::Error {
    warn!(path = %req.path(), source, error = %detail, "request rejected before handler");
    Error::invalid_request(INVALID_REQUEST)
        .with_errors([detail])
        .into()
}

fn json_error(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    reject("body", err.to_string(), req)
}

fn query_error(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    reject("query", err.to_string(), req)
}

fn path_error(err: PathError, req: &HttpRequest) -> actix_web::Error {
    reject("path", err.to_string(), req)
}

/// JSON body configuration rendering parse failures as envelopes.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error)
}

/// Query string configuration rendering parse failures as envelopes.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error)
}

/// Path configuration rendering parse failures as envelopes.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error)
}
