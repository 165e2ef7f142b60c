//! Shared harness for contacts API integration tests.
//!
//! Builds the same service stack the binary serves, backed by the in-memory
//! store, and offers small helpers for issuing JSON requests.

use std::sync::Arc;

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use contact_manager::Trace;
use contact_manager::domain::ContactsService;
use contact_manager::domain::ports::FixtureContactRepository;
use contact_manager::inbound::http::contacts_scope;
use contact_manager::inbound::http::state::HttpState;
use serde_json::{Value, json};

/// Initialise the contacts API over an empty store.
pub async fn init_app() -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>
{
    let service = Arc::new(ContactsService::new(Arc::new(
        FixtureContactRepository::new(),
    )));
    test::init_service(
        App::new()
            .app_data(web::Data::new(HttpState::from_service(service)))
            .wrap(Trace)
            .service(contacts_scope()),
    )
    .await
}

/// Response status, `trace-id` header, and decoded envelope.
pub struct Reply {
    pub status: StatusCode,
    pub trace_id: Option<String>,
    pub body: Value,
}

pub async fn send(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    request: TestRequest,
) -> Reply {
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let trace_id = response
        .headers()
        .get("trace-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = test::read_body(response).await;
    let body = serde_json::from_slice(&bytes).expect("envelope JSON");
    Reply {
        status,
        trace_id,
        body,
    }
}

pub fn contact(name: &str, phone: &str, email: Option<&str>) -> Value {
    json!({
        "name": name,
        "phoneNumber": phone,
        "email": email,
        "address": null,
    })
}

/// Create a contact, asserting success, and return its assigned id.
pub async fn create(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    payload: Value,
) -> i64 {
    let reply = send(
        app,
        TestRequest::post().uri("/api/contacts").set_json(payload),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK, "create failed: {}", reply.body);
    reply.body["data"]["id"].as_i64().expect("assigned id")
}

/// Names on a listing page, in order.
pub fn names(body: &Value) -> Vec<String> {
    body["data"]["data"]
        .as_array()
        .expect("page items")
        .iter()
        .map(|item| item["name"].as_str().expect("name").to_owned())
        .collect()
}
