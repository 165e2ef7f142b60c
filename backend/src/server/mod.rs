//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use contact_manager::Trace;
use contact_manager::inbound::http::contacts_scope;
use contact_manager::inbound::http::health::{HealthState, live, ready};
use contact_manager::inbound::http::state::HttpState;

/// Shared state handed to every worker's [`App`].
#[derive(Clone)]
pub(crate) struct AppDependencies {
    pub(crate) health: web::Data<HealthState>,
    pub(crate) contacts: web::Data<HttpState>,
}

impl AppDependencies {
    /// Mount the contacts API and health probes.
    fn register(self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.health)
            .app_data(self.contacts)
            .service(contacts_scope())
            .service(ready)
            .service(live);
    }
}

/// Swagger UI at `/docs`, backed by `/api-docs/openapi.json`.
#[cfg(debug_assertions)]
fn register_docs(cfg: &mut web::ServiceConfig) {
    use contact_manager::ApiDoc;
    use utoipa::OpenApi;
    use utoipa_swagger_ui::SwaggerUi;

    cfg.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
}

#[cfg(not(debug_assertions))]
fn register_docs(_: &mut web::ServiceConfig) {}

pub(crate) fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(Trace)
        .configure(|cfg| deps.register(cfg))
        .configure(register_docs)
}

/// Bind the contacts API to the configured address.
///
/// `health_state` is marked ready once the listener is bound; the returned
/// [`Server`] must be awaited to accept connections.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the socket cannot be bound.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let deps = AppDependencies {
        health: health_state.clone(),
        contacts: build_http_state(&config),
    };

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(config.bind_addr())?
        .run();

    health_state.mark_ready();
    Ok(server)
}
