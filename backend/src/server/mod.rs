//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerSettings;
pub use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::error::JsonPayloadError;
use actix_web::{App, HttpRequest, HttpServer, web};
use std::net::SocketAddr;
use tracing::debug;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::Error;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{companies, users};

const INVALID_JSON_BODY: &str = "Invalid JSON body";

// Undecodable bodies use the same error envelope as every other failure. The
// parser diagnostic stays in the logs.
fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, path = %req.path(), "rejected request body");
    Error::invalid_request(INVALID_JSON_BODY).into()
}

/// Assemble the application: tracing, JSON limits, routes and, in debug
/// builds, Swagger UI under `/apidocs`.
pub fn build_app(
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(Trace)
        .configure(users::configure)
        .configure(companies::configure);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/apidocs/{_:.*}").url("/apidocs/openapi.json", ApiDoc::openapi()),
    );

    app
}

/// Bind an Actix HTTP server serving [`build_app`].
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(http_state: HttpState, bind_addr: SocketAddr) -> std::io::Result<Server> {
    let http_state = web::Data::new(http_state);
    let server = HttpServer::new(move || build_app(http_state.clone()))
        .bind(bind_addr)?
        .run();
    Ok(server)
}
