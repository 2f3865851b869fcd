//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use pantry::Trace;
#[cfg(debug_assertions)]
use pantry::doc::ApiDoc;
use pantry::inbound::http::configure_api;
use pantry::inbound::http::health::{HealthState, live, ready};
use pantry::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
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
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure_api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state, marked ready once the listener is bound.
/// - `config`: pre-built [`ServerConfig`] with the bind address, token verifier
///   and optional database pool.
///
/// # Returns
/// A [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(&config);
    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state,
    };

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(config.bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test;
    use pantry::domain::TRACE_ID_HEADER;
    use pantry::domain::ports::StubTokenVerifier;
    use serde_json::{Value, json};

    fn deps() -> AppDependencies {
        let config = ServerConfig::new(
            SocketAddr::from(([127, 0, 0, 1], 0)),
            Arc::new(StubTokenVerifier::default()),
        );
        let health = web::Data::new(HealthState::new());
        health.mark_ready();
        AppDependencies {
            health_state: health,
            http_state: build_http_state(&config),
        }
    }

    #[actix_web::test]
    async fn app_serves_probes_without_credentials() {
        let app = test::init_service(build_app(deps())).await;
        let response = test::call_service(
            &app,
            test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(TRACE_ID_HEADER));
    }

    #[actix_web::test]
    async fn app_routes_api_through_trace_and_auth() {
        let app = test::init_service(build_app(deps())).await;

        let anonymous = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/recipes").to_request(),
        )
        .await;
        assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);
        let trace_header = anonymous
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body: Value = test::read_body_json(anonymous).await;
        assert_eq!(body["traceId"].as_str().map(str::to_owned), trace_header);

        let created = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/grocery-lists")
                .insert_header(("Authorization", "Bearer dev"))
                .set_json(json!({"name": "Weekly Shopping"}))
                .to_request(),
        )
        .await;
        assert_eq!(created.status(), StatusCode::OK);
        let body: Value = test::read_body_json(created).await;
        assert_eq!(body["userId"], "test-user");
    }

    #[actix_web::test]
    async fn create_server_binds_and_marks_ready() {
        let health = web::Data::new(HealthState::new());
        let config = ServerConfig::new(
            SocketAddr::from(([127, 0, 0, 1], 0)),
            Arc::new(StubTokenVerifier::default()),
        );
        assert_eq!(config.bind_addr().port(), 0);
        let server = create_server(health.clone(), config).expect("server binds");
        assert!(health.is_ready());
        let handle = server.handle();
        actix_rt::spawn(server);
        handle.stop(false).await;
    }
}
