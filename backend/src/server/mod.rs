//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod state_builders;

pub use config::ServerConfig;
#[cfg(feature = "metrics")]
pub(crate) use metrics::make_metrics;

#[cfg(feature = "metrics")]
use metrics::MetricsLayer;
use state_builders::{DbPoolProbe, build_http_state};

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use asset_ledger::Trace;
#[cfg(debug_assertions)]
use asset_ledger::doc::ApiDoc;
use asset_ledger::inbound::http::api_scope;
use asset_ledger::inbound::http::health::{HealthState, live, ready};
use asset_ledger::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
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
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api_scope())
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Build the health state with the database readiness probe attached.
#[must_use]
pub fn health_state_for(config: &ServerConfig) -> web::Data<HealthState> {
    web::Data::new(
        HealthState::new().with_probe(Arc::new(DbPoolProbe::new(config.db_pool.clone()))),
    )
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config.db_pool);
    let ServerConfig {
        bind_addr,
        db_pool: _,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;

    #[cfg(feature = "metrics")]
    let metrics_layer = MetricsLayer::from_option(prometheus);

    let server = HttpServer::new(move || {
        let app = build_app(server_health_state.clone(), http_state.clone());

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics_layer.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "http server listening");
    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use asset_ledger::test_support::{InMemoryInventory, MutableClock};
    use rstest::rstest;
    use serde_json::Value;
    use state_builders::{Repositories, build_http_state_with};

    fn in_memory_state() -> web::Data<HttpState> {
        let inventory = Arc::new(InMemoryInventory::seeded());
        web::Data::new(build_http_state_with(
            Repositories {
                assets: inventory.clone(),
                asset_types: inventory.clone(),
                users: inventory.clone(),
                ledger: inventory,
            },
            Arc::new(MutableClock::default()),
        ))
    }

    #[rstest]
    #[actix_web::test]
    async fn app_serves_api_and_probes_with_trace_header() {
        let health = web::Data::new(HealthState::new());
        health.mark_ready();
        let app = actix_test::init_service(build_app(health, in_memory_state())).await;

        let probe = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        assert_eq!(probe.status(), StatusCode::OK);
        assert!(probe.headers().contains_key("trace-id"));

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/v1/asset-types").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Vec<Value> = actix_test::read_body_json(response).await;
        assert_eq!(body.len(), 4);
    }
}
