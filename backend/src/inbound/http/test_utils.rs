//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test as actix_test, web};
use serde::de::DeserializeOwned;

use crate::domain::ports::{
    MockAssetCommand, MockAssetQuery, MockAssetTypeCommand, MockAssetTypeQuery, MockUserCommand,
    MockUserQuery,
};
use crate::inbound::http::api_scope;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Mock driving ports; set expectations on the fields you need.
///
/// Ports left untouched panic if a handler calls them, which catches
/// routing mistakes.
#[derive(Default)]
pub struct MockPorts {
    pub asset_types: MockAssetTypeCommand,
    pub asset_types_query: MockAssetTypeQuery,
    pub users: MockUserCommand,
    pub users_query: MockUserQuery,
    pub assets: MockAssetCommand,
    pub assets_query: MockAssetQuery,
}

impl MockPorts {
    /// Wrap the mocks into handler state.
    pub fn into_state(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            asset_types: Arc::new(self.asset_types),
            asset_types_query: Arc::new(self.asset_types_query),
            users: Arc::new(self.users),
            users_query: Arc::new(self.users_query),
            assets: Arc::new(self.assets),
            assets_query: Arc::new(self.assets_query),
        })
    }
}

/// Build an app exposing the full `/api/v1` scope over mock ports.
pub fn test_app(
    ports: MockPorts,
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
        .app_data(web::Data::new(ports.into_state()))
        .service(api_scope())
}

/// Read a response body as JSON.
pub async fn read_json<B, T>(response: ServiceResponse<B>) -> T
where
    B: MessageBody,
    T: DeserializeOwned,
{
    let body = actix_test::read_body(response).await;
    serde_json::from_slice(&body).expect("response body is JSON")
}
