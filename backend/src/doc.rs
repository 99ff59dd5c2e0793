//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every HTTP endpoint from the inbound layer together
//! with the mirror schemas in [`crate::inbound::http::schemas`], which
//! describe domain types without coupling them to utoipa.
//!
//! The generated document is served by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::allocation_history;
use crate::inbound::http::asset_types::{self, AssetTypeRequest};
use crate::inbound::http::assets::{
    self, AllocateAssetRequest, CompleteMaintenanceRequest, CreateAssetRequest,
    UpdateAssetRequest,
};
use crate::inbound::http::health;
use crate::inbound::http::schemas::{
    AllocationActionSchema, AllocationHistoryEntrySchema, AssetStatusSchema, AssetTypeSchema,
    AssetViewSchema, ErrorCodeSchema, ErrorSchema, UserSchema,
};
use crate::inbound::http::users::{self, UserRequest};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Asset ledger API",
        description = "Asset inventory, lifecycle transitions and the allocation ledger."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        asset_types::list_asset_types,
        asset_types::get_asset_type,
        asset_types::create_asset_type,
        asset_types::update_asset_type,
        asset_types::delete_asset_type,
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::list_user_assets,
        users::user_allocation_history,
        assets::list_assets,
        assets::get_asset_by_serial,
        assets::get_asset,
        assets::create_asset,
        assets::update_asset,
        assets::allocate_asset,
        assets::return_asset,
        assets::mark_asset_maintenance,
        assets::complete_asset_maintenance,
        assets::asset_history,
        allocation_history::list_allocation_history,
        health::ready,
        health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        AssetStatusSchema,
        AllocationActionSchema,
        AssetTypeSchema,
        UserSchema,
        AssetViewSchema,
        AllocationHistoryEntrySchema,
        AssetTypeRequest,
        UserRequest,
        CreateAssetRequest,
        UpdateAssetRequest,
        AllocateAssetRequest,
        CompleteMaintenanceRequest,
    )),
    tags(
        (name = "asset-types", description = "Asset classification"),
        (name = "users", description = "People who can hold assets"),
        (name = "assets", description = "Inventory and lifecycle transitions"),
        (name = "allocation-history", description = "Append-only allocation ledger"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema and path registration.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";
    const ASSET_VIEW_SCHEMA_NAME: &str = "crate.domain.ports.AssetView";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case::code("code")]
    #[case::message("message")]
    #[case::trace_id("traceId")]
    fn error_schema_exposes_envelope_fields(#[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");
        assert_object_schema_has_field(error_schema, field);
    }

    #[rstest]
    #[case::serial("serialNumber")]
    #[case::status("status")]
    #[case::assignee("assignedToUserId")]
    #[case::type_name("assetTypeName")]
    fn asset_view_schema_is_camel_case(#[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(ASSET_VIEW_SCHEMA_NAME).expect("AssetView schema");
        assert_object_schema_has_field(schema, field);
    }

    #[rstest]
    #[case::allocate("/api/v1/assets/{id}/allocate")]
    #[case::complete("/api/v1/assets/{id}/maintenance/complete")]
    #[case::by_serial("/api/v1/assets/by-serial/{serial}")]
    #[case::history("/api/v1/allocation-history")]
    #[case::user_history("/api/v1/users/{id}/allocation-history")]
    #[case::ready("/health/ready")]
    fn lifecycle_paths_are_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }
}
