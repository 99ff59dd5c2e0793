//! Asset type API handlers.
//!
//! ```text
//! GET    /api/v1/asset-types
//! GET    /api/v1/asset-types/{id}
//! POST   /api/v1/asset-types {"name":"notebook"}
//! PUT    /api/v1/asset-types/{id} {"name":"laptop"}
//! DELETE /api/v1/asset-types/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::{AssetType, AssetTypeName};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{AssetTypeSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_field_error, parse_asset_type_id};

const ID: FieldName = FieldName::new("id");
const NAME: FieldName = FieldName::new("name");

/// Request body for creating or renaming an asset type.
///
/// Example JSON: `{"name":"notebook"}`
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssetTypeRequest {
    /// Type name; trimmed and upper-cased before storage.
    pub name: String,
}

impl AssetTypeRequest {
    fn into_name(self) -> ApiResult<AssetTypeName> {
        AssetTypeName::new(&self.name).map_err(|err| invalid_field_error(NAME, err))
    }
}

/// List asset types ordered by name.
#[utoipa::path(
    get,
    path = "/api/v1/asset-types",
    responses(
        (status = 200, description = "Asset types", body = [AssetTypeSchema]),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["asset-types"],
    operation_id = "listAssetTypes"
)]
#[get("/asset-types")]
pub async fn list_asset_types(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<AssetType>>> {
    let types = state.asset_types_query.list().await?;
    Ok(web::Json(types))
}

/// Fetch one asset type.
#[utoipa::path(
    get,
    path = "/api/v1/asset-types/{id}",
    params(("id" = i64, Path, description = "Asset type identifier")),
    responses(
        (status = 200, description = "Asset type", body = AssetTypeSchema),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["asset-types"],
    operation_id = "getAssetType"
)]
#[get("/asset-types/{id}")]
pub async fn get_asset_type(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<AssetType>> {
    let id = parse_asset_type_id(&path.into_inner(), ID)?;
    let asset_type = state.asset_types_query.get(id).await?;
    Ok(web::Json(asset_type))
}

/// Create an asset type.
#[utoipa::path(
    post,
    path = "/api/v1/asset-types",
    request_body = AssetTypeRequest,
    responses(
        (status = 201, description = "Created", body = AssetTypeSchema),
        (status = 400, description = "Invalid name", body = ErrorSchema),
        (status = 409, description = "Name already exists", body = ErrorSchema)
    ),
    tags = ["asset-types"],
    operation_id = "createAssetType"
)]
#[post("/asset-types")]
pub async fn create_asset_type(
    state: web::Data<HttpState>,
    payload: web::Json<AssetTypeRequest>,
) -> ApiResult<HttpResponse> {
    let name = payload.into_inner().into_name()?;
    let created = state.asset_types.create(name).await?;
    Ok(HttpResponse::Created().json(created))
}

/// Rename an asset type.
#[utoipa::path(
    put,
    path = "/api/v1/asset-types/{id}",
    params(("id" = i64, Path, description = "Asset type identifier")),
    request_body = AssetTypeRequest,
    responses(
        (status = 200, description = "Renamed", body = AssetTypeSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Name already exists", body = ErrorSchema)
    ),
    tags = ["asset-types"],
    operation_id = "updateAssetType"
)]
#[put("/asset-types/{id}")]
pub async fn update_asset_type(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<AssetTypeRequest>,
) -> ApiResult<web::Json<AssetType>> {
    let id = parse_asset_type_id(&path.into_inner(), ID)?;
    let name = payload.into_inner().into_name()?;
    let updated = state.asset_types.update(id, name).await?;
    Ok(web::Json(updated))
}

/// Delete an asset type that no asset references.
#[utoipa::path(
    delete,
    path = "/api/v1/asset-types/{id}",
    params(("id" = i64, Path, description = "Asset type identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Still referenced by assets", body = ErrorSchema)
    ),
    tags = ["asset-types"],
    operation_id = "deleteAssetType"
)]
#[delete("/asset-types/{id}")]
pub async fn delete_asset_type(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_asset_type_id(&path.into_inner(), ID)?;
    state.asset_types.delete(id).await?;
    Ok(HttpResponse::NoContent().finish())
}
