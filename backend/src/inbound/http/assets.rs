//! Asset inventory and lifecycle API handlers.
//!
//! ```text
//! GET  /api/v1/assets[?userId=1]
//! GET  /api/v1/assets/{id}
//! GET  /api/v1/assets/by-serial/{serial}
//! POST /api/v1/assets {"name":"Dell Latitude","serialNumber":"SN123","assetTypeId":1,"value":"4500.00"}
//! PUT  /api/v1/assets/{id} {"name":"Dell Latitude 7440","assetTypeId":1,"value":"4200.00"}
//! POST /api/v1/assets/{id}/allocate {"userId":1}
//! POST /api/v1/assets/{id}/return
//! POST /api/v1/assets/{id}/maintenance
//! POST /api/v1/assets/{id}/maintenance/complete {"isOperational":false}
//! GET  /api/v1/assets/{id}/history
//! ```
//!
//! Lifecycle endpoints answer with the updated asset. Illegal transitions
//! surface as `409` with code `invalid_state` or `conflict`.

use actix_web::{HttpMessage, HttpRequest, HttpResponse, get, post, put, web};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{AssetDetails, AssetView};
use crate::domain::{
    AllocationHistoryEntry, AssetFieldError, AssetName, AssetTypeId, AssetValue, Error,
    HistoryFilter, NewAsset, SerialNumber, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{AllocationHistoryEntrySchema, AssetViewSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_field_error, parse_asset_id, parse_optional_user_id,
};

const ID: FieldName = FieldName::new("id");
const NAME: FieldName = FieldName::new("name");
const SERIAL_NUMBER: FieldName = FieldName::new("serialNumber");
const ASSET_TYPE_ID: FieldName = FieldName::new("assetTypeId");
const VALUE: FieldName = FieldName::new("value");
const USER_ID: FieldName = FieldName::new("userId");
const IS_OPERATIONAL: FieldName = FieldName::new("isOperational");

/// Request body for registering an asset.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssetRequest {
    /// Display name.
    pub name: String,
    /// Unique serial number; ASCII letters and digits, case-sensitive.
    pub serial_number: String,
    /// Existing asset type.
    pub asset_type_id: i64,
    /// Monetary value, zero or greater, at most two decimal places.
    #[schema(value_type = String, example = "4500.00")]
    pub value: Decimal,
}

impl TryFrom<CreateAssetRequest> for NewAsset {
    type Error = Error;

    fn try_from(value: CreateAssetRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: AssetName::new(&value.name).map_err(field_error)?,
            serial_number: SerialNumber::new(&value.serial_number).map_err(field_error)?,
            asset_type_id: asset_type_id(value.asset_type_id)?,
            value: AssetValue::new(value.value).map_err(field_error)?,
        })
    }
}

/// Request body for editing an asset. The serial number cannot change.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssetRequest {
    /// Display name.
    pub name: String,
    /// Existing asset type.
    pub asset_type_id: i64,
    /// Monetary value.
    #[schema(value_type = String, example = "4200.00")]
    pub value: Decimal,
}

impl TryFrom<UpdateAssetRequest> for AssetDetails {
    type Error = Error;

    fn try_from(value: UpdateAssetRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: AssetName::new(&value.name).map_err(field_error)?,
            asset_type_id: asset_type_id(value.asset_type_id)?,
            value: AssetValue::new(value.value).map_err(field_error)?,
        })
    }
}

/// Request body for allocating an asset.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AllocateAssetRequest {
    /// Receiving user.
    pub user_id: i64,
}

/// Optional request body for completing maintenance.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompleteMaintenanceRequest {
    /// `false` writes the asset off as irrecoverable. Defaults to `true`.
    pub is_operational: Option<bool>,
}

/// Query parameters for listing assets.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListAssetsQuery {
    /// Restrict to assets currently allocated to this user.
    #[param(value_type = Option<i64>)]
    pub user_id: Option<String>,
}

fn field_error(err: AssetFieldError) -> Error {
    let field = match err {
        AssetFieldError::EmptyName | AssetFieldError::NameTooLong { .. } => NAME,
        AssetFieldError::EmptySerialNumber
        | AssetFieldError::SerialNumberTooLong { .. }
        | AssetFieldError::SerialNumberInvalidCharacters => SERIAL_NUMBER,
        AssetFieldError::NegativeValue
        | AssetFieldError::ValueTooPrecise { .. }
        | AssetFieldError::ValueTooLarge => VALUE,
    };
    invalid_field_error(field, err)
}

fn asset_type_id(raw: i64) -> Result<AssetTypeId, Error> {
    AssetTypeId::new(raw).map_err(|err| invalid_field_error(ASSET_TYPE_ID, err))
}

/// List assets ordered by name, optionally only those allocated to a user.
#[utoipa::path(
    get,
    path = "/api/v1/assets",
    params(ListAssetsQuery),
    responses(
        (status = 200, description = "Assets", body = [AssetViewSchema]),
        (status = 400, description = "Invalid userId", body = ErrorSchema)
    ),
    tags = ["assets"],
    operation_id = "listAssets"
)]
#[get("/assets")]
pub async fn list_assets(
    state: web::Data<HttpState>,
    query: web::Query<ListAssetsQuery>,
) -> ApiResult<web::Json<Vec<AssetView>>> {
    let user_id = parse_optional_user_id(query.user_id.as_deref(), USER_ID)?;
    let assets = match user_id {
        Some(user_id) => state.assets_query.list_by_user(user_id).await?,
        None => state.assets_query.list().await?,
    };
    Ok(web::Json(assets))
}

/// Look an asset up by serial number.
#[utoipa::path(
    get,
    path = "/api/v1/assets/by-serial/{serial}",
    params(("serial" = String, Path, description = "Serial number")),
    responses(
        (status = 200, description = "Asset", body = AssetViewSchema),
        (status = 400, description = "Malformed serial number", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["assets"],
    operation_id = "getAssetBySerial"
)]
#[get("/assets/by-serial/{serial}")]
pub async fn get_asset_by_serial(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<AssetView>> {
    let serial = SerialNumber::new(path.into_inner())
        .map_err(|err| invalid_field_error(FieldName::new("serial"), err))?;
    let asset = state.assets_query.get_by_serial(serial).await?;
    Ok(web::Json(asset))
}

/// Fetch one asset.
#[utoipa::path(
    get,
    path = "/api/v1/assets/{id}",
    params(("id" = i64, Path, description = "Asset identifier")),
    responses(
        (status = 200, description = "Asset", body = AssetViewSchema),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["assets"],
    operation_id = "getAsset"
)]
#[get("/assets/{id}")]
pub async fn get_asset(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<AssetView>> {
    let id = parse_asset_id(&path.into_inner(), ID)?;
    let asset = state.assets_query.get(id).await?;
    Ok(web::Json(asset))
}

/// Register an asset in the `available` state.
#[utoipa::path(
    post,
    path = "/api/v1/assets",
    request_body = CreateAssetRequest,
    responses(
        (status = 201, description = "Created", body = AssetViewSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Asset type not found", body = ErrorSchema),
        (status = 409, description = "Serial number already registered", body = ErrorSchema)
    ),
    tags = ["assets"],
    operation_id = "createAsset"
)]
#[post("/assets")]
pub async fn create_asset(
    state: web::Data<HttpState>,
    payload: web::Json<CreateAssetRequest>,
) -> ApiResult<HttpResponse> {
    let new_asset = NewAsset::try_from(payload.into_inner())?;
    let created = state.assets.create(new_asset).await?;
    Ok(HttpResponse::Created().json(created))
}

/// Edit an asset's name, type and value.
#[utoipa::path(
    put,
    path = "/api/v1/assets/{id}",
    params(("id" = i64, Path, description = "Asset identifier")),
    request_body = UpdateAssetRequest,
    responses(
        (status = 200, description = "Updated", body = AssetViewSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Asset or asset type not found", body = ErrorSchema)
    ),
    tags = ["assets"],
    operation_id = "updateAsset"
)]
#[put("/assets/{id}")]
pub async fn update_asset(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateAssetRequest>,
) -> ApiResult<web::Json<AssetView>> {
    let id = parse_asset_id(&path.into_inner(), ID)?;
    let details = AssetDetails::try_from(payload.into_inner())?;
    let updated = state.assets.update(id, details).await?;
    Ok(web::Json(updated))
}

/// Allocate an available asset to a user.
#[utoipa::path(
    post,
    path = "/api/v1/assets/{id}/allocate",
    params(("id" = i64, Path, description = "Asset identifier")),
    request_body = AllocateAssetRequest,
    responses(
        (status = 200, description = "Allocated", body = AssetViewSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Asset or user not found", body = ErrorSchema),
        (status = 409, description = "Asset is not available", body = ErrorSchema)
    ),
    tags = ["assets"],
    operation_id = "allocateAsset"
)]
#[post("/assets/{id}/allocate")]
pub async fn allocate_asset(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<AllocateAssetRequest>,
) -> ApiResult<web::Json<AssetView>> {
    let id = parse_asset_id(&path.into_inner(), ID)?;
    let user_id =
        UserId::new(payload.user_id).map_err(|err| invalid_field_error(USER_ID, err))?;
    let asset = state.assets.allocate(id, user_id).await?;
    Ok(web::Json(asset))
}

/// Return an in-use asset.
#[utoipa::path(
    post,
    path = "/api/v1/assets/{id}/return",
    params(("id" = i64, Path, description = "Asset identifier")),
    responses(
        (status = 200, description = "Returned", body = AssetViewSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Asset is not in use", body = ErrorSchema)
    ),
    tags = ["assets"],
    operation_id = "returnAsset"
)]
#[post("/assets/{id}/return")]
pub async fn return_asset(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<AssetView>> {
    let id = parse_asset_id(&path.into_inner(), ID)?;
    let asset = state.assets.return_asset(id).await?;
    Ok(web::Json(asset))
}

/// Send an asset to maintenance.
#[utoipa::path(
    post,
    path = "/api/v1/assets/{id}/maintenance",
    params(("id" = i64, Path, description = "Asset identifier")),
    responses(
        (status = 200, description = "In maintenance", body = AssetViewSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Asset is in use", body = ErrorSchema)
    ),
    tags = ["assets"],
    operation_id = "markAssetMaintenance"
)]
#[post("/assets/{id}/maintenance")]
pub async fn mark_asset_maintenance(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<AssetView>> {
    let id = parse_asset_id(&path.into_inner(), ID)?;
    let asset = state.assets.mark_maintenance(id).await?;
    Ok(web::Json(asset))
}

/// Finish maintenance. The body is optional.
#[utoipa::path(
    post,
    path = "/api/v1/assets/{id}/maintenance/complete",
    params(("id" = i64, Path, description = "Asset identifier")),
    request_body(content = CompleteMaintenanceRequest, description = "Outcome; omitted means operational"),
    responses(
        (status = 200, description = "Maintenance finished", body = AssetViewSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Asset is not in maintenance", body = ErrorSchema)
    ),
    tags = ["assets"],
    operation_id = "completeAssetMaintenance"
)]
#[post("/assets/{id}/maintenance/complete")]
pub async fn complete_asset_maintenance(
    req: HttpRequest,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> ApiResult<web::Json<AssetView>> {
    let id = parse_asset_id(&path.into_inner(), ID)?;
    let is_operational = maintenance_outcome(&req, &body)?;
    let asset = state.assets.complete_maintenance(id, is_operational).await?;
    Ok(web::Json(asset))
}

/// Read the optional completion body. Only an empty body counts as omitted;
/// anything else must be a JSON object with a boolean `isOperational`.
fn maintenance_outcome(req: &HttpRequest, body: &[u8]) -> Result<bool, Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(true);
    }
    let content_type = req.content_type();
    if content_type != "application/json" && !content_type.ends_with("+json") {
        return Err(invalid_field_error(
            IS_OPERATIONAL,
            format_args!("expected a JSON body, got content type `{content_type}`"),
        ));
    }
    serde_json::from_slice::<CompleteMaintenanceRequest>(body)
        .map(|request| request.is_operational.unwrap_or(true))
        .map_err(|err| invalid_field_error(IS_OPERATIONAL, err))
}

/// Ledger entries for one asset, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/assets/{id}/history",
    params(("id" = i64, Path, description = "Asset identifier")),
    responses(
        (status = 200, description = "Ledger entries", body = [AllocationHistoryEntrySchema]),
        (status = 400, description = "Invalid id", body = ErrorSchema)
    ),
    tags = ["assets"],
    operation_id = "getAssetHistory"
)]
#[get("/assets/{id}/history")]
pub async fn asset_history(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<AllocationHistoryEntry>>> {
    let id = parse_asset_id(&path.into_inner(), ID)?;
    let entries = state.assets_query.history(HistoryFilter::for_asset(id)).await?;
    Ok(web::Json(entries))
}

#[cfg(test)]
#[path = "assets_tests.rs"]
mod tests;
