//! Allocation ledger query endpoint.
//!
//! ```text
//! GET /api/v1/allocation-history?assetId=5&userId=1
//! ```

use actix_web::{get, web};
use serde::Deserialize;

use crate::domain::{AllocationHistoryEntry, HistoryFilter};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{AllocationHistoryEntrySchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_optional_asset_id, parse_optional_user_id,
};

const ASSET_ID: FieldName = FieldName::new("assetId");
const USER_ID: FieldName = FieldName::new("userId");

/// Optional filters; both combine with AND.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AllocationHistoryQuery {
    /// Only entries for this asset.
    #[param(value_type = Option<i64>)]
    pub asset_id: Option<String>,
    /// Only entries for this user.
    #[param(value_type = Option<i64>)]
    pub user_id: Option<String>,
}

impl AllocationHistoryQuery {
    fn into_filter(self) -> ApiResult<HistoryFilter> {
        Ok(HistoryFilter {
            asset_id: parse_optional_asset_id(self.asset_id.as_deref(), ASSET_ID)?,
            user_id: parse_optional_user_id(self.user_id.as_deref(), USER_ID)?,
        })
    }
}

/// Ledger entries, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/allocation-history",
    params(AllocationHistoryQuery),
    responses(
        (status = 200, description = "Ledger entries", body = [AllocationHistoryEntrySchema]),
        (status = 400, description = "Invalid filter", body = ErrorSchema)
    ),
    tags = ["allocation-history"],
    operation_id = "listAllocationHistory"
)]
#[get("/allocation-history")]
pub async fn list_allocation_history(
    state: web::Data<HttpState>,
    query: web::Query<AllocationHistoryQuery>,
) -> ApiResult<web::Json<Vec<AllocationHistoryEntry>>> {
    let filter = query.into_inner().into_filter()?;
    let entries = state.assets_query.history(filter).await?;
    Ok(web::Json(entries))
}
