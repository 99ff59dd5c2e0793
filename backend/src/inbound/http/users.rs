//! Users API handlers.
//!
//! ```text
//! GET  /api/v1/users
//! GET  /api/v1/users/{id}
//! POST /api/v1/users {"name":"Ana","email":"ana@mail.com"}
//! PUT  /api/v1/users/{id} {"name":"Ana Souza","email":"ana@mail.com"}
//! GET  /api/v1/users/{id}/assets
//! GET  /api/v1/users/{id}/allocation-history
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::AssetView;
use crate::domain::{
    AllocationHistoryEntry, EmailAddress, Error, NewUser, User, UserName, UserValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    AllocationHistoryEntrySchema, AssetViewSchema, ErrorSchema, UserSchema,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_field_error, parse_user_id};

const ID: FieldName = FieldName::new("id");
const NAME: FieldName = FieldName::new("name");
const EMAIL: FieldName = FieldName::new("email");

/// Request body for creating or updating a user.
///
/// Example JSON: `{"name":"Ana","email":"ana@mail.com"}`
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    /// Display name.
    pub name: String,
    /// Email address; trimmed and lower-cased before storage.
    pub email: String,
}

impl TryFrom<UserRequest> for NewUser {
    type Error = Error;

    fn try_from(value: UserRequest) -> Result<Self, Self::Error> {
        let name = UserName::new(&value.name).map_err(map_user_validation_error)?;
        let email = EmailAddress::new(&value.email).map_err(map_user_validation_error)?;
        Ok(Self { name, email })
    }
}

fn map_user_validation_error(err: UserValidationError) -> Error {
    let field = match err {
        UserValidationError::EmptyName | UserValidationError::NameTooLong { .. } => NAME,
        _ => EMAIL,
    };
    invalid_field_error(field, err)
}

/// List users ordered by name.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Users", body = [UserSchema]),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users_query.list().await?;
    Ok(web::Json(users))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserSchema),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let id = parse_user_id(&path.into_inner(), ID)?;
    let user = state.users_query.get(id).await?;
    Ok(web::Json(user))
}

/// Register a user.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "Created", body = UserSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserRequest>,
) -> ApiResult<HttpResponse> {
    let new_user = NewUser::try_from(payload.into_inner())?;
    let created = state.users.create(new_user).await?;
    Ok(HttpResponse::Created().json(created))
}

/// Update a user's name and email.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "Updated", body = UserSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UserRequest>,
) -> ApiResult<web::Json<User>> {
    let id = parse_user_id(&path.into_inner(), ID)?;
    let changes = NewUser::try_from(payload.into_inner())?;
    let updated = state.users.update(id, changes).await?;
    Ok(web::Json(updated))
}

/// Assets currently allocated to the user.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/assets",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Allocated assets", body = [AssetViewSchema]),
        (status = 400, description = "Invalid id", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUserAssets"
)]
#[get("/users/{id}/assets")]
pub async fn list_user_assets(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<AssetView>>> {
    let id = parse_user_id(&path.into_inner(), ID)?;
    let assets = state.assets_query.list_by_user(id).await?;
    Ok(web::Json(assets))
}

/// Allocation ledger entries involving the user, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/allocation-history",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Ledger entries", body = [AllocationHistoryEntrySchema]),
        (status = 400, description = "Invalid id", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUserAllocationHistory"
)]
#[get("/users/{id}/allocation-history")]
pub async fn user_allocation_history(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<AllocationHistoryEntry>>> {
    let id = parse_user_id(&path.into_inner(), ID)?;
    let entries = state.users_query.allocation_history(id).await?;
    Ok(web::Json(entries))
}

#[cfg(test)]
mod tests;
