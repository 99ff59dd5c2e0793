//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the structure of their corresponding domain
//! types but live in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A unique value (serial number, email, type name) is already taken.
    #[schema(rename = "duplicate_key")]
    DuplicateKey,
    /// The asset is not in a state that allows the operation.
    #[schema(rename = "conflict")]
    Conflict,
    /// A maintenance transition was attempted from the wrong state.
    #[schema(rename = "invalid_state")]
    InvalidState,
    /// The resource is still referenced and cannot be removed.
    #[schema(rename = "in_use")]
    InUse,
    /// A backing service is unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "conflict")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "asset 1 is not available")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details, including a stable `reason`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::AssetStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::AssetStatus)]
pub enum AssetStatusSchema {
    /// Ready to be allocated.
    #[schema(rename = "available")]
    Available,
    /// Allocated to a user.
    #[schema(rename = "in_use")]
    InUse,
    /// Out of circulation for repair.
    #[schema(rename = "maintenance")]
    Maintenance,
    /// Written off after failed maintenance.
    #[schema(rename = "irrecoverable")]
    Irrecoverable,
}

/// OpenAPI schema for [`crate::domain::AllocationAction`].
#[derive(ToSchema)]
#[schema(as = crate::domain::AllocationAction)]
pub enum AllocationActionSchema {
    /// The asset was handed to the user.
    #[schema(rename = "allocated")]
    Allocated,
    /// The user gave the asset back.
    #[schema(rename = "returned")]
    Returned,
}

/// OpenAPI schema for [`crate::domain::AssetType`].
#[derive(ToSchema)]
#[schema(as = crate::domain::AssetType)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AssetTypeSchema {
    /// Stable identifier.
    #[schema(example = 1)]
    id: i64,
    /// Upper-cased unique name.
    #[schema(example = "NOTEBOOK")]
    name: String,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Stable identifier.
    #[schema(example = 1)]
    id: i64,
    /// Display name.
    #[schema(example = "Ana")]
    name: String,
    /// Lower-cased unique email address.
    #[schema(example = "ana@mail.com")]
    email: String,
}

/// OpenAPI schema for [`crate::domain::ports::AssetView`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::AssetView, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AssetViewSchema {
    /// Stable identifier.
    #[schema(example = 1)]
    id: i64,
    /// Display name.
    #[schema(example = "MacBook Pro M3")]
    name: String,
    /// Unique serial number.
    #[schema(example = "SN123")]
    serial_number: String,
    /// Type identifier.
    #[schema(example = 1)]
    asset_type_id: i64,
    /// Current type name.
    #[schema(example = "NOTEBOOK")]
    asset_type_name: String,
    /// Lifecycle status.
    status: AssetStatusSchema,
    /// Monetary value as a decimal string.
    #[schema(example = "15000.00")]
    value: String,
    /// Assignee while in use.
    assigned_to_user_id: Option<i64>,
    /// Assignee name while in use.
    assigned_to_user_name: Option<String>,
    /// Allocation timestamp while in use.
    #[schema(format = DateTime)]
    assigned_at: Option<String>,
}

/// OpenAPI schema for [`crate::domain::AllocationHistoryEntry`].
#[derive(ToSchema)]
#[schema(as = crate::domain::AllocationHistoryEntry, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AllocationHistoryEntrySchema {
    /// Ledger entry identifier.
    id: i64,
    /// Asset that changed hands.
    asset_id: i64,
    /// Current asset name.
    asset_name: String,
    /// User involved.
    user_id: i64,
    /// Current user name.
    user_name: String,
    /// What happened.
    action: AllocationActionSchema,
    /// When it happened.
    #[schema(format = DateTime)]
    at: String,
}
