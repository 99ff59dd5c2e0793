//! Mapping from entity and port failures to boundary [`Error`] values.
//!
//! Every mapped error carries `details.reason`, a stable discriminator that
//! clients can branch on without parsing messages.

use serde_json::json;
use tracing::error;

use super::ports::{
    AllocationLogRepositoryError, AssetRepositoryError, AssetTypeRepositoryError,
    UserRepositoryError,
};
use super::{AssetAction, AssetError, AssetId, AssetTypeId, Error, ErrorCode, UserId};

pub(crate) fn asset_not_found(id: AssetId) -> Error {
    Error::not_found(format!("asset {id} not found"))
        .with_details(json!({ "reason": "asset_not_found", "assetId": id }))
}

pub(crate) fn asset_serial_not_found(serial_number: &str) -> Error {
    Error::not_found(format!("no asset with serial number {serial_number}")).with_details(
        json!({ "reason": "asset_not_found", "serialNumber": serial_number }),
    )
}

pub(crate) fn asset_type_not_found(id: AssetTypeId) -> Error {
    Error::not_found(format!("asset type {id} not found"))
        .with_details(json!({ "reason": "asset_type_not_found", "assetTypeId": id }))
}

pub(crate) fn user_not_found(id: UserId) -> Error {
    Error::not_found(format!("user {id} not found"))
        .with_details(json!({ "reason": "user_not_found", "userId": id }))
}

pub(crate) fn duplicate_serial(serial_number: &str) -> Error {
    Error::duplicate_key(format!("serial number {serial_number} is already registered"))
        .with_details(json!({ "reason": "duplicate_serial", "serialNumber": serial_number }))
}

pub(crate) fn duplicate_asset_type_name(name: &str) -> Error {
    Error::duplicate_key(format!("asset type {name} already exists"))
        .with_details(json!({ "reason": "duplicate_asset_type_name", "name": name }))
}

pub(crate) fn duplicate_email(email: &str) -> Error {
    Error::duplicate_key(format!("email {email} is already registered"))
        .with_details(json!({ "reason": "duplicate_email", "email": email }))
}

pub(crate) fn asset_type_in_use(id: AssetTypeId) -> Error {
    Error::in_use(format!("asset type {id} is referenced by assets"))
        .with_details(json!({ "reason": "asset_type_in_use", "assetTypeId": id }))
}

fn concurrent_modification(id: AssetId) -> Error {
    Error::conflict(format!("asset {id} was modified by another request"))
        .with_details(json!({ "reason": "concurrent_modification", "assetId": id }))
}

/// Map a lifecycle failure to its boundary error.
///
/// Allocate and return guards surface as `conflict`; maintenance guards as
/// `invalid_state`. Invariant breaches are programming errors and become
/// `internal_error`.
pub(crate) fn asset_error(err: AssetError) -> Error {
    match err {
        AssetError::InvalidArgument(field) => Error::invalid_request(field.to_string()),
        AssetError::InvalidState {
            asset_id,
            status,
            action,
        } => {
            let (reason, code) = match action {
                AssetAction::Allocate => ("asset_not_available", ErrorCode::Conflict),
                AssetAction::Return => ("return_invalid", ErrorCode::Conflict),
                AssetAction::MarkMaintenance => ("maintenance_invalid", ErrorCode::InvalidState),
                AssetAction::CompleteMaintenance => {
                    ("maintenance_completion_invalid", ErrorCode::InvalidState)
                }
            };
            Error::new(
                code,
                format!("cannot {action} asset {asset_id} while it is {status}"),
            )
            .with_details(json!({ "reason": reason, "assetId": asset_id, "status": status }))
        }
        AssetError::AlreadyAssigned { asset_id, user_id } => {
            Error::conflict(format!("asset {asset_id} is already assigned")).with_details(json!({
                "reason": "asset_not_available",
                "assetId": asset_id,
                "userId": user_id,
            }))
        }
        AssetError::Inconsistent { asset_id, detail } => {
            error!(%asset_id, detail, "asset invariant violated");
            Error::internal(format!("asset {asset_id} is inconsistent: {detail}"))
        }
    }
}

pub(crate) fn asset_repository_error(err: AssetRepositoryError) -> Error {
    match err {
        AssetRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("asset repository unavailable: {message}"))
        }
        AssetRepositoryError::Query { message } => {
            Error::internal(format!("asset repository error: {message}"))
        }
        AssetRepositoryError::Duplicate { serial_number } => duplicate_serial(&serial_number),
        AssetRepositoryError::StaleState { asset_id } => concurrent_modification(asset_id),
        AssetRepositoryError::Referenced { message } => {
            Error::not_found(format!("asset type no longer exists: {message}"))
                .with_details(json!({ "reason": "asset_type_not_found" }))
        }
    }
}

pub(crate) fn asset_type_repository_error(
    err: AssetTypeRepositoryError,
    id: Option<AssetTypeId>,
) -> Error {
    match err {
        AssetTypeRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("asset type repository unavailable: {message}"))
        }
        AssetTypeRepositoryError::Query { message } => {
            Error::internal(format!("asset type repository error: {message}"))
        }
        AssetTypeRepositoryError::Duplicate { name } => duplicate_asset_type_name(&name),
        AssetTypeRepositoryError::Referenced { message } => match id {
            Some(id) => asset_type_in_use(id),
            None => Error::in_use(format!("asset type is referenced: {message}"))
                .with_details(json!({ "reason": "asset_type_in_use" })),
        },
    }
}

pub(crate) fn user_repository_error(err: UserRepositoryError) -> Error {
    match err {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::Duplicate { email } => duplicate_email(&email),
    }
}

pub(crate) fn allocation_log_error(err: AllocationLogRepositoryError) -> Error {
    match err {
        AllocationLogRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("allocation log unavailable: {message}"))
        }
        AllocationLogRepositoryError::Query { message } => {
            Error::internal(format!("allocation log error: {message}"))
        }
    }
}
