//! Domain entities, value objects and services.
//!
//! Purpose: model the asset lifecycle state machine and the allocation
//! ledger, independent of HTTP and storage concerns. Entities validate their
//! own fields; services enforce cross-entity rules (existence, uniqueness)
//! and talk to storage only through [`ports`].
//!
//! Public surface:
//! - [`Asset`] with [`AssetStatus`] and the transition methods.
//! - [`AssetType`], [`User`] reference entities.
//! - [`AllocationHistoryEntry`] and [`HistoryFilter`] for ledger reads.
//! - [`AssetService`], [`AssetTypeService`], [`UserService`] implementing the
//!   driving ports.
//! - [`Error`] / [`ErrorCode`] returned across the boundary.

pub mod allocation_log;
pub mod asset;
pub mod asset_service;
pub mod asset_type;
pub mod asset_type_service;
pub mod error;
pub mod ids;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_service;

mod service_errors;

pub use self::allocation_log::{
    AllocationAction, AllocationHistoryEntry, HistoryFilter, NewAllocationLogEntry,
    ParseAllocationActionError,
};
pub use self::asset::{
    ASSET_NAME_MAX, ASSET_VALUE_SCALE, Asset, AssetAction, AssetError, AssetFieldError, AssetName,
    AssetParts, AssetStatus, AssetValue, Assignment, NewAsset, ParseAssetStatusError,
    SERIAL_NUMBER_MAX, SerialNumber,
};
pub use self::asset_service::AssetService;
pub use self::asset_type::{
    ASSET_TYPE_NAME_MAX, AssetType, AssetTypeName, AssetTypeValidationError,
};
pub use self::asset_type_service::AssetTypeService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{AllocationLogId, AssetId, AssetTypeId, InvalidEntityId, UserId};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EMAIL_MAX, EmailAddress, NewUser, USER_NAME_MAX, User, UserName, UserValidationError,
};
pub use self::user_service::UserService;

/// Convenient result alias for driving-port and handler return values.
///
/// # Examples
/// ```
/// use asset_ledger::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("asset 5 not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
