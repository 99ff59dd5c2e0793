//! Driving ports for the asset lifecycle.
//!
//! Every operation returns an [`AssetView`]: the asset plus the current names
//! of its type and assignee.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{
    AllocationHistoryEntry, AssetId, AssetName, AssetStatus, AssetTypeId, AssetValue, Error,
    HistoryFilter, NewAsset, SerialNumber, UserId,
};

use super::AssetRecord;

/// Denormalised asset projection returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetView {
    /// Identifier.
    pub id: AssetId,
    /// Display name.
    pub name: String,
    /// Serial number.
    pub serial_number: String,
    /// Type identifier.
    pub asset_type_id: AssetTypeId,
    /// Current type name.
    pub asset_type_name: String,
    /// Lifecycle status.
    pub status: AssetStatus,
    /// Monetary value, serialised as a decimal string.
    pub value: Decimal,
    /// Assignee, present only while in use.
    pub assigned_to_user_id: Option<UserId>,
    /// Current assignee name.
    pub assigned_to_user_name: Option<String>,
    /// Allocation timestamp.
    pub assigned_at: Option<DateTime<Utc>>,
}

impl From<AssetRecord> for AssetView {
    fn from(record: AssetRecord) -> Self {
        let AssetRecord {
            asset,
            asset_type_name,
            assigned_user_name,
        } = record;
        let assignment = asset.assignment();
        Self {
            id: asset.id(),
            name: asset.name().to_string(),
            serial_number: asset.serial_number().to_string(),
            asset_type_id: asset.asset_type_id(),
            asset_type_name,
            status: asset.status(),
            value: asset.value().as_decimal(),
            assigned_to_user_id: assignment.map(|a| a.user_id),
            assigned_to_user_name: assignment.and(assigned_user_name),
            assigned_at: assignment.map(|a| a.assigned_at),
        }
    }
}

/// Editable asset attributes. The serial number is fixed after registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetDetails {
    /// New display name.
    pub name: AssetName,
    /// New classification.
    pub asset_type_id: AssetTypeId,
    /// New monetary value.
    pub value: AssetValue,
}

/// Read side of the asset inventory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetQuery: Send + Sync {
    /// All assets ordered by name.
    async fn list(&self) -> Result<Vec<AssetView>, Error>;

    /// Assets currently allocated to the user.
    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<AssetView>, Error>;

    /// Fetch one asset, failing with `not_found` when absent.
    async fn get(&self, id: AssetId) -> Result<AssetView, Error>;

    /// Fetch one asset by serial number, failing with `not_found` when absent.
    async fn get_by_serial(&self, serial_number: SerialNumber) -> Result<AssetView, Error>;

    /// Ledger entries matching the filter, newest first.
    async fn history(&self, filter: HistoryFilter) -> Result<Vec<AllocationHistoryEntry>, Error>;
}

/// Write side of the asset inventory and lifecycle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetCommand: Send + Sync {
    /// Register an asset in the `Available` state.
    async fn create(&self, asset: NewAsset) -> Result<AssetView, Error>;

    /// Edit name, type and value.
    async fn update(&self, id: AssetId, details: AssetDetails) -> Result<AssetView, Error>;

    /// Allocate an available asset to a user and record the ledger entry.
    async fn allocate(&self, id: AssetId, user_id: UserId) -> Result<AssetView, Error>;

    /// Return an in-use asset and record the ledger entry.
    async fn return_asset(&self, id: AssetId) -> Result<AssetView, Error>;

    /// Take an asset out of circulation.
    async fn mark_maintenance(&self, id: AssetId) -> Result<AssetView, Error>;

    /// Finish maintenance, ending `Available` or `Irrecoverable`.
    async fn complete_maintenance(
        &self,
        id: AssetId,
        is_operational: bool,
    ) -> Result<AssetView, Error>;
}
