//! Port for asset persistence.
//!
//! Reads return [`AssetRecord`] so callers get the asset together with the
//! human-readable names of its type and assignee. Lifecycle changes go
//! through [`AssetRepository::apply_transition`], which writes the new
//! status and the optional ledger entry as one unit of work.

use async_trait::async_trait;

use crate::domain::{
    Asset, AssetId, AssetStatus, NewAllocationLogEntry, NewAsset, SerialNumber, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by asset repository adapters.
    pub enum AssetRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "asset repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "asset repository query failed: {message}",
        /// The unique serial number constraint rejected the write.
        Duplicate { serial_number: String } =>
            "serial number already registered: {serial_number}",
        /// The stored status no longer matches the expected prior status.
        StaleState { asset_id: AssetId } =>
            "asset {asset_id} was modified concurrently",
        /// A referenced asset type or user does not exist.
        Referenced { message: String } =>
            "asset references a missing row: {message}",
    }
}

/// Asset with its denormalised references, read in one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRecord {
    /// The asset aggregate.
    pub asset: Asset,
    /// Current name of the asset's type.
    pub asset_type_name: String,
    /// Current name of the assignee, when in use.
    pub assigned_user_name: Option<String>,
}

/// Lifecycle change to persist atomically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetTransition {
    /// Asset after the transition was applied in memory.
    pub asset: Asset,
    /// Status the stored row must still have for the write to apply.
    pub expected_status: AssetStatus,
    /// Ledger entry appended in the same transaction, if any.
    pub ledger_entry: Option<NewAllocationLogEntry>,
}

/// Storage for assets.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetRepository: Send + Sync {
    /// All assets ordered by name ascending.
    async fn list(&self) -> Result<Vec<AssetRecord>, AssetRepositoryError>;

    /// Assets currently allocated to a user, ordered by name.
    async fn list_by_user(&self, user_id: UserId)
    -> Result<Vec<AssetRecord>, AssetRepositoryError>;

    /// Look up an asset by id.
    async fn find_by_id(&self, id: AssetId) -> Result<Option<AssetRecord>, AssetRepositoryError>;

    /// Look up an asset by normalised serial number.
    async fn find_by_serial(
        &self,
        serial_number: &SerialNumber,
    ) -> Result<Option<AssetRecord>, AssetRepositoryError>;

    /// Insert an `Available`, unassigned asset.
    async fn insert(&self, asset: &NewAsset) -> Result<AssetRecord, AssetRepositoryError>;

    /// Persist name, serial number, type and value. Lifecycle columns are left
    /// untouched. Returns `false` when no row matched.
    async fn update_details(&self, asset: &Asset) -> Result<bool, AssetRepositoryError>;

    /// Persist status and assignment, guarded by `expected_status`, and
    /// append the ledger entry.
    ///
    /// # Errors
    /// [`AssetRepositoryError::StaleState`] when the stored status differs
    /// from `expected_status`; nothing is written in that case.
    async fn apply_transition(
        &self,
        transition: &AssetTransition,
    ) -> Result<(), AssetRepositoryError>;
}
