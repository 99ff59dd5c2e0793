//! Driving ports for asset type reference data.
//!
//! HTTP handlers validate raw input into [`AssetTypeName`] before calling
//! these ports; implementations own uniqueness and reference checks.

use async_trait::async_trait;

use crate::domain::{AssetType, AssetTypeId, AssetTypeName, Error};

/// Read side of asset type management.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetTypeQuery: Send + Sync {
    /// All asset types ordered by name.
    async fn list(&self) -> Result<Vec<AssetType>, Error>;

    /// Fetch one asset type, failing with `not_found` when absent.
    async fn get(&self, id: AssetTypeId) -> Result<AssetType, Error>;
}

/// Write side of asset type management.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetTypeCommand: Send + Sync {
    /// Register a type, failing with `duplicate_key` on a name collision.
    async fn create(&self, name: AssetTypeName) -> Result<AssetType, Error>;

    /// Rename a type. The duplicate check only runs when the canonical name
    /// actually changes.
    async fn update(&self, id: AssetTypeId, name: AssetTypeName) -> Result<AssetType, Error>;

    /// Remove a type, failing with `in_use` while assets reference it.
    async fn delete(&self, id: AssetTypeId) -> Result<(), Error>;
}
