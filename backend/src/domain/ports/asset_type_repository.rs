//! Port for asset type persistence.

use async_trait::async_trait;

use crate::domain::{AssetType, AssetTypeId, AssetTypeName};

use super::define_port_error;

define_port_error! {
    /// Errors raised by asset type repository adapters.
    pub enum AssetTypeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "asset type repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "asset type repository query failed: {message}",
        /// The unique name constraint rejected the write.
        Duplicate { name: String } =>
            "asset type name already exists: {name}",
        /// A foreign key still points at the row being removed.
        Referenced { message: String } =>
            "asset type is still referenced: {message}",
    }
}

/// Storage for asset types.
///
/// Names are stored in canonical form, so `find_by_name` is an exact match
/// on the normalised value.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetTypeRepository: Send + Sync {
    /// All asset types ordered by name ascending.
    async fn list(&self) -> Result<Vec<AssetType>, AssetTypeRepositoryError>;

    /// Look up a type by id.
    async fn find_by_id(
        &self,
        id: AssetTypeId,
    ) -> Result<Option<AssetType>, AssetTypeRepositoryError>;

    /// Look up a type by canonical name.
    async fn find_by_name(
        &self,
        name: &AssetTypeName,
    ) -> Result<Option<AssetType>, AssetTypeRepositoryError>;

    /// Insert a new type and return it with its assigned id.
    async fn insert(&self, name: &AssetTypeName) -> Result<AssetType, AssetTypeRepositoryError>;

    /// Rename an existing type. Returns `false` when no row matched.
    async fn rename(
        &self,
        id: AssetTypeId,
        name: &AssetTypeName,
    ) -> Result<bool, AssetTypeRepositoryError>;

    /// Remove a type. Returns `false` when no row matched.
    async fn delete(&self, id: AssetTypeId) -> Result<bool, AssetTypeRepositoryError>;

    /// Whether any asset references the type.
    async fn is_referenced(&self, id: AssetTypeId) -> Result<bool, AssetTypeRepositoryError>;
}
