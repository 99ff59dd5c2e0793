//! Asset type reference-data service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::ports::{AssetTypeCommand, AssetTypeQuery, AssetTypeRepository};
use super::service_errors::{
    asset_type_in_use, asset_type_not_found, asset_type_repository_error,
    duplicate_asset_type_name,
};
use super::{AssetType, AssetTypeId, AssetTypeName, Error};

/// Asset type service implementing the driving ports.
#[derive(Clone)]
pub struct AssetTypeService<R> {
    repo: Arc<R>,
}

impl<R> AssetTypeService<R> {
    /// Create a new service backed by `repo`.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> AssetTypeService<R>
where
    R: AssetTypeRepository,
{
    async fn load(&self, id: AssetTypeId) -> Result<AssetType, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(|err| asset_type_repository_error(err, Some(id)))?
            .ok_or_else(|| asset_type_not_found(id))
    }

    async fn ensure_name_free(&self, name: &AssetTypeName) -> Result<(), Error> {
        let existing = self
            .repo
            .find_by_name(name)
            .await
            .map_err(|err| asset_type_repository_error(err, None))?;
        match existing {
            Some(_) => Err(duplicate_asset_type_name(name.as_ref())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<R> AssetTypeQuery for AssetTypeService<R>
where
    R: AssetTypeRepository,
{
    async fn list(&self) -> Result<Vec<AssetType>, Error> {
        self.repo
            .list()
            .await
            .map_err(|err| asset_type_repository_error(err, None))
    }

    async fn get(&self, id: AssetTypeId) -> Result<AssetType, Error> {
        self.load(id).await
    }
}

#[async_trait]
impl<R> AssetTypeCommand for AssetTypeService<R>
where
    R: AssetTypeRepository,
{
    async fn create(&self, name: AssetTypeName) -> Result<AssetType, Error> {
        self.ensure_name_free(&name).await?;
        let created = self
            .repo
            .insert(&name)
            .await
            .map_err(|err| asset_type_repository_error(err, None))?;
        info!(asset_type_id = %created.id(), name = %created.name(), "asset type created");
        Ok(created)
    }

    async fn update(&self, id: AssetTypeId, name: AssetTypeName) -> Result<AssetType, Error> {
        let mut asset_type = self.load(id).await?;
        if asset_type.name() != &name {
            self.ensure_name_free(&name).await?;
        }
        asset_type.rename(name);
        let updated = self
            .repo
            .rename(id, asset_type.name())
            .await
            .map_err(|err| asset_type_repository_error(err, Some(id)))?;
        if !updated {
            return Err(asset_type_not_found(id));
        }
        Ok(asset_type)
    }

    async fn delete(&self, id: AssetTypeId) -> Result<(), Error> {
        self.load(id).await?;
        let referenced = self
            .repo
            .is_referenced(id)
            .await
            .map_err(|err| asset_type_repository_error(err, Some(id)))?;
        if referenced {
            return Err(asset_type_in_use(id));
        }
        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(|err| asset_type_repository_error(err, Some(id)))?;
        if !deleted {
            return Err(asset_type_not_found(id));
        }
        info!(asset_type_id = %id, "asset type deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "asset_type_service_tests.rs"]
mod tests;
