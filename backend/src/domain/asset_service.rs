//! Asset lifecycle service.
//!
//! Orchestrates registration, edits and lifecycle transitions. Each
//! transition loads the asset, applies the state machine in memory, then
//! hands the result to [`AssetRepository::apply_transition`], which persists
//! the new status and any ledger entry atomically and refuses the write if
//! another request changed the status in between.
//!
//! Allocate and return append ledger entries; maintenance transitions do
//! not.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use super::ports::{
    AllocationLogRepository, AssetCommand, AssetDetails, AssetQuery, AssetRecord,
    AssetRepository, AssetTransition, AssetTypeRepository, AssetView, UserRepository,
};
use super::service_errors::{
    allocation_log_error, asset_error, asset_not_found, asset_repository_error,
    asset_serial_not_found, asset_type_not_found, asset_type_repository_error, duplicate_serial,
    user_not_found, user_repository_error,
};
use super::{
    AllocationHistoryEntry, AssetAction, AssetError, AssetId, AssetStatus, AssetType,
    AssetTypeId, Error, HistoryFilter, NewAllocationLogEntry, NewAsset, SerialNumber, User,
    UserId,
};

/// Asset service implementing the asset driving ports.
#[derive(Clone)]
pub struct AssetService<A, T, U, L> {
    assets: Arc<A>,
    asset_types: Arc<T>,
    users: Arc<U>,
    ledger: Arc<L>,
    clock: Arc<dyn Clock>,
}

impl<A, T, U, L> AssetService<A, T, U, L> {
    /// Create a new service. Timestamps for allocations and returns come
    /// from `clock`.
    pub fn new(
        assets: Arc<A>,
        asset_types: Arc<T>,
        users: Arc<U>,
        ledger: Arc<L>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            assets,
            asset_types,
            users,
            ledger,
            clock,
        }
    }
}

impl<A, T, U, L> AssetService<A, T, U, L>
where
    A: AssetRepository,
    T: AssetTypeRepository,
    U: UserRepository,
    L: AllocationLogRepository,
{
    async fn load(&self, id: AssetId) -> Result<AssetRecord, Error> {
        self.assets
            .find_by_id(id)
            .await
            .map_err(asset_repository_error)?
            .ok_or_else(|| asset_not_found(id))
    }

    async fn load_type(&self, id: AssetTypeId) -> Result<AssetType, Error> {
        self.asset_types
            .find_by_id(id)
            .await
            .map_err(|err| asset_type_repository_error(err, Some(id)))?
            .ok_or_else(|| asset_type_not_found(id))
    }

    async fn load_user(&self, id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(user_repository_error)?
            .ok_or_else(|| user_not_found(id))
    }

    /// Persist a transition already applied to `record.asset` and project the
    /// result.
    async fn commit(
        &self,
        record: AssetRecord,
        expected_status: AssetStatus,
        ledger_entry: Option<NewAllocationLogEntry>,
        assigned_user_name: Option<String>,
    ) -> Result<AssetView, Error> {
        let transition = AssetTransition {
            asset: record.asset,
            expected_status,
            ledger_entry,
        };
        self.assets
            .apply_transition(&transition)
            .await
            .map_err(asset_repository_error)?;
        info!(
            asset_id = %transition.asset.id(),
            from = %expected_status,
            to = %transition.asset.status(),
            user_id = ?transition.ledger_entry.map(|entry| entry.user_id.get()),
            "asset transitioned"
        );
        Ok(AssetView::from(AssetRecord {
            asset: transition.asset,
            asset_type_name: record.asset_type_name,
            assigned_user_name,
        }))
    }
}

#[async_trait]
impl<A, T, U, L> AssetQuery for AssetService<A, T, U, L>
where
    A: AssetRepository,
    T: AssetTypeRepository,
    U: UserRepository,
    L: AllocationLogRepository,
{
    async fn list(&self) -> Result<Vec<AssetView>, Error> {
        let records = self.assets.list().await.map_err(asset_repository_error)?;
        Ok(records.into_iter().map(AssetView::from).collect())
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<AssetView>, Error> {
        let records = self
            .assets
            .list_by_user(user_id)
            .await
            .map_err(asset_repository_error)?;
        Ok(records.into_iter().map(AssetView::from).collect())
    }

    async fn get(&self, id: AssetId) -> Result<AssetView, Error> {
        self.load(id).await.map(AssetView::from)
    }

    async fn get_by_serial(&self, serial_number: SerialNumber) -> Result<AssetView, Error> {
        self.assets
            .find_by_serial(&serial_number)
            .await
            .map_err(asset_repository_error)?
            .map(AssetView::from)
            .ok_or_else(|| asset_serial_not_found(serial_number.as_ref()))
    }

    async fn history(&self, filter: HistoryFilter) -> Result<Vec<AllocationHistoryEntry>, Error> {
        self.ledger
            .history(filter)
            .await
            .map_err(allocation_log_error)
    }
}

#[async_trait]
impl<A, T, U, L> AssetCommand for AssetService<A, T, U, L>
where
    A: AssetRepository,
    T: AssetTypeRepository,
    U: UserRepository,
    L: AllocationLogRepository,
{
    async fn create(&self, asset: NewAsset) -> Result<AssetView, Error> {
        self.load_type(asset.asset_type_id).await?;
        let existing = self
            .assets
            .find_by_serial(&asset.serial_number)
            .await
            .map_err(asset_repository_error)?;
        if existing.is_some() {
            return Err(duplicate_serial(asset.serial_number.as_ref()));
        }
        let record = self
            .assets
            .insert(&asset)
            .await
            .map_err(asset_repository_error)?;
        info!(
            asset_id = %record.asset.id(),
            serial_number = %record.asset.serial_number(),
            "asset registered"
        );
        Ok(AssetView::from(record))
    }

    async fn update(&self, id: AssetId, details: AssetDetails) -> Result<AssetView, Error> {
        let mut record = self.load(id).await?;
        let asset_type = self.load_type(details.asset_type_id).await?;
        let AssetDetails {
            name,
            asset_type_id,
            value,
        } = details;
        record.asset.rename(name);
        record.asset.change_type(asset_type_id);
        record.asset.revalue(value);
        let updated = self
            .assets
            .update_details(&record.asset)
            .await
            .map_err(asset_repository_error)?;
        if !updated {
            return Err(asset_not_found(id));
        }
        record.asset_type_name = asset_type.name().to_string();
        Ok(AssetView::from(record))
    }

    async fn allocate(&self, id: AssetId, user_id: UserId) -> Result<AssetView, Error> {
        let mut record = self.load(id).await?;
        let status = record.asset.status();
        if status != AssetStatus::Available {
            return Err(asset_error(AssetError::InvalidState {
                asset_id: id,
                status,
                action: AssetAction::Allocate,
            }));
        }
        let user = self.load_user(user_id).await?;
        let now = self.clock.utc();
        record
            .asset
            .allocate_to(user.id(), now)
            .map_err(asset_error)?;
        let entry = NewAllocationLogEntry::allocated(id, user.id(), now);
        self.commit(record, status, Some(entry), Some(user.name().to_string()))
            .await
    }

    async fn return_asset(&self, id: AssetId) -> Result<AssetView, Error> {
        let mut record = self.load(id).await?;
        let status = record.asset.status();
        let previous = record.asset.release().map_err(asset_error)?;
        let entry = NewAllocationLogEntry::returned(id, previous.user_id, self.clock.utc());
        self.commit(record, status, Some(entry), None).await
    }

    async fn mark_maintenance(&self, id: AssetId) -> Result<AssetView, Error> {
        let mut record = self.load(id).await?;
        let status = record.asset.status();
        record.asset.mark_maintenance().map_err(asset_error)?;
        self.commit(record, status, None, None).await
    }

    async fn complete_maintenance(
        &self,
        id: AssetId,
        is_operational: bool,
    ) -> Result<AssetView, Error> {
        let mut record = self.load(id).await?;
        let status = record.asset.status();
        record
            .asset
            .complete_maintenance(is_operational)
            .map_err(asset_error)?;
        self.commit(record, status, None, None).await
    }
}

#[cfg(test)]
#[path = "asset_service_tests.rs"]
mod tests;
