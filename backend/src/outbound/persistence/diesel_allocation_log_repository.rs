//! PostgreSQL implementation of the `AllocationLogRepository` port.

use std::str::FromStr;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AllocationLogRepository, AllocationLogRepositoryError};
use crate::domain::{
    AllocationAction, AllocationHistoryEntry, AllocationLogId, AssetId, HistoryFilter, UserId,
};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, map_pool_error_with};
use super::models::AllocationHistoryRow;
use super::pool::{DbPool, PoolError};
use super::schema::{asset_allocation_logs, assets, users};

/// Diesel-backed reader for the allocation ledger.
#[derive(Clone)]
pub struct DieselAllocationLogRepository {
    pool: DbPool,
}

impl DieselAllocationLogRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AllocationLogRepositoryError {
    map_pool_error_with(error, AllocationLogRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> AllocationLogRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => AllocationLogRepositoryError::connection(message),
        DieselFailure::UniqueViolation { .. } | DieselFailure::ForeignKeyViolation { .. } => {
            AllocationLogRepositoryError::query("unexpected constraint violation")
        }
        DieselFailure::Query(message) => AllocationLogRepositoryError::query(message),
    }
}

fn row_to_entry(
    row: AllocationHistoryRow,
) -> Result<AllocationHistoryEntry, AllocationLogRepositoryError> {
    let invalid = |err: &dyn std::fmt::Display| AllocationLogRepositoryError::query(err.to_string());
    Ok(AllocationHistoryEntry {
        id: AllocationLogId::new(row.id).map_err(|err| invalid(&err))?,
        asset_id: AssetId::new(row.asset_id).map_err(|err| invalid(&err))?,
        asset_name: row.asset_name,
        user_id: UserId::new(row.user_id).map_err(|err| invalid(&err))?,
        user_name: row.user_name,
        action: AllocationAction::from_str(&row.action).map_err(|err| invalid(&err))?,
        at: row.at_utc,
    })
}

#[async_trait]
impl AllocationLogRepository for DieselAllocationLogRepository {
    async fn history(
        &self,
        filter: HistoryFilter,
    ) -> Result<Vec<AllocationHistoryEntry>, AllocationLogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = asset_allocation_logs::table
            .inner_join(assets::table)
            .inner_join(users::table)
            .select((
                asset_allocation_logs::id,
                asset_allocation_logs::asset_id,
                assets::name,
                asset_allocation_logs::user_id,
                users::name,
                asset_allocation_logs::action,
                asset_allocation_logs::at_utc,
            ))
            .into_boxed();
        if let Some(asset_id) = filter.asset_id {
            query = query.filter(asset_allocation_logs::asset_id.eq(asset_id.get()));
        }
        if let Some(user_id) = filter.user_id {
            query = query.filter(asset_allocation_logs::user_id.eq(user_id.get()));
        }
        let rows: Vec<AllocationHistoryRow> = query
            .order((
                asset_allocation_logs::at_utc.desc(),
                asset_allocation_logs::id.desc(),
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_entry).collect()
    }
}
