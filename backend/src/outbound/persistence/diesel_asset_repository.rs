//! PostgreSQL implementation of the `AssetRepository` port.
//!
//! Reads join `asset_types` and, for in-use assets, `users` so each record
//! carries the names shown to clients. Lifecycle writes run inside a
//! transaction: the status update is guarded by the expected prior status
//! and the ledger row is appended only if the guard matched.

use std::str::FromStr;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use tracing::warn;

use crate::domain::ports::{AssetRecord, AssetRepository, AssetRepositoryError, AssetTransition};
use crate::domain::{
    Asset, AssetId, AssetName, AssetParts, AssetStatus, AssetTypeId, AssetValue, NewAsset,
    SerialNumber, UserId,
};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, map_pool_error_with};
use super::models::{
    AssetDetailsUpdate, AssetRow, AssetStateUpdate, NewAllocationLogRow, NewAssetRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{asset_allocation_logs, asset_types, assets, users};

/// Joined asset row: the asset, its type name and the assignee name.
type AssetRecordRow = (AssetRow, String, Option<String>);

/// Base query selecting [`AssetRecordRow`] tuples.
macro_rules! asset_records {
    () => {
        assets::table
            .inner_join(asset_types::table)
            .left_join(users::table)
            .select((
                AssetRow::as_select(),
                asset_types::name,
                users::name.nullable(),
            ))
    };
}

/// Diesel-backed asset repository.
#[derive(Clone)]
pub struct DieselAssetRepository {
    pool: DbPool,
}

impl DieselAssetRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Failure inside the transition transaction.
#[derive(Debug)]
enum TransitionFailure {
    Stale,
    Diesel(diesel::result::Error),
}

impl From<diesel::result::Error> for TransitionFailure {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

fn map_pool_error(error: PoolError) -> AssetRepositoryError {
    map_pool_error_with(error, AssetRepositoryError::connection)
}

/// Map Diesel errors, attributing unique violations to `serial_number`.
fn map_diesel_error(
    error: diesel::result::Error,
    serial_number: Option<&SerialNumber>,
) -> AssetRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => AssetRepositoryError::connection(message),
        DieselFailure::UniqueViolation { .. } => match serial_number {
            Some(serial) => AssetRepositoryError::duplicate(serial.as_ref()),
            None => AssetRepositoryError::query("unexpected unique violation"),
        },
        DieselFailure::ForeignKeyViolation { constraint } => AssetRepositoryError::referenced(
            constraint.unwrap_or_else(|| "foreign key violation".to_owned()),
        ),
        DieselFailure::Query(message) => AssetRepositoryError::query(message),
    }
}

fn corrupt(asset_id: i64, error: impl ToString) -> AssetRepositoryError {
    let message = error.to_string();
    warn!(asset_id, %message, "stored asset row is invalid");
    AssetRepositoryError::query(message)
}

/// Rebuild the aggregate from stored columns.
fn row_to_asset(row: AssetRow) -> Result<Asset, AssetRepositoryError> {
    let raw_id = row.id;
    let parts = AssetParts {
        id: AssetId::new(row.id).map_err(|err| corrupt(raw_id, err))?,
        name: AssetName::new(&row.name).map_err(|err| corrupt(raw_id, err))?,
        serial_number: SerialNumber::new(&row.serial_number)
            .map_err(|err| corrupt(raw_id, err))?,
        asset_type_id: AssetTypeId::new(row.asset_type_id).map_err(|err| corrupt(raw_id, err))?,
        value: AssetValue::new(row.value).map_err(|err| corrupt(raw_id, err))?,
        status: AssetStatus::from_str(&row.status).map_err(|err| corrupt(raw_id, err))?,
        assigned_to_user_id: row
            .assigned_to_user_id
            .map(UserId::new)
            .transpose()
            .map_err(|err| corrupt(raw_id, err))?,
        assigned_at: row.assigned_at_utc,
    };
    Asset::restore(parts).map_err(|err| corrupt(raw_id, err))
}

fn row_to_record(row: AssetRecordRow) -> Result<AssetRecord, AssetRepositoryError> {
    let (asset_row, asset_type_name, assigned_user_name) = row;
    Ok(AssetRecord {
        asset: row_to_asset(asset_row)?,
        asset_type_name,
        assigned_user_name,
    })
}

async fn load_record(
    conn: &mut AsyncPgConnection,
    id: i64,
) -> Result<Option<AssetRecord>, AssetRepositoryError> {
    let row: Option<AssetRecordRow> = asset_records!()
        .filter(assets::id.eq(id))
        .first(conn)
        .await
        .optional()
        .map_err(|err| map_diesel_error(err, None))?;
    row.map(row_to_record).transpose()
}

fn state_update(asset: &Asset) -> AssetStateUpdate<'static> {
    let assignment = asset.assignment();
    AssetStateUpdate {
        status: asset.status().as_str(),
        assigned_to_user_id: assignment.map(|held| held.user_id.get()),
        assigned_at_utc: assignment.map(|held| held.assigned_at),
    }
}

#[async_trait]
impl AssetRepository for DieselAssetRepository {
    async fn list(&self) -> Result<Vec<AssetRecord>, AssetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AssetRecordRow> = asset_records!()
            .order((assets::name.asc(), assets::id.asc()))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;
        rows.into_iter().map(row_to_record).collect()
    }

    async fn list_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<AssetRecord>, AssetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AssetRecordRow> = asset_records!()
            .filter(assets::assigned_to_user_id.eq(user_id.get()))
            .order((assets::name.asc(), assets::id.asc()))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;
        rows.into_iter().map(row_to_record).collect()
    }

    async fn find_by_id(&self, id: AssetId) -> Result<Option<AssetRecord>, AssetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        load_record(&mut conn, id.get()).await
    }

    async fn find_by_serial(
        &self,
        serial_number: &SerialNumber,
    ) -> Result<Option<AssetRecord>, AssetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<AssetRecordRow> = asset_records!()
            .filter(assets::serial_number.eq(serial_number.as_ref()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;
        row.map(row_to_record).transpose()
    }

    async fn insert(&self, asset: &NewAsset) -> Result<AssetRecord, AssetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewAssetRow {
            name: asset.name.as_ref(),
            serial_number: asset.serial_number.as_ref(),
            asset_type_id: asset.asset_type_id.get(),
            value: asset.value.as_decimal(),
            status: AssetStatus::Available.as_str(),
        };
        let id: i64 = diesel::insert_into(assets::table)
            .values(&new_row)
            .returning(assets::id)
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(&asset.serial_number)))?;
        load_record(&mut conn, id)
            .await?
            .ok_or_else(|| AssetRepositoryError::query(format!("inserted asset {id} vanished")))
    }

    async fn update_details(&self, asset: &Asset) -> Result<bool, AssetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = AssetDetailsUpdate {
            name: asset.name().as_ref(),
            serial_number: asset.serial_number().as_ref(),
            asset_type_id: asset.asset_type_id().get(),
            value: asset.value().as_decimal(),
        };
        let updated = diesel::update(assets::table.filter(assets::id.eq(asset.id().get())))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(asset.serial_number())))?;
        Ok(updated > 0)
    }

    async fn apply_transition(
        &self,
        transition: &AssetTransition,
    ) -> Result<(), AssetRepositoryError> {
        let asset_id = transition.asset.id();
        let expected_status = transition.expected_status.as_str();
        let changes = state_update(&transition.asset);
        let ledger_row = transition.ledger_entry.map(|entry| NewAllocationLogRow {
            asset_id: entry.asset_id.get(),
            user_id: entry.user_id.get(),
            action: entry.action.as_str(),
            at_utc: entry.at,
        });
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let outcome = conn
            .transaction::<_, TransitionFailure, _>(|conn| {
                async move {
                    let updated = diesel::update(
                        assets::table
                            .filter(assets::id.eq(asset_id.get()))
                            .filter(assets::status.eq(expected_status)),
                    )
                    .set(&changes)
                    .execute(conn)
                    .await?;
                    if updated == 0 {
                        return Err(TransitionFailure::Stale);
                    }
                    if let Some(row) = ledger_row {
                        diesel::insert_into(asset_allocation_logs::table)
                            .values(&row)
                            .execute(conn)
                            .await?;
                    }
                    Ok(())
                }
                .scope_boxed()
            })
            .await;

        match outcome {
            Ok(()) => Ok(()),
            Err(TransitionFailure::Stale) => {
                warn!(
                    asset_id = %asset_id,
                    expected = expected_status,
                    "asset status changed before transition committed"
                );
                Err(AssetRepositoryError::stale_state(asset_id))
            }
            Err(TransitionFailure::Diesel(error)) => Err(map_diesel_error(error, None)),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Row conversion and error mapping for the asset adapter.
    use super::*;
    use chrono::{TimeZone, Utc};
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::{fixture, rstest};
    use rust_decimal::Decimal;

    #[fixture]
    fn row() -> AssetRow {
        AssetRow {
            id: 5,
            name: "Mouse Logitech".to_owned(),
            serial_number: "SN654".to_owned(),
            asset_type_id: 4,
            value: Decimal::new(3000, 2),
            status: "available".to_owned(),
            assigned_to_user_id: None,
            assigned_at_utc: None,
        }
    }

    #[rstest]
    fn available_row_restores(row: AssetRow) {
        let asset = row_to_asset(row).expect("valid row");

        assert_eq!(asset.status(), AssetStatus::Available);
        assert_eq!(asset.serial_number().as_ref(), "SN654");
        assert!(asset.assignment().is_none());
    }

    #[rstest]
    fn in_use_row_restores_assignment(mut row: AssetRow) {
        let at = Utc
            .with_ymd_and_hms(2026, 2, 3, 9, 30, 0)
            .single()
            .expect("valid timestamp");
        row.status = "in_use".to_owned();
        row.assigned_to_user_id = Some(1);
        row.assigned_at_utc = Some(at);

        let asset = row_to_asset(row).expect("valid row");
        let assignment = asset.assignment().expect("assignment present");
        assert_eq!(assignment.user_id.get(), 1);
        assert_eq!(assignment.assigned_at, at);
    }

    #[rstest]
    #[case::unknown_status("lost", None)]
    #[case::assignee_without_in_use("available", Some(1))]
    #[case::in_use_without_assignee("in_use", None)]
    fn inconsistent_rows_are_rejected(
        mut row: AssetRow,
        #[case] status: &str,
        #[case] assignee: Option<i64>,
    ) {
        row.status = status.to_owned();
        row.assigned_to_user_id = assignee;

        let err = row_to_asset(row).expect_err("row should be rejected");
        assert!(matches!(err, AssetRepositoryError::Query { .. }));
    }

    #[rstest]
    fn state_update_clears_assignment_when_released(row: AssetRow) {
        let asset = row_to_asset(row).expect("valid row");
        let changes = state_update(&asset);

        assert_eq!(changes.status, "available");
        assert_eq!(changes.assigned_to_user_id, None);
        assert_eq!(changes.assigned_at_utc, None);
    }

    #[rstest]
    fn unique_violation_reports_serial() {
        let serial = SerialNumber::new("SN123").expect("valid serial");
        let err = map_diesel_error(
            DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                Box::new("assets_serial_number_key".to_owned()),
            ),
            Some(&serial),
        );

        assert!(matches!(
            err,
            AssetRepositoryError::Duplicate { ref serial_number } if serial_number == "SN123"
        ));
    }

    #[rstest]
    fn foreign_key_violation_is_referenced() {
        let err = map_diesel_error(
            DieselError::DatabaseError(
                DatabaseErrorKind::ForeignKeyViolation,
                Box::new("fk_assets_asset_types".to_owned()),
            ),
            None,
        );

        assert!(matches!(err, AssetRepositoryError::Referenced { .. }));
    }
}
