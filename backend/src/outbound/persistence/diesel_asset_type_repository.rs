//! PostgreSQL implementation of the `AssetTypeRepository` port.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{AssetTypeRepository, AssetTypeRepositoryError};
use crate::domain::{AssetType, AssetTypeId, AssetTypeName};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, map_pool_error_with};
use super::models::{AssetTypeRow, NewAssetTypeRow};
use super::pool::{DbPool, PoolError};
use super::schema::{asset_types, assets};

/// Diesel-backed asset type repository.
#[derive(Clone)]
pub struct DieselAssetTypeRepository {
    pool: DbPool,
}

impl DieselAssetTypeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AssetTypeRepositoryError {
    map_pool_error_with(error, AssetTypeRepositoryError::connection)
}

/// Map Diesel errors, attributing unique violations to `name` when given.
fn map_diesel_error(
    error: diesel::result::Error,
    name: Option<&AssetTypeName>,
) -> AssetTypeRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => AssetTypeRepositoryError::connection(message),
        DieselFailure::UniqueViolation { .. } => match name {
            Some(name) => AssetTypeRepositoryError::duplicate(name.as_ref()),
            None => AssetTypeRepositoryError::query("unexpected unique violation"),
        },
        DieselFailure::ForeignKeyViolation { constraint } => {
            AssetTypeRepositoryError::referenced(constraint.unwrap_or_else(|| "assets".to_owned()))
        }
        DieselFailure::Query(message) => AssetTypeRepositoryError::query(message),
    }
}

fn row_to_asset_type(row: AssetTypeRow) -> Result<AssetType, AssetTypeRepositoryError> {
    let id = AssetTypeId::new(row.id).map_err(|err| {
        warn!(row_id = row.id, "stored asset type id is invalid");
        AssetTypeRepositoryError::query(err.to_string())
    })?;
    let name = AssetTypeName::new(&row.name).map_err(|err| {
        warn!(asset_type_id = row.id, "stored asset type name is invalid");
        AssetTypeRepositoryError::query(err.to_string())
    })?;
    Ok(AssetType::new(id, name))
}

#[async_trait]
impl AssetTypeRepository for DieselAssetTypeRepository {
    async fn list(&self) -> Result<Vec<AssetType>, AssetTypeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AssetTypeRow> = asset_types::table
            .select(AssetTypeRow::as_select())
            .order((asset_types::name.asc(), asset_types::id.asc()))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;
        rows.into_iter().map(row_to_asset_type).collect()
    }

    async fn find_by_id(
        &self,
        id: AssetTypeId,
    ) -> Result<Option<AssetType>, AssetTypeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<AssetTypeRow> = asset_types::table
            .filter(asset_types::id.eq(id.get()))
            .select(AssetTypeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;
        row.map(row_to_asset_type).transpose()
    }

    async fn find_by_name(
        &self,
        name: &AssetTypeName,
    ) -> Result<Option<AssetType>, AssetTypeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<AssetTypeRow> = asset_types::table
            .filter(asset_types::name.eq(name.as_ref()))
            .select(AssetTypeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, Some(name)))?;
        row.map(row_to_asset_type).transpose()
    }

    async fn insert(&self, name: &AssetTypeName) -> Result<AssetType, AssetTypeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: AssetTypeRow = diesel::insert_into(asset_types::table)
            .values(&NewAssetTypeRow {
                name: name.as_ref(),
            })
            .returning(AssetTypeRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(name)))?;
        row_to_asset_type(row)
    }

    async fn rename(
        &self,
        id: AssetTypeId,
        name: &AssetTypeName,
    ) -> Result<bool, AssetTypeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(asset_types::table.filter(asset_types::id.eq(id.get())))
            .set(asset_types::name.eq(name.as_ref()))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(name)))?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: AssetTypeId) -> Result<bool, AssetTypeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(asset_types::table.filter(asset_types::id.eq(id.get())))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;
        Ok(deleted > 0)
    }

    async fn is_referenced(&self, id: AssetTypeId) -> Result<bool, AssetTypeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(
            assets::table.filter(assets::asset_type_id.eq(id.get())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(|err| map_diesel_error(err, None))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for asset type error mapping and row conversion.
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    fn database_error(kind: DatabaseErrorKind) -> DieselError {
        DieselError::DatabaseError(kind, Box::new("violation".to_owned()))
    }

    #[rstest]
    fn unique_violation_reports_the_name() {
        let name = AssetTypeName::new("monitor").expect("valid name");
        let err = map_diesel_error(database_error(DatabaseErrorKind::UniqueViolation), Some(&name));

        assert!(matches!(
            err,
            AssetTypeRepositoryError::Duplicate { ref name } if name == "MONITOR"
        ));
    }

    #[rstest]
    fn foreign_key_violation_is_referenced() {
        let err = map_diesel_error(database_error(DatabaseErrorKind::ForeignKeyViolation), None);

        assert!(matches!(err, AssetTypeRepositoryError::Referenced { .. }));
    }

    #[rstest]
    fn pool_failure_is_connection_error() {
        let err = map_pool_error(PoolError::checkout("timed out"));

        assert!(matches!(err, AssetTypeRepositoryError::Connection { .. }));
        assert!(err.to_string().contains("timed out"));
    }

    #[rstest]
    #[case(0, "NOTEBOOK")]
    #[case(3, "")]
    fn corrupt_rows_are_query_errors(#[case] id: i64, #[case] name: &str) {
        let row = AssetTypeRow {
            id,
            name: name.to_owned(),
        };

        let err = row_to_asset_type(row).expect_err("row should be rejected");
        assert!(matches!(err, AssetTypeRepositoryError::Query { .. }));
    }
}
