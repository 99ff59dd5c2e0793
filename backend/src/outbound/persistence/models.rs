//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;

use super::schema::{asset_allocation_logs, asset_types, assets, users};

// ---------------------------------------------------------------------------
// Asset type models
// ---------------------------------------------------------------------------

/// Row struct for reading from the asset_types table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = asset_types)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AssetTypeRow {
    pub id: i64,
    pub name: String,
}

/// Insertable struct for creating asset types.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = asset_types)]
pub(crate) struct NewAssetTypeRow<'a> {
    pub name: &'a str,
}

// ---------------------------------------------------------------------------
// User models
// ---------------------------------------------------------------------------

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

/// Changeset struct for updating existing user records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

// ---------------------------------------------------------------------------
// Asset models
// ---------------------------------------------------------------------------

/// Row struct for reading from the assets table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = assets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AssetRow {
    pub id: i64,
    pub name: String,
    pub serial_number: String,
    pub asset_type_id: i64,
    pub value: Decimal,
    pub status: String,
    pub assigned_to_user_id: Option<i64>,
    pub assigned_at_utc: Option<DateTime<Utc>>,
}

/// Insertable struct for registering assets.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = assets)]
pub(crate) struct NewAssetRow<'a> {
    pub name: &'a str,
    pub serial_number: &'a str,
    pub asset_type_id: i64,
    pub value: Decimal,
    pub status: &'a str,
}

/// Changeset for descriptive fields; never touches lifecycle columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = assets)]
pub(crate) struct AssetDetailsUpdate<'a> {
    pub name: &'a str,
    pub serial_number: &'a str,
    pub asset_type_id: i64,
    pub value: Decimal,
}

/// Changeset for lifecycle columns.
///
/// `None` clears the assignment columns rather than skipping them.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = assets)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct AssetStateUpdate<'a> {
    pub status: &'a str,
    pub assigned_to_user_id: Option<i64>,
    pub assigned_at_utc: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Allocation ledger models
// ---------------------------------------------------------------------------

/// Insertable struct for appending ledger entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = asset_allocation_logs)]
pub(crate) struct NewAllocationLogRow<'a> {
    pub asset_id: i64,
    pub user_id: i64,
    pub action: &'a str,
    pub at_utc: DateTime<Utc>,
}

/// Ledger entry joined with the current asset and user names.
///
/// Field order matches the select tuple in the history query.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct AllocationHistoryRow {
    pub id: i64,
    pub asset_id: i64,
    pub asset_name: String,
    pub user_id: i64,
    pub user_name: String,
    pub action: String,
    pub at_utc: DateTime<Utc>,
}
