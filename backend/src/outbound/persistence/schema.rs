//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// Asset classifications.
    ///
    /// `name` is stored upper-cased and is unique.
    asset_types (id) {
        /// Primary key: identity column.
        id -> Int8,
        /// Normalised type name (max 60 characters).
        name -> Varchar,
    }
}

diesel::table! {
    /// People assets can be allocated to.
    users (id) {
        /// Primary key: identity column.
        id -> Int8,
        /// Display name (max 120 characters).
        name -> Varchar,
        /// Lower-cased unique email address (max 200 characters).
        email -> Varchar,
    }
}

diesel::table! {
    /// Tracked physical assets.
    ///
    /// The `ck_assets_assignment_consistency` constraint requires both
    /// assignment columns to be set exactly when `status = 'in_use'`.
    assets (id) {
        /// Primary key: identity column.
        id -> Int8,
        /// Display name (max 150 characters).
        name -> Varchar,
        /// Unique serial number (max 80 characters).
        serial_number -> Varchar,
        /// Classification; restricts deletion of the referenced type.
        asset_type_id -> Int8,
        /// Monetary value, `numeric(18,2)`.
        value -> Numeric,
        /// Lifecycle status string.
        status -> Varchar,
        /// Current holder while in use.
        assigned_to_user_id -> Nullable<Int8>,
        /// Allocation timestamp while in use.
        assigned_at_utc -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Append-only allocation ledger.
    asset_allocation_logs (id) {
        /// Primary key: identity column.
        id -> Int8,
        /// Asset that changed hands.
        asset_id -> Int8,
        /// User receiving or returning the asset.
        user_id -> Int8,
        /// `allocated` or `returned`.
        action -> Varchar,
        /// Moment of the event.
        at_utc -> Timestamptz,
    }
}

diesel::joinable!(assets -> asset_types (asset_type_id));
diesel::joinable!(assets -> users (assigned_to_user_id));
diesel::joinable!(asset_allocation_logs -> assets (asset_id));
diesel::joinable!(asset_allocation_logs -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(asset_allocation_logs, asset_types, assets, users,);
