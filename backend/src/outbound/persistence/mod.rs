//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of the inventory repository
//! ports backed by PostgreSQL via Diesel with async support through
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel models and domain types. Lifecycle rules live in the domain.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are never exposed to the domain layer.
//! - **Constraints as source of truth**: unique and foreign key violations
//!   surface as typed port errors so races the services cannot see are
//!   still reported precisely.
//!
//! # Example
//!
//! ```no_run
//! use asset_ledger::outbound::persistence::{DbPool, DieselAssetRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), asset_ledger::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/inventory")).await?;
//! let assets = DieselAssetRepository::new(pool);
//! # let _ = assets;
//! # Ok(())
//! # }
//! ```

mod diesel_allocation_log_repository;
mod diesel_asset_repository;
mod diesel_asset_type_repository;
mod diesel_error_mapping;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_allocation_log_repository::DieselAllocationLogRepository;
pub use diesel_asset_repository::DieselAssetRepository;
pub use diesel_asset_type_repository::DieselAssetTypeRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
