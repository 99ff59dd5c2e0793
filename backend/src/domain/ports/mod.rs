//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters. Driving
//! ports (`*Command`, `*Query`) are implemented by the domain services and
//! consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod allocation_log_repository;
mod asset_command;
mod asset_repository;
mod asset_type_command;
mod asset_type_repository;
mod user_command;
mod user_repository;

#[cfg(test)]
pub use allocation_log_repository::MockAllocationLogRepository;
pub use allocation_log_repository::{AllocationLogRepository, AllocationLogRepositoryError};
#[cfg(test)]
pub use asset_command::{MockAssetCommand, MockAssetQuery};
pub use asset_command::{AssetCommand, AssetDetails, AssetQuery, AssetView};
#[cfg(test)]
pub use asset_repository::MockAssetRepository;
pub use asset_repository::{AssetRecord, AssetRepository, AssetRepositoryError, AssetTransition};
#[cfg(test)]
pub use asset_type_command::{MockAssetTypeCommand, MockAssetTypeQuery};
pub use asset_type_command::{AssetTypeCommand, AssetTypeQuery};
#[cfg(test)]
pub use asset_type_repository::MockAssetTypeRepository;
pub use asset_type_repository::{AssetTypeRepository, AssetTypeRepositoryError};
#[cfg(test)]
pub use user_command::{MockUserCommand, MockUserQuery};
pub use user_command::{UserCommand, UserQuery};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
