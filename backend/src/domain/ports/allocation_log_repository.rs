//! Port for reading the allocation ledger.
//!
//! Writes happen through `AssetRepository::apply_transition` so the ledger
//! entry and the asset mutation commit together.

use async_trait::async_trait;

use crate::domain::{AllocationHistoryEntry, HistoryFilter};

use super::define_port_error;

define_port_error! {
    /// Errors raised by allocation ledger adapters.
    pub enum AllocationLogRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "allocation log connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "allocation log query failed: {message}",
    }
}

/// Read access to ledger entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AllocationLogRepository: Send + Sync {
    /// Entries matching the filter, newest first (ties broken by id
    /// descending), with current asset and user names.
    async fn history(
        &self,
        filter: HistoryFilter,
    ) -> Result<Vec<AllocationHistoryEntry>, AllocationLogRepositoryError>;
}
