//! Driving ports for user management.

use async_trait::async_trait;

use crate::domain::{AllocationHistoryEntry, Error, NewUser, User, UserId};

/// Read side of user management.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserQuery: Send + Sync {
    /// All users ordered by name.
    async fn list(&self) -> Result<Vec<User>, Error>;

    /// Fetch one user, failing with `not_found` when absent.
    async fn get(&self, id: UserId) -> Result<User, Error>;

    /// Ledger entries involving the user, newest first.
    async fn allocation_history(&self, id: UserId) -> Result<Vec<AllocationHistoryEntry>, Error>;
}

/// Write side of user management.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserCommand: Send + Sync {
    /// Register a user, failing with `duplicate_key` when the email is taken.
    async fn create(&self, user: NewUser) -> Result<User, Error>;

    /// Replace name and email. The email duplicate check only runs when the
    /// normalised address changes.
    async fn update(&self, id: UserId, changes: NewUser) -> Result<User, Error>;
}
