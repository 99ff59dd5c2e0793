//! Port for user persistence.

use async_trait::async_trait;

use crate::domain::{EmailAddress, NewUser, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "user repository query failed: {message}",
        /// The unique email constraint rejected the write.
        Duplicate { email: String } =>
            "email already registered: {email}",
    }
}

/// Storage for users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users ordered by name, then id.
    async fn list(&self) -> Result<Vec<User>, UserRepositoryError>;

    /// Look up a user by id.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Look up a user by normalised email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Insert a user and return it with its assigned id.
    async fn insert(&self, user: &NewUser) -> Result<User, UserRepositoryError>;

    /// Persist name and email changes. Returns `false` when no row matched.
    async fn update(&self, user: &User) -> Result<bool, UserRepositoryError>;
}
