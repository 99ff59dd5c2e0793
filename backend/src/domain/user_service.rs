//! User management service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::ports::{AllocationLogRepository, UserCommand, UserQuery, UserRepository};
use super::service_errors::{
    allocation_log_error, duplicate_email, user_not_found, user_repository_error,
};
use super::{AllocationHistoryEntry, EmailAddress, Error, HistoryFilter, NewUser, User, UserId};

/// User service implementing the driving ports.
#[derive(Clone)]
pub struct UserService<U, L> {
    users: Arc<U>,
    ledger: Arc<L>,
}

impl<U, L> UserService<U, L> {
    /// Create a new service over the user store and the allocation ledger.
    pub fn new(users: Arc<U>, ledger: Arc<L>) -> Self {
        Self { users, ledger }
    }
}

impl<U, L> UserService<U, L>
where
    U: UserRepository,
    L: AllocationLogRepository,
{
    async fn load(&self, id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(user_repository_error)?
            .ok_or_else(|| user_not_found(id))
    }

    async fn ensure_email_free(&self, email: &EmailAddress) -> Result<(), Error> {
        match self
            .users
            .find_by_email(email)
            .await
            .map_err(user_repository_error)?
        {
            Some(_) => Err(duplicate_email(email.as_ref())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<U, L> UserQuery for UserService<U, L>
where
    U: UserRepository,
    L: AllocationLogRepository,
{
    async fn list(&self) -> Result<Vec<User>, Error> {
        self.users.list().await.map_err(user_repository_error)
    }

    async fn get(&self, id: UserId) -> Result<User, Error> {
        self.load(id).await
    }

    async fn allocation_history(&self, id: UserId) -> Result<Vec<AllocationHistoryEntry>, Error> {
        self.ledger
            .history(HistoryFilter::for_user(id))
            .await
            .map_err(allocation_log_error)
    }
}

#[async_trait]
impl<U, L> UserCommand for UserService<U, L>
where
    U: UserRepository,
    L: AllocationLogRepository,
{
    async fn create(&self, user: NewUser) -> Result<User, Error> {
        self.ensure_email_free(&user.email).await?;
        let created = self
            .users
            .insert(&user)
            .await
            .map_err(user_repository_error)?;
        info!(user_id = %created.id(), "user created");
        Ok(created)
    }

    async fn update(&self, id: UserId, changes: NewUser) -> Result<User, Error> {
        let mut user = self.load(id).await?;
        let NewUser { name, email } = changes;
        if user.email() != &email {
            self.ensure_email_free(&email).await?;
        }
        user.update_name(name);
        user.update_email(email);
        let updated = self
            .users
            .update(&user)
            .await
            .map_err(user_repository_error)?;
        if !updated {
            return Err(user_not_found(id));
        }
        Ok(user)
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
