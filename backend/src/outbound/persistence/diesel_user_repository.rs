//! PostgreSQL implementation of the `UserRepository` port.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{EmailAddress, NewUser, User, UserId, UserName};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, map_pool_error_with};
use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed user repository.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    map_pool_error_with(error, UserRepositoryError::connection)
}

fn map_diesel_error(
    error: diesel::result::Error,
    email: Option<&EmailAddress>,
) -> UserRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => UserRepositoryError::connection(message),
        DieselFailure::UniqueViolation { .. } => match email {
            Some(email) => UserRepositoryError::duplicate(email.as_ref()),
            None => UserRepositoryError::query("unexpected unique violation"),
        },
        DieselFailure::ForeignKeyViolation { .. } => {
            UserRepositoryError::query("foreign key violation")
        }
        DieselFailure::Query(message) => UserRepositoryError::query(message),
    }
}

/// Convert a database row to a domain user.
fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    let UserRow { id, name, email } = row;
    let id = UserId::new(id).map_err(|err| UserRepositoryError::query(err.to_string()))?;
    let name = UserName::new(name).map_err(|err| UserRepositoryError::query(err.to_string()))?;
    let email =
        EmailAddress::new(email).map_err(|err| UserRepositoryError::query(err.to_string()))?;
    Ok(User::new(id, name, email))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn list(&self) -> Result<Vec<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .select(UserRow::as_select())
            .order((users::name.asc(), users::id.asc()))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;
        rows.into_iter().map(row_to_user).collect()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.get()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;
        row.map(row_to_user).transpose()
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;
        row.map(row_to_user).transpose()
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewUserRow {
            name: user.name.as_ref(),
            email: user.email.as_ref(),
        };
        let row: UserRow = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(&user.email)))?;
        row_to_user(row)
    }

    async fn update(&self, user: &User) -> Result<bool, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = UserUpdate {
            name: user.name().as_ref(),
            email: user.email().as_ref(),
        };
        let updated = diesel::update(users::table.filter(users::id.eq(user.id().get())))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(user.email())))?;
        Ok(updated > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for user row conversion and error mapping.
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    #[rstest]
    fn unique_violation_reports_the_email() {
        let email = EmailAddress::new("ana@mail.com").expect("valid email");
        let err = map_diesel_error(
            DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                Box::new("duplicate key value violates unique constraint".to_owned()),
            ),
            Some(&email),
        );

        assert!(matches!(
            err,
            UserRepositoryError::Duplicate { ref email } if email == "ana@mail.com"
        ));
    }

    #[rstest]
    fn closed_connection_is_connection_error() {
        let err = map_diesel_error(
            DieselError::DatabaseError(
                DatabaseErrorKind::ClosedConnection,
                Box::new("server closed the connection".to_owned()),
            ),
            None,
        );

        assert!(matches!(err, UserRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn row_converts_to_user() {
        let user = row_to_user(UserRow {
            id: 2,
            name: "Luís".to_owned(),
            email: "luis@mail.com".to_owned(),
        })
        .expect("valid row");

        assert_eq!(user.id().get(), 2);
        assert_eq!(user.name().as_ref(), "Luís");
    }

    #[rstest]
    fn row_with_invalid_email_is_rejected() {
        let err = row_to_user(UserRow {
            id: 2,
            name: "Luís".to_owned(),
            email: "not-an-email".to_owned(),
        })
        .expect_err("email lacks @");

        assert!(matches!(err, UserRepositoryError::Query { .. }));
    }
}
