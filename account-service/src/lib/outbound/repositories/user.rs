use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// A unique violation on the email constraint means the address is taken.
fn map_create_error(err: sqlx::Error, email: &EmailAddress) -> UserError {
    match err.as_database_error() {
        Some(db_err)
            if db_err.is_unique_violation()
                && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT) =>
        {
            UserError::EmailAlreadyRegistered(email.to_string())
        }
        _ => UserError::DatabaseError(err.to_string()),
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            email: EmailAddress::new(row.email)?,
            password_hash: row.password_hash,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_create_error(e, &user.email))?;

        row.try_into()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?
        .map(User::try_from)
        .transpose()
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?
        .map(User::try_from)
        .transpose()
    }

    async fn ping(&self) -> Result<(), UserError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| UserError::DatabaseError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as StdError;

    use sqlx::error::DatabaseError;
    use sqlx::error::ErrorKind;

    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("{message}")]
    struct ConstraintError {
        message: String,
        unique: bool,
        constraint: Option<&'static str>,
    }

    impl DatabaseError for ConstraintError {
        fn message(&self) -> &str {
            &self.message
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn constraint(&self) -> Option<&str> {
            self.constraint
        }

        fn kind(&self) -> ErrorKind {
            if self.unique {
                ErrorKind::UniqueViolation
            } else {
                ErrorKind::Other
            }
        }
    }

    fn database_error(unique: bool, constraint: Option<&'static str>) -> sqlx::Error {
        sqlx::Error::Database(Box::new(ConstraintError {
            message: "constraint violated".to_string(),
            unique,
            constraint,
        }))
    }

    fn email() -> EmailAddress {
        EmailAddress::new("a@b.com".to_string()).unwrap()
    }

    #[test]
    fn test_email_unique_violation_is_already_registered() {
        let err = database_error(true, Some(EMAIL_UNIQUE_CONSTRAINT));

        assert!(matches!(
            map_create_error(err, &email()),
            UserError::EmailAlreadyRegistered(address) if address == "a@b.com"
        ));
    }

    #[test]
    fn test_other_unique_violation_is_database_error() {
        let err = database_error(true, Some("users_pkey"));

        assert!(matches!(
            map_create_error(err, &email()),
            UserError::DatabaseError(_)
        ));
    }

    #[test]
    fn test_non_unique_failure_on_email_constraint_is_database_error() {
        let err = database_error(false, Some(EMAIL_UNIQUE_CONSTRAINT));

        assert!(matches!(
            map_create_error(err, &email()),
            UserError::DatabaseError(_)
        ));
    }

    #[test]
    fn test_connection_failure_is_database_error() {
        assert!(matches!(
            map_create_error(sqlx::Error::PoolTimedOut, &email()),
            UserError::DatabaseError(_)
        ));
    }
}
