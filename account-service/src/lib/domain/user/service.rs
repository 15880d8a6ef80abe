use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::domain::user::models::AuthSession;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
/// Password hashing and verification run on the blocking thread pool.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn hash_password(&self, password: Password) -> Result<String, UserError> {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || authenticator.hash_password(password.expose()))
            .await
            .map_err(|e| UserError::HashingFailed(e.to_string()))?
            .map_err(UserError::from)
    }

    async fn verify_unknown_account(&self, password: Password) -> Result<(), UserError> {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || {
            authenticator.verify_unknown_account(password.expose())
        })
        .await
        .map_err(|e| UserError::Unknown(format!("Credential check aborted: {}", e)))
    }

    async fn authenticate(&self, user: &User, password: Password) -> Result<String, UserError> {
        let authenticator = Arc::clone(&self.authenticator);
        let stored_hash = user.password_hash.clone();
        let identity = user.identity();

        let result = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(password.expose(), &stored_hash, &identity)
        })
        .await
        .map_err(|e| UserError::Unknown(format!("Credential check aborted: {}", e)))?;

        match result {
            Ok(authenticated) => Ok(authenticated.access_token),
            Err(AuthenticationError::InvalidCredentials) => Err(UserError::InvalidCredentials),
            Err(AuthenticationError::JwtError(e)) => Err(UserError::from(e)),
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, UserError> {
        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            tracing::info!("Registration rejected: email already registered");
            return Err(UserError::EmailAlreadyRegistered(command.email.to_string()));
        }

        let password_hash = self.hash_password(command.password).await?;

        let user = self
            .repository
            .create(NewUser {
                email: command.email,
                password_hash,
            })
            .await?;

        let access_token = self.authenticator.issue_token(&user.identity())?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(AuthSession { user, access_token })
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthSession, UserError> {
        let Some(user) = self.repository.find_by_email(&command.email).await? else {
            self.verify_unknown_account(command.password).await?;
            tracing::info!("Login rejected: unknown email");
            return Err(UserError::InvalidCredentials);
        };

        let access_token = self.authenticate(&user, command.password).await.map_err(|e| {
            if matches!(e, UserError::InvalidCredentials) {
                tracing::info!(user_id = %user.id, "Login rejected: wrong password");
            }
            e
        })?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(AuthSession { user, access_token })
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.0))
    }

    async fn check_health(&self) -> Result<(), UserError> {
        self.repository.ping().await
    }
}
