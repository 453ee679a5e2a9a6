//! Signup, login, and admin promotion.

use domains::{
    non_empty, present, Admin, CredentialHasher, DomainError, LoginInput, PublicUser, Result, SessionUser,
    SignupInput, TokenIssuer, User, UserRepository,
};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: SessionUser,
    pub token: String,
}

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn CredentialHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn CredentialHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self { users, hasher, tokens }
    }

    /// Registers a new account. The returned record never carries the hash.
    pub async fn signup(&self, input: SignupInput) -> Result<PublicUser> {
        let (Some(name), Some(email), Some(password)) = (
            present(&input.name),
            present(&input.email),
            non_empty(&input.password),
        ) else {
            return Err(DomainError::validation(
                "Name, email, and password are required",
            ));
        };

        if self.users.find_by_email(email).await?.is_some() {
            warn!(email, "signup rejected: email already registered");
            return Err(DomainError::Conflict("User already exists".into()));
        }

        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: self.hasher.hash(password).await?,
            admin_id: None,
        };
        self.users.insert(&user).await?;

        info!(user_id = %user.id, "user registered");
        Ok(user.to_public())
    }

    /// Verifies credentials and issues a bearer token.
    ///
    /// An unknown email and a wrong password produce the same error.
    pub async fn login(&self, input: LoginInput) -> Result<LoginOutcome> {
        let (Some(email), Some(password)) = (present(&input.email), non_empty(&input.password))
        else {
            return Err(DomainError::validation("Email and password are required"));
        };

        let Some(user) = self.users.find_by_email(email).await? else {
            warn!(email, "login rejected: unknown email");
            return Err(DomainError::Unauthorized(INVALID_CREDENTIALS.into()));
        };

        if !self.hasher.verify(password, &user.password_hash).await? {
            warn!(user_id = %user.id, "login rejected: password mismatch");
            return Err(DomainError::Unauthorized(INVALID_CREDENTIALS.into()));
        }

        let admin = self.users.find_admin(user.id).await?;
        let token = self.tokens.issue(user.id, admin.is_some())?;

        info!(user_id = %user.id, admin = admin.is_some(), "login succeeded");
        Ok(LoginOutcome {
            user: SessionUser {
                id: user.id,
                name: user.name,
                email: user.email,
                admin,
            },
            token,
        })
    }

    /// Promotes a user to admin. Promoting an admin again is a no-op.
    pub async fn grant_admin(&self, user_id: Uuid) -> Result<Admin> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(DomainError::not_found("User not found"));
        }
        let admin = self.users.upsert_admin(user_id, Uuid::new_v4()).await?;
        info!(%user_id, admin_id = %admin.id, "user promoted to admin");
        Ok(admin)
    }
}
