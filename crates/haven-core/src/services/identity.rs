//! Identity and credential service
//!
//! User creation hashes the plaintext immediately; the plaintext is a
//! parameter, never a field on anything that persists.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use validator::Validate;

use haven_security::{PasswordService, TokenService};
use haven_shared::constants::{MIN_PASSWORD_LENGTH, RECENT_USERS_LIMIT};

use crate::domain::{archive, NewUser, Role, User};
use crate::error::DomainError;
use crate::repositories::UserRepository;

#[derive(Debug, Validate)]
pub struct CreateUserInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    pub phone: String,
    pub role: Option<Role>,
}

#[derive(Debug, Validate)]
pub struct UpdateUserInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    pub phone: String,
    pub role: Option<Role>,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct AuthSuccess {
    pub user: User,
    pub access_token: String,
}

pub struct IdentityService {
    users: Arc<dyn UserRepository>,
    passwords: PasswordService,
    tokens: Arc<TokenService>,
}

impl IdentityService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: PasswordService,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    pub async fn create_user(&self, input: CreateUserInput) -> Result<User, DomainError> {
        input
            .validate()
            .map_err(|e| DomainError::Validation(e.to_string()))?;

        if self.users.find_by_email(&input.email).await?.is_some() {
            warn!("User creation failed: email already exists");
            return Err(DomainError::EmailAlreadyExists(input.email));
        }

        let hash_digest = self.passwords.hash(&input.password)?;
        let new_user = NewUser {
            email: input.email,
            hash_digest,
            first_name: input.first_name,
            last_name: input.last_name,
            phone: input.phone,
            role: input.role,
        };
        let user = self.users.create(&new_user).await?;
        info!(user_id = user.id, "User created");
        Ok(user)
    }

    /// Verifies credentials and issues an access token. Archived users
    /// cannot log in.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<AuthSuccess, DomainError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(DomainError::InvalidCredentials)?;

        if user.archived || !self.check_password(&user, password) {
            warn!(user_id = user.id, "Login failed");
            return Err(DomainError::InvalidCredentials);
        }

        let access_token = self
            .tokens
            .generate_access_token(user.id)
            .map_err(|e| DomainError::Token(e.to_string()))?;

        self.users.touch_last_active(user.id, Utc::now()).await?;

        info!(user_id = user.id, "Login successful");
        Ok(AuthSuccess { user, access_token })
    }

    pub fn check_password(&self, user: &User, plaintext: &str) -> bool {
        self.passwords.verify(plaintext, &user.hash_digest)
    }

    pub fn issue_reset_token(&self, user: &User) -> Result<String, DomainError> {
        Ok(self.tokens.generate_reset_token(user.id)?)
    }

    /// Resolves a reset token to its user. Expiry and an unknown user are
    /// both `Ok(None)`; only a malformed token is an error.
    pub async fn validate_reset_token(&self, token: &str) -> Result<Option<User>, DomainError> {
        let Some(claims) = self.tokens.validate_reset_token(token)? else {
            return Ok(None);
        };
        let Some(user_id) = claims.user_id() else {
            return Ok(None);
        };
        self.users.find_by_id(user_id).await
    }

    /// Issues a reset token when the email is known. The HTTP surface
    /// answers identically either way so account existence never leaks.
    pub async fn request_password_reset(&self, email: &str) -> Result<Option<String>, DomainError> {
        match self.users.find_by_email(email).await? {
            Some(user) => {
                info!(user_id = user.id, "Password reset requested");
                Ok(Some(self.issue_reset_token(&user)?))
            }
            None => {
                warn!("Password reset requested for unknown email");
                Ok(None)
            }
        }
    }

    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<User, DomainError> {
        let user = match self.validate_reset_token(token).await {
            Ok(Some(user)) => user,
            Ok(None) | Err(DomainError::Token(_)) => return Err(DomainError::InvalidResetToken),
            Err(e) => return Err(e),
        };
        if new_password.len() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::Validation("password too short".into()));
        }
        let mut user = user;
        user.hash_digest = self.passwords.hash(new_password)?;
        user.updated_at = Utc::now();
        let user = self.users.update(&user).await?;
        info!(user_id = user.id, "Password reset completed");
        Ok(user)
    }

    pub async fn get_user(&self, id: i32) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(DomainError::UserNotFound)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        self.users.find_all().await
    }

    pub async fn find_by_role(&self, role: Role) -> Result<Vec<User>, DomainError> {
        self.users.find_by_role(role).await
    }

    pub async fn find_recent_by_role(&self, role: Role) -> Result<Vec<User>, DomainError> {
        self.users.find_recent_by_role(role, RECENT_USERS_LIMIT).await
    }

    pub async fn find_by_role_and_name(
        &self,
        role: Role,
        text: &str,
    ) -> Result<Vec<User>, DomainError> {
        self.users.find_by_role_and_name(role, text).await
    }

    pub async fn find_unassigned(&self) -> Result<Vec<User>, DomainError> {
        self.users.find_unassigned().await
    }

    pub async fn update_user(&self, id: i32, input: UpdateUserInput) -> Result<User, DomainError> {
        input
            .validate()
            .map_err(|e| DomainError::Validation(e.to_string()))?;

        let mut user = self.get_user(id).await?;

        if !user.email.eq_ignore_ascii_case(&input.email)
            && self.users.find_by_email(&input.email).await?.is_some()
        {
            return Err(DomainError::EmailAlreadyExists(input.email));
        }

        user.email = input.email;
        user.first_name = input.first_name;
        user.last_name = input.last_name;
        user.phone = input.phone;
        user.role = input.role;
        user.updated_at = Utc::now();
        self.users.update(&user).await
    }

    /// Archival toggle; users are never physically deleted.
    pub async fn toggle_archived(&self, id: i32) -> Result<(User, String), DomainError> {
        let mut user = self.get_user(id).await?;
        let toggle = archive::toggle_archived("User", user.archived);
        user.archived = toggle.archived;
        user.updated_at = Utc::now();
        let user = self.users.update(&user).await?;
        info!(user_id = user.id, archived = user.archived, "User archival toggled");
        Ok((user, toggle.message))
    }

    pub async fn touch_last_active(&self, user_id: i32) -> Result<(), DomainError> {
        self.users.touch_last_active(user_id, Utc::now()).await
    }
}
