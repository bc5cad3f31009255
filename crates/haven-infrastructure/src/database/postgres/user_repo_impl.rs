//! PostgreSQL user repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use haven_core::domain::{NewUser, Role, User};
use haven_core::error::DomainError;
use haven_core::repositories::UserRepository;

use super::{database_error, is_unique_violation};

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct UserRow {
    id: i32,
    email: String,
    role: Option<i16>,
    first_name: String,
    last_name: String,
    phone: String,
    hash_digest: String,
    archived: bool,
    last_active: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            phone: row.phone,
            role: row.role.and_then(Role::from_i16),
            hash_digest: row.hash_digest,
            archived: row.archived,
            last_active: row.last_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const USER_COLUMNS: &str = "id, email, role, first_name, last_name, phone, \
     hash_digest, archived, last_active, created_at, updated_at";

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("finding user by id", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users WHERE LOWER(email) = LOWER($1)",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("finding user by email", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let rows: Vec<UserRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users ORDER BY id",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("listing users", e))?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn find_by_role(&self, role: Role) -> Result<Vec<User>, DomainError> {
        let rows: Vec<UserRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users WHERE role = $1 ORDER BY id",
            USER_COLUMNS
        ))
        .bind(role.as_i16())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("finding users by role", e))?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn find_recent_by_role(&self, role: Role, limit: i64) -> Result<Vec<User>, DomainError> {
        let rows: Vec<UserRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users WHERE role = $1 ORDER BY created_at DESC LIMIT $2",
            USER_COLUMNS
        ))
        .bind(role.as_i16())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("finding recent users by role", e))?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn find_by_role_and_name(
        &self,
        role: Role,
        text: &str,
    ) -> Result<Vec<User>, DomainError> {
        let pattern = format!("%{}%", text);
        let rows: Vec<UserRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users \
             WHERE role = $1 AND (first_name ILIKE $2 OR last_name ILIKE $2) \
             ORDER BY id",
            USER_COLUMNS
        ))
        .bind(role.as_i16())
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("finding users by role and name", e))?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn find_unassigned(&self) -> Result<Vec<User>, DomainError> {
        let rows: Vec<UserRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users WHERE role IS NULL AND archived = FALSE ORDER BY id",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("finding unassigned users", e))?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        let row: UserRow = sqlx::query_as(&format!(
            "INSERT INTO users (email, role, first_name, last_name, phone, hash_digest) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&user.email)
        .bind(user.role.map(Role::as_i16))
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.phone)
        .bind(&user.hash_digest)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::EmailAlreadyExists(user.email.clone())
            } else {
                database_error("creating user", e)
            }
        })?;

        Ok(row.into())
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let row: UserRow = sqlx::query_as(&format!(
            "UPDATE users SET \
                email = $2, role = $3, first_name = $4, last_name = $5, \
                phone = $6, hash_digest = $7, archived = $8, updated_at = $9 \
             WHERE id = $1 \
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(user.id)
        .bind(&user.email)
        .bind(user.role.map(Role::as_i16))
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.phone)
        .bind(&user.hash_digest)
        .bind(user.archived)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::EmailAlreadyExists(user.email.clone())
            } else {
                database_error("updating user", e)
            }
        })?;

        Ok(row.into())
    }

    async fn touch_last_active(&self, id: i32, at: DateTime<Utc>) -> Result<(), DomainError> {
        sqlx::query("UPDATE users SET last_active = $2 WHERE id = $1")
            .bind(id)
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("touching last_active", e))?;
        Ok(())
    }
}
