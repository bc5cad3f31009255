//! User handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use haven_core::domain::Role;
use haven_core::policy::{Operation, ResourceKind};
use haven_core::services::{CreateUserInput, UpdateUserInput};

use crate::dto::UserJson;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserJson>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub role: Option<i16>,
    pub name: Option<String>,
    #[serde(default)]
    pub recent: bool,
    #[serde(default)]
    pub unassigned: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub phone: String,
    pub role: Option<i16>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub email: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub phone: String,
    pub role: Option<i16>,
}

fn parse_role(value: Option<i16>) -> Result<Option<Role>, ApiError> {
    match value {
        None => Ok(None),
        Some(v) => Role::from_i16(v)
            .map(Some)
            .ok_or_else(|| ApiError::BadRequest(format!("Unknown role value: {}", v))),
    }
}

/// GET /api/users
///
/// `?unassigned=true` lists users without a role; `?role=` optionally
/// combined with `?name=` (substring) or `?recent=true` (three newest).
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<UserQuery>,
) -> Result<Json<UserListResponse>, ApiError> {
    auth.require(Operation::Read, ResourceKind::User)?;

    let users = if query.unassigned {
        state.identity.find_unassigned().await?
    } else if let Some(role) = parse_role(query.role)? {
        if let Some(name) = &query.name {
            state.identity.find_by_role_and_name(role, name).await?
        } else if query.recent {
            state.identity.find_recent_by_role(role).await?
        } else {
            state.identity.find_by_role(role).await?
        }
    } else {
        state.identity.list_users().await?
    };

    Ok(Json(UserListResponse {
        users: users.iter().map(UserJson::from_user).collect(),
    }))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<UserJson>, ApiError> {
    auth.require(Operation::Read, ResourceKind::User)?;
    let user = state.identity.get_user(id).await?;
    Ok(Json(UserJson::from_user(&user)))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserJson>), ApiError> {
    auth.require(Operation::Create, ResourceKind::User)?;

    let role = parse_role(payload.role)?;
    let user = state
        .identity
        .create_user(CreateUserInput {
            email: payload.email,
            password: payload.password,
            first_name: payload.first_name,
            last_name: payload.last_name,
            phone: payload.phone,
            role,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserJson::from_user(&user))))
}

/// PUT /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<UserJson>, ApiError> {
    auth.require(Operation::Update, ResourceKind::User)?;

    let role = parse_role(payload.role)?;
    let user = state
        .identity
        .update_user(
            id,
            UpdateUserInput {
                email: payload.email,
                first_name: payload.first_name,
                last_name: payload.last_name,
                phone: payload.phone,
                role,
            },
        )
        .await?;

    Ok(Json(UserJson::from_user(&user)))
}

/// DELETE /api/users/{id}. Archival toggle; users are never hard-deleted.
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    auth.require(Operation::Archive, ResourceKind::User)?;
    let (_, message) = state.identity.toggle_archived(id).await?;
    Ok(Json(MessageResponse { message }))
}
