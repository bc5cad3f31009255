//! Lease handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use haven_core::domain::NewLease;
use haven_core::policy::{Operation, ResourceKind};
use haven_core::services::LeaseChanges;

use crate::dto::LeaseJson;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct LeaseListResponse {
    pub leases: Vec<LeaseJson>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateLeaseRequest {
    pub name: Option<String>,
    #[serde(rename = "propertyID")]
    pub property_id: i32,
    #[serde(rename = "tenantID")]
    pub tenant_id: i32,
    #[serde(rename = "unitNum")]
    pub unit_num: Option<String>,
    pub occupants: Option<i32>,
    #[serde(rename = "dateTimeStart")]
    pub date_time_start: DateTime<Utc>,
    #[serde(rename = "dateTimeEnd")]
    pub date_time_end: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateLeaseRequest {
    pub name: Option<String>,
    #[serde(rename = "propertyID")]
    pub property_id: Option<i32>,
    #[serde(rename = "tenantID")]
    pub tenant_id: Option<i32>,
    #[serde(rename = "unitNum")]
    pub unit_num: Option<String>,
    pub occupants: Option<i32>,
    #[serde(rename = "dateTimeStart")]
    pub date_time_start: Option<DateTime<Utc>>,
    #[serde(rename = "dateTimeEnd")]
    pub date_time_end: Option<DateTime<Utc>>,
}

/// GET /api/lease
pub async fn list_leases(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<LeaseListResponse>, ApiError> {
    auth.require(Operation::Read, ResourceKind::Lease)?;
    let leases = state
        .tenancy
        .list_leases()
        .await?
        .iter()
        .map(LeaseJson::from_details)
        .collect();
    Ok(Json(LeaseListResponse { leases }))
}

/// GET /api/lease/{id}
pub async fn get_lease(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<LeaseJson>, ApiError> {
    auth.require(Operation::Read, ResourceKind::Lease)?;
    let details = state.tenancy.get_lease(id).await?;
    Ok(Json(LeaseJson::from_details(&details)))
}

/// POST /api/lease
pub async fn create_lease(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateLeaseRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    auth.require(Operation::Create, ResourceKind::Lease)?;

    state
        .tenancy
        .create_lease(NewLease {
            name: payload.name,
            property_id: payload.property_id,
            tenant_id: payload.tenant_id,
            unit_num: payload.unit_num,
            occupants: payload.occupants,
            date_time_start: payload.date_time_start,
            date_time_end: payload.date_time_end,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Lease created successfully".to_string(),
        }),
    ))
}

/// PUT /api/lease/{id}
pub async fn update_lease(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateLeaseRequest>,
) -> Result<Json<LeaseJson>, ApiError> {
    auth.require(Operation::Update, ResourceKind::Lease)?;

    let details = state
        .tenancy
        .update_lease(
            id,
            LeaseChanges {
                name: payload.name,
                property_id: payload.property_id,
                tenant_id: payload.tenant_id,
                unit_num: payload.unit_num,
                occupants: payload.occupants,
                date_time_start: payload.date_time_start,
                date_time_end: payload.date_time_end,
            },
        )
        .await?;

    Ok(Json(LeaseJson::from_details(&details)))
}

/// DELETE /api/lease/{id}. Leases are history, but deletable.
pub async fn delete_lease(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    auth.require(Operation::Delete, ResourceKind::Lease)?;
    state.tenancy.delete_lease(id).await?;
    Ok(Json(MessageResponse {
        message: "Lease deleted".to_string(),
    }))
}
