//! Tenant handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use haven_core::domain::{LeaseTerms, NewTenant};
use haven_core::policy::{Operation, ResourceKind};
use haven_core::services::UpdateTenant;

use crate::dto::TenantJson;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TenantListResponse {
    pub tenants: Vec<TenantJson>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct TenantRequest {
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub phone: String,
    #[serde(rename = "staffIDs", default)]
    pub staff_ids: Vec<i32>,
    #[serde(rename = "propertyID")]
    pub property_id: Option<i32>,
    #[serde(rename = "unitNum")]
    pub unit_num: Option<String>,
    pub occupants: Option<i32>,
    #[serde(rename = "dateTimeStart")]
    pub date_time_start: Option<DateTime<Utc>>,
    #[serde(rename = "dateTimeEnd")]
    pub date_time_end: Option<DateTime<Utc>>,
}

impl TenantRequest {
    /// Lease fields travel together or not at all.
    fn lease_terms(&self) -> Result<Option<LeaseTerms>, ApiError> {
        let Some(property_id) = self.property_id else {
            return Ok(None);
        };
        match (self.date_time_start, self.date_time_end) {
            (Some(start), Some(end)) => Ok(Some(LeaseTerms {
                property_id,
                unit_num: self.unit_num.clone(),
                occupants: self.occupants,
                date_time_start: start,
                date_time_end: end,
            })),
            _ => Err(ApiError::BadRequest(
                "dateTimeStart and dateTimeEnd are required with propertyID".to_string(),
            )),
        }
    }
}

/// GET /api/tenants
pub async fn list_tenants(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<TenantListResponse>, ApiError> {
    auth.require(Operation::Read, ResourceKind::Tenant)?;
    let tenants = state
        .tenancy
        .list_tenants()
        .await?
        .iter()
        .map(TenantJson::from_details)
        .collect();
    Ok(Json(TenantListResponse { tenants }))
}

/// GET /api/tenants/{id}
pub async fn get_tenant(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<TenantJson>, ApiError> {
    auth.require(Operation::Read, ResourceKind::Tenant)?;
    let details = state.tenancy.get_tenant(id).await?;
    Ok(Json(TenantJson::from_details(&details)))
}

/// POST /api/tenants
pub async fn create_tenant(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<TenantRequest>,
) -> Result<(StatusCode, Json<TenantJson>), ApiError> {
    auth.require(Operation::Create, ResourceKind::Tenant)?;

    let lease = payload.lease_terms()?;
    let details = state
        .tenancy
        .create_tenant(NewTenant {
            first_name: payload.first_name,
            last_name: payload.last_name,
            phone: payload.phone,
            staff_ids: payload.staff_ids,
            lease,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(TenantJson::from_details(&details))))
}

/// PUT /api/tenants/{id}
pub async fn update_tenant(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<TenantRequest>,
) -> Result<Json<TenantJson>, ApiError> {
    auth.require(Operation::Update, ResourceKind::Tenant)?;

    let details = state
        .tenancy
        .update_tenant(
            id,
            UpdateTenant {
                first_name: payload.first_name,
                last_name: payload.last_name,
                phone: payload.phone,
            },
            Some(payload.staff_ids),
        )
        .await?;

    Ok(Json(TenantJson::from_details(&details)))
}

/// DELETE /api/tenants/{id}. Archival toggle, not a hard delete.
pub async fn delete_tenant(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    auth.require(Operation::Archive, ResourceKind::Tenant)?;
    let (_, message) = state.tenancy.toggle_tenant_archived(id).await?;
    Ok(Json(MessageResponse { message }))
}
