//! Property handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use haven_core::domain::NewProperty;
use haven_core::policy::{Operation, ResourceKind};
use haven_core::services::PropertyChanges;

use crate::dto::PropertyJson;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PropertyListResponse {
    pub properties: Vec<PropertyJson>,
}

#[derive(Debug, Deserialize)]
pub struct PropertyRequest {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
}

/// GET /api/properties
pub async fn list_properties(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<PropertyListResponse>, ApiError> {
    auth.require(Operation::Read, ResourceKind::Property)?;
    let properties = state
        .tenancy
        .list_properties()
        .await?
        .iter()
        .map(PropertyJson::from_details)
        .collect();
    Ok(Json(PropertyListResponse { properties }))
}

/// GET /api/properties/{id}
pub async fn get_property(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<PropertyJson>, ApiError> {
    auth.require(Operation::Read, ResourceKind::Property)?;
    let details = state.tenancy.property_details(id, Utc::now()).await?;
    Ok(Json(PropertyJson::from_details(&details)))
}

/// POST /api/properties
pub async fn create_property(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<PropertyRequest>,
) -> Result<(StatusCode, Json<PropertyJson>), ApiError> {
    auth.require(Operation::Create, ResourceKind::Property)?;

    let property = state
        .tenancy
        .create_property(NewProperty {
            name: payload.name,
            address: payload.address,
            city: payload.city,
            state: payload.state,
            zipcode: payload.zipcode,
        })
        .await?;
    let details = state
        .tenancy
        .property_details(property.id, Utc::now())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PropertyJson::from_details(&details)),
    ))
}

/// PUT /api/properties/{id}
pub async fn update_property(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<PropertyRequest>,
) -> Result<Json<PropertyJson>, ApiError> {
    auth.require(Operation::Update, ResourceKind::Property)?;

    let property = state
        .tenancy
        .update_property(
            id,
            PropertyChanges {
                name: payload.name,
                address: payload.address,
                city: payload.city,
                state: payload.state,
                zipcode: payload.zipcode,
            },
        )
        .await?;
    let details = state
        .tenancy
        .property_details(property.id, Utc::now())
        .await?;

    Ok(Json(PropertyJson::from_details(&details)))
}
