//! Route table

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::handlers::{auth, health, leases, properties, tenants, users};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Auth routes
        .route("/api/login", post(auth::login))
        .route("/api/reset-password", post(auth::request_password_reset))
        .route(
            "/api/reset-password/confirm",
            post(auth::confirm_password_reset),
        )
        // Tenants
        .route(
            "/api/tenants",
            get(tenants::list_tenants).post(tenants::create_tenant),
        )
        .route(
            "/api/tenants/{id}",
            get(tenants::get_tenant)
                .put(tenants::update_tenant)
                .delete(tenants::delete_tenant),
        )
        // Properties
        .route(
            "/api/properties",
            get(properties::list_properties).post(properties::create_property),
        )
        .route(
            "/api/properties/{id}",
            get(properties::get_property).put(properties::update_property),
        )
        // Leases
        .route(
            "/api/lease",
            get(leases::list_leases).post(leases::create_lease),
        )
        .route(
            "/api/lease/{id}",
            get(leases::get_lease)
                .put(leases::update_lease)
                .delete(leases::delete_lease),
        )
        // Users
        .route(
            "/api/users",
            get(users::list_users).post(users::create_user),
        )
        .route(
            "/api/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
