use std::sync::Arc;

use axum::{
    Json, Router,
    routing::{get, patch},
};
use folio_contact::ContactService;
use folio_site::SiteCatalog;
use serde::Serialize;
use sqlx::SqlitePool;

mod contact;
mod health;
mod site;

#[derive(Clone)]
pub struct AppState {
    pub contact: ContactService,
    pub site: Arc<SiteCatalog>,
    pub pool: SqlitePool,
}

/// Envelope shared by every JSON endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

pub(crate) fn success<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: true,
        message: None,
        data: Some(data),
    })
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .route("/api/contact", get(contact::list).post(contact::submit))
        .route("/api/contact/stats", get(contact::stats))
        .route(
            "/api/contact/{id}",
            get(contact::get).delete(contact::delete),
        )
        .route("/api/contact/{id}/status", patch(contact::update_status))
        .route("/api/site", get(site::catalog))
        .route("/api/site/projects", get(site::projects))
        .route("/api/site/projects/{id}", get(site::project))
        .route("/api/site/categories", get(site::categories))
        .route("/api/site/search", get(site::search))
        .route("/api/site/{section}", get(site::section))
        .with_state(app_state)
}
