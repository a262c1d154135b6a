use std::{convert::Infallible, net::SocketAddr};

use axum::{
    Json,
    extract::{
        ConnectInfo, FromRequestParts, Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header::USER_AGENT, request::Parts},
    response::IntoResponse,
};
use folio_contact::{ClientInfo, ContactForm, ListParams, ListQuery};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    error::ApiError,
    routes::{ApiResponse, AppState, success},
};

/// Request metadata of the caller: first `X-Forwarded-For` hop, else the
/// socket peer, plus the `User-Agent` header.
pub struct ClientContext(pub ClientInfo);

impl<S: Send + Sync> FromRequestParts<S> for ClientContext {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let forwarded = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty());

        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());

        let user_agent = parts
            .headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        Ok(Self(ClientInfo::new(forwarded.or(peer), user_agent)))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedData {
    pub id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub submitted_at: OffsetDateTime,
}

pub async fn submit(
    State(app_state): State<AppState>,
    ClientContext(client): ClientContext,
    input: Result<Json<ContactForm>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(form) = input.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let receipt = app_state.contact.submit(form, client).await?;

    tracing::debug!(
        id = %receipt.id,
        owner_notification = ?receipt.owner_notification,
        auto_reply = ?receipt.auto_reply,
        "Contact submission completed"
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            success: true,
            message: Some("Thank you for your message! I'll get back to you soon."),
            data: Some(SubmittedData {
                id: receipt.id,
                submitted_at: receipt.submitted_at,
            }),
        }),
    ))
}

pub async fn stats(State(app_state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(success(app_state.contact.stats().await?))
}

pub async fn list(
    State(app_state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let query = ListQuery::try_from(params)?;

    let now = OffsetDateTime::now_utc();
    let page = app_state.contact.list(&query).await?;

    Ok(success(page.map(|contact| contact.into_view(now))))
}

pub async fn get(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let contact = app_state.contact.get(&id).await?;

    Ok(success(contact.into_view(OffsetDateTime::now_utc())))
}

#[derive(Deserialize)]
pub struct StatusInput {
    #[serde(default)]
    pub status: String,
}

pub async fn update_status(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    input: Result<Json<StatusInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = input.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let contact = app_state.contact.update_status(&id, &input.status).await?;

    Ok(success(contact.into_view(OffsetDateTime::now_utc())))
}

pub async fn delete(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    app_state.contact.delete(&id).await?;

    Ok(Json(ApiResponse::<()> {
        success: true,
        message: Some("Contact deleted successfully"),
        data: None,
    }))
}
