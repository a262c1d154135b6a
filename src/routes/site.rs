use axum::{
    extract::{Path, Query, State, rejection::QueryRejection},
    response::{IntoResponse, Response},
};
use folio_site::{ProjectFilter, ProjectParams, SearchQuery, Section};

use crate::{
    error::ApiError,
    routes::{AppState, success},
};

pub async fn catalog(State(app_state): State<AppState>) -> impl IntoResponse {
    success(app_state.site.as_ref()).into_response()
}

pub async fn section(
    State(app_state): State<AppState>,
    Path(section): Path<String>,
) -> Result<Response, ApiError> {
    let site = &app_state.site;

    let response = match Section::parse(&section)? {
        Section::Personal => success(&site.personal).into_response(),
        Section::Social => success(&site.social).into_response(),
        Section::Skills => success(&site.skills).into_response(),
        Section::Experience => success(&site.experience).into_response(),
        Section::Education => success(&site.education).into_response(),
        Section::Contact => success(&site.contact).into_response(),
        Section::Seo => success(&site.seo).into_response(),
    };

    Ok(response)
}

pub async fn projects(
    State(app_state): State<AppState>,
    params: Result<Query<ProjectParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let filter = ProjectFilter::try_from(params)?;

    Ok(success(app_state.site.projects(&filter)).into_response())
}

pub async fn project(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    Ok(success(app_state.site.project(&id)?).into_response())
}

pub async fn categories(State(app_state): State<AppState>) -> impl IntoResponse {
    success(app_state.site.categories()).into_response()
}

pub async fn search(
    State(app_state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    Ok(success(app_state.site.search(query)).into_response())
}
