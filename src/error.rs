use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Contact(#[from] folio_contact::Error),

    #[error(transparent)]
    Site(#[from] folio_site::Error),

    #[error("{0}")]
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        use folio_contact::Error as ContactError;
        use folio_site::Error as SiteError;

        let (status_code, message) = match self {
            ApiError::Contact(ContactError::Validation(errors)) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "success": false, "errors": errors })),
                )
                    .into_response();
            }
            ApiError::Contact(ContactError::NotFound) => {
                (StatusCode::NOT_FOUND, "Contact not found".to_string())
            }
            ApiError::Contact(ContactError::InvalidArgument(msg)) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Contact(ContactError::Store(e)) => {
                tracing::error!(error = ?e, "Contact store error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong. Please try again later.".to_string(),
                )
            }
            ApiError::Site(SiteError::ProjectNotFound) => {
                (StatusCode::NOT_FOUND, "Project not found".to_string())
            }
            ApiError::Site(SiteError::UnknownSection(section)) => (
                StatusCode::NOT_FOUND,
                format!("Unknown site section: {section}"),
            ),
            ApiError::Site(SiteError::InvalidArgument(msg)) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Site(e @ (SiteError::Read { .. } | SiteError::Parse(_))) => {
                tracing::error!(error = %e, "Site content error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to fetch site configuration".to_string(),
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        (
            status_code,
            Json(json!({ "success": false, "message": message })),
        )
            .into_response()
    }
}
