use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Pages service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum PagesServiceError {
    #[error("page not found")]
    PageNotFound,
    #[error("slug already in use")]
    DuplicateSlug,
    #[error("missing data")]
    MissingData,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl PagesServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PageNotFound => "PAGE_NOT_FOUND",
            Self::DuplicateSlug => "DUPLICATE_SLUG",
            Self::MissingData => "MISSING_DATA",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for PagesServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::PageNotFound => StatusCode::NOT_FOUND,
            Self::DuplicateSlug => StatusCode::CONFLICT,
            Self::MissingData => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Only internal errors are logged here, with their anyhow chain; the
        // trace layer already records every request, and 4xx are routine.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
