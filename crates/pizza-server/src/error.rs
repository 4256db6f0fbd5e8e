use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use pizza_catalog::CatalogError;
use pizza_types::ValidationError;
use serde_json::json;
use thiserror::Error;

/// Errors raised while configuring or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("store error: {0}")]
    Store(#[from] pizza_store::StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

pub(crate) const MISSING_FIELDS: &str = "Missing required fields";
pub(crate) const MALFORMED_BODY: &str = "Malformed request body";
pub(crate) const DUPLICATE_NAME: &str = "A pizza with this name already exists";
pub(crate) const NOT_FOUND: &str = "Pizza not found";
pub(crate) const INTERNAL: &str = "Internal server error";

/// A failed request, tagged with the operation that failed.
///
/// 400 and 500 bodies are `{"error": ...}`; 404 bodies are
/// `{"message": ...}`. Storage failures are logged with full detail and
/// answered with a generic message.
#[derive(Debug)]
pub struct ApiError {
    operation: &'static str,
    kind: ApiErrorKind,
}

#[derive(Debug)]
enum ApiErrorKind {
    Catalog(CatalogError),
    UnknownId(String),
}

impl ApiError {
    pub fn new(operation: &'static str, err: impl Into<CatalogError>) -> Self {
        Self {
            operation,
            kind: ApiErrorKind::Catalog(err.into()),
        }
    }

    /// A path id that cannot name any pizza.
    pub fn unknown_id(operation: &'static str, raw: impl Into<String>) -> Self {
        Self {
            operation,
            kind: ApiErrorKind::UnknownId(raw.into()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match &self.kind {
            ApiErrorKind::UnknownId(_) => StatusCode::NOT_FOUND,
            ApiErrorKind::Catalog(err) => match err {
                CatalogError::Validation(_) | CatalogError::Conflict { .. } => {
                    StatusCode::BAD_REQUEST
                }
                CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
                CatalogError::Storage(_) | CatalogError::IdSpaceExhausted(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self.kind {
            ApiErrorKind::UnknownId(raw) => {
                tracing::debug!(operation = self.operation, id = %raw, "unparseable pizza id");
                json!({ "message": NOT_FOUND })
            }
            ApiErrorKind::Catalog(CatalogError::NotFound(_)) => json!({ "message": NOT_FOUND }),
            ApiErrorKind::Catalog(CatalogError::Validation(ValidationError::Malformed(reason))) => {
                tracing::debug!(operation = self.operation, %reason, "malformed request body");
                json!({ "error": MALFORMED_BODY })
            }
            ApiErrorKind::Catalog(CatalogError::Validation(_)) => json!({ "error": MISSING_FIELDS }),
            ApiErrorKind::Catalog(CatalogError::Conflict { .. }) => json!({ "error": DUPLICATE_NAME }),
            ApiErrorKind::Catalog(err @ CatalogError::Storage(_)) => {
                tracing::error!(operation = self.operation, error = %err, "request failed on storage");
                json!({ "error": INTERNAL })
            }
            ApiErrorKind::Catalog(err @ CatalogError::IdSpaceExhausted(_)) => {
                tracing::error!(operation = self.operation, error = %err, "request failed");
                json!({ "error": INTERNAL })
            }
        };
        (status, Json(body)).into_response()
    }
}
