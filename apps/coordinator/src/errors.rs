// [apps/coordinator/src/errors.rs]
/*!
 * =================================================================
 * APARATO: API FAULT TRANSLATION
 * CLASIFICACIÓN: APPLICATION ADAPTER (ESTRATO L4)
 * RESPONSABILIDAD: TRADUCCIÓN DE CoreError HACIA RESPUESTAS HTTP
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: grounded en los `IntoResponse` de
 *    `DbError`/`ClientError` del propio linaje del equipo.
 * =================================================================
 */

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fednode_core_orchestration::CoreError;
use serde_json::json;

pub struct ApiError(CoreError);

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self(err)
    }
}

impl From<fednode_core_crypto::CryptoError> for ApiError {
    fn from(err: fednode_core_crypto::CryptoError) -> Self {
        tracing::warn!(error = %err, "⚠️ [REQUEST_REJECTED]: rejecting request: envelope/signature failure");
        Self(CoreError::AccessDenied)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self(CoreError::InvalidArtifact(err.to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            CoreError::AccessDenied => (StatusCode::FORBIDDEN, self.0.to_string()),
            CoreError::InvalidArtifact(_) => (StatusCode::BAD_REQUEST, self.0.to_string()),
            CoreError::NotFound => (StatusCode::NOT_FOUND, self.0.to_string()),
            CoreError::Conflict(_) => (StatusCode::CONFLICT, self.0.to_string()),
            CoreError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string()),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
