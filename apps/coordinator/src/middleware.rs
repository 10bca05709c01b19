// [apps/coordinator/src/middleware.rs]
/*!
 * =================================================================
 * APARATO: SIGNED REQUEST GUARD
 * CLASIFICACIÓN: APPLICATION ADAPTER (ESTRATO L4)
 * RESPONSABILIDAD: AUTENTICACIÓN DE TOKEN PORTADOR PARA EL GRUPO DE RUTAS FIRMADAS (spec.md §4.2/§6)
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ATOMIC INTEGRITY: grounded en el `auth_guard` del equipo — mismo
 *    patrón de extensión de `AuthContext`.
 * 2. HYGIENE TOTAL: un token inválido o revocado nunca alcanza el handler
 *    protegido.
 * =================================================================
 */

use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fednode_core_repository::{ComponentRepository, Database, TokenRepository};
use fednode_domain_models::Component;
use serde_json::json;
use tracing::warn;

use crate::state::AppState;

#[derive(Clone)]
pub struct AuthContext {
    pub component: Component,
}

fn unauthorized(reason: &str) -> Response {
    warn!(reason, "⚠️ [AUTH_REJECTED]: rejecting signed request");
    (StatusCode::FORBIDDEN, Json(json!({ "error": "access denied" }))).into_response()
}

pub async fn signed_request_guard(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let Some(token) = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
    else {
        return unauthorized("missing bearer token");
    };

    let Ok(mut transaction_handle) = state.db.begin().await else {
        return unauthorized("database unavailable");
    };

    let lookup = async {
        let stored = state.tokens.find_valid(&mut transaction_handle, &token).await?;
        let Some(stored) = stored else { return Ok(None) };
        if stored.is_expired(chrono::Utc::now()) {
            return Ok(None);
        }
        let component = state.components.find_by_id(&mut transaction_handle, stored.component_id).await?;
        Ok::<_, fednode_core_repository::RepoError>(Some(component))
    }
    .await;

    let _ = state.db.rollback(transaction_handle).await;

    match lookup {
        Ok(Some(component)) if component.active && !component.left => {
            req.extensions_mut().insert(AuthContext { component });
            next.run(req).await
        }
        Ok(_) => unauthorized("token invalid, expired, or component departed"),
        Err(_) => unauthorized("token lookup failed"),
    }
}
