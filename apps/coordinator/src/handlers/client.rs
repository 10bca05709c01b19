// [apps/coordinator/src/handlers/client.rs]
/*!
 * =================================================================
 * APARATO: CLIENT UPDATE HANDLER
 * CLASIFICACIÓN: APPLICATION ADAPTER (ESTRATO L4)
 * RESPONSABILIDAD: GET /client/update — RECLAMO DE ARRIENDOS Y DESPACHO DEL PRÓXIMO TRABAJO (spec.md §4.7)
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ATOMIC INTEGRITY: el reclamo y el despacho comparten una única
 *    transacción de solicitud.
 * =================================================================
 */

use axum::extract::{Extension, State};
use axum::Json;
use chrono::Utc;
use fednode_core_crypto::SignedBody;
use fednode_core_orchestration::CoreError;
use fednode_core_repository::Database;
use fednode_domain_models::{ClientUpdate, ComponentType};

use crate::errors::{ApiError, ApiResult};
use crate::middleware::AuthContext;
use crate::state::AppState;

/// Reclaims expired leases, dispatches the caller's next scheduled job if
/// any, and reports back what it should do.
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(body): Json<SignedBody>,
) -> ApiResult<Json<SignedBody>> {
    if auth.component.component_type != ComponentType::Client {
        return Err(ApiError::from(CoreError::AccessDenied));
    }

    let request: ClientUpdate = super::decode_signed(&state, &auth, &body)?;
    if request.component_id != auth.component.id {
        return Err(ApiError::from(CoreError::AccessDenied));
    }

    let mut transaction_handle = state.db.begin().await.map_err(CoreError::from)?;
    let scheduler = state.scheduler();
    let update_service = state.update_service(&scheduler);
    let action = update_service.next_action(&mut transaction_handle, auth.component.id, Utc::now()).await?;
    state.db.commit(transaction_handle).await.map_err(CoreError::from)?;

    Ok(Json(super::encode_signed(&state, &auth, &action)?))
}
