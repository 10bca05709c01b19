// [apps/coordinator/src/handlers/node.rs]
/*!
 * =================================================================
 * APARATO: NODE INGRESS HANDLERS
 * CLASIFICACIÓN: APPLICATION ADAPTER (ESTRATO L4)
 * RESPONSABILIDAD: /node/key, /node/join, /node/leave, /node/metadata (spec.md §4.2/§6)
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ATOMIC INTEGRITY: `/node/join` y `/node/key` son las únicas rutas
 *    sin guardia de firma.
 * =================================================================
 */

use axum::extract::{Extension, State};
use axum::Json;
use chrono::Utc;
use fednode_core_crypto::{encode_pem_for_transfer, open, public_key_from_pem, seal, EncodedBody};
use fednode_core_orchestration::{new_token, verify_join_signature, verify_leave_signature, CoreError};
use fednode_core_repository::{ComponentRepository, Database, KeyValueStore, TokenRepository};
use fednode_domain_models::{
    Component, ComponentType, JoinData, Metadata, NetworkCoordinates, NodeJoinRequest,
    NodeLeaveRequest, ServerPublicKey,
};
use fednode_core_crypto::SignedBody;

use crate::errors::{ApiError, ApiResult};
use crate::middleware::AuthContext;
use crate::state::AppState;

pub async fn get_server_public_key(State(state): State<AppState>) -> ApiResult<Json<ServerPublicKey>> {
    let pem = state.keys.public_key_pem()?;
    Ok(Json(ServerPublicKey {
        public_key_pem: encode_pem_for_transfer(&pem),
    }))
}

/// `POST /node/join` (unauthenticated, Encoded framing). Verifies the
/// join signature/checksum, registers the component, issues its first
/// token, and returns `JoinData` hybrid-encrypted for the caller.
pub async fn join(State(state): State<AppState>, Json(body): Json<EncodedBody>) -> ApiResult<Json<EncodedBody>> {
    let request: NodeJoinRequest = open(&state.keys.private_key, &body)?;
    verify_join_signature(&request)?;

    let mut transaction_handle = state.db.begin().await.map_err(CoreError::from)?;

    if request.component_type == ComponentType::Client {
        if let (Some(mac), Some(node)) = (&request.mac_address, &request.machine_node) {
            let existing = state
                .components
                .find_by_machine(&mut transaction_handle, mac, node)
                .await
                .map_err(CoreError::from)?;
            if existing.is_some() {
                state.db.rollback(transaction_handle).await.ok();
                return Err(ApiError::from(CoreError::Conflict(
                    "this machine already holds a component identity".into(),
                )));
            }
        }
    }

    let component = Component {
        id: request.id,
        component_type: request.component_type,
        public_key_pem: request.public_key_pem.clone(),
        network: NetworkCoordinates { ip_address: "0.0.0.0".into(), port: None },
        mac_address: request.mac_address.clone(),
        machine_node: request.machine_node.clone(),
        active: true,
        left: false,
        created_at: Utc::now(),
    };
    state.components.create(&mut transaction_handle, &component).await.map_err(CoreError::from)?;

    let token = new_token(
        request.id,
        &request.system,
        request.mac_address.as_deref(),
        request.machine_node.as_deref(),
        Utc::now(),
        state.config.token_ttl(),
    );
    state.tokens.issue(&mut transaction_handle, &token).await.map_err(CoreError::from)?;

    state.db.commit(transaction_handle).await.map_err(CoreError::from)?;

    let joining_public_key = public_key_from_pem(&request.public_key_pem)?;
    let server_public_key_pem = state.keys.public_key_pem()?;
    let join_data = JoinData {
        id: request.id,
        token: token.token,
        server_public_key_pem,
    };
    Ok(Json(seal(&joining_public_key, &join_data)?))
}

pub async fn leave(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(body): Json<SignedBody>,
) -> ApiResult<Json<SignedBody>> {
    if !matches!(auth.component.component_type, ComponentType::Client | ComponentType::Node) {
        return Err(ApiError::from(CoreError::AccessDenied));
    }

    let request: NodeLeaveRequest = super::decode_signed(&state, &auth, &body)?;
    verify_leave_signature(&auth.component, request.id, &request.signature)?;

    let mut transaction_handle = state.db.begin().await.map_err(CoreError::from)?;
    state.components.mark_left(&mut transaction_handle, auth.component.id).await.map_err(CoreError::from)?;
    state
        .tokens
        .invalidate_all_for_component(&mut transaction_handle, auth.component.id)
        .await
        .map_err(CoreError::from)?;
    state.db.commit(transaction_handle).await.map_err(CoreError::from)?;

    Ok(Json(super::encode_signed(&state, &auth, &())?))
}

pub async fn push_metadata(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(body): Json<SignedBody>,
) -> ApiResult<Json<SignedBody>> {
    if auth.component.component_type != ComponentType::Client {
        return Err(ApiError::from(CoreError::AccessDenied));
    }

    let metadata: Metadata = super::decode_signed(&state, &auth, &body)?;
    let key = format!("metadata:{}", auth.component.id);
    let raw = serde_json::to_string(&metadata)?;

    let mut transaction_handle = state.db.begin().await.map_err(CoreError::from)?;
    state.kv.set(&mut transaction_handle, &key, &raw).await.map_err(CoreError::from)?;
    state.db.commit(transaction_handle).await.map_err(CoreError::from)?;

    Ok(Json(super::encode_signed(&state, &auth, &metadata)?))
}
