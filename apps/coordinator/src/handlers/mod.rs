// [apps/coordinator/src/handlers/mod.rs]
/*!
 * =================================================================
 * APARATO: HANDLERS MODULE REGISTRY
 * CLASIFICACIÓN: APPLICATION ADAPTER (ESTRATO L4)
 * RESPONSABILIDAD: PUNTO DE ENTRADA DE TODO HANDLER HTTP DEL COORDINADOR
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: un módulo por superficie de componente
 *    (client/node/worker/workbench).
 * =================================================================
 */

pub mod client;
pub mod node;
pub mod worker;
pub mod workbench;

use fednode_core_crypto::{open_signed, public_key_from_pem, seal_signed, SignedBody};
use serde::{de::DeserializeOwned, Serialize};

use crate::errors::ApiResult;
use crate::middleware::AuthContext;
use crate::state::AppState;

/// Decrypts and verifies a `SignedBody` against the caller's stored
/// public key (spec.md §4.2: token lookup is the middleware's job, body
/// decryption and signature verification are the handler's).
pub(crate) fn decode_signed<T: DeserializeOwned>(
    state: &AppState,
    auth: &AuthContext,
    body: &SignedBody,
) -> ApiResult<T> {
    let sender_public_key = public_key_from_pem(&auth.component.public_key_pem)?;
    Ok(open_signed(&state.keys.private_key, &sender_public_key, body)?)
}

pub(crate) fn encode_signed<T: Serialize>(state: &AppState, auth: &AuthContext, value: &T) -> ApiResult<SignedBody> {
    let recipient_public_key = public_key_from_pem(&auth.component.public_key_pem)?;
    Ok(seal_signed(&recipient_public_key, &state.keys.private_key, value)?)
}
