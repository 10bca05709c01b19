// [libs/infra/client-transport/src/errors.rs]
/*!
 * =================================================================
 * APARATO: CLIENT TRANSPORT FAULT TAXONOMY
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: CLASIFICACIÓN EXHAUSTIVA DE FALLOS DE RED Y DE PROTOCOLO HACIA EL COORDINADOR
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: cada variante captura su causa raíz sin perder
 *    contexto (`#[from]`).
 * =================================================================
 */

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("failed to reach coordinator: {0}")]
    Network(#[from] reqwest::Error),

    #[error("coordinator rejected the request: HTTP {0}")]
    ServerRejection(u16),

    #[error("session not established: call join() first")]
    NotJoined,

    #[error("cryptographic operation failed: {0}")]
    Crypto(#[from] fednode_core_crypto::CryptoError),

    #[error("orchestration error: {0}")]
    Orchestration(#[from] fednode_core_orchestration::CoreError),

    #[error("malformed response body: {0}")]
    Decoding(#[from] serde_json::Error),

    #[error("malformed transfer-encoded key material: {0}")]
    KeyTransfer(#[from] base64::DecodeError),
}

pub type Result<T> = std::result::Result<T, ClientError>;
