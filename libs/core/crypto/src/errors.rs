// [libs/core/crypto/src/errors.rs]
/*!
 * =================================================================
 * APARATO: CRYPTO FAULT TAXONOMY
 * CLASIFICACIÓN: CORE LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: VOCABULARIO DE ERROR DEL SOBRE HÍBRIDO Y DE LA FIRMA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: un checksum corrupto jamás se confunde con una clave
 *    RSA inválida.
 * =================================================================
 */

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("key generation failed: {0}")]
    KeyGeneration(String),
    #[error("failed to read key material at {path}: {source}")]
    KeyIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed PEM key material: {0}")]
    Pem(String),
    #[error("base64 transfer decoding failed: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("RSA operation failed: {0}")]
    Rsa(#[from] rsa::Error),
    #[error("symmetric encryption failed")]
    SymmetricEncryption,
    #[error("symmetric decryption failed: integrity check did not pass")]
    SymmetricDecryption,
    #[error("checksum mismatch: plaintext was tampered with or truncated")]
    ChecksumMismatch,
    #[error("signature did not verify")]
    SignatureInvalid,
    #[error("envelope stream used out of order: {0}")]
    StreamState(&'static str),
    #[error("wire payload serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("malformed signature encoding: {0}")]
    SignatureEncoding(#[from] hex::FromHexError),
}

pub type Result<T> = std::result::Result<T, CryptoError>;
