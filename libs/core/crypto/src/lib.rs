// [libs/core/crypto/src/lib.rs]
/*!
 * =================================================================
 * APARATO: CRYPTO MODULE REGISTRY
 * CLASIFICACIÓN: CORE LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: PUNTO DE ENTRADA PÚBLICO DEL SOBRE HÍBRIDO Y LA FIRMA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: sólo los tipos que los binarios necesitan cruzan esta
 *    frontera.
 * =================================================================
 */

pub mod envelope;
pub mod errors;
pub mod keys;
pub mod signature;
pub mod transfer;
pub mod wire;

pub use envelope::{
    decrypt_bytes, encrypt_bytes, pack_envelope, unpack_envelope, Checksum, Decryptor, Encryptor,
    EnvelopeHeader,
};
pub use errors::{CryptoError, Result};
pub use keys::{public_key_from_pem, KeyMaterial};
pub use signature::{sign_claim, verify_claim};
pub use transfer::{decode_pem_from_transfer, encode_pem_for_transfer};
pub use wire::{open, open_signed, seal, seal_signed, EncodedBody, SignedBody};
