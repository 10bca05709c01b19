// [libs/core/crypto/src/wire.rs]
/*!
 * =================================================================
 * APARATO: WIRE SEALING KERNEL
 * CLASIFICACIÓN: CORE LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: SELLADO DE LOS DOS FORMATOS DE RUTA (spec.md §4.2/§6)
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ATOMIC INTEGRITY: `SignedBody` firma siempre el texto cifrado, nunca
 *    el texto plano.
 * =================================================================
 */

use rsa::{RsaPrivateKey, RsaPublicKey};
use serde::{de::DeserializeOwned, Serialize};
use sha2::{Digest, Sha256};

use crate::envelope::{decrypt_bytes, encrypt_bytes, pack_envelope, unpack_envelope};
use crate::errors::Result;
use crate::signature::{sign_claim, verify_claim};

#[derive(Debug, Clone, Serialize, serde::Deserialize)]
pub struct EncodedBody {
    pub payload: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, serde::Deserialize)]
pub struct SignedBody {
    pub payload: Vec<u8>,
    pub signature: String,
}

fn payload_claim(payload: &[u8]) -> String {
    hex::encode(Sha256::digest(payload))
}

/// Serializes and hybrid-encrypts `value` for `recipient_public_key`.
pub fn seal<T: Serialize>(recipient_public_key: &RsaPublicKey, value: &T) -> Result<EncodedBody> {
    let plaintext = serde_json::to_vec(value)?;
    let (header, frame, checksum) = encrypt_bytes(recipient_public_key, &plaintext)?;
    Ok(EncodedBody {
        payload: pack_envelope(&header, checksum, &frame),
    })
}

/// Decrypts and deserializes an `EncodedBody` sealed with [`seal`].
pub fn open<T: DeserializeOwned>(private_key: &RsaPrivateKey, body: &EncodedBody) -> Result<T> {
    let (header, checksum, frame) = unpack_envelope(&body.payload)?;
    let plaintext = decrypt_bytes(private_key, &header, &frame, checksum)?;
    Ok(serde_json::from_slice(&plaintext)?)
}

/// Seals `value` the same way as [`seal`], then signs the ciphertext with
/// `sender_private_key` so the receiver can bind the call to a known
/// component (signed route framing).
pub fn seal_signed<T: Serialize>(
    recipient_public_key: &RsaPublicKey,
    sender_private_key: &RsaPrivateKey,
    value: &T,
) -> Result<SignedBody> {
    let encoded = seal(recipient_public_key, value)?;
    let signature = sign_claim(sender_private_key, &payload_claim(&encoded.payload))?;
    Ok(SignedBody {
        payload: encoded.payload,
        signature: hex::encode(signature),
    })
}

/// Verifies `body.signature` against `sender_public_key`, then opens the
/// payload as [`open`] would.
pub fn open_signed<T: DeserializeOwned>(
    private_key: &RsaPrivateKey,
    sender_public_key: &RsaPublicKey,
    body: &SignedBody,
) -> Result<T> {
    let signature = hex::decode(&body.signature)?;
    verify_claim(sender_public_key, &payload_claim(&body.payload), &signature)?;
    open(
        private_key,
        &EncodedBody {
            payload: body.payload.clone(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::KeyMaterial;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Ping {
        nonce: u32,
    }

    #[test]
    fn seal_then_open_round_trips_value() {
        let recipient = KeyMaterial::generate().unwrap();
        let body = seal(&recipient.public_key, &Ping { nonce: 7 }).unwrap();
        let value: Ping = open(&recipient.private_key, &body).unwrap();
        assert_eq!(value, Ping { nonce: 7 });
    }

    #[test]
    fn signed_round_trip_verifies_sender() {
        let recipient = KeyMaterial::generate().unwrap();
        let sender = KeyMaterial::generate().unwrap();

        let body = seal_signed(&recipient.public_key, &sender.private_key, &Ping { nonce: 3 }).unwrap();
        let value: Ping = open_signed(&recipient.private_key, &sender.public_key, &body).unwrap();
        assert_eq!(value, Ping { nonce: 3 });
    }

    #[test]
    fn tampered_payload_fails_signature_check() {
        let recipient = KeyMaterial::generate().unwrap();
        let sender = KeyMaterial::generate().unwrap();
        let impostor = KeyMaterial::generate().unwrap();

        let body = seal_signed(&recipient.public_key, &impostor.private_key, &Ping { nonce: 1 }).unwrap();
        let result: Result<Ping> = open_signed(&recipient.private_key, &sender.public_key, &body);
        assert!(result.is_err());
    }
}
