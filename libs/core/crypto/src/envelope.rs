// [libs/core/crypto/src/envelope.rs]
/*!
 * =================================================================
 * APARATO: HYBRID ENVELOPE ENGINE
 * CLASIFICACIÓN: CORE LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: CIFRADO HÍBRIDO RSA-OAEP + AES-256-GCM EN STREAMING (spec.md §4.1)
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ATOMIC INTEGRITY: el checksum SHA-256 corre sobre el texto plano
 *    completo antes de liberar el marco cifrado.
 * 2. HYGIENE TOTAL: `Encryptor`/`Decryptor` jamás materializan el payload
 *    completo en memoria.
 *
 * # Mathematical Proof:
 * Un `unpack_envelope` que retorna Ok garantiza que el encabezado, el checksum
 * y el marco cifrado fueron consumidos en el orden exacto en que `pack_envelope`
 * los escribió.
 * =================================================================
 */

use aes_gcm::aead::stream::{DecryptorBE32, EncryptorBE32};
use aes_gcm::{Aes256Gcm, Key, KeyInit};
use rand::RngCore;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};

use crate::errors::{CryptoError, Result};

const SYMMETRIC_KEY_LEN: usize = 32;
const NONCE_PREFIX_LEN: usize = 7;

/// Sent ahead of the ciphertext body.
pub struct EnvelopeHeader {
    pub wrapped_key: Vec<u8>,
    pub nonce_prefix: [u8; NONCE_PREFIX_LEN],
}

/// Sent after the final ciphertext frame.
pub type Checksum = [u8; 32];

pub struct Encryptor {
    stream: EncryptorBE32<Aes256Gcm>,
    hasher: Sha256,
    pending: Option<Vec<u8>>,
}

impl Encryptor {
    pub fn start(recipient_public_key: &RsaPublicKey) -> Result<(Self, EnvelopeHeader)> {
        let mut rng = rand::rngs::OsRng;

        let mut key_bytes = [0u8; SYMMETRIC_KEY_LEN];
        rng.fill_bytes(&mut key_bytes);
        let mut nonce_prefix = [0u8; NONCE_PREFIX_LEN];
        rng.fill_bytes(&mut nonce_prefix);

        let wrapped_key =
            recipient_public_key.encrypt(&mut rng, Oaep::new::<Sha256>(), &key_bytes)?;

        let key = Key::<Aes256Gcm>::from_slice(&key_bytes);
        let stream = EncryptorBE32::from_aead(Aes256Gcm::new(key), &nonce_prefix.into());

        Ok((
            Self {
                stream,
                hasher: Sha256::new(),
                pending: None,
            },
            EnvelopeHeader {
                wrapped_key,
                nonce_prefix,
            },
        ))
    }

    /// Feeds one chunk of plaintext. Returns a ciphertext frame for the
    /// *previous* chunk once it is confirmed not to be the final one.
    pub fn update(&mut self, chunk: &[u8]) -> Result<Option<Vec<u8>>> {
        self.hasher.update(chunk);
        match self.pending.replace(chunk.to_vec()) {
            None => Ok(None),
            Some(previous) => {
                let frame = self
                    .stream
                    .encrypt_next(previous.as_slice())
                    .map_err(|_| CryptoError::SymmetricEncryption)?;
                Ok(Some(frame))
            }
        }
    }

    /// Emits the final ciphertext frame and the plaintext checksum.
    pub fn end(mut self) -> Result<(Vec<u8>, Checksum)> {
        let last = self.pending.take().unwrap_or_default();
        let frame = self
            .stream
            .encrypt_last(last.as_slice())
            .map_err(|_| CryptoError::SymmetricEncryption)?;
        Ok((frame, self.hasher.finalize().into()))
    }
}

pub struct Decryptor {
    stream: DecryptorBE32<Aes256Gcm>,
    hasher: Sha256,
    pending: Option<Vec<u8>>,
}

impl Decryptor {
    pub fn start(private_key: &RsaPrivateKey, header: &EnvelopeHeader) -> Result<Self> {
        let key_bytes = private_key.decrypt(Oaep::new::<Sha256>(), &header.wrapped_key)?;
        if key_bytes.len() != SYMMETRIC_KEY_LEN {
            return Err(CryptoError::SymmetricDecryption);
        }
        let key = Key::<Aes256Gcm>::from_slice(&key_bytes);
        let stream = DecryptorBE32::from_aead(Aes256Gcm::new(key), &header.nonce_prefix.into());
        Ok(Self {
            stream,
            hasher: Sha256::new(),
            pending: None,
        })
    }

    /// Feeds one ciphertext frame. Returns the plaintext chunk for the
    /// *previous* frame once a later frame confirms it wasn't the last.
    pub fn update(&mut self, frame: &[u8]) -> Result<Option<Vec<u8>>> {
        match self.pending.replace(frame.to_vec()) {
            None => Ok(None),
            Some(previous) => {
                let plaintext = self
                    .stream
                    .decrypt_next(previous.as_slice())
                    .map_err(|_| CryptoError::SymmetricDecryption)?;
                self.hasher.update(&plaintext);
                Ok(Some(plaintext))
            }
        }
    }

    /// Decrypts the final frame and verifies the plaintext checksum.
    pub fn end(mut self, expected_checksum: Checksum) -> Result<Vec<u8>> {
        let last = self.pending.take().unwrap_or_default();
        let plaintext = self
            .stream
            .decrypt_last(last.as_slice())
            .map_err(|_| CryptoError::SymmetricDecryption)?;
        self.hasher.update(&plaintext);
        let checksum: Checksum = self.hasher.finalize().into();
        if checksum != expected_checksum {
            return Err(CryptoError::ChecksumMismatch);
        }
        Ok(plaintext)
    }
}

/// Convenience wrapper for payloads small enough to hold in memory.
pub fn encrypt_bytes(recipient_public_key: &RsaPublicKey, plaintext: &[u8]) -> Result<(EnvelopeHeader, Vec<u8>, Checksum)> {
    let (mut encryptor, header) = Encryptor::start(recipient_public_key)?;
    encryptor.update(plaintext)?;
    let (frame, checksum) = encryptor.end()?;
    Ok((header, frame, checksum))
}

pub fn decrypt_bytes(
    private_key: &RsaPrivateKey,
    header: &EnvelopeHeader,
    frame: &[u8],
    checksum: Checksum,
) -> Result<Vec<u8>> {
    let mut decryptor = Decryptor::start(private_key, header)?;
    decryptor.update(frame)?;
    decryptor.end(checksum)
}

/// Flattens a header + checksum + ciphertext frame into the single
/// byte string carried over the wire: `len(wrapped_key) [8 BE] ||
/// wrapped_key || nonce_prefix [7] || checksum [32] || frame`.
pub fn pack_envelope(header: &EnvelopeHeader, checksum: Checksum, frame: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(8 + header.wrapped_key.len() + NONCE_PREFIX_LEN + 32 + frame.len());
    out.extend((header.wrapped_key.len() as u64).to_be_bytes());
    out.extend(&header.wrapped_key);
    out.extend(header.nonce_prefix);
    out.extend(checksum);
    out.extend(frame);
    out
}

/// Inverse of [`pack_envelope`].
pub fn unpack_envelope(bytes: &[u8]) -> Result<(EnvelopeHeader, Checksum, Vec<u8>)> {
    if bytes.len() < 8 {
        return Err(CryptoError::StreamState("envelope too short for length prefix"));
    }
    let (len_bytes, rest) = bytes.split_at(8);
    let wrapped_key_len = u64::from_be_bytes(len_bytes.try_into().unwrap()) as usize;

    if rest.len() < wrapped_key_len + NONCE_PREFIX_LEN + 32 {
        return Err(CryptoError::StreamState("envelope too short for its header"));
    }
    let (wrapped_key, rest) = rest.split_at(wrapped_key_len);
    let (nonce_prefix, rest) = rest.split_at(NONCE_PREFIX_LEN);
    let (checksum, frame) = rest.split_at(32);

    Ok((
        EnvelopeHeader {
            wrapped_key: wrapped_key.to_vec(),
            nonce_prefix: nonce_prefix.try_into().unwrap(),
        },
        checksum.try_into().unwrap(),
        frame.to_vec(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::KeyMaterial;

    #[test]
    fn round_trip_is_identity_on_bytes() {
        let keys = KeyMaterial::generate().unwrap();
        let plaintext = b"federated artifact descriptor payload".to_vec();

        let (header, frame, checksum) = encrypt_bytes(&keys.public_key, &plaintext).unwrap();
        let decrypted = decrypt_bytes(&keys.private_key, &header, &frame, checksum).unwrap();

        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn streaming_multi_chunk_round_trips() {
        let keys = KeyMaterial::generate().unwrap();
        let chunks: Vec<Vec<u8>> = (0..5).map(|i| vec![i as u8; 4096]).collect();

        let (mut encryptor, header) = Encryptor::start(&keys.public_key).unwrap();
        let mut frames = Vec::new();
        for chunk in &chunks {
            if let Some(frame) = encryptor.update(chunk).unwrap() {
                frames.push(frame);
            }
        }
        let (last_frame, checksum) = encryptor.end().unwrap();
        frames.push(last_frame);

        let mut decryptor = Decryptor::start(&keys.private_key, &header).unwrap();
        let mut plaintext = Vec::new();
        for frame in &frames {
            if let Some(chunk) = decryptor.update(frame).unwrap() {
                plaintext.extend(chunk);
            }
        }
        plaintext.extend(decryptor.end(checksum).unwrap());

        assert_eq!(plaintext, chunks.concat());
    }

    #[test]
    fn pack_then_unpack_round_trips_envelope() {
        let keys = KeyMaterial::generate().unwrap();
        let (header, frame, checksum) = encrypt_bytes(&keys.public_key, b"wire payload").unwrap();

        let packed = pack_envelope(&header, checksum, &frame);
        let (unpacked_header, unpacked_checksum, unpacked_frame) = unpack_envelope(&packed).unwrap();

        assert_eq!(unpacked_header.wrapped_key, header.wrapped_key);
        assert_eq!(unpacked_header.nonce_prefix, header.nonce_prefix);
        assert_eq!(unpacked_checksum, checksum);
        assert_eq!(unpacked_frame, frame);

        let plaintext = decrypt_bytes(&keys.private_key, &unpacked_header, &unpacked_frame, unpacked_checksum).unwrap();
        assert_eq!(plaintext, b"wire payload");
    }

    #[test]
    fn checksum_mismatch_is_rejected() {
        let keys = KeyMaterial::generate().unwrap();
        let (header, frame, _checksum) = encrypt_bytes(&keys.public_key, b"payload").unwrap();
        let wrong_checksum = [0u8; 32];

        let result = decrypt_bytes(&keys.private_key, &header, &frame, wrong_checksum);
        assert!(matches!(result, Err(CryptoError::ChecksumMismatch)));
    }
}
