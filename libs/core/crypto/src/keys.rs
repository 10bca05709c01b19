// [libs/core/crypto/src/keys.rs]
/*!
 * =================================================================
 * APARATO: KEY MATERIAL FORGE
 * CLASIFICACIÓN: CORE LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: CARGA, GENERACIÓN Y PERSISTENCIA DEL PAR DE CLAVES RSA-4096
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: una clave privada jamás se escribe fuera de
 *    `workdir`.
 * =================================================================
 */

use std::path::Path;

use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::errors::{CryptoError, Result};

const KEY_BITS: usize = 4096;

/// A node's long-lived RSA keypair. Loaded once at startup and treated as
/// read-only for the lifetime of the process (spec.md §5).
pub struct KeyMaterial {
    pub private_key: RsaPrivateKey,
    pub public_key: RsaPublicKey,
}

impl KeyMaterial {
    pub fn generate() -> Result<Self> {
        let mut rng = rand::rngs::OsRng;
        let private_key = RsaPrivateKey::new(&mut rng, KEY_BITS)
            .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?;
        let public_key = RsaPublicKey::from(&private_key);
        Ok(Self { private_key, public_key })
    }

    /// Loads `path` if it exists, else generates a fresh keypair and writes
    /// it there (spec.md §6: `workdir/private_key.pem`).
    pub fn load_or_generate(path: &Path) -> Result<Self> {
        if path.exists() {
            let pem = std::fs::read_to_string(path).map_err(|source| CryptoError::KeyIo {
                path: path.display().to_string(),
                source,
            })?;
            let private_key = RsaPrivateKey::from_pkcs8_pem(&pem)
                .map_err(|e| CryptoError::Pem(e.to_string()))?;
            let public_key = RsaPublicKey::from(&private_key);
            return Ok(Self { private_key, public_key });
        }

        let material = Self::generate()?;
        material.write_private_pem(path)?;
        Ok(material)
    }

    pub fn write_private_pem(&self, path: &Path) -> Result<()> {
        let pem = self
            .private_key
            .to_pkcs8_pem(LineEnding::LF)
            .map_err(|e| CryptoError::Pem(e.to_string()))?;
        std::fs::write(path, pem.as_bytes()).map_err(|source| CryptoError::KeyIo {
            path: path.display().to_string(),
            source,
        })?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(path, permissions).map_err(|source| CryptoError::KeyIo {
                path: path.display().to_string(),
                source,
            })?;
        }
        Ok(())
    }

    pub fn public_key_pem(&self) -> Result<String> {
        self.public_key
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| CryptoError::Pem(e.to_string()))
    }
}

pub fn public_key_from_pem(pem: &str) -> Result<RsaPublicKey> {
    RsaPublicKey::from_public_key_pem(pem).map_err(|e| CryptoError::Pem(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_then_reload_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("private_key.pem");

        let original = KeyMaterial::load_or_generate(&path).unwrap();
        assert!(path.exists());

        let reloaded = KeyMaterial::load_or_generate(&path).unwrap();
        assert_eq!(
            original.public_key_pem().unwrap(),
            reloaded.public_key_pem().unwrap()
        );
    }
}
