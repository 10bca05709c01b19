// [libs/core/crypto/src/signature.rs]
/*!
 * =================================================================
 * APARATO: SIGNATURE KERNEL
 * CLASIFICACIÓN: CORE LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: FIRMA Y VERIFICACIÓN PKCS#1 v1.5 SOBRE SHA-256
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ATOMIC INTEGRITY: una firma inválida jamás se confunde con un error
 *    de transporte.
 * =================================================================
 */

use rsa::pkcs1v15::Pkcs1v15Sign;
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};

use crate::errors::{CryptoError, Result};

/// Signs a short identity claim (join/leave payload). The signed payload
/// for join is `id:public_key` (spec.md §4.1).
pub fn sign_claim(private_key: &RsaPrivateKey, claim: &str) -> Result<Vec<u8>> {
    let digest = Sha256::digest(claim.as_bytes());
    let padding = Pkcs1v15Sign::new::<Sha256>();
    private_key
        .sign(padding, &digest)
        .map_err(CryptoError::from)
}

pub fn verify_claim(public_key: &RsaPublicKey, claim: &str, signature: &[u8]) -> Result<()> {
    let digest = Sha256::digest(claim.as_bytes());
    let padding = Pkcs1v15Sign::new::<Sha256>();
    public_key
        .verify(padding, &digest, signature)
        .map_err(|_| CryptoError::SignatureInvalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::KeyMaterial;

    #[test]
    fn sign_then_verify_succeeds() {
        let keys = KeyMaterial::generate().unwrap();
        let claim = "c1:public-key-bytes";
        let signature = sign_claim(&keys.private_key, claim).unwrap();
        verify_claim(&keys.public_key, claim, &signature).unwrap();
    }

    #[test]
    fn tampered_claim_fails_verification() {
        let keys = KeyMaterial::generate().unwrap();
        let signature = sign_claim(&keys.private_key, "c1:public-key-bytes").unwrap();
        let result = verify_claim(&keys.public_key, "c1:different-key-bytes", &signature);
        assert!(result.is_err());
    }
}
