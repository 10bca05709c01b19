// [libs/core/orchestration/src/session.rs]
/*!
 * =================================================================
 * APARATO: JOIN/LEAVE PROTOCOL SERVICE
 * CLASIFICACIÓN: CORE LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: PROTOCOLO DE INGRESO, SALIDA Y EMISIÓN DE TOKEN (spec.md §4.2)
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ATOMIC INTEGRITY: un componente nunca queda con dos tokens válidos
 *    simultáneos.
 * =================================================================
 */

use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use fednode_core_crypto::{sign_claim, verify_claim};
use fednode_domain_models::{Component, NodeJoinRequest, Token};
use rsa::RsaPrivateKey;

use crate::errors::{CoreError, Result};

/// Two SHA-256 rounds over `id|system|mac|node|millis_now`; the inner hash
/// makes the preimage opaque to casual inspection.
pub fn issue_token_value(
    component_id: Uuid,
    system: &str,
    mac_address: Option<&str>,
    machine_node: Option<&str>,
    issued_at_millis: i64,
) -> String {
    let preimage = format!(
        "{id}|{system}|{mac}|{node}|{millis}",
        id = component_id,
        system = system,
        mac = mac_address.unwrap_or(""),
        node = machine_node.unwrap_or(""),
        millis = issued_at_millis,
    );
    let inner = hex::encode(Sha256::digest(preimage.as_bytes()));
    hex::encode(Sha256::digest(inner.as_bytes()))
}

pub fn new_token(component_id: Uuid, system: &str, mac_address: Option<&str>, machine_node: Option<&str>, now: DateTime<Utc>, ttl: Duration) -> Token {
    let value = issue_token_value(component_id, system, mac_address, machine_node, now.timestamp_millis());
    Token {
        token: value,
        component_id,
        expiration: now + ttl,
        valid: true,
        issued_at: now,
    }
}

/// Checksum clients attach to a join request so the server can catch
/// transport corruption of `public_key_pem` independently of the signature.
pub fn public_key_checksum(public_key_pem: &str) -> String {
    hex::encode(Sha256::digest(public_key_pem.as_bytes()))
}

/// Verifies a join request's checksum and signature against the claim
/// `id:public_key` (spec.md §4.1).
pub fn verify_join_signature(request: &NodeJoinRequest) -> Result<()> {
    let expected_checksum = public_key_checksum(&request.public_key_pem);
    if request.checksum != expected_checksum {
        return Err(CoreError::AccessDenied);
    }

    let public_key = fednode_core_crypto::public_key_from_pem(&request.public_key_pem)
        .map_err(|e| CoreError::InvalidArtifact(e.to_string()))?;
    let claim = format!("{}:{}", request.id, request.public_key_pem);
    let signature = hex::decode(&request.signature)
        .map_err(|e| CoreError::InvalidArtifact(format!("malformed signature: {e}")))?;
    verify_claim(&public_key, &claim, &signature).map_err(|_| CoreError::AccessDenied)
}

pub fn sign_join_claim(private_key: &RsaPrivateKey, id: Uuid, public_key_pem: &str) -> Result<String> {
    let claim = format!("{id}:{public_key_pem}");
    let signature = sign_claim(private_key, &claim).map_err(|e| CoreError::Internal(e.to_string()))?;
    Ok(hex::encode(signature))
}

/// Verifies a leave request's signature against the component's stored
/// public key.
pub fn verify_leave_signature(component: &Component, id: Uuid, signature_hex: &str) -> Result<()> {
    let public_key = fednode_core_crypto::public_key_from_pem(&component.public_key_pem)
        .map_err(|e| CoreError::InvalidArtifact(e.to_string()))?;
    let claim = format!("{id}:{}", component.public_key_pem);
    let signature =
        hex::decode(signature_hex).map_err(|e| CoreError::InvalidArtifact(format!("malformed signature: {e}")))?;
    verify_claim(&public_key, &claim, &signature).map_err(|_| CoreError::AccessDenied)
}

pub fn token_expired(token: &Token, now: DateTime<Utc>) -> bool {
    token.is_expired(now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_issuance_is_deterministic_for_same_inputs() {
        let id = Uuid::new_v4();
        let a = issue_token_value(id, "linux", Some("aa:bb"), Some("node-1"), 1_700_000_000_000);
        let b = issue_token_value(id, "linux", Some("aa:bb"), Some("node-1"), 1_700_000_000_000);
        assert_eq!(a, b);
    }

    #[test]
    fn token_issuance_differs_on_timestamp() {
        let id = Uuid::new_v4();
        let a = issue_token_value(id, "linux", Some("aa:bb"), Some("node-1"), 1_700_000_000_000);
        let b = issue_token_value(id, "linux", Some("aa:bb"), Some("node-1"), 1_700_000_000_001);
        assert_ne!(a, b);
    }

    #[test]
    fn join_signature_rejects_tampered_checksum() {
        use fednode_domain_models::ComponentType;

        let keys = fednode_core_crypto::KeyMaterial::generate().unwrap();
        let public_key_pem = keys.public_key_pem().unwrap();
        let id = Uuid::new_v4();
        let signature = sign_join_claim(&keys.private_key, id, &public_key_pem).unwrap();

        let request = NodeJoinRequest {
            id,
            component_type: ComponentType::Client,
            public_key_pem,
            version: "1.0.0".into(),
            system: "linux".into(),
            signature,
            checksum: "not-the-real-checksum".into(),
            mac_address: None,
            machine_node: None,
        };

        assert!(matches!(verify_join_signature(&request), Err(CoreError::AccessDenied)));
    }
}
