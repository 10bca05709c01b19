// [libs/core/crypto/src/transfer.rs]
/*!
 * =================================================================
 * APARATO: PEM TRANSFER ENCODING
 * CLASIFICACIÓN: CORE LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: CODIFICACIÓN BASE64 DE CLAVES PÚBLICAS PARA EL APRETÓN DE MANOS DE INGRESO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: el armazón PEM nunca viaja crudo por la red.
 * =================================================================
 */

use base64::{engine::general_purpose::STANDARD, Engine};

const PEM_HEADER_PREFIX: &str = "-----BEGIN";
const PEM_FOOTER_PREFIX: &str = "-----END";

/// Strips PEM armour (header/footer lines) and returns the base64 payload
/// re-encoded as a single transfer blob.
pub fn encode_pem_for_transfer(pem: &str) -> String {
    let body: String = pem
        .lines()
        .filter(|line| {
            !line.starts_with(PEM_HEADER_PREFIX) && !line.starts_with(PEM_FOOTER_PREFIX)
        })
        .collect();
    STANDARD.encode(body.as_bytes())
}

/// Restores PEM armour around a transfer-encoded public key.
pub fn decode_pem_from_transfer(transfer: &str, label: &str) -> Result<String, base64::DecodeError> {
    let decoded = STANDARD.decode(transfer)?;
    let body = String::from_utf8_lossy(&decoded);
    Ok(format!(
        "-----BEGIN {label}-----\n{body}\n-----END {label}-----\n"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_and_restore_round_trips_body() {
        let pem = "-----BEGIN PUBLIC KEY-----\nabcd\nefgh\n-----END PUBLIC KEY-----\n";
        let transfer = encode_pem_for_transfer(pem);
        let restored = decode_pem_from_transfer(&transfer, "PUBLIC KEY").unwrap();
        assert!(restored.contains("abcdefgh"));
    }
}
