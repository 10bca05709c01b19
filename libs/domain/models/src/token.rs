// [libs/domain/models/src/token.rs]
/*!
 * =================================================================
 * APARATO: TOKEN DOMAIN MODEL
 * CLASIFICACIÓN: DOMAIN MODEL (ESTRATO L1)
 * RESPONSABILIDAD: CREDENCIAL DE SESIÓN EMITIDA EN EL APRETÓN DE MANOS DE INGRESO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: la expiración se calcula en el servicio de sesión,
 *    nunca en este modelo.
 * =================================================================
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bearer credential bound to a component. Multiple rows per component are
/// allowed, but at most one may have `valid=true` at a time (spec.md §3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub token: String,
    pub component_id: Uuid,
    pub expiration: DateTime<Utc>,
    pub valid: bool,
    pub issued_at: DateTime<Utc>,
}

impl Token {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expiration
    }
}
