// [libs/domain/models/src/result.rs]
/*!
 * =================================================================
 * APARATO: RESULT DOMAIN MODEL
 * CLASIFICACIÓN: DOMAIN MODEL (ESTRATO L1)
 * RESPONSABILIDAD: FILA DE RESULTADO Y SU ETIQUETA DERIVADA DE PROVEÑENCIA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. NOMINAL PURITY: `tag()` deriva `ResultTag` de los cuatro booleanos
 *    en lugar de duplicarlo en cada llamador.
 * =================================================================
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResultTag {
    Partial,
    Aggregated,
    Error,
}

/// Pointer to an opaque blob plus provenance (spec.md §3). The path is
/// assigned at creation and never rewritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub artifact_id: Uuid,
    pub producer_id: Uuid,
    pub iteration: u32,
    pub is_model: bool,
    pub is_estimation: bool,
    pub is_aggregation: bool,
    pub is_error: bool,
    pub path: String,
    pub created_at: DateTime<Utc>,
}

impl ResultRow {
    pub fn tag(&self) -> ResultTag {
        if self.is_error {
            ResultTag::Error
        } else if self.is_aggregation {
            ResultTag::Aggregated
        } else {
            ResultTag::Partial
        }
    }
}
