// [libs/domain/models/src/project.rs]
/*!
 * =================================================================
 * APARATO: PROJECT DOMAIN MODEL
 * CLASIFICACIÓN: DOMAIN MODEL (ESTRATO L1)
 * RESPONSABILIDAD: ÁMBITO DE CAPACIDAD NOMBRADO AL QUE UN ARTEFACTO SE VINCULA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: sin lógica, sólo forma de datos serializable.
 * =================================================================
 */

use serde::{Deserialize, Serialize};

/// Named capability scope bound to a token. A workbench submission
/// references exactly one project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub token: String,
    pub name: String,
}
