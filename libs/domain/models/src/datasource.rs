// [libs/domain/models/src/datasource.rs]
/*!
 * =================================================================
 * APARATO: DATASOURCE DOMAIN MODEL
 * CLASIFICACIÓN: DOMAIN MODEL (ESTRATO L1)
 * RESPONSABILIDAD: METADATA DE CARACTERÍSTICAS OPACA AL NÚCLEO DE ORQUESTACIÓN
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: el planificador nunca interpreta `columns_json`, sólo
 *    lo transporta.
 * =================================================================
 */

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Feature metadata the planner reads off a datasource; shape is opaque to
/// the core beyond its column listing (estimator/model math is a Non-goal).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureMetadata {
    pub columns: Vec<String>,
    pub row_count: Option<u64>,
}

/// Owned by one component; identified by content-derived `hash`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSource {
    pub hash: String,
    pub owner_component_id: Uuid,
    pub features: FeatureMetadata,
}
