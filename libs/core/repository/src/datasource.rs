// [libs/core/repository/src/datasource.rs]
/*!
 * =================================================================
 * APARATO: DATASOURCE REPOSITORY CONTRACT
 * CLASIFICACIÓN: CORE ABSTRACTION (ESTRATO L2)
 * RESPONSABILIDAD: INTERFAZ DE REGISTRO Y CONSULTA DE FUENTES DE DATOS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: el hash de contenido es la única clave primaria
 *    relevante para el planificador.
 * =================================================================
 */

use async_trait::async_trait;
use fednode_domain_models::DataSource;

use crate::errors::Result;
use crate::transaction_handle::TransactionHandle;

#[async_trait]
pub trait DataSourceRepository: Send + Sync {
    async fn upsert(&self, transaction_handle: &mut TransactionHandle, datasource: &DataSource) -> Result<()>;
    async fn find_by_hash(&self, transaction_handle: &mut TransactionHandle, hash: &str) -> Result<Option<DataSource>>;
}
