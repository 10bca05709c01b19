// [libs/core/repository/src/result.rs]
/*!
 * =================================================================
 * APARATO: RESULT REPOSITORY CONTRACT
 * CLASIFICACIÓN: CORE ABSTRACTION (ESTRATO L2)
 * RESPONSABILIDAD: INTERFAZ DE PERSISTENCIA Y CONSULTA DE FILAS DE RESULTADO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ATOMIC INTEGRITY: el esquema concreto, no este contrato, es quien
 *    arbitra los invariantes de unicidad de §3/§8.
 * =================================================================
 */

use async_trait::async_trait;
use fednode_domain_models::ResultRow;
use uuid::Uuid;

use crate::errors::Result;
use crate::transaction_handle::TransactionHandle;

#[async_trait]
pub trait ResultRepository: Send + Sync {
    async fn create(&self, transaction_handle: &mut TransactionHandle, result: &ResultRow) -> Result<()>;
    async fn find_by_id(&self, transaction_handle: &mut TransactionHandle, id: Uuid) -> Result<ResultRow>;

    async fn find_partial(
        &self,
        transaction_handle: &mut TransactionHandle,
        artifact_id: Uuid,
        producer_id: Uuid,
        iteration: u32,
    ) -> Result<Option<ResultRow>>;

    async fn find_aggregated(&self, transaction_handle: &mut TransactionHandle, artifact_id: Uuid, iteration: u32) -> Result<Option<ResultRow>>;
}
