// [libs/core/repository/src/job.rs]
/*!
 * =================================================================
 * APARATO: JOB REPOSITORY CONTRACT
 * CLASIFICACIÓN: CORE ABSTRACTION (ESTRATO L2)
 * RESPONSABILIDAD: INTERFAZ DE DESPACHO, ARRIENDO Y TRANSICIÓN ATÓMICA DE TRABAJOS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ATOMIC INTEGRITY: `try_transition` es compare-and-swap a nivel de
 *    contrato, no sólo de implementación.
 * 2. NOMINAL PURITY: cero abreviaturas en cualquier parámetro de esta
 *    interfaz.
 * =================================================================
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fednode_domain_models::{Job, JobStatus};
use uuid::Uuid;

use crate::errors::Result;
use crate::transaction_handle::TransactionHandle;

#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create(&self, transaction_handle: &mut TransactionHandle, job: &Job) -> Result<()>;
    async fn find_by_id(&self, transaction_handle: &mut TransactionHandle, id: Uuid) -> Result<Job>;

    async fn find_oldest_scheduled_for_component(
        &self,
        transaction_handle: &mut TransactionHandle,
        component_id: Uuid,
    ) -> Result<Option<Job>>;

    /// Atomically moves `id` from `expected` to `next`. Returns `false`
    /// without error if another writer already moved it (spec §4.5 CAS
    /// dispatch).
    async fn try_transition(
        &self,
        transaction_handle: &mut TransactionHandle,
        id: Uuid,
        expected: JobStatus,
        next: JobStatus,
    ) -> Result<bool>;

    async fn append_content_id(&self, transaction_handle: &mut TransactionHandle, id: Uuid, content_id: &str) -> Result<()>;

    async fn list_by_artifact_iteration(
        &self,
        transaction_handle: &mut TransactionHandle,
        artifact_id: Uuid,
        iteration: u32,
    ) -> Result<Vec<Job>>;

    /// Resets `RUNNING` jobs whose lease expired before `older_than` back
    /// to `SCHEDULED`. Returns the number of jobs reclaimed.
    async fn reclaim_expired_leases(&self, transaction_handle: &mut TransactionHandle, older_than: DateTime<Utc>) -> Result<u64>;

    async fn mark_started(&self, transaction_handle: &mut TransactionHandle, id: Uuid, at: DateTime<Utc>) -> Result<()>;
    async fn mark_ended(&self, transaction_handle: &mut TransactionHandle, id: Uuid, status: JobStatus, at: DateTime<Utc>) -> Result<()>;
}
