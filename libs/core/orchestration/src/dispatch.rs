// [libs/core/orchestration/src/dispatch.rs]
/*!
 * =================================================================
 * APARATO: HEARTBEAT DISPATCH SERVICE
 * CLASIFICACIÓN: CORE LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: BUCLE DE ACTUALIZACIÓN DEL LADO SERVIDOR (spec.md §4.7)
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ATOMIC INTEGRITY: el reclamo de arriendos y el despacho ocurren
 *    dentro de la misma transacción por latido.
 * =================================================================
 */

use chrono::{DateTime, Utc};
use rsa::RsaPublicKey;
use uuid::Uuid;

use fednode_core_crypto::{encrypt_bytes, pack_envelope};
use fednode_core_repository::{ArtifactRepository, JobRepository, TransactionHandle};
use fednode_domain_models::{Job, TaskParameters, UpdateData};

use crate::errors::{CoreError, Result};
use crate::scheduler::Scheduler;

pub struct UpdateService<'a> {
    pub scheduler: &'a Scheduler<'a>,
    pub jobs: &'a dyn JobRepository,
    pub artifacts: &'a dyn ArtifactRepository,
}

impl<'a> UpdateService<'a> {
    /// Returns the first applicable `UpdateData` variant for a heartbeating
    /// component: a freshly dispatched job, or `Nothing`.
    pub async fn next_action(&self, transaction_handle: &mut TransactionHandle, component_id: Uuid, now: DateTime<Utc>) -> Result<UpdateData> {
        self.scheduler.reclaim_expired_leases(transaction_handle, now).await?;

        match self.scheduler.dispatch(transaction_handle, component_id, now).await? {
            Some(job) => Ok(UpdateData::ExecuteJob { job_id: job.id, kind: job.kind }),
            None => Ok(UpdateData::Nothing),
        }
    }

    /// Builds the encrypted task parameters for a dispatched job, hybrid
    /// encrypting the opaque artifact descriptor for the executing worker.
    pub async fn task_parameters(&self, transaction_handle: &mut TransactionHandle, job_id: Uuid, worker_public_key: &RsaPublicKey) -> Result<TaskParameters> {
        let job: Job = self.jobs.find_by_id(transaction_handle, job_id).await.map_err(CoreError::from)?;
        let artifact = self.artifacts.find_by_id(transaction_handle, job.artifact_id).await.map_err(CoreError::from)?;

        let descriptor = serde_json::to_vec(&artifact.payload).map_err(|e| CoreError::Internal(e.to_string()))?;
        let (header, frame, checksum) =
            encrypt_bytes(worker_public_key, &descriptor).map_err(|e| CoreError::Internal(e.to_string()))?;
        let encrypted_descriptor = pack_envelope(&header, checksum, &frame);

        Ok(TaskParameters {
            job_id: job.id,
            artifact_id: job.artifact_id,
            iteration: job.iteration,
            kind: job.kind,
            content_ids: job.content_ids,
            encrypted_descriptor,
        })
    }
}
