// [libs/core/orchestration/src/scheduler.rs]
/*!
 * =================================================================
 * APARATO: JOB STATE MACHINE KERNEL
 * CLASIFICACIÓN: CORE LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: MÁQUINA DE ESTADOS DE TRABAJOS, DESPACHO Y ROTACIÓN DE ITERACIÓN (spec.md §4.5)
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ATOMIC INTEGRITY: un resultado tardío de una iteración ya cancelada
 *    se persiste siempre, nunca se descarta silenciosamente.
 * 2. NOMINAL PURITY: cero abreviaturas (`transaction_handle`) en cada
 *    firma de método público.
 *
 * # Mathematical Proof:
 * `complete_job`/`fail_job` garantizan persistencia incondicional de la fila de
 * resultado (spec §9): el chequeo de estado terminal sólo decide si el efecto
 * de planificación (transición, cancelación de hermanos) ocurre, jamás si la
 * fila se escribe.
 * =================================================================
 */

use chrono::{DateTime, Duration, Utc};
use tracing::warn;
use uuid::Uuid;

use fednode_core_repository::{ArtifactRepository, JobRepository, ResultRepository, TransactionHandle};
use fednode_domain_models::{
    ArtifactStatusKind, Job, JobKind, JobStatus, ResultRow, ResultTag,
};

use crate::errors::{CoreError, Result};

pub struct Scheduler<'a> {
    pub jobs: &'a dyn JobRepository,
    pub results: &'a dyn ResultRepository,
    pub artifacts: &'a dyn ArtifactRepository,
    /// `RUNNING` jobs older than this are reclaimed on the next tick
    /// (default: 2x heartbeat interval).
    pub lease_duration: Duration,
}

impl<'a> Scheduler<'a> {
    /// Selects the oldest `SCHEDULED` job for `component_id` and CASes it
    /// to `RUNNING`. Retries once on a lost race, then reports nothing to
    /// do rather than erroring.
    pub async fn dispatch(&self, transaction_handle: &mut TransactionHandle, component_id: Uuid, now: DateTime<Utc>) -> Result<Option<Job>> {
        for _attempt in 0..2 {
            let candidate = self.jobs.find_oldest_scheduled_for_component(transaction_handle, component_id).await?;
            let Some(job) = candidate else { return Ok(None) };

            let won = self
                .jobs
                .try_transition(transaction_handle, job.id, JobStatus::Scheduled, JobStatus::Running)
                .await?;
            if won {
                self.jobs.mark_started(transaction_handle, job.id, now).await?;
                return Ok(Some(Job { status: JobStatus::Running, started_at: Some(now), ..job }));
            }
        }
        Ok(None)
    }

    /// Resets expired `RUNNING` leases back to `SCHEDULED`.
    pub async fn reclaim_expired_leases(&self, transaction_handle: &mut TransactionHandle, now: DateTime<Utc>) -> Result<u64> {
        let expired_before = now - self.lease_duration;
        Ok(self.jobs.reclaim_expired_leases(transaction_handle, expired_before).await?)
    }

    /// Persists a worker's successful result for `job_id`, folds it into
    /// the iteration's aggregation job, and rolls the aggregation job
    /// `CREATED → SCHEDULED` once every partial for the iteration is done.
    ///
    /// A result for a job that already reached a terminal state (e.g. a
    /// straggling upload after the rest of its iteration was cancelled) is
    /// still persisted for provenance — it is simply not allowed to affect
    /// scheduling (spec.md §9: "late results for a cancelled iteration are
    /// accepted and persisted with no scheduler effect").
    pub async fn complete_job(&self, transaction_handle: &mut TransactionHandle, job_id: Uuid, result: ResultRow, now: DateTime<Utc>) -> Result<()> {
        let job = self.jobs.find_by_id(transaction_handle, job_id).await?;
        self.results.create(transaction_handle, &result).await?;
        if job.status.is_terminal() {
            return Ok(());
        }

        self.jobs.mark_ended(transaction_handle, job_id, JobStatus::Done, now).await?;

        if job.kind == JobKind::Partial {
            let siblings = self.jobs.list_by_artifact_iteration(transaction_handle, job.artifact_id, job.iteration).await?;
            let aggregation_job = siblings
                .iter()
                .find(|sibling| sibling.kind == JobKind::Aggregation)
                .ok_or(CoreError::Internal("iteration has no aggregation job".into()))?;

            self.jobs.append_content_id(transaction_handle, aggregation_job.id, &result.id.to_string()).await?;

            let all_partials_done = siblings
                .iter()
                .filter(|sibling| sibling.kind == JobKind::Partial)
                .all(|sibling| sibling.id == job.id || sibling.status == JobStatus::Done);

            if all_partials_done {
                self.jobs
                    .try_transition(transaction_handle, aggregation_job.id, JobStatus::Created, JobStatus::Scheduled)
                    .await?;
            }
        } else {
            self.roll_over_iteration(transaction_handle, job.artifact_id, job.iteration, now).await?;
        }

        Ok(())
    }

    /// On aggregation completion, either starts the next iteration by
    /// cloning the partial jobs with fresh ids, or marks the artifact
    /// completed.
    async fn roll_over_iteration(&self, transaction_handle: &mut TransactionHandle, artifact_id: Uuid, iteration: u32, now: DateTime<Utc>) -> Result<()> {
        let artifact = self.artifacts.find_by_id(transaction_handle, artifact_id).await?;

        if iteration + 1 < artifact.execution_plan.iterations {
            let next_iteration = iteration + 1;
            let previous_jobs = self.jobs.list_by_artifact_iteration(transaction_handle, artifact_id, iteration).await?;
            let previous_aggregator = previous_jobs
                .iter()
                .find(|job| job.kind == JobKind::Aggregation)
                .map(|job| job.component_id)
                .ok_or(CoreError::Internal("iteration has no aggregation job".into()))?;
            let partials: Vec<_> = previous_jobs.into_iter().filter(|job| job.kind == JobKind::Partial).collect();

            for partial in &partials {
                let cloned = Job {
                    id: Uuid::new_v4(),
                    iteration: next_iteration,
                    status: JobStatus::Scheduled,
                    created_at: now,
                    started_at: None,
                    ended_at: None,
                    ..partial.clone()
                };
                self.jobs.create(transaction_handle, &cloned).await?;
            }

            let aggregation_job = Job {
                id: Uuid::new_v4(),
                artifact_id,
                component_id: previous_aggregator,
                iteration: next_iteration,
                kind: JobKind::Aggregation,
                status: JobStatus::Created,
                content_ids: Vec::new(),
                created_at: now,
                started_at: None,
                ended_at: None,
            };
            self.jobs.create(transaction_handle, &aggregation_job).await?;
            self.artifacts.set_current_iteration(transaction_handle, artifact_id, next_iteration).await?;
        } else {
            self.artifacts
                .set_status(transaction_handle, artifact_id, ArtifactStatusKind::Completed)
                .await?;
        }
        Ok(())
    }

    /// Persists a worker-reported error as an `is_error` result, fails the
    /// job, cancels the rest of its iteration, and fails the artifact.
    /// Errors are never retried by the core (spec §4.5).
    pub async fn fail_job(&self, transaction_handle: &mut TransactionHandle, job_id: Uuid, reason: &str, now: DateTime<Utc>) -> Result<()> {
        let job = self.jobs.find_by_id(transaction_handle, job_id).await?;

        let error_result = ResultRow {
            id: Uuid::new_v4(),
            job_id,
            artifact_id: job.artifact_id,
            producer_id: job.component_id,
            iteration: job.iteration,
            is_model: false,
            is_estimation: false,
            is_aggregation: job.kind == JobKind::Aggregation,
            is_error: true,
            path: format!("storage/artifacts/{}/{}/{}.error", job.artifact_id, job.iteration, job_id),
            created_at: now,
        };
        debug_assert_eq!(error_result.tag(), ResultTag::Error);
        self.results.create(transaction_handle, &error_result).await?;

        if job.status.is_terminal() {
            return Ok(());
        }

        self.jobs.mark_ended(transaction_handle, job_id, JobStatus::Error, now).await?;
        warn!(%job_id, artifact_id = %job.artifact_id, reason, "⚠️ [ITERATION_CANCELLED]: job reported error, cancelling iteration");

        let siblings = self.jobs.list_by_artifact_iteration(transaction_handle, job.artifact_id, job.iteration).await?;
        for sibling in siblings.into_iter().filter(|s| s.id != job_id && s.status == JobStatus::Scheduled) {
            self.jobs.try_transition(transaction_handle, sibling.id, JobStatus::Scheduled, JobStatus::Error).await?;
        }

        self.artifacts.set_status(transaction_handle, job.artifact_id, ArtifactStatusKind::Error).await?;
        Ok(())
    }
}
