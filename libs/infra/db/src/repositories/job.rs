// [libs/infra/db/src/repositories/job.rs]
/*!
 * =================================================================
 * APARATO: JOB LEDGER REPOSITORY
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: DESPACHO, RECLAMO DE ARRIENDOS Y TRANSICIÓN ATÓMICA DE TRABAJOS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ATOMIC INTEGRITY: `try_transition` sólo avanza el estado si la
 *    cláusula WHERE certifica el estado previo.
 * 2. NOMINAL PURITY: cero abreviaturas en parámetros (`component_id`,
 *    `transaction_handle`).
 *
 * # Mathematical Proof:
 * Una transición ganada por CAS es indivisible a nivel de fila: la cláusula WHERE
 * excluye cualquier carrera entre dos despachadores concurrentes.
 * =================================================================
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fednode_core_repository::{JobRepository, RepoError, Result, TransactionHandle};
use fednode_domain_models::{Job, JobKind, JobStatus};
use libsql::{params, Row};
use uuid::Uuid;

use super::transaction;
use super::util::{de_enum, de_json, parse_dt, parse_dt_opt, parse_uuid, qerr, ser_enum, ser_json};

const COLUMNS: &str = "id, artifact_id, component_id, iteration, kind, status, content_ids_json, \
    created_at, started_at, ended_at";

pub struct LibsqlJobRepository;

impl LibsqlJobRepository {
    pub fn new() -> Self {
        Self
    }

    fn map_row(row: &Row) -> Result<Job> {
        let id: String = row.get(0).map_err(qerr)?;
        let artifact_id: String = row.get(1).map_err(qerr)?;
        let component_id: String = row.get(2).map_err(qerr)?;
        let iteration: i64 = row.get(3).map_err(qerr)?;
        let kind: String = row.get(4).map_err(qerr)?;
        let status: String = row.get(5).map_err(qerr)?;
        let content_ids_json: String = row.get(6).map_err(qerr)?;
        let created_at: String = row.get(7).map_err(qerr)?;
        let started_at: Option<String> = row.get(8).map_err(qerr)?;
        let ended_at: Option<String> = row.get(9).map_err(qerr)?;

        Ok(Job {
            id: parse_uuid(&id)?,
            artifact_id: parse_uuid(&artifact_id)?,
            component_id: parse_uuid(&component_id)?,
            iteration: iteration as u32,
            kind: de_enum::<JobKind>(&kind)?,
            status: de_enum::<JobStatus>(&status)?,
            content_ids: de_json(&content_ids_json)?,
            created_at: parse_dt(&created_at)?,
            started_at: parse_dt_opt(started_at)?,
            ended_at: parse_dt_opt(ended_at)?,
        })
    }
}

#[async_trait]
impl JobRepository for LibsqlJobRepository {
    async fn create(&self, transaction_handle: &mut TransactionHandle, job: &Job) -> Result<()> {
        let kind = ser_enum(&job.kind)?;
        let status = ser_enum(&job.status)?;
        let content_ids_json = ser_json(&job.content_ids)?;
        let t = transaction(transaction_handle)?;
        t.execute(
            &format!("INSERT INTO jobs ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"),
            params![
                job.id.to_string(),
                job.artifact_id.to_string(),
                job.component_id.to_string(),
                job.iteration as i64,
                kind,
                status,
                content_ids_json,
                job.created_at.to_rfc3339(),
                job.started_at.map(|t| t.to_rfc3339()),
                job.ended_at.map(|t| t.to_rfc3339()),
            ],
        )
        .await
        .map_err(qerr)?;
        Ok(())
    }

    async fn find_by_id(&self, transaction_handle: &mut TransactionHandle, id: Uuid) -> Result<Job> {
        let t = transaction(transaction_handle)?;
        let mut rows = t
            .query(
                &format!("SELECT {COLUMNS} FROM jobs WHERE id = ?1"),
                params![id.to_string()],
            )
            .await
            .map_err(qerr)?;
        let row = rows.next().await.map_err(qerr)?.ok_or(RepoError::NotFound)?;
        Self::map_row(&row)
    }

    async fn find_oldest_scheduled_for_component(
        &self,
        transaction_handle: &mut TransactionHandle,
        component_id: Uuid,
    ) -> Result<Option<Job>> {
        let status = ser_enum(&JobStatus::Scheduled)?;
        let t = transaction(transaction_handle)?;
        let mut rows = t
            .query(
                &format!(
                    "SELECT {COLUMNS} FROM jobs WHERE component_id = ?1 AND status = ?2 \
                     ORDER BY created_at ASC LIMIT 1"
                ),
                params![component_id.to_string(), status],
            )
            .await
            .map_err(qerr)?;
        match rows.next().await.map_err(qerr)? {
            Some(row) => Ok(Some(Self::map_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn try_transition(
        &self,
        transaction_handle: &mut TransactionHandle,
        id: Uuid,
        expected: JobStatus,
        next: JobStatus,
    ) -> Result<bool> {
        let expected = ser_enum(&expected)?;
        let next = ser_enum(&next)?;
        let t = transaction(transaction_handle)?;
        let affected = t
            .execute(
                "UPDATE jobs SET status = ?1 WHERE id = ?2 AND status = ?3",
                params![next, id.to_string(), expected],
            )
            .await
            .map_err(qerr)?;
        Ok(affected > 0)
    }

    async fn append_content_id(&self, transaction_handle: &mut TransactionHandle, id: Uuid, content_id: &str) -> Result<()> {
        let t = transaction(transaction_handle)?;
        let mut rows = t
            .query(
                "SELECT content_ids_json FROM jobs WHERE id = ?1",
                params![id.to_string()],
            )
            .await
            .map_err(qerr)?;
        let row = rows.next().await.map_err(qerr)?.ok_or(RepoError::NotFound)?;
        let content_ids_json: String = row.get(0).map_err(qerr)?;
        let mut content_ids: Vec<String> = de_json(&content_ids_json)?;
        content_ids.push(content_id.to_string());
        let updated_json = ser_json(&content_ids)?;

        t.execute(
            "UPDATE jobs SET content_ids_json = ?1 WHERE id = ?2",
            params![updated_json, id.to_string()],
        )
        .await
        .map_err(qerr)?;
        Ok(())
    }

    async fn list_by_artifact_iteration(
        &self,
        transaction_handle: &mut TransactionHandle,
        artifact_id: Uuid,
        iteration: u32,
    ) -> Result<Vec<Job>> {
        let t = transaction(transaction_handle)?;
        let mut rows = t
            .query(
                &format!("SELECT {COLUMNS} FROM jobs WHERE artifact_id = ?1 AND iteration = ?2"),
                params![artifact_id.to_string(), iteration as i64],
            )
            .await
            .map_err(qerr)?;
        let mut out = Vec::new();
        while let Some(row) = rows.next().await.map_err(qerr)? {
            out.push(Self::map_row(&row)?);
        }
        Ok(out)
    }

    async fn reclaim_expired_leases(&self, transaction_handle: &mut TransactionHandle, older_than: DateTime<Utc>) -> Result<u64> {
        let running = ser_enum(&JobStatus::Running)?;
        let scheduled = ser_enum(&JobStatus::Scheduled)?;
        let t = transaction(transaction_handle)?;
        let affected = t
            .execute(
                "UPDATE jobs SET status = ?1, started_at = NULL \
                 WHERE status = ?2 AND started_at IS NOT NULL AND started_at < ?3",
                params![scheduled, running, older_than.to_rfc3339()],
            )
            .await
            .map_err(qerr)?;
        Ok(affected)
    }

    async fn mark_started(&self, transaction_handle: &mut TransactionHandle, id: Uuid, at: DateTime<Utc>) -> Result<()> {
        let t = transaction(transaction_handle)?;
        t.execute(
            "UPDATE jobs SET started_at = ?1 WHERE id = ?2",
            params![at.to_rfc3339(), id.to_string()],
        )
        .await
        .map_err(qerr)?;
        Ok(())
    }

    async fn mark_ended(&self, transaction_handle: &mut TransactionHandle, id: Uuid, status: JobStatus, at: DateTime<Utc>) -> Result<()> {
        let status = ser_enum(&status)?;
        let t = transaction(transaction_handle)?;
        t.execute(
            "UPDATE jobs SET status = ?1, ended_at = ?2 WHERE id = ?3",
            params![status, at.to_rfc3339(), id.to_string()],
        )
        .await
        .map_err(qerr)?;
        Ok(())
    }
}
