// [libs/infra/db/src/repositories/result.rs]
/*!
 * =================================================================
 * APARATO: RESULT LEDGER REPOSITORY
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: PERSISTENCIA DE RESULTADOS CON PROVEÑENCIA COMPLETA POR ITERACIÓN
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ATOMIC INTEGRITY: los índices únicos filtrados garantizan a nivel de
 *    base de datos los invariantes de §3/§8.
 * =================================================================
 */

use async_trait::async_trait;
use fednode_core_repository::{RepoError, Result, ResultRepository, TransactionHandle};
use fednode_domain_models::ResultRow;
use libsql::{params, Row};
use uuid::Uuid;

use super::transaction;
use super::util::{parse_dt, parse_uuid, qerr};

const COLUMNS: &str = "id, job_id, artifact_id, producer_id, iteration, is_model, is_estimation, \
    is_aggregation, is_error, path, created_at";

pub struct LibsqlResultRepository;

impl LibsqlResultRepository {
    pub fn new() -> Self {
        Self
    }

    fn map_row(row: &Row) -> Result<ResultRow> {
        let id: String = row.get(0).map_err(qerr)?;
        let job_id: String = row.get(1).map_err(qerr)?;
        let artifact_id: String = row.get(2).map_err(qerr)?;
        let producer_id: String = row.get(3).map_err(qerr)?;
        let iteration: i64 = row.get(4).map_err(qerr)?;
        let is_model: i64 = row.get(5).map_err(qerr)?;
        let is_estimation: i64 = row.get(6).map_err(qerr)?;
        let is_aggregation: i64 = row.get(7).map_err(qerr)?;
        let is_error: i64 = row.get(8).map_err(qerr)?;
        let path: String = row.get(9).map_err(qerr)?;
        let created_at: String = row.get(10).map_err(qerr)?;

        Ok(ResultRow {
            id: parse_uuid(&id)?,
            job_id: parse_uuid(&job_id)?,
            artifact_id: parse_uuid(&artifact_id)?,
            producer_id: parse_uuid(&producer_id)?,
            iteration: iteration as u32,
            is_model: is_model != 0,
            is_estimation: is_estimation != 0,
            is_aggregation: is_aggregation != 0,
            is_error: is_error != 0,
            path,
            created_at: parse_dt(&created_at)?,
        })
    }
}

#[async_trait]
impl ResultRepository for LibsqlResultRepository {
    async fn create(&self, transaction_handle: &mut TransactionHandle, result: &ResultRow) -> Result<()> {
        let t = transaction(transaction_handle)?;
        t.execute(
            &format!("INSERT INTO results ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"),
            params![
                result.id.to_string(),
                result.job_id.to_string(),
                result.artifact_id.to_string(),
                result.producer_id.to_string(),
                result.iteration as i64,
                result.is_model as i64,
                result.is_estimation as i64,
                result.is_aggregation as i64,
                result.is_error as i64,
                result.path.clone(),
                result.created_at.to_rfc3339(),
            ],
        )
        .await
        .map_err(qerr)?;
        Ok(())
    }

    async fn find_by_id(&self, transaction_handle: &mut TransactionHandle, id: Uuid) -> Result<ResultRow> {
        let t = transaction(transaction_handle)?;
        let mut rows = t
            .query(
                &format!("SELECT {COLUMNS} FROM results WHERE id = ?1"),
                params![id.to_string()],
            )
            .await
            .map_err(qerr)?;
        let row = rows.next().await.map_err(qerr)?.ok_or(RepoError::NotFound)?;
        Self::map_row(&row)
    }

    async fn find_partial(
        &self,
        transaction_handle: &mut TransactionHandle,
        artifact_id: Uuid,
        producer_id: Uuid,
        iteration: u32,
    ) -> Result<Option<ResultRow>> {
        let t = transaction(transaction_handle)?;
        let mut rows = t
            .query(
                &format!(
                    "SELECT {COLUMNS} FROM results WHERE artifact_id = ?1 AND producer_id = ?2 \
                     AND iteration = ?3 AND is_aggregation = 0 AND is_error = 0"
                ),
                params![artifact_id.to_string(), producer_id.to_string(), iteration as i64],
            )
            .await
            .map_err(qerr)?;
        match rows.next().await.map_err(qerr)? {
            Some(row) => Ok(Some(Self::map_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_aggregated(&self, transaction_handle: &mut TransactionHandle, artifact_id: Uuid, iteration: u32) -> Result<Option<ResultRow>> {
        let t = transaction(transaction_handle)?;
        let mut rows = t
            .query(
                &format!(
                    "SELECT {COLUMNS} FROM results WHERE artifact_id = ?1 AND iteration = ?2 \
                     AND is_aggregation = 1"
                ),
                params![artifact_id.to_string(), iteration as i64],
            )
            .await
            .map_err(qerr)?;
        match rows.next().await.map_err(qerr)? {
            Some(row) => Ok(Some(Self::map_row(&row)?)),
            None => Ok(None),
        }
    }
}
