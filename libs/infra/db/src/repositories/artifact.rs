// [libs/infra/db/src/repositories/artifact.rs]
/*!
 * =================================================================
 * APARATO: ARTIFACT LEDGER REPOSITORY
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: GESTIÓN DE ESTADOS DEL ARTEFACTO Y SU PLAN DE EJECUCIÓN
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ATOMIC INTEGRITY: las transiciones de `status` jamás retroceden
 *    dentro de una misma transacción.
 * 2. NOMINAL PURITY: sustitución de `tx` y `conn` por descriptores
 *    físicos completos.
 * =================================================================
 */

use async_trait::async_trait;
use fednode_core_repository::{ArtifactRepository, RepoError, Result, TransactionHandle};
use fednode_domain_models::{
    AggregationStrategy, Artifact, ArtifactPayload, ArtifactStatusKind, ExecutionPlan, QueryPlan,
};
use libsql::{params, Row};
use uuid::Uuid;

use super::transaction;
use super::util::{de_enum, de_json, parse_uuid, qerr, ser_enum, ser_json};

const COLUMNS: &str = "id, project_token, query_plan_json, payload_json, iterations, \
    aggregation_strategy, status, current_iteration";

pub struct LibsqlArtifactRepository;

impl LibsqlArtifactRepository {
    pub fn new() -> Self {
        Self
    }

    fn map_row(row: &Row) -> Result<Artifact> {
        let id: String = row.get(0).map_err(qerr)?;
        let project_token: String = row.get(1).map_err(qerr)?;
        let query_plan_json: String = row.get(2).map_err(qerr)?;
        let payload_json: String = row.get(3).map_err(qerr)?;
        let iterations: i64 = row.get(4).map_err(qerr)?;
        let aggregation_strategy: String = row.get(5).map_err(qerr)?;
        let status: String = row.get(6).map_err(qerr)?;
        let current_iteration: i64 = row.get(7).map_err(qerr)?;

        Ok(Artifact {
            id: parse_uuid(&id)?,
            project_token,
            query_plan: QueryPlan {
                steps: de_json(&query_plan_json)?,
            },
            payload: de_json::<ArtifactPayload>(&payload_json)?,
            execution_plan: ExecutionPlan {
                iterations: iterations as u32,
                aggregation_strategy: de_enum::<AggregationStrategy>(&aggregation_strategy)?,
            },
            status: de_enum::<ArtifactStatusKind>(&status)?,
            current_iteration: current_iteration as u32,
        })
    }
}

#[async_trait]
impl ArtifactRepository for LibsqlArtifactRepository {
    async fn create(&self, transaction_handle: &mut TransactionHandle, artifact: &Artifact) -> Result<()> {
        let query_plan_json = ser_json(&artifact.query_plan.steps)?;
        let payload_json = ser_json(&artifact.payload)?;
        let aggregation_strategy = ser_enum(&artifact.execution_plan.aggregation_strategy)?;
        let status = ser_enum(&artifact.status)?;
        let t = transaction(transaction_handle)?;
        t.execute(
            &format!("INSERT INTO artifacts ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"),
            params![
                artifact.id.to_string(),
                artifact.project_token.clone(),
                query_plan_json,
                payload_json,
                artifact.execution_plan.iterations as i64,
                aggregation_strategy,
                status,
                artifact.current_iteration as i64,
            ],
        )
        .await
        .map_err(qerr)?;
        Ok(())
    }

    async fn find_by_id(&self, transaction_handle: &mut TransactionHandle, id: Uuid) -> Result<Artifact> {
        let t = transaction(transaction_handle)?;
        let mut rows = t
            .query(
                &format!("SELECT {COLUMNS} FROM artifacts WHERE id = ?1"),
                params![id.to_string()],
            )
            .await
            .map_err(qerr)?;
        let row = rows.next().await.map_err(qerr)?.ok_or(RepoError::NotFound)?;
        Self::map_row(&row)
    }

    async fn set_status(&self, transaction_handle: &mut TransactionHandle, id: Uuid, status: ArtifactStatusKind) -> Result<()> {
        let status = ser_enum(&status)?;
        let t = transaction(transaction_handle)?;
        t.execute(
            "UPDATE artifacts SET status = ?1 WHERE id = ?2",
            params![status, id.to_string()],
        )
        .await
        .map_err(qerr)?;
        Ok(())
    }

    async fn set_current_iteration(&self, transaction_handle: &mut TransactionHandle, id: Uuid, iteration: u32) -> Result<()> {
        let t = transaction(transaction_handle)?;
        t.execute(
            "UPDATE artifacts SET current_iteration = ?1 WHERE id = ?2",
            params![iteration as i64, id.to_string()],
        )
        .await
        .map_err(qerr)?;
        Ok(())
    }
}
