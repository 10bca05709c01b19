// [libs/infra/db/src/repositories/project.rs]
/*!
 * =================================================================
 * APARATO: PROJECT LEDGER REPOSITORY
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: RESOLUCIÓN DE TOKEN DE PROYECTO HACIA SUS FUENTES DE DATOS REGISTRADAS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ATOMIC INTEGRITY: la unión `project_datasources` se resuelve dentro
 *    de la misma transacción del llamador.
 * =================================================================
 */

use async_trait::async_trait;
use fednode_core_repository::{ProjectRepository, Result, TransactionHandle};
use fednode_domain_models::{DataSource, FeatureMetadata, Project};
use libsql::{params, Row};

use super::transaction;
use super::util::{de_json, parse_uuid, qerr};

pub struct LibsqlProjectRepository;

impl LibsqlProjectRepository {
    pub fn new() -> Self {
        Self
    }

    fn map_datasource_row(row: &Row) -> Result<DataSource> {
        let hash: String = row.get(0).map_err(qerr)?;
        let owner_component_id: String = row.get(1).map_err(qerr)?;
        let columns_json: String = row.get(2).map_err(qerr)?;
        let row_count: Option<i64> = row.get(3).map_err(qerr)?;

        Ok(DataSource {
            hash,
            owner_component_id: parse_uuid(&owner_component_id)?,
            features: FeatureMetadata {
                columns: de_json(&columns_json)?,
                row_count: row_count.map(|n| n as u64),
            },
        })
    }
}

#[async_trait]
impl ProjectRepository for LibsqlProjectRepository {
    async fn create(&self, transaction_handle: &mut TransactionHandle, project: &Project) -> Result<()> {
        let t = transaction(transaction_handle)?;
        t.execute(
            "INSERT INTO projects (token, name) VALUES (?1, ?2)",
            params![project.token.clone(), project.name.clone()],
        )
        .await
        .map_err(qerr)?;
        Ok(())
    }

    async fn find_by_token(&self, transaction_handle: &mut TransactionHandle, token: &str) -> Result<Option<Project>> {
        let t = transaction(transaction_handle)?;
        let mut rows = t
            .query(
                "SELECT token, name FROM projects WHERE token = ?1",
                params![token.to_string()],
            )
            .await
            .map_err(qerr)?;
        match rows.next().await.map_err(qerr)? {
            Some(row) => {
                let token: String = row.get(0).map_err(qerr)?;
                let name: String = row.get(1).map_err(qerr)?;
                Ok(Some(Project { token, name }))
            }
            None => Ok(None),
        }
    }

    async fn attach_datasource(&self, transaction_handle: &mut TransactionHandle, project_token: &str, datasource_hash: &str) -> Result<()> {
        let t = transaction(transaction_handle)?;
        t.execute(
            "INSERT OR IGNORE INTO project_datasources (project_token, datasource_hash) VALUES (?1, ?2)",
            params![project_token.to_string(), datasource_hash.to_string()],
        )
        .await
        .map_err(qerr)?;
        Ok(())
    }

    async fn list_datasources(&self, transaction_handle: &mut TransactionHandle, project_token: &str) -> Result<Vec<DataSource>> {
        let t = transaction(transaction_handle)?;
        let mut rows = t
            .query(
                "SELECT d.hash, d.owner_component_id, d.columns_json, d.row_count \
                 FROM datasources d \
                 JOIN project_datasources pd ON pd.datasource_hash = d.hash \
                 WHERE pd.project_token = ?1",
                params![project_token.to_string()],
            )
            .await
            .map_err(qerr)?;
        let mut out = Vec::new();
        while let Some(row) = rows.next().await.map_err(qerr)? {
            out.push(Self::map_datasource_row(&row)?);
        }
        Ok(out)
    }
}
