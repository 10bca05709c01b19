// [libs/infra/db/src/repositories/datasource.rs]
/*!
 * =================================================================
 * APARATO: DATASOURCE LEDGER REPOSITORY
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: PERSISTENCIA DE FUENTES DE DATOS Y SU METADATA DE CARACTERÍSTICAS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. NOMINAL PURITY: nomenclatura física absoluta en cada parámetro de
 *    columna.
 * =================================================================
 */

use async_trait::async_trait;
use fednode_core_repository::{DataSourceRepository, Result, TransactionHandle};
use fednode_domain_models::{DataSource, FeatureMetadata};
use libsql::{params, Row};

use super::transaction;
use super::util::{de_json, parse_uuid, qerr, ser_json};

const COLUMNS: &str = "hash, owner_component_id, columns_json, row_count";

pub struct LibsqlDataSourceRepository;

impl LibsqlDataSourceRepository {
    pub fn new() -> Self {
        Self
    }

    fn map_row(row: &Row) -> Result<DataSource> {
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
impl DataSourceRepository for LibsqlDataSourceRepository {
    async fn upsert(&self, transaction_handle: &mut TransactionHandle, datasource: &DataSource) -> Result<()> {
        let columns_json = ser_json(&datasource.features.columns)?;
        let t = transaction(transaction_handle)?;
        t.execute(
            &format!(
                "INSERT INTO datasources ({COLUMNS}) VALUES (?1, ?2, ?3, ?4) \
                 ON CONFLICT(hash) DO UPDATE SET owner_component_id = excluded.owner_component_id, \
                 columns_json = excluded.columns_json, row_count = excluded.row_count"
            ),
            params![
                datasource.hash.clone(),
                datasource.owner_component_id.to_string(),
                columns_json,
                datasource.features.row_count.map(|n| n as i64),
            ],
        )
        .await
        .map_err(qerr)?;
        Ok(())
    }

    async fn find_by_hash(&self, transaction_handle: &mut TransactionHandle, hash: &str) -> Result<Option<DataSource>> {
        let t = transaction(transaction_handle)?;
        let mut rows = t
            .query(
                &format!("SELECT {COLUMNS} FROM datasources WHERE hash = ?1"),
                params![hash.to_string()],
            )
            .await
            .map_err(qerr)?;
        match rows.next().await.map_err(qerr)? {
            Some(row) => Ok(Some(Self::map_row(&row)?)),
            None => Ok(None),
        }
    }
}
