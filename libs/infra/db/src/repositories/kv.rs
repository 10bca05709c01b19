// [libs/infra/db/src/repositories/kv.rs]
/*!
 * =================================================================
 * APARATO: KEY-VALUE LEDGER REPOSITORY
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: PERSISTENCIA DE PARES CLAVE-VALOR DE USO INTERNO DEL NÚCLEO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. NOMINAL PURITY: `transaction_handle` en lugar de `tx` en cada firma
 *    de método.
 * =================================================================
 */

use async_trait::async_trait;
use fednode_core_repository::{KeyValueStore, Result, TransactionHandle};
use libsql::params;

use super::transaction;
use super::util::qerr;

pub struct LibsqlKeyValueStore;

impl LibsqlKeyValueStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl KeyValueStore for LibsqlKeyValueStore {
    async fn get(&self, transaction_handle: &mut TransactionHandle, key: &str) -> Result<Option<String>> {
        let t = transaction(transaction_handle)?;
        let mut rows = t
            .query("SELECT value FROM kv_store WHERE key = ?1", params![key.to_string()])
            .await
            .map_err(qerr)?;
        match rows.next().await.map_err(qerr)? {
            Some(row) => Ok(Some(row.get(0).map_err(qerr)?)),
            None => Ok(None),
        }
    }

    async fn set(&self, transaction_handle: &mut TransactionHandle, key: &str, value: &str) -> Result<()> {
        let t = transaction(transaction_handle)?;
        t.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key.to_string(), value.to_string()],
        )
        .await
        .map_err(qerr)?;
        Ok(())
    }

    async fn delete(&self, transaction_handle: &mut TransactionHandle, key: &str) -> Result<()> {
        let t = transaction(transaction_handle)?;
        t.execute("DELETE FROM kv_store WHERE key = ?1", params![key.to_string()])
            .await
            .map_err(qerr)?;
        Ok(())
    }
}
