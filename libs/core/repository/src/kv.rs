// [libs/core/repository/src/kv.rs]
/*!
 * =================================================================
 * APARATO: KEY-VALUE STORE CONTRACT
 * CLASIFICACIÓN: CORE ABSTRACTION (ESTRATO L2)
 * RESPONSABILIDAD: INTERFAZ DE ALMACÉN CLAVE-VALOR INDEPENDIENTE DEL BACKEND CONCRETO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: ningún tipo de libsql atraviesa esta frontera.
 * =================================================================
 */

use async_trait::async_trait;

use crate::errors::Result;
use crate::transaction_handle::TransactionHandle;

/// Catch-all node-wide state: the last-issued artifact ordinal, feature
/// flags (design notes §9, `KeyValueStore` supplement).
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, transaction_handle: &mut TransactionHandle, key: &str) -> Result<Option<String>>;
    async fn set(&self, transaction_handle: &mut TransactionHandle, key: &str, value: &str) -> Result<()>;
    async fn delete(&self, transaction_handle: &mut TransactionHandle, key: &str) -> Result<()>;
}
