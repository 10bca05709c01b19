// [libs/core/repository/src/database.rs]
/*!
 * =================================================================
 * APARATO: TRANSACTION BOUNDARY CONTRACT
 * CLASIFICACIÓN: CORE ABSTRACTION (ESTRATO L2)
 * RESPONSABILIDAD: APERTURA, COMMIT Y ROLLBACK DE LA TRANSACCIÓN POR SOLICITUD
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. NOMINAL PURITY: `TransactionHandle` sustituye cualquier alias
 *    abreviado de transacción en la frontera pública.
 * =================================================================
 */

use async_trait::async_trait;

use crate::errors::Result;
use crate::transaction_handle::TransactionHandle;

/// Opens and closes the request-scoped transaction the core composes its
/// repository calls against (spec §4.3, §5).
#[async_trait]
pub trait Database: Send + Sync {
    async fn begin(&self) -> Result<TransactionHandle>;
    async fn commit(&self, transaction_handle: TransactionHandle) -> Result<()>;
    async fn rollback(&self, transaction_handle: TransactionHandle) -> Result<()>;
}
