// [libs/infra/db/src/repositories/mod.rs]
/*!
 * =================================================================
 * APARATO: REPOSITORY MODULE REGISTRY
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: ENSAMBLAJE DE LOS REPOSITORIOS CONCRETOS Y SU PUENTE DE TRANSACCIÓN
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. NOMINAL PURITY: `transaction` descarta el `TransactionHandle` opaco
 *    hacia la transacción libsql concreta.
 * =================================================================
 */

mod util;

pub mod artifact;
pub mod component;
pub mod datasource;
pub mod job;
pub mod kv;
pub mod project;
pub mod result;
pub mod token;

pub use artifact::LibsqlArtifactRepository;
pub use component::LibsqlComponentRepository;
pub use datasource::LibsqlDataSourceRepository;
pub use job::LibsqlJobRepository;
pub use kv::LibsqlKeyValueStore;
pub use project::LibsqlProjectRepository;
pub use result::LibsqlResultRepository;
pub use token::LibsqlTokenRepository;

use fednode_core_repository::{RepoError, Result, TransactionHandle};
use libsql::Transaction;

/// Every repository call is handed a `TransactionHandle` opened by `LibsqlClient::begin`;
/// this downcasts it back to the concrete backend transaction.
pub(crate) fn transaction(transaction_handle: &mut TransactionHandle) -> Result<&Transaction> {
    transaction_handle.downcast_mut::<Transaction>()
        .ok_or_else(|| RepoError::Backend("transaction_handle does not hold a libsql transaction".into()))
}
