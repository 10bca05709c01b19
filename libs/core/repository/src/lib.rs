// [libs/core/repository/src/lib.rs]
/*!
 * =================================================================
 * APARATO: REPOSITORY CONTRACTS REGISTRY
 * CLASIFICACIÓN: CORE ABSTRACTION (ESTRATO L2)
 * RESPONSABILIDAD: PUNTO DE ENTRADA PÚBLICO DE TODA INTERFAZ DE PERSISTENCIA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. NOMINAL PURITY: re-exporta `TransactionHandle`, jamás el abreviado
 *    `Tx` original.
 * =================================================================
 */

pub mod artifact;
pub mod component;
pub mod database;
pub mod datasource;
pub mod errors;
pub mod job;
pub mod kv;
pub mod project;
pub mod result;
pub mod token;
pub mod transaction_handle;

pub use artifact::ArtifactRepository;
pub use component::ComponentRepository;
pub use database::Database;
pub use datasource::DataSourceRepository;
pub use errors::{RepoError, Result};
pub use job::JobRepository;
pub use kv::KeyValueStore;
pub use project::ProjectRepository;
pub use result::ResultRepository;
pub use token::TokenRepository;
pub use transaction_handle::TransactionHandle;
