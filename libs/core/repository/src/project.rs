// [libs/core/repository/src/project.rs]
/*!
 * =================================================================
 * APARATO: PROJECT REPOSITORY CONTRACT
 * CLASIFICACIÓN: CORE ABSTRACTION (ESTRATO L2)
 * RESPONSABILIDAD: INTERFAZ DE RESOLUCIÓN DE PROYECTO Y SUS FUENTES DE DATOS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: el núcleo de planificación nunca conoce SQL, sólo
 *    este contrato.
 * =================================================================
 */

use async_trait::async_trait;
use fednode_domain_models::{DataSource, Project};

use crate::errors::Result;
use crate::transaction_handle::TransactionHandle;

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn create(&self, transaction_handle: &mut TransactionHandle, project: &Project) -> Result<()>;
    async fn find_by_token(&self, transaction_handle: &mut TransactionHandle, token: &str) -> Result<Option<Project>>;

    /// Records a `Project ↔ DataSource` join row, never an owning pointer
    /// in either direction (design notes §9).
    async fn attach_datasource(&self, transaction_handle: &mut TransactionHandle, project_token: &str, datasource_hash: &str) -> Result<()>;

    async fn list_datasources(&self, transaction_handle: &mut TransactionHandle, project_token: &str) -> Result<Vec<DataSource>>;
}
