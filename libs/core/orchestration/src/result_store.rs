// [libs/core/orchestration/src/result_store.rs]
/*!
 * =================================================================
 * APARATO: RESULT STORE
 * CLASIFICACIÓN: CORE LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: ESQUEMA DE RUTAS DE BLOB Y CONSULTAS DE RESULTADO (spec.md §4.6)
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: el esquema de ruta es la única fuente de verdad sobre
 *    dónde vive un blob de resultado.
 * =================================================================
 */

use std::path::PathBuf;

use async_trait::async_trait;
use uuid::Uuid;

use fednode_core_repository::{ResultRepository, TransactionHandle};
use fednode_domain_models::{ResultRow, ResultTag};

use crate::errors::{CoreError, Result};

/// The core never opens a file directly; it asks this for a handle rooted
/// at `workdir/artifacts/` (SPEC_FULL.md §4.6).
#[async_trait]
pub trait BlobStore: Send + Sync {
    fn write_path(&self, artifact_id: Uuid, iteration: u32, job_id: Uuid, tag: ResultTag, extension: &str) -> PathBuf;
    async fn open_for_write(&self, path: &PathBuf) -> std::io::Result<tokio::fs::File>;
    async fn open_for_read(&self, path: &PathBuf) -> std::io::Result<tokio::fs::File>;
}

pub struct ResultStore<'a> {
    pub results: &'a dyn ResultRepository,
    pub blobs: &'a dyn BlobStore,
}

impl<'a> ResultStore<'a> {
    /// `storage/artifacts/<artifact_id>/<iteration>/<job_id>.<tag>`, plus
    /// `.model`/`.estimator` suffix for non-error results.
    pub fn blob_path(&self, artifact_id: Uuid, iteration: u32, job_id: Uuid, tag: ResultTag, extension: &str) -> PathBuf {
        self.blobs.write_path(artifact_id, iteration, job_id, tag, extension)
    }

    pub async fn find_by_id(&self, transaction_handle: &mut TransactionHandle, id: Uuid) -> Result<ResultRow> {
        self.results.find_by_id(transaction_handle, id).await.map_err(CoreError::from)
    }

    pub async fn find_partial(&self, transaction_handle: &mut TransactionHandle, artifact_id: Uuid, producer_id: Uuid, iteration: u32) -> Result<Option<ResultRow>> {
        self.results
            .find_partial(transaction_handle, artifact_id, producer_id, iteration)
            .await
            .map_err(CoreError::from)
    }

    pub async fn find_aggregated(&self, transaction_handle: &mut TransactionHandle, artifact_id: Uuid, iteration: u32) -> Result<Option<ResultRow>> {
        self.results
            .find_aggregated(transaction_handle, artifact_id, iteration)
            .await
            .map_err(CoreError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_scheme_matches_spec() {
        struct FsBlobStore;
        #[async_trait]
        impl BlobStore for FsBlobStore {
            fn write_path(&self, artifact_id: Uuid, iteration: u32, job_id: Uuid, tag: ResultTag, extension: &str) -> PathBuf {
                PathBuf::from(format!(
                    "storage/artifacts/{artifact_id}/{iteration}/{job_id}.{tag:?}.{extension}"
                ))
            }
            async fn open_for_write(&self, path: &PathBuf) -> std::io::Result<tokio::fs::File> {
                tokio::fs::File::create(path).await
            }
            async fn open_for_read(&self, path: &PathBuf) -> std::io::Result<tokio::fs::File> {
                tokio::fs::File::open(path).await
            }
        }

        let artifact_id = Uuid::new_v4();
        let job_id = Uuid::new_v4();
        let store = FsBlobStore;
        let path = store.write_path(artifact_id, 0, job_id, ResultTag::Partial, "model");
        assert!(path.to_string_lossy().starts_with(&format!("storage/artifacts/{artifact_id}/0/{job_id}")));
    }
}
