// [apps/coordinator/src/blob_store.rs]
/*!
 * =================================================================
 * APARATO: FILESYSTEM BLOB STORE
 * CLASIFICACIÓN: APPLICATION ADAPTER (ESTRATO L4)
 * RESPONSABILIDAD: ALMACÉN DE BLOBS RESPALDADO POR SISTEMA DE ARCHIVOS, RAÍZ workdir/artifacts/
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: la raíz de almacenamiento se crea perezosamente,
 *    nunca por adelantado.
 * =================================================================
 */

use std::path::PathBuf;

use async_trait::async_trait;
use fednode_core_orchestration::BlobStore;
use fednode_domain_models::ResultTag;
use uuid::Uuid;

pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

fn tag_suffix(tag: ResultTag) -> &'static str {
    match tag {
        ResultTag::Partial => "PARTIAL",
        ResultTag::Aggregated => "AGGREGATED",
        ResultTag::Error => "ERROR",
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    fn write_path(&self, artifact_id: Uuid, iteration: u32, job_id: Uuid, tag: ResultTag, extension: &str) -> PathBuf {
        self.root
            .join(artifact_id.to_string())
            .join(iteration.to_string())
            .join(format!("{job_id}.{}.{extension}", tag_suffix(tag)))
    }

    async fn open_for_write(&self, path: &PathBuf) -> std::io::Result<tokio::fs::File> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::File::create(path).await
    }

    async fn open_for_read(&self, path: &PathBuf) -> std::io::Result<tokio::fs::File> {
        tokio::fs::File::open(path).await
    }
}
