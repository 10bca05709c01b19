// [apps/coordinator/src/handlers/worker.rs]
/*!
 * =================================================================
 * APARATO: WORKER TASK HANDLERS
 * CLASIFICACIÓN: APPLICATION ADAPTER (ESTRATO L4)
 * RESPONSABILIDAD: /worker/task, /worker/result, /worker/error (spec.md §4.5/§4.6/§4.7/§6)
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ATOMIC INTEGRITY: un `TaskError` cancela la iteración completa
 *    dentro de la misma transacción que lo registra.
 * =================================================================
 */

use std::path::PathBuf;

use axum::body::Bytes;
use axum::extract::{Extension, Path, State};
use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;
use fednode_core_crypto::{public_key_from_pem, verify_claim, SignedBody};
use fednode_core_orchestration::{BlobStore, CoreError};
use fednode_core_repository::{ArtifactRepository, Database, JobRepository};
use fednode_domain_models::{ArtifactPayload, ComponentType, JobKind, ResultRow, ResultTag, TaskError};
use sha2::{Digest, Sha256};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use uuid::Uuid;

use crate::errors::{ApiError, ApiResult};
use crate::middleware::AuthContext;
use crate::state::AppState;

fn require_worker(auth: &AuthContext) -> ApiResult<()> {
    if matches!(auth.component.component_type, ComponentType::Worker | ComponentType::Node) {
        Ok(())
    } else {
        Err(ApiError::from(CoreError::AccessDenied))
    }
}

/// `GET /worker/task/{job_id}`: the encrypted task descriptor, wrapped for
/// the calling worker's own session key.
pub async fn fetch_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(job_id): Path<Uuid>,
) -> ApiResult<Json<SignedBody>> {
    require_worker(&auth)?;

    let worker_public_key = public_key_from_pem(&auth.component.public_key_pem)?;
    let mut transaction_handle = state.db.begin().await.map_err(CoreError::from)?;
    let scheduler = state.scheduler();
    let update_service = state.update_service(&scheduler);
    let params = update_service.task_parameters(&mut transaction_handle, job_id, &worker_public_key).await?;
    state.db.commit(transaction_handle).await.map_err(CoreError::from)?;

    Ok(Json(super::encode_signed(&state, &auth, &params)?))
}

/// `POST /worker/result/{job_id}`: raw result blob, authenticated by an
/// `X-Signature` header (hex-encoded `sign_claim` over the hex SHA-256
/// digest of the body) rather than the `SignedBody` envelope — the payload
/// itself is an opaque model/estimator blob, not JSON.
pub async fn upload_result(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(job_id): Path<Uuid>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<()> {
    require_worker(&auth)?;

    let signature_header = headers
        .get("X-Signature")
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::from(CoreError::AccessDenied))?;
    let signature =
        hex::decode(signature_header).map_err(|_| ApiError::from(CoreError::AccessDenied))?;
    let digest = hex::encode(Sha256::digest(&body));
    let public_key = public_key_from_pem(&auth.component.public_key_pem)?;
    verify_claim(&public_key, &digest, &signature).map_err(|_| ApiError::from(CoreError::AccessDenied))?;

    let mut transaction_handle = state.db.begin().await.map_err(CoreError::from)?;
    let job = state.jobs.find_by_id(&mut transaction_handle, job_id).await.map_err(CoreError::from)?;
    if job.component_id != auth.component.id {
        state.db.rollback(transaction_handle).await.ok();
        return Err(ApiError::from(CoreError::AccessDenied));
    }
    let artifact = state.artifacts.find_by_id(&mut transaction_handle, job.artifact_id).await.map_err(CoreError::from)?;

    let (is_model, is_estimation, extension) = match &artifact.payload {
        ArtifactPayload::Model { .. } => (true, false, "model"),
        ArtifactPayload::Estimator { .. } => (false, true, "estimator"),
    };
    let is_aggregation = job.kind == JobKind::Aggregation;
    let tag = if is_aggregation { ResultTag::Aggregated } else { ResultTag::Partial };

    let result_store = state.result_store();
    let path = result_store.blob_path(job.artifact_id, job.iteration, job_id, tag, extension);
    let mut file = state
        .blobs
        .open_for_write(&path)
        .await
        .map_err(|e| CoreError::Internal(e.to_string()))?;
    file.write_all(&body).await.map_err(|e| CoreError::Internal(e.to_string()))?;

    let result = ResultRow {
        id: Uuid::new_v4(),
        job_id,
        artifact_id: job.artifact_id,
        producer_id: auth.component.id,
        iteration: job.iteration,
        is_model,
        is_estimation,
        is_aggregation,
        is_error: false,
        path: path.to_string_lossy().into_owned(),
        created_at: Utc::now(),
    };

    let scheduler = state.scheduler();
    scheduler.complete_job(&mut transaction_handle, job_id, result, Utc::now()).await?;
    state.db.commit(transaction_handle).await.map_err(CoreError::from)?;

    Ok(())
}

/// `POST /worker/error`: a worker gives up on its job. Errors are terminal
/// and never retried by the core (spec §4.5).
pub async fn report_error(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(body): Json<SignedBody>,
) -> ApiResult<Json<SignedBody>> {
    require_worker(&auth)?;

    let task_error: TaskError = super::decode_signed(&state, &auth, &body)?;
    let mut transaction_handle = state.db.begin().await.map_err(CoreError::from)?;
    let job = state.jobs.find_by_id(&mut transaction_handle, task_error.job_id).await.map_err(CoreError::from)?;
    if job.component_id != auth.component.id {
        state.db.rollback(transaction_handle).await.ok();
        return Err(ApiError::from(CoreError::AccessDenied));
    }

    let scheduler = state.scheduler();
    scheduler
        .fail_job(&mut transaction_handle, task_error.job_id, &task_error.reason, Utc::now())
        .await?;
    state.db.commit(transaction_handle).await.map_err(CoreError::from)?;

    Ok(Json(super::encode_signed(&state, &auth, &())?))
}

/// `GET /worker/result/{result_id}`: lets an aggregator pull the partial
/// blobs it needs to combine.
pub async fn download_result(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(result_id): Path<Uuid>,
) -> ApiResult<Vec<u8>> {
    require_worker(&auth)?;

    let mut transaction_handle = state.db.begin().await.map_err(CoreError::from)?;
    let row = state.result_store().find_by_id(&mut transaction_handle, result_id).await?;
    state.db.rollback(transaction_handle).await.ok();

    let path = PathBuf::from(&row.path);
    let mut file = state
        .blobs
        .open_for_read(&path)
        .await
        .map_err(|e| CoreError::Internal(e.to_string()))?;
    let mut buf = Vec::new();
    file.read_to_end(&mut buf).await.map_err(|e| CoreError::Internal(e.to_string()))?;
    Ok(buf)
}
