// [apps/coordinator/src/handlers/workbench.rs]
/*!
 * =================================================================
 * APARATO: WORKBENCH INGRESS HANDLERS
 * CLASIFICACIÓN: APPLICATION ADAPTER (ESTRATO L4)
 * RESPONSABILIDAD: /workbench/artifact/submit, /workbench/artifact/status, /workbench/result (spec.md §4.4/§6)
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: superficie exclusiva del componente USER; nunca
 *    alcanzable por CLIENT/NODE/WORKER.
 * =================================================================
 */

use std::path::PathBuf;

use axum::extract::{Extension, Path, State};
use axum::Json;
use fednode_core_crypto::SignedBody;
use fednode_core_orchestration::{BlobStore, CoreError};
use fednode_core_repository::{ArtifactRepository, Database};
use fednode_domain_models::{Artifact, ArtifactStatus, ArtifactStatusKind, ArtifactSubmission, ComponentType};
use tokio::io::AsyncReadExt;
use uuid::Uuid;

use crate::errors::{ApiError, ApiResult};
use crate::middleware::AuthContext;
use crate::state::AppState;

fn require_user(auth: &AuthContext) -> ApiResult<()> {
    if auth.component.component_type == ComponentType::User {
        Ok(())
    } else {
        Err(ApiError::from(CoreError::AccessDenied))
    }
}

/// `POST /workbench/artifact/submit`: accepts the artifact, assigns it an
/// id, and expands it into its iteration-0 job DAG in one transaction.
pub async fn submit_artifact(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(body): Json<SignedBody>,
) -> ApiResult<Json<SignedBody>> {
    require_user(&auth)?;

    let submission: ArtifactSubmission = super::decode_signed(&state, &auth, &body)?;
    let artifact = Artifact {
        id: Uuid::new_v4(),
        project_token: submission.project_token,
        query_plan: submission.query_plan,
        payload: submission.payload,
        execution_plan: submission.execution_plan,
        status: ArtifactStatusKind::Created,
        current_iteration: 0,
    };

    let mut transaction_handle = state.db.begin().await.map_err(CoreError::from)?;
    state.artifacts.create(&mut transaction_handle, &artifact).await.map_err(CoreError::from)?;
    state.planner().plan(&mut transaction_handle, &artifact).await?;
    state.db.commit(transaction_handle).await.map_err(CoreError::from)?;

    let status = ArtifactStatus {
        artifact_id: artifact.id,
        status: ArtifactStatusKind::Scheduled,
        current_iteration: 0,
        total_iterations: artifact.execution_plan.iterations,
    };
    Ok(Json(super::encode_signed(&state, &auth, &status)?))
}

/// `GET /workbench/artifact/status/{id}`.
pub async fn artifact_status(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(artifact_id): Path<Uuid>,
) -> ApiResult<Json<SignedBody>> {
    require_user(&auth)?;

    let mut transaction_handle = state.db.begin().await.map_err(CoreError::from)?;
    let artifact = state.artifacts.find_by_id(&mut transaction_handle, artifact_id).await.map_err(CoreError::from)?;
    state.db.rollback(transaction_handle).await.ok();

    let status = ArtifactStatus {
        artifact_id: artifact.id,
        status: artifact.status,
        current_iteration: artifact.current_iteration,
        total_iterations: artifact.execution_plan.iterations,
    };
    Ok(Json(super::encode_signed(&state, &auth, &status)?))
}

/// `GET /workbench/result/{id}`: lets the submitting user download the
/// final aggregated blob (or any intermediate result) by id.
pub async fn download_result(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(result_id): Path<Uuid>,
) -> ApiResult<Vec<u8>> {
    require_user(&auth)?;

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
