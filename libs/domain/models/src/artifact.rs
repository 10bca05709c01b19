// [libs/domain/models/src/artifact.rs]
/*!
 * =================================================================
 * APARATO: ARTIFACT DOMAIN MODEL
 * CLASIFICACIÓN: DOMAIN MODEL (ESTRATO L1)
 * RESPONSABILIDAD: PLAN DE EJECUCIÓN, CARGA ÚTIL Y ESTADO PÚBLICO DE UN ARTEFACTO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. NOMINAL PURITY: `ArtifactSubmission` serializa y deserializa sin
 *    asimetría entre workbench y coordinador.
 * =================================================================
 */

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Extract/Transform step the planner hands unchanged to every partial job.
/// The core never interprets this; it is an opaque plan forwarded to the
/// worker that executes the transform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryPlan {
    pub steps: Vec<serde_json::Value>,
}

/// Tagged variant standing in for the source's dynamic model/estimator
/// subclassing (spec.md §9): the core treats both arms as opaque blobs with
/// a capability set implemented outside the core (aggregate, save).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "descriptor")]
pub enum ArtifactPayload {
    Model { tag: String, parameters: serde_json::Value },
    Estimator { tag: String, parameters: serde_json::Value },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AggregationStrategy {
    FederatedAverage,
    Sum,
    PassThrough,
}

/// Load/execution plan: how many rounds, and how the aggregator combines them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionPlan {
    pub iterations: u32,
    pub aggregation_strategy: AggregationStrategy,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArtifactStatusKind {
    Created,
    Scheduled,
    Completed,
    Error,
}

/// Immutable user submission. `id` is assigned on accept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    pub id: Uuid,
    pub project_token: String,
    pub query_plan: QueryPlan,
    pub payload: ArtifactPayload,
    pub execution_plan: ExecutionPlan,
    pub status: ArtifactStatusKind,
    pub current_iteration: u32,
}

/// Submission payload posted to `/workbench/artifact/submit`; identical to
/// `Artifact` minus the server-assigned fields. `Serialize` lets
/// `workbench-cli` build one from a file and send it over the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactSubmission {
    pub project_token: String,
    pub query_plan: QueryPlan,
    pub payload: ArtifactPayload,
    pub execution_plan: ExecutionPlan,
}

/// Response body for submit/status routes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactStatus {
    pub artifact_id: Uuid,
    pub status: ArtifactStatusKind,
    pub current_iteration: u32,
    pub total_iterations: u32,
}
