// [libs/core/orchestration/src/planner.rs]
/*!
 * =================================================================
 * APARATO: ARTIFACT DAG PLANNER
 * CLASIFICACIÓN: CORE LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: EXPANSIÓN DE UN ARTEFACTO ACEPTADO HACIA SUS TRABAJOS DE ITERACIÓN CERO (spec.md §4.4)
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ATOMIC INTEGRITY: ningún CLIENT puede convertirse silenciosamente en
 *    agregador; ausencia de NODE/WORKER es un error explícito.
 * 2. NOMINAL PURITY: `pick_aggregator` ya no arrastra un parámetro sin
 *    uso tras eliminar el fallback.
 *
 * # Mathematical Proof:
 * El desempate por id mínimo es determinista: dos llamadas a `pick_aggregator`
 * con el mismo conjunto de candidatos siempre producen el mismo agregador.
 * =================================================================
 */

use std::collections::BTreeMap;

use uuid::Uuid;

use fednode_core_repository::{
    ArtifactRepository, ComponentRepository, DataSourceRepository, JobRepository,
    ProjectRepository, TransactionHandle,
};
use fednode_domain_models::{
    Artifact, ArtifactStatusKind, ComponentType, Job, JobKind, JobStatus,
};

use crate::errors::{CoreError, Result};

/// Datasource hashes grouped by owning component (spec.md §4.4 step 1).
pub type PartialSet = BTreeMap<Uuid, Vec<String>>;

pub struct Planner<'a> {
    pub artifacts: &'a dyn ArtifactRepository,
    pub projects: &'a dyn ProjectRepository,
    pub datasources: &'a dyn DataSourceRepository,
    pub components: &'a dyn ComponentRepository,
    pub jobs: &'a dyn JobRepository,
}

impl<'a> Planner<'a> {
    /// Expands an accepted artifact into its iteration-0 jobs and records
    /// the plan on the artifact row. `artifact` must already have been
    /// assigned an `id` and persisted with `status=CREATED`.
    pub async fn plan(&self, transaction_handle: &mut TransactionHandle, artifact: &Artifact) -> Result<()> {
        let datasources = self.projects.list_datasources(transaction_handle, &artifact.project_token).await?;
        if datasources.is_empty() {
            return Err(CoreError::InvalidArtifact("project resolves to zero datasources".into()));
        }
        if artifact.execution_plan.iterations < 1 {
            return Err(CoreError::InvalidArtifact("iterations must be >= 1".into()));
        }

        let mut partial_set: PartialSet = BTreeMap::new();
        for datasource in &datasources {
            partial_set
                .entry(datasource.owner_component_id)
                .or_default()
                .push(datasource.hash.clone());
        }

        self.artifacts
            .set_status(transaction_handle, artifact.id, ArtifactStatusKind::Scheduled)
            .await?;

        for (component_id, content_ids) in &partial_set {
            let job = Job {
                id: Uuid::new_v4(),
                artifact_id: artifact.id,
                component_id: *component_id,
                iteration: 0,
                kind: JobKind::Partial,
                status: JobStatus::Scheduled,
                content_ids: content_ids.clone(),
                created_at: chrono::Utc::now(),
                started_at: None,
                ended_at: None,
            };
            self.jobs.create(transaction_handle, &job).await?;
        }

        let aggregator_id = self.pick_aggregator(transaction_handle).await?;
        let aggregation_job = Job {
            id: Uuid::new_v4(),
            artifact_id: artifact.id,
            component_id: aggregator_id,
            iteration: 0,
            kind: JobKind::Aggregation,
            status: JobStatus::Created,
            content_ids: Vec::new(),
            created_at: chrono::Utc::now(),
            started_at: None,
            ended_at: None,
        };
        self.jobs.create(transaction_handle, &aggregation_job).await?;

        self.artifacts.set_current_iteration(transaction_handle, artifact.id, 0).await?;
        Ok(())
    }

    /// Any `NODE` or `WORKER`; deterministic tie-break on lowest id (spec
    /// §4.4 step 4). There is no fallback to a CLIENT holding datasources —
    /// a CLIENT is never a valid aggregator, so an artifact whose project
    /// has no registered NODE/WORKER is rejected outright rather than
    /// silently handed to one.
    async fn pick_aggregator(&self, transaction_handle: &mut TransactionHandle) -> Result<Uuid> {
        let mut candidates = Vec::new();
        for component_type in [ComponentType::Node, ComponentType::Worker] {
            candidates.extend(self.components.list_by_type(transaction_handle, component_type).await?);
        }
        candidates
            .into_iter()
            .map(|c| c.id)
            .min()
            .ok_or_else(|| CoreError::InvalidArtifact("no NODE or WORKER available to act as aggregator".into()))
    }
}
