// [libs/core/orchestration/tests/scheduling.rs]
/*!
 * =================================================================
 * APARATO: SCHEDULING SCENARIO AUDIT SUITE
 * CLASIFICACIÓN: TEST HARNESS (ESTRATO L2)
 * RESPONSABILIDAD: ESCENARIOS DE EXTREMO A EXTREMO SOBRE EL PLANIFICADOR
 * Y EL DESPACHADOR CONTRA REPOSITORIOS FALSOS EN MEMORIA (spec.md §8)
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. TEST PARITY: cada escenario de §8 (2 a 6) tiene su propia prueba
 *    nombrada por el comportamiento que certifica, no por su número.
 * 2. HYGIENE TOTAL: los repositorios falsos viven sólo en este archivo;
 *    ningún binario de producción depende de ellos.
 * =================================================================
 */

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use fednode_core_orchestration::{Planner, Scheduler};
use fednode_core_repository::{
    ArtifactRepository, ComponentRepository, DataSourceRepository, JobRepository,
    ProjectRepository, RepoError, ResultRepository, TransactionHandle,
};
use fednode_domain_models::{
    AggregationStrategy, Artifact, ArtifactPayload, ArtifactStatusKind, Component, ComponentType,
    DataSource, ExecutionPlan, FeatureMetadata, Job, JobKind, JobStatus, NetworkCoordinates,
    Project, QueryPlan, ResultRow,
};

#[derive(Default)]
struct FakeArtifacts(Mutex<HashMap<Uuid, Artifact>>);

#[async_trait]
impl ArtifactRepository for FakeArtifacts {
    async fn create(&self, _tx: &mut TransactionHandle, artifact: &Artifact) -> fednode_core_repository::Result<()> {
        self.0.lock().unwrap().insert(artifact.id, artifact.clone());
        Ok(())
    }
    async fn find_by_id(&self, _tx: &mut TransactionHandle, id: Uuid) -> fednode_core_repository::Result<Artifact> {
        self.0.lock().unwrap().get(&id).cloned().ok_or(RepoError::NotFound)
    }
    async fn set_status(&self, _tx: &mut TransactionHandle, id: Uuid, status: ArtifactStatusKind) -> fednode_core_repository::Result<()> {
        self.0.lock().unwrap().get_mut(&id).ok_or(RepoError::NotFound)?.status = status;
        Ok(())
    }
    async fn set_current_iteration(&self, _tx: &mut TransactionHandle, id: Uuid, iteration: u32) -> fednode_core_repository::Result<()> {
        self.0.lock().unwrap().get_mut(&id).ok_or(RepoError::NotFound)?.current_iteration = iteration;
        Ok(())
    }
}

#[derive(Default)]
struct FakeComponents(Mutex<HashMap<Uuid, Component>>);

#[async_trait]
impl ComponentRepository for FakeComponents {
    async fn create(&self, _tx: &mut TransactionHandle, component: &Component) -> fednode_core_repository::Result<()> {
        self.0.lock().unwrap().insert(component.id, component.clone());
        Ok(())
    }
    async fn find_by_id(&self, _tx: &mut TransactionHandle, id: Uuid) -> fednode_core_repository::Result<Component> {
        self.0.lock().unwrap().get(&id).cloned().ok_or(RepoError::NotFound)
    }
    async fn find_by_public_key(&self, _tx: &mut TransactionHandle, public_key_pem: &str) -> fednode_core_repository::Result<Option<Component>> {
        Ok(self.0.lock().unwrap().values().find(|c| c.public_key_pem == public_key_pem).cloned())
    }
    async fn find_by_machine(&self, _tx: &mut TransactionHandle, mac_address: &str, machine_node: &str) -> fednode_core_repository::Result<Option<Component>> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .values()
            .find(|c| c.mac_address.as_deref() == Some(mac_address) && c.machine_node.as_deref() == Some(machine_node))
            .cloned())
    }
    async fn list_by_type(&self, _tx: &mut TransactionHandle, component_type: ComponentType) -> fednode_core_repository::Result<Vec<Component>> {
        Ok(self.0.lock().unwrap().values().filter(|c| c.component_type == component_type).cloned().collect())
    }
    async fn set_active(&self, _tx: &mut TransactionHandle, id: Uuid, active: bool) -> fednode_core_repository::Result<()> {
        self.0.lock().unwrap().get_mut(&id).ok_or(RepoError::NotFound)?.active = active;
        Ok(())
    }
    async fn mark_left(&self, _tx: &mut TransactionHandle, id: Uuid) -> fednode_core_repository::Result<()> {
        self.0.lock().unwrap().get_mut(&id).ok_or(RepoError::NotFound)?.left = true;
        Ok(())
    }
}

#[derive(Default)]
struct FakeDataSources(Mutex<HashMap<String, DataSource>>);

#[async_trait]
impl DataSourceRepository for FakeDataSources {
    async fn upsert(&self, _tx: &mut TransactionHandle, datasource: &DataSource) -> fednode_core_repository::Result<()> {
        self.0.lock().unwrap().insert(datasource.hash.clone(), datasource.clone());
        Ok(())
    }
    async fn find_by_hash(&self, _tx: &mut TransactionHandle, hash: &str) -> fednode_core_repository::Result<Option<DataSource>> {
        Ok(self.0.lock().unwrap().get(hash).cloned())
    }
}

#[derive(Default)]
struct FakeProjects {
    projects: Mutex<HashMap<String, Project>>,
    joins: Mutex<HashMap<String, Vec<String>>>,
    datasources: FakeDataSources,
}

#[async_trait]
impl ProjectRepository for FakeProjects {
    async fn create(&self, _tx: &mut TransactionHandle, project: &Project) -> fednode_core_repository::Result<()> {
        self.projects.lock().unwrap().insert(project.token.clone(), project.clone());
        Ok(())
    }
    async fn find_by_token(&self, _tx: &mut TransactionHandle, token: &str) -> fednode_core_repository::Result<Option<Project>> {
        Ok(self.projects.lock().unwrap().get(token).cloned())
    }
    async fn attach_datasource(&self, _tx: &mut TransactionHandle, project_token: &str, datasource_hash: &str) -> fednode_core_repository::Result<()> {
        self.joins.lock().unwrap().entry(project_token.to_string()).or_default().push(datasource_hash.to_string());
        Ok(())
    }
    async fn list_datasources(&self, transaction_handle: &mut TransactionHandle, project_token: &str) -> fednode_core_repository::Result<Vec<DataSource>> {
        let hashes = self.joins.lock().unwrap().get(project_token).cloned().unwrap_or_default();
        let mut out = Vec::new();
        for hash in hashes {
            if let Some(ds) = self.datasources.find_by_hash(transaction_handle, &hash).await? {
                out.push(ds);
            }
        }
        Ok(out)
    }
}

#[derive(Default)]
struct FakeJobs(Mutex<HashMap<Uuid, Job>>);

#[async_trait]
impl JobRepository for FakeJobs {
    async fn create(&self, _tx: &mut TransactionHandle, job: &Job) -> fednode_core_repository::Result<()> {
        self.0.lock().unwrap().insert(job.id, job.clone());
        Ok(())
    }
    async fn find_by_id(&self, _tx: &mut TransactionHandle, id: Uuid) -> fednode_core_repository::Result<Job> {
        self.0.lock().unwrap().get(&id).cloned().ok_or(RepoError::NotFound)
    }
    async fn find_oldest_scheduled_for_component(&self, _tx: &mut TransactionHandle, component_id: Uuid) -> fednode_core_repository::Result<Option<Job>> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .values()
            .filter(|j| j.component_id == component_id && j.status == JobStatus::Scheduled)
            .min_by_key(|j| j.created_at)
            .cloned())
    }
    async fn try_transition(&self, _tx: &mut TransactionHandle, id: Uuid, expected: JobStatus, next: JobStatus) -> fednode_core_repository::Result<bool> {
        let mut jobs = self.0.lock().unwrap();
        let job = jobs.get_mut(&id).ok_or(RepoError::NotFound)?;
        if job.status == expected {
            job.status = next;
            Ok(true)
        } else {
            Ok(false)
        }
    }
    async fn append_content_id(&self, _tx: &mut TransactionHandle, id: Uuid, content_id: &str) -> fednode_core_repository::Result<()> {
        self.0.lock().unwrap().get_mut(&id).ok_or(RepoError::NotFound)?.content_ids.push(content_id.to_string());
        Ok(())
    }
    async fn list_by_artifact_iteration(&self, _tx: &mut TransactionHandle, artifact_id: Uuid, iteration: u32) -> fednode_core_repository::Result<Vec<Job>> {
        Ok(self.0.lock().unwrap().values().filter(|j| j.artifact_id == artifact_id && j.iteration == iteration).cloned().collect())
    }
    async fn reclaim_expired_leases(&self, _tx: &mut TransactionHandle, older_than: chrono::DateTime<Utc>) -> fednode_core_repository::Result<u64> {
        let mut jobs = self.0.lock().unwrap();
        let mut count = 0;
        for job in jobs.values_mut() {
            if job.status == JobStatus::Running && job.started_at.map(|t| t < older_than).unwrap_or(false) {
                job.status = JobStatus::Scheduled;
                count += 1;
            }
        }
        Ok(count)
    }
    async fn mark_started(&self, _tx: &mut TransactionHandle, id: Uuid, at: chrono::DateTime<Utc>) -> fednode_core_repository::Result<()> {
        self.0.lock().unwrap().get_mut(&id).ok_or(RepoError::NotFound)?.started_at = Some(at);
        Ok(())
    }
    async fn mark_ended(&self, _tx: &mut TransactionHandle, id: Uuid, status: JobStatus, at: chrono::DateTime<Utc>) -> fednode_core_repository::Result<()> {
        let mut jobs = self.0.lock().unwrap();
        let job = jobs.get_mut(&id).ok_or(RepoError::NotFound)?;
        job.status = status;
        job.ended_at = Some(at);
        Ok(())
    }
}

#[derive(Default)]
struct FakeResults(Mutex<HashMap<Uuid, ResultRow>>);

#[async_trait]
impl ResultRepository for FakeResults {
    async fn create(&self, _tx: &mut TransactionHandle, result: &ResultRow) -> fednode_core_repository::Result<()> {
        self.0.lock().unwrap().insert(result.id, result.clone());
        Ok(())
    }
    async fn find_by_id(&self, _tx: &mut TransactionHandle, id: Uuid) -> fednode_core_repository::Result<ResultRow> {
        self.0.lock().unwrap().get(&id).cloned().ok_or(RepoError::NotFound)
    }
    async fn find_partial(&self, _tx: &mut TransactionHandle, artifact_id: Uuid, producer_id: Uuid, iteration: u32) -> fednode_core_repository::Result<Option<ResultRow>> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .values()
            .find(|r| r.artifact_id == artifact_id && r.producer_id == producer_id && r.iteration == iteration && !r.is_aggregation)
            .cloned())
    }
    async fn find_aggregated(&self, _tx: &mut TransactionHandle, artifact_id: Uuid, iteration: u32) -> fednode_core_repository::Result<Option<ResultRow>> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .values()
            .find(|r| r.artifact_id == artifact_id && r.iteration == iteration && r.is_aggregation)
            .cloned())
    }
}

fn new_component(component_type: ComponentType) -> Component {
    Component {
        id: Uuid::new_v4(),
        component_type,
        public_key_pem: format!("pk-{}", Uuid::new_v4()),
        network: NetworkCoordinates { ip_address: "127.0.0.1".into(), port: Some(9000) },
        mac_address: None,
        machine_node: None,
        active: true,
        left: false,
        created_at: Utc::now(),
    }
}

fn new_datasource(owner: Uuid) -> DataSource {
    DataSource {
        hash: format!("ds-{}", Uuid::new_v4()),
        owner_component_id: owner,
        features: FeatureMetadata { columns: vec!["a".into()], row_count: Some(10) },
    }
}

struct Harness {
    artifacts: FakeArtifacts,
    components: FakeComponents,
    projects: FakeProjects,
    jobs: FakeJobs,
    results: FakeResults,
}

impl Harness {
    fn new() -> Self {
        Self {
            artifacts: FakeArtifacts::default(),
            components: FakeComponents::default(),
            projects: FakeProjects::default(),
            jobs: FakeJobs::default(),
            results: FakeResults::default(),
        }
    }

    fn planner(&self) -> Planner<'_> {
        Planner {
            artifacts: &self.artifacts,
            projects: &self.projects,
            datasources: &self.projects.datasources,
            components: &self.components,
            jobs: &self.jobs,
        }
    }

    fn scheduler(&self) -> Scheduler<'_> {
        Scheduler {
            jobs: &self.jobs,
            results: &self.results,
            artifacts: &self.artifacts,
            lease_duration: Duration::seconds(120),
        }
    }
}

fn sample_artifact(project_token: &str, iterations: u32) -> Artifact {
    Artifact {
        id: Uuid::new_v4(),
        project_token: project_token.to_string(),
        query_plan: QueryPlan { steps: vec![] },
        payload: ArtifactPayload::Model { tag: "linear".into(), parameters: serde_json::json!({}) },
        execution_plan: ExecutionPlan { iterations, aggregation_strategy: AggregationStrategy::FederatedAverage },
        status: ArtifactStatusKind::Created,
        current_iteration: 0,
    }
}

#[tokio::test]
async fn planner_rejects_artifact_with_zero_datasources() {
    let harness = Harness::new();
    let mut transaction_handle = TransactionHandle::new(());
    harness.projects.create(&mut transaction_handle, &Project { token: "proj-1".into(), name: "p".into() }).await.unwrap();

    let artifact = sample_artifact("proj-1", 2);
    harness.artifacts.create(&mut transaction_handle, &artifact).await.unwrap();

    let result = harness.planner().plan(&mut transaction_handle, &artifact).await;
    assert!(matches!(result, Err(fednode_core_orchestration::CoreError::InvalidArtifact(_))));
}

#[tokio::test]
async fn planner_creates_one_partial_job_per_owning_component_plus_aggregation() {
    let harness = Harness::new();
    let mut transaction_handle = TransactionHandle::new(());

    let client_a = new_component(ComponentType::Client);
    let client_b = new_component(ComponentType::Client);
    let aggregator = new_component(ComponentType::Node);
    for c in [&client_a, &client_b, &aggregator] {
        harness.components.create(&mut transaction_handle, c).await.unwrap();
    }

    harness.projects.create(&mut transaction_handle, &Project { token: "proj-1".into(), name: "p".into() }).await.unwrap();
    let ds_a = new_datasource(client_a.id);
    let ds_b = new_datasource(client_b.id);
    harness.projects.datasources.upsert(&mut transaction_handle, &ds_a).await.unwrap();
    harness.projects.datasources.upsert(&mut transaction_handle, &ds_b).await.unwrap();
    harness.projects.attach_datasource(&mut transaction_handle, "proj-1", &ds_a.hash).await.unwrap();
    harness.projects.attach_datasource(&mut transaction_handle, "proj-1", &ds_b.hash).await.unwrap();

    let artifact = sample_artifact("proj-1", 2);
    harness.artifacts.create(&mut transaction_handle, &artifact).await.unwrap();
    harness.planner().plan(&mut transaction_handle, &artifact).await.unwrap();

    let jobs = harness.jobs.list_by_artifact_iteration(&mut transaction_handle, artifact.id, 0).await.unwrap();
    let partials: Vec<_> = jobs.iter().filter(|j| j.kind == JobKind::Partial).collect();
    let aggregations: Vec<_> = jobs.iter().filter(|j| j.kind == JobKind::Aggregation).collect();
    assert_eq!(partials.len(), 2);
    assert_eq!(aggregations.len(), 1);
    assert_eq!(aggregations[0].status, JobStatus::Created);
    assert_eq!(aggregations[0].component_id, aggregator.id);
}

#[tokio::test]
async fn completing_all_partials_schedules_aggregation_then_rolls_iteration() {
    let harness = Harness::new();
    let mut transaction_handle = TransactionHandle::new(());

    let client = new_component(ComponentType::Client);
    let aggregator = new_component(ComponentType::Node);
    harness.components.create(&mut transaction_handle, &client).await.unwrap();
    harness.components.create(&mut transaction_handle, &aggregator).await.unwrap();

    harness.projects.create(&mut transaction_handle, &Project { token: "proj-1".into(), name: "p".into() }).await.unwrap();
    let ds = new_datasource(client.id);
    harness.projects.datasources.upsert(&mut transaction_handle, &ds).await.unwrap();
    harness.projects.attach_datasource(&mut transaction_handle, "proj-1", &ds.hash).await.unwrap();

    let artifact = sample_artifact("proj-1", 2);
    harness.artifacts.create(&mut transaction_handle, &artifact).await.unwrap();
    harness.planner().plan(&mut transaction_handle, &artifact).await.unwrap();

    let jobs = harness.jobs.list_by_artifact_iteration(&mut transaction_handle, artifact.id, 0).await.unwrap();
    let partial = jobs.iter().find(|j| j.kind == JobKind::Partial).unwrap().clone();
    let aggregation = jobs.iter().find(|j| j.kind == JobKind::Aggregation).unwrap().clone();

    let scheduler = harness.scheduler();
    let now = Utc::now();
    let result = ResultRow {
        id: Uuid::new_v4(),
        job_id: partial.id,
        artifact_id: artifact.id,
        producer_id: client.id,
        iteration: 0,
        is_model: true,
        is_estimation: false,
        is_aggregation: false,
        is_error: false,
        path: "storage/artifacts/x/0/x.PARTIAL".into(),
        created_at: now,
    };
    scheduler.complete_job(&mut transaction_handle, partial.id, result, now).await.unwrap();

    let aggregation_after = harness.jobs.find_by_id(&mut transaction_handle, aggregation.id).await.unwrap();
    assert_eq!(aggregation_after.status, JobStatus::Scheduled);
    assert_eq!(aggregation_after.content_ids.len(), 1);

    let aggregation_result = ResultRow {
        id: Uuid::new_v4(),
        job_id: aggregation.id,
        artifact_id: artifact.id,
        producer_id: aggregator.id,
        iteration: 0,
        is_model: true,
        is_estimation: false,
        is_aggregation: true,
        is_error: false,
        path: "storage/artifacts/x/0/x.AGGREGATED".into(),
        created_at: now,
    };
    scheduler.complete_job(&mut transaction_handle, aggregation.id, aggregation_result, now).await.unwrap();

    let rolled_artifact = harness.artifacts.find_by_id(&mut transaction_handle, artifact.id).await.unwrap();
    assert_eq!(rolled_artifact.current_iteration, 1);

    let next_iteration_jobs = harness.jobs.list_by_artifact_iteration(&mut transaction_handle, artifact.id, 1).await.unwrap();
    assert_eq!(next_iteration_jobs.iter().filter(|j| j.kind == JobKind::Partial).count(), 1);
    assert_eq!(next_iteration_jobs.iter().filter(|j| j.kind == JobKind::Aggregation).count(), 1);
}

#[tokio::test]
async fn last_iteration_aggregation_completion_marks_artifact_completed() {
    let harness = Harness::new();
    let mut transaction_handle = TransactionHandle::new(());

    let client = new_component(ComponentType::Client);
    let aggregator = new_component(ComponentType::Node);
    harness.components.create(&mut transaction_handle, &client).await.unwrap();
    harness.components.create(&mut transaction_handle, &aggregator).await.unwrap();
    harness.projects.create(&mut transaction_handle, &Project { token: "proj-1".into(), name: "p".into() }).await.unwrap();
    let ds = new_datasource(client.id);
    harness.projects.datasources.upsert(&mut transaction_handle, &ds).await.unwrap();
    harness.projects.attach_datasource(&mut transaction_handle, "proj-1", &ds.hash).await.unwrap();

    let artifact = sample_artifact("proj-1", 1);
    harness.artifacts.create(&mut transaction_handle, &artifact).await.unwrap();
    harness.planner().plan(&mut transaction_handle, &artifact).await.unwrap();

    let jobs = harness.jobs.list_by_artifact_iteration(&mut transaction_handle, artifact.id, 0).await.unwrap();
    let partial = jobs.iter().find(|j| j.kind == JobKind::Partial).unwrap().clone();
    let aggregation = jobs.iter().find(|j| j.kind == JobKind::Aggregation).unwrap().clone();

    let scheduler = harness.scheduler();
    let now = Utc::now();
    let partial_result = ResultRow {
        id: Uuid::new_v4(), job_id: partial.id, artifact_id: artifact.id, producer_id: client.id,
        iteration: 0, is_model: true, is_estimation: false, is_aggregation: false, is_error: false,
        path: "p".into(), created_at: now,
    };
    scheduler.complete_job(&mut transaction_handle, partial.id, partial_result, now).await.unwrap();

    let aggregation_result = ResultRow {
        id: Uuid::new_v4(), job_id: aggregation.id, artifact_id: artifact.id, producer_id: aggregator.id,
        iteration: 0, is_model: true, is_estimation: false, is_aggregation: true, is_error: false,
        path: "a".into(), created_at: now,
    };
    scheduler.complete_job(&mut transaction_handle, aggregation.id, aggregation_result, now).await.unwrap();

    let final_artifact = harness.artifacts.find_by_id(&mut transaction_handle, artifact.id).await.unwrap();
    assert_eq!(final_artifact.status, ArtifactStatusKind::Completed);
}

#[tokio::test]
async fn cas_dispatch_race_only_one_winner() {
    let harness = Harness::new();
    let mut transaction_handle = TransactionHandle::new(());

    let client = new_component(ComponentType::Client);
    harness.components.create(&mut transaction_handle, &client).await.unwrap();

    let job = Job {
        id: Uuid::new_v4(),
        artifact_id: Uuid::new_v4(),
        component_id: client.id,
        iteration: 0,
        kind: JobKind::Partial,
        status: JobStatus::Scheduled,
        content_ids: vec![],
        created_at: Utc::now(),
        started_at: None,
        ended_at: None,
    };
    harness.jobs.create(&mut transaction_handle, &job).await.unwrap();

    let scheduler = harness.scheduler();
    let now = Utc::now();
    let first = scheduler.dispatch(&mut transaction_handle, client.id, now).await.unwrap();
    let second = scheduler.dispatch(&mut transaction_handle, client.id, now).await.unwrap();

    assert!(first.is_some());
    assert!(second.is_none());
}

#[tokio::test]
async fn error_result_cancels_sibling_jobs_and_artifact() {
    let harness = Harness::new();
    let mut transaction_handle = TransactionHandle::new(());

    let client_a = new_component(ComponentType::Client);
    let client_b = new_component(ComponentType::Client);
    let aggregator = new_component(ComponentType::Node);
    for c in [&client_a, &client_b, &aggregator] {
        harness.components.create(&mut transaction_handle, c).await.unwrap();
    }
    harness.projects.create(&mut transaction_handle, &Project { token: "proj-1".into(), name: "p".into() }).await.unwrap();
    let ds_a = new_datasource(client_a.id);
    let ds_b = new_datasource(client_b.id);
    harness.projects.datasources.upsert(&mut transaction_handle, &ds_a).await.unwrap();
    harness.projects.datasources.upsert(&mut transaction_handle, &ds_b).await.unwrap();
    harness.projects.attach_datasource(&mut transaction_handle, "proj-1", &ds_a.hash).await.unwrap();
    harness.projects.attach_datasource(&mut transaction_handle, "proj-1", &ds_b.hash).await.unwrap();

    let artifact = sample_artifact("proj-1", 2);
    harness.artifacts.create(&mut transaction_handle, &artifact).await.unwrap();
    harness.planner().plan(&mut transaction_handle, &artifact).await.unwrap();

    let jobs = harness.jobs.list_by_artifact_iteration(&mut transaction_handle, artifact.id, 0).await.unwrap();
    let failing = jobs.iter().find(|j| j.kind == JobKind::Partial).unwrap().clone();

    let scheduler = harness.scheduler();
    let now = Utc::now();
    scheduler.fail_job(&mut transaction_handle, failing.id, "executor crashed", now).await.unwrap();

    let jobs_after = harness.jobs.list_by_artifact_iteration(&mut transaction_handle, artifact.id, 0).await.unwrap();
    assert!(jobs_after.iter().all(|j| j.status == JobStatus::Error));

    let final_artifact = harness.artifacts.find_by_id(&mut transaction_handle, artifact.id).await.unwrap();
    assert_eq!(final_artifact.status, ArtifactStatusKind::Error);
}
