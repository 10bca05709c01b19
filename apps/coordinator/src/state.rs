// [apps/coordinator/src/state.rs]
/*!
 * =================================================================
 * APARATO: APPLICATION STATE COMPOSITION ROOT
 * CLASIFICACIÓN: COMPOSITION ROOT (ESTRATO L4)
 * RESPONSABILIDAD: ENSAMBLAJE DE CLIENTE DE BASE DE DATOS, REPOSITORIOS, CLAVES Y CONFIGURACIÓN
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: grounded en `AppState` del equipo — un único struct
 *    `Arc`-envuelto clonado a cada handler.
 * =================================================================
 */

use std::sync::Arc;

use fednode_core_crypto::KeyMaterial;
use fednode_core_orchestration::{BlobStore, Planner, ResultStore, Scheduler, UpdateService};
use fednode_core_repository::{
    ArtifactRepository, ComponentRepository, DataSourceRepository, JobRepository, KeyValueStore,
    ProjectRepository, ResultRepository, TokenRepository,
};
use fednode_infra_db::{
    LibsqlArtifactRepository, LibsqlClient, LibsqlComponentRepository, LibsqlDataSourceRepository,
    LibsqlJobRepository, LibsqlKeyValueStore, LibsqlProjectRepository, LibsqlResultRepository,
    LibsqlTokenRepository,
};

use crate::blob_store::FsBlobStore;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<LibsqlClient>,
    pub components: Arc<dyn ComponentRepository>,
    pub tokens: Arc<dyn TokenRepository>,
    pub projects: Arc<dyn ProjectRepository>,
    pub datasources: Arc<dyn DataSourceRepository>,
    pub artifacts: Arc<dyn ArtifactRepository>,
    pub jobs: Arc<dyn JobRepository>,
    pub results: Arc<dyn ResultRepository>,
    pub kv: Arc<dyn KeyValueStore>,
    pub blobs: Arc<dyn BlobStore>,
    pub keys: Arc<KeyMaterial>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn bootstrap(config: Config) -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let auth_token = std::env::var("TURSO_AUTH_TOKEN").ok();
        let db = LibsqlClient::connect(&database_url, auth_token).await?;
        let keys = KeyMaterial::load_or_generate(&config.private_key_path())?;

        Ok(Self {
            db: Arc::new(db),
            components: Arc::new(LibsqlComponentRepository),
            tokens: Arc::new(LibsqlTokenRepository),
            projects: Arc::new(LibsqlProjectRepository),
            datasources: Arc::new(LibsqlDataSourceRepository),
            artifacts: Arc::new(LibsqlArtifactRepository),
            jobs: Arc::new(LibsqlJobRepository),
            results: Arc::new(LibsqlResultRepository),
            kv: Arc::new(LibsqlKeyValueStore),
            blobs: Arc::new(FsBlobStore::new(config.artifacts_dir())),
            keys: Arc::new(keys),
            config: Arc::new(config),
        })
    }

    pub fn planner(&self) -> Planner<'_> {
        Planner {
            artifacts: self.artifacts.as_ref(),
            projects: self.projects.as_ref(),
            datasources: self.datasources.as_ref(),
            components: self.components.as_ref(),
            jobs: self.jobs.as_ref(),
        }
    }

    pub fn scheduler(&self) -> Scheduler<'_> {
        Scheduler {
            jobs: self.jobs.as_ref(),
            results: self.results.as_ref(),
            artifacts: self.artifacts.as_ref(),
            lease_duration: self.config.lease_duration(),
        }
    }

    pub fn update_service<'a>(&'a self, scheduler: &'a Scheduler<'a>) -> UpdateService<'a> {
        UpdateService {
            scheduler,
            jobs: self.jobs.as_ref(),
            artifacts: self.artifacts.as_ref(),
        }
    }

    pub fn result_store(&self) -> ResultStore<'_> {
        ResultStore {
            results: self.results.as_ref(),
            blobs: self.blobs.as_ref(),
        }
    }
}
