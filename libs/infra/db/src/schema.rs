// [libs/infra/db/src/schema.rs]
/*!
 * =================================================================
 * APARATO: SCHEMA FORGE
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: DEFINICIÓN IDEMPOTENTE DE TABLAS E ÍNDICES DEL LEDGER TÁCTICO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ATOMIC INTEGRITY: índices únicos filtrados (`WHERE is_aggregation =
 *    ...`) imponen los invariantes de §3/§8 en la propia base de datos.
 * 2. HYGIENE TOTAL: `CREATE ... IF NOT EXISTS` vuelve cada reinicio del
 *    proceso idempotente.
 * =================================================================
 */

use anyhow::{Context, Result};
use libsql::Connection;
use tracing::{debug, info, instrument};

const TABLES: &[(&str, &str)] = &[
    ("components", r#"
        CREATE TABLE IF NOT EXISTS components (
            id TEXT PRIMARY KEY,
            component_type TEXT NOT NULL,
            public_key_pem TEXT NOT NULL UNIQUE,
            ip_address TEXT NOT NULL,
            port INTEGER,
            mac_address TEXT,
            machine_node TEXT,
            active INTEGER NOT NULL DEFAULT 1,
            left_network INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            UNIQUE(mac_address, machine_node)
        );
    "#),
    ("tokens", r#"
        CREATE TABLE IF NOT EXISTS tokens (
            token TEXT PRIMARY KEY,
            component_id TEXT NOT NULL REFERENCES components(id),
            expiration TEXT NOT NULL,
            valid INTEGER NOT NULL DEFAULT 1,
            issued_at TEXT NOT NULL
        );
    "#),
    ("projects", r#"
        CREATE TABLE IF NOT EXISTS projects (
            token TEXT PRIMARY KEY,
            name TEXT NOT NULL
        );
    "#),
    ("datasources", r#"
        CREATE TABLE IF NOT EXISTS datasources (
            hash TEXT PRIMARY KEY,
            owner_component_id TEXT NOT NULL REFERENCES components(id),
            columns_json TEXT NOT NULL,
            row_count INTEGER
        );
    "#),
    ("project_datasources", r#"
        CREATE TABLE IF NOT EXISTS project_datasources (
            project_token TEXT NOT NULL REFERENCES projects(token),
            datasource_hash TEXT NOT NULL REFERENCES datasources(hash),
            PRIMARY KEY (project_token, datasource_hash)
        );
    "#),
    ("artifacts", r#"
        CREATE TABLE IF NOT EXISTS artifacts (
            id TEXT PRIMARY KEY,
            project_token TEXT NOT NULL REFERENCES projects(token),
            query_plan_json TEXT NOT NULL,
            payload_json TEXT NOT NULL,
            iterations INTEGER NOT NULL,
            aggregation_strategy TEXT NOT NULL,
            status TEXT NOT NULL,
            current_iteration INTEGER NOT NULL DEFAULT 0
        );
    "#),
    ("jobs", r#"
        CREATE TABLE IF NOT EXISTS jobs (
            id TEXT PRIMARY KEY,
            artifact_id TEXT NOT NULL REFERENCES artifacts(id),
            component_id TEXT NOT NULL REFERENCES components(id),
            iteration INTEGER NOT NULL,
            kind TEXT NOT NULL,
            status TEXT NOT NULL,
            content_ids_json TEXT NOT NULL,
            created_at TEXT NOT NULL,
            started_at TEXT,
            ended_at TEXT
        );
    "#),
    ("results", r#"
        CREATE TABLE IF NOT EXISTS results (
            id TEXT PRIMARY KEY,
            job_id TEXT NOT NULL REFERENCES jobs(id),
            artifact_id TEXT NOT NULL REFERENCES artifacts(id),
            producer_id TEXT NOT NULL REFERENCES components(id),
            iteration INTEGER NOT NULL,
            is_model INTEGER NOT NULL DEFAULT 0,
            is_estimation INTEGER NOT NULL DEFAULT 0,
            is_aggregation INTEGER NOT NULL DEFAULT 0,
            is_error INTEGER NOT NULL DEFAULT 0,
            path TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
    "#),
    ("kv_store", r#"
        CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
    "#),
];

const INDEXES: &[(&str, &str)] = &[
    ("idx_jobs_dispatch", "CREATE INDEX IF NOT EXISTS idx_jobs_dispatch ON jobs(component_id, status, created_at);"),
    ("idx_jobs_iteration", "CREATE INDEX IF NOT EXISTS idx_jobs_iteration ON jobs(artifact_id, iteration);"),
    (
        "idx_results_partial_unique",
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_results_partial_unique ON results(artifact_id, producer_id, iteration) WHERE is_aggregation = 0;",
    ),
    (
        "idx_results_aggregated_unique",
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_results_aggregated_unique ON results(artifact_id, iteration) WHERE is_aggregation = 1;",
    ),
    ("idx_tokens_component", "CREATE INDEX IF NOT EXISTS idx_tokens_component ON tokens(component_id, valid);"),
];

/// Applies every table and index. `CREATE ... IF NOT EXISTS` makes repeat
/// calls a no-op, so this runs unconditionally at startup.
#[instrument(skip(connection))]
pub async fn apply_schema(connection: &Connection) -> Result<()> {
    info!("🛠️ [SCHEMA_APPLY]: applying database schema");
    for (name, sql) in TABLES {
        debug!(table = name, "🧱 [TABLE_FORGE]: creating table");
        connection.execute(sql, ()).await.with_context(|| format!("failed to create table {name}"))?;
    }
    for (name, sql) in INDEXES {
        debug!(index = name, "🧱 [INDEX_FORGE]: creating index");
        connection.execute(sql, ()).await.with_context(|| format!("failed to create index {name}"))?;
    }
    Ok(())
}
