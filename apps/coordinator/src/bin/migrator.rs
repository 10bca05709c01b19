// [apps/coordinator/src/bin/migrator.rs]
/*!
 * =================================================================
 * APARATO: STANDALONE SCHEMA MIGRATOR
 * CLASIFICACIÓN: APPLICATION ENTRYPOINT (ESTRATO L5)
 * RESPONSABILIDAD: PROVISIÓN DE ESQUEMA INDEPENDIENTE DEL ARRANQUE DEL COORDINADOR
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: existe para operadores que quieren aprovisionar una
 *    base antes del primer arranque, no reemplaza la migración
 *    automática.
 * =================================================================
 */

use fednode_infra_db::LibsqlClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    fednode_shared_telemetry::init_tracing("migrator");

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let auth_token = std::env::var("TURSO_AUTH_TOKEN").ok();

    LibsqlClient::connect(&database_url, auth_token).await?;
    tracing::info!("✅ [SCHEMA_READY]: schema applied");
    Ok(())
}
