// [apps/coordinator/src/routes.rs]
/*!
 * =================================================================
 * APARATO: ROUTE TOPOLOGY
 * CLASIFICACIÓN: APPLICATION ADAPTER (ESTRATO L4)
 * RESPONSABILIDAD: CABLEADO DE RUTAS Y SUS DOS GRUPOS DE ENVOLTURA (spec.md §6)
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ATOMIC INTEGRITY: toda ruta fuera de /node/key y /node/join pasa por
 *    el guardia de firma antes de alcanzar su handler.
 * =================================================================
 */

use std::time::Duration;

use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::{middleware, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::handlers::{client, node, worker, workbench};
use crate::middleware::signed_request_guard;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    let unauthenticated = Router::new()
        .route("/node/key", get(node::get_server_public_key))
        .route("/node/join", post(node::join));

    let signed = Router::new()
        .route("/node/leave", post(node::leave))
        .route("/node/metadata", post(node::push_metadata))
        .route("/client/update", get(client::update))
        .route("/worker/task/:job_id", get(worker::fetch_task))
        .route("/worker/result/:id", get(worker::download_result).post(worker::upload_result))
        .route("/worker/error", post(worker::report_error))
        .route("/workbench/artifact/submit", post(workbench::submit_artifact))
        .route("/workbench/artifact/status/:id", get(workbench::artifact_status))
        .route("/workbench/result/:id", get(workbench::download_result))
        .layer(middleware::from_fn_with_state(state.clone(), signed_request_guard));

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(unauthenticated)
        .merge(signed)
        .layer(cors)
        .with_state(state)
}
