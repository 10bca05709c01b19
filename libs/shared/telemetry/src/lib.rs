// [libs/shared/telemetry/src/lib.rs]
/*!
 * =================================================================
 * APARATO: TELEMETRY IGNITION POINT
 * CLASIFICACIÓN: SHARED UTILITY (ESTRATO L0)
 * RESPONSABILIDAD: CONFIGURACIÓN UNIFICADA DE TRAZABILIDAD ESTRUCTURADA PARA TODO BINARIO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ZERO ABBREVIATIONS: nombres de función y de campo completamente
 *    descriptivos.
 * 2. SINGLE SOURCE: un único punto de inicialización de
 *    `tracing_subscriber` para los tres binarios.
 * =================================================================
 */

//! Structured logging setup shared by every binary in the workspace.

use std::panic;

use tracing::{error, info, instrument};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Initializes the global tracing subscriber and panic hook for `service_name`.
///
/// Debug builds get compact, colored output; release builds emit flat JSON
/// suitable for log aggregation. Panics on worker threads are logged under
/// the `panic_monitor` target before the process unwinds, so a crashed
/// task executor still leaves a trace.
///
/// # Panics
/// Panics if a global subscriber has already been installed.
#[instrument(skip_all)]
pub fn init_tracing(service_name: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "{service_name}={level},tower_http=warn,hyper=warn,libsql=error",
            level = if cfg!(debug_assertions) { "debug" } else { "info" }
        )
        .into()
    });

    if cfg!(debug_assertions) {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact().with_target(false))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().flatten_event(true))
            .init();
    }

    let service = service_name.to_string();
    panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()))
            .unwrap_or_else(|| "unknown".to_string());

        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| info.payload().downcast_ref::<String>().map(String::as_str))
            .unwrap_or("<no panic message>");

        error!(target: "panic_monitor", service = %service, location = %location, "💥 [PANIC]: thread panicked: {payload}");
    }));

    info!(service = service_name, "📡 [TELEMETRY_ONLINE]: tracing initialized");
}
