// [apps/client-node/src/executor.rs]
/*!
 * =================================================================
 * APARATO: TASK EXECUTOR CONTRACT
 * CLASIFICACIÓN: CORE ABSTRACTION (ESTRATO L2)
 * RESPONSABILIDAD: ABSTRACCIÓN DE EJECUTOR DE TAREAS (spec.md §9 design notes)
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: la matemática de estimador/modelo queda
 *    explícitamente fuera de alcance; `PassThroughExecutor` sólo
 *    transporta bytes.
 * =================================================================
 */

pub trait TaskExecutor: Send + Sync {
    fn execute(&self, descriptor: &[u8]) -> Result<Vec<u8>, String>;
}

pub struct PassThroughExecutor;

impl TaskExecutor for PassThroughExecutor {
    fn execute(&self, descriptor: &[u8]) -> Result<Vec<u8>, String> {
        Ok(descriptor.to_vec())
    }
}
