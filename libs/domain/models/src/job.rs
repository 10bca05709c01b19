// [libs/domain/models/src/job.rs]
/*!
 * =================================================================
 * APARATO: JOB DOMAIN MODEL
 * CLASIFICACIÓN: DOMAIN MODEL (ESTRATO L1)
 * RESPONSABILIDAD: MÁQUINA DE ESTADOS DE UN TRABAJO PARCIAL O DE AGREGACIÓN
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ATOMIC INTEGRITY: `is_terminal()` es la única fuente de verdad sobre
 *    si un trabajo puede aún transicionar.
 * =================================================================
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobKind {
    Partial,
    Aggregation,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobStatus {
    Created,
    Scheduled,
    Running,
    Done,
    Error,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Done | JobStatus::Error)
    }
}

/// Unit of scheduled work. Mutated only by the planner on creation, the
/// scheduler on transition, or the owning worker on completion
/// (spec.md §3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub artifact_id: Uuid,
    pub component_id: Uuid,
    pub iteration: u32,
    pub kind: JobKind,
    pub status: JobStatus,
    /// PARTIAL: datasource hashes. AGGREGATION: result ids, appended as
    /// partials complete.
    pub content_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
}
