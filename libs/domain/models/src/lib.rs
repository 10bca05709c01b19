// [libs/domain/models/src/lib.rs]
/*!
 * =================================================================
 * APARATO: DOMAIN MODELS REGISTRY
 * CLASIFICACIÓN: DOMAIN MODEL (ESTRATO L1)
 * RESPONSABILIDAD: PUNTO DE ENTRADA PÚBLICO DE TODO TIPO DE DOMINIO COMPARTIDO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: cero lógica de persistencia o de red vive en este
 *    crate.
 * =================================================================
 */

pub mod artifact;
pub mod component;
pub mod datasource;
pub mod job;
pub mod project;
pub mod result;
pub mod token;
pub mod wire;

pub use artifact::{
    AggregationStrategy, Artifact, ArtifactPayload, ArtifactStatus, ArtifactStatusKind,
    ArtifactSubmission, ExecutionPlan, QueryPlan,
};
pub use component::{Component, ComponentType, NetworkCoordinates};
pub use datasource::{DataSource, FeatureMetadata};
pub use job::{Job, JobKind, JobStatus};
pub use project::Project;
pub use result::{ResultRow, ResultTag};
pub use token::Token;
pub use wire::{
    ClientUpdate, JoinData, Metadata, NodeJoinRequest, NodeLeaveRequest, ServerPublicKey,
    TaskError, TaskParameters, UpdateData,
};
