//! # Job Engine Interface
//!
//! The abstract workflow/coordinator/bundle engine the dispatcher drives.
//! Implementations perform the actual lifecycle work; this crate only fixes
//! the operation surface and the business-rule error contract. Engine
//! failures are deterministic rule violations ("cannot suspend a completed
//! job"), not transient faults, and render as client errors.

use async_trait::async_trait;
use bytes::Bytes;
use chrono_tz::Tz;
use futures::stream::BoxStream;
use serde_json::Value;
use thiserror::Error;

use crate::config::JobConfig;
use crate::constants::NOT_SUPPORTED_MESSAGE;
use crate::error::{codes, DispatchError};

/// Chunked byte stream for log and graph shows.
pub type ByteStream = BoxStream<'static, std::io::Result<Bytes>>;

/// Stream plus the content type the transport should declare for it.
pub struct StreamBody {
    pub content_type: String,
    pub stream: ByteStream,
}

impl StreamBody {
    pub fn new(content_type: impl Into<String>, stream: ByteStream) -> Self {
        Self {
            content_type: content_type.into(),
            stream,
        }
    }
}

impl std::fmt::Debug for StreamBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamBody")
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

/// Failure reported by an engine operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Deterministic business-rule violation for a specific job.
    #[error("{0}")]
    Rejected(String),

    #[error("job not found: {0}")]
    NotFound(String),

    /// Operation left at its unsupported default by this engine.
    #[error("{NOT_SUPPORTED_MESSAGE}")]
    NotSupported,
}

impl EngineError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    pub fn not_found(job_id: impl Into<String>) -> Self {
        Self::NotFound(job_id.into())
    }
}

impl From<EngineError> for DispatchError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Rejected(message) => DispatchError::Engine { message },
            EngineError::NotFound(job_id) => DispatchError::NotFound { job_id },
            EngineError::NotSupported => {
                DispatchError::validation(codes::NOT_SUPPORTED, NOT_SUPPORTED_MESSAGE)
            }
        }
    }
}

/// Lifecycle and read operations of the underlying engine, one per
/// dispatched action or show kind.
///
/// Mutating operations may return a structured body (kill, ignore, the rerun
/// family); update always does; the rest return nothing. Read operations
/// return either structured values, raw text, or byte streams.
#[async_trait]
pub trait JobEngine: Send + Sync {
    async fn start_job(&self, job_id: &str) -> Result<(), EngineError>;

    async fn resume_job(&self, job_id: &str) -> Result<(), EngineError>;

    async fn suspend_job(&self, job_id: &str) -> Result<(), EngineError>;

    async fn kill_job(&self, job_id: &str) -> Result<Option<Value>, EngineError>;

    async fn change_job(&self, job_id: &str) -> Result<(), EngineError>;

    async fn ignore_job(&self, job_id: &str) -> Result<Option<Value>, EngineError>;

    /// Rerun a job. Workflow reruns receive the authorized configuration
    /// document; coordinator/bundle reruns receive none.
    async fn rerun_job(
        &self,
        job_id: &str,
        config: Option<&JobConfig>,
    ) -> Result<Option<Value>, EngineError>;

    /// Update a coordinator job from the authorized configuration document.
    async fn update_job(&self, job_id: &str, config: &JobConfig) -> Result<Value, EngineError>;

    async fn sla_enable_alert(&self, job_id: &str) -> Result<(), EngineError>;

    async fn sla_disable_alert(&self, job_id: &str) -> Result<(), EngineError>;

    async fn sla_change(&self, job_id: &str) -> Result<(), EngineError>;

    /// Structured job information; `timezone` governs timestamp rendering.
    async fn job_info(&self, job_id: &str, timezone: Tz) -> Result<Value, EngineError>;

    /// Workflow jobs spawned by a coordinator action.
    async fn jobs_by_parent_id(&self, job_id: &str) -> Result<Value, EngineError>;

    async fn jms_topic_name(&self, job_id: &str) -> Result<String, EngineError>;

    async fn job_status(&self, job_id: &str) -> Result<String, EngineError>;

    async fn action_retries(&self, job_id: &str) -> Result<Value, EngineError>;

    async fn coord_action_missing_dependencies(&self, job_id: &str)
        -> Result<Value, EngineError>;

    /// Workflow actions by name within a coordinator job. Unsupported unless
    /// a concrete engine overrides it.
    async fn wf_actions_in_coord(&self, _job_id: &str) -> Result<Value, EngineError> {
        Err(EngineError::NotSupported)
    }

    /// Raw job definition document.
    async fn job_definition(&self, job_id: &str) -> Result<String, EngineError>;

    async fn stream_job_log(&self, job_id: &str) -> Result<ByteStream, EngineError>;

    async fn stream_job_error_log(&self, job_id: &str) -> Result<ByteStream, EngineError>;

    async fn stream_job_audit_log(&self, job_id: &str) -> Result<ByteStream, EngineError>;

    /// Rendered runtime DAG, workflow only; declares its own content type.
    async fn stream_job_graph(&self, job_id: &str) -> Result<StreamBody, EngineError>;
}
