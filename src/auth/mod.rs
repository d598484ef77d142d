//! # Authorization Gate
//!
//! The policy oracle the dispatcher consults before any side effect. The
//! decision itself is external; this module only fixes the interface and the
//! denial error shape.

pub mod app_path;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::JobConfig;

pub use app_path::{
    authorize_for_app, elide_bundle_path, normalize_app_paths, restore_bundle_path, AppPathKind,
};

/// Authorization denial reported by the gate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("user [{user}] is not authorized for [{resource}]")]
pub struct AuthError {
    pub user: String,
    pub resource: String,
}

impl AuthError {
    pub fn denied(user: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            resource: resource.into(),
        }
    }
}

/// Yes/no + default-group oracle consulted before every operation.
///
/// `authorize_for_job` guards the job-id-addressed paths; `authorize_for_app`
/// guards application-path submissions and receives the definition filename
/// expected for the path's kind as part of the check.
#[async_trait]
pub trait AuthorizationGate: Send + Sync {
    /// Authorize `user` against a job id. `write` distinguishes mutating
    /// commands from read-only shows.
    async fn authorize_for_job(
        &self,
        user: Option<&str>,
        job_id: &str,
        write: bool,
    ) -> Result<(), AuthError>;

    /// Authorize `user` (under `acl`, when resolved) against an application
    /// path whose definition document must be `definition_file`.
    async fn authorize_for_app(
        &self,
        user: &str,
        acl: Option<&str>,
        app_path: &str,
        definition_file: &str,
        config: &JobConfig,
    ) -> Result<(), AuthError>;

    /// Whether policy permits falling back to the caller's default group
    /// when no explicit group or ACL property is supplied.
    fn use_default_group_as_acl(&self) -> bool;

    /// The caller's policy-default group, consulted only when
    /// [`use_default_group_as_acl`](Self::use_default_group_as_acl) is true.
    async fn default_group(&self, user: &str) -> Result<String, AuthError>;
}
