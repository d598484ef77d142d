//! # Job Dispatcher
//!
//! The command state machine: authorize, validate, authorize the payload's
//! application path when one is present, bracket the engine call with the
//! maintenance pause, and produce the outcome the renderer turns into a
//! response. Authorization strictly precedes any engine call; the pause
//! bracket spans exactly the engine invocation.

use std::sync::Arc;

use chrono_tz::Tz;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::auth::{
    app_path::present_app_paths, authorize_for_app, elide_bundle_path, normalize_app_paths,
    restore_bundle_path, AuthorizationGate,
};
use crate::config::JobConfig;
use crate::constants::{
    DEFAULT_TIMEZONE, JSON_TAG_ACTION_RETRIES, JSON_TAG_JMS_TOPIC, JSON_TAG_STATUS, TEXT_UTF8,
    XML_UTF8,
};
use crate::engine::{JobEngine, StreamBody};
use crate::error::{codes, DispatchError, DispatchResult};
use crate::render::{render, JobResponse, ResponseBody};
use crate::scheduler::{MaintenancePauseController, SchedulerPauseState};

use super::{Action, Command, ContentType, Selector, ShowKind};

/// Dispatches job-control commands against an engine behind an
/// authorization gate.
pub struct JobDispatcher {
    engine: Arc<dyn JobEngine>,
    gate: Arc<dyn AuthorizationGate>,
    pause: MaintenancePauseController,
}

impl JobDispatcher {
    pub fn new(engine: Arc<dyn JobEngine>, gate: Arc<dyn AuthorizationGate>) -> Self {
        Self {
            engine,
            gate,
            pause: MaintenancePauseController::new(),
        }
    }

    /// Build a dispatcher sharing an existing pause controller, so multiple
    /// dispatchers signal the same scheduler.
    pub fn with_pause_controller(
        engine: Arc<dyn JobEngine>,
        gate: Arc<dyn AuthorizationGate>,
        pause: MaintenancePauseController,
    ) -> Self {
        Self {
            engine,
            gate,
            pause,
        }
    }

    /// The pause state a background scheduler should poll before admitting
    /// a maintenance sweep.
    pub fn pause_state(&self) -> Arc<SchedulerPauseState> {
        self.pause.state()
    }

    /// Execute a command and render its terminal response. Every command
    /// ends rendered, failures included.
    pub async fn handle(&self, command: &Command) -> JobResponse {
        render(self.dispatch(command).await)
    }

    /// Execute a command, producing a body or a terminal error.
    pub async fn dispatch(&self, command: &Command) -> DispatchResult<ResponseBody> {
        info!(
            job_id = %command.job_id,
            operation = command.selector.operation(),
            user = command.caller.user().unwrap_or("-"),
            "dispatching job command"
        );

        if command.job_id.trim().is_empty() {
            return Err(DispatchError::validation(
                codes::JOB_ID_REQUIRED,
                "command carries no job id",
            ));
        }

        match command.selector {
            Selector::Act(action) => self.dispatch_action(command, action).await,
            Selector::Show(show) => self.dispatch_show(command, show).await,
        }
    }

    async fn dispatch_action(
        &self,
        command: &Command,
        action: Action,
    ) -> DispatchResult<ResponseBody> {
        let job_id = command.job_id.as_str();

        self.gate
            .authorize_for_job(command.caller.user(), job_id, true)
            .await
            .map_err(|e| {
                warn!(job_id, action = %action, "write authorization denied");
                DispatchError::auth_denied(e.to_string())
            })?;

        if action.validates_content_type() {
            match command.content_type {
                Some(ContentType::Xml) => {}
                Some(other) => {
                    return Err(DispatchError::invalid_param(
                        codes::INVALID_CONTENT_TYPE,
                        format!(
                            "action [{action}] requires [{}] content, got [{}]",
                            ContentType::Xml.as_str(),
                            other.as_str()
                        ),
                        other.as_str(),
                    ));
                }
                None => {
                    return Err(DispatchError::validation(
                        codes::INVALID_CONTENT_TYPE,
                        format!("action [{action}] requires a declared configuration content type"),
                    ));
                }
            }
        }

        let body = match action {
            Action::Start => {
                let _pause = self.pause.pause();
                self.engine.start_job(job_id).await?;
                ResponseBody::None
            }
            Action::Resume => {
                let _pause = self.pause.pause();
                self.engine.resume_job(job_id).await?;
                ResponseBody::None
            }
            Action::Suspend => {
                let _pause = self.pause.pause();
                self.engine.suspend_job(job_id).await?;
                ResponseBody::None
            }
            Action::Kill => {
                let _pause = self.pause.pause();
                match self.engine.kill_job(job_id).await? {
                    Some(value) => ResponseBody::Json(value),
                    None => ResponseBody::None,
                }
            }
            Action::Change => {
                let _pause = self.pause.pause();
                self.engine.change_job(job_id).await?;
                ResponseBody::None
            }
            Action::Ignore => {
                let _pause = self.pause.pause();
                match self.engine.ignore_job(job_id).await? {
                    Some(value) => ResponseBody::Json(value),
                    None => ResponseBody::None,
                }
            }
            Action::Rerun => {
                let payload = self.prepare_payload(command, action).await?;
                let _pause = self.pause.pause();
                match self.engine.rerun_job(job_id, Some(&payload)).await? {
                    Some(value) => ResponseBody::Json(value),
                    None => ResponseBody::None,
                }
            }
            Action::CoordRerun | Action::BundleRerun => {
                let _pause = self.pause.pause();
                match self.engine.rerun_job(job_id, None).await? {
                    Some(value) => ResponseBody::Json(value),
                    None => ResponseBody::None,
                }
            }
            Action::CoordUpdate => {
                let config = self.prepare_payload(command, action).await?;
                let _pause = self.pause.pause();
                ResponseBody::Json(self.engine.update_job(job_id, &config).await?)
            }
            Action::SlaEnableAlert => {
                let _pause = self.pause.pause();
                self.engine.sla_enable_alert(job_id).await?;
                ResponseBody::None
            }
            Action::SlaDisableAlert => {
                let _pause = self.pause.pause();
                self.engine.sla_disable_alert(job_id).await?;
                ResponseBody::None
            }
            Action::SlaChange => {
                let _pause = self.pause.pause();
                self.engine.sla_change(job_id).await?;
                ResponseBody::None
            }
        };

        debug!(job_id, action = %action, "job action completed");
        Ok(body)
    }

    /// Derive the configuration document a payload-bearing action hands to
    /// the engine: the payload must be present, the caller identity is
    /// stamped over any payload-supplied user name, and the application
    /// path, when one is present, is authorized. Runs before the pause
    /// bracket is entered.
    async fn prepare_payload(
        &self,
        command: &Command,
        action: Action,
    ) -> DispatchResult<JobConfig> {
        debug_assert!(action.requires_structured_payload());
        let mut payload = command.payload.clone().ok_or_else(|| {
            DispatchError::validation(
                codes::PAYLOAD_REQUIRED,
                format!("action [{action}] requires a configuration payload"),
            )
        })?;
        // Caller identity always wins over a payload-supplied user name.
        if let Some(user) = command.caller.user() {
            payload.set_user_name(user);
        }
        self.authorize_payload_app_path(action, payload).await
    }

    /// Authorize the payload's application path, deriving the document the
    /// engine will receive. A payload without any application path passes
    /// through untouched. A coordinator update carrying a coordinator path
    /// is authorized against that path alone: the bundle path is elided for
    /// the check and restored afterwards, so a coordinator submitted under a
    /// bundle stays individually updatable.
    async fn authorize_payload_app_path(
        &self,
        action: Action,
        payload: JobConfig,
    ) -> DispatchResult<JobConfig> {
        if action == Action::CoordUpdate && payload.coordinator_path().is_some() {
            let (elided, bundle) = elide_bundle_path(&payload);
            let derived = authorize_for_app(self.gate.as_ref(), &elided).await?;
            let derived = normalize_app_paths(&derived);
            return Ok(restore_bundle_path(derived, bundle));
        }

        if present_app_paths(&payload).is_empty() {
            return Ok(payload);
        }

        let derived = authorize_for_app(self.gate.as_ref(), &payload).await?;
        Ok(normalize_app_paths(&derived))
    }

    async fn dispatch_show(
        &self,
        command: &Command,
        show: ShowKind,
    ) -> DispatchResult<ResponseBody> {
        let job_id = command.job_id.as_str();
        let timezone = resolve_timezone(command.timezone.as_deref());

        self.gate
            .authorize_for_job(command.caller.user(), job_id, false)
            .await
            .map_err(|e| {
                warn!(job_id, show = %show, "read authorization denied");
                DispatchError::auth_denied(e.to_string())
            })?;

        let body = match show {
            ShowKind::Info => {
                let info = {
                    let _pause = self.pause.pause();
                    self.engine.job_info(job_id, timezone).await?
                };
                ResponseBody::Json(info)
            }
            ShowKind::AllRunsForCoordAction => {
                let runs = {
                    let _pause = self.pause.pause();
                    self.engine.jobs_by_parent_id(job_id).await?
                };
                ResponseBody::Json(runs)
            }
            ShowKind::JmsTopic => {
                let topic = {
                    let _pause = self.pause.pause();
                    self.engine.jms_topic_name(job_id).await?
                };
                ResponseBody::Json(json!({ JSON_TAG_JMS_TOPIC: topic }))
            }
            ShowKind::Status => {
                let status = {
                    let _pause = self.pause.pause();
                    self.engine.job_status(job_id).await?
                };
                ResponseBody::Json(json!({ JSON_TAG_STATUS: status }))
            }
            ShowKind::ActionRetries => {
                let retries = {
                    let _pause = self.pause.pause();
                    self.engine.action_retries(job_id).await?
                };
                ResponseBody::Json(json!({ JSON_TAG_ACTION_RETRIES: retries }))
            }
            ShowKind::MissingDependencies => {
                let deps = {
                    let _pause = self.pause.pause();
                    self.engine.coord_action_missing_dependencies(job_id).await?
                };
                ResponseBody::Json(deps)
            }
            ShowKind::WfActionsInCoord => {
                let actions = {
                    let _pause = self.pause.pause();
                    self.engine.wf_actions_in_coord(job_id).await?
                };
                ResponseBody::Json(actions)
            }
            ShowKind::Definition => {
                let definition = {
                    let _pause = self.pause.pause();
                    self.engine.job_definition(job_id).await?
                };
                ResponseBody::Text {
                    content_type: XML_UTF8,
                    text: definition,
                }
            }
            // Immutable history reads: safe to run concurrently with
            // scheduling, so no pause bracket.
            ShowKind::Log => {
                let stream = self.engine.stream_job_log(job_id).await?;
                ResponseBody::Stream(StreamBody::new(TEXT_UTF8, stream))
            }
            ShowKind::ErrorLog => {
                let stream = self.engine.stream_job_error_log(job_id).await?;
                ResponseBody::Stream(StreamBody::new(TEXT_UTF8, stream))
            }
            ShowKind::AuditLog => {
                let stream = self.engine.stream_job_audit_log(job_id).await?;
                ResponseBody::Stream(StreamBody::new(TEXT_UTF8, stream))
            }
            ShowKind::Graph => {
                // Paused only around stream production.
                let graph = {
                    let _pause = self.pause.pause();
                    self.engine.stream_job_graph(job_id).await?
                };
                ResponseBody::Stream(graph)
            }
        };

        debug!(job_id, show = %show, "job show completed");
        Ok(body)
    }
}

/// Resolve the timezone hint for timestamp rendering. Unknown identifiers
/// fall back to GMT rather than rejecting the request.
fn resolve_timezone(hint: Option<&str>) -> Tz {
    let id = hint.unwrap_or(DEFAULT_TIMEZONE);
    id.parse().unwrap_or_else(|_| {
        warn!(timezone = id, "unknown timezone id, rendering timestamps in GMT");
        Tz::GMT
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_timezone_default_and_fallback() {
        assert_eq!(resolve_timezone(None), Tz::GMT);
        assert_eq!(
            resolve_timezone(Some("America/New_York")),
            Tz::America__New_York
        );
        assert_eq!(resolve_timezone(Some("Not/A_Zone")), Tz::GMT);
    }
}
