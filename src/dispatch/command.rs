//! # Commands
//!
//! The immutable per-request model: job id, caller identity, exactly one
//! selector (action or show), and the optional payload/content-type/timezone
//! the selector may require. Constructed once at entry and never mutated
//! after authorization.

use crate::config::JobConfig;

use super::{Action, ShowKind};

/// Content type declared for a command payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    /// Structured configuration document.
    Xml,
    Json,
    TextPlain,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Xml => "application/xml",
            Self::Json => "application/json",
            Self::TextPlain => "text/plain",
        }
    }
}

/// Caller identity as established by the transport's authentication layer.
/// An anonymous caller carries no user name; the gate decides what that is
/// allowed to do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Caller {
    user: Option<String>,
}

impl Caller {
    pub fn authenticated(user: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }
}

/// Either a mutating action or a read-only show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    Act(Action),
    Show(ShowKind),
}

impl Selector {
    /// Wire string of the selected operation, for audit fields.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Act(action) => action.as_str(),
            Self::Show(kind) => kind.as_str(),
        }
    }
}

/// One inbound job-control request.
#[derive(Debug, Clone)]
pub struct Command {
    pub job_id: String,
    pub caller: Caller,
    pub selector: Selector,
    pub payload: Option<JobConfig>,
    pub content_type: Option<ContentType>,
    /// Timezone hint for timestamp rendering; absent means GMT.
    pub timezone: Option<String>,
}

impl Command {
    /// Mutating command for `action` on `job_id`.
    pub fn action(job_id: impl Into<String>, caller: Caller, action: Action) -> Self {
        Self {
            job_id: job_id.into(),
            caller,
            selector: Selector::Act(action),
            payload: None,
            content_type: None,
            timezone: None,
        }
    }

    /// Read command for `show` on `job_id`.
    pub fn show(job_id: impl Into<String>, caller: Caller, show: ShowKind) -> Self {
        Self {
            job_id: job_id.into(),
            caller,
            selector: Selector::Show(show),
            payload: None,
            content_type: None,
            timezone: None,
        }
    }

    pub fn with_payload(mut self, payload: JobConfig, content_type: ContentType) -> Self {
        self.payload = Some(payload);
        self.content_type = Some(content_type);
        self
    }

    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = Some(content_type);
        self
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_builders() {
        let command = Command::action("wf-1", Caller::authenticated("alice"), Action::Start);
        assert_eq!(command.job_id, "wf-1");
        assert_eq!(command.selector, Selector::Act(Action::Start));
        assert!(command.payload.is_none());

        let command = Command::show("wf-1", Caller::anonymous(), ShowKind::Log)
            .with_timezone("America/New_York");
        assert_eq!(command.selector, Selector::Show(ShowKind::Log));
        assert_eq!(command.timezone.as_deref(), Some("America/New_York"));
        assert_eq!(command.caller.user(), None);
    }

    #[test]
    fn test_selector_operation_names() {
        assert_eq!(Selector::Act(Action::CoordUpdate).operation(), "update");
        assert_eq!(Selector::Show(ShowKind::Info).operation(), "info");
    }
}
