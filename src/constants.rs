//! # Constants
//!
//! Well-known property keys and wire values shared across the dispatcher,
//! the app-path authorizer, and engine implementations.

/// Configuration property naming the submitting user.
pub const PROP_USER_NAME: &str = "user.name";

/// Configuration property naming the authorization group.
pub const PROP_GROUP_NAME: &str = "group.name";

/// Deprecated ACL property, honored only when `group.name` is absent.
pub const PROP_JOB_ACL: &str = "job.acl";

/// Application path of a workflow job definition.
pub const PROP_WF_APP_PATH: &str = "wf.application.path";

/// Application path of a coordinator job definition.
pub const PROP_COORD_APP_PATH: &str = "coord.application.path";

/// Application path of a bundle job definition.
pub const PROP_BUNDLE_APP_PATH: &str = "bundle.application.path";

/// Comma-separated library path list, used as a workflow-path fallback.
pub const PROP_LIBPATH: &str = "libpath";

/// Definition filename expected under a workflow application path.
pub const WORKFLOW_DEFINITION_FILE: &str = "workflow.xml";

/// Definition filename expected under a coordinator application path.
pub const COORDINATOR_DEFINITION_FILE: &str = "coordinator.xml";

/// Definition filename expected under a bundle application path.
pub const BUNDLE_DEFINITION_FILE: &str = "bundle.xml";

/// Timezone identifier applied to timestamp rendering when the request
/// carries no hint.
pub const DEFAULT_TIMEZONE: &str = "GMT";

/// Fixed message for engine operations left at their unsupported default.
pub const NOT_SUPPORTED_MESSAGE: &str = "Not supported in this version";

/// JSON field wrapping a job's JMS topic name.
pub const JSON_TAG_JMS_TOPIC: &str = "jmsTopicName";

/// JSON field wrapping a job's status string.
pub const JSON_TAG_STATUS: &str = "status";

/// JSON field wrapping a workflow's action retry list.
pub const JSON_TAG_ACTION_RETRIES: &str = "retries";

/// Content type declared for streamed log shows.
pub const TEXT_UTF8: &str = "text/plain; charset=UTF-8";

/// Content type declared for the raw definition show.
pub const XML_UTF8: &str = "application/xml; charset=UTF-8";
