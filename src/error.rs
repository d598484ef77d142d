//! # Dispatch Error Types
//!
//! The closed error taxonomy every command terminates in: authorization
//! denial, validation failure, missing job, engine business-rule rejection,
//! or a transport fault. Each maps to exactly one response status in
//! [`crate::render`].

use thiserror::Error;

/// Stable machine-readable validation codes.
pub mod codes {
    pub const UNSUPPORTED_ACTION: &str = "UNSUPPORTED_ACTION";
    pub const UNSUPPORTED_SHOW: &str = "UNSUPPORTED_SHOW";
    pub const INVALID_CONTENT_TYPE: &str = "INVALID_CONTENT_TYPE";
    pub const PAYLOAD_REQUIRED: &str = "PAYLOAD_REQUIRED";
    pub const JOB_ID_REQUIRED: &str = "JOB_ID_REQUIRED";
    pub const USER_NAME_REQUIRED: &str = "USER_NAME_REQUIRED";
    pub const APP_PATH_REQUIRED: &str = "APP_PATH_REQUIRED";
    pub const MULTIPLE_APP_PATHS: &str = "MULTIPLE_APP_PATHS";
    pub const NOT_SUPPORTED: &str = "NOT_SUPPORTED";
}

/// Terminal failure of a dispatched command.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DispatchError {
    #[error("authorization denied: {reason}")]
    AuthDenied { reason: String },

    #[error("{code}: {message}")]
    Validation {
        code: &'static str,
        message: String,
        /// Offending parameter name/value when one exists.
        param: Option<String>,
    },

    #[error("job not found: {job_id}")]
    NotFound { job_id: String },

    #[error("engine rejected operation: {message}")]
    Engine { message: String },

    #[error("transport failure: {message}")]
    Transport { message: String },
}

impl DispatchError {
    /// Create an authorization denial with context for the caller.
    pub fn auth_denied(reason: impl Into<String>) -> Self {
        Self::AuthDenied {
            reason: reason.into(),
        }
    }

    /// Create a validation error with a stable code.
    pub fn validation(code: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            code,
            message: message.into(),
            param: None,
        }
    }

    /// Create a validation error naming the offending parameter.
    pub fn invalid_param(
        code: &'static str,
        message: impl Into<String>,
        param: impl Into<String>,
    ) -> Self {
        Self::Validation {
            code,
            message: message.into(),
            param: Some(param.into()),
        }
    }

    /// Validation error for an action string outside the closed enumeration.
    pub fn unsupported_action(value: impl Into<String>) -> Self {
        let value = value.into();
        Self::invalid_param(
            codes::UNSUPPORTED_ACTION,
            format!("unsupported action [{value}]"),
            value,
        )
    }

    /// Validation error for a show string outside the closed enumeration.
    pub fn unsupported_show(value: impl Into<String>) -> Self {
        let value = value.into();
        Self::invalid_param(
            codes::UNSUPPORTED_SHOW,
            format!("unsupported show [{value}]"),
            value,
        )
    }

    /// Create an engine business-rule rejection.
    pub fn engine(message: impl Into<String>) -> Self {
        Self::Engine {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for DispatchError {
    fn from(err: std::io::Error) -> Self {
        Self::Transport {
            message: err.to_string(),
        }
    }
}

/// Result type alias for dispatcher operations.
pub type DispatchResult<T> = std::result::Result<T, DispatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DispatchError::auth_denied("user alice may not write job wf-1");
        assert_eq!(
            err.to_string(),
            "authorization denied: user alice may not write job wf-1"
        );

        let err = DispatchError::unsupported_action("restart");
        assert_eq!(
            err.to_string(),
            "UNSUPPORTED_ACTION: unsupported action [restart]"
        );
    }

    #[test]
    fn test_validation_param_capture() {
        match DispatchError::unsupported_show("everything") {
            DispatchError::Validation { code, param, .. } => {
                assert_eq!(code, codes::UNSUPPORTED_SHOW);
                assert_eq!(param.as_deref(), Some("everything"));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_transport_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: DispatchError = io.into();
        assert!(matches!(err, DispatchError::Transport { .. }));
    }
}
