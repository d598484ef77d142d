//! # Job Shows
//!
//! Closed enumeration of the read-only job views. Absent show defaults to
//! [`ShowKind::Info`]; unknown strings are client errors. The streaming log
//! kinds read immutable history and hold no pause bracket; the graph is
//! paused only around stream production.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DispatchError;

/// Requested read-only view of a job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShowKind {
    #[default]
    Info,
    #[serde(rename = "allruns")]
    AllRunsForCoordAction,
    #[serde(rename = "jmstopic")]
    JmsTopic,
    Log,
    #[serde(rename = "errorlog")]
    ErrorLog,
    #[serde(rename = "auditlog")]
    AuditLog,
    Definition,
    Graph,
    Status,
    #[serde(rename = "retries")]
    ActionRetries,
    MissingDependencies,
    #[serde(rename = "wf-actions")]
    WfActionsInCoord,
}

impl ShowKind {
    /// Wire string of this show kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::AllRunsForCoordAction => "allruns",
            Self::JmsTopic => "jmstopic",
            Self::Log => "log",
            Self::ErrorLog => "errorlog",
            Self::AuditLog => "auditlog",
            Self::Definition => "definition",
            Self::Graph => "graph",
            Self::Status => "status",
            Self::ActionRetries => "retries",
            Self::MissingDependencies => "missing-dependencies",
            Self::WfActionsInCoord => "wf-actions",
        }
    }

    /// Whether the view streams bytes instead of rendering a structured body.
    pub fn is_streaming(&self) -> bool {
        matches!(self, Self::Log | Self::ErrorLog | Self::AuditLog | Self::Graph)
    }

    /// Whether serving the view suspends maintenance sweeps. The log streams
    /// read append-only history and run concurrently with scheduling.
    pub fn holds_pause_bracket(&self) -> bool {
        !matches!(self, Self::Log | Self::ErrorLog | Self::AuditLog)
    }
}

impl fmt::Display for ShowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ShowKind {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Self::Info),
            "allruns" => Ok(Self::AllRunsForCoordAction),
            "jmstopic" => Ok(Self::JmsTopic),
            "log" => Ok(Self::Log),
            "errorlog" => Ok(Self::ErrorLog),
            "auditlog" => Ok(Self::AuditLog),
            "definition" => Ok(Self::Definition),
            "graph" => Ok(Self::Graph),
            "status" => Ok(Self::Status),
            "retries" => Ok(Self::ActionRetries),
            "missing-dependencies" => Ok(Self::MissingDependencies),
            "wf-actions" => Ok(Self::WfActionsInCoord),
            other => Err(DispatchError::unsupported_show(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::codes;

    #[test]
    fn test_default_is_info() {
        assert_eq!(ShowKind::default(), ShowKind::Info);
    }

    #[test]
    fn test_round_trip_wire_strings() {
        for kind in [
            ShowKind::Info,
            ShowKind::AllRunsForCoordAction,
            ShowKind::JmsTopic,
            ShowKind::Log,
            ShowKind::ErrorLog,
            ShowKind::AuditLog,
            ShowKind::Definition,
            ShowKind::Graph,
            ShowKind::Status,
            ShowKind::ActionRetries,
            ShowKind::MissingDependencies,
            ShowKind::WfActionsInCoord,
        ] {
            assert_eq!(kind.as_str().parse::<ShowKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_show_is_validation_error() {
        let err = "everything".parse::<ShowKind>().unwrap_err();
        match err {
            DispatchError::Validation { code, .. } => {
                assert_eq!(code, codes::UNSUPPORTED_SHOW);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_pause_bracket_policy() {
        assert!(!ShowKind::Log.holds_pause_bracket());
        assert!(!ShowKind::ErrorLog.holds_pause_bracket());
        assert!(!ShowKind::AuditLog.holds_pause_bracket());
        assert!(ShowKind::Graph.holds_pause_bracket());
        assert!(ShowKind::Info.holds_pause_bracket());
        assert!(ShowKind::Definition.holds_pause_bracket());
    }

    #[test]
    fn test_streaming_kinds() {
        assert!(ShowKind::Log.is_streaming());
        assert!(ShowKind::Graph.is_streaming());
        assert!(!ShowKind::Info.is_streaming());
        assert!(!ShowKind::Definition.is_streaming());
    }
}
