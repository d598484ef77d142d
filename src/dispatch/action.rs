//! # Job Actions
//!
//! Closed enumeration of the mutating job-lifecycle actions. Parsing is the
//! validation point: an unknown wire string is a client error, never a
//! default, and the dispatcher can then match exhaustively.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DispatchError;

/// Requested mutation on a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    Start,
    Resume,
    Suspend,
    Kill,
    Change,
    Ignore,
    Rerun,
    CoordRerun,
    BundleRerun,
    #[serde(rename = "update")]
    CoordUpdate,
    SlaEnableAlert,
    SlaDisableAlert,
    SlaChange,
}

impl Action {
    /// Wire string of this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Resume => "resume",
            Self::Suspend => "suspend",
            Self::Kill => "kill",
            Self::Change => "change",
            Self::Ignore => "ignore",
            Self::Rerun => "rerun",
            Self::CoordRerun => "coord-rerun",
            Self::BundleRerun => "bundle-rerun",
            Self::CoordUpdate => "update",
            Self::SlaEnableAlert => "sla-enable-alert",
            Self::SlaDisableAlert => "sla-disable-alert",
            Self::SlaChange => "sla-change",
        }
    }

    /// Whether the command must carry a configuration document payload.
    pub fn requires_structured_payload(&self) -> bool {
        matches!(self, Self::Rerun | Self::CoordUpdate)
    }

    /// Whether a declared content type must be the structured configuration
    /// type. Broader than the payload requirement: coordinator/bundle reruns
    /// and the SLA actions validate the declared type without reading a body.
    pub fn validates_content_type(&self) -> bool {
        matches!(
            self,
            Self::Rerun
                | Self::CoordRerun
                | Self::BundleRerun
                | Self::CoordUpdate
                | Self::SlaEnableAlert
                | Self::SlaDisableAlert
                | Self::SlaChange
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Action {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "resume" => Ok(Self::Resume),
            "suspend" => Ok(Self::Suspend),
            "kill" => Ok(Self::Kill),
            "change" => Ok(Self::Change),
            "ignore" => Ok(Self::Ignore),
            "rerun" => Ok(Self::Rerun),
            "coord-rerun" => Ok(Self::CoordRerun),
            "bundle-rerun" => Ok(Self::BundleRerun),
            "update" => Ok(Self::CoordUpdate),
            "sla-enable-alert" => Ok(Self::SlaEnableAlert),
            "sla-disable-alert" => Ok(Self::SlaDisableAlert),
            "sla-change" => Ok(Self::SlaChange),
            other => Err(DispatchError::unsupported_action(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::codes;

    #[test]
    fn test_round_trip_wire_strings() {
        for action in [
            Action::Start,
            Action::Resume,
            Action::Suspend,
            Action::Kill,
            Action::Change,
            Action::Ignore,
            Action::Rerun,
            Action::CoordRerun,
            Action::BundleRerun,
            Action::CoordUpdate,
            Action::SlaEnableAlert,
            Action::SlaDisableAlert,
            Action::SlaChange,
        ] {
            assert_eq!(action.as_str().parse::<Action>().unwrap(), action);
        }
    }

    #[test]
    fn test_unknown_action_is_validation_error() {
        let err = "restart".parse::<Action>().unwrap_err();
        match err {
            DispatchError::Validation { code, param, .. } => {
                assert_eq!(code, codes::UNSUPPORTED_ACTION);
                assert_eq!(param.as_deref(), Some("restart"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_payload_requirements() {
        assert!(Action::Rerun.requires_structured_payload());
        assert!(Action::CoordUpdate.requires_structured_payload());
        assert!(!Action::CoordRerun.requires_structured_payload());
        assert!(!Action::Start.requires_structured_payload());

        assert!(Action::CoordRerun.validates_content_type());
        assert!(Action::SlaChange.validates_content_type());
        assert!(!Action::Kill.validates_content_type());
    }

    #[test]
    fn test_serde_uses_wire_strings() {
        assert_eq!(
            serde_json::to_string(&Action::CoordUpdate).unwrap(),
            "\"update\""
        );
        assert_eq!(
            serde_json::from_str::<Action>("\"sla-enable-alert\"").unwrap(),
            Action::SlaEnableAlert
        );
    }
}
