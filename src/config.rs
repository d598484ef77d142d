//! # Job Configuration Documents
//!
//! [`JobConfig`] is the flat string-property document a caller submits with
//! rerun and update commands: arbitrary properties plus a handful of
//! well-known keys (user, group, ACL, application paths, library paths).
//! Values are never mutated in place by the dispatcher; derivation produces
//! a new document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::{
    PROP_BUNDLE_APP_PATH, PROP_COORD_APP_PATH, PROP_GROUP_NAME, PROP_JOB_ACL, PROP_LIBPATH,
    PROP_USER_NAME, PROP_WF_APP_PATH,
};

/// Flat string-property configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobConfig {
    properties: BTreeMap<String, String>,
}

impl JobConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a property value. Blank values count as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Remove a property, returning its previous value.
    pub fn unset(&mut self, key: &str) -> Option<String> {
        self.properties.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn user_name(&self) -> Option<&str> {
        self.get(PROP_USER_NAME)
    }

    pub fn set_user_name(&mut self, user: impl Into<String>) {
        self.set(PROP_USER_NAME, user);
    }

    pub fn group_name(&self) -> Option<&str> {
        self.get(PROP_GROUP_NAME)
    }

    pub fn set_group_name(&mut self, group: impl Into<String>) {
        self.set(PROP_GROUP_NAME, group);
    }

    /// Group name with the deprecated ACL property honored as a fallback.
    /// Logs when a document still relies on the deprecated key.
    pub fn group_or_deprecated_acl(&self) -> Option<&str> {
        if let Some(group) = self.group_name() {
            return Some(group);
        }
        let acl = self.get(PROP_JOB_ACL);
        if acl.is_some() {
            warn!(
                deprecated_key = PROP_JOB_ACL,
                replacement_key = PROP_GROUP_NAME,
                "configuration uses deprecated ACL property"
            );
        }
        acl
    }

    pub fn workflow_path(&self) -> Option<&str> {
        self.get(PROP_WF_APP_PATH)
    }

    pub fn coordinator_path(&self) -> Option<&str> {
        self.get(PROP_COORD_APP_PATH)
    }

    pub fn bundle_path(&self) -> Option<&str> {
        self.get(PROP_BUNDLE_APP_PATH)
    }

    /// Library path entries, comma separated, blanks preserved for the
    /// caller to filter.
    pub fn lib_paths(&self) -> Vec<&str> {
        self.properties
            .get(PROP_LIBPATH)
            .map(|v| v.split(',').map(str::trim).collect())
            .unwrap_or_default()
    }
}

impl FromIterator<(String, String)> for JobConfig {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            properties: iter.into_iter().collect(),
        }
    }
}
