//! # Application-Path Authorization
//!
//! Validates and authorizes the application path carried in a rerun/update
//! configuration document: resolves the effective ACL, applies the
//! library-path fallback, requires exactly one of the three path kinds, and
//! consults the [`AuthorizationGate`] with the definition filename fixed for
//! that kind.
//!
//! All functions derive a new [`JobConfig`] instead of mutating the caller's
//! document; the bundle-path elision used by coordinator updates is an
//! explicit derive/restore pair.

use std::fmt;

use tracing::{debug, warn};

use crate::config::JobConfig;
use crate::constants::{
    BUNDLE_DEFINITION_FILE, COORDINATOR_DEFINITION_FILE, PROP_BUNDLE_APP_PATH,
    PROP_COORD_APP_PATH, PROP_WF_APP_PATH, WORKFLOW_DEFINITION_FILE,
};
use crate::error::{codes, DispatchError, DispatchResult};

use super::AuthorizationGate;

/// The three application kinds a job definition can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppPathKind {
    Workflow,
    Coordinator,
    Bundle,
}

impl AppPathKind {
    /// Configuration property carrying this kind's application path.
    pub fn property_key(&self) -> &'static str {
        match self {
            Self::Workflow => PROP_WF_APP_PATH,
            Self::Coordinator => PROP_COORD_APP_PATH,
            Self::Bundle => PROP_BUNDLE_APP_PATH,
        }
    }

    /// Definition filename expected under this kind's application path.
    /// Part of the authorization check, not documentation.
    pub fn definition_file(&self) -> &'static str {
        match self {
            Self::Workflow => WORKFLOW_DEFINITION_FILE,
            Self::Coordinator => COORDINATOR_DEFINITION_FILE,
            Self::Bundle => BUNDLE_DEFINITION_FILE,
        }
    }

    pub fn all() -> [AppPathKind; 3] {
        [Self::Workflow, Self::Coordinator, Self::Bundle]
    }
}

impl fmt::Display for AppPathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Workflow => write!(f, "workflow"),
            Self::Coordinator => write!(f, "coordinator"),
            Self::Bundle => write!(f, "bundle"),
        }
    }
}

/// Application paths present in a configuration document, in kind order.
pub fn present_app_paths(config: &JobConfig) -> Vec<(AppPathKind, String)> {
    AppPathKind::all()
        .into_iter()
        .filter_map(|kind| {
            config
                .get(kind.property_key())
                .map(|path| (kind, path.to_string()))
        })
        .collect()
}

/// Resolve the effective ACL for a document: explicit group, else the
/// deprecated ACL property, else the caller's policy-default group when the
/// gate allows that fallback.
pub async fn resolve_effective_acl<G: AuthorizationGate + ?Sized>(
    gate: &G,
    config: &JobConfig,
    user: &str,
) -> DispatchResult<Option<String>> {
    if let Some(acl) = config.group_or_deprecated_acl() {
        return Ok(Some(acl.to_string()));
    }
    if gate.use_default_group_as_acl() {
        let group = gate
            .default_group(user)
            .await
            .map_err(|e| DispatchError::auth_denied(e.to_string()))?;
        return Ok(Some(group));
    }
    Ok(None)
}

/// Authorize the application path carried by `config`, returning the derived
/// document the engine should receive: resolved group written back, library
/// path promoted into the workflow slot when no path was set.
pub async fn authorize_for_app<G: AuthorizationGate + ?Sized>(
    gate: &G,
    config: &JobConfig,
) -> DispatchResult<JobConfig> {
    let user = config
        .user_name()
        .ok_or_else(|| {
            DispatchError::invalid_param(
                codes::USER_NAME_REQUIRED,
                "configuration is missing the submitting user",
                crate::constants::PROP_USER_NAME,
            )
        })?
        .to_string();

    let mut derived = config.clone();
    let acl = resolve_effective_acl(gate, config, &user).await?;
    if let Some(acl) = &acl {
        derived.set_group_name(acl.clone());
    }

    if present_app_paths(&derived).is_empty() {
        match derived
            .lib_paths()
            .into_iter()
            .find(|p| !p.trim().is_empty())
        {
            Some(lib) => {
                debug!(lib_path = lib, "no application path set, promoting first library path");
                let lib = lib.trim().to_string();
                derived.set(PROP_WF_APP_PATH, lib);
            }
            None => {
                return Err(DispatchError::validation(
                    codes::APP_PATH_REQUIRED,
                    "configuration carries no application path",
                ));
            }
        }
    }

    let mut present = present_app_paths(&derived);
    if present.len() > 1 {
        let kinds: Vec<String> = present.iter().map(|(k, _)| k.to_string()).collect();
        return Err(DispatchError::invalid_param(
            codes::MULTIPLE_APP_PATHS,
            "exactly one application path must be set",
            kinds.join(","),
        ));
    }
    let Some((kind, path)) = present.pop() else {
        return Err(DispatchError::validation(
            codes::APP_PATH_REQUIRED,
            "configuration carries no application path",
        ));
    };

    gate.authorize_for_app(&user, acl.as_deref(), &path, kind.definition_file(), &derived)
        .await
        .map_err(|e| {
            warn!(user = %user, app_path = %path, kind = %kind, "application path authorization denied");
            DispatchError::auth_denied(e.to_string())
        })?;

    Ok(derived)
}

/// Derive a document without its bundle path, returning the elided value so
/// it can be restored after authorization. A coordinator created under a
/// bundle must be individually updatable without re-proving bundle-level
/// permission.
pub fn elide_bundle_path(config: &JobConfig) -> (JobConfig, Option<String>) {
    let mut derived = config.clone();
    let bundle = derived.unset(PROP_BUNDLE_APP_PATH);
    (derived, bundle)
}

/// Restore a previously elided bundle path into a derived document.
pub fn restore_bundle_path(mut config: JobConfig, bundle: Option<String>) -> JobConfig {
    if let Some(bundle) = bundle {
        config.set(PROP_BUNDLE_APP_PATH, bundle);
    }
    config
}

/// Normalize application paths after authorization: strip trailing slashes
/// so engines see a canonical location.
pub fn normalize_app_paths(config: &JobConfig) -> JobConfig {
    let mut derived = config.clone();
    for kind in AppPathKind::all() {
        if let Some(path) = derived.get(kind.property_key()) {
            let trimmed = path.trim_end_matches('/');
            if trimmed != path {
                let trimmed = trimmed.to_string();
                derived.set(kind.property_key(), trimmed);
            }
        }
    }
    derived
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthError;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    /// Gate stub recording the app authorization it was asked to perform.
    #[derive(Default)]
    struct StubGate {
        deny_app: bool,
        default_group: Option<String>,
        seen: Mutex<Vec<(String, Option<String>, String, String)>>,
    }

    #[async_trait]
    impl AuthorizationGate for StubGate {
        async fn authorize_for_job(
            &self,
            _user: Option<&str>,
            _job_id: &str,
            _write: bool,
        ) -> Result<(), AuthError> {
            Ok(())
        }

        async fn authorize_for_app(
            &self,
            user: &str,
            acl: Option<&str>,
            app_path: &str,
            definition_file: &str,
            _config: &JobConfig,
        ) -> Result<(), AuthError> {
            self.seen.lock().push((
                user.to_string(),
                acl.map(str::to_string),
                app_path.to_string(),
                definition_file.to_string(),
            ));
            if self.deny_app {
                Err(AuthError::denied(user, app_path))
            } else {
                Ok(())
            }
        }

        fn use_default_group_as_acl(&self) -> bool {
            self.default_group.is_some()
        }

        async fn default_group(&self, _user: &str) -> Result<String, AuthError> {
            Ok(self.default_group.clone().expect("default group configured"))
        }
    }

    fn config_with(entries: &[(&str, &str)]) -> JobConfig {
        let mut config = JobConfig::new();
        for (k, v) in entries {
            config.set(*k, *v);
        }
        config
    }

    #[tokio::test]
    async fn test_user_name_required() {
        let gate = StubGate::default();
        let config = config_with(&[(PROP_WF_APP_PATH, "/apps/wf")]);

        let err = authorize_for_app(&gate, &config).await.unwrap_err();
        match err {
            DispatchError::Validation { code, .. } => {
                assert_eq!(code, codes::USER_NAME_REQUIRED);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(gate.seen.lock().is_empty());
    }

    #[tokio::test]
    async fn test_explicit_group_wins_over_deprecated_acl() {
        let gate = StubGate {
            default_group: Some("default-grp".to_string()),
            ..Default::default()
        };
        let config = config_with(&[
            ("user.name", "alice"),
            ("group.name", "ops"),
            ("job.acl", "legacy"),
            (PROP_WF_APP_PATH, "/apps/wf"),
        ]);

        let derived = authorize_for_app(&gate, &config).await.unwrap();
        assert_eq!(derived.group_name(), Some("ops"));
        assert_eq!(gate.seen.lock()[0].1.as_deref(), Some("ops"));
    }

    #[tokio::test]
    async fn test_deprecated_acl_wins_over_policy_default() {
        let gate = StubGate {
            default_group: Some("default-grp".to_string()),
            ..Default::default()
        };
        let config = config_with(&[
            ("user.name", "alice"),
            ("job.acl", "legacy"),
            (PROP_COORD_APP_PATH, "/apps/coord"),
        ]);

        let derived = authorize_for_app(&gate, &config).await.unwrap();
        assert_eq!(derived.group_name(), Some("legacy"));
    }

    #[tokio::test]
    async fn test_policy_default_group_written_back() {
        let gate = StubGate {
            default_group: Some("default-grp".to_string()),
            ..Default::default()
        };
        let config = config_with(&[("user.name", "alice"), (PROP_WF_APP_PATH, "/apps/wf")]);

        let derived = authorize_for_app(&gate, &config).await.unwrap();
        assert_eq!(derived.group_name(), Some("default-grp"));
    }

    #[tokio::test]
    async fn test_no_acl_when_policy_disallows_fallback() {
        let gate = StubGate::default();
        let config = config_with(&[("user.name", "alice"), (PROP_WF_APP_PATH, "/apps/wf")]);

        let derived = authorize_for_app(&gate, &config).await.unwrap();
        assert_eq!(derived.group_name(), None);
        assert_eq!(gate.seen.lock()[0].1, None);
    }

    #[tokio::test]
    async fn test_libpath_fallback_into_workflow_slot() {
        let gate = StubGate::default();
        let config = config_with(&[("user.name", "alice"), ("libpath", " , /libs/first ,/libs/second")]);

        let derived = authorize_for_app(&gate, &config).await.unwrap();
        assert_eq!(derived.workflow_path(), Some("/libs/first"));
        let seen = gate.seen.lock();
        assert_eq!(seen[0].2, "/libs/first");
        assert_eq!(seen[0].3, "workflow.xml");
    }

    #[tokio::test]
    async fn test_app_path_required() {
        let gate = StubGate::default();
        let config = config_with(&[("user.name", "alice")]);

        let err = authorize_for_app(&gate, &config).await.unwrap_err();
        match err {
            DispatchError::Validation { code, .. } => {
                assert_eq!(code, codes::APP_PATH_REQUIRED);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_multiple_app_paths_rejected() {
        let gate = StubGate::default();
        let config = config_with(&[
            ("user.name", "alice"),
            (PROP_WF_APP_PATH, "/apps/wf"),
            (PROP_BUNDLE_APP_PATH, "/apps/bundle"),
        ]);

        let err = authorize_for_app(&gate, &config).await.unwrap_err();
        match err {
            DispatchError::Validation { code, param, .. } => {
                assert_eq!(code, codes::MULTIPLE_APP_PATHS);
                assert_eq!(param.as_deref(), Some("workflow,bundle"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(gate.seen.lock().is_empty());
    }

    #[tokio::test]
    async fn test_definition_file_per_kind() {
        let gate = StubGate::default();
        let config = config_with(&[("user.name", "alice"), (PROP_BUNDLE_APP_PATH, "/apps/bundle")]);

        authorize_for_app(&gate, &config).await.unwrap();
        assert_eq!(gate.seen.lock()[0].3, "bundle.xml");
    }

    #[tokio::test]
    async fn test_denial_maps_to_auth_denied() {
        let gate = StubGate {
            deny_app: true,
            ..Default::default()
        };
        let config = config_with(&[("user.name", "alice"), (PROP_WF_APP_PATH, "/apps/wf")]);

        let err = authorize_for_app(&gate, &config).await.unwrap_err();
        assert!(matches!(err, DispatchError::AuthDenied { .. }));
    }

    #[test]
    fn test_elide_and_restore_bundle_path() {
        let config = config_with(&[
            (PROP_COORD_APP_PATH, "/apps/coord"),
            (PROP_BUNDLE_APP_PATH, "/apps/bundle"),
        ]);

        let (elided, bundle) = elide_bundle_path(&config);
        assert_eq!(elided.bundle_path(), None);
        assert_eq!(elided.coordinator_path(), Some("/apps/coord"));
        assert_eq!(bundle.as_deref(), Some("/apps/bundle"));

        let restored = restore_bundle_path(elided, bundle);
        assert_eq!(restored, config);
    }

    #[test]
    fn test_normalize_strips_trailing_slashes() {
        let config = config_with(&[(PROP_WF_APP_PATH, "/apps/wf///")]);
        let derived = normalize_app_paths(&config);
        assert_eq!(derived.workflow_path(), Some("/apps/wf"));
    }
}
