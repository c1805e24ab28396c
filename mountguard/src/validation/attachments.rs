//! Lock and attachment checks for paths inside a pool.
//!
//! Only an explicit "locked" answer blocks a mount; a failed lock or
//! attachment lookup is logged and treated as no objection.

use mountguard_shared::constants::service_types;
use mountguard_shared::errors::{MountError, MountResult};

use crate::authority::{self, Attachment, Authority};

/// Whether `path` is an app-managed volume of some release under `root_dataset`:
/// `/mnt/<root>/releases/<app>/volumes/ix_volumes...`.
pub fn is_ix_volume_path(path: &str, root_dataset: &str) -> bool {
    let release_path = format!("/mnt/{}/releases", root_dataset.trim_matches('/'));
    let Some(rest) = path.strip_prefix(&format!("{}/", release_path)) else {
        return false;
    };

    let app_name = rest.split('/').next().unwrap_or_default();
    if app_name.is_empty() {
        return false;
    }

    path.contains(&format!("{}/{}/volumes/ix_volumes", release_path, app_name))
}

/// Fails if the authority reports `path` as inside a locked dataset.
pub fn check_locked(authority: &dyn Authority, path: &str, path_type: &str) -> MountResult<()> {
    match authority::path_in_locked_datasets(authority, path) {
        Ok(true) => Err(MountError::LockedDataset {
            path: path.to_string(),
            path_type: path_type.to_string(),
        }),
        Ok(false) => Ok(()),
        Err(e) => {
            tracing::warn!(path = %path, error = %e, "Lock lookup failed, treating path as unlocked");
            Ok(())
        }
    }
}

/// Service types holding `path` that conflict with a new mount.
///
/// Chart releases are always skipped since an app's own paths are attached
/// to it. Kubernetes attachments are skipped for ix-volume paths.
pub fn conflicting_services(
    attachments: Vec<Attachment>,
    path: &str,
    root_dataset: &str,
) -> Vec<String> {
    attachments
        .into_iter()
        .map(|a| a.service_type)
        .filter(|service| {
            let expected = service == service_types::CHART_RELEASES
                || (service == service_types::KUBERNETES && is_ix_volume_path(path, root_dataset));
            !expected
        })
        .collect()
}

/// Fails if services other than the expected ones are attached to `path`.
pub fn check_attachments(
    authority: &dyn Authority,
    path: &str,
    path_type: &str,
    root_dataset: &str,
) -> MountResult<()> {
    let attachments = match authority::attachments_with_path(authority, path) {
        Ok(attachments) => attachments,
        Err(e) => {
            tracing::warn!(path = %path, error = %e, "Attachment lookup failed, skipping check");
            return Ok(());
        }
    };

    let services = conflicting_services(attachments, path, root_dataset);
    if services.is_empty() {
        return Ok(());
    }

    tracing::debug!(path = %path, services = ?services, "Path is attached to other services");
    Err(MountError::PathAttached {
        path: path.to_string(),
        path_type: path_type.to_string(),
        services,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    const IX_PATH: &str = "/mnt/myroot/releases/myapp/volumes/ix_volumes/data";

    struct Scripted(MountResult<Value>);

    impl Authority for Scripted {
        fn invoke(&self, method: &str, _args: &[Value]) -> MountResult<Value> {
            match &self.0 {
                Ok(value) => Ok(value.clone()),
                Err(_) => Err(MountError::AuthorityCall {
                    method: method.to_string(),
                    message: "timed out".to_string(),
                }),
            }
        }
    }

    fn attachment(service_type: &str) -> Attachment {
        Attachment {
            service_type: service_type.to_string(),
        }
    }

    #[test]
    fn detects_ix_volume_paths() {
        assert!(is_ix_volume_path(IX_PATH, "myroot"));
        assert!(is_ix_volume_path(
            "/mnt/myroot/releases/myapp/volumes/ix_volumes",
            "myroot"
        ));
        assert!(is_ix_volume_path(
            "/mnt/tank/ix-apps/releases/app/volumes/ix_volumes/x",
            "tank/ix-apps"
        ));
    }

    #[test]
    fn rejects_non_ix_volume_paths() {
        assert!(!is_ix_volume_path(IX_PATH, "otherroot"));
        assert!(!is_ix_volume_path("/mnt/myroot/releases/myapp/volumes/data", "myroot"));
        assert!(!is_ix_volume_path("/mnt/myroot/releases//volumes/ix_volumes", "myroot"));
        assert!(!is_ix_volume_path("/mnt/myroot/releasesfoo/app/volumes/ix_volumes", "myroot"));
    }

    #[test]
    fn kubernetes_on_ix_volume_is_expected() {
        let services = conflicting_services(vec![attachment("Kubernetes")], IX_PATH, "myroot");
        assert!(services.is_empty());
    }

    #[test]
    fn other_services_on_ix_volume_conflict() {
        let services = conflicting_services(
            vec![attachment("Rsync Task"), attachment("Chart Releases")],
            IX_PATH,
            "myroot",
        );
        assert_eq!(services, vec!["Rsync Task".to_string()]);
    }

    #[test]
    fn kubernetes_outside_ix_volume_conflicts() {
        let services =
            conflicting_services(vec![attachment("Kubernetes")], "/mnt/myroot/data", "myroot");
        assert_eq!(services, vec!["Kubernetes".to_string()]);
    }

    #[test]
    fn attachment_denial_lists_services() {
        let authority = Scripted(Ok(json!([
            {"type": "Snapshot Task"},
            {"type": "CloudSync Task"},
            {"type": "Chart Releases"}
        ])));
        let err = check_attachments(&authority, "/mnt/tank/ds", "path", "tank").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("`Snapshot Task, CloudSync Task`"), "{message}");
    }

    #[test]
    fn locked_answer_denies() {
        let err = check_locked(&Scripted(Ok(json!(true))), "/mnt/tank/enc", "path").unwrap_err();
        assert_eq!(err.to_string(), "Dataset /mnt/tank/enc path is locked");
        assert!(check_locked(&Scripted(Ok(json!(false))), "/mnt/tank/enc", "path").is_ok());
    }

    #[test]
    fn lookup_failures_fail_open() {
        let failing = Scripted(Err(MountError::AuthorityCall {
            method: String::new(),
            message: String::new(),
        }));
        assert!(check_locked(&failing, "/mnt/tank/enc", "path").is_ok());
        assert!(check_attachments(&failing, "/mnt/tank/ds", "path", "tank").is_ok());
    }
}
