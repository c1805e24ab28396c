//! Error types used across mountguard.

use thiserror::Error;

/// Result type for mountguard operations.
pub type MountResult<T> = Result<T, MountError>;

#[derive(Debug, Error)]
pub enum MountError {
    #[error("configuration error: {0}")]
    Config(String),

    /// Path is a pool root, lies outside every pool, or is otherwise not mountable.
    #[error("{0}")]
    PathOutsidePool(String),

    #[error("Dataset {path} {path_type} is locked")]
    LockedDataset { path: String, path_type: String },

    #[error(
        "Invalid mount {path_type}. {path}. Following service(s) uses this path: `{joined}`.",
        joined = .services.join(", ")
    )]
    PathAttached {
        path: String,
        path_type: String,
        services: Vec<String>,
    },

    /// Denial reported by the authority for a cluster-relative path.
    #[error("{0}")]
    ClusterPathValidation(String),

    /// Denial reported by the authority for a host-source-path mount.
    #[error("{0}")]
    HostSourcePathValidation(String),

    #[error("authority call {method} failed: {message}")]
    AuthorityCall { method: String, message: String },
}

impl MountError {
    /// Whether this error is a policy decision rather than a failure to decide.
    pub fn is_denial(&self) -> bool {
        matches!(
            self,
            MountError::PathOutsidePool(_)
                | MountError::LockedDataset { .. }
                | MountError::PathAttached { .. }
                | MountError::ClusterPathValidation(_)
                | MountError::HostSourcePathValidation(_)
        )
    }
}

/// JSON that does not match the expected configuration shape.
impl From<serde_json::Error> for MountError {
    fn from(err: serde_json::Error) -> Self {
        MountError::Config(format!("malformed configuration: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attached_message_joins_services() {
        let err = MountError::PathAttached {
            path: "/mnt/tank/data".into(),
            path_type: "path".into(),
            services: vec!["Rsync Task".into(), "Snapshot Task".into()],
        };
        assert_eq!(
            err.to_string(),
            "Invalid mount path. /mnt/tank/data. Following service(s) uses this path: `Rsync Task, Snapshot Task`."
        );
    }

    #[test]
    fn authority_failures_are_not_denials() {
        let err = MountError::AuthorityCall {
            method: "pool.dataset.attachments_with_path".into(),
            message: "connection refused".into(),
        };
        assert!(!err.is_denial());
        assert!(MountError::ClusterPathValidation("bad path".into()).is_denial());
    }

    #[test]
    fn json_errors_are_config_errors() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = MountError::from(json_err);
        assert!(matches!(err, MountError::Config(_)));
        assert!(err.to_string().starts_with("configuration error: malformed configuration:"));
    }
}
