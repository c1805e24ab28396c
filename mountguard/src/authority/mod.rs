//! Access to the external storage-management authority.
//!
//! The authority owns the facts this crate does not track itself: which
//! datasets are locked, which services hold a path, and how cluster and
//! host-source paths are judged. Everything goes through one generic
//! [`Authority::invoke`] call so the transport can be swapped out.

mod midclt;

pub use midclt::MidcltAuthority;

use mountguard_shared::constants::methods;
use mountguard_shared::errors::{MountError, MountResult};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Synchronous RPC-style access to the storage-management authority.
///
/// # Example
///
/// ```ignore
/// let authority = MidcltAuthority::new();
/// let locked = authority.invoke(
///     "pool.dataset.path_in_locked_datasets",
///     &[serde_json::json!("/mnt/tank/data")],
/// )?;
/// ```
pub trait Authority: Send + Sync {
    /// Call `method` with positional `args` and return its JSON result.
    ///
    /// # Errors
    ///
    /// Returns [`MountError::AuthorityCall`] if the call could not be made or
    /// the authority reported a failure.
    fn invoke(&self, method: &str, args: &[Value]) -> MountResult<Value>;
}

/// A service holding a claim on a path.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Attachment {
    #[serde(rename = "type")]
    pub service_type: String,
}

// ============================================================================
// TYPED CALLS
// ============================================================================

/// Whether `path` lies inside a locked dataset.
pub fn path_in_locked_datasets(authority: &dyn Authority, path: &str) -> MountResult<bool> {
    call(authority, methods::PATH_IN_LOCKED_DATASETS, path)
}

/// Services already attached to `path`.
pub fn attachments_with_path(authority: &dyn Authority, path: &str) -> MountResult<Vec<Attachment>> {
    call::<Option<Vec<Attachment>>>(authority, methods::ATTACHMENTS_WITH_PATH, path)
        .map(Option::unwrap_or_default)
}

/// Validation errors for a cluster-relative path; empty when it is acceptable.
pub fn validate_cluster_path(authority: &dyn Authority, path: &str) -> MountResult<Vec<String>> {
    call::<Option<Vec<String>>>(authority, methods::VALIDATE_CLUSTER_PATH, path)
        .map(Option::unwrap_or_default)
}

/// Validation error for a host-source path, if any.
pub fn validate_host_source_path(
    authority: &dyn Authority,
    path: &str,
) -> MountResult<Option<String>> {
    call::<Option<String>>(authority, methods::VALIDATE_HOST_SOURCE_PATH, path)
        .map(|reason| reason.filter(|r| !r.is_empty()))
}

fn call<T: DeserializeOwned>(authority: &dyn Authority, method: &str, path: &str) -> MountResult<T> {
    let result = authority.invoke(method, &[Value::from(path)])?;
    serde_json::from_value(result).map_err(|e| MountError::AuthorityCall {
        method: method.to_string(),
        message: format!("unexpected response: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Fixed(Value);

    impl Authority for Fixed {
        fn invoke(&self, _method: &str, args: &[Value]) -> MountResult<Value> {
            assert_eq!(args.len(), 1);
            Ok(self.0.clone())
        }
    }

    #[test]
    fn decodes_attachments() {
        let authority = Fixed(json!([
            {"type": "Rsync Task", "id": 3},
            {"type": "Chart Releases"}
        ]));
        let attachments = attachments_with_path(&authority, "/mnt/tank").unwrap();
        assert_eq!(attachments.len(), 2);
        assert_eq!(attachments[0].service_type, "Rsync Task");
    }

    #[test]
    fn null_results_mean_nothing_to_report() {
        let authority = Fixed(Value::Null);
        assert!(attachments_with_path(&authority, "/mnt/tank").unwrap().is_empty());
        assert!(validate_cluster_path(&authority, "/cluster/a").unwrap().is_empty());
        assert_eq!(validate_host_source_path(&authority, "/data").unwrap(), None);
    }

    #[test]
    fn empty_host_source_reason_is_not_a_denial() {
        let authority = Fixed(json!(""));
        assert_eq!(validate_host_source_path(&authority, "/data").unwrap(), None);
    }

    #[test]
    fn unexpected_shape_is_an_authority_error() {
        let authority = Fixed(json!({"locked": true}));
        let err = path_in_locked_datasets(&authority, "/mnt/tank").unwrap_err();
        match err {
            MountError::AuthorityCall { method, .. } => {
                assert_eq!(method, methods::PATH_IN_LOCKED_DATASETS)
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
