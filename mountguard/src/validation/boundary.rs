//! Pool boundary classification.
//!
//! Decides whether a path may be mounted at all, before any lock or
//! attachment lookups. Anything that is neither ignored nor
//! cluster-relative is denied.

use mountguard_shared::constants::CLUSTER_SEGMENT;
use mountguard_shared::errors::{MountError, MountResult};

use super::ignore::IgnoreRuleSet;
use super::path::normalize;
use crate::authority::{self, Authority};

/// Segments a `/mnt/...` path needs before it names something below a pool root.
const MIN_POOL_DEPTH: usize = 3;

/// Outcome of [`classify`].
#[derive(Debug)]
pub enum Decision {
    Allowed,
    /// Cluster-relative path; the authority decides.
    DelegateToAuthority,
    Denied(MountError),
}

/// Classify `path` using local rules only.
pub fn classify(path: &str, path_type: &str, segments: &[&str], ignore: &IgnoreRuleSet) -> Decision {
    if ignore.should_ignore(path) {
        // "/" normalizes to no segments and stays allowed.
        let too_shallow = !segments.is_empty()
            && segments.len() < MIN_POOL_DEPTH
            && segments[0] == "mnt";
        if too_shallow {
            return Decision::Denied(pool_root_not_allowed(path));
        }
        return Decision::Allowed;
    }

    if segments.first() == Some(&CLUSTER_SEGMENT) {
        return Decision::DelegateToAuthority;
    }

    Decision::Denied(not_allowed(path, path_type))
}

/// Boundary check for one path, resolving delegated decisions.
pub struct BoundaryValidator<'a> {
    ignore: &'a IgnoreRuleSet,
    authority: &'a dyn Authority,
}

impl<'a> BoundaryValidator<'a> {
    pub fn new(ignore: &'a IgnoreRuleSet, authority: &'a dyn Authority) -> Self {
        Self { ignore, authority }
    }

    /// # Errors
    ///
    /// Returns the denial for `path`, or [`MountError::AuthorityCall`] if a
    /// cluster path could not be checked.
    pub fn check(&self, path: &str, path_type: &str) -> MountResult<()> {
        let segments = normalize(path);
        match classify(path, path_type, &segments, self.ignore) {
            Decision::Allowed => Ok(()),
            Decision::Denied(err) => Err(err),
            Decision::DelegateToAuthority => {
                tracing::debug!(path = %path, "Delegating cluster path to authority");
                let errors = authority::validate_cluster_path(self.authority, path)?;
                match errors.into_iter().next() {
                    Some(reason) => Err(MountError::ClusterPathValidation(reason)),
                    None => Ok(()),
                }
            }
        }
    }
}

fn pool_root_not_allowed(path: &str) -> MountError {
    MountError::PathOutsidePool(format!(
        "Invalid path {}. Mounting root dataset or path outside a pool is not allowed",
        path
    ))
}

fn not_allowed(path: &str, path_type: &str) -> MountError {
    MountError::PathOutsidePool(format!("{} {} not allowed to be mounted", path, path_type))
}
