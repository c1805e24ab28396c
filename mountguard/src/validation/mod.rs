//! Mount path validation.
//!
//! [`MountValidator`] is the entry point. It supports two mount kinds:
//!
//! - **Dataset source paths** ([`MountValidator::validate_dataset_source_path`]):
//!   local rules decide, with lock and attachment facts taken from the authority.
//! - **Host source paths** ([`MountValidator::validate_host_source_path`]):
//!   the authority decides on its own.
//!
//! # Dataset source path pipeline
//!
//! ```text
//! path ──► canonical form? ──► for each variant:
//!                                boundary (ignore rules / cluster / deny)
//!                                lock check        (/mnt/ paths, if enabled)
//!                                attachment check  (/mnt/ paths, if enabled)
//! ```
//!
//! The first failing check wins.

mod attachments;
mod boundary;
mod ignore;
mod path;

pub use attachments::{check_attachments, check_locked, conflicting_services, is_ix_volume_path};
pub use boundary::{BoundaryValidator, Decision, classify};
pub use ignore::IgnoreRuleSet;
pub use path::{FsResolver, PathResolver, normalize};

use std::sync::Arc;

use mountguard_shared::constants::POOL_MOUNT_PREFIX;
use mountguard_shared::errors::{MountError, MountResult};

use crate::authority::{self, Authority};
use crate::config::HostSettings;

/// Label used in messages for the path as given by the caller.
pub const PATH_LABEL: &str = "path";

/// Validates requested bind-mount source paths.
#[derive(Clone)]
pub struct MountValidator {
    settings: Arc<dyn HostSettings>,
    authority: Arc<dyn Authority>,
    resolver: Arc<dyn PathResolver>,
}

impl MountValidator {
    /// Create a validator that resolves canonical paths on the host filesystem.
    pub fn new(settings: Arc<dyn HostSettings>, authority: Arc<dyn Authority>) -> Self {
        Self {
            settings,
            authority,
            resolver: Arc::new(FsResolver::new()),
        }
    }

    /// Replace the canonical-path resolver.
    pub fn with_resolver(mut self, resolver: Arc<dyn PathResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Validate a source path for a dataset (pool-relative) mount.
    ///
    /// Empty paths and a disabled master switch are accepted without any
    /// check. When the path resolves to a different canonical path, both
    /// are validated, the original first.
    ///
    /// # Errors
    ///
    /// Returns the first denial found, or [`MountError::AuthorityCall`] if a
    /// cluster path could not be checked.
    pub fn validate_dataset_source_path(&self, path: &str) -> MountResult<()> {
        if path.is_empty() || !self.settings.can_verify_volumes() {
            return Ok(());
        }

        let variants = self.path_variants(path);
        let ignore = IgnoreRuleSet::new(self.settings.ignore_paths());
        let boundary = BoundaryValidator::new(&ignore, self.authority.as_ref());
        let in_pool = path.starts_with(POOL_MOUNT_PREFIX);

        for (path_type, candidate) in &variants {
            boundary.check(candidate, path_type)?;

            if in_pool && self.settings.can_verify_locked_volumes() {
                check_locked(self.authority.as_ref(), candidate, path_type)?;
            }

            if in_pool && self.settings.can_verify_attach_path() {
                let root_dataset = self.settings.root_dataset();
                check_attachments(self.authority.as_ref(), candidate, path_type, &root_dataset)?;
            }
        }

        tracing::debug!(path = %path, "Dataset source path accepted");
        Ok(())
    }

    /// Validate a source path for a host-path mount.
    ///
    /// The authority makes the whole decision; its reason is returned verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`MountError::HostSourcePathValidation`] on denial, or
    /// [`MountError::AuthorityCall`] if the authority could not be asked.
    pub fn validate_host_source_path(&self, path: &str) -> MountResult<()> {
        match authority::validate_host_source_path(self.authority.as_ref(), path)? {
            Some(reason) => Err(MountError::HostSourcePathValidation(reason)),
            None => Ok(()),
        }
    }

    /// `(label, path)` pairs to validate: the input, then its canonical form
    /// if that differs.
    fn path_variants(&self, path: &str) -> Vec<(String, String)> {
        let mut variants = vec![(PATH_LABEL.to_string(), path.to_string())];

        match self.resolver.resolve(path) {
            Ok(real_path) if real_path != path => {
                variants.push((format!("path (real path of {})", path), real_path));
            }
            Ok(_) => {}
            Err(e) => {
                tracing::error!(path = %path, error = %e, "Unable to determine real path for validation");
            }
        }

        variants
    }
}
