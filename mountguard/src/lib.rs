//! Mount path validation for app workloads.
//!
//! Decides whether a host path may be bind-mounted into a workload: system
//! directories and pool roots are refused, cluster and host-source paths
//! are judged by the storage-management authority, and pool paths are
//! checked for dataset locks and conflicting attachments.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use mountguard::{MidcltAuthority, MountConfig, MountValidator};
//!
//! let config = MountConfig::load("/etc/mountguard/config.json")?;
//! let validator = MountValidator::new(Arc::new(config), Arc::new(MidcltAuthority::new()));
//! validator.validate_dataset_source_path("/mnt/tank/media")?;
//! ```

pub mod authority;
pub mod config;
pub mod validation;

pub use authority::{Attachment, Authority, MidcltAuthority};
pub use config::{HostSettings, MountConfig, config, init_config, init_config_from};
pub use mountguard_shared::errors::{MountError, MountResult};
pub use validation::{IgnoreRuleSet, MountValidator, PathResolver};
