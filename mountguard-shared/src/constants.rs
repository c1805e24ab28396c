//! Well-known names shared between the library and the CLI.

/// Methods exposed by the storage-management authority.
pub mod methods {
    pub const PATH_IN_LOCKED_DATASETS: &str = "pool.dataset.path_in_locked_datasets";
    pub const ATTACHMENTS_WITH_PATH: &str = "pool.dataset.attachments_with_path";
    pub const VALIDATE_CLUSTER_PATH: &str = "chart.release.validate_cluster_path";
    pub const VALIDATE_HOST_SOURCE_PATH: &str = "chart.release.validate_host_source_path";
}

/// Attachment service types that get special treatment.
pub mod service_types {
    /// A chart release is always attached to its own paths.
    pub const CHART_RELEASES: &str = "Chart Releases";
    pub const KUBERNETES: &str = "Kubernetes";
}

/// Prefix under which pools are mounted on the host.
pub const POOL_MOUNT_PREFIX: &str = "/mnt/";

/// First path segment of cluster-relative paths.
pub const CLUSTER_SEGMENT: &str = "cluster";

/// Prefixes that bypass pool boundary and attachment checks.
///
/// `/usr/share/zoneinfo` and `/usr/lib/os-release` are here so workloads can
/// mount localtime and os-release.
pub const BUILTIN_IGNORE_PATHS: &[&str] = &[
    "/etc/",
    "/sys/",
    "/proc/",
    "/var/lib/kubelet/",
    "/dev/",
    "/mnt/",
    "/home/keys/",
    "/run/",
    "/var/run/",
    "/var/lock/",
    "/lock",
    "/usr/share/zoneinfo",
    "/usr/lib/os-release",
];
