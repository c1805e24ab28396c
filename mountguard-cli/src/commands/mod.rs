pub mod check_config;
pub mod validate;
pub mod validate_host;

use anyhow::{Result, anyhow};
use mountguard::{MountResult, MountValidator};

use crate::cli::GlobalFlags;

/// Run a validation on a blocking thread, bounded by the global timeout.
pub(crate) async fn run_validation<F>(global: &GlobalFlags, validate: F) -> Result<()>
where
    F: FnOnce(&MountValidator) -> MountResult<()> + Send + 'static,
{
    let validator = global.create_validator()?;
    let task = tokio::task::spawn_blocking(move || validate(&validator));

    match tokio::time::timeout(global.timeout(), task).await {
        Ok(joined) => joined?.map_err(Into::into),
        Err(_) => Err(anyhow!(
            "validation timed out after {}s",
            global.timeout().as_secs()
        )),
    }
}
