//! CLI definition and argument parsing for mountguard.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use mountguard::{MidcltAuthority, MountConfig, MountValidator};

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "mountguard", author, version, about = "Validate bind-mount source paths")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
#[non_exhaustive]
pub enum Commands {
    /// Validate a dataset source path
    Validate(crate::commands::validate::ValidateArgs),

    /// Validate a host source path
    ValidateHost(crate::commands::validate_host::ValidateHostArgs),

    /// Load the configuration and print the effective settings
    CheckConfig(crate::commands::check_config::CheckConfigArgs),
}

// ============================================================================
// GLOBAL FLAGS
// ============================================================================

#[derive(Args, Debug, Clone)]
pub struct GlobalFlags {
    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Configuration file
    #[arg(long, global = true, env = "MOUNTGUARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Authority client binary
    #[arg(long, global = true, default_value = "midclt")]
    pub client: PathBuf,

    /// Seconds to wait for authority calls
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout: u64,
}

impl GlobalFlags {
    pub fn load_config(&self) -> anyhow::Result<MountConfig> {
        let path = self
            .config
            .clone()
            .unwrap_or_else(mountguard::config::default_config_path);
        let config = mountguard::init_config_from(&path)
            .with_context(|| format!("failed to load {}", path.display()))?;
        Ok(config.clone())
    }

    pub fn create_validator(&self) -> anyhow::Result<MountValidator> {
        let config = self.load_config()?;
        let authority = MidcltAuthority::with_program(&self.client);
        Ok(MountValidator::new(Arc::new(config), Arc::new(authority)))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}
