use anyhow::Result;
use clap::Args;
use mountguard::{HostSettings, IgnoreRuleSet};

use crate::cli::GlobalFlags;

#[derive(Args, Debug)]
pub struct CheckConfigArgs {
    /// Also print the full ignore list
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn execute(args: CheckConfigArgs, global: &GlobalFlags) -> Result<()> {
    let config = global.load_config()?;

    println!("Apps dataset:          {}", config.root_dataset());
    println!("Verify volumes:        {}", config.can_verify_volumes());
    println!("Verify locked volumes: {}", config.can_verify_locked_volumes());
    println!("Verify attach path:    {}", config.can_verify_attach_path());

    if args.verbose {
        println!("Ignore paths:");
        for prefix in IgnoreRuleSet::new(config.ignore_paths()).prefixes() {
            println!("  {}", prefix);
        }
    }

    Ok(())
}
