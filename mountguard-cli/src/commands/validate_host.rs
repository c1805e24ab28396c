use anyhow::Result;
use clap::Args;

use crate::cli::GlobalFlags;

#[derive(Args, Debug)]
pub struct ValidateHostArgs {
    /// Source path of the host-path mount
    pub path: String,
}

pub async fn execute(args: ValidateHostArgs, global: &GlobalFlags) -> Result<()> {
    let path = args.path.clone();
    super::run_validation(global, move |validator| validator.validate_host_source_path(&path))
        .await?;

    println!("{}: allowed", args.path);
    Ok(())
}
