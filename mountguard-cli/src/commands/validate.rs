use anyhow::Result;
use clap::Args;

use crate::cli::GlobalFlags;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Source path of the dataset mount
    pub path: String,
}

pub async fn execute(args: ValidateArgs, global: &GlobalFlags) -> Result<()> {
    let path = args.path.clone();
    super::run_validation(global, move |validator| {
        validator.validate_dataset_source_path(&path)
    })
    .await?;

    println!("{}: allowed", args.path);
    Ok(())
}
