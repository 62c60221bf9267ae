use std::path::PathBuf;

use crate::util::{Output, SessionConfigArg};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PrintConfigArg {
    #[clap(flatten)]
    config: SessionConfigArg,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &PrintConfigArg) -> anyhow::Result<()> {
    let PrintConfigArg { config, output } = arg;
    let config = config.resolve()?;
    Output::save_json(&config, output.clone())
}
