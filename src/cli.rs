use crate::command::bump::BumpArgs;
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "bump-versions",
    about = "Bump version of selected packages or core requirements (JupyterLab)"
)]
pub struct Cli {
    #[command(flatten)]
    pub bump: BumpArgs,

    /// Print debug logs (overridden by RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
