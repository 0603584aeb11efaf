#![allow(unused)]

use crate::prelude::*;
use clap::Parser;

mod ask;
mod prelude;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Ask Wolfram|Alpha questions from the terminal"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "WOLFQ_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Ask Wolfram|Alpha a question
    Ask(crate::ask::AskOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load a .env file if one is present before clap resolves env vars.
    dotenv::dotenv().ok();
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Ask(options) => crate::ask::run(options, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
