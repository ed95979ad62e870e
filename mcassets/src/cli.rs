use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::fetch::FetchCommand;
use crate::commands::list::ListCommand;

#[derive(Parser)]
#[command(name = "mcassets")]
#[command(about = "Mirror Minecraft assets into a local content-addressable store")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global_args: GlobalArgs,
}

#[derive(clap::Args, Clone)]
pub struct GlobalArgs {
    /// Root directory for the assets tree (defaults to the platform data dir)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download the full asset set for a version
    Fetch(FetchCommand),

    /// List versions known to the Mojang manifest
    #[command(alias = "ls")]
    List(ListCommand),
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Fetch(cmd) => cmd.run(self.global_args).await,
            Commands::List(cmd) => cmd.run(self.global_args).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::Cli;
    use clap::CommandFactory;

    #[test]
    fn test_cli() {
        Cli::command().debug_assert();
    }
}
