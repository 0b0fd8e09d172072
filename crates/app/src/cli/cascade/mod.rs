use clap::{Args, Subcommand};

mod run;

#[derive(Debug, Args)]
pub(crate) struct CascadeCommand {
    #[command(subcommand)]
    command: CascadeSubcommand,
}

#[derive(Debug, Subcommand)]
enum CascadeSubcommand {
    Run(run::RunCascadeArgs),
}

pub(crate) async fn run(command: CascadeCommand) -> Result<(), String> {
    match command.command {
        CascadeSubcommand::Run(args) => run::run(args).await,
    }
}
