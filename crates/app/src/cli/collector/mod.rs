use clap::{Args, Subcommand};

mod create;

#[derive(Debug, Args)]
pub(crate) struct CollectorCommand {
    #[command(subcommand)]
    command: CollectorSubcommand,
}

#[derive(Debug, Subcommand)]
enum CollectorSubcommand {
    Create(create::CreateCollectorArgs),
}

pub(crate) async fn run(command: CollectorCommand) -> Result<(), String> {
    match command.command {
        CollectorSubcommand::Create(args) => create::run(args).await,
    }
}
