use clap::{Args, Subcommand};

mod create;

#[derive(Debug, Args)]
pub(crate) struct LocationCommand {
    #[command(subcommand)]
    command: LocationSubcommand,
}

#[derive(Debug, Subcommand)]
enum LocationSubcommand {
    Create(create::CreateLocationArgs),
}

pub(crate) async fn run(command: LocationCommand) -> Result<(), String> {
    match command.command {
        LocationSubcommand::Create(args) => create::run(args).await,
    }
}
