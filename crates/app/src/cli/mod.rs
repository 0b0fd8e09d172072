use clap::{Parser, Subcommand};

mod cascade;
mod collector;
mod db;
mod item;
mod location;

#[derive(Debug, Parser)]
#[command(name = "reprieve-app", about = "Reprieve CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Location(location::LocationCommand),
    Collector(collector::CollectorCommand),
    Item(item::ItemCommand),
    Cascade(cascade::CascadeCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Location(command) => location::run(command).await,
            Commands::Collector(command) => collector::run(command).await,
            Commands::Item(command) => item::run(command).await,
            Commands::Cascade(command) => cascade::run(command).await,
        }
    }
}

async fn connect(database_url: &str) -> Result<reprieve_app::database::Db, String> {
    let pool = reprieve_app::database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    Ok(reprieve_app::database::Db::new(pool))
}
