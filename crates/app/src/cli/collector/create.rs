use clap::Args;
use reprieve_app::domain::collectors::{
    CollectorsService, PgCollectorsService, data::NewCollector, records::CollectorUuid,
};

#[derive(Debug, Args)]
pub(crate) struct CreateCollectorArgs {
    /// Food bank or volunteer name
    #[arg(long)]
    name: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Optional collector UUID; generated when omitted
    #[arg(long)]
    collector_uuid: Option<CollectorUuid>,
}

pub(crate) async fn run(args: CreateCollectorArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;

    let collector = PgCollectorsService::new(db)
        .create_collector(NewCollector {
            uuid: args.collector_uuid.unwrap_or_default(),
            name: args.name,
        })
        .await
        .map_err(|error| format!("failed to create collector: {error}"))?;

    println!("collector_uuid: {}", collector.uuid);
    println!("collector_name: {}", collector.name);

    Ok(())
}
