use clap::Args;
use jiff::Timestamp;
use reprieve_app::domain::{
    cascade::{CascadeService, PgCascadeService},
    locations::records::LocationUuid,
};

#[derive(Debug, Args)]
pub(crate) struct RunCascadeArgs {
    /// Location to run the cascade for
    #[arg(long, env = "DEFAULT_LOCATION_UUID")]
    location_uuid: LocationUuid,

    /// Classify as of this instant instead of the current time
    #[arg(long)]
    now: Option<Timestamp>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: RunCascadeArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;
    let now = args.now.unwrap_or_else(Timestamp::now);

    let summary = PgCascadeService::new(db)
        .run_cascade(args.location_uuid, now)
        .await
        .map_err(|error| format!("cascade run failed: {error}"))?;

    println!("items_scanned: {}", summary.items_scanned);
    println!("items_rescued: {}", summary.items_rescued);
    println!("offers_created: {}", summary.offers_created);

    for (stage, count) in summary.per_stage() {
        println!("stage_{stage}: {count}");
    }

    Ok(())
}
