use clap::Args;
use reprieve_app::domain::locations::{
    LocationsService, PgLocationsService, data::NewLocation, records::LocationUuid,
};

#[derive(Debug, Args)]
pub(crate) struct CreateLocationArgs {
    /// Store name
    #[arg(long)]
    name: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Optional location UUID; generated when omitted
    #[arg(long)]
    location_uuid: Option<LocationUuid>,
}

pub(crate) async fn run(args: CreateLocationArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;

    let location = PgLocationsService::new(db)
        .create_location(NewLocation {
            uuid: args.location_uuid.unwrap_or_default(),
            name: args.name,
        })
        .await
        .map_err(|error| format!("failed to create location: {error}"))?;

    println!("location_uuid: {}", location.uuid);
    println!("location_name: {}", location.name);

    Ok(())
}
