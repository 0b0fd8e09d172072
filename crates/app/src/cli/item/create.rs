use clap::Args;
use jiff::Timestamp;
use reprieve::Category;
use reprieve_app::domain::{
    items::{ItemsService, PgItemsService, data::NewItem, records::ItemUuid},
    locations::records::LocationUuid,
};

#[derive(Debug, Args)]
pub(crate) struct CreateItemArgs {
    /// Location whose catalog owns the item
    #[arg(long)]
    location_uuid: LocationUuid,

    /// Item name
    #[arg(long)]
    name: String,

    /// One of dairy, produce, bakery, meat, seafood, deli or other
    #[arg(long, default_value = "other")]
    category: Category,

    /// Units on hand
    #[arg(long)]
    quantity: u32,

    /// Expiry as an RFC 3339 timestamp, e.g. 2026-03-14T18:00:00Z
    #[arg(long)]
    expires_at: Option<Timestamp>,

    /// Shelf price in minor units
    #[arg(long)]
    base_price: u64,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateItemArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;

    let item = PgItemsService::new(db)
        .create_item(NewItem {
            uuid: ItemUuid::new(),
            location_uuid: args.location_uuid,
            name: args.name,
            category: args.category,
            quantity_on_hand: args.quantity,
            expires_at: args.expires_at,
            base_price: args.base_price,
        })
        .await
        .map_err(|error| format!("failed to create item: {error}"))?;

    println!("item_uuid: {}", item.uuid);
    println!("category: {}", item.category);

    if let Some(expires_at) = item.expires_at {
        println!("expires_at: {expires_at}");
    }

    Ok(())
}
