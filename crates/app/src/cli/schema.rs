use clap::Args;
use larder_app::{
    database::{self, Db},
    domain::promotions::{PromotionsService, SqlitePromotionsService},
};

use super::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct SchemaArgs {
    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: SchemaArgs) -> Result<(), String> {
    let pool = database::connect(
        &args.database.database_url,
        args.database.database_max_connections,
    )
    .await
    .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = SqlitePromotionsService::new(Db::new(pool));

    service
        .ensure_schema()
        .await
        .map_err(|error| format!("failed to create schema: {error}"))?;

    println!("promotions schema ready");

    Ok(())
}
