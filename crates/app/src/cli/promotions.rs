use clap::Args;
use larder_app::{
    database::{self, Db},
    domain::{
        promotions::{PromotionsService, SqlitePromotionsService},
        stores::Store,
    },
};

use super::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct PromotionsArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Only show these stores; repeat for several
    #[arg(long = "store")]
    stores: Vec<Store>,
}

pub(crate) async fn run(args: PromotionsArgs) -> Result<(), String> {
    let pool = database::connect(
        &args.database.database_url,
        args.database.database_max_connections,
    )
    .await
    .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = SqlitePromotionsService::new(Db::new(pool));

    let promotions = service
        .read_promotions(args.stores)
        .await
        .map_err(|error| format!("failed to read promotions: {error}"))?;

    if promotions.is_empty() {
        println!("no promotions cached for today");
        return Ok(());
    }

    for promotion in promotions {
        println!(
            "{}\t{}\t{}",
            promotion.captured_on, promotion.store, promotion.name
        );
    }

    Ok(())
}
