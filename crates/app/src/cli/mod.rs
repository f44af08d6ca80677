use clap::{Args, Parser, Subcommand};
use larder_app::database::DEFAULT_MAX_CONNECTIONS;

mod promotions;
mod refresh;
mod schema;

#[derive(Debug, Parser)]
#[command(name = "larder-app", about = "Larder CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the promotions table when it is missing
    Schema(schema::SchemaArgs),

    /// Fetch every configured store and replace today's cache
    Refresh(refresh::RefreshArgs),

    /// Print today's cached promotions
    Promotions(promotions::PromotionsArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Schema(args) => schema::run(args).await,
            Commands::Refresh(args) => refresh::run(args).await,
            Commands::Promotions(args) => promotions::run(args).await,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct DatabaseArgs {
    /// `SQLite` connection string
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://larder.db")]
    pub(crate) database_url: String,

    /// Maximum pooled connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub(crate) database_max_connections: u32,
}
