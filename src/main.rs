use family_fork::{
    bot::{self, BotData},
    config::{database, settings},
    core::{barcode::BarcodeClient, recipe},
    errors::{Error, Result},
};
use dotenvy::dotenv;
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Settings and sample recipes
    let config = settings::load_default_config()
        .inspect_err(|e| error!("Failed to load configuration: {e}"))?;

    // 4. Database and schema
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db).await?;
    info!("Database initialized successfully.");

    // 5. Seed sample recipes into an empty recipe book
    if recipe::count_recipes(&db).await? == 0 {
        recipe::seed_recipes(&db, &config.recipes).await?;
    }

    // 6. Run the bot; the token is read directly before use
    let barcode = BarcodeClient::new()?;
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {e}"))
        .map_err(Error::EnvVar)?;

    bot::run_bot(&token, BotData::new(db, config, barcode)).await
}
