//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for Family Fork, including all
//! slash commands, autocomplete handlers, and bot context management.

/// Discord command implementations (grocery, inventory, meal plan, family, recipe, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;
/// Parsing of free-text command options
pub mod parsing;

use crate::{
    config::settings::Config,
    core::barcode::BarcodeClient,
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
/// This structure holds the database connection, loaded settings and the
/// product lookup client.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Settings and recipe seeds from config.toml
    pub config: Config,
    /// Client for barcode product lookups
    pub barcode: BarcodeClient,
}

impl BotData {
    /// Creates a new `BotData` instance.
    #[must_use]
    pub const fn new(database: DatabaseConnection, config: Config, barcode: BarcodeClient) -> Self {
        Self {
            database,
            config,
            barcode,
        }
    }
}

/// Discord's limit on message content, in characters
pub const MESSAGE_LIMIT: usize = 2000;

/// Splits a reply into messages of at most `limit` characters, breaking at
/// line ends where possible. Whitespace-only pieces are dropped.
#[must_use]
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split_inclusive('\n') {
        let line_len = line.chars().count();
        if current_len + line_len > limit && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if line_len > limit {
            let chars: Vec<char> = line.chars().collect();
            let mut pieces = chars.chunks(limit).peekable();
            while let Some(piece) = pieces.next() {
                let piece: String = piece.iter().collect();
                if pieces.peek().is_some() {
                    chunks.push(piece);
                } else {
                    current_len = piece.chars().count();
                    current = piece;
                }
            }
            continue;
        }

        current.push_str(line);
        current_len += line_len;
    }
    chunks.push(current);

    chunks.retain(|chunk| !chunk.trim().is_empty());
    chunks
}

/// Sends a reply that may exceed one Discord message as several messages.
pub async fn say_chunked(ctx: poise::Context<'_, BotData, Error>, text: &str) -> Result<()> {
    for chunk in split_message(text, MESSAGE_LIMIT) {
        ctx.say(chunk).await?;
    }
    Ok(())
}

/// Replies with a user-facing error, or hands any other error back to the
/// framework.
pub async fn reply_error(ctx: poise::Context<'_, BotData, Error>, error: Error) -> Result<()> {
    if error.is_user_facing() {
        ctx.say(format!("❌ {error}")).await?;
        Ok(())
    } else {
        Err(error)
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {error}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {error:?}", ctx.command().name);
            if let Err(e) = ctx.say("❌ Something went wrong. Please try again later.").await {
                error!("Failed to send error message: {e}");
            }
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!("Error while handling error: {e}");
            }
        }
    }
}

/// Every slash command the bot registers.
#[must_use]
pub fn all_commands() -> Vec<poise::Command<BotData, Error>> {
    vec![
        commands::ping(),
        commands::help(),
        commands::grocery(),
        commands::inventory(),
        commands::mealplan(),
        commands::family(),
        commands::recipes(),
        commands::recipe_info(),
        commands::recipe_favorite(),
        commands::recipe_delete(),
        commands::seed_recipes(),
    ]
}

/// Connects to Discord and serves commands until the client stops.
#[instrument(skip(token, data))]
pub async fn run_bot(token: &str, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: all_commands(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!("Registered {} commands", framework.options().commands.len());
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Starting Discord client...");
    let mut client = serenity::Client::builder(token, intents)
        .framework(framework)
        .await?;
    client.start().await?;
    Ok(())
}
