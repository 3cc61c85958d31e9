//! Grocery Discord commands - generate and show the weekly shopping list.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete, parsing, reply_error, say_chunked},
        core::grocery::{self, report},
        entities::GroceryMode,
        errors::{Error, Result},
    };

    /// Parent command for the weekly grocery list.
    #[poise::command(slash_command, subcommands("grocery_generate", "grocery_show"))]
    pub async fn grocery(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Grocery list command. Available subcommands:\n\
            `/grocery generate [week] [mode]` - Build the list from the week's meal plan\n\
            `/grocery show [week]` - Show the last list generated for a week";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Builds the grocery list for a week from its meal plan and current inventory.
    ///
    /// `shortfall` lists only what is missing after counting inventory; `full` lists
    /// everything the week needs and notes what is already on hand. Generating
    /// again replaces the stored list for that week.
    #[poise::command(slash_command, rename = "generate")]
    pub async fn grocery_generate(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Week start (Sunday, YYYY-MM-DD). Defaults to this week."] week: Option<
            String,
        >,
        #[description = "shortfall (only what is missing) or full"]
        #[autocomplete = "autocomplete::autocomplete_grocery_mode"]
        mode: Option<String>,
    ) -> Result<()> {
        let week = match parsing::week_or_current(week.as_deref()) {
            Ok(week) => week,
            Err(e) => return reply_error(ctx, e).await,
        };
        let mode = match parsing::parse_optional::<GroceryMode>(mode.as_deref()) {
            Ok(mode) => mode.unwrap_or(ctx.data().config.grocery.default_mode),
            Err(e) => return reply_error(ctx, e).await,
        };

        let db = &ctx.data().database;
        let list = grocery::generate_grocery_list(db, week, mode).await?;

        let mut response = report::format_grocery_list(&list)?;
        if list.items.0.is_empty() && list.skipped.0.is_empty() {
            response.push_str("\nPlan some meals with `/mealplan add` first.");
        }
        say_chunked(ctx, &response).await?;
        Ok(())
    }

    /// Shows the stored grocery list for a week.
    #[poise::command(slash_command, rename = "show")]
    pub async fn grocery_show(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Week start (Sunday, YYYY-MM-DD). Defaults to this week."] week: Option<
            String,
        >,
    ) -> Result<()> {
        let week = match parsing::week_or_current(week.as_deref()) {
            Ok(week) => week,
            Err(e) => return reply_error(ctx, e).await,
        };

        let db = &ctx.data().database;
        match grocery::get_grocery_list(db, week).await {
            Ok(list) => {
                let text = report::format_grocery_list(&list)?;
                say_chunked(ctx, &text).await?;
                Ok(())
            }
            Err(e @ Error::GroceryListNotFound { .. }) => {
                ctx.say(format!("📊 {e}. Run `/grocery generate` to build it."))
                    .await?;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

pub use inner::*;
