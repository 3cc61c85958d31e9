//! General Discord commands - ping, help, and other utility commands.
//! This module contains simple commands that don't require database operations
//! and provide basic bot functionality and user assistance.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**Family Fork Help**\n\
        Plan the week's meals, keep track of the pantry, and get a grocery list.\n\n\
        **Planning**\n\
        • `/mealplan <subcommand>` - Plan meals for the week (add, list, servings, remove).\n\
        • `/grocery generate [week] [mode]` - Build the grocery list from the plan.\n\
        • `/grocery show [week]` - Show the stored grocery list.\n\n\
        **Recipes**\n\
        • `/recipes [restrictions] [mode] [meal] [search]` - Browse recipes.\n\
        • `/recipe_info <name>` - Ingredients and instructions.\n\
        • `/recipe_favorite <name>` - Mark a household favorite.\n\
        • `/recipe_delete <name>` - Delete a recipe.\n\
        • `/seed_recipes` - Add the sample recipes.\n\n\
        **Household**\n\
        • `/family <subcommand>` - Manage family members (add, list, update, remove).\n\
        • `/inventory <subcommand>` - Manage stock (add, list, update, remove, barcode, check).\n\n\
        **Utility**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.\n\n\
        Weeks start on Sunday and are written as `YYYY-MM-DD`.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
