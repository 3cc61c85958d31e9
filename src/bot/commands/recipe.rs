//! Recipe Discord commands - browsing, details, favorites and seeding.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete, parsing, reply_error, say_chunked},
        core::{
            family,
            grocery::report::format_quantity,
            recipe::{self, RecipeFilter},
        },
        entities::{DietaryRestriction, FilterMode, MealType, RecipeModel},
        errors::{Error, Result},
    };
    use std::fmt::Write;

    fn summary_line(recipe: &RecipeModel) -> String {
        let star = if recipe.is_favorite { "⭐ " } else { "" };
        format!(
            "{star}**{}** - serves {}, {} min",
            recipe.name,
            recipe.servings,
            recipe.prep_time_minutes + recipe.cook_time_minutes
        )
    }

    fn parse_filter_options(
        restrictions: Option<&str>,
        mode: Option<&str>,
        meal: Option<&str>,
    ) -> Result<(Vec<DietaryRestriction>, Option<FilterMode>, Option<MealType>)> {
        Ok((
            parsing::parse_list(restrictions)?,
            parsing::parse_optional(mode)?,
            parsing::parse_optional(meal)?,
        ))
    }

    /// Lists recipes, optionally filtered by diet, meal, text or favorites.
    ///
    /// With `household` set, the dietary restrictions of every family member are
    /// added to the filter.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command)]
    pub async fn recipes(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Comma-separated dietary restrictions"]
        #[autocomplete = "autocomplete::autocomplete_restriction"]
        restrictions: Option<String>,
        #[description = "strict (all restrictions) or flexible (any). Defaults to strict."]
        #[autocomplete = "autocomplete::autocomplete_filter_mode"]
        mode: Option<String>,
        #[description = "Only recipes for this meal"]
        #[autocomplete = "autocomplete::autocomplete_meal_type"]
        meal: Option<String>,
        #[description = "Text to search in names, descriptions and tags"] search: Option<String>,
        #[description = "Only favorites"] favorites: Option<bool>,
        #[description = "Include every family member's restrictions"] household: Option<bool>,
    ) -> Result<()> {
        let (mut restrictions, mode, meal_type) =
            match parse_filter_options(restrictions.as_deref(), mode.as_deref(), meal.as_deref()) {
                Ok(values) => values,
                Err(e) => return reply_error(ctx, e).await,
            };

        let db = &ctx.data().database;
        if household.unwrap_or(false) {
            let members = family::list_family_members(db).await?;
            for restriction in family::household_restrictions(&members) {
                if !restrictions.contains(&restriction) {
                    restrictions.push(restriction);
                }
            }
        }

        let filter = RecipeFilter {
            restrictions,
            mode: mode.unwrap_or_default(),
            meal_type,
            search,
            favorites_only: favorites.unwrap_or(false),
        };
        let found = recipe::list_recipes(db, &filter).await?;

        if found.is_empty() {
            ctx.say("📊 No recipes match. Try `/seed_recipes` or loosen the filters.")
                .await?;
            return Ok(());
        }

        let mut response = format!("📊 **Recipes** ({} found)\n", found.len());
        for r in &found {
            writeln!(response, "• {}", summary_line(r))?;
        }
        say_chunked(ctx, &response).await?;
        Ok(())
    }

    /// Shows a recipe's ingredients and instructions.
    #[poise::command(slash_command)]
    pub async fn recipe_info(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Recipe name"]
        #[autocomplete = "autocomplete::autocomplete_recipe_name"]
        name: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(found) = recipe::get_recipe_by_name(db, &name).await? else {
            ctx.say(format!("❌ Recipe '{name}' not found.")).await?;
            return Ok(());
        };
        let Some(full) = recipe::get_recipe(db, found.id).await? else {
            return reply_error(ctx, Error::RecipeNotFound { id: found.id }).await;
        };

        let r = &full.recipe;
        let mut response = String::new();
        writeln!(response, "{}", summary_line(r))?;
        if !r.description.is_empty() {
            writeln!(response, "{}", r.description)?;
        }
        writeln!(
            response,
            "Prep {} min, cook {} min",
            r.prep_time_minutes, r.cook_time_minutes
        )?;
        if !r.dietary_restrictions_compliant.0.is_empty() {
            let tags: Vec<&str> = r
                .dietary_restrictions_compliant
                .0
                .iter()
                .map(|d| d.as_str())
                .collect();
            writeln!(response, "Suitable for: {}", tags.join(", "))?;
        }

        writeln!(response, "\n**Ingredients**")?;
        for ingredient in &full.ingredients {
            writeln!(
                response,
                "• {} {} {}",
                format_quantity(ingredient.quantity),
                ingredient.unit,
                ingredient.name
            )?;
        }

        if !r.instructions.0.is_empty() {
            writeln!(response, "\n**Instructions**")?;
            for (step, text) in r.instructions.0.iter().enumerate() {
                writeln!(response, "{}. {text}", step + 1)?;
            }
        }

        say_chunked(ctx, &response).await?;
        Ok(())
    }

    /// Marks or unmarks a recipe as a household favorite.
    #[poise::command(slash_command)]
    pub async fn recipe_favorite(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Recipe name"]
        #[autocomplete = "autocomplete::autocomplete_recipe_name"]
        name: String,
        #[description = "Favorite or not. Defaults to true."] favorite: Option<bool>,
    ) -> Result<()> {
        let favorite = favorite.unwrap_or(true);
        let db = &ctx.data().database;
        let Some(found) = recipe::get_recipe_by_name(db, &name).await? else {
            ctx.say(format!("❌ Recipe '{name}' not found.")).await?;
            return Ok(());
        };

        match recipe::set_favorite(db, found.id, favorite).await {
            Ok(_) => {
                let verb = if favorite { "marked" } else { "no longer" };
                ctx.say(format!("✅ '{}' {verb} a favorite.", found.name))
                    .await?;
                Ok(())
            }
            Err(e) => reply_error(ctx, e).await,
        }
    }

    /// Deletes a recipe and its ingredients.
    ///
    /// Meal plan entries that used it stay on the plan and show up as skipped
    /// when the grocery list is generated.
    #[poise::command(slash_command)]
    pub async fn recipe_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Recipe to delete"]
        #[autocomplete = "autocomplete::autocomplete_recipe_name"]
        name: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(found) = recipe::get_recipe_by_name(db, &name).await? else {
            ctx.say(format!("❌ Recipe '{name}' not found.")).await?;
            return Ok(());
        };

        match recipe::delete_recipe(db, found.id).await {
            Ok(()) => {
                ctx.say(format!("✅ Recipe '{}' has been deleted.", found.name))
                    .await?;
                Ok(())
            }
            Err(e) => reply_error(ctx, e).await,
        }
    }

    /// Adds the sample recipes from config.toml that are not already present.
    #[poise::command(slash_command)]
    pub async fn seed_recipes(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let created = recipe::seed_recipes(&data.database, &data.config.recipes).await?;

        if created == 0 {
            ctx.say("📊 All sample recipes are already present.").await?;
        } else {
            ctx.say(format!("✅ Added {created} sample recipes.")).await?;
        }
        Ok(())
    }
}

pub use inner::*;
