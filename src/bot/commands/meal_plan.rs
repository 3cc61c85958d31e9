//! Meal plan Discord commands - scheduling recipes into the week.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete, parsing, reply_error, say_chunked},
        core::{
            family,
            meal_plan::{self, NewMealPlanEntry},
            recipe,
        },
        entities::{DayOfWeek, MealType},
        errors::{Error, Result},
    };
    use std::collections::HashMap;
    use std::fmt::Write;

    /// Parent command for the weekly meal plan.
    #[poise::command(
        slash_command,
        subcommands("mealplan_add", "mealplan_list", "mealplan_servings", "mealplan_remove")
    )]
    pub async fn mealplan(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Meal plan command. Available subcommands:\n\
            `/mealplan add` - Plan a recipe for a member, day and meal\n\
            `/mealplan list [week] [member]` - Show a week's plan\n\
            `/mealplan servings` - Change how many servings a planned meal makes\n\
            `/mealplan remove` - Remove a planned meal";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Plans a recipe for a family member on a given day and meal.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command, rename = "add")]
    pub async fn mealplan_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Family member"]
        #[autocomplete = "autocomplete::autocomplete_member_name"]
        member: String,
        #[description = "Recipe"]
        #[autocomplete = "autocomplete::autocomplete_recipe_name"]
        recipe: String,
        #[description = "Day of the week"]
        #[autocomplete = "autocomplete::autocomplete_day"]
        day: String,
        #[description = "Meal"]
        #[autocomplete = "autocomplete::autocomplete_meal_type"]
        meal: String,
        #[description = "Servings. Defaults to the recipe's servings."] servings: Option<i32>,
        #[description = "Week start (Sunday, YYYY-MM-DD). Defaults to this week."] week: Option<
            String,
        >,
        #[description = "Notes"] notes: Option<String>,
    ) -> Result<()> {
        let parsed = parsing::week_or_current(week.as_deref()).and_then(|week| {
            Ok((week, day.parse::<DayOfWeek>()?, meal.parse::<MealType>()?))
        });
        let (week, day_of_week, meal_type) = match parsed {
            Ok(values) => values,
            Err(e) => return reply_error(ctx, e).await,
        };

        let db = &ctx.data().database;
        let Some(person) = family::get_family_member_by_name(db, &member).await? else {
            ctx.say(format!("❌ Family member '{member}' not found."))
                .await?;
            return Ok(());
        };
        let Some(dish) = recipe::get_recipe_by_name(db, &recipe).await? else {
            ctx.say(format!("❌ Recipe '{recipe}' not found.")).await?;
            return Ok(());
        };

        let new = NewMealPlanEntry {
            week,
            family_member_id: person.id,
            day_of_week,
            meal_type,
            recipe_id: dish.id,
            servings: servings.unwrap_or(dish.servings),
            notes: notes.unwrap_or_default(),
        };

        match meal_plan::create_entry(db, new).await {
            Ok(entry) => {
                ctx.say(format!(
                    "✅ Planned **{}** for {} on {} {} ({}), {} servings. Entry #{}",
                    dish.name,
                    person.name,
                    entry.day_of_week,
                    entry.meal_type,
                    week.day(entry.day_of_week),
                    entry.servings,
                    entry.id
                ))
                .await?;
                Ok(())
            }
            Err(e) => reply_error(ctx, e).await,
        }
    }

    /// Shows a week's meal plan in calendar order.
    #[poise::command(slash_command, rename = "list")]
    pub async fn mealplan_list(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Week start (Sunday, YYYY-MM-DD). Defaults to this week."] week: Option<
            String,
        >,
        #[description = "Only this family member"]
        #[autocomplete = "autocomplete::autocomplete_member_name"]
        member: Option<String>,
    ) -> Result<()> {
        let week = match parsing::week_or_current(week.as_deref()) {
            Ok(week) => week,
            Err(e) => return reply_error(ctx, e).await,
        };

        let db = &ctx.data().database;
        let member_id = match member {
            Some(name) => match family::get_family_member_by_name(db, &name).await? {
                Some(m) => Some(m.id),
                None => {
                    ctx.say(format!("❌ Family member '{name}' not found."))
                        .await?;
                    return Ok(());
                }
            },
            None => None,
        };

        let entries = meal_plan::list_entries_for_week(db, week, member_id).await?;
        if entries.is_empty() {
            ctx.say(format!(
                "📊 Nothing planned for the week of {week}. Use `/mealplan add`."
            ))
            .await?;
            return Ok(());
        }

        let members: HashMap<i64, String> = family::list_family_members(db)
            .await?
            .into_iter()
            .map(|m| (m.id, m.name))
            .collect();
        let mut recipe_ids: Vec<i64> = entries.iter().map(|e| e.recipe_id).collect();
        recipe_ids.sort_unstable();
        recipe_ids.dedup();
        let recipes = recipe::get_recipes_by_ids(db, &recipe_ids).await?;

        let mut response = format!("📊 **Meal plan for the week of {week}**\n");
        let mut current_day = None;
        for entry in &entries {
            if current_day != Some(entry.day_of_week) {
                current_day = Some(entry.day_of_week);
                writeln!(
                    response,
                    "\n**{}** ({})",
                    entry.day_of_week,
                    week.day(entry.day_of_week)
                )?;
            }
            let dish = recipes
                .get(&entry.recipe_id)
                .map_or("(deleted recipe)", |r| r.recipe.name.as_str());
            let person = members
                .get(&entry.family_member_id)
                .map_or("(removed member)", String::as_str);
            write!(
                response,
                "`#{}` {}: {dish} for {person}, {} servings",
                entry.id, entry.meal_type, entry.servings
            )?;
            if !entry.notes.is_empty() {
                write!(response, " ({})", entry.notes)?;
            }
            response.push('\n');
        }

        say_chunked(ctx, &response).await?;
        Ok(())
    }

    /// Changes the servings of a planned meal.
    #[poise::command(slash_command, rename = "servings")]
    pub async fn mealplan_servings(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Entry id (from /mealplan list)"] id: i64,
        #[description = "New servings"] servings: i32,
    ) -> Result<()> {
        let db = &ctx.data().database;
        match meal_plan::update_servings(db, id, servings).await {
            Ok(entry) => {
                ctx.say(format!(
                    "✅ Entry #{} now makes {} servings.",
                    entry.id, entry.servings
                ))
                .await?;
                Ok(())
            }
            Err(e) => reply_error(ctx, e).await,
        }
    }

    /// Removes a planned meal.
    #[poise::command(slash_command, rename = "remove")]
    pub async fn mealplan_remove(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Entry id (from /mealplan list)"] id: i64,
    ) -> Result<()> {
        let db = &ctx.data().database;
        match meal_plan::delete_entry(db, id).await {
            Ok(()) => {
                ctx.say(format!("✅ Removed meal plan entry #{id}.")).await?;
                Ok(())
            }
            Err(e) => reply_error(ctx, e).await,
        }
    }
}

pub use inner::*;
