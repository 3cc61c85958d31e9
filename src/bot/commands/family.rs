//! Family Discord commands - household member profiles.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete, parsing, reply_error, say_chunked},
        core::family::{self, NewFamilyMember},
        entities::{DietaryRestriction, family_member},
        errors::{Error, Result},
    };
    use std::fmt::Write;

    fn join_or_none<T: ToString>(values: &[T]) -> String {
        if values.is_empty() {
            "none".to_string()
        } else {
            values
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        }
    }

    fn describe_member(member: &family_member::Model) -> Result<String> {
        let mut text = String::new();
        writeln!(text, "**{}**", member.name)?;
        writeln!(
            text,
            "  Restrictions: {}",
            join_or_none(&member.dietary_restrictions.0)
        )?;
        writeln!(text, "  Allergies: {}", join_or_none(&member.allergies.0))?;
        writeln!(text, "  Dislikes: {}", join_or_none(&member.dislikes.0))?;
        writeln!(
            text,
            "  Favorites: {}",
            join_or_none(&member.favorite_ingredients.0)
        )?;
        if !member.notes.is_empty() {
            writeln!(text, "  Notes: {}", member.notes)?;
        }
        Ok(text)
    }

    /// Parent command for family member profiles.
    #[poise::command(
        slash_command,
        subcommands("family_add", "family_list", "family_update", "family_remove")
    )]
    pub async fn family(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Family command. Available subcommands:\n\
            `/family add` - Add a family member\n\
            `/family list` - Show everyone's profile\n\
            `/family update` - Change a member's restrictions or preferences\n\
            `/family remove` - Remove a family member";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Adds a family member with their dietary profile.
    #[poise::command(slash_command, rename = "add")]
    pub async fn family_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Name"] name: String,
        #[description = "Comma-separated restrictions (e.g., 'vegetarian, nut-free')"]
        #[autocomplete = "autocomplete::autocomplete_restriction"]
        restrictions: Option<String>,
        #[description = "Comma-separated allergies"] allergies: Option<String>,
        #[description = "Comma-separated dislikes"] dislikes: Option<String>,
        #[description = "Comma-separated favorite ingredients"] favorites: Option<String>,
        #[description = "Notes"] notes: Option<String>,
    ) -> Result<()> {
        let dietary_restrictions =
            match parsing::parse_list::<DietaryRestriction>(restrictions.as_deref()) {
                Ok(list) => list,
                Err(e) => return reply_error(ctx, e).await,
            };

        let new = NewFamilyMember {
            name,
            dietary_restrictions,
            favorite_ingredients: parsing::split_list(favorites.as_deref()),
            allergies: parsing::split_list(allergies.as_deref()),
            dislikes: parsing::split_list(dislikes.as_deref()),
            notes: notes.unwrap_or_default(),
        };

        let db = &ctx.data().database;
        match family::create_family_member(db, new).await {
            Ok(member) => {
                ctx.say(format!("✅ Added family member\n{}", describe_member(&member)?))
                    .await?;
                Ok(())
            }
            Err(e) => reply_error(ctx, e).await,
        }
    }

    /// Lists every family member and the restrictions the household shares.
    #[poise::command(slash_command, rename = "list")]
    pub async fn family_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let db = &ctx.data().database;
        let members = family::list_family_members(db).await?;

        if members.is_empty() {
            ctx.say("📊 No family members yet. Add one with `/family add`.")
                .await?;
            return Ok(());
        }

        let mut response = format!("📊 **Family** ({} members)\n", members.len());
        for member in &members {
            response.push_str(&describe_member(member)?);
        }
        writeln!(
            response,
            "\nHousehold restrictions: {}",
            join_or_none(&family::household_restrictions(&members))
        )?;
        say_chunked(ctx, &response).await?;
        Ok(())
    }

    /// Updates a member's profile. Omitted options keep their current values.
    #[poise::command(slash_command, rename = "update")]
    pub async fn family_update(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Member to update"]
        #[autocomplete = "autocomplete::autocomplete_member_name"]
        name: String,
        #[description = "Comma-separated restrictions, replacing the current ones"]
        #[autocomplete = "autocomplete::autocomplete_restriction"]
        restrictions: Option<String>,
        #[description = "Comma-separated allergies, replacing the current ones"] allergies: Option<
            String,
        >,
        #[description = "Comma-separated dislikes, replacing the current ones"] dislikes: Option<
            String,
        >,
        #[description = "Comma-separated favorites, replacing the current ones"] favorites: Option<
            String,
        >,
        #[description = "Notes"] notes: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(member) = family::get_family_member_by_name(db, &name).await? else {
            ctx.say(format!("❌ Family member '{name}' not found."))
                .await?;
            return Ok(());
        };

        let dietary_restrictions = match restrictions {
            Some(text) => match parsing::parse_list::<DietaryRestriction>(Some(&text)) {
                Ok(list) => list,
                Err(e) => return reply_error(ctx, e).await,
            },
            None => member.dietary_restrictions.0.clone(),
        };

        let new = NewFamilyMember {
            name: member.name.clone(),
            dietary_restrictions,
            favorite_ingredients: favorites
                .map_or_else(|| member.favorite_ingredients.0.clone(), |f| {
                    parsing::split_list(Some(&f))
                }),
            allergies: allergies.map_or_else(|| member.allergies.0.clone(), |a| {
                parsing::split_list(Some(&a))
            }),
            dislikes: dislikes.map_or_else(|| member.dislikes.0.clone(), |d| {
                parsing::split_list(Some(&d))
            }),
            notes: notes.unwrap_or_else(|| member.notes.clone()),
        };

        match family::update_family_member(db, member.id, new).await {
            Ok(updated) => {
                ctx.say(format!("✅ Updated\n{}", describe_member(&updated)?))
                    .await?;
                Ok(())
            }
            Err(e) => reply_error(ctx, e).await,
        }
    }

    /// Removes a family member. Their planned meals stay on the plan.
    #[poise::command(slash_command, rename = "remove")]
    pub async fn family_remove(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Member to remove"]
        #[autocomplete = "autocomplete::autocomplete_member_name"]
        name: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(member) = family::get_family_member_by_name(db, &name).await? else {
            ctx.say(format!("❌ Family member '{name}' not found."))
                .await?;
            return Ok(());
        };

        match family::delete_family_member(db, member.id).await {
            Ok(()) => {
                ctx.say(format!("✅ Removed family member '{}'.", member.name))
                    .await?;
                Ok(())
            }
            Err(e) => reply_error(ctx, e).await,
        }
    }
}

pub use inner::*;
