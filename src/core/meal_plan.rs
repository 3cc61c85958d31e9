//! Meal plan business logic - Scheduling recipes into a week.
//!
//! Entries are validated against existing members and recipes when they are
//! created. Later deletions of either do not cascade to the plan.

use crate::{
    core::week::WeekKey,
    entities::{
        DayOfWeek, FamilyMember, MealPlanEntry, MealPlanEntryColumn, MealType, Recipe,
        meal_plan_entry,
    },
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};
use tracing::info;

/// A meal plan entry that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMealPlanEntry {
    /// Week the meal belongs to
    pub week: WeekKey,
    /// Member the meal is for
    pub family_member_id: i64,
    /// Day of the week
    pub day_of_week: DayOfWeek,
    /// Meal slot
    pub meal_type: MealType,
    /// Recipe to cook
    pub recipe_id: i64,
    /// Servings wanted
    pub servings: i32,
    /// Notes
    pub notes: String,
}

/// Plans a meal. Fails if the member or recipe does not exist or servings
/// is not positive.
pub async fn create_entry(
    db: &DatabaseConnection,
    new: NewMealPlanEntry,
) -> Result<meal_plan_entry::Model> {
    if new.servings <= 0 {
        return Err(Error::InvalidServings {
            servings: new.servings,
        });
    }

    FamilyMember::find_by_id(new.family_member_id)
        .one(db)
        .await?
        .ok_or(Error::FamilyMemberNotFound {
            id: new.family_member_id,
        })?;

    Recipe::find_by_id(new.recipe_id)
        .one(db)
        .await?
        .ok_or(Error::RecipeNotFound { id: new.recipe_id })?;

    let entry = meal_plan_entry::ActiveModel {
        week_start_date: Set(new.week.date()),
        family_member_id: Set(new.family_member_id),
        day_of_week: Set(new.day_of_week),
        meal_type: Set(new.meal_type),
        recipe_id: Set(new.recipe_id),
        servings: Set(new.servings),
        notes: Set(new.notes),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(
        "Planned recipe {} for {} {} of week {}",
        entry.recipe_id, entry.day_of_week, entry.meal_type, new.week
    );
    Ok(entry)
}

fn slot(entry: &meal_plan_entry::Model) -> (u32, usize, i64) {
    let meal = MealType::ALL
        .iter()
        .position(|m| *m == entry.meal_type)
        .unwrap_or(MealType::ALL.len());
    (entry.day_of_week.days_from_sunday(), meal, entry.id)
}

/// Entries for a week in calendar order (day, then meal slot, then id),
/// optionally for one member only.
pub async fn list_entries_for_week(
    db: &DatabaseConnection,
    week: WeekKey,
    family_member_id: Option<i64>,
) -> Result<Vec<meal_plan_entry::Model>> {
    let mut select =
        MealPlanEntry::find().filter(MealPlanEntryColumn::WeekStartDate.eq(week.date()));
    if let Some(member_id) = family_member_id {
        select = select.filter(MealPlanEntryColumn::FamilyMemberId.eq(member_id));
    }

    let mut entries = select.all(db).await?;
    entries.sort_by_key(slot);
    Ok(entries)
}

/// Fetches an entry by id.
pub async fn get_entry(
    db: &DatabaseConnection,
    entry_id: i64,
) -> Result<Option<meal_plan_entry::Model>> {
    MealPlanEntry::find_by_id(entry_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Changes the servings of a planned meal.
pub async fn update_servings(
    db: &DatabaseConnection,
    entry_id: i64,
    servings: i32,
) -> Result<meal_plan_entry::Model> {
    if servings <= 0 {
        return Err(Error::InvalidServings { servings });
    }

    let existing = MealPlanEntry::find_by_id(entry_id)
        .one(db)
        .await?
        .ok_or(Error::MealPlanEntryNotFound { id: entry_id })?;

    let mut entry: meal_plan_entry::ActiveModel = existing.into();
    entry.servings = Set(servings);
    entry.update(db).await.map_err(Into::into)
}

/// Removes a planned meal.
pub async fn delete_entry(db: &DatabaseConnection, entry_id: i64) -> Result<()> {
    let result = MealPlanEntry::delete_by_id(entry_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::MealPlanEntryNotFound { id: entry_id });
    }
    info!("Removed meal plan entry {entry_id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn week() -> WeekKey {
        "2025-01-05".parse().unwrap()
    }

    #[tokio::test]
    async fn test_create_entry_rejects_non_positive_servings() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let result = create_entry(
            &db,
            NewMealPlanEntry {
                week: week(),
                family_member_id: 1,
                day_of_week: DayOfWeek::Monday,
                meal_type: MealType::Dinner,
                recipe_id: 1,
                servings: 0,
                notes: String::new(),
            },
        )
        .await;
        assert!(matches!(result, Err(Error::InvalidServings { servings: 0 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_entry_requires_member_and_recipe() -> Result<()> {
        let db = setup_test_db().await?;
        let member = create_test_family_member(&db, "Sam").await?;
        let recipe = create_test_recipe(&db, "Soup", 2, &[]).await?;

        let no_member =
            plan_meal(&db, week(), 42, DayOfWeek::Monday, MealType::Dinner, recipe.recipe.id, 2).await;
        assert!(matches!(no_member, Err(Error::FamilyMemberNotFound { id: 42 })));

        let no_recipe =
            plan_meal(&db, week(), member.id, DayOfWeek::Monday, MealType::Dinner, 42, 2).await;
        assert!(matches!(no_recipe, Err(Error::RecipeNotFound { id: 42 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_entries_in_calendar_order() -> Result<()> {
        let db = setup_test_db().await?;
        let sam = create_test_family_member(&db, "Sam").await?;
        let kim = create_test_family_member(&db, "Kim").await?;
        let soup = create_test_recipe(&db, "Soup", 2, &[]).await?;
        let id = soup.recipe.id;

        let friday = plan_meal(&db, week(), sam.id, DayOfWeek::Friday, MealType::Lunch, id, 2).await?;
        let sunday_dinner =
            plan_meal(&db, week(), kim.id, DayOfWeek::Sunday, MealType::Dinner, id, 2).await?;
        let sunday_breakfast =
            plan_meal(&db, week(), sam.id, DayOfWeek::Sunday, MealType::Breakfast, id, 2).await?;
        let next: WeekKey = "2025-01-12".parse().unwrap();
        plan_meal(&db, next, sam.id, DayOfWeek::Sunday, MealType::Breakfast, id, 2).await?;

        let entries = list_entries_for_week(&db, week(), None).await?;
        let ids: Vec<i64> = entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![sunday_breakfast.id, sunday_dinner.id, friday.id]);

        let sams = list_entries_for_week(&db, week(), Some(sam.id)).await?;
        assert_eq!(sams.len(), 2);
        assert!(sams.iter().all(|e| e.family_member_id == sam.id));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_servings_and_delete() -> Result<()> {
        let db = setup_test_db().await?;
        let sam = create_test_family_member(&db, "Sam").await?;
        let soup = create_test_recipe(&db, "Soup", 2, &[]).await?;
        let entry =
            plan_meal(&db, week(), sam.id, DayOfWeek::Monday, MealType::Dinner, soup.recipe.id, 2).await?;

        let updated = update_servings(&db, entry.id, 6).await?;
        assert_eq!(updated.servings, 6);
        assert!(matches!(
            update_servings(&db, entry.id, -1).await,
            Err(Error::InvalidServings { servings: -1 })
        ));

        delete_entry(&db, entry.id).await?;
        assert!(get_entry(&db, entry.id).await?.is_none());
        assert!(matches!(
            delete_entry(&db, entry.id).await,
            Err(Error::MealPlanEntryNotFound { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_entries_survive_recipe_deletion() -> Result<()> {
        let db = setup_test_db().await?;
        let sam = create_test_family_member(&db, "Sam").await?;
        let soup = create_test_recipe(&db, "Soup", 2, &[]).await?;
        let entry =
            plan_meal(&db, week(), sam.id, DayOfWeek::Monday, MealType::Dinner, soup.recipe.id, 2).await?;

        crate::core::recipe::delete_recipe(&db, soup.recipe.id).await?;

        assert_eq!(get_entry(&db, entry.id).await?, Some(entry));
        Ok(())
    }
}
