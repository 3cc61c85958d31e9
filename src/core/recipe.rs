//! Recipe business logic - Creating, filtering, and deleting recipes.
//!
//! A recipe row and its ingredient rows are always written together inside one
//! database transaction. Set-valued columns are JSON, so dietary and meal-type
//! filtering happens in memory after the rows are loaded.

use crate::{
    config::settings::RecipeSeed,
    entities::{
        DietaryRestriction, FilterMode, MealType, Recipe, RecipeIngredient, json, recipe,
        recipe_ingredient,
    },
    errors::{Error, Result},
};
use sea_orm::{
    DatabaseTransaction, PaginatorTrait, QueryOrder, Set, TransactionTrait, prelude::*,
};
use std::collections::HashMap;
use tracing::{info, instrument};

/// A recipe together with its ingredient rows, ordered by position.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeWithIngredients {
    /// The recipe row
    pub recipe: recipe::Model,
    /// Ingredient rows in the author's order
    pub ingredients: Vec<recipe_ingredient::Model>,
}

/// Ingredient line of a recipe that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewIngredient {
    /// Ingredient name
    pub name: String,
    /// Amount for the recipe's base servings
    pub quantity: f64,
    /// Unit as written
    pub unit: String,
    /// Declared store section hint
    pub store_section: Option<String>,
}

/// Everything needed to create or replace a recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecipe {
    /// Name of the dish
    pub name: String,
    /// Short description
    pub description: String,
    /// Restrictions the recipe complies with
    pub dietary_restrictions_compliant: Vec<DietaryRestriction>,
    /// Ingredient lines
    pub ingredients: Vec<NewIngredient>,
    /// Ordered instruction steps
    pub instructions: Vec<String>,
    /// Preparation time in minutes
    pub prep_time_minutes: i32,
    /// Cooking time in minutes
    pub cook_time_minutes: i32,
    /// Base servings the ingredient quantities are written for
    pub servings: i32,
    /// Suitable meals
    pub meal_types: Vec<MealType>,
    /// Free-text tags
    pub tags: Vec<String>,
    /// Household favorite
    pub is_favorite: bool,
}

impl From<RecipeSeed> for NewRecipe {
    fn from(seed: RecipeSeed) -> Self {
        Self {
            name: seed.name,
            description: seed.description,
            dietary_restrictions_compliant: seed.dietary_restrictions_compliant,
            ingredients: seed
                .ingredients
                .into_iter()
                .map(|i| NewIngredient {
                    name: i.name,
                    quantity: i.quantity,
                    unit: i.unit,
                    store_section: i.store_section,
                })
                .collect(),
            instructions: seed.instructions,
            prep_time_minutes: seed.prep_time_minutes,
            cook_time_minutes: seed.cook_time_minutes,
            servings: seed.servings,
            meal_types: seed.meal_types,
            tags: seed.tags,
            is_favorite: false,
        }
    }
}

/// Criteria for listing recipes. The default matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    /// Requested dietary restrictions
    pub restrictions: Vec<DietaryRestriction>,
    /// How `restrictions` are matched
    pub mode: FilterMode,
    /// Only recipes suitable for this meal
    pub meal_type: Option<MealType>,
    /// Case-insensitive text matched against name, description and tags
    pub search: Option<String>,
    /// Only favorites
    pub favorites_only: bool,
}

impl RecipeFilter {
    /// Whether a recipe satisfies every criterion.
    #[must_use]
    pub fn matches(&self, recipe: &recipe::Model) -> bool {
        let compliant = &recipe.dietary_restrictions_compliant.0;
        let dietary_ok = self.restrictions.is_empty()
            || match self.mode {
                FilterMode::Strict => self.restrictions.iter().all(|r| compliant.contains(r)),
                FilterMode::Flexible => self.restrictions.iter().any(|r| compliant.contains(r)),
            };

        let meal_ok = self
            .meal_type
            .is_none_or(|meal| recipe.meal_types.0.contains(&meal));

        let search_ok = self.search.as_deref().map(str::trim).is_none_or(|needle| {
            let needle = needle.to_lowercase();
            needle.is_empty()
                || recipe.name.to_lowercase().contains(&needle)
                || recipe.description.to_lowercase().contains(&needle)
                || recipe
                    .tags
                    .0
                    .iter()
                    .any(|tag| tag.to_lowercase().contains(&needle))
        });

        dietary_ok && meal_ok && search_ok && (!self.favorites_only || recipe.is_favorite)
    }
}

fn validate(new: &NewRecipe) -> Result<()> {
    if new.name.trim().is_empty() {
        return Err(Error::InvalidInput {
            message: "Recipe name cannot be empty".to_string(),
        });
    }

    if new.servings <= 0 {
        return Err(Error::InvalidServings {
            servings: new.servings,
        });
    }

    if new.prep_time_minutes < 0 || new.cook_time_minutes < 0 {
        return Err(Error::InvalidInput {
            message: "Prep and cook times cannot be negative".to_string(),
        });
    }

    for ingredient in &new.ingredients {
        if ingredient.name.trim().is_empty() {
            return Err(Error::InvalidInput {
                message: "Ingredient name cannot be empty".to_string(),
            });
        }
        if !ingredient.quantity.is_finite() || ingredient.quantity < 0.0 {
            return Err(Error::InvalidQuantity {
                quantity: ingredient.quantity,
            });
        }
    }

    Ok(())
}

async fn insert_ingredients(
    txn: &DatabaseTransaction,
    recipe_id: i64,
    ingredients: &[NewIngredient],
) -> Result<Vec<recipe_ingredient::Model>> {
    let mut stored = Vec::with_capacity(ingredients.len());
    for (position, ingredient) in (0_i32..).zip(ingredients) {
        let row = recipe_ingredient::ActiveModel {
            recipe_id: Set(recipe_id),
            position: Set(position),
            name: Set(ingredient.name.trim().to_string()),
            quantity: Set(ingredient.quantity),
            unit: Set(ingredient.unit.trim().to_string()),
            store_section: Set(ingredient
                .store_section
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)),
            ..Default::default()
        };
        stored.push(row.insert(txn).await?);
    }
    Ok(stored)
}

/// Creates a recipe and its ingredients atomically.
#[instrument(skip(db, new), fields(name = %new.name))]
pub async fn create_recipe(db: &DatabaseConnection, new: NewRecipe) -> Result<RecipeWithIngredients> {
    validate(&new)?;

    let txn = db.begin().await?;

    let recipe = recipe::ActiveModel {
        name: Set(new.name.trim().to_string()),
        description: Set(new.description),
        dietary_restrictions_compliant: Set(json::RestrictionList::from_values(
            new.dietary_restrictions_compliant,
        )),
        instructions: Set(json::StringList(new.instructions)),
        prep_time_minutes: Set(new.prep_time_minutes),
        cook_time_minutes: Set(new.cook_time_minutes),
        servings: Set(new.servings),
        meal_types: Set(json::MealTypeList::from_values(new.meal_types)),
        tags: Set(json::StringList::from_values(new.tags)),
        is_favorite: Set(new.is_favorite),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let ingredients = insert_ingredients(&txn, recipe.id, &new.ingredients).await?;

    txn.commit().await?;

    info!("Created recipe {} ({})", recipe.name, recipe.id);
    Ok(RecipeWithIngredients {
        recipe,
        ingredients,
    })
}

/// Replaces every field and ingredient of an existing recipe.
pub async fn update_recipe(
    db: &DatabaseConnection,
    recipe_id: i64,
    new: NewRecipe,
) -> Result<RecipeWithIngredients> {
    validate(&new)?;

    let txn = db.begin().await?;

    let existing = Recipe::find_by_id(recipe_id)
        .one(&txn)
        .await?
        .ok_or(Error::RecipeNotFound { id: recipe_id })?;

    let mut active: recipe::ActiveModel = existing.into();
    active.name = Set(new.name.trim().to_string());
    active.description = Set(new.description);
    active.dietary_restrictions_compliant = Set(json::RestrictionList::from_values(
        new.dietary_restrictions_compliant,
    ));
    active.instructions = Set(json::StringList(new.instructions));
    active.prep_time_minutes = Set(new.prep_time_minutes);
    active.cook_time_minutes = Set(new.cook_time_minutes);
    active.servings = Set(new.servings);
    active.meal_types = Set(json::MealTypeList::from_values(new.meal_types));
    active.tags = Set(json::StringList::from_values(new.tags));
    active.is_favorite = Set(new.is_favorite);
    let recipe = active.update(&txn).await?;

    RecipeIngredient::delete_many()
        .filter(recipe_ingredient::Column::RecipeId.eq(recipe_id))
        .exec(&txn)
        .await?;
    let ingredients = insert_ingredients(&txn, recipe_id, &new.ingredients).await?;

    txn.commit().await?;

    Ok(RecipeWithIngredients {
        recipe,
        ingredients,
    })
}

/// Marks or unmarks a recipe as a household favorite.
pub async fn set_favorite(
    db: &DatabaseConnection,
    recipe_id: i64,
    is_favorite: bool,
) -> Result<recipe::Model> {
    let existing = Recipe::find_by_id(recipe_id)
        .one(db)
        .await?
        .ok_or(Error::RecipeNotFound { id: recipe_id })?;

    let mut active: recipe::ActiveModel = existing.into();
    active.is_favorite = Set(is_favorite);
    active.update(db).await.map_err(Into::into)
}

/// Fetches one recipe with its ingredients, `None` if it does not exist.
pub async fn get_recipe(
    db: &DatabaseConnection,
    recipe_id: i64,
) -> Result<Option<RecipeWithIngredients>> {
    let Some(recipe) = Recipe::find_by_id(recipe_id).one(db).await? else {
        return Ok(None);
    };

    let ingredients = recipe
        .find_related(RecipeIngredient)
        .order_by_asc(recipe_ingredient::Column::Position)
        .all(db)
        .await?;

    Ok(Some(RecipeWithIngredients {
        recipe,
        ingredients,
    }))
}

/// Finds a recipe by exact name.
pub async fn get_recipe_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<recipe::Model>> {
    Recipe::find()
        .filter(recipe::Column::Name.eq(name.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists recipes matching `filter`, ordered by name.
pub async fn list_recipes(
    db: &DatabaseConnection,
    filter: &RecipeFilter,
) -> Result<Vec<recipe::Model>> {
    let recipes = Recipe::find()
        .order_by_asc(recipe::Column::Name)
        .all(db)
        .await?;

    Ok(recipes.into_iter().filter(|r| filter.matches(r)).collect())
}

/// Loads the recipes with the given ids, with ingredients, keyed by id.
///
/// Ids without a recipe are simply absent from the map.
pub async fn get_recipes_by_ids(
    db: &DatabaseConnection,
    recipe_ids: &[i64],
) -> Result<HashMap<i64, RecipeWithIngredients>> {
    if recipe_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = Recipe::find()
        .filter(recipe::Column::Id.is_in(recipe_ids.iter().copied()))
        .find_with_related(RecipeIngredient)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(recipe, mut ingredients)| {
            ingredients.sort_by_key(|i| (i.position, i.id));
            (
                recipe.id,
                RecipeWithIngredients {
                    recipe,
                    ingredients,
                },
            )
        })
        .collect())
}

/// Number of stored recipes.
pub async fn count_recipes(db: &DatabaseConnection) -> Result<u64> {
    Recipe::find().count(db).await.map_err(Into::into)
}

/// Deletes a recipe and its ingredients.
///
/// Meal plan entries that reference the recipe are left alone; grocery
/// generation reports them as skipped.
#[instrument(skip(db))]
pub async fn delete_recipe(db: &DatabaseConnection, recipe_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    RecipeIngredient::delete_many()
        .filter(recipe_ingredient::Column::RecipeId.eq(recipe_id))
        .exec(&txn)
        .await?;

    let result = Recipe::delete_by_id(recipe_id).exec(&txn).await?;
    if result.rows_affected == 0 {
        return Err(Error::RecipeNotFound { id: recipe_id });
    }

    txn.commit().await?;
    info!("Deleted recipe {recipe_id}");
    Ok(())
}

/// Inserts seed recipes whose names are not already taken (case-insensitive).
///
/// Returns the number of recipes created.
pub async fn seed_recipes(db: &DatabaseConnection, seeds: &[RecipeSeed]) -> Result<usize> {
    let mut existing: Vec<String> = Recipe::find()
        .all(db)
        .await?
        .into_iter()
        .map(|r| r.name.to_lowercase())
        .collect();

    let mut created = 0;
    for seed in seeds {
        let key = seed.name.trim().to_lowercase();
        if existing.contains(&key) {
            continue;
        }
        create_recipe(db, seed.clone().into()).await?;
        existing.push(key);
        created += 1;
    }

    info!("Seeded {created} recipes");
    Ok(created)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::config::settings::{IngredientSeed, parse_config};
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_recipe_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let mut new = new_recipe("", 4, &[]);
        assert!(matches!(
            create_recipe(&db, new.clone()).await.unwrap_err(),
            Error::InvalidInput { .. }
        ));

        new.name = "Soup".to_string();
        new.servings = 0;
        assert!(matches!(
            create_recipe(&db, new.clone()).await.unwrap_err(),
            Error::InvalidServings { servings: 0 }
        ));

        let bad = new_recipe("Soup", 2, &[("water", -1.0, "cup", None)]);
        assert!(matches!(
            create_recipe(&db, bad).await.unwrap_err(),
            Error::InvalidQuantity { .. }
        ));

        let nan = new_recipe("Soup", 2, &[("water", f64::NAN, "cup", None)]);
        assert!(matches!(
            create_recipe(&db, nan).await.unwrap_err(),
            Error::InvalidQuantity { .. }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_and_get_recipe_keeps_ingredient_order() -> Result<()> {
        let db = setup_test_db().await?;

        let created = create_test_recipe(
            &db,
            "Pancakes",
            4,
            &[
                ("flour", 2.0, "cups", Some("pantry")),
                ("egg", 2.0, "each", Some("dairy")),
                ("milk", 1.5, "cups", None),
            ],
        )
        .await?;

        let fetched = get_recipe(&db, created.recipe.id).await?.unwrap();
        assert_eq!(fetched, created);
        let names: Vec<&str> = fetched.ingredients.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["flour", "egg", "milk"]);
        assert_eq!(fetched.ingredients[0].store_section.as_deref(), Some("pantry"));
        assert_eq!(fetched.ingredients[2].store_section, None);

        assert!(get_recipe(&db, 999).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_get_recipes_by_ids_skips_unknown_ids() -> Result<()> {
        let db = setup_test_db().await?;
        let a = create_test_recipe(&db, "A", 2, &[("x", 1.0, "g", None)]).await?;
        let b = create_test_recipe(&db, "B", 2, &[("y", 1.0, "g", None), ("z", 2.0, "g", None)])
            .await?;

        let found = get_recipes_by_ids(&db, &[a.recipe.id, b.recipe.id, 404]).await?;

        assert_eq!(found.len(), 2);
        assert_eq!(found[&b.recipe.id].ingredients.len(), 2);
        assert_eq!(found[&b.recipe.id].ingredients[1].name, "z");
        assert!(get_recipes_by_ids(&db, &[]).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_strict_and_flexible_dietary_filters() -> Result<()> {
        let db = setup_test_db().await?;

        let mut salad = new_recipe("Salad", 2, &[("lettuce", 1.0, "each", Some("produce"))]);
        salad.dietary_restrictions_compliant =
            vec![DietaryRestriction::Vegan, DietaryRestriction::GlutenFree];
        create_recipe(&db, salad).await?;

        let mut toast = new_recipe("Toast", 1, &[("bread", 2.0, "piece", None)]);
        toast.dietary_restrictions_compliant = vec![DietaryRestriction::Vegan];
        create_recipe(&db, toast).await?;

        create_test_recipe(&db, "Steak", 1, &[("steak", 1.0, "lb", Some("meat"))]).await?;

        let strict = RecipeFilter {
            restrictions: vec![DietaryRestriction::Vegan, DietaryRestriction::GlutenFree],
            mode: FilterMode::Strict,
            ..Default::default()
        };
        let names: Vec<String> = list_recipes(&db, &strict).await?.into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Salad".to_string()]);

        let flexible = RecipeFilter {
            mode: FilterMode::Flexible,
            ..strict
        };
        let names: Vec<String> = list_recipes(&db, &flexible).await?.into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Salad".to_string(), "Toast".to_string()]);

        assert_eq!(list_recipes(&db, &RecipeFilter::default()).await?.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_meal_type_and_search_filters() -> Result<()> {
        let db = setup_test_db().await?;

        let mut oats = new_recipe("Overnight Oats", 1, &[("oats", 0.5, "cup", Some("pantry"))]);
        oats.meal_types = vec![MealType::Breakfast];
        oats.tags = vec!["Quick".to_string()];
        create_recipe(&db, oats).await?;

        let mut stew = new_recipe("Stew", 6, &[("beef", 2.0, "lb", Some("meat"))]);
        stew.meal_types = vec![MealType::Dinner];
        stew.description = "Slow and hearty".to_string();
        create_recipe(&db, stew).await?;

        let breakfast = RecipeFilter {
            meal_type: Some(MealType::Breakfast),
            ..Default::default()
        };
        assert_eq!(list_recipes(&db, &breakfast).await?[0].name, "Overnight Oats");

        let by_tag = RecipeFilter {
            search: Some("quick".to_string()),
            ..Default::default()
        };
        assert_eq!(list_recipes(&db, &by_tag).await?.len(), 1);

        let by_description = RecipeFilter {
            search: Some("HEARTY".to_string()),
            ..Default::default()
        };
        assert_eq!(list_recipes(&db, &by_description).await?[0].name, "Stew");
        Ok(())
    }

    #[tokio::test]
    async fn test_update_recipe_replaces_ingredients() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_test_recipe(&db, "Soup", 4, &[("water", 1.0, "l", None)]).await?;

        let updated = update_recipe(
            &db,
            created.recipe.id,
            new_recipe("Soup", 2, &[("stock", 500.0, "ml", Some("pantry"))]),
        )
        .await?;

        assert_eq!(updated.recipe.servings, 2);
        assert_eq!(updated.ingredients.len(), 1);
        assert_eq!(updated.ingredients[0].name, "stock");
        let fetched = get_recipe(&db, created.recipe.id).await?.unwrap();
        assert_eq!(fetched.ingredients, updated.ingredients);

        let missing = update_recipe(&db, 999, new_recipe("X", 1, &[])).await;
        assert!(matches!(missing, Err(Error::RecipeNotFound { id: 999 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_set_favorite() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_test_recipe(&db, "Pie", 8, &[]).await?;

        let favorite = set_favorite(&db, created.recipe.id, true).await?;
        assert!(favorite.is_favorite);

        let favorites = RecipeFilter {
            favorites_only: true,
            ..Default::default()
        };
        assert_eq!(list_recipes(&db, &favorites).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_recipe_removes_ingredients() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_test_recipe(&db, "Soup", 4, &[("water", 1.0, "l", None)]).await?;

        delete_recipe(&db, created.recipe.id).await?;

        assert!(get_recipe(&db, created.recipe.id).await?.is_none());
        let orphans = RecipeIngredient::find()
            .filter(recipe_ingredient::Column::RecipeId.eq(created.recipe.id))
            .all(&db)
            .await?;
        assert!(orphans.is_empty());

        let again = delete_recipe(&db, created.recipe.id).await;
        assert!(matches!(again, Err(Error::RecipeNotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_recipes_skips_existing_names() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_recipe(&db, "pancakes", 4, &[]).await?;

        let config = parse_config(
            r#"
            [[recipes]]
            name = "Pancakes"
            servings = 4

            [[recipes]]
            name = "Grilled Salmon"
            servings = 2
            meal_types = ["dinner"]
            ingredients = [
                { name = "salmon fillet", quantity = 2.0, unit = "each", store_section = "fish" },
            ]
            "#,
        )?;

        assert_eq!(seed_recipes(&db, &config.recipes).await?, 1);
        assert_eq!(seed_recipes(&db, &config.recipes).await?, 0);
        assert_eq!(count_recipes(&db).await?, 2);

        let salmon = get_recipe_by_name(&db, "Grilled Salmon").await?.unwrap();
        assert_eq!(salmon.meal_types.0, vec![MealType::Dinner]);
        Ok(())
    }

    #[test]
    fn test_seed_conversion_keeps_ingredients() {
        let seed = RecipeSeed {
            name: "Tea".to_string(),
            description: String::new(),
            dietary_restrictions_compliant: vec![],
            ingredients: vec![IngredientSeed {
                name: "tea bag".to_string(),
                quantity: 1.0,
                unit: "each".to_string(),
                store_section: None,
            }],
            instructions: vec![],
            prep_time_minutes: 0,
            cook_time_minutes: 5,
            servings: 1,
            meal_types: vec![],
            tags: vec![],
        };

        let new: NewRecipe = seed.into();
        assert_eq!(new.ingredients.len(), 1);
        assert_eq!(new.ingredients[0].quantity, 1.0);
        assert!(!new.is_favorite);
    }
}
