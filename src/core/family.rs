//! Family member business logic.

use crate::{
    entities::{DietaryRestriction, FamilyMember, FamilyMemberColumn, family_member, json},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// A family member that has not been stored yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewFamilyMember {
    /// Display name
    pub name: String,
    /// Dietary restrictions
    pub dietary_restrictions: Vec<DietaryRestriction>,
    /// Favorite ingredients
    pub favorite_ingredients: Vec<String>,
    /// Allergies
    pub allergies: Vec<String>,
    /// Dislikes
    pub dislikes: Vec<String>,
    /// Notes
    pub notes: String,
}

fn validate(new: &NewFamilyMember) -> Result<()> {
    if new.name.trim().is_empty() {
        return Err(Error::InvalidInput {
            message: "Family member name cannot be empty".to_string(),
        });
    }
    Ok(())
}

/// Adds a family member.
pub async fn create_family_member(
    db: &DatabaseConnection,
    new: NewFamilyMember,
) -> Result<family_member::Model> {
    validate(&new)?;

    let member = family_member::ActiveModel {
        name: Set(new.name.trim().to_string()),
        dietary_restrictions: Set(json::RestrictionList::from_values(new.dietary_restrictions)),
        favorite_ingredients: Set(json::StringList::from_values(new.favorite_ingredients)),
        allergies: Set(json::StringList::from_values(new.allergies)),
        dislikes: Set(json::StringList::from_values(new.dislikes)),
        notes: Set(new.notes),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Added family member {} ({})", member.name, member.id);
    Ok(member)
}

/// Every family member, ordered by name.
pub async fn list_family_members(db: &DatabaseConnection) -> Result<Vec<family_member::Model>> {
    FamilyMember::find()
        .order_by_asc(FamilyMemberColumn::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Fetches a member by id.
pub async fn get_family_member(
    db: &DatabaseConnection,
    member_id: i64,
) -> Result<Option<family_member::Model>> {
    FamilyMember::find_by_id(member_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Fetches a member by exact name.
pub async fn get_family_member_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<family_member::Model>> {
    FamilyMember::find()
        .filter(FamilyMemberColumn::Name.eq(name.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Replaces a member's profile, keeping id and creation time.
pub async fn update_family_member(
    db: &DatabaseConnection,
    member_id: i64,
    new: NewFamilyMember,
) -> Result<family_member::Model> {
    validate(&new)?;

    let existing = FamilyMember::find_by_id(member_id)
        .one(db)
        .await?
        .ok_or(Error::FamilyMemberNotFound { id: member_id })?;

    let mut member: family_member::ActiveModel = existing.into();
    member.name = Set(new.name.trim().to_string());
    member.dietary_restrictions = Set(json::RestrictionList::from_values(new.dietary_restrictions));
    member.favorite_ingredients = Set(json::StringList::from_values(new.favorite_ingredients));
    member.allergies = Set(json::StringList::from_values(new.allergies));
    member.dislikes = Set(json::StringList::from_values(new.dislikes));
    member.notes = Set(new.notes);

    member.update(db).await.map_err(Into::into)
}

/// Removes a member. Their meal plan entries are left in place.
pub async fn delete_family_member(db: &DatabaseConnection, member_id: i64) -> Result<()> {
    let result = FamilyMember::delete_by_id(member_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::FamilyMemberNotFound { id: member_id });
    }
    info!("Removed family member {member_id}");
    Ok(())
}

/// Union of every member's dietary restrictions, in first-seen order.
///
/// Useful as a strict recipe filter when cooking for the whole household.
#[must_use]
pub fn household_restrictions(members: &[family_member::Model]) -> Vec<DietaryRestriction> {
    json::RestrictionList::from_values(
        members
            .iter()
            .flat_map(|m| m.dietary_restrictions.0.iter().copied()),
    )
    .0
}
