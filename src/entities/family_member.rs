//! Family member entity - A household member whose meals are planned.
//!
//! Each member carries dietary restriction tags plus free-form favorite,
//! allergy and dislike ingredient lists used when choosing recipes.

use super::json::{RestrictionList, StringList};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Family member database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "family_members")]
pub struct Model {
    /// Unique identifier for the member
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name
    pub name: String,
    /// Dietary restrictions this member follows
    pub dietary_restrictions: RestrictionList,
    /// Ingredients this member enjoys
    pub favorite_ingredients: StringList,
    /// Ingredients this member must not eat
    pub allergies: StringList,
    /// Ingredients this member prefers to avoid
    pub dislikes: StringList,
    /// Free-text notes
    pub notes: String,
    /// When the member was added
    pub created_at: DateTimeUtc,
}

/// `FamilyMember` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
