//! Recipe Models

use serde::Serialize;

use crate::domain::stores::Store;

/// Largest party the planner accepts.
pub const MAX_PEOPLE: u8 = 20;

/// Inputs collected from the request form, unvalidated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeRequest {
    pub people: String,
    pub preferences: Vec<String>,
    pub stores: Vec<Store>,
    pub fridge_items: String,
}

/// A discounted item available for the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromotedIngredient {
    pub name: String,
    pub store: Store,
}

/// Everything the page needs to present suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipePlan {
    pub people: u8,
    pub preferences: Vec<String>,
    pub stores: Vec<Store>,
    pub fridge_items: Vec<String>,
    pub promoted_ingredients: Vec<PromotedIngredient>,
}
