//! Recipes service.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashSet;

use crate::domain::{
    promotions::records::PromotionRecord,
    recipes::{
        errors::RecipesError,
        models::{MAX_PEOPLE, PromotedIngredient, RecipePlan, RecipeRequest},
    },
};

/// Builds a plan from the request and today's filtered promotions.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromotionRecipesService;

impl PromotionRecipesService {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RecipesService for PromotionRecipesService {
    async fn suggest(
        &self,
        request: RecipeRequest,
        promotions: Vec<PromotionRecord>,
    ) -> Result<RecipePlan, RecipesError> {
        let people = parse_people(&request.people)?;
        let fridge_items = split_fridge_items(&request.fridge_items);

        let mut seen = FxHashSet::default();

        let promoted_ingredients: Vec<PromotedIngredient> = promotions
            .into_iter()
            .filter(|promotion| seen.insert((promotion.store, promotion.name.to_lowercase())))
            .map(|promotion| PromotedIngredient {
                name: promotion.name,
                store: promotion.store,
            })
            .collect();

        if promoted_ingredients.is_empty() && fridge_items.is_empty() {
            return Err(RecipesError::NothingToCookWith);
        }

        let preferences = request
            .preferences
            .into_iter()
            .map(|preference| preference.trim().to_string())
            .filter(|preference| !preference.is_empty())
            .collect();

        Ok(RecipePlan {
            people,
            preferences,
            stores: request.stores,
            fridge_items,
            promoted_ingredients,
        })
    }
}

#[automock]
#[async_trait]
pub trait RecipesService: Send + Sync {
    /// Assembles a recipe plan around `promotions`, which the caller has
    /// already restricted to today and the selected stores.
    async fn suggest(
        &self,
        request: RecipeRequest,
        promotions: Vec<PromotionRecord>,
    ) -> Result<RecipePlan, RecipesError>;
}

fn parse_people(raw: &str) -> Result<u8, RecipesError> {
    let invalid = || RecipesError::InvalidPeople {
        value: raw.to_string(),
        max: MAX_PEOPLE,
    };

    let people: u8 = raw.trim().parse().map_err(|_| invalid())?;

    if !(1..=MAX_PEOPLE).contains(&people) {
        return Err(invalid());
    }

    Ok(people)
}

fn split_fridge_items(raw: &str) -> Vec<String> {
    raw.split([',', '\n'])
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
