//! Form page view model.

use larder_app::domain::{
    recipes::models::{PromotedIngredient, RecipePlan},
    stores::Store,
};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

const NO_PROMOTIONS_NOTICE: &str = "No promotions are cached for today yet, try again later";

/// A store the user can pick on the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct StoreOption {
    /// Form value, e.g. `lidl`
    pub id: String,

    /// Label shown to the user
    pub name: String,
}

impl From<Store> for StoreOption {
    fn from(store: Store) -> Self {
        Self {
            id: store.as_str().to_string(),
            name: store.display_name().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct PromotedIngredientResponse {
    pub name: String,
    pub store: String,
}

impl From<PromotedIngredient> for PromotedIngredientResponse {
    fn from(ingredient: PromotedIngredient) -> Self {
        Self {
            name: ingredient.name,
            store: ingredient.store.as_str().to_string(),
        }
    }
}

/// Recipe plan handed to the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct RecipesResponse {
    pub people: u8,
    pub preferences: Vec<String>,
    pub stores: Vec<String>,
    pub fridge_items: Vec<String>,
    pub promoted_ingredients: Vec<PromotedIngredientResponse>,
}

impl From<RecipePlan> for RecipesResponse {
    fn from(plan: RecipePlan) -> Self {
        Self {
            people: plan.people,
            preferences: plan.preferences,
            stores: plan
                .stores
                .into_iter()
                .map(|store| store.as_str().to_string())
                .collect(),
            fridge_items: plan.fridge_items,
            promoted_ingredients: plan
                .promoted_ingredients
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

/// Everything the form page renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct HomePage {
    /// Stores offered on the form
    pub stores: Vec<StoreOption>,

    /// Today's promotions matching the current selection
    pub promotions_available: usize,

    /// Shown when nothing is cached for the selection
    pub notice: Option<String>,

    /// Suggestions, after a successful submission
    pub recipes: Option<RecipesResponse>,

    /// Why the submission could not be answered
    pub error: Option<String>,
}

impl HomePage {
    pub(crate) fn empty(promotions_available: usize) -> Self {
        Self {
            stores: Store::ALL.into_iter().map(Into::into).collect(),
            promotions_available,
            notice: (promotions_available == 0).then(|| NO_PROMOTIONS_NOTICE.to_string()),
            recipes: None,
            error: None,
        }
    }

    pub(crate) fn with_recipes(promotions_available: usize, plan: RecipePlan) -> Self {
        Self {
            recipes: Some(plan.into()),
            ..Self::empty(promotions_available)
        }
    }

    pub(crate) fn with_error(promotions_available: usize, error: String) -> Self {
        Self {
            error: Some(error),
            ..Self::empty(promotions_available)
        }
    }
}
