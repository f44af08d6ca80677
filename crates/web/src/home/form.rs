//! Recipe form input.

use larder_app::domain::{recipes::models::RecipeRequest, stores::Store};
use salvo::{http::form::FormData, prelude::*};
use tracing::warn;

const DEFAULT_PEOPLE: &str = "2";
const DEFAULT_BUDGET: &str = "any";
const CHECKED: &str = "yes";

/// Raw fields posted by the recipe form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RecipeForm {
    pub people: Option<String>,
    pub budget: Option<String>,
    pub vegetarian: bool,
    pub healthy: bool,
    pub preferences: Vec<String>,
    pub stores: Vec<String>,
    pub fridge_items: Option<String>,
}

impl RecipeForm {
    /// Reads the posted form body.
    pub(crate) async fn read(req: &mut Request) -> Result<Self, StatusError> {
        let form = req.form_data().await.map_err(|error| {
            warn!("failed to parse recipe form: {error}");

            StatusError::bad_request().brief("Could not read the submitted form")
        })?;

        Ok(Self::from_form_data(form))
    }

    fn from_form_data(form: &FormData) -> Self {
        let field = |name: &str| form.fields.get(name).cloned();
        let list = |name: &str| form.fields.get_vec(name).cloned().unwrap_or_default();

        Self {
            people: field("people"),
            budget: field("budget"),
            vegetarian: field("veg").as_deref() == Some(CHECKED),
            healthy: field("healthy").as_deref() == Some(CHECKED),
            preferences: list("preferences"),
            stores: list("stores"),
            fridge_items: field("fridge_items"),
        }
    }

    /// Stores were picked but none of them is one we know.
    ///
    /// Such a selection must match nothing rather than fall back to every
    /// store.
    pub(crate) fn selects_only_unknown_stores(&self) -> bool {
        !self.stores.is_empty()
            && self
                .stores
                .iter()
                .all(|raw| raw.parse::<Store>().is_err())
    }

    /// Turns the form into a planner request.
    ///
    /// Preferences start with the budget level, then the ticked boxes, then
    /// the free-text entries. Unknown stores are dropped.
    pub(crate) fn into_request(self) -> RecipeRequest {
        let budget = self
            .budget
            .filter(|budget| !budget.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BUDGET.to_string());

        let mut preferences = vec![format!("budget level: {}", budget.trim())];

        if self.vegetarian {
            preferences.push("vegetarian".to_string());
        }

        if self.healthy {
            preferences.push("healthy".to_string());
        }

        preferences.extend(self.preferences);

        let mut stores = Vec::with_capacity(self.stores.len());

        for raw in self.stores {
            match raw.parse::<Store>() {
                Ok(store) if !stores.contains(&store) => stores.push(store),
                Ok(_) => {}
                Err(error) => warn!("ignoring store selection: {error}"),
            }
        }

        RecipeRequest {
            people: self.people.unwrap_or_else(|| DEFAULT_PEOPLE.to_string()),
            preferences,
            stores,
            fridge_items: self.fridge_items.unwrap_or_default(),
        }
    }
}
