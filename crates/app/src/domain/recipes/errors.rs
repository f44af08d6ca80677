//! Recipes service errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecipesError {
    #[error("number of people must be a whole number between 1 and {max}, got {value:?}")]
    InvalidPeople { value: String, max: u8 },

    #[error("no promoted or fridge ingredients to cook with")]
    NothingToCookWith,
}
