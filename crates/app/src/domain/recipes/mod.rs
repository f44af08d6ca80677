//! Recipes

mod errors;
pub mod models;
pub mod service;

pub use errors::RecipesError;
pub use service::*;
