//! Larder Domain Concerns

pub mod fetchers;
pub mod freshness;
pub mod promotions;
pub mod recipes;
pub mod refresh;
pub mod stores;
