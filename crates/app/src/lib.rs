//! Shared application domain and persistence modules.

pub mod calendar;
pub mod context;
pub mod database;
pub mod domain;

#[cfg(test)]
mod test;
