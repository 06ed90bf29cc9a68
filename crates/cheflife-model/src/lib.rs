//! ChefLife Data Model
//!
//! Persisted record types for the allergen cascade: master-ingredient rows
//! with the flat `allergen_<key>` column convention, recipe records with
//! ingredient lines and frozen declaration snapshots, and the in-memory
//! caches the cascade reads from.
//!
//! Import data arrives with inconsistent scalar typing (spreadsheet rounds
//! of `true` / `"true"` / `1`); [`Flag`] is the single point of truthiness
//! for all allergen columns.

#![warn(unreachable_pub)]

mod flag;
mod ids;
mod ingredient;
mod recipe;
mod settings;

pub use flag::Flag;
pub use ids::{IngredientId, RecipeId};
pub use ingredient::{CustomSlot, IngredientCatalog, MasterIngredient, MAX_CUSTOM_SLOTS};
pub use recipe::{AllergenInfo, IngredientLine, LineKind, Recipe, RecipeCache};
pub use settings::{CustomAllergenDef, OrgAllergenSettings, SettingsError};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
