//! ChefLife Allergen Cascade
//!
//! Propagates allergen facts from raw ingredients and declared sub-recipes
//! up into a parent recipe's declaration. The whole computation is a pure,
//! synchronous derivation over the in-memory caches:
//!
//! ```text
//! ingredient lines ──▶ extraction ──▶ aggregation ──▶ resolution ──▶ projection
//!                        (per line)   (sources map)   (overrides)    (declaration)
//! ```
//!
//! Lookup misses never fail: a dangling master-ingredient or sub-recipe
//! reference contributes zero facts, so a recipe with stale references
//! still renders its remaining allergens.
//!
//! # Example
//!
//! ```
//! use cheflife_allergen::{Allergen, ManualOverrides};
//! use cheflife_cascade::compute_declaration;
//! use cheflife_model::{IngredientCatalog, IngredientId, IngredientLine, MasterIngredient, RecipeCache};
//! use serde_json::json;
//!
//! let peanut_butter = MasterIngredient::new(IngredientId::new())
//!     .with_product_name("Peanut Butter")
//!     .with_field("allergen_peanut", json!(true));
//! let line = IngredientLine::raw("Peanut Butter", peanut_butter.id);
//! let catalog: IngredientCatalog = [peanut_butter].into_iter().collect();
//!
//! let declaration = compute_declaration(
//!     &[line],
//!     &catalog,
//!     &RecipeCache::new(),
//!     &ManualOverrides::default(),
//! );
//! assert_eq!(declaration.contains, vec![Allergen::Peanut]);
//! ```

#![warn(unreachable_pub)]

mod aggregate;
mod cascade;
mod extract;

pub use aggregate::aggregate;
pub use cascade::{compute_declaration, compute_for_recipe, freeze_declaration};
pub use extract::{extract_facts, FactBuffer};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
