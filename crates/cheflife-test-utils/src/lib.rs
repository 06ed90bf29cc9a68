//! Testing utilities for the ChefLife workspace
//!
//! Shared fixture builders for master ingredients, recipe lines and caches.

#![allow(missing_docs)]

use cheflife_allergen::Allergen;
use cheflife_model::{
    AllergenInfo, IngredientCatalog, IngredientId, IngredientLine, MasterIngredient, Recipe,
    RecipeCache,
};
use serde_json::json;

/// Master ingredient with contains/may-contain flags set by allergen key
pub fn master_with(name: &str, contains: &[&str], may_contain: &[&str]) -> MasterIngredient {
    let mut master = MasterIngredient::new(IngredientId::new()).with_product_name(name);
    for key in contains {
        master = master.with_field(format!("allergen_{key}"), json!(true));
    }
    for key in may_contain {
        master = master.with_field(format!("allergen_{key}_may_contain"), json!(true));
    }
    master
}

/// Add an active custom slot (1-based `n`) to a master ingredient
pub fn with_custom_slot(
    master: MasterIngredient,
    n: usize,
    name: &str,
    may_contain: bool,
) -> MasterIngredient {
    master
        .with_field(format!("allergen_custom{n}_active"), json!(true))
        .with_field(format!("allergen_custom{n}_name"), json!(name))
        .with_field(format!("allergen_custom{n}_may_contain"), json!(may_contain))
}

/// Raw line referencing an existing master ingredient
pub fn raw_line(master: &MasterIngredient) -> IngredientLine {
    let name = master.product_name.clone().unwrap_or_default();
    IngredientLine::raw(name, master.id)
}

/// Prepared line referencing an existing recipe
pub fn prepared_line(recipe: &Recipe) -> IngredientLine {
    IngredientLine::prepared(recipe.name.clone(), recipe.id)
}

/// Recipe carrying a frozen declaration snapshot
pub fn declared_recipe(name: &str, contains: &[Allergen], may_contain: &[Allergen]) -> Recipe {
    Recipe::new(name).with_allergen_info(AllergenInfo {
        contains: contains.to_vec(),
        may_contain: may_contain.to_vec(),
    })
}

/// Catalog from a list of master ingredients
pub fn catalog(masters: &[MasterIngredient]) -> IngredientCatalog {
    masters.iter().cloned().collect()
}

/// Recipe cache from a list of recipes
pub fn recipe_cache(recipes: &[Recipe]) -> RecipeCache {
    recipes.iter().cloned().collect()
}
