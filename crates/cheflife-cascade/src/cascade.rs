//! Cascade entry points
//!
//! Single-call computation of a recipe's declaration, recomputed on every
//! render from the current lines, caches and overrides. Infallible by
//! design: data-integrity problems degrade to missing facts.

use crate::aggregate::aggregate;
use cheflife_allergen::{project, AllergenDeclaration, ManualOverrides};
use cheflife_model::{AllergenInfo, IngredientCatalog, IngredientLine, Recipe, RecipeCache};
use tracing::trace;

/// Compute the declaration for a set of ingredient lines
#[must_use]
pub fn compute_declaration(
    lines: &[IngredientLine],
    catalog: &IngredientCatalog,
    recipes: &RecipeCache,
    overrides: &ManualOverrides,
) -> AllergenDeclaration {
    let agg = aggregate(lines, catalog, recipes);
    trace!(
        contains = agg.contains.len(),
        may_contain = agg.may_contain.len(),
        "aggregated allergen facts"
    );
    project(&agg, overrides)
}

/// Compute the declaration for a recipe record, using its own persisted
/// overrides (or none, for a recipe that was never touched)
#[must_use]
pub fn compute_for_recipe(
    recipe: &Recipe,
    catalog: &IngredientCatalog,
    recipes: &RecipeCache,
) -> AllergenDeclaration {
    let empty = ManualOverrides::default();
    let overrides = recipe.allergen_manual_overrides.as_ref().unwrap_or(&empty);
    compute_declaration(&recipe.ingredients, catalog, recipes, overrides)
}

/// Freeze a computed declaration into the snapshot written back to the
/// recipe record on save. Parent recipes consume this snapshot when the
/// recipe is used as a prepared item; they never re-derive it.
#[must_use]
pub fn freeze_declaration(declaration: &AllergenDeclaration) -> AllergenInfo {
    AllergenInfo {
        contains: declaration.contains.clone(),
        may_contain: declaration.may_contain.clone(),
    }
}
