//! Per-line fact extraction
//!
//! Given one recipe line and the two caches, produce the (allergen, tier)
//! facts attributable to that single line. Lookup misses degrade to empty
//! fact lists; this code sits inside a render path and must never raise.

use cheflife_allergen::{Allergen, AllergenFact};
use cheflife_model::{IngredientCatalog, IngredientLine, LineKind, MasterIngredient, RecipeCache};
use smallvec::SmallVec;
use tracing::debug;

/// Per-line fact list; most ingredients carry at most a handful of facts
pub type FactBuffer = SmallVec<[AllergenFact; 4]>;

/// Extract the allergen facts one recipe line contributes.
///
/// - Raw lines scan the master ingredient's builtin flag columns (contains
///   dominates may-contain per allergen) and its active custom slots.
/// - Prepared lines copy the sub-recipe's frozen declaration snapshot,
///   attributed to the sub-recipe, never recursed into its ingredients.
/// - A dangling reference or an undeclared sub-recipe yields no facts.
#[must_use]
pub fn extract_facts(
    line: &IngredientLine,
    catalog: &IngredientCatalog,
    recipes: &RecipeCache,
) -> FactBuffer {
    match &line.kind {
        LineKind::Raw {
            master_ingredient_id,
        } => match catalog.get(master_ingredient_id) {
            Some(master) => raw_facts(master),
            None => {
                debug!(line = %line.name, id = %master_ingredient_id, "master ingredient missing from catalog; no facts");
                FactBuffer::new()
            }
        },
        LineKind::Prepared { recipe_id } => {
            let info = recipes.get(recipe_id).and_then(|r| r.allergen_info.as_ref());
            match info {
                Some(info) => {
                    let mut facts = FactBuffer::new();
                    facts.extend(
                        info.contains
                            .iter()
                            .cloned()
                            .map(AllergenFact::contains),
                    );
                    facts.extend(
                        info.may_contain
                            .iter()
                            .cloned()
                            .map(AllergenFact::may_contain),
                    );
                    facts
                }
                None => {
                    debug!(line = %line.name, id = %recipe_id, "sub-recipe missing or undeclared; no facts");
                    FactBuffer::new()
                }
            }
        }
    }
}

fn raw_facts(master: &MasterIngredient) -> FactBuffer {
    let mut facts = FactBuffer::new();
    for allergen in &Allergen::BUILTIN {
        if master.contains_flag(allergen.key()) {
            facts.push(AllergenFact::contains(allergen.clone()));
        } else if master.may_contain_flag(allergen.key()) {
            facts.push(AllergenFact::may_contain(allergen.clone()));
        }
    }
    for slot in master.custom_slots() {
        // Slot keys are non-blank by construction; a slot spelling a
        // builtin key collapses onto the builtin allergen.
        if let Some(allergen) = Allergen::from_key(&slot.key) {
            facts.push(if slot.may_contain {
                AllergenFact::may_contain(allergen)
            } else {
                AllergenFact::contains(allergen)
            });
        }
    }
    facts
}
