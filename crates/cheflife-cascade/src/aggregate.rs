//! Recipe-wide fact aggregation
//!
//! Folds per-line facts across all ingredient lines into the two
//! allergen-to-sources maps, attributing every fact to its contributing
//! line. Display-name resolution prefers the catalog record's names over
//! the line's own name; `"Unknown"` is the terminal fallback.

use crate::extract::extract_facts;
use cheflife_allergen::{AggregatedFacts, AllergenSource, SourceKind};
use cheflife_model::{IngredientCatalog, IngredientLine, LineKind, RecipeCache};

/// Fold the facts of all lines into tier-keyed source maps
#[must_use]
pub fn aggregate(
    lines: &[IngredientLine],
    catalog: &IngredientCatalog,
    recipes: &RecipeCache,
) -> AggregatedFacts {
    let mut agg = AggregatedFacts::new();
    for line in lines {
        let facts = extract_facts(line, catalog, recipes);
        if facts.is_empty() {
            continue;
        }
        let (name, kind) = attribution(line, catalog, recipes);
        for fact in facts {
            let source = AllergenSource {
                line_id: line.id,
                name: name.clone(),
                kind,
                tier: fact.tier,
            };
            agg.record(fact, source);
        }
    }
    agg
}

fn attribution(
    line: &IngredientLine,
    catalog: &IngredientCatalog,
    recipes: &RecipeCache,
) -> (String, SourceKind) {
    match &line.kind {
        LineKind::Raw {
            master_ingredient_id,
        } => {
            let name = catalog
                .get(master_ingredient_id)
                .map_or_else(|| fallback_name(&line.name), |m| m.display_name(&line.name).to_string());
            (name, SourceKind::Raw)
        }
        LineKind::Prepared { recipe_id } => {
            let name = recipes
                .get(recipe_id)
                .map(|r| r.name.trim())
                .filter(|n| !n.is_empty())
                .map_or_else(|| fallback_name(&line.name), ToString::to_string);
            (name, SourceKind::Prepared)
        }
    }
}

fn fallback_name(line_name: &str) -> String {
    let trimmed = line_name.trim();
    if trimmed.is_empty() {
        "Unknown".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cheflife_allergen::{Allergen, Tier};
    use cheflife_model::{AllergenInfo, IngredientId, MasterIngredient, Recipe};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn sources_accumulate_across_lines() {
        let pb = MasterIngredient::new(IngredientId::new())
            .with_product_name("Peanut Butter")
            .with_field("allergen_peanut", json!(true));
        let brittle = MasterIngredient::new(IngredientId::new())
            .with_product_name("Peanut Brittle")
            .with_field("allergen_peanut", json!(true));
        let lines = vec![
            IngredientLine::raw("PB", pb.id),
            IngredientLine::raw("Brittle", brittle.id),
        ];
        let catalog: IngredientCatalog = [pb, brittle].into_iter().collect();

        let agg = aggregate(&lines, &catalog, &RecipeCache::new());
        let sources = agg.sources(&Allergen::Peanut, Tier::Contains);
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].name, "Peanut Butter");
        assert_eq!(sources[1].name, "Peanut Brittle");
    }

    #[test]
    fn display_name_prefers_catalog_names() {
        let master = MasterIngredient::new(IngredientId::new())
            .with_common_name("Soy Sauce")
            .with_field("allergen_soy", json!(true));
        let line = IngredientLine::raw("cheap soy", master.id);
        let catalog: IngredientCatalog = [master].into_iter().collect();

        let agg = aggregate(&[line], &catalog, &RecipeCache::new());
        assert_eq!(agg.sources(&Allergen::Soy, Tier::Contains)[0].name, "Soy Sauce");
    }

    #[test]
    fn prepared_source_uses_sub_recipe_name_and_kind() {
        let pesto = Recipe::new("Pesto").with_allergen_info(AllergenInfo {
            contains: vec![Allergen::TreeNut],
            may_contain: vec![],
        });
        let line = IngredientLine::prepared("house pesto", pesto.id);
        let recipes: RecipeCache = [pesto].into_iter().collect();

        let agg = aggregate(&[line], &IngredientCatalog::new(), &recipes);
        let source = &agg.sources(&Allergen::TreeNut, Tier::Contains)[0];
        assert_eq!(source.name, "Pesto");
        assert_eq!(source.kind, SourceKind::Prepared);
    }

    #[test]
    fn dangling_lines_contribute_nothing_but_others_still_resolve() {
        let pb = MasterIngredient::new(IngredientId::new())
            .with_product_name("Peanut Butter")
            .with_field("allergen_peanut", json!(true));
        let lines = vec![
            IngredientLine::raw("Ghost", IngredientId::new()),
            IngredientLine::raw("PB", pb.id),
        ];
        let catalog: IngredientCatalog = [pb].into_iter().collect();

        let agg = aggregate(&lines, &catalog, &RecipeCache::new());
        assert_eq!(agg.contains.len(), 1);
        assert!(agg.is_auto_detected(&Allergen::Peanut));
    }

    #[test]
    fn cross_tier_disagreement_keys_both_maps() {
        let butter = MasterIngredient::new(IngredientId::new())
            .with_product_name("Peanut Butter")
            .with_field("allergen_peanut", json!(true));
        let sauce = MasterIngredient::new(IngredientId::new())
            .with_product_name("Soy Sauce")
            .with_field("allergen_peanut_may_contain", json!(true));
        let lines = vec![
            IngredientLine::raw("PB", butter.id),
            IngredientLine::raw("SS", sauce.id),
        ];
        let catalog: IngredientCatalog = [butter, sauce].into_iter().collect();

        let agg = aggregate(&lines, &catalog, &RecipeCache::new());
        assert!(agg.contains.contains_key(&Allergen::Peanut));
        assert!(agg.may_contain.contains_key(&Allergen::Peanut));
    }
}
