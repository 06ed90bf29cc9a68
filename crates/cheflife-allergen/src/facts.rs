//! Allergen facts and source attribution
//!
//! An [`AllergenFact`] is one (allergen, tier) pair attributable to a single
//! recipe line. [`AggregatedFacts`] folds facts across all lines of a recipe
//! into two ordered allergen-to-sources maps, one per tier. Cross-tier
//! dedup is deliberately NOT done here: an allergen may key both maps when
//! ingredients disagree. Tier resolution happens later, at projection.

use crate::allergen::{Allergen, Tier};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One auto-detected (allergen, tier) fact for a single recipe line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllergenFact {
    /// The detected allergen
    pub allergen: Allergen,
    /// The tier it was detected at
    pub tier: Tier,
}

impl AllergenFact {
    /// Contains-tier fact
    #[inline]
    #[must_use]
    pub fn contains(allergen: Allergen) -> Self {
        Self {
            allergen,
            tier: Tier::Contains,
        }
    }

    /// May-contain-tier fact
    #[inline]
    #[must_use]
    pub fn may_contain(allergen: Allergen) -> Self {
        Self {
            allergen,
            tier: Tier::MayContain,
        }
    }
}

/// Which kind of recipe line contributed a fact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// A raw master-ingredient line
    Raw,
    /// A prepared sub-recipe line
    Prepared,
}

/// Attribution record: which line contributed an allergen, at which tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllergenSource {
    /// Identity of the contributing recipe line
    pub line_id: Uuid,
    /// Resolved display name of the contributing line
    pub name: String,
    /// Raw ingredient or prepared sub-recipe
    pub kind: SourceKind,
    /// Tier the fact was contributed at
    pub tier: Tier,
}

/// Auto-detected facts for a whole recipe, keyed by allergen per tier.
///
/// Maps are insertion-ordered; multiple lines contributing the same allergen
/// at the same tier accumulate multiple sources under one key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregatedFacts {
    /// Contains-tier facts: allergen to attributing sources
    pub contains: IndexMap<Allergen, Vec<AllergenSource>>,
    /// May-contain-tier facts: allergen to attributing sources
    pub may_contain: IndexMap<Allergen, Vec<AllergenSource>>,
}

impl AggregatedFacts {
    /// Empty aggregation
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one fact with its source attribution
    pub fn record(&mut self, fact: AllergenFact, source: AllergenSource) {
        let bucket = match fact.tier {
            Tier::Contains => &mut self.contains,
            Tier::MayContain => &mut self.may_contain,
        };
        bucket.entry(fact.allergen).or_default().push(source);
    }

    /// Whether the allergen was auto-detected at either tier
    #[inline]
    #[must_use]
    pub fn is_auto_detected(&self, allergen: &Allergen) -> bool {
        self.contains.contains_key(allergen) || self.may_contain.contains_key(allergen)
    }

    /// Auto-detected tier for the allergen; contains wins when both tiers
    /// were contributed by different lines
    #[must_use]
    pub fn auto_tier(&self, allergen: &Allergen) -> Option<Tier> {
        if self.contains.contains_key(allergen) {
            Some(Tier::Contains)
        } else if self.may_contain.contains_key(allergen) {
            Some(Tier::MayContain)
        } else {
            None
        }
    }

    /// Attributing sources for the allergen at the given tier
    #[must_use]
    pub fn sources(&self, allergen: &Allergen, tier: Tier) -> &[AllergenSource] {
        let bucket = match tier {
            Tier::Contains => &self.contains,
            Tier::MayContain => &self.may_contain,
        };
        bucket.get(allergen).map_or(&[], Vec::as_slice)
    }

    /// True when no facts were detected at all
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contains.is_empty() && self.may_contain.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(name: &str, kind: SourceKind, tier: Tier) -> AllergenSource {
        AllergenSource {
            line_id: Uuid::new_v4(),
            name: name.to_string(),
            kind,
            tier,
        }
    }

    #[test]
    fn record_accumulates_sources_under_one_key() {
        let mut agg = AggregatedFacts::new();
        agg.record(
            AllergenFact::contains(Allergen::Peanut),
            source("Peanut Butter", SourceKind::Raw, Tier::Contains),
        );
        agg.record(
            AllergenFact::contains(Allergen::Peanut),
            source("Satay Sauce", SourceKind::Prepared, Tier::Contains),
        );

        assert_eq!(agg.contains.len(), 1);
        assert_eq!(agg.sources(&Allergen::Peanut, Tier::Contains).len(), 2);
    }

    #[test]
    fn no_cross_tier_dedup_at_aggregation() {
        let mut agg = AggregatedFacts::new();
        agg.record(
            AllergenFact::contains(Allergen::Peanut),
            source("Peanut Butter", SourceKind::Raw, Tier::Contains),
        );
        agg.record(
            AllergenFact::may_contain(Allergen::Peanut),
            source("Soy Sauce", SourceKind::Raw, Tier::MayContain),
        );

        // Same allergen legitimately keys both maps until projection.
        assert!(agg.contains.contains_key(&Allergen::Peanut));
        assert!(agg.may_contain.contains_key(&Allergen::Peanut));
        assert_eq!(agg.auto_tier(&Allergen::Peanut), Some(Tier::Contains));
    }

    #[test]
    fn auto_detection_queries() {
        let mut agg = AggregatedFacts::new();
        agg.record(
            AllergenFact::may_contain(Allergen::Soy),
            source("Soy Sauce", SourceKind::Raw, Tier::MayContain),
        );

        assert!(agg.is_auto_detected(&Allergen::Soy));
        assert!(!agg.is_auto_detected(&Allergen::Milk));
        assert_eq!(agg.auto_tier(&Allergen::Soy), Some(Tier::MayContain));
        assert_eq!(agg.auto_tier(&Allergen::Milk), None);
    }

    #[test]
    fn sources_miss_is_empty_slice() {
        let agg = AggregatedFacts::new();
        assert!(agg.sources(&Allergen::Egg, Tier::Contains).is_empty());
        assert!(agg.is_empty());
    }
}
