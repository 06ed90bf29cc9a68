//! Override resolution
//!
//! Decides final membership of the two declaration sets from the
//! auto-detected facts and the operator overrides. Precedence, later rules
//! winning for the same allergen:
//!
//! 1. seed contains from auto-detected contains keys
//! 2. seed may-contain from auto-detected may-contain keys, minus anything
//!    already in contains
//! 3. manual contains: absolute add, evicts from may-contain
//! 4. manual may-contain: add only when not already in contains
//! 5. promotions: add to contains, evict from may-contain
//!
//! Post-invariant: the two sets are disjoint.

use crate::allergen::Allergen;
use crate::facts::AggregatedFacts;
use crate::overrides::ManualOverrides;
use indexmap::IndexSet;

/// Final membership of the two declaration tiers, insertion-ordered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedSets {
    /// Contains-tier membership
    pub contains: IndexSet<Allergen>,
    /// May-contain-tier membership, disjoint from contains
    pub may_contain: IndexSet<Allergen>,
}

impl ResolvedSets {
    /// Whether the two tiers share no allergen
    #[must_use]
    pub fn is_disjoint(&self) -> bool {
        self.contains.is_disjoint(&self.may_contain)
    }
}

/// Apply the override precedence rules to the aggregated facts
#[must_use]
pub fn resolve(auto: &AggregatedFacts, overrides: &ManualOverrides) -> ResolvedSets {
    let mut contains: IndexSet<Allergen> = auto.contains.keys().cloned().collect();
    let mut may_contain: IndexSet<Allergen> = auto
        .may_contain
        .keys()
        .filter(|allergen| !contains.contains(*allergen))
        .cloned()
        .collect();

    for allergen in &overrides.manual_contains {
        contains.insert(allergen.clone());
        may_contain.shift_remove(allergen);
    }

    for allergen in &overrides.manual_may_contain {
        if !contains.contains(allergen) {
            may_contain.insert(allergen.clone());
        }
    }

    for allergen in &overrides.promoted_to_contains {
        contains.insert(allergen.clone());
        may_contain.shift_remove(allergen);
    }

    let resolved = ResolvedSets {
        contains,
        may_contain,
    };
    debug_assert!(resolved.is_disjoint());
    resolved
}
