//! Declaration projection
//!
//! Produces the final [`AllergenDeclaration`]: the two disjoint tier lists,
//! the recipe-level cross-contact notes, and one provenance-tagged
//! [`AllergenEntry`] per allergen for rendering. An allergen appears exactly
//! once: an auto-detected may-contain that was promoted renders as a single
//! promoted contains-tier row, never as two.

use crate::allergen::{Allergen, Provenance, Tier};
use crate::facts::{AggregatedFacts, AllergenSource};
use crate::overrides::ManualOverrides;
use crate::resolve::resolve;
use serde::Serialize;

/// One rendered declaration row with provenance context
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllergenEntry {
    /// The declared allergen
    pub allergen: Allergen,
    /// Resolved tier
    pub tier: Tier,
    /// Where the entry came from
    pub provenance: Provenance,
    /// Attributing ingredient sources (auto and promoted entries)
    pub sources: Vec<AllergenSource>,
    /// Operator note (manual and promoted entries)
    pub note: Option<String>,
}

/// The computed declaration: pure function of ingredients, caches and
/// overrides, never persisted as its own authoritative copy
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AllergenDeclaration {
    /// Final contains-tier allergens
    pub contains: Vec<Allergen>,
    /// Final may-contain-tier allergens, disjoint from contains
    pub may_contain: Vec<Allergen>,
    /// Recipe-level cross-contact notes
    pub cross_contact_notes: Vec<String>,
    /// Provenance-tagged entries, contains tier first, one per allergen
    pub entries: Vec<AllergenEntry>,
}

impl AllergenDeclaration {
    /// Entry for a specific allergen, if declared
    #[must_use]
    pub fn entry(&self, allergen: &Allergen) -> Option<&AllergenEntry> {
        self.entries.iter().find(|e| &e.allergen == allergen)
    }

    /// True when nothing is declared
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contains.is_empty() && self.may_contain.is_empty()
    }
}

/// Project the aggregated facts and overrides into the final declaration
#[must_use]
pub fn project(auto: &AggregatedFacts, overrides: &ManualOverrides) -> AllergenDeclaration {
    let resolved = resolve(auto, overrides);

    let mut entries = Vec::with_capacity(resolved.contains.len() + resolved.may_contain.len());
    for allergen in &resolved.contains {
        entries.push(contains_entry(allergen, auto, overrides));
    }
    for allergen in &resolved.may_contain {
        entries.push(may_contain_entry(allergen, auto, overrides));
    }

    AllergenDeclaration {
        contains: resolved.contains.iter().cloned().collect(),
        may_contain: resolved.may_contain.iter().cloned().collect(),
        cross_contact_notes: overrides.cross_contact_notes.clone(),
        entries,
    }
}

fn contains_entry(
    allergen: &Allergen,
    auto: &AggregatedFacts,
    overrides: &ManualOverrides,
) -> AllergenEntry {
    if let Some(sources) = auto.contains.get(allergen) {
        // Auto wins for display even when the operator redundantly added
        // the same allergen by hand.
        return AllergenEntry {
            allergen: allergen.clone(),
            tier: Tier::Contains,
            provenance: Provenance::Auto,
            sources: sources.clone(),
            note: None,
        };
    }
    if overrides.is_promoted(allergen) {
        // A promotion keeps the auto may-contain attribution; the sources
        // are empty when the operator promoted a purely manual entry.
        return AllergenEntry {
            allergen: allergen.clone(),
            tier: Tier::Contains,
            provenance: Provenance::Promoted,
            sources: auto.sources(allergen, Tier::MayContain).to_vec(),
            note: overrides.note(allergen).map(ToString::to_string),
        };
    }
    AllergenEntry {
        allergen: allergen.clone(),
        tier: Tier::Contains,
        provenance: Provenance::Manual,
        sources: Vec::new(),
        note: overrides.note(allergen).map(ToString::to_string),
    }
}

fn may_contain_entry(
    allergen: &Allergen,
    auto: &AggregatedFacts,
    overrides: &ManualOverrides,
) -> AllergenEntry {
    if let Some(sources) = auto.may_contain.get(allergen) {
        return AllergenEntry {
            allergen: allergen.clone(),
            tier: Tier::MayContain,
            provenance: Provenance::Auto,
            sources: sources.clone(),
            note: None,
        };
    }
    AllergenEntry {
        allergen: allergen.clone(),
        tier: Tier::MayContain,
        provenance: Provenance::Manual,
        sources: Vec::new(),
        note: overrides.note(allergen).map(ToString::to_string),
    }
}
