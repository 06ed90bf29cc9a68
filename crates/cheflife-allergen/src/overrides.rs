//! Manual overrides
//!
//! The operator-owned, recipe-scoped override structure. This is the only
//! persisted, mutable entity in the cascade: it round-trips to the owning
//! recipe record, while the declaration itself is always recomputed.
//!
//! Removal safety lock: auto-detected facts can never be removed, only
//! promoted. [`ManualOverrides::remove_manual`] therefore takes the current
//! [`AggregatedFacts`] and refuses to touch allergens they cover.

use crate::allergen::Allergen;
use crate::facts::AggregatedFacts;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Operator-supplied overrides layered on top of auto-detected facts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualOverrides {
    /// Allergens manually declared at contains tier
    #[serde(default)]
    pub manual_contains: Vec<Allergen>,

    /// Allergens manually declared at may-contain tier
    #[serde(default)]
    pub manual_may_contain: Vec<Allergen>,

    /// Auto-detected may-contain allergens elevated to contains tier
    #[serde(default)]
    pub promoted_to_contains: Vec<Allergen>,

    /// Free-text cross-contact annotations for the whole recipe
    #[serde(default)]
    pub cross_contact_notes: Vec<String>,

    /// Per-allergen operator notes
    #[serde(default)]
    pub notes: BTreeMap<Allergen, String>,
}

/// Rejected override operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OverrideError {
    /// Ingredient-sourced facts are locked against removal
    #[error("allergen `{0}` is auto-detected from ingredients and cannot be removed")]
    AutoFactLocked(Allergen),

    /// Cross-contact note index out of range
    #[error("cross-contact note index {index} out of bounds (len {len})")]
    NoteIndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Current note count
        len: usize,
    },
}

impl ManualOverrides {
    /// Empty overrides (the created state of a fresh recipe)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an allergen at contains tier.
    ///
    /// Idempotent. Also drops the allergen from the manual may-contain list;
    /// an allergen is never manually declared at both tiers.
    pub fn add_manual_contains(&mut self, allergen: Allergen) {
        self.manual_may_contain.retain(|a| a != &allergen);
        if !self.manual_contains.contains(&allergen) {
            self.manual_contains.push(allergen);
        }
    }

    /// Declare an allergen at may-contain tier, with an optional note.
    ///
    /// Idempotent. A no-op when the allergen is already manually declared
    /// at contains tier (manual may-contain never downgrades a contains).
    pub fn add_manual_may_contain(&mut self, allergen: Allergen, note: Option<String>) {
        if self.manual_contains.contains(&allergen) {
            return;
        }
        if !self.manual_may_contain.contains(&allergen) {
            self.manual_may_contain.push(allergen.clone());
        }
        if let Some(note) = note {
            self.notes.insert(allergen, note);
        }
    }

    /// Remove a manually-added allergen, along with its note.
    ///
    /// # Errors
    /// [`OverrideError::AutoFactLocked`] when the allergen is auto-detected
    /// in `auto` at either tier. Ingredient-sourced facts must not silently
    /// disappear from a declaration; their tier can only be elevated via
    /// [`promote`](Self::promote). Removing a never-added allergen is a
    /// no-op.
    pub fn remove_manual(
        &mut self,
        allergen: &Allergen,
        auto: &AggregatedFacts,
    ) -> Result<(), OverrideError> {
        if auto.is_auto_detected(allergen) {
            return Err(OverrideError::AutoFactLocked(allergen.clone()));
        }
        self.manual_contains.retain(|a| a != allergen);
        self.manual_may_contain.retain(|a| a != allergen);
        self.notes.remove(allergen);
        Ok(())
    }

    /// Elevate an auto-detected may-contain allergen to contains tier.
    /// Idempotent.
    pub fn promote(&mut self, allergen: Allergen) {
        if !self.promoted_to_contains.contains(&allergen) {
            self.promoted_to_contains.push(allergen);
        }
    }

    /// Undo a promotion. Idempotent; unpromoting a non-promoted allergen is
    /// a no-op.
    pub fn unpromote(&mut self, allergen: &Allergen) {
        self.promoted_to_contains.retain(|a| a != allergen);
    }

    /// Whether the allergen is currently promoted
    #[inline]
    #[must_use]
    pub fn is_promoted(&self, allergen: &Allergen) -> bool {
        self.promoted_to_contains.contains(allergen)
    }

    /// Whether the allergen is manually declared at either tier
    #[must_use]
    pub fn is_manual(&self, allergen: &Allergen) -> bool {
        self.manual_contains.contains(allergen) || self.manual_may_contain.contains(allergen)
    }

    /// Operator note for the allergen, if any
    #[inline]
    #[must_use]
    pub fn note(&self, allergen: &Allergen) -> Option<&str> {
        self.notes.get(allergen).map(String::as_str)
    }

    /// Set or replace the note for an allergen
    pub fn set_note(&mut self, allergen: Allergen, note: impl Into<String>) {
        self.notes.insert(allergen, note.into());
    }

    /// Clear the note for an allergen
    pub fn clear_note(&mut self, allergen: &Allergen) {
        self.notes.remove(allergen);
    }

    /// Append a recipe-level cross-contact note
    pub fn add_cross_contact_note(&mut self, note: impl Into<String>) {
        self.cross_contact_notes.push(note.into());
    }

    /// Remove a cross-contact note by index, returning it.
    ///
    /// # Errors
    /// [`OverrideError::NoteIndexOutOfBounds`] when `index` is out of range.
    pub fn remove_cross_contact_note(&mut self, index: usize) -> Result<String, OverrideError> {
        if index >= self.cross_contact_notes.len() {
            return Err(OverrideError::NoteIndexOutOfBounds {
                index,
                len: self.cross_contact_notes.len(),
            });
        }
        Ok(self.cross_contact_notes.remove(index))
    }

    /// Whether the live overrides differ from a persisted baseline.
    ///
    /// Plain structural comparison; drives the "pending declaration"
    /// indicator and the confirm-and-save gate in the host editor.
    #[inline]
    #[must_use]
    pub fn is_dirty(&self, baseline: &Self) -> bool {
        self != baseline
    }

    /// True when no override of any kind is present
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.manual_contains.is_empty()
            && self.manual_may_contain.is_empty()
            && self.promoted_to_contains.is_empty()
            && self.cross_contact_notes.is_empty()
            && self.notes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allergen::Tier;
    use crate::facts::{AllergenFact, AllergenSource, SourceKind};
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn auto_with(allergen: Allergen, tier: Tier) -> AggregatedFacts {
        let mut agg = AggregatedFacts::new();
        let source = AllergenSource {
            line_id: Uuid::new_v4(),
            name: "Fixture".to_string(),
            kind: SourceKind::Raw,
            tier,
        };
        agg.record(AllergenFact { allergen, tier }, source);
        agg
    }

    #[test]
    fn add_manual_contains_is_idempotent() {
        let mut ov = ManualOverrides::new();
        ov.add_manual_contains(Allergen::Mustard);
        ov.add_manual_contains(Allergen::Mustard);
        assert_eq!(ov.manual_contains, vec![Allergen::Mustard]);
    }

    #[test]
    fn manual_contains_evicts_manual_may_contain() {
        let mut ov = ManualOverrides::new();
        ov.add_manual_may_contain(Allergen::Mustard, None);
        ov.add_manual_contains(Allergen::Mustard);

        assert_eq!(ov.manual_contains, vec![Allergen::Mustard]);
        assert!(ov.manual_may_contain.is_empty());
    }

    #[test]
    fn manual_may_contain_does_not_downgrade_contains() {
        let mut ov = ManualOverrides::new();
        ov.add_manual_contains(Allergen::Egg);
        ov.add_manual_may_contain(Allergen::Egg, Some("ignored".to_string()));

        assert!(ov.manual_may_contain.is_empty());
        assert!(ov.note(&Allergen::Egg).is_none());
    }

    #[test]
    fn may_contain_note_is_stored() {
        let mut ov = ManualOverrides::new();
        ov.add_manual_may_contain(Allergen::Mustard, Some("shared fryer".to_string()));
        assert_eq!(ov.note(&Allergen::Mustard), Some("shared fryer"));
    }

    #[test]
    fn remove_manual_clears_entry_and_note() {
        let mut ov = ManualOverrides::new();
        ov.add_manual_may_contain(Allergen::Mustard, Some("shared fryer".to_string()));

        ov.remove_manual(&Allergen::Mustard, &AggregatedFacts::new())
            .unwrap();

        assert!(ov.is_empty());
    }

    #[test]
    fn remove_manual_refuses_auto_detected() {
        let auto = auto_with(Allergen::Peanut, Tier::Contains);
        let mut ov = ManualOverrides::new();

        let err = ov.remove_manual(&Allergen::Peanut, &auto).unwrap_err();
        assert_eq!(err, OverrideError::AutoFactLocked(Allergen::Peanut));
    }

    #[test]
    fn remove_manual_refuses_auto_may_contain_too() {
        let auto = auto_with(Allergen::Soy, Tier::MayContain);
        let mut ov = ManualOverrides::new();
        ov.add_manual_may_contain(Allergen::Soy, None);

        assert!(ov.remove_manual(&Allergen::Soy, &auto).is_err());
        assert!(ov.is_manual(&Allergen::Soy));
    }

    #[test]
    fn remove_never_added_is_noop() {
        let mut ov = ManualOverrides::new();
        ov.remove_manual(&Allergen::Celery, &AggregatedFacts::new())
            .unwrap();
        assert!(ov.is_empty());
    }

    #[test]
    fn promote_and_unpromote_are_idempotent() {
        let mut ov = ManualOverrides::new();
        ov.promote(Allergen::Soy);
        ov.promote(Allergen::Soy);
        assert_eq!(ov.promoted_to_contains, vec![Allergen::Soy]);

        ov.unpromote(&Allergen::Soy);
        ov.unpromote(&Allergen::Soy);
        assert!(ov.promoted_to_contains.is_empty());

        // Unpromoting a never-promoted allergen is a no-op.
        ov.unpromote(&Allergen::Milk);
        assert!(ov.is_empty());
    }

    #[test]
    fn cross_contact_note_lifecycle() {
        let mut ov = ManualOverrides::new();
        ov.add_cross_contact_note("shared fryer");
        ov.add_cross_contact_note("open flour station");

        let removed = ov.remove_cross_contact_note(0).unwrap();
        assert_eq!(removed, "shared fryer");
        assert_eq!(ov.cross_contact_notes, vec!["open flour station"]);

        let err = ov.remove_cross_contact_note(5).unwrap_err();
        assert_eq!(err, OverrideError::NoteIndexOutOfBounds { index: 5, len: 1 });
    }

    #[test]
    fn dirty_is_structural_inequality() {
        let baseline = ManualOverrides::new();
        let mut live = baseline.clone();
        assert!(!live.is_dirty(&baseline));

        live.promote(Allergen::Soy);
        assert!(live.is_dirty(&baseline));

        live.unpromote(&Allergen::Soy);
        assert!(!live.is_dirty(&baseline));
    }

    #[test]
    fn serde_round_trip() {
        let mut ov = ManualOverrides::new();
        ov.add_manual_contains(Allergen::Custom("kiwi".to_string()));
        ov.add_manual_may_contain(Allergen::Mustard, Some("shared fryer".to_string()));
        ov.promote(Allergen::Soy);
        ov.add_cross_contact_note("open kitchen");

        let json = serde_json::to_string(&ov).unwrap();
        let back: ManualOverrides = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ov);
    }

    #[test]
    fn serde_tolerates_missing_fields() {
        let back: ManualOverrides = serde_json::from_str("{}").unwrap();
        assert!(back.is_empty());
    }
}
