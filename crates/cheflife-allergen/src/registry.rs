//! Allergen metadata registry
//!
//! Static, read-only display metadata (label, icon, color) for the builtin
//! vocabulary, initialized once at first use. Custom allergens have no
//! registry entry; their display label falls back to the raw key.

use crate::allergen::Allergen;
use indexmap::IndexMap;
use once_cell::sync::Lazy;

/// Display metadata for one builtin allergen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllergenMeta {
    /// Human-readable label
    pub label: &'static str,
    /// Emoji icon for list rendering
    pub icon: &'static str,
    /// Badge color (hex)
    pub color: &'static str,
}

static REGISTRY: Lazy<IndexMap<Allergen, AllergenMeta>> = Lazy::new(|| {
    let mut table = IndexMap::with_capacity(Allergen::BUILTIN.len());
    let entries = [
        (Allergen::Peanut, "Peanut", "\u{1f95c}", "#C05621"),
        (Allergen::TreeNut, "Tree Nut", "\u{1f330}", "#8B4513"),
        (Allergen::Milk, "Milk", "\u{1f95b}", "#4299E1"),
        (Allergen::Egg, "Egg", "\u{1f95a}", "#D69E2E"),
        (Allergen::Fish, "Fish", "\u{1f41f}", "#3182CE"),
        (Allergen::Shellfish, "Shellfish", "\u{1f990}", "#E53E3E"),
        (Allergen::Mollusc, "Mollusc", "\u{1f9aa}", "#805AD5"),
        (Allergen::Soy, "Soy", "\u{1fad8}", "#38A169"),
        (Allergen::Wheat, "Wheat", "\u{1f33e}", "#B7791F"),
        (Allergen::Gluten, "Gluten", "\u{1f35e}", "#975A16"),
        (Allergen::Sesame, "Sesame", "\u{1f96f}", "#744210"),
        (Allergen::Mustard, "Mustard", "\u{1f336}", "#D69E2E"),
        (Allergen::Celery, "Celery", "\u{1f96c}", "#48BB78"),
        (Allergen::Sulphite, "Sulphite", "\u{1f377}", "#718096"),
        (Allergen::Lupin, "Lupin", "\u{1f33c}", "#667EEA"),
    ];
    for (allergen, label, icon, color) in entries {
        table.insert(allergen, AllergenMeta { label, icon, color });
    }
    table
});

/// The full builtin metadata table, in canonical display order
#[must_use]
pub fn registry() -> &'static IndexMap<Allergen, AllergenMeta> {
    &REGISTRY
}

impl Allergen {
    /// Registry metadata for this allergen (`None` for custom tags)
    #[inline]
    #[must_use]
    pub fn meta(&self) -> Option<&'static AllergenMeta> {
        REGISTRY.get(self)
    }

    /// Human-readable label.
    ///
    /// Builtins use their registry label; custom tags title-case their key.
    #[must_use]
    pub fn display_label(&self) -> String {
        match self.meta() {
            Some(meta) => meta.label.to_string(),
            None => title_case(self.key()),
        }
    }
}

fn title_case(key: &str) -> String {
    key.split(['_', ' ', '-'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_covers_all_builtins() {
        for allergen in &Allergen::BUILTIN {
            assert!(
                registry().contains_key(allergen),
                "missing registry entry for {allergen}"
            );
        }
        assert_eq!(registry().len(), Allergen::BUILTIN.len());
    }

    #[test]
    fn registry_preserves_canonical_order() {
        let keys: Vec<_> = registry().keys().cloned().collect();
        assert_eq!(keys, Allergen::BUILTIN.to_vec());
    }

    #[test]
    fn builtin_meta_and_label() {
        let meta = Allergen::TreeNut.meta().unwrap();
        assert_eq!(meta.label, "Tree Nut");
        assert_eq!(Allergen::TreeNut.display_label(), "Tree Nut");
    }

    #[test]
    fn custom_has_no_meta_and_title_cased_label() {
        let custom = Allergen::Custom("black_garlic".to_string());
        assert!(custom.meta().is_none());
        assert_eq!(custom.display_label(), "Black Garlic");
    }
}
