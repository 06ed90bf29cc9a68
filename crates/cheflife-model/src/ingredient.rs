//! Master-ingredient records
//!
//! A master ingredient is a raw-ingredient catalog row holding per-allergen
//! flag columns under the `allergen_<key>` / `allergen_<key>_may_contain`
//! convention, plus up to three custom allergen slots
//! (`allergen_custom<N>_active` / `_name` / `_may_contain`, N in 1..=3).
//! The flag columns are kept as a flattened raw map because imported rows
//! carry inconsistent scalar types; [`Flag`] interprets them on read.

use crate::flag::Flag;
use crate::ids::IngredientId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Maximum custom allergen slots per ingredient (and per organization)
pub const MAX_CUSTOM_SLOTS: usize = 3;

/// Raw-ingredient catalog record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasterIngredient {
    /// Record identity
    pub id: IngredientId,

    /// Catalog product name, preferred for display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,

    /// Generic name, second choice for display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,

    /// Flat allergen columns as imported, untyped
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

/// One active custom allergen slot, resolved from its three columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomSlot {
    /// Normalized (trimmed, lower-cased) slot name, used as the allergen key
    pub key: String,
    /// Whether the slot declares may-contain rather than contains
    pub may_contain: bool,
}

impl MasterIngredient {
    /// New record with no names and no allergen columns
    #[must_use]
    pub fn new(id: IngredientId) -> Self {
        Self {
            id,
            product_name: None,
            common_name: None,
            fields: BTreeMap::new(),
        }
    }

    /// Set the product name
    #[must_use]
    pub fn with_product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self
    }

    /// Set the common name
    #[must_use]
    pub fn with_common_name(mut self, name: impl Into<String>) -> Self {
        self.common_name = Some(name.into());
        self
    }

    /// Set a raw column value
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    fn flag(&self, key: &str) -> Flag {
        Flag::from_opt(self.fields.get(key))
    }

    /// Truthiness of the `allergen_<key>` contains column
    #[must_use]
    pub fn contains_flag(&self, key: &str) -> bool {
        self.flag(&format!("allergen_{key}")).is_set()
    }

    /// Truthiness of the `allergen_<key>_may_contain` column
    #[must_use]
    pub fn may_contain_flag(&self, key: &str) -> bool {
        self.flag(&format!("allergen_{key}_may_contain")).is_set()
    }

    /// Resolve custom slot `slot` (0-based), if active and named.
    ///
    /// A slot counts only when its active column is truthy and its name is
    /// non-blank; the slot key is the normalized name.
    #[must_use]
    pub fn custom_slot(&self, slot: usize) -> Option<CustomSlot> {
        if slot >= MAX_CUSTOM_SLOTS {
            return None;
        }
        let n = slot + 1;
        if !self.flag(&format!("allergen_custom{n}_active")).is_set() {
            return None;
        }
        let name = self
            .fields
            .get(&format!("allergen_custom{n}_name"))?
            .as_str()?
            .trim()
            .to_lowercase();
        if name.is_empty() {
            return None;
        }
        Some(CustomSlot {
            key: name,
            may_contain: self.flag(&format!("allergen_custom{n}_may_contain")).is_set(),
        })
    }

    /// Iterate over the active custom slots
    pub fn custom_slots(&self) -> impl Iterator<Item = CustomSlot> + '_ {
        (0..MAX_CUSTOM_SLOTS).filter_map(|slot| self.custom_slot(slot))
    }

    /// Display name: product name, else common name, else `fallback`, else
    /// `"Unknown"`. Blank strings do not count.
    #[must_use]
    pub fn display_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        non_blank(self.product_name.as_deref())
            .or_else(|| non_blank(self.common_name.as_deref()))
            .or_else(|| non_blank(Some(fallback)))
            .unwrap_or("Unknown")
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// In-memory master-ingredient cache keyed by id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngredientCatalog {
    entries: HashMap<IngredientId, MasterIngredient>,
}

impl IngredientCatalog {
    /// Empty catalog
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a record
    pub fn insert(&mut self, ingredient: MasterIngredient) {
        self.entries.insert(ingredient.id, ingredient);
    }

    /// Look up a record by id
    #[inline]
    #[must_use]
    pub fn get(&self, id: &IngredientId) -> Option<&MasterIngredient> {
        self.entries.get(id)
    }

    /// Number of cached records
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<MasterIngredient> for IngredientCatalog {
    fn from_iter<I: IntoIterator<Item = MasterIngredient>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for ingredient in iter {
            catalog.insert(ingredient);
        }
        catalog
    }
}
