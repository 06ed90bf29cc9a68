//! Recipe records
//!
//! A recipe carries its ingredient lines, a frozen allergen declaration
//! snapshot (written back when the recipe is saved after declaration), and
//! the operator's manual overrides. Sub-recipe facts are consumed from the
//! snapshot, never re-derived from the sub-recipe's own ingredients.

use crate::ids::{IngredientId, RecipeId};
use cheflife_allergen::{Allergen, ManualOverrides};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Discriminated reference target of a recipe line.
///
/// Exactly one foreign id exists per kind by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineKind {
    /// References a master-ingredient catalog record
    Raw {
        /// The referenced catalog record
        master_ingredient_id: IngredientId,
    },
    /// References another recipe used as a prepared item
    Prepared {
        /// The referenced sub-recipe
        recipe_id: RecipeId,
    },
}

/// One line of a recipe's ingredient list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientLine {
    /// Line identity (stable across edits)
    pub id: Uuid,

    /// Display name as entered on the recipe
    pub name: String,

    /// What the line references
    #[serde(flatten)]
    pub kind: LineKind,
}

impl IngredientLine {
    /// New raw-ingredient line
    #[must_use]
    pub fn raw(name: impl Into<String>, master_ingredient_id: IngredientId) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind: LineKind::Raw {
                master_ingredient_id,
            },
        }
    }

    /// New prepared-item line referencing a sub-recipe
    #[must_use]
    pub fn prepared(name: impl Into<String>, recipe_id: RecipeId) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind: LineKind::Prepared { recipe_id },
        }
    }
}

/// Frozen two-tier declaration snapshot stored on a recipe record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllergenInfo {
    /// Declared contains-tier allergens
    #[serde(default)]
    pub contains: Vec<Allergen>,

    /// Declared may-contain-tier allergens
    #[serde(default)]
    pub may_contain: Vec<Allergen>,
}

/// Recipe record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Record identity
    pub id: RecipeId,

    /// Recipe name
    pub name: String,

    /// Ingredient lines in authoring order
    #[serde(default)]
    pub ingredients: Vec<IngredientLine>,

    /// Frozen declaration snapshot, present once the recipe was declared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergen_info: Option<AllergenInfo>,

    /// Operator overrides, persisted with the recipe
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergen_manual_overrides: Option<ManualOverrides>,
}

impl Recipe {
    /// New empty recipe
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: RecipeId::new(),
            name: name.into(),
            ingredients: Vec::new(),
            allergen_info: None,
            allergen_manual_overrides: None,
        }
    }

    /// Append an ingredient line
    #[must_use]
    pub fn with_ingredient(mut self, line: IngredientLine) -> Self {
        self.ingredients.push(line);
        self
    }

    /// Set the frozen declaration snapshot
    #[must_use]
    pub fn with_allergen_info(mut self, info: AllergenInfo) -> Self {
        self.allergen_info = Some(info);
        self
    }

    /// Overrides for editing, created empty on first access
    pub fn manual_overrides_mut(&mut self) -> &mut ManualOverrides {
        self.allergen_manual_overrides
            .get_or_insert_with(ManualOverrides::default)
    }
}

/// In-memory recipe cache keyed by id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeCache {
    entries: HashMap<RecipeId, Recipe>,
}

impl RecipeCache {
    /// Empty cache
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a record
    pub fn insert(&mut self, recipe: Recipe) {
        self.entries.insert(recipe.id, recipe);
    }

    /// Look up a record by id
    #[inline]
    #[must_use]
    pub fn get(&self, id: &RecipeId) -> Option<&Recipe> {
        self.entries.get(id)
    }

    /// Number of cached records
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Recipe> for RecipeCache {
    fn from_iter<I: IntoIterator<Item = Recipe>>(iter: I) -> Self {
        let mut cache = Self::new();
        for recipe in iter {
            cache.insert(recipe);
        }
        cache
    }
}
