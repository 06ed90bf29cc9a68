//! Allergen vocabulary
//!
//! Defines the closed builtin allergen set plus per-organization custom
//! tags, and the [`Tier`] / [`Provenance`] classifications carried through
//! the cascade. Both classifications are deliberately closed enums so that
//! exhaustive matches catch missing cases when a new kind is added.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display, Formatter};

/// A named food-allergen category.
///
/// The builtin vocabulary is fixed. Organizations may additionally declare
/// up to three [`Allergen::Custom`] tags, which are treated as opaque keys
/// once active. Custom keys are normalized (trimmed, lower-cased) at
/// construction so two spellings of the same tag compare equal; a custom
/// key that spells a builtin key collapses to the builtin variant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Allergen {
    /// Peanuts and peanut derivatives
    Peanut,
    /// Tree nuts (almond, cashew, walnut, ...)
    TreeNut,
    /// Milk and dairy
    Milk,
    /// Eggs
    Egg,
    /// Fish
    Fish,
    /// Crustacean shellfish
    Shellfish,
    /// Molluscs
    Mollusc,
    /// Soybeans
    Soy,
    /// Wheat
    Wheat,
    /// Cereals containing gluten
    Gluten,
    /// Sesame seeds
    Sesame,
    /// Mustard
    Mustard,
    /// Celery
    Celery,
    /// Sulphur dioxide and sulphites
    Sulphite,
    /// Lupin
    Lupin,
    /// Organization-defined tag, keyed by normalized name
    Custom(String),
}

impl Allergen {
    /// Builtin vocabulary in canonical display order
    pub const BUILTIN: [Self; 15] = [
        Self::Peanut,
        Self::TreeNut,
        Self::Milk,
        Self::Egg,
        Self::Fish,
        Self::Shellfish,
        Self::Mollusc,
        Self::Soy,
        Self::Wheat,
        Self::Gluten,
        Self::Sesame,
        Self::Mustard,
        Self::Celery,
        Self::Sulphite,
        Self::Lupin,
    ];

    /// Stable snake_case key, used for serialization and for the
    /// `allergen_<key>` field convention on master-ingredient records.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Peanut => "peanut",
            Self::TreeNut => "tree_nut",
            Self::Milk => "milk",
            Self::Egg => "egg",
            Self::Fish => "fish",
            Self::Shellfish => "shellfish",
            Self::Mollusc => "mollusc",
            Self::Soy => "soy",
            Self::Wheat => "wheat",
            Self::Gluten => "gluten",
            Self::Sesame => "sesame",
            Self::Mustard => "mustard",
            Self::Celery => "celery",
            Self::Sulphite => "sulphite",
            Self::Lupin => "lupin",
            Self::Custom(name) => name,
        }
    }

    /// Parse a key into an allergen.
    ///
    /// Unknown keys become [`Allergen::Custom`] with the normalized input.
    /// Returns `None` when the key is blank.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        let normalized = key.trim().to_lowercase();
        if normalized.is_empty() {
            return None;
        }
        Some(match normalized.as_str() {
            "peanut" => Self::Peanut,
            "tree_nut" | "treenut" => Self::TreeNut,
            "milk" => Self::Milk,
            "egg" => Self::Egg,
            "fish" => Self::Fish,
            "shellfish" => Self::Shellfish,
            "mollusc" => Self::Mollusc,
            "soy" => Self::Soy,
            "wheat" => Self::Wheat,
            "gluten" => Self::Gluten,
            "sesame" => Self::Sesame,
            "mustard" => Self::Mustard,
            "celery" => Self::Celery,
            "sulphite" => Self::Sulphite,
            "lupin" => Self::Lupin,
            _ => Self::Custom(normalized),
        })
    }

    /// Whether this is an organization-defined custom tag
    #[inline]
    #[must_use]
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl Display for Allergen {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Serialize for Allergen {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for Allergen {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        Self::from_key(&key).ok_or_else(|| D::Error::custom("allergen key cannot be blank"))
    }
}

/// Severity/certainty level of an allergen's presence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Definitely present
    Contains,
    /// Possible presence / cross-contact risk
    MayContain,
}

impl Display for Tier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contains => f.write_str("contains"),
            Self::MayContain => f.write_str("may_contain"),
        }
    }
}

/// Where a declaration entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Auto-detected from ingredient facts
    Auto,
    /// Manually added by the operator
    Manual,
    /// Auto-detected may-contain, elevated to contains by the operator
    Promoted,
}

impl Display for Provenance {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Manual => f.write_str("manual"),
            Self::Promoted => f.write_str("promoted"),
        }
    }
}
