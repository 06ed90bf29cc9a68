//! Organization allergen settings
//!
//! Organizations may extend the builtin vocabulary with up to three custom
//! allergen tags. The settings are validated before activation; once
//! active, the normalized names are opaque keys to the rest of the system.

use crate::ingredient::MAX_CUSTOM_SLOTS;
use cheflife_allergen::Allergen;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One custom allergen declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomAllergenDef {
    /// Tag name as entered; normalized (trimmed, lower-cased) for keying
    pub name: String,

    /// Optional display label overriding the title-cased name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl CustomAllergenDef {
    /// New definition with no label override
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
        }
    }

    /// Normalized key for this definition
    #[must_use]
    pub fn key(&self) -> String {
        self.name.trim().to_lowercase()
    }
}

/// Organization-level allergen configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgAllergenSettings {
    /// Custom allergen declarations, at most [`MAX_CUSTOM_SLOTS`]
    #[serde(default)]
    pub custom: Vec<CustomAllergenDef>,
}

/// Settings validation failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// Custom slot budget exceeded
    #[error("at most {max} custom allergens may be declared, got {count}")]
    TooManyCustom {
        /// Declared count
        count: usize,
        /// Allowed maximum
        max: usize,
    },

    /// A declaration with a blank name
    #[error("custom allergen name cannot be blank")]
    BlankName,

    /// Two declarations normalize to the same key
    #[error("duplicate custom allergen key `{key}`")]
    DuplicateKey {
        /// The colliding normalized key
        key: String,
    },
}

impl OrgAllergenSettings {
    /// Validate the custom declarations.
    ///
    /// # Errors
    /// [`SettingsError`] on more than [`MAX_CUSTOM_SLOTS`] declarations, a
    /// blank name, or two names normalizing to the same key.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.custom.len() > MAX_CUSTOM_SLOTS {
            return Err(SettingsError::TooManyCustom {
                count: self.custom.len(),
                max: MAX_CUSTOM_SLOTS,
            });
        }
        let mut seen = HashSet::new();
        for def in &self.custom {
            let key = def.key();
            if key.is_empty() {
                return Err(SettingsError::BlankName);
            }
            if !seen.insert(key.clone()) {
                return Err(SettingsError::DuplicateKey { key });
            }
        }
        Ok(())
    }

    /// Normalized keys of the declared custom allergens
    #[must_use]
    pub fn active_keys(&self) -> Vec<String> {
        self.custom.iter().map(CustomAllergenDef::key).collect()
    }

    /// The declared custom allergens as vocabulary entries
    #[must_use]
    pub fn allergens(&self) -> Vec<Allergen> {
        self.custom
            .iter()
            .filter_map(|def| Allergen::from_key(&def.name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_settings_validate() {
        assert!(OrgAllergenSettings::default().validate().is_ok());
    }

    #[test]
    fn three_distinct_customs_validate() {
        let settings = OrgAllergenSettings {
            custom: vec![
                CustomAllergenDef::new("kiwi"),
                CustomAllergenDef::new("mango"),
                CustomAllergenDef::new("black garlic"),
            ],
        };
        assert!(settings.validate().is_ok());
        assert_eq!(settings.active_keys(), vec!["kiwi", "mango", "black garlic"]);
    }

    #[test]
    fn four_customs_exceed_the_budget() {
        let settings = OrgAllergenSettings {
            custom: vec![
                CustomAllergenDef::new("a"),
                CustomAllergenDef::new("b"),
                CustomAllergenDef::new("c"),
                CustomAllergenDef::new("d"),
            ],
        };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::TooManyCustom { count: 4, max: 3 })
        );
    }

    #[test]
    fn blank_name_is_rejected() {
        let settings = OrgAllergenSettings {
            custom: vec![CustomAllergenDef::new("   ")],
        };
        assert_eq!(settings.validate(), Err(SettingsError::BlankName));
    }

    #[test]
    fn duplicate_keys_after_normalization_are_rejected() {
        let settings = OrgAllergenSettings {
            custom: vec![
                CustomAllergenDef::new("Kiwi"),
                CustomAllergenDef::new(" kiwi "),
            ],
        };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::DuplicateKey {
                key: "kiwi".to_string()
            })
        );
    }

    #[test]
    fn allergens_map_to_vocabulary_entries() {
        let settings = OrgAllergenSettings {
            custom: vec![
                CustomAllergenDef::new("Kiwi"),
                // A custom spelling a builtin collapses to the builtin.
                CustomAllergenDef::new("Sesame"),
            ],
        };
        assert_eq!(
            settings.allergens(),
            vec![Allergen::Custom("kiwi".to_string()), Allergen::Sesame]
        );
    }
}
