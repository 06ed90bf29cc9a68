//! ChefLife Allergen Core
//!
//! Vocabulary and resolution rules for recipe allergen declarations.
//!
//! # Core Concepts
//!
//! - [`Allergen`]: closed builtin vocabulary plus per-organization custom tags
//! - [`Tier`]: `contains` (definite) vs `may_contain` (cross-contact risk)
//! - [`AggregatedFacts`]: auto-detected facts folded across a recipe's
//!   ingredients, with per-line source attribution
//! - [`ManualOverrides`]: the operator-owned, persisted override structure
//! - [`AllergenDeclaration`]: the final two-tier projection with provenance
//!
//! # Example
//!
//! ```
//! use cheflife_allergen::{AggregatedFacts, Allergen, ManualOverrides, project};
//!
//! let auto = AggregatedFacts::new();
//! let mut overrides = ManualOverrides::default();
//! overrides.add_manual_may_contain(Allergen::Mustard, Some("shared fryer".into()));
//!
//! let declaration = project(&auto, &overrides);
//! assert_eq!(declaration.may_contain, vec![Allergen::Mustard]);
//! ```

#![warn(unreachable_pub)]

mod allergen;
mod facts;
mod overrides;
mod projection;
mod resolve;

pub mod registry;

pub use allergen::{Allergen, Provenance, Tier};
pub use facts::{AggregatedFacts, AllergenFact, AllergenSource, SourceKind};
pub use overrides::{ManualOverrides, OverrideError};
pub use projection::{project, AllergenDeclaration, AllergenEntry};
pub use registry::{registry, AllergenMeta};
pub use resolve::{resolve, ResolvedSets};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
