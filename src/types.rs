//! Shared types used across the gallery components.
//!
//! Item records come straight from the JSON data source and are never
//! mutated. Everything derived from them (index entries, cards) borrows or
//! clones from here.

use serde::{Deserialize, Serialize};

/// Franchise suffix appended to every portrait's alt text.
pub const FRANCHISE: &str = "Honkai Impact 3rd";

/// Static label shown on every card.
pub const CARD_TAG: &str = "Valkyrie";

/// One character record from the data source.
///
/// ```json
/// { "slug": "kiana", "en": "Kiana Kaslana", "zh": "琪亚娜" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Filesystem-safe identifier used to build candidate image paths.
    pub slug: String,
    /// English display name.
    pub en: String,
    /// Chinese display name, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zh: Option<String>,
}

impl Item {
    pub fn new(slug: &str, en: &str, zh: Option<&str>) -> Self {
        Self {
            slug: slug.to_string(),
            en: en.to_string(),
            zh: zh.map(str::to_string),
        }
    }

    /// The secondary-script name, treating an empty string as absent.
    pub fn secondary_name(&self) -> Option<&str> {
        self.zh.as_deref().filter(|zh| !zh.is_empty())
    }
}
