//! Card view-models.
//!
//! A [`Card`] is everything the grid needs to draw one tile: the portrait
//! source (with its fallback progress), alt text, the two-script display
//! name, the fixed tag, and the haystack the browser filters on. Cards carry
//! no markup; [`crate::generate`] turns them into HTML.

use crate::resolve::ImageChain;
use crate::search::IndexEntry;
use crate::types::{CARD_TAG, FRANCHISE, Item};

/// One tile of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// Position of the item in the source list.
    pub position: usize,
    pub item: Item,
    pub haystack: String,
    pub image: ImageChain,
}

/// What a card click asks the lightbox to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightboxRequest {
    pub src: String,
    pub caption: String,
}

impl Card {
    pub fn build(position: usize, entry: &IndexEntry, image: ImageChain) -> Self {
        Self {
            position,
            item: entry.item.clone(),
            haystack: entry.haystack.clone(),
            image,
        }
    }

    pub fn slug(&self) -> &str {
        &self.item.slug
    }

    /// `"Kiana Kaslana / 琪亚娜 | Honkai Impact 3rd"`.
    ///
    /// Without a Chinese name the slot stays empty, leaving two spaces before
    /// the bar.
    pub fn alt_text(&self) -> String {
        let zh = self
            .item
            .secondary_name()
            .map(|zh| format!("/ {zh}"))
            .unwrap_or_default();
        format!("{} {} | {}", self.item.en, zh, FRANCHISE)
    }

    pub fn english_name(&self) -> &str {
        &self.item.en
    }

    /// Chinese name, rendered in full-width parentheses after the English one.
    pub fn secondary_name(&self) -> Option<&str> {
        self.item.secondary_name()
    }

    /// The name as it reads on the tile: `Kiana Kaslana（琪亚娜）`.
    pub fn display_text(&self) -> String {
        match self.secondary_name() {
            Some(zh) => format!("{}（{}）", self.item.en, zh),
            None => self.item.en.clone(),
        }
    }

    pub fn tag(&self) -> &'static str {
        CARD_TAG
    }

    /// Clicking a card shows whatever the tile is currently displaying.
    pub fn click(&self) -> LightboxRequest {
        LightboxRequest {
            src: self.image.displayed().to_string(),
            caption: self.display_text(),
        }
    }
}
