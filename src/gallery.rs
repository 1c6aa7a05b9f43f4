//! The gallery controller.
//!
//! Owns everything that lives for one page load: the search index, each
//! item's resolved image chain, the current render tree and the lightbox.
//!
//! ```text
//! fetch ─▶ index ─▶ resolve images ─▶ render all
//!                                        │
//!          search(query) ─▶ filter ─▶ render matches
//!          click_card(n) ─▶ lightbox.open(card.src, card.caption)
//!          key / click_lightbox ─▶ lightbox dismissal
//! ```
//!
//! The render tree is a plain `Vec<Card>`; the controller never produces
//! markup.

use crate::card::Card;
use crate::lightbox::{ClickTarget, Lightbox};
use crate::loader::ImageLoader;
use crate::resolve::{ImageChain, ImageResolver, ResolveEvent};
use crate::search::SearchIndex;
use crate::source::{DataSource, FetchReport, fetch_items};
use crate::types::Item;
use std::sync::mpsc::Sender;

pub struct Gallery {
    resolver: ImageResolver,
    index: SearchIndex,
    images: Vec<ImageChain>,
    grid: Vec<Card>,
    query: String,
    lightbox: Lightbox,
}

impl Gallery {
    /// Fetch the item list once and build the initial grid.
    ///
    /// The fetch outcome is returned alongside the gallery; a failed fetch
    /// still yields a working, empty gallery.
    pub fn load(
        source: &DataSource,
        resolver: ImageResolver,
        loader: &dyn ImageLoader,
        events: Option<Sender<ResolveEvent>>,
    ) -> (Self, FetchReport) {
        let report = fetch_items(source);
        let gallery = Self::from_items(report.items.clone(), resolver, loader, events);
        (gallery, report)
    }

    /// Build a gallery from an already-fetched item list.
    pub fn from_items(
        items: Vec<Item>,
        resolver: ImageResolver,
        loader: &dyn ImageLoader,
        events: Option<Sender<ResolveEvent>>,
    ) -> Self {
        let index = SearchIndex::build(items);
        let slugs: Vec<&str> = index
            .entries()
            .iter()
            .map(|e| e.item.slug.as_str())
            .collect();
        let images = resolver.resolve_all(&slugs, loader, events);

        let mut gallery = Self {
            resolver,
            index,
            images,
            grid: Vec::new(),
            query: String::new(),
            lightbox: Lightbox::new(),
        };
        let all: Vec<usize> = (0..gallery.index.len()).collect();
        gallery.render(&all);
        gallery
    }

    /// Replace the grid with fresh cards for the given positions.
    fn render(&mut self, positions: &[usize]) {
        self.grid = positions
            .iter()
            .map(|&pos| Card::build(pos, &self.index.entries()[pos], self.images[pos].clone()))
            .collect();
    }

    /// Filter the grid by `query`, keeping the original relative order.
    pub fn search(&mut self, query: &str) -> &[Card] {
        self.query = query.to_string();
        let matches = self.index.filter(query);
        self.render(&matches);
        &self.grid
    }

    /// Cards currently in the grid.
    pub fn grid(&self) -> &[Card] {
        &self.grid
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    pub fn resolver(&self) -> &ImageResolver {
        &self.resolver
    }

    /// Image chain for every item, in source order.
    pub fn images(&self) -> &[ImageChain] {
        &self.images
    }

    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    /// Create the lightbox ahead of the first click.
    pub fn prepare_lightbox(&mut self) {
        self.lightbox.ensure();
    }

    /// Click the card at `grid_position`. Returns false if there is no such card.
    pub fn click_card(&mut self, grid_position: usize) -> bool {
        let Some(card) = self.grid.get(grid_position) else {
            return false;
        };
        let request = card.click();
        self.lightbox.show(&request);
        true
    }

    /// Click the first card in the grid whose slug matches.
    pub fn click_slug(&mut self, slug: &str) -> bool {
        match self.grid.iter().position(|c| c.slug() == slug) {
            Some(pos) => self.click_card(pos),
            None => false,
        }
    }

    /// A key press on the page. Returns true if it closed the lightbox.
    pub fn key(&mut self, key: &str) -> bool {
        self.lightbox.key(key)
    }

    /// A click inside the lightbox. Returns true if it closed the lightbox.
    pub fn click_lightbox(&mut self, target: ClickTarget) -> bool {
        self.lightbox.click(target)
    }
}
