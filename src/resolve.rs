//! Image candidate resolution.
//!
//! Every item's portrait may exist under one of several extensions. The
//! resolver turns a slug into an ordered candidate list and walks it with an
//! [`ImageLoader`] until one loads:
//!
//! ```text
//! attempt 0  /assets/hi3/characters/kiana.webp
//! attempt 1  /assets/hi3/characters/kiana.png
//! attempt 2  /assets/hi3/characters/kiana.jpg
//! attempt 3  /assets/hi3/characters/kiana.jpeg
//! attempt 4  /assets/hi3/characters/kiana.avif
//! attempt 5+ /assets/placeholder.png
//! ```
//!
//! Failure never escapes: an exhausted chain lands on the placeholder. Each
//! attempt is a real load through the loader, never an existence check.
//!
//! The same `(slug, attempt) → URL` mapping is reproduced by `static/gallery.js`
//! so the browser can continue a chain from wherever the build left it.

use crate::loader::{ImageLoader, LoadError};
use std::sync::mpsc::Sender;

/// Candidate extensions, in the order they are tried.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["webp", "png", "jpg", "jpeg", "avif"];

/// Image shown when no candidate loads.
pub const DEFAULT_PLACEHOLDER: &str = "/assets/placeholder.png";

/// Maps slugs to candidate image URLs under a base path.
#[derive(Debug, Clone)]
pub struct ImageResolver {
    base: String,
    placeholder: String,
}

impl ImageResolver {
    pub fn new(base: &str, placeholder: &str) -> Self {
        Self {
            base: base.to_string(),
            placeholder: placeholder.to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// URL tried on the given attempt. Attempts past the last extension map
    /// to the placeholder.
    pub fn url_for(&self, slug: &str, attempt: usize) -> String {
        match IMAGE_EXTENSIONS.get(attempt) {
            Some(ext) => format!("{}{}.{}", self.base, slug, ext),
            None => self.placeholder.clone(),
        }
    }

    /// All candidate URLs for a slug, placeholder excluded.
    pub fn candidates(&self, slug: &str) -> Vec<String> {
        (0..IMAGE_EXTENSIONS.len())
            .map(|attempt| self.url_for(slug, attempt))
            .collect()
    }

    /// Walk the candidate list until the loader accepts one.
    pub fn resolve(&self, slug: &str, loader: &dyn ImageLoader) -> ImageChain {
        let mut chain = ImageChain::start(self, slug);
        if loader.is_deferred() {
            return chain;
        }
        while !chain.is_placeholder() {
            match loader.load(chain.assigned()) {
                Ok(()) => {
                    chain.mark_loaded();
                    break;
                }
                Err(err) => chain.fail(self, err),
            }
        }
        chain
    }

    /// Resolve a batch of slugs in parallel, preserving input order.
    ///
    /// When `events` is provided, one [`ResolveEvent`] is sent per slug as soon
    /// as its chain settles.
    pub fn resolve_all(
        &self,
        slugs: &[&str],
        loader: &dyn ImageLoader,
        events: Option<Sender<ResolveEvent>>,
    ) -> Vec<ImageChain> {
        use rayon::prelude::*;

        slugs
            .par_iter()
            .enumerate()
            .map_with(events, |events, (index, slug)| {
                let chain = self.resolve(slug, loader);
                if let Some(tx) = events {
                    let _ = tx.send(ResolveEvent {
                        index,
                        slug: slug.to_string(),
                        chain: chain.clone(),
                    });
                }
                chain
            })
            .collect()
    }
}

impl Default for ImageResolver {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_IMG_BASE, DEFAULT_PLACEHOLDER)
    }
}

/// Where a chain stands after resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainStatus {
    /// A candidate loaded.
    Loaded,
    /// Every candidate failed; the placeholder is shown.
    Placeholder,
    /// Nothing was loaded; the browser walks the chain.
    Unresolved,
}

/// Per-item fallback progress.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageChain {
    slug: String,
    attempt: usize,
    assigned: String,
    loaded: Option<String>,
    failures: Vec<FailedAttempt>,
}

/// A candidate that failed to load, kept for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct FailedAttempt {
    pub url: String,
    pub reason: String,
}

impl ImageChain {
    /// A fresh chain with the first candidate assigned.
    pub fn start(resolver: &ImageResolver, slug: &str) -> Self {
        Self {
            slug: slug.to_string(),
            attempt: 0,
            assigned: resolver.url_for(slug, 0),
            loaded: None,
            failures: Vec::new(),
        }
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Index of the candidate currently assigned.
    pub fn attempt(&self) -> usize {
        self.attempt
    }

    /// URL currently assigned to the image.
    pub fn assigned(&self) -> &str {
        &self.assigned
    }

    /// URL confirmed to load, if resolution ran and succeeded.
    pub fn loaded(&self) -> Option<&str> {
        self.loaded.as_deref()
    }

    /// Source the image is actually showing: the loaded URL when known,
    /// the assigned one otherwise.
    pub fn displayed(&self) -> &str {
        self.loaded.as_deref().unwrap_or(&self.assigned)
    }

    pub fn is_placeholder(&self) -> bool {
        self.attempt >= IMAGE_EXTENSIONS.len()
    }

    pub fn status(&self) -> ChainStatus {
        if self.is_placeholder() {
            ChainStatus::Placeholder
        } else if self.loaded.is_some() {
            ChainStatus::Loaded
        } else {
            ChainStatus::Unresolved
        }
    }

    pub fn failures(&self) -> &[FailedAttempt] {
        &self.failures
    }

    fn mark_loaded(&mut self) {
        self.loaded = Some(self.assigned.clone());
    }

    /// Record a failed load and move on to the next candidate.
    pub fn fail(&mut self, resolver: &ImageResolver, err: LoadError) {
        self.failures.push(FailedAttempt {
            url: self.assigned.clone(),
            reason: err.to_string(),
        });
        self.attempt += 1;
        self.assigned = resolver.url_for(&self.slug, self.attempt);
        if self.is_placeholder() {
            self.loaded = Some(self.assigned.clone());
        }
    }
}

/// Emitted once per slug by [`ImageResolver::resolve_all`].
#[derive(Debug, Clone)]
pub struct ResolveEvent {
    pub index: usize,
    pub slug: String,
    pub chain: ImageChain,
}
