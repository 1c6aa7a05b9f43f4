//! # Valkyrie Gallery
//!
//! A searchable portrait gallery built from a JSON list of characters. Each
//! card tries its portrait under several extensions before settling on a
//! placeholder, and clicking a card opens a full-size lightbox.
//!
//! # Architecture
//!
//! The gallery logic is plain data and pure functions; markup is produced
//! only at the very end:
//!
//! ```text
//! source ─▶ search index ─▶ image chains ─▶ render tree (Vec<Card>) ─▶ HTML
//!                 ▲                              │
//!               query                       click ─▶ lightbox
//! ```
//!
//! The browser half (`static/gallery.js`) mirrors the same rules, so the
//! generated page keeps filtering, falling back and zooming on its own.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | The item record shared by every component |
//! | [`resolve`] | `(slug, attempt) → URL` mapping and the fallback retry loop |
//! | [`loader`] | Load attempts: local assets, HTTP, or deferred to the browser |
//! | [`search`] | Normalization, haystacks, substring filtering |
//! | [`card`] | Card view-models: alt text, display name, click request |
//! | [`lightbox`] | The modal viewer's state machine |
//! | [`source`] | The single data fetch; failures degrade to an empty list |
//! | [`gallery`] | The controller owning index, grid and lightbox |
//! | [`generate`] | Maud rendering of the page |
//! | [`check`] | Asset audit: unresolved portraits, unused images |
//! | [`config`] | `gallery.toml` loading, layering and CSS variables |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Explicit Fallback Chain
//!
//! Each portrait's fallback is an explicit loop over a pure
//! `(slug, attempt) → URL` function rather than a chain of error callbacks.
//! The loop is testable with a fake loader, and the attempt index is the only
//! state the browser needs to pick up where the build stopped.
//!
//! ## Owned Lightbox
//!
//! The lightbox is a value owned by the [`gallery::Gallery`], created
//! explicitly, not a page-global that springs into existence on first
//! click.
//!
//! ## Escaped Names
//!
//! Names are interpolated through maud and always escaped, so a data file
//! from an untrusted source cannot inject markup through the Chinese name.

pub mod card;
pub mod check;
pub mod config;
pub mod gallery;
pub mod generate;
pub mod lightbox;
pub mod loader;
pub mod output;
pub mod resolve;
pub mod search;
pub mod source;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
