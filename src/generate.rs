//! HTML page generation.
//!
//! Renders the gallery's render tree as a single static page:
//!
//! ```text
//! dist/
//! ├── index.html    # search box, pre-rendered grid, lightbox dialog
//! └── gallery.js    # live search, image fallback, lightbox wiring
//! ```
//!
//! The page honours the host contract of the widget: the grid container is
//! `#grid` and the search box is `#search`. The script tag carries
//! `data-img-base` and `data-placeholder`, read once when the script runs, so
//! the browser can continue each card's fallback chain from `data-attempt`.
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: base styles (colors and grid sizing injected from config)
//! - `static/gallery.js`: the browser half of the gallery
//!
//! Uses [maud](https://maud.lambda.xyz/) for templating; every interpolated
//! name is escaped.

use crate::card::Card;
use crate::config::{self, GalleryConfig};
use crate::gallery::Gallery;
use crate::lightbox::Lightbox;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/gallery.js");

/// Script file written next to `index.html`.
pub const SCRIPT_FILE: &str = "gallery.js";

/// What was written, for CLI output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub pages: Vec<String>,
    pub cards: usize,
}

/// Write `index.html` and `gallery.js` into `output_dir`.
pub fn generate(
    gallery: &mut Gallery,
    config: &GalleryConfig,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    fs::create_dir_all(output_dir)?;

    gallery.prepare_lightbox();
    let css = page_css(config);
    let page = render_page(gallery, config, &css);
    fs::write(output_dir.join("index.html"), page.into_string())?;
    fs::write(output_dir.join(SCRIPT_FILE), JS)?;

    Ok(GenerateReport {
        pages: vec!["index.html".to_string(), SCRIPT_FILE.to_string()],
        cards: gallery.grid().len(),
    })
}

/// Config-driven CSS variables followed by the static stylesheet.
pub fn page_css(config: &GalleryConfig) -> String {
    format!(
        "{}\n\n{}\n\n{}",
        config::generate_color_css(&config.colors),
        config::generate_theme_css(&config.theme),
        CSS_STATIC
    )
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, css: &str, head: Markup, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
                (head)
            }
            body {
                (content)
            }
        }
    }
}

/// Renders one tile of the grid.
///
/// `data-attempt` is the candidate index the image is showing; the script
/// moves on from there when it fails to load.
pub fn render_card(card: &Card) -> Markup {
    let attempt = card.image.attempt();
    html! {
        article.card data-haystack=(card.haystack) data-position=(card.position) {
            img.thumb
                src=(card.image.displayed())
                alt=(card.alt_text())
                loading="lazy"
                data-slug=(card.slug())
                data-attempt=(attempt);
            div.meta {
                div.name {
                    (card.english_name())
                    @if let Some(zh) = card.secondary_name() {
                        span.zh { "（" (zh) "）" }
                    }
                }
                div.tag { (card.tag()) }
            }
        }
    }
}

/// Renders the grid container with the given cards.
pub fn render_grid(cards: &[Card]) -> Markup {
    html! {
        div #grid {
            @for card in cards {
                (render_card(card))
            }
        }
    }
}

/// Renders the lightbox dialog. Closed unless the lightbox is open.
pub fn render_lightbox(lightbox: &Lightbox) -> Markup {
    html! {
        dialog.lightbox open[lightbox.is_open()] {
            img.lb-img src=[(!lightbox.src().is_empty()).then_some(lightbox.src())] alt=(lightbox.caption());
            div.hidden #lbCaption { (lightbox.caption()) }
        }
    }
}

/// Renders the whole page.
pub fn render_page(gallery: &Gallery, config: &GalleryConfig, css: &str) -> Markup {
    let content = html! {
        header.site-header {
            h1 { (config.title) }
            input #search type="search" placeholder="Search" autocomplete="off" value=(gallery.query());
        }
        main {
            (render_grid(gallery.grid()))
        }
        (render_lightbox(gallery.lightbox()))
    };

    // In <head> so the fallback listener exists before the first card parses
    let head = html! {
        script src=(SCRIPT_FILE)
            data-img-base=(config.img_base)
            data-placeholder=(config.placeholder)
            data-json=(config.data_url) {}
    };

    base_document(&config.title, css, head, content)
}

// ============================================================================
// Tests
// ============================================================================
