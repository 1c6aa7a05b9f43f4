//! CLI output formatting.
//!
//! Output is **item-centric**: each character leads with its positional
//! index and slug (or display name, once cards exist); image sources and
//! failures follow as indented context lines.
//!
//! # Output Format
//!
//! ## Load
//!
//! ```text
//! Data: public/data/characters.json (4 items)
//! 001 kiana
//!     Image: /assets/hi3/characters/kiana.webp
//! 004 himeko
//!     Failed: /assets/hi3/characters/himeko.webp (not found: …)
//!     …
//!     Image: /assets/placeholder.png (no candidate loaded)
//! ```
//!
//! Without a loader (no `--site-root` or `--fetch-images`) nothing is loaded
//! at build time, and the first candidate is marked as such:
//!
//! ```text
//! 001 kiana
//!     Image: /assets/hi3/characters/kiana.webp (not loaded, resolved in the browser)
//! ```
//!
//! A failed fetch is reported, not raised:
//!
//! ```text
//! Data: https://example.com/c.json unavailable (HTTP status 404 from …), gallery is empty
//! ```
//!
//! ## Search
//!
//! ```text
//! Search "kaslana": 1 of 4
//! 001 Kiana Kaslana（琪亚娜） [kiana]
//! ```
//!
//! # Architecture
//!
//! Each `format_*` function is pure and returns `Vec<String>`; `print_*`
//! wrappers write to stdout.

use crate::card::Card;
use crate::check::CheckReport;
use crate::generate::GenerateReport;
use crate::lightbox::Lightbox;
use crate::resolve::{ChainStatus, ResolveEvent};
use crate::source::FetchReport;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn image_line(shown: &str, status: ChainStatus) -> String {
    match status {
        ChainStatus::Loaded => format!("{}Image: {}", indent(1), shown),
        ChainStatus::Placeholder => format!("{}Image: {} (no candidate loaded)", indent(1), shown),
        ChainStatus::Unresolved => format!(
            "{}Image: {} (not loaded, resolved in the browser)",
            indent(1),
            shown
        ),
    }
}

// ============================================================================
// Load
// ============================================================================

pub fn format_fetch_report(report: &FetchReport) -> Vec<String> {
    let mut lines = Vec::new();
    match &report.failure {
        Some(err) => lines.push(format!(
            "Data: {} unavailable ({}), gallery is empty",
            report.source, err
        )),
        None => lines.push(format!(
            "Data: {} ({} items)",
            report.source,
            report.items.len()
        )),
    }
    if report.skipped > 0 {
        lines.push(format!(
            "{}Skipped {} unreadable record(s)",
            indent(1),
            report.skipped
        ));
    }
    lines
}

/// Lines for one settled image chain, as it arrives from the resolver.
pub fn format_resolve_event(event: &ResolveEvent) -> Vec<String> {
    let mut lines = vec![format!("{} {}", format_index(event.index + 1), event.slug)];
    for failure in event.chain.failures() {
        lines.push(format!("{}Failed: {} ({})", indent(1), failure.url, failure.reason));
    }
    lines.push(image_line(event.chain.displayed(), event.chain.status()));
    lines
}

pub fn format_cards(cards: &[Card]) -> Vec<String> {
    cards
        .iter()
        .map(|card| {
            format!(
                "{} {} [{}]",
                format_index(card.position + 1),
                card.display_text(),
                card.slug()
            )
        })
        .collect()
}

pub fn format_search(query: &str, cards: &[Card], total: usize) -> Vec<String> {
    let mut lines = vec![format!("Search \"{}\": {} of {}", query, cards.len(), total)];
    lines.extend(format_cards(cards));
    lines
}

pub fn format_lightbox(lightbox: &Lightbox) -> Vec<String> {
    vec![
        format!("Lightbox: {:?}", lightbox.state()),
        format!("{}Image: {}", indent(1), lightbox.src()),
        format!("{}Caption: {}", indent(1), lightbox.caption()),
    ]
}

pub fn format_check(report: &CheckReport) -> Vec<String> {
    let mut lines = vec!["Items".to_string()];
    for (i, item) in report.items.iter().enumerate() {
        lines.push(format!("{} {} [{}]", format_index(i + 1), item.name, item.slug));
        for url in &item.failed {
            lines.push(format!("{}Failed: {}", indent(1), url));
        }
        lines.push(image_line(&item.shown, item.status));
    }
    if !report.orphans.is_empty() {
        lines.push(String::new());
        lines.push("Unused images".to_string());
        for orphan in &report.orphans {
            lines.push(format!("{}{}", indent(1), orphan.display()));
        }
    }
    lines.push(String::new());
    let unresolved = report.unresolved();
    if unresolved > 0 {
        lines.push(format!(
            "{} items, {} not checked, {} unused images",
            report.items.len(),
            unresolved,
            report.orphans.len()
        ));
        lines.push(format!(
            "{}Portraits were not loaded; pass --site-root or --fetch-images to check them",
            indent(1)
        ));
    } else {
        lines.push(format!(
            "{} items, {} without a portrait, {} unused images",
            report.items.len(),
            report.missing(),
            report.orphans.len()
        ));
    }
    lines
}

pub fn format_generate(report: &GenerateReport, output_dir: &Path) -> Vec<String> {
    let mut lines: Vec<String> = report
        .pages
        .iter()
        .map(|page| format!("Generated {}", output_dir.join(page).display()))
        .collect();
    lines.push(format!("{} cards rendered", report.cards));
    lines
}

// ============================================================================
// Print wrappers
// ============================================================================

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

pub fn print_fetch_report(report: &FetchReport) {
    print_lines(format_fetch_report(report));
}

pub fn print_search(query: &str, cards: &[Card], total: usize) {
    print_lines(format_search(query, cards, total));
}

pub fn print_lightbox(lightbox: &Lightbox) {
    print_lines(format_lightbox(lightbox));
}

pub fn print_check(report: &CheckReport) {
    print_lines(format_check(report));
}

pub fn print_generate(report: &GenerateReport, output_dir: &Path) {
    print_lines(format_generate(report, output_dir));
}
