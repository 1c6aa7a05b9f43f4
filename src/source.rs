//! The JSON data source.
//!
//! The gallery makes exactly one fetch per load. A data source is either an
//! `http(s)` URL or a file; site-absolute paths (`/data/characters.json`) are
//! resolved against the site root when one is configured.
//!
//! Every way the fetch can go wrong (network error, non-2xx status, a body
//! that is not a JSON array) degrades to an empty item list. Records inside
//! the array are read best-effort: one that lacks `slug` or `en` is skipped
//! without affecting its neighbours.

use crate::types::Item;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("HTTP status {status} from {url}")]
    Status { url: String, status: u16 },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON array of items")]
    NotAnArray,
}

/// Where the item list comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Http(String),
    File(PathBuf),
}

impl DataSource {
    /// Interpret a configured data URL.
    ///
    /// - `http://…`, `https://…` → fetched over HTTP
    /// - `/data/x.json` with a site root → `<site_root>/data/x.json`
    /// - anything else → a path relative to the working directory
    pub fn locate(url: &str, site_root: Option<&Path>) -> Self {
        if url.starts_with("http://") || url.starts_with("https://") {
            return DataSource::Http(url.to_string());
        }
        match site_root {
            Some(root) => DataSource::File(root.join(url.trim_start_matches('/'))),
            None => DataSource::File(PathBuf::from(url)),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            DataSource::Http(url) => url.clone(),
            DataSource::File(path) => path.display().to_string(),
        }
    }

    /// Fetch the raw body.
    pub fn fetch(&self) -> Result<String, SourceError> {
        match self {
            DataSource::File(path) => Ok(std::fs::read_to_string(path)?),
            DataSource::Http(url) => match ureq::get(url).call() {
                Ok(response) => Ok(response.into_string()?),
                Err(ureq::Error::Status(status, _)) => Err(SourceError::Status {
                    url: url.clone(),
                    status,
                }),
                Err(e) => Err(SourceError::Http(e.to_string())),
            },
        }
    }
}

/// Outcome of loading the item list.
#[derive(Debug)]
pub struct FetchReport {
    pub source: String,
    pub items: Vec<Item>,
    /// Why the list is empty, when the fetch or parse failed.
    pub failure: Option<SourceError>,
    /// Records dropped because they could not be read as items.
    pub skipped: usize,
}

/// Fetch and parse, never failing: errors become an empty list plus a reason.
pub fn fetch_items(source: &DataSource) -> FetchReport {
    let parsed = source.fetch().and_then(|body| parse_items(&body));
    match parsed {
        Ok((items, skipped)) => FetchReport {
            source: source.describe(),
            items,
            failure: None,
            skipped,
        },
        Err(err) => FetchReport {
            source: source.describe(),
            items: Vec::new(),
            failure: Some(err),
            skipped: 0,
        },
    }
}

/// Parse a JSON array of item records, skipping unreadable records.
///
/// Returns the items and the number of records skipped.
pub fn parse_items(body: &str) -> Result<(Vec<Item>, usize), SourceError> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    let serde_json::Value::Array(records) = value else {
        return Err(SourceError::NotAnArray);
    };
    let total = records.len();
    let items: Vec<Item> = records
        .into_iter()
        .filter_map(|record| serde_json::from_value(record).ok())
        .collect();
    let skipped = total - items.len();
    Ok((items, skipped))
}
