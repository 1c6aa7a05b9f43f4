//! Asset audit for the `check` command.
//!
//! Reports, per item, which candidate the gallery would show, and lists
//! portrait files under the asset directory that no item refers to.

use crate::gallery::Gallery;
use crate::resolve::{ChainStatus, IMAGE_EXTENSIONS};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// How one item's portrait resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStatus {
    pub slug: String,
    pub name: String,
    pub shown: String,
    pub status: ChainStatus,
    /// Candidates that were tried and failed before `shown`.
    pub failed: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    pub items: Vec<ItemStatus>,
    /// Image files whose stem matches no slug, relative to the asset dir.
    pub orphans: Vec<PathBuf>,
}

impl CheckReport {
    fn count(&self, status: ChainStatus) -> usize {
        self.items.iter().filter(|i| i.status == status).count()
    }

    /// Items that fell through to the placeholder.
    pub fn missing(&self) -> usize {
        self.count(ChainStatus::Placeholder)
    }

    /// Items whose portrait was never loaded, so their state is unknown.
    pub fn unresolved(&self) -> usize {
        self.count(ChainStatus::Unresolved)
    }
}

/// Audit every item in source order, regardless of the current search.
pub fn check(gallery: &Gallery, asset_dir: Option<&Path>) -> CheckReport {
    let items: Vec<ItemStatus> = gallery
        .index()
        .entries()
        .iter()
        .zip(gallery.images())
        .map(|(entry, chain)| ItemStatus {
            slug: entry.item.slug.clone(),
            name: entry.item.en.clone(),
            shown: chain.displayed().to_string(),
            status: chain.status(),
            failed: chain.failures().iter().map(|f| f.url.clone()).collect(),
        })
        .collect();

    let orphans = match asset_dir {
        Some(dir) => {
            let slugs: HashSet<&str> = gallery
                .index()
                .entries()
                .iter()
                .map(|e| e.item.slug.as_str())
                .collect();
            find_orphans(dir, &slugs)
        }
        None => Vec::new(),
    };

    CheckReport { items, orphans }
}

/// Candidate-extension files directly under `dir` whose stem is not a slug.
fn find_orphans(dir: &Path, slugs: &HashSet<&str>) -> Vec<PathBuf> {
    let mut orphans: Vec<PathBuf> = WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let path = e.path();
            let ext_ok = path
                .extension()
                .and_then(|x| x.to_str())
                .is_some_and(|x| IMAGE_EXTENSIONS.contains(&x));
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
            ext_ok && !slugs.contains(stem)
        })
        .filter_map(|e| e.path().strip_prefix(dir).ok().map(Path::to_path_buf))
        .collect();
    orphans.sort();
    orphans
}
