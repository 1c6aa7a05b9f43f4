//! Shared test utilities.
//!
//! [`FixtureSite`] writes a small site into a temp directory: a data file
//! plus real encoded portraits, laid out the way the gallery expects them.
//!
//! ```text
//! <root>/
//! ├── data/characters.json        kiana, mei, bronya, himeko
//! └── assets/
//!     ├── placeholder.png
//!     └── hi3/characters/
//!         ├── kiana.webp          ← first candidate, wins
//!         ├── kiana.png
//!         ├── mei.jpg             ← wins over mei.jpeg
//!         ├── mei.jpeg
//!         ├── bronya.webp         ← corrupt, falls through
//!         ├── bronya.png          ← wins
//!         └── theresa.png         ← orphan, no item
//! ```
//!
//! Himeko has no portrait and resolves to the placeholder.

use crate::loader::asset_dir;
use crate::types::Item;
use image::{Rgb, RgbImage};
use std::path::Path;
use tempfile::TempDir;

/// The four characters used across the test suite.
pub fn sample_items() -> Vec<Item> {
    vec![
        Item::new("kiana", "Kiana Kaslana", Some("琪亚娜")),
        Item::new("mei", "Raiden Mei", Some("雷电芽衣")),
        Item::new("bronya", "Bronya Zaychik", None),
        Item::new("himeko", "Murata Himeko", Some("姬子")),
    ]
}

/// Encode a solid-color image; the format follows the file extension.
pub fn write_image(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_pixel(width, height, Rgb([200, 80, 120]));
    img.save(path)
        .unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));
}

pub fn write_png(path: &Path, width: u32, height: u32) {
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));
    write_image(path, width, height);
}

pub struct FixtureSite {
    tmp: TempDir,
}

impl FixtureSite {
    pub fn build() -> Self {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();

        std::fs::create_dir_all(root.join("data")).unwrap();
        let json = serde_json::to_string_pretty(&sample_items()).unwrap();
        std::fs::write(root.join("data/characters.json"), json).unwrap();

        let dir = asset_dir(crate::config::DEFAULT_IMG_BASE, root);
        std::fs::create_dir_all(&dir).unwrap();
        write_png(&root.join("assets/placeholder.png"), 2, 2);
        for name in ["kiana.webp", "kiana.png", "mei.jpg", "mei.jpeg", "bronya.png", "theresa.png"] {
            write_image(&dir.join(name), 8, 10);
        }
        std::fs::write(dir.join("bronya.webp"), b"RIFF\0\0\0\0WEBPjunk").unwrap();

        Self { tmp }
    }

    pub fn root(&self) -> &Path {
        self.tmp.path()
    }

    pub fn asset_dir(&self) -> std::path::PathBuf {
        asset_dir(crate::config::DEFAULT_IMG_BASE, self.root())
    }
}
