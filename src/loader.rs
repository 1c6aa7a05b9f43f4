//! Image load attempts.
//!
//! The [`ImageLoader`] trait is the seam between the resolver's retry loop
//! and wherever the images actually live. A load attempt either succeeds or
//! fails; the resolver never asks whether a file exists, it tries to load it.
//!
//! | Loader | Where | What counts as loaded |
//! |---|---|---|
//! | [`AssetLoader`] | files under a site root | header decodes (`image`, `avif-parse` for AVIF) |
//! | [`HttpLoader`] | remote `http(s)` URLs | `image/*` response that decodes |
//! | [`DeferredLoader`] | nowhere | nothing is tried; the browser walks the chain |

use image::ImageReader;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("outside image base: {0}")]
    OutsideBase(String),
}

/// Pixel size reported by a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// One attempt at loading an image URL.
pub trait ImageLoader: Sync {
    fn load(&self, url: &str) -> Result<(), LoadError>;

    /// A deferred loader performs no attempts at all.
    fn is_deferred(&self) -> bool {
        false
    }
}

/// Loads nothing. Chains stay on their first candidate and are finished by
/// the browser.
pub struct DeferredLoader;

impl ImageLoader for DeferredLoader {
    fn load(&self, url: &str) -> Result<(), LoadError> {
        Err(LoadError::NotFound(url.to_string()))
    }

    fn is_deferred(&self) -> bool {
        true
    }
}

/// Loads images from disk, mapping the URL space under `img_base` onto a
/// directory.
///
/// With `img_base = "/assets/hi3/characters/"` and `site_root = "public"`,
/// `/assets/hi3/characters/kiana.png` loads `public/assets/hi3/characters/kiana.png`.
pub struct AssetLoader {
    img_base: String,
    dir: PathBuf,
}

impl AssetLoader {
    pub fn new(img_base: &str, site_root: &Path) -> Self {
        Self {
            img_base: img_base.to_string(),
            dir: asset_dir(img_base, site_root),
        }
    }

    /// Directory holding the candidate images.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_for(&self, url: &str) -> Result<PathBuf, LoadError> {
        let name = url
            .strip_prefix(&self.img_base)
            .ok_or_else(|| LoadError::OutsideBase(url.to_string()))?;
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return Err(LoadError::OutsideBase(url.to_string()));
        }
        Ok(self.dir.join(name))
    }

    /// Read the image header and report its size.
    pub fn identify(&self, url: &str) -> Result<Dimensions, LoadError> {
        let path = self.file_for(url)?;
        if !path.is_file() {
            return Err(LoadError::NotFound(url.to_string()));
        }
        if is_avif(&path) {
            return identify_avif(&path);
        }
        let (width, height) = ImageReader::open(&path)?
            .with_guessed_format()?
            .into_dimensions()
            .map_err(|e| LoadError::Decode(format!("{}: {}", path.display(), e)))?;
        Ok(Dimensions { width, height })
    }
}

impl ImageLoader for AssetLoader {
    fn load(&self, url: &str) -> Result<(), LoadError> {
        self.identify(url).map(|_| ())
    }
}

/// Directory that `img_base` maps to under a site root.
pub fn asset_dir(img_base: &str, site_root: &Path) -> PathBuf {
    site_root.join(img_base.trim_start_matches('/'))
}

fn is_avif(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("avif"))
}

/// AVIF dimensions come from the container metadata; no AV1 decode needed.
fn identify_avif(path: &Path) -> Result<Dimensions, LoadError> {
    let file_data = std::fs::read(path)?;
    let avif = avif_parse::read_avif(&mut std::io::Cursor::new(&file_data)).map_err(|e| {
        LoadError::Decode(format!("Failed to parse AVIF {}: {e:?}", path.display()))
    })?;
    let meta = avif.primary_item_metadata().map_err(|e| {
        LoadError::Decode(format!(
            "Failed to read AVIF metadata {}: {e:?}",
            path.display()
        ))
    })?;
    Ok(Dimensions {
        width: meta.max_frame_width.get(),
        height: meta.max_frame_height.get(),
    })
}

/// Upper bound on a downloaded image body.
const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

/// Loads remote images over HTTP.
pub struct HttpLoader {
    agent: ureq::Agent,
}

impl HttpLoader {
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .user_agent(concat!("valkyrie-gallery/", env!("CARGO_PKG_VERSION")))
                .build(),
        }
    }
}

impl Default for HttpLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageLoader for HttpLoader {
    fn load(&self, url: &str) -> Result<(), LoadError> {
        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| LoadError::Http(e.to_string()))?;

        let content_type = response.content_type().to_lowercase();
        if !content_type.starts_with("image/") {
            return Err(LoadError::Decode(format!(
                "{url}: unexpected content type {content_type}"
            )));
        }

        let mut bytes = Vec::new();
        response
            .into_reader()
            .take(MAX_IMAGE_BYTES)
            .read_to_end(&mut bytes)?;

        if content_type == "image/avif" {
            avif_parse::read_avif(&mut std::io::Cursor::new(&bytes))
                .map_err(|e| LoadError::Decode(format!("{url}: {e:?}")))?;
            return Ok(());
        }
        image::load_from_memory(&bytes)
            .map(|_| ())
            .map_err(|e| LoadError::Decode(format!("{url}: {e}")))
    }
}
