//! Modal full-size viewer.
//!
//! ```text
//! Uninitialized ──ensure──▶ Ready ──open──▶ Open ◀──open── Closed
//!                                            │                ▲
//!                                            └──Escape/backdrop┘
//! ```
//!
//! `ensure` runs at most once. There is no programmatic close: the viewer
//! is dismissed only by clicking the backdrop or pressing Escape.

use crate::card::LightboxRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxState {
    Uninitialized,
    Ready,
    Open,
    Closed,
}

/// Where a click inside the lightbox landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The dialog container itself, outside the image and caption.
    Backdrop,
    /// The image or caption.
    Content,
}

#[derive(Debug, Clone)]
pub struct Lightbox {
    state: LightboxState,
    src: String,
    caption: String,
}

impl Default for Lightbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Lightbox {
    pub fn new() -> Self {
        Self {
            state: LightboxState::Uninitialized,
            src: String::new(),
            caption: String::new(),
        }
    }

    pub fn state(&self) -> LightboxState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == LightboxState::Open
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Create the viewer if it does not exist yet. Returns true on creation.
    pub fn ensure(&mut self) -> bool {
        if self.state != LightboxState::Uninitialized {
            return false;
        }
        self.state = LightboxState::Ready;
        true
    }

    /// Show `src` with `caption`, replacing whatever was shown before.
    pub fn open(&mut self, src: &str, caption: &str) {
        self.ensure();
        self.src = src.to_string();
        self.caption = caption.to_string();
        self.state = LightboxState::Open;
    }

    pub fn show(&mut self, request: &LightboxRequest) {
        self.open(&request.src, &request.caption);
    }

    /// A click inside the viewer. Returns true if it closed the viewer.
    pub fn click(&mut self, target: ClickTarget) -> bool {
        match target {
            ClickTarget::Backdrop if self.is_open() => {
                self.state = LightboxState::Closed;
                true
            }
            _ => false,
        }
    }

    /// A key press anywhere on the page. Returns true if it closed the viewer.
    pub fn key(&mut self, key: &str) -> bool {
        if key == "Escape" && self.is_open() {
            self.state = LightboxState::Closed;
            return true;
        }
        false
    }
}
