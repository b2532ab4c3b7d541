//! Swipe-open action rows. At most one row shows its actions at a time.

/// Tracks which note, if any, has its action row revealed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwipeTracker {
    open: Option<String>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reveal the action row of `slug`, implicitly closing any other open row.
    pub fn open(&mut self, slug: &str) {
        self.open = Some(slug.to_string());
    }

    /// Close the row of `slug` if it is the open one. Returns true if it was open.
    pub fn close(&mut self, slug: &str) -> bool {
        if self.is_open(slug) {
            self.open = None;
            true
        } else {
            false
        }
    }

    /// Close whatever row is open. Returns the slug that was open.
    pub fn close_any(&mut self) -> Option<String> {
        self.open.take()
    }

    /// Open the row of `slug` unless it is already open, in which case close it.
    pub fn toggle(&mut self, slug: &str) -> bool {
        if self.close(slug) {
            false
        } else {
            self.open(slug);
            true
        }
    }

    pub fn is_open(&self, slug: &str) -> bool {
        self.open.as_deref() == Some(slug)
    }

    pub fn open_slug(&self) -> Option<&str> {
        self.open.as_deref()
    }
}
