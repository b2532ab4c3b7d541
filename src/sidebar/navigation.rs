//! Keyboard highlight over the search result list.

/// Highlight state over a result list of a given length.
///
/// `Active` always holds `index < len` with `len > 0`; an empty or absent list is
/// `Inactive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    /// Nothing to navigate
    #[default]
    Inactive,
    /// Highlight on `index` of a list of `len` items
    Active { index: usize, len: usize },
}

impl Highlight {
    /// Fresh highlight for a newly installed result list: index 0, or inactive when empty.
    pub fn reset(len: usize) -> Self {
        if len == 0 {
            Self::Inactive
        } else {
            Self::Active { index: 0, len }
        }
    }

    /// Highlighted index, if any.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Inactive => None,
            Self::Active { index, .. } => Some(*index),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    /// Whether position `i` is the highlighted one.
    pub fn is_highlighted(&self, i: usize) -> bool {
        self.index() == Some(i)
    }

    /// Move forward, wrapping from the last item to the first.
    pub fn next(&mut self) {
        if let Self::Active { index, len } = self {
            *index = (*index + 1) % *len;
        }
    }

    /// Move backward, wrapping from the first item to the last.
    pub fn previous(&mut self) {
        if let Self::Active { index, len } = self {
            *index = (*index + *len - 1) % *len;
        }
    }

    /// Jump to `target`. Out-of-range targets are ignored. Returns true if moved.
    pub fn select(&mut self, target: usize) -> bool {
        match self {
            Self::Active { index, len } if target < *len => {
                *index = target;
                true
            }
            _ => false,
        }
    }
}
