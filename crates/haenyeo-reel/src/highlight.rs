//! Highlight relay: keeps exactly one scanned target highlighted.

/// Tracks the highlighted target and toggles the renderer capability on change.
#[derive(Debug, Clone, Default)]
pub struct HighlightRelay<T> {
    current: Option<T>,
}

impl<T: Copy + Eq> HighlightRelay<T> {
    pub fn new() -> Self {
        Self { current: None }
    }

    pub fn current(&self) -> Option<T> {
        self.current
    }

    /// Point the highlight at `next`. `set` is called only when the target changes,
    /// first to switch the old target off, then to switch the new one on.
    pub fn update(&mut self, next: Option<T>, mut set: impl FnMut(T, bool)) {
        if next == self.current {
            return;
        }
        if let Some(old) = self.current.take() {
            set(old, false);
        }
        if let Some(new) = next {
            set(new, true);
        }
        self.current = next;
    }

    pub fn clear(&mut self, set: impl FnMut(T, bool)) {
        self.update(None, set);
    }

    /// Forget a target without toggling it, e.g. after it was despawned.
    pub fn forget(&mut self, target: T) {
        if self.current == Some(target) {
            self.current = None;
        }
    }
}
