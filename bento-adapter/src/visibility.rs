use bento::{Component, Result};

/// The half-open range `[start, end)` of positions currently on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub start: usize,
    pub end: usize, // exclusive
}

impl VisibleRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn contains(&self, position: usize) -> bool {
        self.start <= position && position < self.end
    }

    fn clamp(self, span: usize) -> Self {
        Self::new(self.start.min(span), self.end.min(span))
    }
}

/// Turns successive visible ranges reported by a host into per-position
/// `on_item_visible` / `on_item_not_visible` calls on a root component.
#[derive(Clone, Debug, Default)]
pub struct VisibilityTracker {
    visible: VisibleRange,
}

impl VisibilityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible(&self) -> VisibleRange {
        self.visible
    }

    /// Records `next` as the visible range of `root`.
    ///
    /// Positions that left the range are reported first, then positions that entered it.
    /// Anything at or beyond `root.count()` is ignored: after a structural change the old
    /// range may point past the end of the list.
    ///
    /// If a callback fails, the error is returned and the previously recorded range is kept.
    pub fn update(&mut self, root: &dyn Component, next: VisibleRange) -> Result<()> {
        let span = root.count();
        let prev = self.visible.clamp(span);
        let next = next.clamp(span);

        for position in prev.start..prev.end {
            if !next.contains(position) {
                root.on_item_not_visible(position)?;
            }
        }
        for position in next.start..next.end {
            if !prev.contains(position) {
                root.on_item_visible(position)?;
            }
        }
        self.visible = next;
        Ok(())
    }

    /// Reports every visible position as no longer visible.
    pub fn clear(&mut self, root: &dyn Component) -> Result<()> {
        self.update(root, VisibleRange::default())
    }
}
