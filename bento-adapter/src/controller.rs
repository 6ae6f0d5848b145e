use alloc::rc::Rc;
use alloc::vec::Vec;

use bento::{ComponentGroup, DataEvent, Result};

use crate::{
    ChangeRecorder, ComponentAnchor, VisibilityTracker, VisibleRange, capture_anchor,
    resolve_anchor,
};

/// A framework-neutral controller that sits between a list host and a root
/// [`ComponentGroup`].
///
/// The host drives it by calling:
/// - `drain_events` once per frame, applying the returned flat-space events to its view
/// - `on_visible_range` whenever the set of on-screen positions changes
///
/// Dropping the controller unregisters it from the root.
#[derive(Debug)]
pub struct Controller {
    root: Rc<ComponentGroup>,
    recorder: Rc<ChangeRecorder>,
    visibility: VisibilityTracker,
}

impl Controller {
    pub fn new(root: Rc<ComponentGroup>) -> Self {
        let recorder = ChangeRecorder::attach(&*root);
        Self {
            root,
            recorder,
            visibility: VisibilityTracker::new(),
        }
    }

    pub fn root(&self) -> &Rc<ComponentGroup> {
        &self.root
    }

    /// Number of positions the host should display.
    pub fn item_count(&self) -> usize {
        self.root.span()
    }

    /// Flat-space events reported since the last call, oldest first.
    pub fn drain_events(&self) -> Vec<DataEvent> {
        self.recorder.take()
    }

    pub fn has_pending_events(&self) -> bool {
        !self.recorder.is_empty()
    }

    /// Call this when the range of positions on screen changes.
    pub fn on_visible_range(&mut self, start: usize, end: usize) -> Result<()> {
        self.visibility
            .update(&*self.root, VisibleRange::new(start, end))
    }

    pub fn visible_range(&self) -> VisibleRange {
        self.visibility.visible()
    }

    /// Anchors the first visible position, if any.
    pub fn anchor_first_visible(&self) -> Option<ComponentAnchor> {
        let visible = self.visibility.visible();
        if visible.is_empty() {
            return None;
        }
        capture_anchor(&self.root, visible.start)
    }

    pub fn anchor_at(&self, position: usize) -> Option<ComponentAnchor> {
        capture_anchor(&self.root, position)
    }

    /// The current flat position of a previously captured anchor.
    pub fn resolve(&self, anchor: &ComponentAnchor) -> Option<usize> {
        resolve_anchor(&self.root, anchor)
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        self.recorder.detach(&*self.root);
    }
}
