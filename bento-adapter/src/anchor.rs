use alloc::rc::{Rc, Weak};
use core::fmt;

use bento::{Component, ComponentGroup};

/// A flat position remembered by identity: a child of a group plus an offset inside it.
///
/// Flat positions shift whenever anything before them is inserted, removed or resized. An
/// anchor survives those changes and can be turned back into the current flat position
/// with [`resolve_anchor`], e.g. to keep the first visible row in place.
///
/// The anchor holds the child weakly and does not keep it alive.
#[derive(Clone)]
pub struct ComponentAnchor {
    pub component: Weak<dyn Component>,
    /// Position of the anchored item, local to `component`.
    pub offset_in_component: usize,
}

impl fmt::Debug for ComponentAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentAnchor")
            .field("alive", &(self.component.strong_count() > 0))
            .field("offset_in_component", &self.offset_in_component)
            .finish()
    }
}

/// Anchors `position` to the direct child of `group` that owns it.
///
/// Returns `None` if `position` is outside the group.
pub fn capture_anchor(group: &ComponentGroup, position: usize) -> Option<ComponentAnchor> {
    let component = group.component_at(position).ok()?;
    let range = group.range_of(&component)?;
    Some(ComponentAnchor {
        component: Rc::downgrade(&component),
        offset_in_component: position - range.lower,
    })
}

/// Returns the current flat position of `anchor` in `group`.
///
/// If the anchored child shrank below the remembered offset, its last position is used.
/// Returns `None` when the child was dropped, is no longer in `group`, or is empty.
pub fn resolve_anchor(group: &ComponentGroup, anchor: &ComponentAnchor) -> Option<usize> {
    let component = anchor.component.upgrade()?;
    let range = group.range_of(&component)?;
    if range.is_empty() {
        return None;
    }
    let offset = anchor.offset_in_component.min(range.size() - 1);
    Some(range.lower + offset)
}
