use alloc::rc::Rc;

use crate::{DataObservable, HolderType, Item, Presenter, Result};

/// A shared handle to a component. Groups hold their children through this type.
pub type ComponentRef = Rc<dyn Component>;

/// A node contributing `count()` consecutive positions to a flat list.
///
/// Positions passed to every method are local to the component: `0` is its first
/// position, whatever its offset in an enclosing [`crate::ComponentGroup`].
///
/// Components are shared (`Rc`) and notify their parents synchronously, so
/// implementations keep their state behind interior mutability and must release any
/// borrow of it before notifying [`Component::data_observable`]: the parent reads
/// `count()` back while handling [`crate::DataEvent::Changed`].
pub trait Component {
    fn count(&self) -> usize;

    fn item(&self, position: usize) -> Result<Item>;

    fn holder_type(&self, position: usize) -> Result<HolderType>;

    fn presenter(&self, position: usize) -> Result<Option<Presenter>>;

    /// Whether `position` is a gap: a position with no backing item, such as a spacer.
    /// Gaps never receive visibility callbacks.
    fn has_gap(&self, _position: usize) -> bool {
        false
    }

    /// The view at `position` scrolled on screen.
    fn on_item_visible(&self, _position: usize) -> Result<()> {
        Ok(())
    }

    /// The view at `position` scrolled off screen.
    fn on_item_not_visible(&self, _position: usize) -> Result<()> {
        Ok(())
    }

    fn data_observable(&self) -> &DataObservable;
}

/// Fails with [`crate::Error::PositionOutOfRange`] unless `position < count`.
pub fn check_position(position: usize, count: usize) -> Result<()> {
    if position >= count {
        return Err(crate::Error::PositionOutOfRange {
            position,
            span: count,
        });
    }
    Ok(())
}
