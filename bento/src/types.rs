use alloc::rc::Rc;
use core::any::{Any, TypeId};
use core::fmt;

/// An item bound at a flat position. Items are heterogeneous across components, so the
/// host downcasts them against the position's [`HolderType`].
pub type Item = Rc<dyn Any>;

/// The presenter shared by the items of a component, if any.
pub type Presenter = Rc<dyn Any>;

/// A half-open interval `[lower, upper)` of flat positions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub lower: usize,
    pub upper: usize, // exclusive
}

impl Range {
    pub fn new(lower: usize, upper: usize) -> Self {
        debug_assert!(lower <= upper, "Range: lower > upper ({lower} > {upper})");
        Self { lower, upper }
    }

    pub fn with_size(lower: usize, size: usize) -> Self {
        Self {
            lower,
            upper: lower + size,
        }
    }

    pub fn size(&self) -> usize {
        self.upper - self.lower
    }

    pub fn is_empty(&self) -> bool {
        self.lower >= self.upper
    }

    pub fn contains(&self, position: usize) -> bool {
        self.lower <= position && position < self.upper
    }
}

/// A value together with the range it currently owns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangedValue<T> {
    pub value: T,
    pub range: Range,
}

/// A structural change, expressed in the coordinates of the node that emitted it.
///
/// A leaf emits events over its own positions; every [`crate::ComponentGroup`] on the way
/// up re-emits them shifted by the child's range lower bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataEvent {
    /// Anything may have changed, including the count.
    Changed,
    RangeChanged { start: usize, count: usize },
    RangeInserted { start: usize, count: usize },
    RangeRemoved { start: usize, count: usize },
    Moved { from: usize, to: usize },
}

impl DataEvent {
    /// Shifts every position carried by the event by `offset`.
    pub fn offset(self, offset: usize) -> Self {
        match self {
            Self::Changed => Self::Changed,
            Self::RangeChanged { start, count } => Self::RangeChanged {
                start: start + offset,
                count,
            },
            Self::RangeInserted { start, count } => Self::RangeInserted {
                start: start + offset,
                count,
            },
            Self::RangeRemoved { start, count } => Self::RangeRemoved {
                start: start + offset,
                count,
            },
            Self::Moved { from, to } => Self::Moved {
                from: from + offset,
                to: to + offset,
            },
        }
    }
}

/// Identifies the kind of view holder that renders a position.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HolderType {
    id: TypeId,
    name: &'static str,
}

impl HolderType {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: core::any::type_name::<T>(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for HolderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HolderType").field(&self.name).finish()
    }
}
