//! A range-indexed composite list engine.
//!
//! A list is built from a tree of [`Component`]s. Each component contributes a contiguous
//! run of positions; a [`ComponentGroup`] lays its children out one after another and is
//! itself a component, so any tree flattens into one linearly indexed list, the kind a
//! scrolling list view consumes.
//!
//! The core pieces:
//! - [`AccordionList`]: ordered entries owning stretchable ranges, with `O(log n)` lookup
//!   of the entry that owns a position.
//! - [`ComponentGroup`]: list operations over children, identity lookups, and translation
//!   of child-local change events into its own coordinates.
//! - [`DataObservable`] / [`GroupObservable`]: listener lists that stay well-defined when a
//!   listener unregisters itself mid-notification.
//!
//! The engine never diffs. When a child's size changes by an arbitrary amount it reports
//! the overlap as changed and the difference as inserted or removed at the tail, which is
//! always safe to render.
//!
//! Everything here is single-threaded (`Rc` + `RefCell`). Rendering, view recycling and the
//! host list itself are left to the caller; see the `bento-adapter` crate for host-side
//! helpers.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod accordion;
mod component;
mod error;
mod fenwick;
mod group;
mod identity;
mod list;
mod observable;
mod options;
mod types;


pub use accordion::AccordionList;
pub use component::{Component, ComponentRef, check_position};
pub use error::{Error, Result};
pub use group::ComponentGroup;
pub use identity::ComponentId;
pub use list::{ListComponent, SimpleComponent};
pub use observable::{
    ComponentDataObserver, ComponentGroupObserver, DataObservable, GroupObservable, Observable,
};
pub use options::GroupOptions;
pub use types::{DataEvent, HolderType, Item, Presenter, Range, RangedValue};
