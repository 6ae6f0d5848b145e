//! List-host utilities for the `bento` crate.
//!
//! `bento` builds and maintains the flat list; this crate provides small, framework-neutral
//! helpers a list host commonly needs on top of it:
//!
//! - Buffering flat-space change events until the host applies them
//! - Turning on-screen ranges into per-position visibility callbacks
//! - Identity anchors that keep track of a row across structural changes
//!
//! This crate is intentionally framework-agnostic (no view or toolkit bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod anchor;
mod controller;
mod recorder;
mod visibility;

#[cfg(test)]
mod tests;

pub use anchor::{ComponentAnchor, capture_anchor, resolve_anchor};
pub use controller::Controller;
pub use recorder::ChangeRecorder;
pub use visibility::{VisibilityTracker, VisibleRange};
