//! A headless, host-agnostic virtualized list engine.
//!
//! [`VirtualList`] displays an arbitrarily long sequence of variable-height items (chat
//! messages, log lines, feed entries) while keeping only a small window of live render targets
//! mounted. It provides:
//!
//! - a Fenwick-tree index over item heights: O(log n) offset-of-index and index-at-offset,
//! - a window calculator that turns a scroll position into an overscanned index range,
//! - a key-stable reconciler that mounts, reuses and unmounts render targets and keeps them in
//!   index order between two spacers,
//! - frame-coalesced queues for re-measurement, spacer writes and scroll evaluation.
//!
//! The host environment plugs in through three traits:
//! - [`Container`]: the node render targets are inserted into (and measured in),
//! - [`ScrollElement`]: the scrolled viewport,
//! - [`FrameScheduler`]: "defer to the next render tick" ([`FrameQueue`] is a manual one).
//!
//! For ready-made in-memory hosts (retained container, shared viewport, scroll anchoring) see
//! the `virtual-list-adapter` crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod fenwick;
mod frame;
mod heights;
mod host;
mod key;
mod measure;
mod options;
mod reconcile;
mod scroll;
mod spacer;
mod types;
mod virtual_list;


pub use error::{Error, HostError};
pub use frame::FrameQueue;
pub use host::{Anchor, Container, FrameScheduler, ScrollElement};
pub use options::{
    DEFAULT_ESTIMATED_ITEM_HEIGHT, DEFAULT_OVERSCAN, ItemCountProvider, ItemKeyProvider,
    LifecycleHook, RangeChangeCallback, RenderItem, VirtualListOptions,
};
pub use types::{Align, FrameHandle, ListSnapshot, MountMeta, Px, Range, Spacer};
pub use virtual_list::VirtualList;
