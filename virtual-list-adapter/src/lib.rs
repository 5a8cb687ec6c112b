//! Host-side helpers for the `virtual-list` crate.
//!
//! `virtual-list` never names a concrete UI type. This crate provides small, framework-neutral
//! building blocks for hosts that keep their own retained tree (terminal UIs, tests, headless
//! renderers):
//!
//! - [`RetainedContainer`]: an in-memory child list with the two spacer sentinels
//! - [`Viewport`]: a shared-handle scroll element
//! - Scroll anchoring (e.g. prepend in chat/timelines without visual jumps)
//! - [`Driver`]: wires the three together and runs fired frames on `tick`
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod anchor;
mod driver;
mod retained;
mod viewport;

#[cfg(test)]
mod tests;

pub use anchor::{ScrollAnchor, apply_anchor, capture_anchor};
pub use driver::Driver;
pub use retained::{Layout, RetainedContainer, Row};
pub use viewport::{Viewport, ViewportState};
