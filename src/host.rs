//! Capabilities a host environment supplies to a [`crate::VirtualList`].
//!
//! The engine never names a concrete UI type. A browser host would back these traits with DOM
//! nodes and `requestAnimationFrame`; a terminal host with a retained row list and its redraw
//! loop (see the `virtual-list-adapter` crate).

use crate::{FrameHandle, Px, Spacer};

/// Where a target is placed relative to the container's children.
#[derive(Debug)]
pub enum Anchor<'a, T> {
    /// Directly after the top spacer (i.e. the first rendered position).
    TopSpacer,
    /// Directly before the bottom spacer (i.e. the last rendered position).
    BottomSpacer,
    /// Next to an already inserted target.
    Target(&'a T),
}

impl<T> Clone for Anchor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Anchor<'_, T> {}

/// The node that owns the rendered region: two sentinel spacers with render targets between
/// them.
///
/// `Target` is the opaque render handle (DOM element, terminal row, drawable...). Handles are
/// compared with `PartialEq` to decide whether a node is already in place.
pub trait Container {
    type Target: Clone + PartialEq;

    /// Makes sure both spacers are attached, re-creating or re-inserting them if the host tree
    /// lost them.
    fn ensure_spacers(&mut self);

    /// Inserts `target` directly before `anchor`, moving it if it is already attached.
    ///
    /// `Anchor::TopSpacer` is never passed here.
    fn insert_before(&mut self, target: &Self::Target, anchor: Anchor<'_, Self::Target>);

    /// The target directly after `anchor`, or `None` when it is a spacer or nothing.
    fn next_sibling(&self, anchor: Anchor<'_, Self::Target>) -> Option<Self::Target>;

    fn remove(&mut self, target: &Self::Target);

    fn is_attached(&self, target: &Self::Target) -> bool;

    /// Reads the real rendered size of a mounted target along the scroll axis.
    fn measure(&self, target: &Self::Target) -> f64;

    fn set_spacer_height(&mut self, spacer: Spacer, height: Px);

    /// Tags a freshly rendered target with its stable key (e.g. a `data-key` attribute).
    fn tag(&mut self, target: &Self::Target, key: &str) {
        let _ = (target, key);
    }
}

/// The scrollable viewport the list is bound to.
pub trait ScrollElement {
    fn scroll_top(&self) -> f64;

    fn viewport_height(&self) -> f64;

    /// Assigns the scroll position directly (no animation).
    fn set_scroll_top(&mut self, offset: f64);

    /// Starts forwarding scroll events to [`crate::VirtualList::handle_scroll_event`].
    fn listen(&mut self) {}

    /// Stops forwarding scroll events.
    fn unlisten(&mut self) {}
}

/// "Defer to the next render tick".
///
/// When a requested frame fires, the host passes its handle to
/// [`crate::VirtualList::run_frame`]. Cancelled handles must not be delivered.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;

    fn cancel_frame(&mut self, handle: FrameHandle);
}
